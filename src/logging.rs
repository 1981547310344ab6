use std::env;
use std::io;
use std::path::Path;

use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

const DEFAULT_LOG_FILE: &str = "logs/spincube.log";

static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// Install the global subscriber: stderr plus a daily-rolling log file.
///
/// `RUST_LOG` sets the filter (default `info`), `RUST_LOG_FILE` the file path.
/// Calling this twice keeps the first subscriber.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .compact();

    let log_path = env::var("RUST_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
    let (dir, file_name) = split_log_path(&log_path);
    let (nb_writer, guard) = tracing_appender::non_blocking(
        tracing_appender::rolling::daily(dir, file_name),
    );
    let _ = FILE_GUARD.set(guard);

    let file_layer = fmt::layer()
        .with_writer(nb_writer)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .with_ansi(false)
        .compact();

    if tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        return;
    }

    std::panic::set_hook(Box::new(|info| {
        let mut msg = String::new();
        if let Some(loc) = info.location() {
            msg.push_str(&format!("panic at {}:{}:{} ", loc.file(), loc.line(), loc.column()));
        }
        if let Some(s) = info.payload().downcast_ref::<&str>() { msg.push_str(s); }
        else if let Some(s) = info.payload().downcast_ref::<String>() { msg.push_str(s); }
        else { msg.push_str("<non-string panic>"); }
        let bt = std::backtrace::Backtrace::force_capture();
        tracing::error!("{}\nBacktrace:\n{:?}", msg, bt);
    }));
}

fn split_log_path(log_path: &str) -> (&Path, &str) {
    let path = Path::new(log_path);
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("spincube.log");
    (dir, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_log_path() {
        assert_eq!(split_log_path("logs/spincube.log"), (Path::new("logs"), "spincube.log"));
        assert_eq!(split_log_path("cube.log"), (Path::new("."), "cube.log"));
        assert_eq!(split_log_path("/var/log/demo/out.log"), (Path::new("/var/log/demo"), "out.log"));
    }
}
