//! Red wireframe cube spinning about (0.5, 1, 0).

use spincube::{logging, Variant};

fn main() {
    logging::init();

    let result = spincube::run(Variant::Wireframe);
    if let Err(e) = &result {
        tracing::error!("{e}");
    }
    std::process::exit(spincube::exit_code(&result));
}
