pub mod logging;
pub mod config;
pub mod error;
pub mod utils;

// MVC layout
pub mod model;
pub mod view;
pub mod controller;

pub mod app;

pub use app::run;
pub use config::Variant;
pub use error::{exit_code, LaunchError};
