//! Solid cube spinning about (0.5, 1, 0) on a white background.
//!
//! Up/Down scale the cube, W/S move it vertically, A/D horizontally.

use spincube::{logging, Variant};

fn main() {
    logging::init();

    let result = spincube::run(Variant::Solid);
    if let Err(e) = &result {
        tracing::error!("{e}");
    }
    std::process::exit(spincube::exit_code(&result));
}
