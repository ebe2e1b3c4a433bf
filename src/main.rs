//! # Block World Entry Point
//!
//! Runs the library's headless session. An optional first argument names a
//! JSON configuration file.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- config.json
//! ```

use std::path::PathBuf;

fn main() {
    let config_path = std::env::args().nth(1).map(PathBuf::from);

    if let Err(error) = blockworld::run(config_path.as_deref()) {
        eprintln!("blockworld: {}", error);
        std::process::exit(1);
    }
}
