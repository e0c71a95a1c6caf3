//! # Voxel Sandbox Entry Point
//!
//! Runs the headless streaming demo from the library's `run()` function.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release [config.json]
//! ```

fn main() {
    voxel_sandbox::run();
}
