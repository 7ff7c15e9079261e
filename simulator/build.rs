//! Build script for nautical-barometer-simulator
//!
//! On Windows the SDL2 import library is not on the default search path.
//! Point `SDL2_LIB_DIR` at the directory holding `SDL2.lib` (and keep
//! `SDL2.dll` next to the built executable).

use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=SDL2_LIB_DIR");

    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    match env::var("SDL2_LIB_DIR") {
        Ok(dir) => println!("cargo:rustc-link-search=native={dir}"),
        Err(_) => println!("cargo:warning=SDL2_LIB_DIR not set, relying on the default library path"),
    }
}
