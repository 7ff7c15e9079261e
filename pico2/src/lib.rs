//! Board support for the barometer firmware - the host-testable part.
//!
//! The binary (`main.rs`) adds the embassy tasks, the ST7789 transfer code
//! and the I2C bus. Everything here builds and tests on the host.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p nautical-barometer-pico2 --lib --target x86_64-unknown-linux-gnu  # Linux/macOS
//! cargo test -p nautical-barometer-pico2 --lib --target x86_64-pc-windows-msvc    # Windows
//! ```

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod board;
pub mod framebuffer;
