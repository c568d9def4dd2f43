//! Command implementations behind the `magick-bindgen` binary
//!
//! Each command returns its output instead of printing it so it can be tested directly.

pub mod commands;
