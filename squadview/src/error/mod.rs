//! Error types

mod color;
mod config;
mod sort;

pub use color::*;
pub use config::*;
pub use sort::*;
