//! CLI command implementations.

mod build;
mod verify;

pub use build::{BuildArgs, build, write_report};
pub use verify::verify;
