// Library surface for the binary and integration tests.
pub mod app_dirs;
pub mod cloze;
pub mod config;
pub mod error;
pub mod passage;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod telemetry;

pub use error::{Error, Result};
