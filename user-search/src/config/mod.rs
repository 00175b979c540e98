//! Configuration and dependency wiring for the user search driver.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{AppConfig, LogFormat};
