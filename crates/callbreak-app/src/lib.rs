pub mod config;
pub mod driver;
pub mod logging;
pub mod render;
pub mod sink;

pub use config::{AppConfig, ConfigError, LoggingConfig, ValidationError};
pub use driver::Driver;
