pub mod config;
pub mod error;
pub mod numbering;
pub mod templates;

pub use config::Config;
pub use error::ConfigError;
pub use numbering::NumberingConfig;
