use thiserror::Error;

/// Error type for dtpkit-config operations
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Template error: {0}")]
  Template(String),

  #[error(transparent)]
  Numbering(#[from] dtpkit_core::NumberingError),
}
