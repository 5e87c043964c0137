use std::io;

use dtpkit_config::ConfigError;
use dtpkit_core::TransposeError;
use thiserror::Error;

/// Top-level error type for the dtpkit crate.
#[derive(Debug, Error)]
pub enum DtpkitError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("Transpose error: {0}")]
  Transpose(#[from] TransposeError),

  #[error("File already exists: {0}. Use --force to overwrite.")]
  AlreadyExists(String),
}

/// Result type for dtpkit commands.
pub type Result<T> = std::result::Result<T, DtpkitError>;
