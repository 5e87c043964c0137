//! Expose dtpkit's command plumbing for use in integration tests. The
//! algorithms themselves live in `dtpkit-core`.
pub mod cli;
pub mod commands;
pub mod error;
