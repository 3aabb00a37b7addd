//! Core constants, configuration, and error types.

mod config;
pub mod constants;
mod error;

pub use config::{DecoderConfig, DecoderConfigBuilder};
pub use constants::*;
pub use error::{ConfigError, DownloadError};
