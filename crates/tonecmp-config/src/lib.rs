//! Configuration for the tonecmp comparison loop.
//!
//! A single TOML file drives a comparison run: global capture length,
//! sample rate, and the target frequency pair, plus the list of tone
//! sources (synthesized, file-backed, or live device) the operator steps
//! through. The core crates never touch files or the environment — this
//! crate turns the on-disk description into their constructor
//! parameters.

mod config;
mod error;

pub use config::{Config, FilterConfig, SourceConfig};
pub use error::ConfigError;
