//! CLI subcommand implementations.

pub mod analyze;
pub mod compare;
pub mod devices;
pub mod generate;
pub mod record;
