//! Subcommand implementations.

pub mod extract;
