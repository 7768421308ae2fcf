//! Terminal reporting for the offline subcommands.

pub mod format;

pub use format::*;
