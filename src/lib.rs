//! `rlc-poles` library crate.
//!
//! The binary (`poles`) is a thin wrapper around this library so that:
//!
//! - estimators, prediction and HTTP handlers are testable without spawning processes
//! - the same prediction path backs the server and the offline subcommands
//! - the HTTP client can be reused by other services

pub mod app;
pub mod cli;
pub mod client;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod predict;
pub mod report;
pub mod server;
