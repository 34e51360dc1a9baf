//! Library side of the `rdg` command-line tool.

pub mod config;
pub mod generator;
pub mod logging;
pub mod workflow;
