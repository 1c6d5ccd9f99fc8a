//! Command implementations for the CLI
//!
//! This module contains the implementation of all CLI commands:
//! - start: Start the estimate server
//! - quote: Estimate one trip from the command line
//! - reload: Reload configuration of a running server
//! - test: Test configuration validity
//! - config: Configuration display and validation

pub mod config;
pub mod quote;
pub mod reload;
pub mod start;
