//! Roulette: European roulette table service.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod engine;
pub mod api;
pub mod server;
pub mod http;
pub mod rpc;
