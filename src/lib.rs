// This lib.rs file exposes modules for testing purposes

pub mod cli;
pub mod command_processing;
pub mod config;
pub mod core;
pub mod errors;
pub mod review_engine;
pub mod server;
