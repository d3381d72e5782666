pub mod chain;
pub mod client;
pub mod config;
pub mod connection;
pub mod contracts;
pub mod error;
pub mod events;
pub mod server;
pub mod tools;
pub mod units;
pub mod upload;
