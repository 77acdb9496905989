//! SpendSense: budget tracking and spending reports over a local SQLite store.

pub mod cli;
pub mod config;
pub mod db;
pub mod engine;
pub mod export;
pub mod logging;
pub mod models;
pub mod store;
pub mod watch;
