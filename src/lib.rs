//! fitdex library
//!
//! Exercise catalog with a 24-hour detail cache, related videos and a fitness
//! chat assistant. The binary wires these modules into a terminal UI.

pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod detail;
pub mod error;
pub mod logging;
pub mod ui;
pub mod worker;
