// Flightmarks shared type definitions
// Each submodule defines types used across the crate.

pub mod config;
pub mod errors;
pub mod history;
pub mod search;
pub mod settings;
