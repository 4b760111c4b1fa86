//! different utility modules used throughout the project
/// terminal and file logging set up from a level name
pub mod logger;
/// TOML settings of the demo binary
pub mod config;
