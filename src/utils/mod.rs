// Utility functions module
pub mod config;
pub mod emojis;
pub mod formatters;
