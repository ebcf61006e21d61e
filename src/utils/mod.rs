//! Logging helpers.
pub mod devlog;
pub mod logger;
