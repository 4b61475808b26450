//! Utility modules: developer decision log and logger configuration.
pub mod devlog;
pub mod logger;
