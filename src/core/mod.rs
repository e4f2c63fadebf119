//! Core functionality for the xsnoop proxy
//!
//! This module contains fundamental components like command line arguments,
//! resolved settings, and logging setup.

pub mod args;
pub mod logging;
pub mod settings;

// Re-export commonly used types from core modules
pub use args::CommandlineArgs;
pub use logging::init_logging;
pub use settings::Settings;
