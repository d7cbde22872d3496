//! Application module
//!
//! Command-line settings, logging setup and fatal error reporting for the
//! `autopylot` binary.

pub mod config;
pub mod error_handling;
pub mod logging;

pub use config::AppConfig;
pub use error_handling::handle_fatal_error;
pub use logging::init_logging;
