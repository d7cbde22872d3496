//! Error handling utilities

use tracing::error;

/// Handle fatal errors and exit with appropriate status code
///
/// Configuration errors exit with 2, everything else with 1. With
/// `verbose >= 1` the full cause chain is printed.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    use crate::error::Error;

    error!("Fatal error: {}", error);
    eprintln!("Error: {error}");

    if verbose >= 1 {
        eprintln!("\nError chain:");
        for (i, cause) in error.chain().enumerate() {
            eprintln!("  {}: {}", i, cause);
        }
    }

    let exit_code = error
        .downcast_ref::<Error>()
        .map(Error::exit_code)
        .unwrap_or(1);

    std::process::exit(exit_code)
}
