//! Catalog service entry point
//!
//! Parses CLI arguments, dispatches, and on failure logs a FATAL line to
//! stderr and exits non-zero. All logic lives in the `cli` module.

use catalog_service::cli;
use catalog_service::observability::Logger;

fn main() {
    if let Err(e) = cli::run() {
        Logger::fatal(
            "STARTUP_FAILED",
            &[("code", e.code().code()), ("message", e.message())],
        );
        std::process::exit(1);
    }
}
