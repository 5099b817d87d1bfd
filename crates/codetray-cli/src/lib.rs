pub mod cli;
pub mod logging;

use clap::Parser;
use cli::Codetray;
use codetray_core::config::LOG_FILENAME;
use codetray_core::{get_config_dir, Storage};
use codetray_ui::run_sidebar;
use std::process;
use tracing::{error, info};

/// Run the codetray sidebar
pub fn run_main() {
    let _args = Codetray::parse();

    let guard = logging::init_logging(&get_config_dir(), LOG_FILENAME);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting codetray");

    let result = run_sidebar(Storage::default_location());
    if let Err(e) = result {
        error!(error = %e, "Sidebar terminated");
        // Flush the log before exiting
        drop(guard);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
