//! Watches the system bus and tells i3blocks which blocks to redraw.

use capyblocks::config::Config;
use capyblocks::services::monitor;
use log::{error, info};
use std::process::ExitCode;

fn main() -> ExitCode {
    capyblocks::init_logging();

    let config = Config::load_default();
    info!("Starting CapyBlocks monitor for {}...", config.bar_process);

    match monitor::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Monitor stopped: {}", e);
            ExitCode::FAILURE
        }
    }
}
