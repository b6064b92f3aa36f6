//! i3blocks wifi block.

use capyblocks::config::Config;
use capyblocks::services::wifi;
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    capyblocks::init_logging();

    match wifi::run(&Config::load_default()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Wifi block failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
