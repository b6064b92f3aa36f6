//! i3blocks battery block.

use capy_bar::Input;
use capyblocks::config::Config;
use capyblocks::services::battery;
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    capyblocks::init_logging();

    let input = Input::from_env();
    let config = Config::load_default();

    match battery::run(&input, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Battery block failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
