//! i3blocks volume block.

use capy_bar::Input;
use capyblocks::config::Config;
use capyblocks::services::volume;
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    capyblocks::init_logging();

    let input = Input::from_env();
    let config = Config::load_default();

    match volume::run(&input, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Volume block failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
