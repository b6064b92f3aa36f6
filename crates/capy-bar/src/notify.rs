//! "More info" popups shown when a block is clicked.

use crate::error::BarError;
use log::debug;
use std::process::Command;

const NOTIFY_BIN: &str = "notify-send";

/// Default popup lifetime in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u32 = 5000;

/// Show a normal-urgency desktop notification and wait for notify-send to exit.
pub fn more_info(title: &str, body: &str, timeout_ms: u32) -> Result<(), BarError> {
    debug!("Sending notification {:?}", title);

    let status = Command::new(NOTIFY_BIN)
        .args(notify_args(title, body, timeout_ms))
        .status()
        .map_err(|source| BarError::Spawn {
            program: NOTIFY_BIN.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(BarError::Exit {
            program: NOTIFY_BIN.to_string(),
            status,
        });
    }

    Ok(())
}

fn notify_args(title: &str, body: &str, timeout_ms: u32) -> Vec<String> {
    vec![
        "-u".to_string(),
        "normal".to_string(),
        "-t".to_string(),
        timeout_ms.to_string(),
        title.to_string(),
        body.to_string(),
    ]
}
