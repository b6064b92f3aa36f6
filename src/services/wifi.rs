//! Wifi block.
//!
//! Shows the SSID from `iwgetid -s`. When that fails for any reason the
//! block renders empty with its separator hidden, so the segment collapses.

use crate::config::Config;
use crate::error::BlockError;
use crate::icons;
use crate::services::emit;
use capy_bar::Output;
use log::debug;
use std::path::Path;
use std::process::Command;

/// Run the wifi block.
pub fn run(config: &Config) -> Result<(), BlockError> {
    let ssid = match query_ssid(&config.iwgetid_path) {
        Ok(ssid) => Some(ssid),
        Err(e) => {
            debug!("No wireless network: {}", e);
            None
        }
    };

    emit(&render(ssid.as_deref()))
}

/// Current SSID. Start failure, read failure and non-zero exit are all errors.
pub fn query_ssid(iwgetid: &Path) -> Result<String, BlockError> {
    let output = Command::new(iwgetid)
        .arg("-s")
        .output()
        .map_err(|source| BlockError::Spawn {
            program: iwgetid.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(BlockError::Exit {
            program: iwgetid.display().to_string(),
            status: output.status,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub fn render(ssid: Option<&str>) -> Output {
    match ssid {
        Some(ssid) => {
            let text = format!("{} {}", icons::WLAN, ssid);
            Output {
                short_text: text.clone(),
                full_text: text,
                ..Default::default()
            }
        }
        None => Output::collapsed(),
    }
}
