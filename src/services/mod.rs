//! CapyBlocks services.
//!
//! Each block producer queries one data source, prints exactly one status
//! line and exits. The monitor is the only long-running service.
//!
//! - `battery` - UPower battery status via D-Bus
//! - `volume` - ALSA master/capture volume via amixer
//! - `wifi` - Current SSID via iwgetid
//! - `monitor` - D-Bus signals to i3blocks redraw signals

pub mod battery;
pub mod monitor;
pub mod volume;
pub mod wifi;

use crate::error::BlockError;
use capy_bar::Output;

/// Print one status line on stdout.
/// Nothing is written when encoding fails.
pub fn emit(output: &Output) -> Result<(), BlockError> {
    let line = output.to_json()?;
    println!("{}", line);
    Ok(())
}
