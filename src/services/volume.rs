//! Volume block.
//!
//! Queries ALSA through `amixer -M sget` for the Master and Capture controls
//! and renders a speaker and a microphone glyph.

use crate::config::{Config, Palette};
use crate::error::BlockError;
use crate::icons;
use crate::services::emit;
use capy_bar::{Input, Output, more_info, span};
use log::{debug, warn};
use std::path::Path;
use std::process::Command;

pub const MASTER: &str = "Master";
pub const CAPTURE: &str = "Capture";

/// Channel layout of a mixer control.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Arity {
    #[default]
    Mono,
    Stereo,
}

/// Parsed state of one mixer control.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mixer {
    pub name: String,
    pub arity: Arity,
    /// Volume percentage as reported by amixer (`-M` mapped scale).
    pub volume: i32,
    pub muted: bool,
}

/// Run the volume block: notify on click, then print the status line.
pub fn run(input: &Input, config: &Config) -> Result<(), BlockError> {
    let master = query_mixer(&config.amixer_path, MASTER)?;
    let mic = query_mixer(&config.amixer_path, CAPTURE)?;

    if input.clicked() {
        let info = info_text(&master, &mic);
        if let Err(e) = more_info("Volume Info", &info, config.notify_timeout_ms) {
            warn!("Volume notification failed: {}", e);
        }
    }

    emit(&render(&master, &mic, &config.palette))
}

/// Run amixer for one control.
/// Failing to start amixer is an error; a non-zero exit keeps whatever was parsed.
pub fn query_mixer(amixer: &Path, name: &str) -> Result<Mixer, BlockError> {
    let output = Command::new(amixer)
        .args(["-M", "sget", name])
        .output()
        .map_err(|source| BlockError::Spawn {
            program: amixer.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        warn!("amixer {} exited with {}", name, output.status);
    }

    let mixer = parse_amixer(name, &String::from_utf8_lossy(&output.stdout));
    debug!("Mixer {}: {}% (muted: {})", mixer.name, mixer.volume, mixer.muted);
    Ok(mixer)
}

/// Parse `amixer sget` output.
///
/// The channels line decides which channel line is read: `Mono:` for mono
/// controls, `Front Left:` for stereo ones.
pub fn parse_amixer(name: &str, text: &str) -> Mixer {
    let mut mixer = Mixer {
        name: name.to_string(),
        ..Default::default()
    };

    for line in text.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("Playback channels:") || trimmed.starts_with("Capture channels:") {
            let layout = trimmed.split(':').nth(1).map(str::trim).unwrap_or_default();
            mixer.arity = if layout == "Mono" {
                Arity::Mono
            } else {
                Arity::Stereo
            };
        } else if (mixer.arity == Arity::Mono && trimmed.starts_with("Mono:"))
            || (mixer.arity == Arity::Stereo && trimmed.starts_with("Front Left:"))
        {
            parse_channel_line(trimmed, &mut mixer);
        }
    }

    mixer
}

/// `Front Left: Playback 40 [63%] [-20.00dB] [on]`
fn parse_channel_line(line: &str, mixer: &mut Mixer) {
    let parts: Vec<&str> = line.split('[').collect();
    if parts.len() < 2 {
        return;
    }

    let percent = parts[1].split(']').next().unwrap_or_default();
    mixer.volume = percent.trim_end_matches('%').trim().parse().unwrap_or(0);

    let switch = parts[parts.len() - 1].trim();
    mixer.muted = switch.strip_suffix(']').unwrap_or(switch) == "off";
}

// === Rendering ===

pub fn volume_icon(volume: i32) -> &'static str {
    match volume {
        i32::MIN..=33 => icons::VOLUME_OFF,
        34..=66 => icons::VOLUME_DOWN,
        _ => icons::VOLUME_UP,
    }
}

pub fn render(master: &Mixer, mic: &Mixer, palette: &Palette) -> Output {
    let master_color = if master.muted { &palette.degraded } else { &palette.normal };

    let (mic_icon, mic_color) = if mic.muted {
        (icons::MIC_OFF, &palette.degraded)
    } else {
        (icons::MIC_ON, &palette.normal)
    };

    Output::pango(format!(
        "{} {}",
        span(master_color, volume_icon(master.volume)),
        span(mic_color, mic_icon)
    ))
}

pub fn info_text(master: &Mixer, mic: &Mixer) -> String {
    let line = |label: &str, mixer: &Mixer| {
        let muted = if mixer.muted { ", muted" } else { "" };
        format!("{}: {}%{}\n", label, mixer.volume, muted)
    };

    format!("{}{}", line("Master", master), line("Microphone", mic))
}
