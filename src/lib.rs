//! CapyBlocks - i3blocks status blocks and redraw monitor
//!
//! Block producers (`capy-battery`, `capy-volume`, `capy-wifi`) print one
//! i3blocks JSON line per invocation. `capy-monitor` watches the system bus
//! and signals i3blocks to re-run blocks when power or network state changes.

pub mod config;
pub mod error;
pub mod event_bus;
pub mod functions;
pub mod icons;
pub mod services;

/// Initialise stderr logging. stdout is reserved for the bar protocol.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();
}
