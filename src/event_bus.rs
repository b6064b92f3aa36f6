//! System bus signals the monitor reacts to, and the bar redraws they trigger.
//!
//! Dispatch is a closed table: a signal is first classified into a
//! `BusSignal`, and each `BusSignal` maps to exactly one `RedrawTarget`.
//! Anything that does not classify is ignored.

use crate::services::battery::DISPLAY_DEVICE_PATH;

/// Queue depth for each match-rule stream.
/// When the monitor falls behind, zbus drops the oldest queued signals.
pub const SIGNAL_QUEUE_CAPACITY: usize = 10;

pub const CONNMAN_SERVICE: &str = "net.connman";
pub const CONNMAN_MANAGER_PATH: &str = "/";
pub const CONNMAN_MANAGER_INTERFACE: &str = "net.connman.Manager";
pub const PROPERTY_CHANGED: &str = "PropertyChanged";
pub const STATE_PROPERTY: &str = "State";

pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";
pub const PROPERTIES_CHANGED: &str = "PropertiesChanged";

/// Recognized bus signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusSignal {
    /// connman `PropertyChanged("State", ..)` on the manager.
    NetworkStateChanged,
    /// UPower display device `PropertiesChanged`.
    DisplayDeviceChanged,
}

/// Bar blocks that can be asked to re-run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedrawTarget {
    Wifi,
    Battery,
}

impl BusSignal {
    /// Classify a signal by interface, member and object path.
    pub fn classify(interface: &str, member: &str, path: &str) -> Option<Self> {
        match (interface, member) {
            (CONNMAN_MANAGER_INTERFACE, PROPERTY_CHANGED) => Some(BusSignal::NetworkStateChanged),
            (PROPERTIES_INTERFACE, PROPERTIES_CHANGED) if path == DISPLAY_DEVICE_PATH => {
                Some(BusSignal::DisplayDeviceChanged)
            }
            _ => None,
        }
    }

    pub fn redraw_target(&self) -> RedrawTarget {
        match self {
            BusSignal::NetworkStateChanged => RedrawTarget::Wifi,
            BusSignal::DisplayDeviceChanged => RedrawTarget::Battery,
        }
    }
}

impl RedrawTarget {
    /// Offset from SIGRTMIN; matches `signal=N` in the i3blocks config.
    pub fn signal_number(&self) -> u8 {
        match self {
            RedrawTarget::Wifi => 1,
            RedrawTarget::Battery => 3,
        }
    }
}
