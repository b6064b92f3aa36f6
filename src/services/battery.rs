//! Battery block.
//!
//! Reads UPower over the system bus: the `OnBattery` flag and the display
//! device (UPower's aggregate of every battery). A click pops up a detail
//! report; any non-primary click also lists each physical battery.

use crate::config::{Config, Palette};
use crate::error::BlockError;
use crate::functions::formatting::human_duration;
use crate::icons;
use crate::services::emit;
use capy_bar::{Input, Output, more_info, span};
use log::{debug, info, warn};
use std::fmt;
use std::time::Duration;
use zbus::Connection;
use zbus::zvariant::OwnedObjectPath;

pub const UPOWER_SERVICE: &str = "org.freedesktop.UPower";
pub const UPOWER_PATH: &str = "/org/freedesktop/UPower";
pub const DISPLAY_DEVICE_PATH: &str = "/org/freedesktop/UPower/devices/DisplayDevice";

/// Native id of the hot-swappable battery slot.
const REMOVABLE_BATTERY_ID: &str = "BAT1";

#[zbus::proxy(
    interface = "org.freedesktop.UPower",
    default_service = "org.freedesktop.UPower",
    default_path = "/org/freedesktop/UPower"
)]
trait UPower {
    fn enumerate_devices(&self) -> zbus::Result<Vec<OwnedObjectPath>>;

    #[zbus(property)]
    fn on_battery(&self) -> zbus::Result<bool>;
}

#[zbus::proxy(
    interface = "org.freedesktop.UPower.Device",
    default_service = "org.freedesktop.UPower"
)]
trait Device {
    #[zbus(property)]
    fn native_path(&self) -> zbus::Result<String>;

    #[zbus(property, name = "Type")]
    fn device_type(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn state(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn is_present(&self) -> zbus::Result<bool>;

    #[zbus(property)]
    fn percentage(&self) -> zbus::Result<f64>;

    #[zbus(property)]
    fn warning_level(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn time_to_empty(&self) -> zbus::Result<i64>;

    #[zbus(property)]
    fn time_to_full(&self) -> zbus::Result<i64>;
}

/// UPower device type. Only batteries matter here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceType {
    #[default]
    Unknown,
    LinePower,
    Battery,
    Ups,
    Monitor,
    Mouse,
    Keyboard,
    Pda,
    Phone,
    MediaPlayer,
    Tablet,
    Computer,
}

impl DeviceType {
    pub fn from_u32(value: u32) -> Self {
        match value {
            1 => DeviceType::LinePower,
            2 => DeviceType::Battery,
            3 => DeviceType::Ups,
            4 => DeviceType::Monitor,
            5 => DeviceType::Mouse,
            6 => DeviceType::Keyboard,
            7 => DeviceType::Pda,
            8 => DeviceType::Phone,
            9 => DeviceType::MediaPlayer,
            10 => DeviceType::Tablet,
            11 => DeviceType::Computer,
            _ => DeviceType::Unknown,
        }
    }
}

/// UPower charge state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeviceState {
    #[default]
    Unknown,
    Charging,
    Discharging,
    Empty,
    FullyCharged,
    PendingCharge,
    PendingDischarge,
}

impl DeviceState {
    pub fn from_u32(value: u32) -> Self {
        match value {
            1 => DeviceState::Charging,
            2 => DeviceState::Discharging,
            3 => DeviceState::Empty,
            4 => DeviceState::FullyCharged,
            5 => DeviceState::PendingCharge,
            6 => DeviceState::PendingDischarge,
            _ => DeviceState::Unknown,
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceState::Unknown => "Unknown",
            DeviceState::Charging => "Charging",
            DeviceState::Discharging => "Discharging",
            DeviceState::Empty => "Empty",
            DeviceState::FullyCharged => "Full",
            DeviceState::PendingCharge => "Pending Charge",
            DeviceState::PendingDischarge => "Pending Discharge",
        };
        f.write_str(name)
    }
}

/// UPower warning level, independent of the raw percentage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WarningLevel {
    #[default]
    Unknown,
    None,
    Discharging,
    Low,
    Critical,
    Action,
}

impl WarningLevel {
    pub fn from_u32(value: u32) -> Self {
        match value {
            1 => WarningLevel::None,
            2 => WarningLevel::Discharging,
            3 => WarningLevel::Low,
            4 => WarningLevel::Critical,
            5 => WarningLevel::Action,
            _ => WarningLevel::Unknown,
        }
    }
}

/// Snapshot of one UPower device.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatteryDevice {
    /// Native id, e.g. "BAT0". Empty for the display device.
    pub id: String,
    pub state: DeviceState,
    pub is_present: bool,
    pub percentage: i32,
    pub warning: WarningLevel,
    pub time_to_empty: Option<Duration>,
    pub time_to_full: Option<Duration>,
}

impl BatteryDevice {
    /// Placeholder for a battery slot with nothing in it.
    pub fn absent(id: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PowerStatus {
    pub on_battery: bool,
    pub display: BatteryDevice,
}

/// Run the battery block: print the status line, then notify on click.
pub fn run(input: &Input, config: &Config) -> Result<(), BlockError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(show(input, config))
}

async fn show(input: &Input, config: &Config) -> Result<(), BlockError> {
    let connection = match Connection::system().await {
        Ok(connection) => Some(connection),
        Err(e) => {
            warn!("Failed to connect to system bus: {}", e);
            None
        }
    };

    let status = match &connection {
        Some(connection) => fetch_status(connection).await,
        None => PowerStatus::default(),
    };

    emit(&render(&status, &config.palette))?;

    let Some(button) = input.mouse_button else {
        return Ok(());
    };

    let batteries = if button.is_primary() {
        None
    } else {
        Some(match &connection {
            Some(connection) => fetch_batteries(connection).await,
            None => Vec::new(),
        })
    };

    let report = info_report(&status.display, batteries.as_deref(), &config.palette);
    if let Err(e) = more_info("Battery Info", &report, config.notify_timeout_ms) {
        warn!("Battery notification failed: {}", e);
    }

    Ok(())
}

// === Rendering ===

/// Build the status line from a power snapshot.
pub fn render(status: &PowerStatus, palette: &Palette) -> Output {
    let display = &status.display;
    let mut parts = Vec::with_capacity(2);

    if !status.on_battery {
        let ac_color = if display.state == DeviceState::Charging {
            &palette.good
        } else {
            &palette.normal
        };
        parts.push(span(ac_color, icons::AC));
    }

    parts.push(span(
        battery_color(display.state, display.warning, palette),
        battery_icon(display.percentage),
    ));

    Output::pango(parts.join(" "))
}

/// Map percentage to one of five battery glyphs.
pub fn battery_icon(percentage: i32) -> &'static str {
    match percentage {
        i32::MIN..=13 => icons::BATTERY_EMPTY,
        14..=38 => icons::BATTERY_ONE_QUARTER,
        39..=63 => icons::BATTERY_HALF,
        64..=88 => icons::BATTERY_THREE_QUARTERS,
        _ => icons::BATTERY_FULL,
    }
}

/// Glyph color: warning level first, a full battery always shows good.
pub fn battery_color<'a>(
    state: DeviceState,
    warning: WarningLevel,
    palette: &'a Palette,
) -> &'a str {
    if state == DeviceState::FullyCharged {
        return &palette.good;
    }

    match warning {
        WarningLevel::Low => &palette.degraded,
        WarningLevel::Critical => &palette.bad,
        _ => &palette.normal,
    }
}

/// Human-readable battery name for a native id.
pub fn battery_name(id: &str) -> &str {
    match id {
        "BAT0" => "Internal Battery",
        REMOVABLE_BATTERY_ID => "Removable Battery",
        "" => "Total",
        other => other,
    }
}

/// Multi-line report for one device, terminated by a blank line.
pub fn device_report(device: &BatteryDevice, palette: &Palette) -> String {
    let name = battery_name(&device.id);

    if !device.is_present {
        let title_icon = format!("{} ", icons::BATTERY_ABSENT);
        return format!("{}<i>{}</i>\n", span(&palette.degraded, &title_icon), name);
    }

    let mut lines = Vec::with_capacity(5);
    lines.push(format!("{}<i>{}</i>", span(&palette.info_normal, ""), name));

    let state_color = match device.warning {
        WarningLevel::Critical => &palette.bad,
        WarningLevel::Low => &palette.degraded,
        _ => &palette.info_normal,
    };
    lines.push(format!("State: {}", span(state_color, &device.state.to_string())));
    lines.push(format!("Capacity: {}%", device.percentage));

    if let Some(time) = device.time_to_full {
        lines.push(format!("Time until full: {}", human_duration(time)));
    } else if let Some(time) = device.time_to_empty {
        lines.push(format!("Time until empty: {}", human_duration(time)));
    }

    lines.push(String::new());
    lines.join("\n")
}

/// Full notification body: the display device, plus every battery when listed.
/// A missing removable battery is reported as absent.
pub fn info_report(
    display: &BatteryDevice,
    batteries: Option<&[BatteryDevice]>,
    palette: &Palette,
) -> String {
    let mut report = device_report(display, palette);
    report.push('\n');

    let Some(batteries) = batteries else {
        return report;
    };

    for battery in batteries {
        report.push_str(&device_report(battery, palette));
        report.push('\n');
    }

    if !batteries.iter().any(|b| b.id == REMOVABLE_BATTERY_ID) {
        report.push_str(&device_report(&BatteryDevice::absent(REMOVABLE_BATTERY_ID), palette));
        report.push('\n');
    }

    report
}

// === D-Bus queries ===

/// Failed reads fall back to the zero value.
fn or_default<T: Default>(property: &str, result: zbus::Result<T>) -> T {
    result.unwrap_or_else(|e| {
        debug!("Failed to read {}: {}", property, e);
        T::default()
    })
}

fn seconds(value: i64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value as u64))
}

async fn fetch_status(connection: &Connection) -> PowerStatus {
    let on_battery = match UPowerProxy::new(connection).await {
        Ok(upower) => or_default("OnBattery", upower.on_battery().await),
        Err(e) => {
            warn!("Failed to reach UPower: {}", e);
            false
        }
    };

    PowerStatus {
        on_battery,
        display: fetch_device(connection, DISPLAY_DEVICE_PATH).await,
    }
}

async fn device_proxy<'a>(connection: &Connection, path: &'a str) -> zbus::Result<DeviceProxy<'a>> {
    DeviceProxy::builder(connection).path(path)?.build().await
}

async fn fetch_device(connection: &Connection, path: &str) -> BatteryDevice {
    let device = match device_proxy(connection, path).await {
        Ok(device) => device,
        Err(e) => {
            warn!("Failed to open UPower device {}: {}", path, e);
            return BatteryDevice::default();
        }
    };

    BatteryDevice {
        id: or_default("NativePath", device.native_path().await),
        state: DeviceState::from_u32(or_default("State", device.state().await)),
        is_present: or_default("IsPresent", device.is_present().await),
        percentage: or_default("Percentage", device.percentage().await) as i32,
        warning: WarningLevel::from_u32(or_default("WarningLevel", device.warning_level().await)),
        time_to_empty: seconds(or_default("TimeToEmpty", device.time_to_empty().await)),
        time_to_full: seconds(or_default("TimeToFull", device.time_to_full().await)),
    }
}

/// Every battery-class device UPower knows about.
async fn fetch_batteries(connection: &Connection) -> Vec<BatteryDevice> {
    let paths = match UPowerProxy::new(connection).await {
        Ok(upower) => or_default("EnumerateDevices", upower.enumerate_devices().await),
        Err(e) => {
            warn!("Failed to reach UPower: {}", e);
            return Vec::new();
        }
    };

    let mut batteries = Vec::new();
    for path in &paths {
        let device_type = match device_proxy(connection, path.as_str()).await {
            Ok(device) => DeviceType::from_u32(or_default("Type", device.device_type().await)),
            Err(e) => {
                debug!("Skipping {}: {}", path.as_str(), e);
                continue;
            }
        };

        if device_type == DeviceType::Battery {
            batteries.push(fetch_device(connection, path.as_str()).await);
        }
    }

    info!("Found {} batteries", batteries.len());
    batteries
}
