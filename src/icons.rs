//! Font Awesome glyphs used by the blocks.

pub const AC: &str = "\u{f1e6}";
pub const BATTERY_ABSENT: &str = "\u{f00d}";
pub const BATTERY_EMPTY: &str = "\u{f244}";
pub const BATTERY_ONE_QUARTER: &str = "\u{f243}";
pub const BATTERY_HALF: &str = "\u{f242}";
pub const BATTERY_THREE_QUARTERS: &str = "\u{f241}";
pub const BATTERY_FULL: &str = "\u{f240}";

pub const VOLUME_OFF: &str = "\u{f026}";
pub const VOLUME_DOWN: &str = "\u{f027}";
pub const VOLUME_UP: &str = "\u{f028}";
pub const MIC_OFF: &str = "\u{f131}";
pub const MIC_ON: &str = "\u{f130}";

pub const WLAN: &str = "\u{f1eb}";
