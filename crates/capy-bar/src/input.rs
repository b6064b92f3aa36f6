//! Click and context input handed to a block through the environment.
//!
//! i3blocks sets `BLOCK_BUTTON`, `BLOCK_X` and `BLOCK_Y` only when the block
//! was clicked. Parsing is best effort: a malformed integer becomes 0.

use log::debug;

pub const ENV_BLOCK_NAME: &str = "BLOCK_NAME";
pub const ENV_BLOCK_INSTANCE: &str = "BLOCK_INSTANCE";
pub const ENV_BLOCK_BUTTON: &str = "BLOCK_BUTTON";
pub const ENV_BLOCK_X: &str = "BLOCK_X";
pub const ENV_BLOCK_Y: &str = "BLOCK_Y";

/// Mouse button that triggered the invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    ScrollUp,
    ScrollDown,
    /// Any other code, including 0 for an unparsable value.
    Other(i32),
}

impl MouseButton {
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => MouseButton::Left,
            2 => MouseButton::Middle,
            3 => MouseButton::Right,
            4 => MouseButton::ScrollUp,
            5 => MouseButton::ScrollDown,
            other => MouseButton::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
            MouseButton::ScrollUp => 4,
            MouseButton::ScrollDown => 5,
            MouseButton::Other(code) => *code,
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, MouseButton::Left)
    }
}

/// Click coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Block input, read once at startup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Input {
    pub block_name: Option<String>,
    pub block_instance: Option<String>,
    pub mouse_button: Option<MouseButton>,
    pub mouse_location: Option<Point>,
}

impl Input {
    /// Read the `BLOCK_*` variables of the current process.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build input from any variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let mouse_button = get(ENV_BLOCK_BUTTON).map(|v| MouseButton::from_code(parse_int(&v)));

        let mouse_location = match (get(ENV_BLOCK_X), get(ENV_BLOCK_Y)) {
            (Some(x), Some(y)) => Some(Point {
                x: parse_int(&x),
                y: parse_int(&y),
            }),
            _ => None,
        };

        Self {
            block_name: get(ENV_BLOCK_NAME),
            block_instance: get(ENV_BLOCK_INSTANCE),
            mouse_button,
            mouse_location,
        }
    }

    /// True when the block was clicked.
    pub fn clicked(&self) -> bool {
        self.mouse_button.is_some()
    }
}

#[inline]
fn parse_int(value: &str) -> i32 {
    value.trim().parse().unwrap_or_else(|_| {
        debug!("Ignoring malformed integer {:?}", value);
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::env;
    use std::sync::Mutex;

    // Use a mutex to ensure tests that modify env vars don't race
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn input_from(vars: &[(&str, &str)]) -> Input {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Input::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_absent_variables_yield_absent_fields() {
        let input = input_from(&[]);
        assert_eq!(input, Input::default());
        assert!(!input.clicked());
    }

    #[test]
    fn test_empty_variables_count_as_absent() {
        let input = input_from(&[
            (ENV_BLOCK_NAME, ""),
            (ENV_BLOCK_BUTTON, ""),
            (ENV_BLOCK_X, ""),
            (ENV_BLOCK_Y, ""),
        ]);
        assert_eq!(input, Input::default());
    }

    #[test]
    fn test_full_click() {
        let input = input_from(&[
            (ENV_BLOCK_NAME, "battery"),
            (ENV_BLOCK_INSTANCE, "BAT0"),
            (ENV_BLOCK_BUTTON, "3"),
            (ENV_BLOCK_X, "1520"),
            (ENV_BLOCK_Y, "12"),
        ]);

        assert_eq!(input.block_name.as_deref(), Some("battery"));
        assert_eq!(input.block_instance.as_deref(), Some("BAT0"));
        assert_eq!(input.mouse_button, Some(MouseButton::Right));
        assert_eq!(input.mouse_location, Some(Point { x: 1520, y: 12 }));
        assert!(input.clicked());
    }

    #[test]
    fn test_malformed_integers_become_zero() {
        let input = input_from(&[
            (ENV_BLOCK_BUTTON, "left"),
            (ENV_BLOCK_X, "12px"),
            (ENV_BLOCK_Y, "7"),
        ]);

        assert_eq!(input.mouse_button, Some(MouseButton::Other(0)));
        assert_eq!(input.mouse_location, Some(Point { x: 0, y: 7 }));
    }

    #[test]
    fn test_location_needs_both_coordinates() {
        let input = input_from(&[(ENV_BLOCK_X, "10")]);
        assert_eq!(input.mouse_location, None);
    }

    #[test]
    fn test_button_codes() {
        for code in 1..=5 {
            let button = MouseButton::from_code(code);
            assert_eq!(button.code(), code);
            assert!(!matches!(button, MouseButton::Other(_)));
        }
        assert!(MouseButton::Left.is_primary());
        assert!(!MouseButton::ScrollDown.is_primary());
        assert!(!MouseButton::Other(0).is_primary());
    }

    #[test]
    fn test_from_env() {
        let _guard = ENV_LOCK.lock().unwrap();

        unsafe {
            env::set_var(ENV_BLOCK_NAME, "volume");
            env::set_var(ENV_BLOCK_BUTTON, "1");
            env::remove_var(ENV_BLOCK_INSTANCE);
            env::remove_var(ENV_BLOCK_X);
            env::remove_var(ENV_BLOCK_Y);
        }

        let input = Input::from_env();
        assert_eq!(input.block_name.as_deref(), Some("volume"));
        assert_eq!(input.block_instance, None);
        assert_eq!(input.mouse_button, Some(MouseButton::Left));

        unsafe {
            env::remove_var(ENV_BLOCK_NAME);
            env::remove_var(ENV_BLOCK_BUTTON);
        }
    }
}
