//! Block output record for the i3blocks JSON protocol.
//!
//! Every optional field is skipped when unset, so the encoded line never
//! carries `null` literals. Markup text (`<span foreground='..'>`) is written
//! verbatim: serde_json only escapes quotes, backslashes and control
//! characters, never `<`, `>` or `&`.

use crate::error::BarError;
use serde::{Deserialize, Serialize};

/// Text alignment inside `min_width`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Whether `full_text` contains pango markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    Pango,
    None,
}

/// One status line, printed once per block invocation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Output {
    pub full_text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub short_text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<Alignment>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separator_block_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markup: Option<Markup>,
}

impl Output {
    /// Pango-marked output with identical full and short text.
    pub fn pango(text: impl Into<String>) -> Self {
        let full_text = text.into();
        Self {
            short_text: full_text.clone(),
            full_text,
            markup: Some(Markup::Pango),
            ..Default::default()
        }
    }

    /// Empty output that also hides the separator, so the segment takes no room.
    pub fn collapsed() -> Self {
        Self {
            separator: Some(false),
            separator_block_width: Some(0),
            ..Default::default()
        }
    }

    /// Encode as a single protocol line (no trailing newline).
    pub fn to_json(&self) -> Result<String, BarError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Wrap `text` in a pango span with the given foreground color.
pub fn span(color: &str, text: &str) -> String {
    format!("<span foreground='{}'>{}</span>", color, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_markup_is_not_escaped() {
        let out = Output::pango("<span foreground='#586e75'>a & b</span> <i>x</i>");
        let json = out.to_json().unwrap();

        assert!(json.contains("<span foreground='#586e75'>a & b</span>"));
        assert!(!json.contains("\\u003c"));
        assert!(!json.contains("\\u003e"));
        assert!(!json.contains("\\u0026"));
    }

    #[test]
    fn test_markup_decodes_to_identical_text() {
        let text = "<b>1 < 2 && 3 > 2</b>";
        let json = Output::pango(text).to_json().unwrap();
        let decoded: Output = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded.full_text, text);
        assert_eq!(decoded.short_text, text);
    }

    #[test]
    fn test_unset_fields_are_omitted() {
        let out = Output {
            full_text: "hello".to_string(),
            ..Default::default()
        };
        assert_eq!(out.to_json().unwrap(), r#"{"full_text":"hello"}"#);
    }

    #[test]
    fn test_explicit_false_and_zero_are_kept() {
        let json = Output::collapsed().to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["full_text"], "");
        assert_eq!(value["separator"], false);
        assert_eq!(value["separator_block_width"], 0);
        assert!(value.get("short_text").is_none());
        assert!(value.get("markup").is_none());
    }

    #[test]
    fn test_all_fields_encoded() {
        let out = Output {
            full_text: "full".to_string(),
            short_text: "short".to_string(),
            color: "#ffffff".to_string(),
            min_width: Some(40),
            align: Some(Alignment::Center),
            name: "battery".to_string(),
            instance: "BAT0".to_string(),
            urgent: Some(true),
            separator: Some(true),
            separator_block_width: Some(9),
            markup: Some(Markup::None),
        };
        let value: Value = serde_json::from_str(&out.to_json().unwrap()).unwrap();

        assert_eq!(value["align"], "center");
        assert_eq!(value["markup"], "none");
        assert_eq!(value["min_width"], 40);
        assert_eq!(value["urgent"], true);
        assert_eq!(value["instance"], "BAT0");
        assert_eq!(value.as_object().unwrap().len(), 11);
    }

    #[test]
    fn test_span() {
        assert_eq!(span("#859900", "x"), "<span foreground='#859900'>x</span>");
    }
}
