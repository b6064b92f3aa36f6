use std::time::Duration;

/// Format a remaining-time duration as "H hours, M minutes".
/// Zero parts are dropped; seconds are truncated.
pub fn human_duration(duration: Duration) -> String {
    let total_minutes = duration.as_secs() / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    let mut out = String::new();

    if hours > 0 {
        out.push_str(&format!("{hours} hours"));
        if minutes > 0 {
            out.push_str(", ");
        }
    }

    match minutes {
        0 => {}
        1 => out.push_str("1 minute"),
        m => out.push_str(&format!("{m} minutes")),
    }

    out
}
