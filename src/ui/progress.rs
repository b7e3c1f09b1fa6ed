//! Progress formatting helpers.

use std::time::Duration;

/// Format a duration for display next to a step.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1.0 {
        format!("{}ms", d.as_millis())
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = secs / 60.0;
        format!("{:.1}m", mins)
    }
}

/// Format a step counter such as `(2/6)`.
pub fn format_counter(current: usize, total: usize) -> String {
    format!("({}/{})", current, total)
}
