//! Format-string rendering
//!
//! Tokens are resolved in a fixed order. A unit whose token is absent is
//! folded into the next smaller unit, so `"ss"` for one minute reads `"60"`.
//!
//! | Token | Unit                         | Width |
//! |-------|------------------------------|-------|
//! | `DD`  | days                         | 2     |
//! | `HH`  | hours (+ folded days)        | 2     |
//! | `mm`  | minutes (+ folded hours)     | 2     |
//! | `ss`  | seconds (+ folded minutes)   | 2     |
//! | `SSS` | milliseconds, 3 digits       | 3     |
//! | `SS`  | milliseconds, first 2 digits | 2     |
//! | `S`   | milliseconds, first digit    | 1     |
//!
//! Only the first occurrence of each token is replaced; anything else passes
//! through untouched.

use super::TimeData;

/// Render `data` into `format`
pub fn render(format: &str, data: &TimeData) -> String {
    let TimeData {
        days,
        mut hours,
        mut minutes,
        mut seconds,
        mut milliseconds,
    } = *data;
    let mut out = format.to_string();

    if out.contains("DD") {
        out = out.replacen("DD", &pad_zero(days, 2), 1);
    } else {
        hours += days * 24;
    }

    if out.contains("HH") {
        out = out.replacen("HH", &pad_zero(hours, 2), 1);
    } else {
        minutes += hours * 60;
    }

    if out.contains("mm") {
        out = out.replacen("mm", &pad_zero(minutes, 2), 1);
    } else {
        seconds += minutes * 60;
    }

    if out.contains("ss") {
        out = out.replacen("ss", &pad_zero(seconds, 2), 1);
    } else {
        milliseconds += seconds * 1000;
    }

    if out.contains('S') {
        // Always at least 3 ASCII digits, so the slices below are in bounds
        let ms = pad_zero(milliseconds, 3);
        out = if out.contains("SSS") {
            out.replacen("SSS", &ms, 1)
        } else if out.contains("SS") {
            out.replacen("SS", &ms[..2], 1)
        } else {
            out.replacen('S', &ms[..1], 1)
        };
    }

    out
}

/// Left-pad with zeros to `width`. Wider values are kept whole.
fn pad_zero(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}
