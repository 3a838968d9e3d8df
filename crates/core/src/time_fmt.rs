// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Countdown display formatting.

/// Format a seconds-remaining value as `m:ss`.
///
/// `None` and negative values both display as `"0:00"` — armed countdowns
/// free-run below zero rather than clamping (see
/// [`CountdownBoard`](crate::countdown::CountdownBoard)), so the clamp
/// happens here at display time. Minutes are unpadded, seconds are
/// zero-padded to two digits.
pub fn format_countdown(secs: Option<i64>) -> String {
    match secs {
        Some(s) if s >= 0 => format!("{}:{:02}", s / 60, s % 60),
        _ => "0:00".to_string(),
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
