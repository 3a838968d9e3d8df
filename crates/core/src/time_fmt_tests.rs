// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    zero = { Some(0), "0:00" },
    negative = { Some(-5), "0:00" },
    under_a_minute = { Some(59), "0:59" },
    exact_minute = { Some(60), "1:00" },
    two_oh_five = { Some(125), "2:05" },
    long = { Some(3605), "60:05" },
    missing = { None, "0:00" },
)]
fn formats_seconds(secs: Option<i64>, expected: &str) {
    assert_eq!(format_countdown(secs), expected);
}

#[test]
fn minutes_are_not_padded() {
    assert_eq!(format_countdown(Some(540)), "9:00");
    assert_eq!(format_countdown(Some(600)), "10:00");
}
