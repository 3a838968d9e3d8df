// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::time_fmt::format_countdown;

#[test]
fn tick_decrements_every_armed_countdown() {
    let mut board = CountdownBoard::new();
    board.arm(CountdownKey::job("M1"), 10);
    board.arm(CountdownKey::next_job("M1"), 20);
    board.arm(CountdownKey::job("M2"), 5);

    let ticked = board.tick();
    assert_eq!(ticked.len(), 3);
    assert_eq!(board.remaining(&CountdownKey::job("M1")), Some(9));
    assert_eq!(board.remaining(&CountdownKey::next_job("M1")), Some(19));
    assert_eq!(board.remaining(&CountdownKey::job("M2")), Some(4));
}

#[test]
fn timer_reset_law() {
    // Arm at V, let N ticks pass: display is format(V - N).
    let mut board = CountdownBoard::new();
    let key = CountdownKey::job("M1");
    board.arm(key.clone(), 125);
    for _ in 0..5 {
        board.tick();
    }
    assert_eq!(format_countdown(board.remaining(&key)), "2:00");

    // Re-arming resets regardless of prior elapsed ticks.
    board.arm(key.clone(), 125);
    assert_eq!(format_countdown(board.remaining(&key)), "2:05");
}

#[test]
fn countdown_free_runs_negative() {
    let mut board = CountdownBoard::new();
    let key = CountdownKey::job("M1");
    board.arm(key.clone(), 1);
    board.tick();
    board.tick();
    board.tick();
    assert_eq!(board.remaining(&key), Some(-2));
    // Display clamps even though the raw value is negative.
    assert_eq!(format_countdown(board.remaining(&key)), "0:00");
}

#[test]
fn cancel_machine_drops_both_kinds() {
    let mut board = CountdownBoard::new();
    board.arm(CountdownKey::job("M1"), 10);
    board.arm(CountdownKey::next_job("M1"), 10);
    board.arm(CountdownKey::job("M2"), 10);

    board.cancel_machine(&"M1".into());
    assert!(!board.is_armed(&CountdownKey::job("M1")));
    assert!(!board.is_armed(&CountdownKey::next_job("M1")));
    assert!(board.is_armed(&CountdownKey::job("M2")));
}

#[test]
fn clear_empties_the_board() {
    let mut board = CountdownBoard::new();
    board.arm(CountdownKey::job("M1"), 10);
    board.clear();
    assert!(board.is_empty());
    assert!(board.tick().is_empty());
}

#[test]
fn tick_returns_values_in_key_order() {
    let mut board = CountdownBoard::new();
    board.arm(CountdownKey::job("M2"), 8);
    board.arm(CountdownKey::job("M1"), 4);
    let keys: Vec<_> = board.tick().into_iter().map(|(k, _)| k.machine).collect();
    assert_eq!(keys, vec![MachineId::from("M1"), MachineId::from("M2")]);
}
