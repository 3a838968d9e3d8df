// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use fv_core::alert::Severity;
use fv_core::machine::MachineStatus;
use std::io::IsTerminal;

pub mod codes {
    /// Section headers: pastel cyan / steel blue
    pub const HEADER: u8 = 74;
    /// Commands and literals: light grey
    pub const LITERAL: u8 = 250;
    /// Descriptions and context: medium grey
    pub const CONTEXT: u8 = 245;
    /// Running machines and success alerts
    pub const GOOD: u8 = 114;
    /// Warnings
    pub const WARN: u8 = 214;
    /// Danger alerts and stopped machines
    pub const BAD: u8 = 203;
}

/// Determine if color output should be enabled.
///
/// Priority: `NO_COLOR=1` disables → `COLOR=1` forces → TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

/// Build clap `Styles` using the project palette.
pub fn styles() -> Styles {
    if !should_colorize() {
        return Styles::plain();
    }
    Styles::styled()
        .header(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::HEADER)))))
        .literal(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::LITERAL)))))
        .placeholder(Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(codes::CONTEXT)))))
}

fn fg256(code: u8) -> String {
    format!("\x1b[38;5;{code}m")
}

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("{}{}\x1b[0m", fg256(code), text)
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn status(status: &MachineStatus) -> String {
    let code = match status {
        MachineStatus::Running => codes::GOOD,
        MachineStatus::Paused => codes::WARN,
        MachineStatus::Stopped => codes::BAD,
        MachineStatus::Idle | MachineStatus::Unknown(_) => codes::CONTEXT,
    };
    paint(code, status.as_str())
}

pub fn severity(severity: Severity, text: &str) -> String {
    let code = match severity {
        Severity::Info => codes::CONTEXT,
        Severity::Warning => codes::WARN,
        Severity::Danger => codes::BAD,
        Severity::Success => codes::GOOD,
    };
    paint(code, text)
}
