// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use fv_core::alert::Alert;
use fv_core::countdown::{CountdownKey, CountdownKind};
use fv_core::logs::ProductionLog;
use fv_core::machine::Machine;
use fv_core::time_fmt::format_countdown;
use fv_client::render::RenderSink;
use fv_engine::effect::CardOp;
use std::io::Write;
use std::path::Path;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One machine card as a line of text.
pub fn card_line(location: &str, machine: &Machine) -> String {
    let mut line = format!(
        "[{}] {} ({}) {}",
        location,
        machine.name,
        machine.id,
        crate::color::status(&machine.status)
    );
    if let Some(job) = &machine.job {
        line.push_str(&format!(
            "  {} {}/{} ({:.0}%) eta {}",
            job.work_order,
            job.completed_qty,
            job.total_qty,
            job.progress_percent,
            format_countdown(job.remaining_time)
        ));
    }
    if let Some(next) = &machine.next_job {
        line.push_str(&format!("  next: {} in {}", next.work_order, format_countdown(next.remaining_time)));
    }
    line
}

pub fn log_line(log: &ProductionLog) -> String {
    format!(
        "{}  {}  {}  qty {}  {}",
        log.timestamp,
        log.machine_id,
        log.work_order.as_deref().unwrap_or("-"),
        log.produced_qty,
        log.pipe_size.as_deref().unwrap_or("-"),
    )
}

/// Print the log feed in the requested format.
pub fn print_logs(logs: &[ProductionLog], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            if logs.is_empty() {
                println!("No production logs");
            }
            for log in logs {
                println!("{}", log_line(log));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(logs)?);
        }
    }
    Ok(())
}

/// Write the log feed as CSV.
pub fn write_logs_csv(path: &Path, logs: &[ProductionLog]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    writeln!(file, "timestamp,machine_id,work_order,pipe_size,produced_qty")?;
    for log in logs {
        writeln!(
            file,
            "{},{},{},{},{}",
            csv_field(&log.timestamp),
            csv_field(&log.machine_id),
            csv_field(log.work_order.as_deref().unwrap_or("")),
            csv_field(log.pipe_size.as_deref().unwrap_or("")),
            log.produced_qty,
        )?;
    }
    Ok(())
}

/// Quote a CSV field when it contains a comma, quote, or newline.
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders loop output as lines on stdout.
#[derive(Default)]
pub struct TerminalSink;

impl RenderSink for TerminalSink {
    fn apply_cards(&mut self, ops: &[CardOp]) {
        for op in ops {
            match op {
                CardOp::Create { location, machine } => {
                    println!("+ {}", card_line(location, machine));
                }
                CardOp::Update { location, machine } => {
                    println!("~ {}", card_line(location, machine));
                }
                CardOp::Remove { machine } => println!("- {}", machine),
            }
        }
    }

    fn countdown(&mut self, key: &CountdownKey, display: &str) {
        let label = match key.kind {
            CountdownKind::Job => "eta",
            CountdownKind::NextJob => "next",
        };
        println!("  {} {} {}", key.machine, label, display);
    }

    fn alerts(&mut self, alerts: &[Alert]) {
        if let Some(alert) = alerts.first() {
            println!("! {}", crate::color::severity(alert.severity, &alert.message));
        }
    }

    fn logs(&mut self, logs: &[ProductionLog]) {
        println!("{}", crate::color::header("recent production"));
        for log in logs {
            println!("  {}", log_line(log));
        }
    }
}
