// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! `floorview` — terminal client for the factory dashboard.

mod color;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fv_client::protocol::MachineAction;
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "floorview", version, about = "Live factory floor dashboard", styles = color::styles())]
struct Cli {
    /// Config file (default: ~/.config/floorview/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and save the session
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Drop the saved session
    Logout,
    /// Follow the live dashboard
    Watch {
        /// Show one location only
        #[arg(long)]
        location: Option<String>,
        /// Show machines with this status only
        #[arg(long)]
        status: Option<String>,
        /// Match machine name or work order, case-insensitive
        #[arg(long)]
        search: Option<String>,
    },
    /// Start a job on a machine
    Start { location: String, machine_id: String },
    /// Pause the running job
    Pause { location: String, machine_id: String },
    /// Stop the running job
    Stop { location: String, machine_id: String },
    /// Rename a machine (admin)
    Rename { location: String, machine_id: String, new_name: String },
    /// Print the recent production log feed
    Logs {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Also write the feed as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(fv_client::Config::default_path);
    let config = fv_client::Config::load_or_default(&config_path)?;

    match cli.command {
        Command::Login { username, password } => {
            commands::login::handle(&config, &username, password)
        }
        Command::Logout => commands::logout::handle(&config),
        Command::Watch { location, status, search } => {
            commands::watch::handle(&config, location, status, search).await
        }
        Command::Start { location, machine_id } => {
            commands::machine::action(&config, MachineAction::Start, &location, &machine_id).await
        }
        Command::Pause { location, machine_id } => {
            commands::machine::action(&config, MachineAction::Pause, &location, &machine_id).await
        }
        Command::Stop { location, machine_id } => {
            commands::machine::action(&config, MachineAction::Stop, &location, &machine_id).await
        }
        Command::Rename { location, machine_id, new_name } => {
            commands::machine::rename(&config, &location, &machine_id, &new_name).await
        }
        Command::Logs { format, csv } => commands::logs::handle(&config, format, csv).await,
    }
}
