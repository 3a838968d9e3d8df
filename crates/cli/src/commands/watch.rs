// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Watch command: follow the live dashboard.
//!
//! Runs the client event loop against the configured server and accepts
//! line commands on stdin while it renders. Ctrl-C or `quit` ends it.

use crate::output::TerminalSink;
use anyhow::Result;
use fv_client::protocol::MachineAction;
use fv_client::runloop::{run, UiCommand};
use fv_client::{spawn_channel, Config, DashboardApi, WireApi};
use fv_engine::projector::Filters;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;

pub async fn handle(
    config: &Config,
    location: Option<String>,
    status: Option<String>,
    search: Option<String>,
) -> Result<()> {
    let session = super::require_session(config)?;
    println!("Watching as {} ({}). Type `help` for commands.", session.username, session.role);

    let cancel = CancellationToken::new();
    let (push_tx, push_rx) = mpsc::channel(32);
    let channel_task =
        spawn_channel(config.server.push_url.clone(), push_tx, cancel.child_token());

    let api: Arc<dyn DashboardApi> = Arc::new(WireApi::new(config.server.addr.clone()));
    let handle = run(api, push_rx, session, TerminalSink, cancel.clone());

    let filters = Filters {
        location,
        status: status.map(Into::into),
        search,
    };
    if filters != Filters::default() {
        handle.send(UiCommand::SetFilters(filters)).await;
    }

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                let Ok(Some(line)) = line else { break };
                match parse_line(&line) {
                    Ok(WatchCommand::Quit) => break,
                    Ok(WatchCommand::Help) => print_help(),
                    Ok(WatchCommand::Nothing) => {}
                    Ok(WatchCommand::Ui(command)) => {
                        if !handle.send(command).await {
                            break;
                        }
                    }
                    Err(message) => println!("{message}"),
                }
            }
        }
    }

    cancel.cancel();
    handle.shutdown().await;
    let _ = channel_task.await;
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  start|pause|stop <location> <machine>");
    println!("  rename <location> <machine> <new name>");
    println!("  filter [location=L] [status=S] [search=TEXT] | filter clear");
    println!("  refresh");
    println!("  quit");
}

#[derive(Debug, PartialEq)]
enum WatchCommand {
    Ui(UiCommand),
    Quit,
    Help,
    Nothing,
}

/// Parse one stdin line into a command.
fn parse_line(line: &str) -> Result<WatchCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(WatchCommand::Nothing);
    };

    match verb {
        "quit" | "q" | "exit" => Ok(WatchCommand::Quit),
        "help" | "?" => Ok(WatchCommand::Help),
        "refresh" => Ok(WatchCommand::Ui(UiCommand::Refresh)),
        "start" | "pause" | "stop" => {
            let (location, machine) = two_args(&mut words, verb)?;
            let action = match verb {
                "start" => MachineAction::Start,
                "pause" => MachineAction::Pause,
                _ => MachineAction::Stop,
            };
            Ok(WatchCommand::Ui(UiCommand::Action {
                action,
                location,
                machine_id: machine.into(),
            }))
        }
        "rename" => {
            let (location, machine) = two_args(&mut words, verb)?;
            let new_name = words.collect::<Vec<_>>().join(" ");
            if new_name.is_empty() {
                return Err("usage: rename <location> <machine> <new name>".into());
            }
            Ok(WatchCommand::Ui(UiCommand::Rename {
                location,
                machine_id: machine.into(),
                new_name,
            }))
        }
        "filter" => {
            let mut filters = Filters::default();
            for word in words {
                if word == "clear" {
                    return Ok(WatchCommand::Ui(UiCommand::SetFilters(Filters::default())));
                }
                match word.split_once('=') {
                    Some(("location", v)) => filters.location = Some(v.to_string()),
                    Some(("status", v)) => filters.status = Some(v.to_string().into()),
                    Some(("search", v)) => filters.search = Some(v.to_string()),
                    _ => return Err(format!("unknown filter `{word}`")),
                }
            }
            Ok(WatchCommand::Ui(UiCommand::SetFilters(filters)))
        }
        other => Err(format!("unknown command `{other}` (try `help`)")),
    }
}

fn two_args<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    verb: &str,
) -> Result<(String, String), String> {
    match (words.next(), words.next()) {
        (Some(a), Some(b)) => Ok((a.to_string(), b.to_string())),
        _ => Err(format!("usage: {verb} <location> <machine>")),
    }
}
