// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot machine commands: start/pause/stop and rename.

use crate::output::card_line;
use anyhow::{bail, Result};
use fv_client::protocol::MachineAction;
use fv_client::{Config, DashboardApi, WireApi};
use fv_core::machine::MachineId;

pub async fn action(
    config: &Config,
    action: MachineAction,
    location: &str,
    machine_id: &str,
) -> Result<()> {
    let session = super::require_session(config)?;
    if !session.scope.allows(location) {
        bail!("{} is outside your location scope", location);
    }

    let api = WireApi::new(config.server.addr.clone());
    let id = MachineId::from(machine_id);
    let reply = api.machine_action(action, location, &id).await?;
    if !reply.ok {
        bail!("{action} rejected by the server");
    }
    match reply.machine {
        Some(machine) => println!("{}", card_line(location, &machine)),
        None => println!("{action} accepted"),
    }
    Ok(())
}

pub async fn rename(
    config: &Config,
    location: &str,
    machine_id: &str,
    new_name: &str,
) -> Result<()> {
    let session = super::require_session(config)?;
    if !session.is_admin() {
        bail!("rename requires an admin session");
    }

    let api = WireApi::new(config.server.addr.clone());
    let id = MachineId::from(machine_id);
    if !api.rename_machine(location, &id, new_name).await? {
        bail!("rename rejected by the server");
    }
    println!("Machine {} renamed to {}", machine_id, new_name);
    Ok(())
}
