// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Production logs command handler

use crate::output::{print_logs, write_logs_csv, OutputFormat};
use anyhow::{Context, Result};
use fv_client::{Config, DashboardApi, WireApi};
use fv_core::logs::recent_logs;
use std::path::PathBuf;

pub async fn handle(config: &Config, format: OutputFormat, csv: Option<PathBuf>) -> Result<()> {
    super::require_session(config)?;

    let api = WireApi::new(config.server.addr.clone());
    let logs = api.production_logs().await?;
    let recent = recent_logs(&logs);

    if let Some(path) = csv {
        write_logs_csv(&path, recent)
            .with_context(|| format!("cannot write {}", path.display()))?;
        println!("Wrote {} entries to {}", recent.len(), path.display());
    }
    print_logs(recent, format)
}
