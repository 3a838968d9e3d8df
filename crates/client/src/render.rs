// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output boundary of the run loop.
//!
//! The engine decides *what* changed; a [`RenderSink`] decides how that
//! looks. The CLI draws to the terminal, tests record.

use fv_core::alert::Alert;
use fv_core::countdown::CountdownKey;
use fv_core::logs::ProductionLog;
use fv_engine::effect::CardOp;

pub trait RenderSink: Send {
    /// Apply structured card changes from a full or targeted render.
    fn apply_cards(&mut self, ops: &[CardOp]);

    /// A single countdown ticked to a new display value.
    fn countdown(&mut self, key: &CountdownKey, display: &str);

    /// The alert feed changed; `alerts` is the full feed, newest first.
    fn alerts(&mut self, alerts: &[Alert]);

    /// The production log feed was refreshed.
    fn logs(&mut self, logs: &[ProductionLog]);
}

/// Records everything it is handed, for assertions.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub cards: Vec<CardOp>,
    pub countdowns: Vec<(CountdownKey, String)>,
    pub alert_feeds: Vec<Vec<Alert>>,
    pub log_feeds: Vec<Vec<ProductionLog>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RenderSink for RecordingSink {
    fn apply_cards(&mut self, ops: &[CardOp]) {
        self.cards.extend_from_slice(ops);
    }

    fn countdown(&mut self, key: &CountdownKey, display: &str) {
        self.countdowns.push((key.clone(), display.to_string()));
    }

    fn alerts(&mut self, alerts: &[Alert]) {
        self.alert_feeds.push(alerts.to_vec());
    }

    fn logs(&mut self, logs: &[ProductionLog]) {
        self.log_feeds.push(logs.to_vec());
    }
}

// Lets a test keep a handle to the sink after handing it to the run loop.
#[cfg(any(test, feature = "test-support"))]
impl RenderSink for std::sync::Arc<parking_lot::Mutex<RecordingSink>> {
    fn apply_cards(&mut self, ops: &[CardOp]) {
        self.lock().apply_cards(ops);
    }

    fn countdown(&mut self, key: &CountdownKey, display: &str) {
        self.lock().countdown(key, display);
    }

    fn alerts(&mut self, alerts: &[Alert]) {
        self.lock().alerts(alerts);
    }

    fn logs(&mut self, logs: &[ProductionLog]) {
        self.lock().logs(logs);
    }
}
