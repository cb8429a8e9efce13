//! Shipment loading
//!
//! A load runs on the tokio runtime and reports back over a channel that the
//! UI thread polls once per frame. Only one load is live at a time: starting
//! another cancels the previous task and drops its channel, so a superseded
//! result can never land in the app state.

use super::App;
use crate::constants::STATUS_ALL;
use crate::error::LoadError;
use crate::source::ShipmentSource;
use crate::types::*;
use eframe::egui;
use std::collections::HashSet;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub(crate) type LoadOutcome = Result<Vec<Shipment>, LoadError>;

/// The load currently in flight
pub(crate) struct PendingLoad {
    pub generation: u64,
    pub token: CancellationToken,
    pub receiver: Receiver<LoadOutcome>,
}

/// Fetch from `source` and check the result is a list of shipments.
pub async fn fetch_shipments(source: &dyn ShipmentSource) -> LoadOutcome {
    let value = source.fetch().await?;
    parse_dataset(value)
}

/// Validate raw JSON as a shipment list: non-null, an array, every element a
/// shipment, ids unique.
pub fn parse_dataset(value: serde_json::Value) -> LoadOutcome {
    let records = match value {
        serde_json::Value::Null => return Err(LoadError::Missing),
        serde_json::Value::Array(records) => records,
        other => {
            return Err(LoadError::NotAnArray {
                found: LoadError::json_kind(&other),
            })
        }
    };

    let mut seen = HashSet::with_capacity(records.len());
    let mut shipments = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let shipment: Shipment = serde_json::from_value(record)
            .map_err(|source| LoadError::InvalidRecord { index, source })?;
        if !seen.insert(shipment.id.clone()) {
            return Err(LoadError::DuplicateId {
                id: shipment.id.to_string(),
            });
        }
        shipments.push(shipment);
    }
    Ok(shipments)
}

impl App {
    /// Start a fresh load, superseding any load still in flight.
    pub fn start_load(&mut self, ctx: &egui::Context) {
        self.cancel_pending_load();

        self.load_generation += 1;
        let generation = self.load_generation;
        self.load_state = LoadState::Loading;
        self.shipments.clear();
        self.filtered_indices.clear();

        let source = self.source.clone();
        let token = CancellationToken::new();
        let task_token = token.clone();
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();

        info!(generation, source = %source.describe(), "Loading shipments");

        self.runtime.spawn(async move {
            tokio::select! {
                _ = task_token.cancelled() => {
                    debug!(generation, "Shipment load cancelled");
                }
                outcome = fetch_shipments(source.as_ref()) => {
                    if tx.send(outcome).is_err() {
                        debug!(generation, "Shipment load finished after it was superseded");
                    }
                    ctx.request_repaint();
                }
            }
        });

        self.pending_load = Some(PendingLoad {
            generation,
            token,
            receiver: rx,
        });
    }

    /// Retry after a failure. Behaves like a full reload: view state goes
    /// back to its defaults before loading again.
    pub fn retry(&mut self, ctx: &egui::Context) {
        info!("Retrying shipment load");
        self.filter_status = STATUS_ALL.to_string();
        self.sort_order = SortOrder::None;
        self.start_load(ctx);
    }

    /// Pick up the result of the pending load, if it has arrived.
    pub fn poll_load(&mut self) {
        let Some(pending) = &self.pending_load else {
            return;
        };
        let outcome = match pending.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(LoadError::Interrupted),
        };
        self.finish_load(outcome);
    }

    pub(crate) fn finish_load(&mut self, outcome: LoadOutcome) {
        let generation = self.pending_load.take().map(|p| p.generation);
        match outcome {
            Ok(shipments) => {
                info!(?generation, count = shipments.len(), "Shipments loaded");
                self.shipments = shipments;
                if self.filter_status != STATUS_ALL
                    && !self.shipments.iter().any(|s| s.status == self.filter_status)
                {
                    self.filter_status = STATUS_ALL.to_string();
                }
                self.load_state = LoadState::Ready;
                self.apply_filters();
            }
            Err(e) => {
                warn!(?generation, error = %e, "Failed to load shipments");
                self.shipments.clear();
                self.filtered_indices.clear();
                self.load_state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Stop the in-flight load so it cannot write into this app any more.
    pub fn cancel_pending_load(&mut self) {
        if let Some(pending) = self.pending_load.take() {
            debug!(generation = pending.generation, "Superseding shipment load");
            pending.token.cancel();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn load_error(&self) -> Option<&str> {
        match &self.load_state {
            LoadState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Block until the pending load reports or `timeout` passes.
    #[cfg(test)]
    pub(crate) fn wait_for_load(&mut self, timeout: std::time::Duration) {
        let Some(pending) = &self.pending_load else {
            return;
        };
        let outcome = match pending.receiver.recv_timeout(timeout) {
            Ok(outcome) => outcome,
            Err(mpsc::RecvTimeoutError::Timeout) => return,
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(LoadError::Interrupted),
        };
        self.finish_load(outcome);
    }
}
