//! App module - contains the main application state and logic

mod filters;
pub(crate) mod loader;
mod views;

use crate::constants::STATUS_ALL;
use crate::settings::Settings;
use crate::source::{self, ShipmentSource};
use crate::theme;
use crate::types::*;
use eframe::egui;
use loader::PendingLoad;
use std::sync::Arc;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Source of truth, replaced wholesale by each load
    pub(crate) shipments: Vec<Shipment>,
    // Derived from shipments + filter + sort, never edited directly
    pub(crate) filtered_indices: Vec<usize>,
    pub(crate) filter_status: String,
    pub(crate) sort_order: SortOrder,
    pub(crate) load_state: LoadState,
    // Loading
    pub(crate) source: Arc<dyn ShipmentSource>,
    pub(crate) runtime: tokio::runtime::Runtime,
    pub(crate) pending_load: Option<PendingLoad>,
    pub(crate) load_generation: u64,
    pub(crate) load_started: bool,
}

/// Which of the three mutually exclusive screens to paint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Loading,
    Failed,
    /// Loaded, but nothing passes the current filter
    Empty,
    Cards,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: &Settings, runtime: tokio::runtime::Runtime) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        Self::with_source(source::from_settings(settings), runtime)
    }

    pub fn with_source(source: Arc<dyn ShipmentSource>, runtime: tokio::runtime::Runtime) -> Self {
        Self {
            shipments: Vec::new(),
            filtered_indices: Vec::new(),
            filter_status: STATUS_ALL.to_string(),
            sort_order: SortOrder::None,
            load_state: LoadState::Loading,
            source,
            runtime,
            pending_load: None,
            load_generation: 0,
            load_started: false,
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        match self.load_state {
            LoadState::Loading => ViewMode::Loading,
            LoadState::Failed(_) => ViewMode::Failed,
            LoadState::Ready if self.filtered_indices.is_empty() => ViewMode::Empty,
            LoadState::Ready => ViewMode::Cards,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.filtered_indices.len()
    }
}
