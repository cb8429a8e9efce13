//! View rendering (loading, error, dashboard)

use super::{App, ViewMode};
use crate::constants::STATUS_ALL;
use crate::theme;
use crate::types::SortOrder;
use crate::ui::components::ShipmentCard;
use eframe::egui;
use egui_phosphor::regular as icons;

impl App {
    /// Paint whichever screen the current state calls for. Returns true if
    /// the user asked to retry a failed load.
    pub fn render_central(&mut self, ui: &mut egui::Ui) -> bool {
        match self.view_mode() {
            ViewMode::Loading => {
                self.render_loading(ui);
                false
            }
            ViewMode::Failed => self.render_error(ui),
            ViewMode::Empty | ViewMode::Cards => {
                self.render_dashboard(ui);
                false
            }
        }
    }

    fn render_loading(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.add(egui::Spinner::new().size(32.0).color(theme::ACCENT));
            ui.add_space(theme::SPACING_LG);
            ui.label(
                egui::RichText::new("Loading shipments...")
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_MUTED),
            );
        });
    }

    fn render_error(&self, ui: &mut egui::Ui) -> bool {
        let message = self.load_error().unwrap_or_default();
        let mut retry = false;
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 3.0);
            ui.label(
                egui::RichText::new(icons::WARNING_CIRCLE)
                    .size(theme::EMPTY_ICON_SIZE)
                    .color(theme::STATUS_ERROR),
            );
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new("Error Loading Shipments")
                    .size(theme::FONT_TITLE)
                    .color(theme::TEXT_PRIMARY),
            );
            ui.add_space(theme::SPACING_SM);
            ui.label(
                egui::RichText::new(message)
                    .size(theme::FONT_BODY)
                    .color(theme::TEXT_MUTED),
            );
            ui.add_space(theme::SPACING_XL);
            if ui
                .add(theme::button_accent(format!("{}  Retry", icons::ARROW_CLOCKWISE)))
                .clicked()
            {
                retry = true;
            }
        });
        retry
    }

    fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        self.render_header(ui);
        ui.add_space(theme::SPACING_XL);
        self.render_controls(ui);
        ui.add_space(theme::SPACING_LG);
        self.render_stats(ui);
        ui.add_space(theme::SPACING_XL);

        if self.filtered_indices.is_empty() {
            self.render_empty_state(ui);
        } else {
            self.render_cards(ui);
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.label(
            egui::RichText::new(format!("{}  Shipment Status Dashboard", icons::TRUCK))
                .size(theme::FONT_DISPLAY)
                .strong()
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            egui::RichText::new("Track and manage your shipments in real-time")
                .size(theme::FONT_BODY)
                .color(theme::TEXT_MUTED),
        );
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        let options = self.status_options();
        let mut filter = self.filter_status.clone();
        let mut sort = self.sort_order;

        theme::section_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Filter by Status:").color(theme::TEXT_DIM));
                egui::ComboBox::from_id_salt("status_filter")
                    .selected_text(filter.clone())
                    .width(theme::COMBO_WIDTH)
                    .show_ui(ui, |ui| {
                        for status in &options {
                            ui.selectable_value(&mut filter, status.clone(), status.as_str());
                        }
                    });

                ui.add_space(theme::SPACING_XXL);

                ui.label(egui::RichText::new("Sort by Delivery:").color(theme::TEXT_DIM));
                egui::ComboBox::from_id_salt("sort_order")
                    .selected_text(sort.label())
                    .width(theme::COMBO_WIDTH)
                    .show_ui(ui, |ui| {
                        for order in SortOrder::ALL {
                            ui.selectable_value(&mut sort, order, order.label());
                        }
                    });
            });
        });

        self.set_filter_status(filter);
        self.set_sort_order(sort);
    }

    fn render_stats(&self, ui: &mut egui::Ui) {
        theme::card_frame().show(ui, |ui| {
            ui.set_width(theme::STAT_CARD_WIDTH);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(self.visible_count().to_string())
                        .size(theme::FONT_DISPLAY)
                        .strong()
                        .color(theme::ACCENT),
                );
                ui.label(
                    egui::RichText::new("Shipments")
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            });
        });
    }

    fn render_empty_state(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(theme::SPACING_XXL);
            ui.label(
                egui::RichText::new(icons::FUNNEL_X)
                    .size(theme::EMPTY_ICON_SIZE)
                    .color(theme::TEXT_DIM),
            );
            ui.add_space(theme::SPACING_MD);
            ui.label(
                egui::RichText::new("No shipments found matching your criteria.")
                    .size(theme::FONT_HEADING)
                    .color(theme::TEXT_MUTED),
            );
            if self.filter_status != STATUS_ALL {
                ui.add_space(theme::SPACING_XL);
                if ui
                    .add(theme::button(format!("{}  Show All", icons::FUNNEL_X)))
                    .clicked()
                {
                    self.set_filter_status(STATUS_ALL.to_string());
                }
            }
        });
    }

    fn render_cards(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .id_salt("shipment_cards")
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(theme::SPACING_XL, theme::SPACING_XL);
                    for shipment in self.visible_shipments() {
                        ui.push_id(&shipment.id, |ui| {
                            ShipmentCard::new(shipment).show(ui);
                        });
                    }
                });
            });
    }
}
