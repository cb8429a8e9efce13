//! Reusable UI components
//!
//! [`ShipmentCard`] is the per-record renderer: it is built from one
//! [`Shipment`] with no other input and paints the same thing every time.

use crate::theme;
use crate::types::{Shipment, StatusTreatment};
use eframe::egui;
use egui_phosphor::regular as icons;

/// Shown in place of a delivery time that cannot be parsed
pub const INVALID_DATE: &str = "Invalid Date";

/// Format an estimated delivery like `Mar 18, 2024, 02:30 PM` (UTC, 12-hour clock)
pub fn format_delivery(raw: &str) -> String {
    match crate::types::parse_timestamp(raw) {
        Some(dt) => dt.format("%b %-d, %Y, %I:%M %p").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// One labelled line in the card body
#[derive(Debug, Clone, PartialEq)]
pub struct CardRow<'a> {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: std::borrow::Cow<'a, str>,
}

/// Everything a shipment card shows, resolved from the record
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentCard<'a> {
    pub tracking_number: &'a str,
    pub status: &'a str,
    pub treatment: StatusTreatment,
    pub rows: [CardRow<'a>; 4],
}

impl<'a> ShipmentCard<'a> {
    pub fn new(shipment: &'a Shipment) -> Self {
        Self {
            tracking_number: &shipment.tracking_number,
            status: &shipment.status,
            treatment: StatusTreatment::for_status(&shipment.status),
            rows: [
                CardRow {
                    icon: icons::PACKAGE,
                    label: "From:",
                    value: shipment.sender.as_str().into(),
                },
                CardRow {
                    icon: icons::USER,
                    label: "To:",
                    value: shipment.receiver.as_str().into(),
                },
                CardRow {
                    icon: icons::MAP_PIN,
                    label: "Last Location:",
                    value: shipment.last_location.as_str().into(),
                },
                CardRow {
                    icon: icons::CALENDAR,
                    label: "Estimated Delivery:",
                    value: format_delivery(&shipment.estimated_delivery).into(),
                },
            ],
        }
    }

    pub fn show(&self, ui: &mut egui::Ui) -> egui::Response {
        theme::card_frame()
            .show(ui, |ui| {
                let inner_w = theme::CARD_WIDTH - 2.0 * theme::SPACING_XL;
                ui.set_width(inner_w);

                ui.horizontal(|ui| {
                    ui.add(
                        egui::Label::new(
                            egui::RichText::new(self.tracking_number)
                                .size(theme::FONT_HEADING)
                                .strong()
                                .color(theme::TEXT_PRIMARY),
                        )
                        .selectable(false),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        status_badge(ui, self.status, self.treatment);
                    });
                });

                ui.add_space(theme::SPACING_MD);
                ui.separator();
                ui.add_space(theme::SPACING_SM);

                for row in &self.rows {
                    info_row(ui, row);
                }
            })
            .response
    }
}

/// Pill with the raw status text, colored by its treatment
pub fn status_badge(ui: &mut egui::Ui, status: &str, treatment: StatusTreatment) -> egui::Response {
    let (bg, fg) = theme::status_colors(treatment);
    theme::badge_frame(bg)
        .show(ui, |ui| {
            ui.add(
                egui::Label::new(egui::RichText::new(status).size(theme::FONT_SMALL).color(fg))
                    .selectable(false),
            );
        })
        .response
}

fn info_row(ui: &mut egui::Ui, row: &CardRow<'_>) {
    ui.horizontal(|ui| {
        ui.add(
            egui::Label::new(
                egui::RichText::new(format!("{}  {}", row.icon, row.label))
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_DIM),
            )
            .selectable(false),
        );
        // Blank values still get their row
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(row.value.as_ref())
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_SECONDARY),
                )
                .truncate(),
            );
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShipmentId;

    fn shipment(status: &str, delivery: &str) -> Shipment {
        Shipment {
            id: ShipmentId::Number(1),
            tracking_number: "TRK-100245".to_string(),
            status: status.to_string(),
            last_location: "Memphis, TN".to_string(),
            estimated_delivery: delivery.to_string(),
            sender: "Northwind Traders".to_string(),
            receiver: String::new(),
        }
    }

    #[test]
    fn test_format_delivery_afternoon() {
        assert_eq!(format_delivery("2024-03-18T14:30:00Z"), "Mar 18, 2024, 02:30 PM");
    }

    #[test]
    fn test_format_delivery_midnight_and_date_only() {
        assert_eq!(format_delivery("2024-01-03T00:05:00Z"), "Jan 3, 2024, 12:05 AM");
        assert_eq!(format_delivery("2024-12-25"), "Dec 25, 2024, 12:00 AM");
    }

    #[test]
    fn test_format_delivery_converts_offsets_to_utc() {
        assert_eq!(format_delivery("2024-07-04T20:00:00+02:00"), "Jul 4, 2024, 06:00 PM");
    }

    #[test]
    fn test_format_delivery_rfc2822() {
        assert_eq!(
            format_delivery("Mon, 18 Mar 2024 14:30:00 GMT"),
            "Mar 18, 2024, 02:30 PM"
        );
    }

    #[test]
    fn test_format_delivery_invalid() {
        assert_eq!(format_delivery("soon"), INVALID_DATE);
        assert_eq!(format_delivery(""), INVALID_DATE);
    }

    #[test]
    fn test_card_rows_in_order_with_blanks_kept() {
        let s = shipment("In Transit", "2024-03-18T14:30:00Z");
        let card = ShipmentCard::new(&s);
        let labels: Vec<_> = card.rows.iter().map(|r| r.label).collect();
        assert_eq!(labels, ["From:", "To:", "Last Location:", "Estimated Delivery:"]);
        assert_eq!(card.rows[0].value, "Northwind Traders");
        assert_eq!(card.rows[1].value, "");
        assert_eq!(card.rows[3].value, "Mar 18, 2024, 02:30 PM");
        assert_eq!(card.tracking_number, "TRK-100245");
    }

    #[test]
    fn test_unknown_status_renders_like_pending() {
        let unknown = shipment("Unknown", "2024-01-01");
        let pending = shipment("Pending", "2024-01-01");
        let unknown_card = ShipmentCard::new(&unknown);
        let pending_card = ShipmentCard::new(&pending);
        assert_eq!(unknown_card.treatment, pending_card.treatment);
        assert_eq!(unknown_card.status, "Unknown");
    }

    #[test]
    fn test_card_with_bad_date() {
        let s = shipment("Delivered", "31/02/2024");
        let card = ShipmentCard::new(&s);
        assert_eq!(card.rows[3].value, INVALID_DATE);
    }

    #[test]
    fn test_card_paints_headless() {
        let s = shipment("Cancelled", "2024-03-14T12:00:00Z");
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let response = ShipmentCard::new(&s).show(ui);
                assert!(response.rect.width() > 0.0);
            });
        });
    }
}
