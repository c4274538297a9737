//! Demo page rendering: one card per widget plus the toast overlay

use super::{App, PICKER_LIMIT_DAYS};
use crate::constants::{APP_NAME, APP_VERSION, TOAST_SECS};
use crate::theme;
use crate::ui::components::checkbox_row;
use crate::utils::format_bytes;
use crate::widgets::chart::chart;
use crate::widgets::date_time_picker::date_time_picker;
use crate::widgets::document_upload::document_upload;
use crate::widgets::multi_select::{multi_select, MultiSelect};
use eframe::egui;
use tracing::debug;

const TOAST_FADE_SECS: f32 = 0.5;

impl App {
    pub(crate) fn render_page(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::same(24)),
            )
            .show(ctx, |ui| {
                self.central_panel_rect = Some(ui.max_rect());
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_header(ui);
                        ui.add_space(theme::SPACING_XL);
                        self.render_picker_card(ui);
                        ui.add_space(theme::SPACING_XL);
                        self.render_multi_select_card(ui);
                        ui.add_space(theme::SPACING_XL);
                        self.render_upload_card(ui);
                        ui.add_space(theme::SPACING_XL);
                        self.render_chart_card(ui);
                    });
            });
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(APP_NAME)
                    .size(theme::FONT_TITLE + 4.0)
                    .strong()
                    .color(theme::TEXT_PRIMARY),
            );
            ui.label(
                egui::RichText::new(format!("v{}", APP_VERSION))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
        });
    }

    fn render_picker_card(&mut self, ui: &mut egui::Ui) {
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            card_title(ui, egui_phosphor::regular::CALENDAR, "Date & Time");

            if let Some(value) = date_time_picker(ui, "schedule_picker", &mut self.picker) {
                self.last_confirmed = Some(value);
                self.show_toast(format!("Scheduled for {}", self.picker.display_value()));
            }

            ui.add_space(theme::SPACING_MD);
            let label = format!("Only allow the next {} days", PICKER_LIMIT_DAYS);
            if checkbox_row(ui, &mut self.limit_picker_range, &label) {
                debug!(enabled = self.limit_picker_range, "Picker range limit toggled");
                self.apply_picker_limit();
            }

            if let Some(max) = self.picker.date_bounds().max {
                ui.label(
                    egui::RichText::new(format!("Selectable through {}", max.format("%b %-d, %Y")))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            }

            if let Some(value) = self.last_confirmed {
                ui.add_space(theme::SPACING_SM);
                ui.label(
                    egui::RichText::new(format!("Last confirmed: {}", value.format("%Y-%m-%d %H:%M")))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_MUTED),
                );
            }
        });
    }

    fn render_multi_select_card(&mut self, ui: &mut egui::Ui) {
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            card_title(ui, egui_phosphor::regular::BUILDINGS, "Property Sub-Types");
            // Amenities only make sense once a property type is chosen
            self.amenities
                .set_disabled(self.property_types.selected().is_empty());

            let handle = self.runtime.handle().clone();
            if multi_select(ui, "property_types", &mut self.property_types, &handle) {
                debug!(
                    selected = self.property_types.selected().len(),
                    "Property sub-type selection changed"
                );
            }

            selected_values(ui, &self.property_types);

            ui.add_space(theme::SPACING_LG);
            if multi_select(ui, "amenities", &mut self.amenities, &handle) {
                debug!(selected = self.amenities.selected().len(), "Amenity selection changed");
            }
            selected_values(ui, &self.amenities);
        });
    }

    fn render_upload_card(&mut self, ui: &mut egui::Ui) {
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            if let Some((title, documents)) = document_upload(ui, &mut self.uploads) {
                self.show_toast(format!("Added {} document(s)", documents.len()));
                self.submitted.push((title, documents));
            }

            let pending = self.uploads.documents().len();
            if pending > 0 {
                ui.label(
                    egui::RichText::new(format!("{} pending", pending))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                );
            }
            if self.submitted.is_empty() {
                return;
            }
            ui.add_space(theme::SPACING_LG);
            ui.separator();
            for (title, documents) in &self.submitted {
                let total: u64 = documents.iter().filter_map(|d| d.size).sum();
                let title = if title.is_empty() { "Untitled" } else { title.as_str() };
                ui.label(
                    egui::RichText::new(format!(
                        "{}  {} ({} files, {})",
                        egui_phosphor::regular::CHECK_CIRCLE,
                        title,
                        documents.len(),
                        format_bytes(total)
                    ))
                    .size(theme::FONT_SMALL)
                    .color(theme::STATUS_SUCCESS),
                );
            }
        });
    }

    fn render_chart_card(&mut self, ui: &mut egui::Ui) {
        theme::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            card_title(ui, egui_phosphor::regular::CHART_BAR, "Activity");
            if chart(ui, &mut self.chart) {
                debug!(kind = self.chart.kind.label(), "Chart kind changed");
            }
        });
    }

    /// Bottom-right toast, visible for a few seconds then fading. Hovering pauses it.
    pub(crate) fn render_toast(&mut self, ctx: &egui::Context) {
        let (Some(msg), Some(panel_rect)) = (self.toast_message.clone(), self.central_panel_rect) else {
            return;
        };
        let total_duration = TOAST_SECS + TOAST_FADE_SECS;
        let margin = 12.0;
        let toast_pos = egui::pos2(panel_rect.right() - margin, panel_rect.bottom() - margin);
        let elapsed = self.toast_start.map(|t| t.elapsed().as_secs_f32()).unwrap_or(0.0);
        let alpha = if elapsed > TOAST_SECS {
            ((total_duration - elapsed) / TOAST_FADE_SECS).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let response = egui::Area::new(egui::Id::new("toast"))
            .order(egui::Order::Tooltip)
            .fixed_pos(toast_pos)
            .pivot(egui::Align2::RIGHT_BOTTOM)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgba_unmultiplied(0x1a, 0x1a, 0x1e, (230.0 * alpha) as u8))
                    .stroke(egui::Stroke::new(
                        theme::STROKE_DEFAULT,
                        theme::ACCENT.gamma_multiply(0.4 * alpha),
                    ))
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(msg).color(theme::TEXT_PRIMARY.gamma_multiply(alpha)));
                    });
            });

        if response.response.hovered() {
            self.toast_start = Some(std::time::Instant::now());
        }

        if elapsed >= total_duration {
            self.toast_message = None;
            self.toast_start = None;
        } else {
            ctx.request_repaint();
        }
    }
}

fn card_title(ui: &mut egui::Ui, icon: &str, title: &str) {
    ui.label(
        egui::RichText::new(format!("{}  {}", icon, title))
            .size(theme::FONT_TITLE)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(theme::SPACING_MD);
}

fn selected_values(ui: &mut egui::Ui, state: &MultiSelect) {
    let selected = state.selected();
    if selected.is_empty() {
        return;
    }
    ui.add_space(theme::SPACING_SM);
    let values: Vec<&str> = selected.iter().map(|o| o.value.as_str()).collect();
    ui.label(
        egui::RichText::new(format!("Values: {}", values.join(", ")))
            .size(theme::FONT_SMALL)
            .color(theme::TEXT_MUTED),
    );
}
