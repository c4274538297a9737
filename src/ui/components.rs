//! Reusable UI components
//!
//! Small custom-painted pieces shared by the widgets.

use crate::picker::calendar::DayCell;
use crate::theme;
use eframe::egui;

/// Custom checkbox widget with consistent styling
pub fn styled_checkbox(ui: &mut egui::Ui, selected: bool, size: f32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let rounding = 3.0;

        if selected {
            painter.rect_filled(rect, rounding, theme::ACCENT);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                egui_phosphor::regular::CHECK,
                egui::FontId::proportional(size * 0.7),
                theme::ACCENT_TEXT,
            );
        } else {
            painter.rect_stroke(
                rect,
                rounding,
                egui::Stroke::new(theme::STROKE_MEDIUM, theme::BORDER_DEFAULT),
                egui::StrokeKind::Inside,
            );
        }
    }

    response
}

/// Checkbox followed by a label; the whole row is clickable. Returns true if toggled.
pub fn checkbox_row(ui: &mut egui::Ui, checked: &mut bool, label: &str) -> bool {
    let mut toggled = false;
    ui.horizontal(|ui| {
        let box_resp = styled_checkbox(ui, *checked, 16.0);
        let label_resp = ui.add(
            egui::Label::new(
                egui::RichText::new(label)
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_SECONDARY),
            )
            .sense(egui::Sense::click()),
        );
        if box_resp.clicked() || label_resp.clicked() {
            *checked = !*checked;
            toggled = true;
        }
    });
    toggled
}

/// One round day button in the month grid.
///
/// Selected wins over today, which wins over disabled. Filler days from
/// neighbouring months are drawn dim and never sense clicks.
pub fn day_cell(ui: &mut egui::Ui, cell: &DayCell) -> egui::Response {
    let size = egui::vec2(theme::DAY_CELL_SIZE, theme::DAY_CELL_SIZE);
    let sense = if cell.disabled {
        egui::Sense::hover()
    } else {
        egui::Sense::click()
    };
    let (rect, response) = ui.allocate_exact_size(size, sense);

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let radius = rect.width() / 2.0 - 1.0;

        let (fill, text_color) = if cell.is_selected {
            (Some(theme::ACCENT_STRONG), theme::TEXT_PRIMARY)
        } else if cell.is_today {
            (Some(theme::TODAY_BG), theme::TODAY_TEXT)
        } else if cell.is_filler() {
            (None, theme::TEXT_FILLER)
        } else if cell.disabled {
            (None, theme::TEXT_DIM)
        } else if response.hovered() {
            (Some(theme::BORDER_DEFAULT), theme::TEXT_PRIMARY)
        } else {
            (None, theme::TEXT_PRIMARY)
        };

        if let Some(fill) = fill {
            painter.circle_filled(rect.center(), radius, fill);
        }
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            cell.day.to_string(),
            egui::FontId::proportional(theme::FONT_LABEL),
            text_color,
        );
    }

    response
}

/// Small icon-only button. Hover brightens the glyph.
pub fn icon_button(ui: &mut egui::Ui, icon: &str, size: f32, enabled: bool) -> egui::Response {
    let sense = if enabled {
        egui::Sense::click()
    } else {
        egui::Sense::hover()
    };
    let (rect, response) = ui.allocate_exact_size(egui::vec2(size, size), sense);

    if ui.is_rect_visible(rect) {
        let color = if !enabled {
            theme::BTN_DISABLED_TEXT
        } else if response.hovered() {
            ui.painter()
                .rect_filled(rect, theme::RADIUS_DEFAULT, theme::BG_SURFACE);
            theme::TEXT_PRIMARY
        } else {
            theme::TEXT_MUTED
        };
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(size * 0.7),
            color,
        );
    }

    response
}

/// Pill chip with a remove button. Returns true if remove was clicked.
pub fn removable_chip(ui: &mut egui::Ui, label: &str, enabled: bool) -> bool {
    let mut removed = false;
    egui::Frame::new()
        .fill(theme::CHIP_BG)
        .corner_radius(theme::RADIUS_PILL)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.spacing_mut().item_spacing.x = theme::SPACING_SM;
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(label)
                        .size(theme::FONT_LABEL)
                        .color(theme::TEXT_PRIMARY),
                );
                removed = icon_button(ui, egui_phosphor::regular::X, 16.0, enabled).clicked();
            });
        });
    removed
}

/// Pill-shaped toggle button used for quick ranges
pub fn pill_button(ui: &mut egui::Ui, label: &str, active: bool) -> egui::Response {
    let font = egui::FontId::proportional(theme::FONT_SMALL);
    let galley = ui
        .painter()
        .layout_no_wrap(label.to_owned(), font.clone(), theme::TEXT_PRIMARY);
    let size = egui::vec2(galley.size().x + 2.0 * theme::SPACING_LG, theme::CHIP_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());

    if ui.is_rect_visible(rect) {
        let base = if active {
            theme::ACCENT_STRONG
        } else {
            theme::BG_SURFACE
        };
        let (fill, draw_rect) = theme::button_visual(&response, base, rect);
        ui.painter().rect_filled(draw_rect, theme::RADIUS_PILL, fill);
        ui.painter().text(
            draw_rect.center(),
            egui::Align2::CENTER_CENTER,
            label,
            font,
            if active {
                theme::TEXT_PRIMARY
            } else {
                theme::TEXT_SECONDARY
            },
        );
    }

    response
}
