//! egui renderer for [`DateTimePicker`]
//!
//! Draws the trigger button and, while open, a floating popup with quick
//! ranges, the month grid, hour/minute/period spinners and Cancel/Set.

use crate::picker::calendar::DAY_NAMES;
use crate::picker::clock::Clock;
use crate::picker::quick_range::QuickRange;
use crate::picker::DateTimePicker;
use crate::theme;
use crate::ui::components::{day_cell, icon_button, pill_button};
use crate::widgets::clicked_outside;
use chrono::NaiveDateTime;
use eframe::egui;
use egui_phosphor::regular as icons;
use std::hash::Hash;

/// Show the picker. Returns the confirmed value on the frame Set is clicked.
pub fn date_time_picker<C: Clock>(
    ui: &mut egui::Ui,
    id_salt: impl Hash,
    picker: &mut DateTimePicker<C>,
) -> Option<NaiveDateTime> {
    let id = ui.make_persistent_id(id_salt);
    let trigger = trigger_button(ui, picker);
    if trigger.clicked() {
        picker.toggle();
    }

    if !picker.is_open() {
        return None;
    }

    let mut confirmed = None;
    let popup = egui::Area::new(id.with("popup"))
        .order(egui::Order::Foreground)
        .fixed_pos(trigger.rect.left_bottom() + egui::vec2(0.0, theme::SPACING_MD))
        .show(ui.ctx(), |ui| {
            theme::popup_frame().show(ui, |ui| {
                ui.set_min_width(theme::POPUP_MIN_WIDTH);
                quick_range_row(ui, picker);
                ui.add_space(theme::SPACING_LG);
                calendar(ui, id, picker);
                ui.add_space(theme::SPACING_LG);
                time_row(ui, picker);
                ui.add_space(theme::SPACING_LG);
                confirmed = action_row(ui, picker);

                if picker.selected_date().is_some() {
                    ui.add_space(theme::SPACING_SM);
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new(picker.display_value())
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_MUTED),
                        );
                    });
                }
            });
        });

    let dismissed = !trigger.clicked()
        && picker
            .click_away()
            .is_some_and(|sub| clicked_outside(sub, ui.ctx(), &[trigger.rect, popup.response.rect]));
    if dismissed {
        picker.close();
    }

    confirmed
}

fn trigger_button<C: Clock>(ui: &mut egui::Ui, picker: &DateTimePicker<C>) -> egui::Response {
    let sense = if picker.is_disabled() {
        egui::Sense::hover()
    } else {
        egui::Sense::click()
    };
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(theme::TRIGGER_WIDTH, theme::TRIGGER_HEIGHT),
        sense,
    );

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let border = if picker.is_open() {
            theme::ACCENT
        } else if response.hovered() && !picker.is_disabled() {
            theme::BORDER_STRONG
        } else {
            theme::BORDER_DEFAULT
        };
        painter.rect_filled(rect, theme::RADIUS_LARGE, theme::BG_INPUT);
        painter.rect_stroke(
            rect,
            theme::RADIUS_LARGE,
            egui::Stroke::new(theme::STROKE_DEFAULT, border),
            egui::StrokeKind::Inside,
        );

        let text_color = if picker.is_disabled() {
            theme::TEXT_DIM
        } else if picker.selected_date().is_some() {
            theme::TEXT_PRIMARY
        } else {
            theme::TEXT_MUTED
        };
        let font = egui::FontId::proportional(theme::FONT_BODY);
        painter.text(
            rect.left_center() + egui::vec2(theme::SPACING_LG, 0.0),
            egui::Align2::LEFT_CENTER,
            icons::CALENDAR_BLANK,
            font.clone(),
            theme::TEXT_MUTED,
        );
        painter.text(
            rect.left_center() + egui::vec2(theme::SPACING_LG + 24.0, 0.0),
            egui::Align2::LEFT_CENTER,
            picker.display_value(),
            font.clone(),
            text_color,
        );
        let caret = if picker.is_open() {
            icons::CARET_UP
        } else {
            icons::CARET_DOWN
        };
        painter.text(
            rect.right_center() - egui::vec2(theme::SPACING_LG, 0.0),
            egui::Align2::RIGHT_CENTER,
            caret,
            font,
            theme::TEXT_MUTED,
        );
    }

    if response.hovered() && !picker.is_disabled() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response
}

fn quick_range_row<C: Clock>(ui: &mut egui::Ui, picker: &mut DateTimePicker<C>) {
    ui.horizontal(|ui| {
        for range in QuickRange::ALL {
            let active = picker.quick_range() == Some(range);
            if pill_button(ui, range.label(), active).clicked() {
                picker.apply_quick_range(range);
            }
        }
    });
}

fn calendar<C: Clock>(ui: &mut egui::Ui, id: egui::Id, picker: &mut DateTimePicker<C>) {
    // Month header with navigation
    ui.horizontal(|ui| {
        if icon_button(ui, icons::CARET_LEFT, 24.0, true).clicked() {
            picker.previous_month();
        }
        let label_width = ui.available_width() - 24.0 - ui.spacing().item_spacing.x;
        ui.allocate_ui_with_layout(
            egui::vec2(label_width, 24.0),
            egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
            |ui| {
                ui.label(
                    egui::RichText::new(picker.displayed_month().label())
                        .size(theme::FONT_HEADING)
                        .color(theme::TEXT_PRIMARY),
                );
            },
        );
        if icon_button(ui, icons::CARET_RIGHT, 24.0, true).clicked() {
            picker.next_month();
        }
    });
    ui.add_space(theme::SPACING_MD);

    let grid = picker.grid();
    let mut clicked = None;
    egui::Grid::new(id.with("month_grid"))
        .num_columns(7)
        .spacing(egui::vec2(theme::SPACING_SM, theme::SPACING_SM))
        .show(ui, |ui| {
            for name in DAY_NAMES {
                ui.allocate_ui(egui::vec2(theme::DAY_CELL_SIZE, 16.0), |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            egui::RichText::new(name)
                                .size(theme::FONT_CAPTION)
                                .color(theme::TEXT_MUTED),
                        );
                    });
                });
            }
            ui.end_row();

            for week in grid.chunks(7) {
                for cell in week {
                    if day_cell(ui, cell).clicked() {
                        clicked = Some(cell.date);
                    }
                }
                ui.end_row();
            }
        });

    if let Some(date) = clicked {
        picker.select_date(date);
    }
}

fn time_row<C: Clock>(ui: &mut egui::Ui, picker: &mut DateTimePicker<C>) {
    let time = picker.time();
    ui.horizontal(|ui| {
        // Center the spinners inside the popup
        let content_width = theme::SPINNER_WIDTH * 3.0 + 40.0;
        ui.add_space(((ui.available_width() - content_width) / 2.0).max(0.0));

        match spinner(ui, format!("{:02}", time.hour())) {
            Some(Step::Up) => picker.increment_hour(),
            Some(Step::Down) => picker.decrement_hour(),
            None => {}
        }
        ui.label(egui::RichText::new(":").size(theme::FONT_HEADING).color(theme::TEXT_PRIMARY));
        match spinner(ui, format!("{:02}", time.minute())) {
            Some(Step::Up) => picker.increment_minute(),
            Some(Step::Down) => picker.decrement_minute(),
            None => {}
        }

        let period = egui::Button::new(
            egui::RichText::new(time.period().label())
                .monospace()
                .color(theme::BG_BASE),
        )
        .fill(theme::TEXT_PRIMARY)
        .corner_radius(theme::RADIUS_DEFAULT)
        .min_size(egui::vec2(theme::SPINNER_WIDTH, 0.0));
        if ui.add(period).clicked() {
            picker.toggle_period();
        }
    });
}

enum Step {
    Up,
    Down,
}

fn spinner(ui: &mut egui::Ui, value: String) -> Option<Step> {
    let mut step = None;
    ui.vertical(|ui| {
        ui.set_width(theme::SPINNER_WIDTH);
        ui.vertical_centered(|ui| {
            if icon_button(ui, icons::CARET_UP, 18.0, true).clicked() {
                step = Some(Step::Up);
            }
            egui::Frame::new()
                .fill(theme::TEXT_PRIMARY)
                .corner_radius(theme::RADIUS_DEFAULT)
                .inner_margin(egui::Margin::symmetric(8, 2))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(value)
                            .monospace()
                            .size(theme::FONT_BODY)
                            .color(theme::BG_BASE),
                    );
                });
            if icon_button(ui, icons::CARET_DOWN, 18.0, true).clicked() {
                step = Some(Step::Down);
            }
        });
    });
    step
}

fn action_row<C: Clock>(ui: &mut egui::Ui, picker: &mut DateTimePicker<C>) -> Option<NaiveDateTime> {
    let mut confirmed = None;
    ui.horizontal(|ui| {
        if ui.add(theme::button_ghost("Cancel")).clicked() {
            picker.cancel();
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let set = theme::button_accent("Set").min_size(egui::vec2(64.0, theme::BUTTON_HEIGHT));
            let response = ui.add_enabled(picker.selected_date().is_some(), set);
            if response.clicked() {
                confirmed = picker.confirm();
            }
        });
    });
    confirmed
}
