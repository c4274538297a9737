//! Chart viewer over a window of daily demo values

use crate::constants::CHART_DAYS;
use crate::theme;
use crate::types::ChartKind;
use crate::ui::components::icon_button;
use chrono::{Datelike, Days, NaiveDate};
use eframe::egui;
use egui_phosphor::regular as icons;

const Y_MAX: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: u32,
}

/// `days` daily points ending at `today`, oldest first. Values are in 0..100
/// and stable for a given date.
pub fn demo_series(today: NaiveDate, days: u64) -> Vec<DataPoint> {
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| {
            let seed = date.num_days_from_ce() as u64;
            let value = (seed.wrapping_mul(2_654_435_761) >> 7) % 100;
            DataPoint {
                date,
                value: value as u32,
            }
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct ChartState {
    pub kind: ChartKind,
    pub from: NaiveDate,
    pub to: NaiveDate,
    data: Vec<DataPoint>,
}

impl ChartState {
    /// Last week selected by default
    pub fn new(today: NaiveDate, kind: ChartKind) -> Self {
        Self {
            kind,
            from: today.checked_sub_days(Days::new(7)).unwrap_or(today),
            to: today,
            data: demo_series(today, CHART_DAYS),
        }
    }

    /// Points with `from <= date <= to`
    pub fn visible(&self) -> Vec<DataPoint> {
        self.data
            .iter()
            .filter(|p| p.date >= self.from && p.date <= self.to)
            .copied()
            .collect()
    }
}

/// Show controls and the chart. Returns true when the chart kind changed.
pub fn chart(ui: &mut egui::Ui, state: &mut ChartState) -> bool {
    let mut kind_changed = false;
    ui.horizontal_wrapped(|ui| {
        let labels: Vec<&str> = ChartKind::ALL.iter().map(|k| k.label()).collect();
        let mut selected = ChartKind::ALL
            .iter()
            .position(|k| *k == state.kind)
            .unwrap_or(0);
        if theme::segmented_toggle(ui, &labels, &mut selected) {
            state.kind = ChartKind::ALL[selected];
            kind_changed = true;
        }
        ui.add_space(theme::SPACING_LG);
        date_stepper(ui, "From:", &mut state.from);
        date_stepper(ui, "To:", &mut state.to);
    });
    ui.add_space(theme::SPACING_MD);

    let points = state.visible();
    let size = egui::vec2(ui.available_width(), theme::CHART_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::hover());

    if points.is_empty() {
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "No data in the selected range",
            egui::FontId::proportional(theme::FONT_BODY),
            theme::TEXT_DIM,
        );
        return kind_changed;
    }

    match state.kind {
        ChartKind::Bar => paint_bars(ui, rect, &points, &response),
        ChartKind::Line => paint_line(ui, rect, &points, &response),
        ChartKind::Pie => paint_pie(ui, rect, &points),
    }
    kind_changed
}

fn date_stepper(ui: &mut egui::Ui, label: &str, date: &mut NaiveDate) {
    ui.label(egui::RichText::new(label).size(theme::FONT_LABEL).color(theme::TEXT_MUTED));
    if icon_button(ui, icons::CARET_LEFT, 20.0, true).clicked() {
        if let Some(prev) = date.pred_opt() {
            *date = prev;
        }
    }
    ui.label(
        egui::RichText::new(date.format("%Y-%m-%d").to_string())
            .monospace()
            .size(theme::FONT_LABEL)
            .color(theme::TEXT_PRIMARY),
    );
    if icon_button(ui, icons::CARET_RIGHT, 20.0, true).clicked() {
        if let Some(next) = date.succ_opt() {
            *date = next;
        }
    }
}

/// Plot area inside `rect` after reserving room for axis labels
fn plot_area(rect: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        rect.min + egui::vec2(32.0, theme::SPACING_MD),
        rect.max - egui::vec2(theme::SPACING_MD, 24.0),
    )
}

fn paint_axes(ui: &egui::Ui, plot: egui::Rect, points: &[DataPoint], slot: f32) {
    let painter = ui.painter();
    let font = egui::FontId::proportional(theme::FONT_CAPTION);

    for tick in [0.0, 25.0, 50.0, 75.0, 100.0] {
        let y = plot.bottom() - plot.height() * tick / Y_MAX;
        painter.line_segment(
            [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            egui::Stroke::new(theme::STROKE_DEFAULT, theme::CHART_GRID),
        );
        painter.text(
            egui::pos2(plot.left() - theme::SPACING_SM, y),
            egui::Align2::RIGHT_CENTER,
            format!("{}", tick as u32),
            font.clone(),
            theme::TEXT_DIM,
        );
    }

    // Skip labels that would overlap
    let every = ((48.0 / slot).ceil() as usize).max(1);
    for (i, point) in points.iter().enumerate().step_by(every) {
        let x = plot.left() + slot * (i as f32 + 0.5);
        painter.text(
            egui::pos2(x, plot.bottom() + theme::SPACING_SM),
            egui::Align2::CENTER_TOP,
            point.date.format("%m-%d").to_string(),
            font.clone(),
            theme::TEXT_DIM,
        );
    }
}

fn value_y(plot: egui::Rect, value: u32) -> f32 {
    plot.bottom() - plot.height() * value as f32 / Y_MAX
}

fn hover_tooltip(response: &egui::Response, plot: egui::Rect, points: &[DataPoint], slot: f32) {
    let Some(pos) = response.hover_pos() else {
        return;
    };
    if !plot.contains(pos) {
        return;
    }
    let index = ((pos.x - plot.left()) / slot) as usize;
    if let Some(point) = points.get(index) {
        response.clone().on_hover_text_at_pointer(format!(
            "{}\nvalue: {}",
            point.date.format("%Y-%m-%d"),
            point.value
        ));
    }
}

fn paint_bars(ui: &egui::Ui, rect: egui::Rect, points: &[DataPoint], response: &egui::Response) {
    let plot = plot_area(rect);
    let slot = plot.width() / points.len() as f32;
    paint_axes(ui, plot, points, slot);

    let painter = ui.painter();
    for (i, point) in points.iter().enumerate() {
        let left = plot.left() + slot * i as f32 + slot * 0.15;
        let bar = egui::Rect::from_min_max(
            egui::pos2(left, value_y(plot, point.value)),
            egui::pos2(left + slot * 0.7, plot.bottom()),
        );
        painter.rect_filled(bar, theme::RADIUS_DEFAULT, theme::CHART_SERIES[0]);
    }
    hover_tooltip(response, plot, points, slot);
}

fn paint_line(ui: &egui::Ui, rect: egui::Rect, points: &[DataPoint], response: &egui::Response) {
    let plot = plot_area(rect);
    let slot = plot.width() / points.len() as f32;
    paint_axes(ui, plot, points, slot);

    let coords: Vec<egui::Pos2> = points
        .iter()
        .enumerate()
        .map(|(i, p)| egui::pos2(plot.left() + slot * (i as f32 + 0.5), value_y(plot, p.value)))
        .collect();

    let painter = ui.painter();
    painter.add(egui::Shape::line(
        coords.clone(),
        egui::Stroke::new(theme::STROKE_THICK, theme::CHART_SERIES[1]),
    ));
    for c in coords {
        painter.circle_filled(c, 3.0, theme::CHART_SERIES[1]);
    }
    hover_tooltip(response, plot, points, slot);
}

fn paint_pie(ui: &egui::Ui, rect: egui::Rect, points: &[DataPoint]) {
    let total: u32 = points.iter().map(|p| p.value).sum();
    let legend_width = 110.0;
    let pie_rect = egui::Rect::from_min_max(rect.min, rect.max - egui::vec2(legend_width, 0.0));
    let center = pie_rect.center();
    let radius = pie_rect.width().min(pie_rect.height()) * 0.35;
    let painter = ui.painter();

    if total == 0 {
        painter.circle_stroke(center, radius, egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_DEFAULT));
        return;
    }

    let mut angle = -std::f32::consts::FRAC_PI_2;
    for (i, point) in points.iter().enumerate() {
        let sweep = std::f32::consts::TAU * point.value as f32 / total as f32;
        let color = theme::CHART_SERIES[i % theme::CHART_SERIES.len()];

        // Fan of thin triangles so large slices stay convex
        let steps = ((sweep / 0.05).ceil() as usize).max(1);
        for s in 0..steps {
            let a0 = angle + sweep * s as f32 / steps as f32;
            let a1 = angle + sweep * (s + 1) as f32 / steps as f32;
            painter.add(egui::Shape::convex_polygon(
                vec![
                    center,
                    center + radius * egui::vec2(a0.cos(), a0.sin()),
                    center + radius * egui::vec2(a1.cos(), a1.sin()),
                ],
                color,
                egui::Stroke::NONE,
            ));
        }

        if point.value > 0 {
            let mid = angle + sweep / 2.0;
            painter.text(
                center + (radius + 14.0) * egui::vec2(mid.cos(), mid.sin()),
                egui::Align2::CENTER_CENTER,
                point.value.to_string(),
                egui::FontId::proportional(theme::FONT_CAPTION),
                theme::TEXT_MUTED,
            );
        }
        angle += sweep;
    }

    // Legend
    let font = egui::FontId::proportional(theme::FONT_CAPTION);
    let mut y = rect.top() + theme::SPACING_MD;
    for (i, point) in points.iter().enumerate() {
        if y > rect.bottom() - 12.0 {
            break;
        }
        let swatch = egui::Rect::from_min_size(egui::pos2(pie_rect.right(), y), egui::vec2(10.0, 10.0));
        painter.rect_filled(swatch, 2.0, theme::CHART_SERIES[i % theme::CHART_SERIES.len()]);
        painter.text(
            egui::pos2(swatch.right() + theme::SPACING_SM, swatch.center().y),
            egui::Align2::LEFT_CENTER,
            point.date.format("%Y-%m-%d").to_string(),
            font.clone(),
            theme::TEXT_SECONDARY,
        );
        y += 14.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn demo_series_ends_today_and_is_stable() {
        let today = ymd(2025, 3, 4);
        let series = demo_series(today, 30);
        assert_eq!(series.len(), 30);
        assert_eq!(series.last().map(|p| p.date), Some(today));
        assert_eq!(series[0].date, ymd(2025, 2, 3));
        assert!(series.iter().all(|p| p.value < 100));
        assert_eq!(series, demo_series(today, 30));
    }

    #[test]
    fn visible_range_is_inclusive() {
        let today = ymd(2025, 3, 4);
        let mut state = ChartState::new(today, ChartKind::Bar);
        let visible = state.visible();
        assert_eq!(visible.len(), 8);
        assert_eq!(visible[0].date, ymd(2025, 2, 25));
        assert_eq!(visible[7].date, today);

        state.from = today;
        assert_eq!(state.visible().len(), 1);

        state.from = today.succ_opt().unwrap();
        assert!(state.visible().is_empty());
    }
}
