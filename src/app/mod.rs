//! App module - application state shared by the demo page

mod loaders;
mod views;

use crate::picker::listener::ClickAwayListeners;
use crate::picker::DateTimePicker;
use crate::settings::Settings;
use crate::theme;
use crate::types::Document;
use crate::widgets::chart::ChartState;
use crate::widgets::document_upload::DocumentUpload;
use crate::widgets::multi_select::MultiSelect;
use chrono::{Days, NaiveDate, NaiveDateTime};
use eframe::egui;
use std::path::PathBuf;
use tracing::{debug, info};

/// Days ahead the picker allows when the range limit is on
pub const PICKER_LIMIT_DAYS: u64 = 30;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    // Widgets
    pub(crate) listeners: ClickAwayListeners,
    pub(crate) picker: DateTimePicker,
    pub(crate) last_confirmed: Option<NaiveDateTime>,
    pub(crate) limit_picker_range: bool,
    pub(crate) property_types: MultiSelect,
    pub(crate) amenities: MultiSelect,
    pub(crate) uploads: DocumentUpload,
    pub(crate) submitted: Vec<(String, Vec<Document>)>,
    pub(crate) chart: ChartState,
    pub(crate) runtime: tokio::runtime::Runtime,
    // Toast notification
    pub(crate) toast_message: Option<String>,
    pub(crate) toast_start: Option<std::time::Instant>,
    pub(crate) central_panel_rect: Option<egui::Rect>,
    // Window shell
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) data_dir: PathBuf,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        settings: Settings,
        data_dir: PathBuf,
        runtime: tokio::runtime::Runtime,
    ) -> Self {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Phosphor icons in the proportional family
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx);

        let listeners = ClickAwayListeners::new();
        let today = chrono::Local::now().date_naive();
        let (min, max) = picker_limit(today, settings.limit_picker_range);
        let mut picker = DateTimePicker::new(listeners.clone())
            .bounds(min, max)
            .on_change(|value| {
                info!(value = %value.format("%Y-%m-%d %H:%M"), "Date and time selected");
            });
        if let Some(value) = settings.last_scheduled {
            debug!(%value, "Seeding picker from last session");
            picker = picker.initial_value(value);
        }
        let property_types = MultiSelect::new(listeners.clone())
            .loader(loaders::property_sub_types())
            .placeholder("Select property sub-types...");
        let amenities = MultiSelect::new(listeners.clone())
            .options(loaders::amenities())
            .placeholder("Select amenities...")
            .searchable(false)
            .clearable(false);
        let chart = ChartState::new(today, settings.chart_kind);

        Self {
            listeners,
            picker,
            last_confirmed: settings.last_scheduled,
            limit_picker_range: settings.limit_picker_range,
            property_types,
            amenities,
            uploads: DocumentUpload::new(),
            submitted: Vec::new(),
            chart,
            runtime,
            toast_message: None,
            toast_start: None,
            central_panel_rect: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            data_dir,
        }
    }

    /// Bound the picker to the next 30 days, or lift the bound
    pub(crate) fn apply_picker_limit(&mut self) {
        let today = self.picker.today();
        let (min, max) = picker_limit(today, self.limit_picker_range);
        self.picker.set_bounds(min, max);
    }

    pub(crate) fn show_toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_start = Some(std::time::Instant::now());
    }

    pub fn save_settings(&self) {
        let settings = Settings {
            window_x: self.window_pos.map(|p| p.x),
            window_y: self.window_pos.map(|p| p.y),
            window_w: self.window_size.map(|s| s.x),
            window_h: self.window_size.map(|s| s.y),
            chart_kind: self.chart.kind,
            limit_picker_range: self.limit_picker_range,
            last_scheduled: self.last_confirmed,
        };
        settings.save(&self.data_dir);
    }
}

fn picker_limit(today: NaiveDate, enabled: bool) -> (Option<NaiveDate>, Option<NaiveDate>) {
    if enabled {
        (Some(today), today.checked_add_days(Days::new(PICKER_LIMIT_DAYS)))
    } else {
        (None, None)
    }
}
