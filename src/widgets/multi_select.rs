//! Multi-select dropdown with search and lazily loaded options

use crate::picker::listener::{ClickAwayListeners, ClickAwaySubscription};
use crate::theme;
use crate::types::{LoadStatus, OptionItem};
use crate::ui::components::{icon_button, removable_chip};
use crate::widgets::clicked_outside;
use eframe::egui;
use egui_phosphor::regular as icons;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Async source of options, called the first time the dropdown opens empty
pub type OptionLoader =
    Arc<dyn Fn() -> BoxFuture<'static, Result<Vec<OptionItem>, String>> + Send + Sync>;

pub const DEFAULT_PLACEHOLDER: &str = "Select options...";

/// Wrap an async fn as an [`OptionLoader`]
pub fn option_loader<F, Fut>(load: F) -> OptionLoader
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<OptionItem>, String>> + Send + 'static,
{
    Arc::new(move || load().boxed())
}

pub struct MultiSelect {
    options: Vec<OptionItem>,
    loader: Option<OptionLoader>,
    load_status: Arc<Mutex<LoadStatus>>,
    load_token: Option<CancellationToken>,
    selected: Vec<OptionItem>,
    search: String,
    placeholder: String,
    searchable: bool,
    clearable: bool,
    disabled: bool,
    listeners: ClickAwayListeners,
    open: Option<ClickAwaySubscription>,
    focus_search: bool,
}

fn set_status(status: &Mutex<LoadStatus>, value: LoadStatus) {
    if let Ok(mut s) = status.lock() {
        *s = value;
    }
}

impl MultiSelect {
    pub fn new(listeners: ClickAwayListeners) -> Self {
        Self {
            options: Vec::new(),
            loader: None,
            load_status: Arc::new(Mutex::new(LoadStatus::Idle)),
            load_token: None,
            selected: Vec::new(),
            search: String::new(),
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            searchable: true,
            clearable: true,
            disabled: false,
            listeners,
            open: None,
            focus_search: false,
        }
    }

    pub fn options(mut self, options: Vec<OptionItem>) -> Self {
        self.options = options;
        self
    }

    pub fn loader(mut self, loader: OptionLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn clearable(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    #[cfg(test)]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.set_disabled(disabled);
        self
    }

    /// Disabling also closes an open list
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn selected(&self) -> &[OptionItem] {
        &self.selected
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status(), LoadStatus::Loading)
    }

    pub fn load_error(&self) -> Option<String> {
        match self.status() {
            LoadStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    fn status(&self) -> LoadStatus {
        self.load_status
            .lock()
            .map(|s| s.clone())
            .unwrap_or(LoadStatus::Idle)
    }

    /// Open the list, starting a background load when no options are known yet
    pub fn open(&mut self, runtime: &tokio::runtime::Handle, ctx: &egui::Context) {
        if self.disabled || self.is_open() {
            return;
        }
        self.open = Some(self.listeners.subscribe("multi_select"));
        self.focus_search = true;
        self.start_load(runtime, ctx);
    }

    /// Close the list. An in-flight load is cancelled and its result discarded.
    pub fn close(&mut self) {
        if let Some(token) = self.load_token.take() {
            // Cancel under the lock so a finishing task either sees the
            // token or has its result reset here
            if let Ok(mut status) = self.load_status.lock() {
                token.cancel();
                if matches!(*status, LoadStatus::Loading | LoadStatus::Loaded(_)) {
                    debug!("Option load cancelled");
                    *status = LoadStatus::Idle;
                }
            } else {
                token.cancel();
            }
        }
        self.open = None;
    }

    pub fn toggle(&mut self, runtime: &tokio::runtime::Handle, ctx: &egui::Context) {
        if self.is_open() {
            self.close();
        } else {
            self.open(runtime, ctx);
        }
    }

    fn start_load(&mut self, runtime: &tokio::runtime::Handle, ctx: &egui::Context) {
        let Some(loader) = self.loader.clone() else {
            return;
        };
        if !self.options.is_empty() || self.is_loading() {
            return;
        }

        set_status(&self.load_status, LoadStatus::Loading);
        let token = CancellationToken::new();
        self.load_token = Some(token.clone());
        let status = self.load_status.clone();
        let ctx = ctx.clone();
        debug!("Loading dropdown options");

        runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                result = loader() => {
                    if let Ok(mut status) = status.lock() {
                        if !token.is_cancelled() {
                            *status = match result {
                                Ok(options) => {
                                    debug!(count = options.len(), "Dropdown options loaded");
                                    LoadStatus::Loaded(options)
                                }
                                Err(e) => {
                                    warn!(error = %e, "Error loading options");
                                    LoadStatus::Failed(e)
                                }
                            };
                        }
                    }
                }
            }
            ctx.request_repaint();
        });
    }

    /// Move finished load results into the option list. Call once per frame.
    pub fn poll(&mut self) {
        let Ok(mut status) = self.load_status.lock() else {
            return;
        };
        if matches!(*status, LoadStatus::Loaded(_)) {
            if let LoadStatus::Loaded(options) = std::mem::replace(&mut *status, LoadStatus::Idle) {
                self.options = options;
            }
            self.load_token = None;
        }
    }

    /// Options matching the search term that are not selected yet
    pub fn filtered(&self) -> Vec<&OptionItem> {
        let needle = self.search.to_lowercase();
        self.options
            .iter()
            .filter(|o| o.label.to_lowercase().contains(&needle))
            .filter(|o| !self.selected.iter().any(|s| s.value == o.value))
            .collect()
    }

    #[cfg(test)]
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Append an option to the selection and reset the search term
    pub fn select(&mut self, value: &str) -> bool {
        if self.disabled || self.selected.iter().any(|s| s.value == value) {
            return false;
        }
        let Some(option) = self.options.iter().find(|o| o.value == value).cloned() else {
            return false;
        };
        self.selected.push(option);
        self.search.clear();
        true
    }

    pub fn remove(&mut self, value: &str) -> bool {
        if self.disabled {
            return false;
        }
        let before = self.selected.len();
        self.selected.retain(|s| s.value != value);
        self.selected.len() != before
    }

    pub fn clear(&mut self) -> bool {
        if self.disabled || self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }
}

/// Show the dropdown. Returns true when the selection changed this frame.
pub fn multi_select(
    ui: &mut egui::Ui,
    id_salt: impl Hash,
    state: &mut MultiSelect,
    runtime: &tokio::runtime::Handle,
) -> bool {
    let id = ui.make_persistent_id(id_salt);
    state.poll();

    let mut changed = false;
    let mut toggle = false;
    let enabled = !state.disabled;

    let trigger = theme::input_frame(state.is_open()).show(ui, |ui| {
        ui.set_width(theme::TRIGGER_WIDTH - 24.0);
        ui.set_min_height(theme::CHIP_HEIGHT + 6.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let caret = if state.is_open() {
                icons::CARET_UP
            } else {
                icons::CARET_DOWN
            };
            if icon_button(ui, caret, 20.0, enabled).clicked() {
                toggle = true;
            }
            if state.clearable
                && !state.selected.is_empty()
                && icon_button(ui, icons::X, 20.0, enabled).clicked()
            {
                changed |= state.clear();
            }

            ui.with_layout(
                egui::Layout::left_to_right(egui::Align::Center).with_main_wrap(true),
                |ui| {
                    ui.spacing_mut().item_spacing = egui::vec2(theme::SPACING_SM, theme::SPACING_SM);
                    if state.selected.is_empty() {
                        let placeholder = ui.add(
                            egui::Label::new(
                                egui::RichText::new(&state.placeholder)
                                    .size(theme::FONT_BODY)
                                    .color(theme::TEXT_DIM),
                            )
                            .sense(egui::Sense::click()),
                        );
                        toggle |= placeholder.clicked() && enabled;
                    } else {
                        let mut removed = None;
                        for item in &state.selected {
                            if removable_chip(ui, &item.label, enabled) {
                                removed = Some(item.value.clone());
                            }
                        }
                        if let Some(value) = removed {
                            changed |= state.remove(&value);
                        }
                    }
                    let rest = ui.available_width().max(0.0);
                    let filler = ui.allocate_response(
                        egui::vec2(rest, theme::CHIP_HEIGHT),
                        egui::Sense::click(),
                    );
                    toggle |= filler.clicked() && enabled;
                },
            );
        });
    });

    if toggle {
        state.toggle(runtime, ui.ctx());
    }

    if !state.is_open() {
        return changed;
    }

    let trigger_rect = trigger.response.rect;
    let popup = egui::Area::new(id.with("options"))
        .order(egui::Order::Foreground)
        .fixed_pos(trigger_rect.left_bottom() + egui::vec2(0.0, theme::SPACING_SM))
        .show(ui.ctx(), |ui| {
            theme::popup_frame()
                .fill(theme::BG_ELEVATED)
                .inner_margin(theme::SPACING_MD)
                .show(ui, |ui| {
                    ui.set_width(trigger_rect.width() - 2.0 * theme::SPACING_MD);

                    if state.searchable {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(icons::MAGNIFYING_GLASS).color(theme::TEXT_DIM));
                            let search = ui.add(
                                egui::TextEdit::singleline(&mut state.search)
                                    .hint_text("Search options...")
                                    .desired_width(f32::INFINITY),
                            );
                            if state.focus_search {
                                search.request_focus();
                                state.focus_search = false;
                            }
                        });
                        ui.separator();
                    }

                    egui::ScrollArea::vertical()
                        .max_height(theme::DROPDOWN_MAX_HEIGHT)
                        .show(ui, |ui| {
                            if state.is_loading() {
                                ui.vertical_centered(|ui| {
                                    ui.spinner();
                                    ui.label(egui::RichText::new("Loading options...").color(theme::TEXT_DIM));
                                });
                                return;
                            }
                            if let Some(error) = state.load_error() {
                                ui.label(
                                    egui::RichText::new(format!("Failed to load options: {}", error))
                                        .color(theme::STATUS_ERROR),
                                );
                                return;
                            }

                            let filtered: Vec<(String, String)> = state
                                .filtered()
                                .into_iter()
                                .map(|o| (o.label.clone(), o.value.clone()))
                                .collect();
                            if filtered.is_empty() {
                                ui.vertical_centered(|ui| {
                                    ui.label(egui::RichText::new("No options available").color(theme::TEXT_DIM));
                                });
                                return;
                            }
                            for (label, value) in filtered {
                                let row = ui.add_sized(
                                    egui::vec2(ui.available_width(), theme::BUTTON_HEIGHT),
                                    egui::Button::new(
                                        egui::RichText::new(label).color(theme::TEXT_SECONDARY),
                                    )
                                    .fill(egui::Color32::TRANSPARENT)
                                    .stroke(egui::Stroke::NONE),
                                );
                                if row.clicked() {
                                    changed |= state.select(&value);
                                }
                            }
                        });
                });
        });

    let dismissed = !toggle
        && state
            .open
            .as_ref()
            .is_some_and(|sub| clicked_outside(sub, ui.ctx(), &[trigger_rect, popup.response.rect]));
    if dismissed {
        state.close();
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn items() -> Vec<OptionItem> {
        vec![
            OptionItem::new("Apartment", "apartment"),
            OptionItem::new("Villa", "villa"),
            OptionItem::new("Office Space", "office_space"),
        ]
    }

    fn wait_for_load(state: &mut MultiSelect) {
        for _ in 0..200 {
            if !state.is_loading() {
                state.poll();
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("load did not finish");
    }

    #[test]
    fn search_is_case_insensitive_and_hides_selected() {
        let mut state = MultiSelect::new(ClickAwayListeners::new()).options(items());
        state.set_search("SPA");
        let labels: Vec<_> = state.filtered().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Office Space"]);

        assert!(state.select("office_space"));
        assert!(state.search.is_empty());
        assert!(!state.select("office_space"));
        let labels: Vec<_> = state.filtered().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Apartment", "Villa"]);
    }

    #[test]
    fn remove_and_clear() {
        let mut state = MultiSelect::new(ClickAwayListeners::new()).options(items());
        state.select("villa");
        state.select("apartment");
        assert_eq!(state.selected().len(), 2);
        assert_eq!(state.selected()[0].value, "villa");

        assert!(state.remove("villa"));
        assert!(!state.remove("villa"));
        assert!(state.clear());
        assert!(!state.clear());
        assert!(state.selected().is_empty());
    }

    #[test]
    fn disabled_dropdown_ignores_interaction() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let listeners = ClickAwayListeners::new();
        let mut state = MultiSelect::new(listeners.clone()).options(items()).disabled(true);
        state.open(runtime.handle(), &egui::Context::default());
        assert!(!state.is_open());
        assert_eq!(listeners.active(), 0);
        assert!(!state.select("villa"));

        state.set_disabled(false);
        state.open(runtime.handle(), &egui::Context::default());
        assert_eq!(listeners.active(), 1);
        state.set_disabled(true);
        assert!(!state.is_open());
        assert_eq!(listeners.active(), 0);
    }

    #[test]
    fn loads_options_on_first_open() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let loader = option_loader(move || {
            *counter.lock().unwrap() += 1;
            async { Ok::<_, String>(items()) }
        });
        let listeners = ClickAwayListeners::new();
        let mut state = MultiSelect::new(listeners.clone()).loader(loader);
        let ctx = egui::Context::default();

        state.open(runtime.handle(), &ctx);
        assert_eq!(listeners.active(), 1);
        wait_for_load(&mut state);
        assert_eq!(state.filtered().len(), 3);

        state.close();
        assert_eq!(listeners.active(), 0);
        state.open(runtime.handle(), &ctx);
        state.close();
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn failed_load_is_reported_and_retried() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let loader = option_loader(move || {
            *counter.lock().unwrap() += 1;
            async { Err::<Vec<OptionItem>, _>("offline".to_string()) }
        });
        let mut state = MultiSelect::new(ClickAwayListeners::new()).loader(loader);
        let ctx = egui::Context::default();

        state.open(runtime.handle(), &ctx);
        wait_for_load(&mut state);
        assert_eq!(state.load_error().as_deref(), Some("offline"));
        assert!(state.filtered().is_empty());
        assert_eq!(*calls.lock().unwrap(), 1);

        state.close();
        state.open(runtime.handle(), &ctx);
        assert!(state.is_loading());
        wait_for_load(&mut state);
        assert_eq!(*calls.lock().unwrap(), 2);
        assert_eq!(state.load_error().as_deref(), Some("offline"));
    }

    #[test]
    fn closing_discards_finished_but_unread_result() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let loader = option_loader(|| async { Ok::<_, String>(items()) });
        let mut state = MultiSelect::new(ClickAwayListeners::new()).loader(loader);
        let ctx = egui::Context::default();

        state.open(runtime.handle(), &ctx);
        for _ in 0..200 {
            if !state.is_loading() {
                break;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(matches!(state.status(), LoadStatus::Loaded(_)));

        state.close();
        state.poll();
        assert_eq!(state.status(), LoadStatus::Idle);
        assert!(state.filtered().is_empty());
    }

    #[test]
    fn closing_cancels_in_flight_load() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let loader = option_loader(|| async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, String>(items())
        });
        let mut state = MultiSelect::new(ClickAwayListeners::new()).loader(loader);
        let ctx = egui::Context::default();

        state.open(runtime.handle(), &ctx);
        assert!(state.is_loading());
        state.close();
        assert!(!state.is_loading());

        std::thread::sleep(Duration::from_millis(250));
        state.poll();
        assert!(state.filtered().is_empty());
        assert_eq!(state.load_error(), None);
    }
}
