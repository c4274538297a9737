//! Multi-document upload panel: browse or drag-and-drop files into a list

use crate::theme;
use crate::types::Document;
use crate::ui::components::icon_button;
use crate::utils::format_bytes;
use eframe::egui;
use egui_phosphor::regular as icons;
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct DocumentUpload {
    title: String,
    documents: Vec<Document>,
    drag_active: bool,
}

impl DocumentUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    #[cfg(test)]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[cfg(test)]
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Append files picked from disk. Returns how many were added.
    pub fn add_paths(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> usize {
        let before = self.documents.len();
        for path in paths {
            let size = match std::fs::metadata(&path) {
                Ok(meta) => Some(meta.len()),
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Failed to read file metadata");
                    None
                }
            };
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            self.documents.push(Document {
                name,
                path: Some(path),
                size,
            });
        }
        let added = self.documents.len() - before;
        debug!(added, total = self.documents.len(), "Documents added");
        added
    }

    /// Append files dropped onto the window. Files without a path (web or
    /// in-memory drops) keep their name and byte count.
    pub fn add_dropped(&mut self, files: Vec<egui::DroppedFile>) -> usize {
        let mut added = 0;
        for file in files {
            if let Some(path) = file.path {
                added += self.add_paths([path]);
            } else if !file.name.is_empty() {
                self.documents.push(Document {
                    name: file.name,
                    path: None,
                    size: file.bytes.map(|b| b.len() as u64),
                });
                added += 1;
            }
        }
        added
    }

    pub fn remove(&mut self, index: usize) -> Option<Document> {
        if index < self.documents.len() {
            Some(self.documents.remove(index))
        } else {
            None
        }
    }

    /// Discard the pending list and title
    pub fn cancel(&mut self) {
        self.documents.clear();
        self.title.clear();
    }

    /// Hand over the pending documents. Nothing happens when the list is empty.
    pub fn submit(&mut self) -> Option<(String, Vec<Document>)> {
        if self.documents.is_empty() {
            return None;
        }
        let title = std::mem::take(&mut self.title);
        let documents = std::mem::take(&mut self.documents);
        info!(title = %title, count = documents.len(), "Documents submitted");
        Some((title, documents))
    }
}

/// Show the upload panel. Returns submitted documents on the frame "Add Document" is clicked.
pub fn document_upload(
    ui: &mut egui::Ui,
    state: &mut DocumentUpload,
) -> Option<(String, Vec<Document>)> {
    // Window-level drag and drop
    let (hovering, dropped) = ui.ctx().input(|i| {
        (!i.raw.hovered_files.is_empty(), i.raw.dropped_files.clone())
    });
    state.drag_active = hovering;
    if !dropped.is_empty() {
        state.add_dropped(dropped);
    }

    ui.label(
        egui::RichText::new("Add Documents")
            .size(theme::FONT_HEADING)
            .color(theme::TEXT_PRIMARY),
    );
    ui.add_space(theme::SPACING_MD);

    ui.label(
        egui::RichText::new("Document Title")
            .size(theme::FONT_LABEL)
            .color(theme::TEXT_SECONDARY),
    );
    ui.add(
        egui::TextEdit::singleline(&mut state.title)
            .hint_text("TEST DOCUMENT TWO")
            .desired_width(f32::INFINITY),
    );
    ui.add_space(theme::SPACING_LG);

    ui.horizontal(|ui| {
        let browse = theme::button_accent(format!("{}  Browse", icons::FOLDER_OPEN))
            .min_size(egui::vec2(140.0, theme::BUTTON_HEIGHT + 8.0));
        if ui.add(browse).clicked() {
            if let Some(paths) = rfd::FileDialog::new().pick_files() {
                state.add_paths(paths);
            }
        }

        ui.label(egui::RichText::new("OR").strong().color(theme::TEXT_DIM));

        let size = egui::vec2(ui.available_width(), theme::BUTTON_HEIGHT + 8.0);
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        let (fill, border) = if state.drag_active {
            (theme::BG_DROP_ACTIVE, theme::STATUS_SUCCESS)
        } else {
            (egui::Color32::TRANSPARENT, theme::BORDER_DEFAULT)
        };
        let painter = ui.painter();
        painter.rect_filled(rect, theme::RADIUS_MEDIUM, fill);
        painter.rect_stroke(
            rect,
            theme::RADIUS_MEDIUM,
            egui::Stroke::new(theme::STROKE_THICK, border),
            egui::StrokeKind::Inside,
        );
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("{}  Drag and Drop file here", icons::UPLOAD_SIMPLE),
            egui::FontId::proportional(theme::FONT_LABEL),
            theme::TEXT_MUTED,
        );
    });
    ui.add_space(theme::SPACING_LG);

    let mut remove = None;
    for (index, doc) in state.documents.iter().enumerate() {
        egui::Frame::new()
            .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
            .corner_radius(theme::RADIUS_MEDIUM)
            .inner_margin(egui::Margin::symmetric(12, 6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new(icons::FILE).color(theme::TEXT_MUTED));
                    ui.label(
                        egui::RichText::new(&doc.name)
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_SECONDARY),
                    );
                    if let Some(size) = doc.size {
                        ui.label(
                            egui::RichText::new(format_bytes(size))
                                .size(theme::FONT_SMALL)
                                .color(theme::TEXT_DIM),
                        );
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if icon_button(ui, icons::TRASH, 20.0, true).clicked() {
                            remove = Some(index);
                        }
                    });
                });
            });
    }
    if let Some(index) = remove {
        state.remove(index);
    }

    ui.add_space(theme::SPACING_LG);
    let mut submitted = None;
    ui.horizontal(|ui| {
        if ui.add(theme::button("Cancel")).clicked() {
            state.cancel();
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let add = ui.add_enabled(
                !state.documents.is_empty(),
                theme::button_accent("Add Document"),
            );
            if add.clicked() {
                submitted = state.submit();
            }
        });
    });
    submitted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn adds_files_from_disk_with_size() {
        let path = std::env::temp_dir().join(format!("widget-gallery-doc-{}.txt", std::process::id()));
        std::fs::write(&path, b"hello world").unwrap();

        let mut upload = DocumentUpload::new();
        let missing = std::env::temp_dir().join("widget-gallery-does-not-exist.pdf");
        assert_eq!(upload.add_paths([path.clone(), missing]), 2);

        let docs = upload.documents();
        assert_eq!(docs[0].size, Some(11));
        assert_eq!(docs[0].path.as_deref(), Some(path.as_path()));
        assert_eq!(docs[1].name, "widget-gallery-does-not-exist.pdf");
        assert_eq!(docs[1].size, None);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn dropped_files_without_path_keep_name_and_bytes() {
        let mut upload = DocumentUpload::new();
        let dropped = egui::DroppedFile {
            name: "scan.png".to_owned(),
            bytes: Some(Arc::from(vec![0u8; 42])),
            ..Default::default()
        };
        assert_eq!(upload.add_dropped(vec![dropped, egui::DroppedFile::default()]), 1);
        assert_eq!(upload.documents()[0].name, "scan.png");
        assert_eq!(upload.documents()[0].size, Some(42));
    }

    #[test]
    fn remove_submit_and_cancel() {
        let mut upload = DocumentUpload::new();
        assert_eq!(upload.submit(), None);

        upload.add_dropped(
            ["a.pdf", "b.pdf", "c.pdf"]
                .into_iter()
                .map(|name| egui::DroppedFile {
                    name: name.to_owned(),
                    ..Default::default()
                })
                .collect(),
        );
        assert_eq!(upload.remove(1).map(|d| d.name), Some("b.pdf".to_owned()));
        assert_eq!(upload.remove(5), None);

        upload.set_title("Lease");
        let (title, docs) = upload.submit().unwrap();
        assert_eq!(title, "Lease");
        assert_eq!(docs.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(), vec!["a.pdf", "c.pdf"]);
        assert!(upload.documents().is_empty());
        assert_eq!(upload.title(), "");

        upload.add_dropped(vec![egui::DroppedFile {
            name: "d.pdf".to_owned(),
            ..Default::default()
        }]);
        upload.set_title("Draft");
        upload.cancel();
        assert!(upload.documents().is_empty());
        assert_eq!(upload.title(), "");
    }
}
