// crates/chironium-ui/src/modules/media.rs
//
// Catalog module: the Source → ImportBatch → AudioFile tree on the left,
// a properties panel for the clicked source or file on the right.
// Double-activating a file (double click, or the open button) emits
// OpenFile, which lands the session in derush.

use std::collections::HashSet;

use chironium_core::catalog::{AudioFile, Catalog, Source};
use chironium_core::commands::WorkbenchCommand;
use chironium_core::session::SessionState;
use egui::{Align, Color32, Layout, RichText, Stroke, Ui};

use super::WorkbenchModule;
use crate::helpers::format::ellipsize;
use crate::theme::{ACCENT, DARK_BG_2, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM, OK_GREEN};

/// What the properties panel is showing.
#[derive(Clone, PartialEq)]
enum Inspected {
    Source(String),
    File(String),
}

pub struct MediaModule {
    expanded_sources: HashSet<String>,
    expanded_imports: HashSet<String>,
    inspected:        Option<Inspected>,
}

impl MediaModule {
    pub fn new() -> Self {
        // First source and its first batch start open, like a fresh field
        // laptop with last night's import on top.
        let mut expanded_sources = HashSet::new();
        expanded_sources.insert("source-1".to_owned());
        let mut expanded_imports = HashSet::new();
        expanded_imports.insert("import-1-1".to_owned());
        Self { expanded_sources, expanded_imports, inspected: None }
    }
}

impl WorkbenchModule for MediaModule {
    fn name(&self) -> &str {
        "Media"
    }

    fn ui(
        &mut self,
        ui: &mut Ui,
        session: &SessionState,
        catalog: &Catalog,
        cmd: &mut Vec<WorkbenchCommand>,
    ) {
        egui::SidePanel::right("media_properties")
            .resizable(true)
            .default_width(300.0)
            .min_width(220.0)
            .show_inside(ui, |ui| {
                self.properties_panel(ui, catalog, cmd);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            // ── Header ──────────────────────────────────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .inner_margin(egui::Margin { left: 8, right: 8, top: 6, bottom: 6 })
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("🦇 Sources d'enregistrement").size(12.0).strong());
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            let files: usize = catalog
                                .sources
                                .iter()
                                .flat_map(|s| &s.imports)
                                .map(|b| b.files.len())
                                .sum();
                            ui.label(
                                RichText::new(format!(
                                    "{} sources · {} fichiers",
                                    catalog.sources.len(),
                                    files
                                ))
                                .size(10.0)
                                .color(DARK_TEXT_DIM),
                            );
                        });
                    });
                });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(4.0);
                for source in &catalog.sources {
                    self.source_row(ui, source, catalog, session, cmd);
                }
                ui.add_space(8.0);
            });
        });
    }
}

impl MediaModule {
    fn source_row(
        &mut self,
        ui: &mut Ui,
        source: &Source,
        catalog: &Catalog,
        session: &SessionState,
        cmd: &mut Vec<WorkbenchCommand>,
    ) {
        let open = self.expanded_sources.contains(&source.id);
        let inspected = self.inspected == Some(Inspected::Source(source.id.clone()));

        let resp = egui::Frame::new()
            .fill(if inspected { DARK_BG_3 } else { DARK_BG_2 })
            .stroke(Stroke::new(1.0, if inspected { ACCENT } else { DARK_BORDER }))
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(egui::Margin::same(6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(if open { "▼" } else { "▶" }).size(9.0).color(DARK_TEXT_DIM));
                    ui.label(RichText::new("📡").size(12.0));
                    ui.label(RichText::new(&source.name).size(12.0).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("{} fichiers", catalog.source_file_total(source)))
                                .size(10.0)
                                .color(DARK_TEXT_DIM),
                        );
                    });
                });
                ui.label(RichText::new(&source.location).size(10.0).color(DARK_TEXT_DIM));
            })
            .response;

        let interact = ui.interact(resp.rect, egui::Id::new("source").with(&source.id), egui::Sense::click());
        if interact.clicked() {
            self.inspected = Some(Inspected::Source(source.id.clone()));
            if open {
                self.expanded_sources.remove(&source.id);
            } else {
                self.expanded_sources.insert(source.id.clone());
            }
        }

        if open {
            ui.indent(egui::Id::new("source_children").with(&source.id), |ui| {
                for batch in &source.imports {
                    self.batch_rows(ui, batch, session, cmd);
                }
            });
        }
        ui.add_space(4.0);
    }

    fn batch_rows(
        &mut self,
        ui: &mut Ui,
        batch: &chironium_core::catalog::ImportBatch,
        session: &SessionState,
        cmd: &mut Vec<WorkbenchCommand>,
    ) {
        let open = self.expanded_imports.contains(&batch.id);
        let header = ui.horizontal(|ui| {
            ui.label(RichText::new(if open { "▼" } else { "▶" }).size(9.0).color(DARK_TEXT_DIM));
            ui.label(RichText::new("🗂").size(11.0));
            ui.label(RichText::new(&batch.name).size(11.0));
            ui.label(
                RichText::new(format!("{} · {} fichiers · {}", batch.date, batch.file_count, batch.total_size))
                    .size(9.0)
                    .color(DARK_TEXT_DIM),
            );
        });
        let interact = ui.interact(
            header.response.rect,
            egui::Id::new("batch").with(&batch.id),
            egui::Sense::click(),
        );
        if interact.clicked() {
            if open {
                self.expanded_imports.remove(&batch.id);
            } else {
                self.expanded_imports.insert(batch.id.clone());
            }
        }

        if open {
            ui.indent(egui::Id::new("batch_children").with(&batch.id), |ui| {
                for file in &batch.files {
                    self.file_row(ui, file, session, cmd);
                }
            });
        }
    }

    fn file_row(
        &mut self,
        ui: &mut Ui,
        file: &AudioFile,
        session: &SessionState,
        cmd: &mut Vec<WorkbenchCommand>,
    ) {
        let inspected = self.inspected == Some(Inspected::File(file.id.clone()));
        // A file the session still has open elsewhere shows a dot.
        let is_open = session.active_file.as_ref().map(|f| f.id.as_str()) == Some(file.id.as_str());

        let row = ui.horizontal(|ui| {
            ui.label(RichText::new("🎵").size(10.0));
            let name_color = if inspected { ACCENT } else { Color32::from_rgb(220, 224, 230) };
            ui.label(RichText::new(ellipsize(&file.name, 34)).size(10.0).color(name_color));
            if is_open {
                ui.label(RichText::new("●").size(8.0).color(OK_GREEN));
            }
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("{} · {}", file.duration, file.size))
                        .size(9.0)
                        .color(DARK_TEXT_DIM)
                        .monospace(),
                );
            });
        });
        let interact = ui.interact(
            row.response.rect,
            egui::Id::new("file").with(&file.id),
            egui::Sense::click(),
        );
        if interact.clicked() {
            self.inspected = Some(Inspected::File(file.id.clone()));
        }
        if interact.double_clicked() {
            cmd.push(WorkbenchCommand::OpenFile(file.id.clone()));
        }
    }

    // ── Properties panel ─────────────────────────────────────────────────────

    fn properties_panel(&mut self, ui: &mut Ui, catalog: &Catalog, cmd: &mut Vec<WorkbenchCommand>) {
        ui.label(RichText::new("Propriétés").size(12.0).strong());
        ui.separator();

        match &self.inspected {
            None => {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new("Sélectionnez une source\nou un fichier")
                            .size(10.0)
                            .color(DARK_TEXT_DIM),
                    );
                });
            }
            Some(Inspected::Source(id)) => {
                if let Some(source) = catalog.find_source(id) {
                    source_properties(ui, source, catalog);
                }
            }
            Some(Inspected::File(id)) => {
                if let Some(file) = catalog.find_file(id) {
                    file_properties(ui, &file, cmd);
                }
            }
        }
    }
}

fn source_properties(ui: &mut Ui, source: &Source, catalog: &Catalog) {
    // Device photo when the source carries one (the mobile transect has no
    // fixed installation to photograph).
    if let Some(url) = &source.photo_url {
        ui.add(
            egui::Image::new(url.as_str())
                .max_width(ui.available_width())
                .corner_radius(egui::CornerRadius::same(4)),
        );
        ui.add_space(6.0);
    }

    ui.label(RichText::new(&source.name).size(13.0).strong());
    ui.add_space(4.0);

    egui::Grid::new("source_props").num_columns(2).spacing([10.0, 4.0]).show(ui, |ui| {
        prop(ui, "Appareil", &source.device_id);
        prop(ui, "Localisation", &source.location);
        prop(ui, "GPS", &format!("{:.4}, {:.4}", source.latitude, source.longitude));
        prop(ui, "Imports", &source.imports.len().to_string());
        prop(ui, "Fichiers", &catalog.source_file_total(source).to_string());
    });
}

fn file_properties(ui: &mut Ui, file: &chironium_core::catalog::ActiveFile, cmd: &mut Vec<WorkbenchCommand>) {
    ui.label(RichText::new(&file.name).size(12.0).strong());
    ui.add_space(4.0);

    egui::Grid::new("file_props").num_columns(2).spacing([10.0, 4.0]).show(ui, |ui| {
        prop(ui, "Source", &file.source_name);
        prop(ui, "Import", &file.import_name);
        prop(ui, "Date", &file.date);
        prop(ui, "Durée", &file.duration);
        prop(ui, "Taille", &file.size);
        prop(ui, "Échantillonnage", &file.sample_rate);
    });

    ui.add_space(10.0);
    if ui
        .button(RichText::new("▶ Ouvrir dans Derush").size(11.0).color(ACCENT))
        .clicked()
    {
        cmd.push(WorkbenchCommand::OpenFile(file.id.clone()));
    }
}

fn prop(ui: &mut Ui, key: &str, value: &str) {
    ui.label(RichText::new(key).size(10.0).color(DARK_TEXT_DIM));
    ui.label(RichText::new(value).size(10.0));
    ui.end_row();
}
