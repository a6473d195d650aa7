// crates/chironium-ui/src/modules/derush.rs
//
// Derush module: spectrogram + waveform of the active file, drag to draw
// zones, a zones panel on the right for rename/notes/delete. All edits go
// through commands; the module only holds text-edit buffers and widget
// caches.

use chironium_core::commands::WorkbenchCommand;
use chironium_core::session::SessionState;
use chironium_core::{catalog::Catalog, helpers::time::format_clock};
use egui::{Align, Layout, RichText, Stroke, Ui};
use uuid::Uuid;

use super::{no_file_placeholder, WorkbenchModule};
use crate::theme::{ACCENT, DARK_BG_2, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM, ZONE_ORANGE};
use crate::widgets::spectrogram::SpectrogramView;
use crate::widgets::waveform::WaveformView;

pub struct DerushModule {
    spectrogram: SpectrogramView,
    waveform:    WaveformView,
    /// Edit buffers for the selected zone; re-seeded when selection moves.
    edit_zone:   Option<Uuid>,
    name_buf:    String,
    notes_buf:   String,
}

impl DerushModule {
    pub fn new() -> Self {
        Self {
            spectrogram: SpectrogramView::new(),
            waveform:    WaveformView::new(),
            edit_zone:   None,
            name_buf:    String::new(),
            notes_buf:   String::new(),
        }
    }
}

impl WorkbenchModule for DerushModule {
    fn name(&self) -> &str {
        "Derush"
    }

    fn ui(
        &mut self,
        ui: &mut Ui,
        session: &SessionState,
        _catalog: &Catalog,
        cmd: &mut Vec<WorkbenchCommand>,
    ) {
        let Some(file) = session.active_file.clone() else {
            no_file_placeholder(ui);
            return;
        };

        // ── Hotkeys ──────────────────────────────────────────────────────────
        if ui.input(|i| i.key_pressed(egui::Key::Space)) {
            cmd.push(if session.is_playing { WorkbenchCommand::Pause } else { WorkbenchCommand::Play });
        }
        if ui.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            if let Some(zone) = session.zones.selected_zone(&file.id) {
                if !ui.memory(|m| m.focused().is_some()) {
                    cmd.push(WorkbenchCommand::DeleteZone(zone.id));
                }
            }
        }

        egui::SidePanel::right("derush_zones")
            .resizable(true)
            .default_width(280.0)
            .min_width(220.0)
            .show_inside(ui, |ui| {
                self.zones_panel(ui, session, &file.id, cmd);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            self.toolbar(ui, session, &file, cmd);
            ui.separator();

            let zones = session.zones.zones_for(&file.id);
            let selected = session.zones.selected;

            // Spectrogram takes the room left over after the waveform strip.
            let spectro_h = (ui.available_height() - 100.0).max(200.0);
            egui::ScrollArea::horizontal().show(ui, |ui| {
                ui.set_min_height(spectro_h);
                ui.set_max_height(spectro_h);
                if let Some(sel) = self.spectrogram.ui(
                    ui,
                    &file,
                    zones,
                    selected,
                    session.current_time,
                    session.zoom,
                ) {
                    cmd.push(WorkbenchCommand::CreateZone {
                        start:     sel.start,
                        end:       sel.end,
                        freq_low:  sel.freq_low,
                        freq_high: sel.freq_high,
                    });
                }
            });

            ui.add_space(4.0);
            if let Some(t) = self.waveform.ui(ui, &file, zones, session.current_time) {
                cmd.push(WorkbenchCommand::SetPlayhead(t));
            }
        });
    }
}

impl DerushModule {
    fn toolbar(
        &mut self,
        ui: &mut Ui,
        session: &SessionState,
        file: &chironium_core::catalog::ActiveFile,
        cmd: &mut Vec<WorkbenchCommand>,
    ) {
        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin { left: 8, right: 8, top: 5, bottom: 5 })
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let play_label = if session.is_playing { "⏸ Pause" } else { "▶ Lecture" };
                    if ui.button(RichText::new(play_label).size(11.0)).clicked() {
                        cmd.push(if session.is_playing {
                            WorkbenchCommand::Pause
                        } else {
                            WorkbenchCommand::Play
                        });
                    }

                    ui.label(
                        RichText::new(format!(
                            "{} / {}",
                            format_clock(session.current_time),
                            file.duration
                        ))
                        .size(10.0)
                        .monospace()
                        .color(DARK_TEXT_DIM),
                    );

                    ui.separator();
                    if ui.button(RichText::new("🔍-").size(11.0)).clicked() {
                        cmd.push(WorkbenchCommand::ZoomOut);
                    }
                    ui.label(
                        RichText::new(format!("{:.0} %", session.zoom * 100.0))
                            .size(10.0)
                            .monospace()
                            .color(DARK_TEXT_DIM),
                    );
                    if ui.button(RichText::new("🔍+").size(11.0)).clicked() {
                        cmd.push(WorkbenchCommand::ZoomIn);
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button(RichText::new("✖ Fermer").size(11.0)).clicked() {
                            cmd.push(WorkbenchCommand::CloseFile);
                        }
                        ui.label(RichText::new(&file.name).size(11.0).strong());
                    });
                });
            });
    }

    fn zones_panel(
        &mut self,
        ui: &mut Ui,
        session: &SessionState,
        file_id: &str,
        cmd: &mut Vec<WorkbenchCommand>,
    ) {
        let zones = session.zones.zones_for(file_id);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Zones").size(12.0).strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(RichText::new(format!("{}", zones.len())).size(10.0).color(DARK_TEXT_DIM));
            });
        });
        ui.separator();

        if zones.is_empty() {
            ui.add_space(16.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Glissez sur le spectrogramme\npour créer une zone")
                        .size(10.0)
                        .color(DARK_TEXT_DIM),
                );
            });
            return;
        }

        let mut to_delete: Option<Uuid> = None;

        egui::ScrollArea::vertical().max_height(ui.available_height() * 0.5).show(ui, |ui| {
            for zone in zones {
                let is_sel = session.zones.selected == Some(zone.id);
                let resp = egui::Frame::new()
                    .fill(if is_sel { DARK_BG_3 } else { DARK_BG_2 })
                    .stroke(Stroke::new(1.0, if is_sel { ACCENT } else { DARK_BORDER }))
                    .corner_radius(egui::CornerRadius::same(4))
                    .inner_margin(egui::Margin::same(6))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("◼").size(9.0).color(ZONE_ORANGE));
                            ui.label(RichText::new(&zone.name).size(11.0).strong());
                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                if session.contacts.for_file(file_id).any(|c| c.zone_id == zone.id) {
                                    ui.label(RichText::new("identifiée").size(8.0).color(DARK_TEXT_DIM));
                                }
                            });
                        });
                        ui.label(
                            RichText::new(format!(
                                "{:.2}s · {} · {}",
                                zone.start,
                                zone.duration_label(),
                                zone.frequency_label()
                            ))
                            .size(9.0)
                            .monospace()
                            .color(DARK_TEXT_DIM),
                        );
                    })
                    .response;

                let interact =
                    ui.interact(resp.rect, egui::Id::new("zone_row").with(zone.id), egui::Sense::click());
                if interact.clicked() {
                    cmd.push(WorkbenchCommand::SelectZone(Some(zone.id)));
                    cmd.push(WorkbenchCommand::SetPlayhead(zone.start));
                }
                interact.context_menu(|ui| {
                    if ui.button("🗑 Supprimer la zone").clicked() {
                        to_delete = Some(zone.id);
                        ui.close();
                    }
                });
                ui.add_space(3.0);
            }
        });

        if let Some(id) = to_delete {
            cmd.push(WorkbenchCommand::DeleteZone(id));
        }

        // ── Selected-zone editor ─────────────────────────────────────────────
        if let Some(zone) = session.zones.selected_zone(file_id) {
            if self.edit_zone != Some(zone.id) {
                self.edit_zone = Some(zone.id);
                self.name_buf = zone.name.clone();
                self.notes_buf = zone.notes.clone();
            }

            ui.separator();
            ui.label(RichText::new("Propriétés de la zone").size(11.0).strong());
            ui.add_space(2.0);

            ui.label(RichText::new("Nom").size(9.0).color(DARK_TEXT_DIM));
            if ui.text_edit_singleline(&mut self.name_buf).changed() {
                cmd.push(WorkbenchCommand::RenameZone { id: zone.id, name: self.name_buf.clone() });
            }

            egui::Grid::new("zone_props").num_columns(2).spacing([10.0, 3.0]).show(ui, |ui| {
                ui.label(RichText::new("Début").size(9.0).color(DARK_TEXT_DIM));
                ui.label(RichText::new(format!("{:.2} s", zone.start)).size(9.0).monospace());
                ui.end_row();
                ui.label(RichText::new("Durée").size(9.0).color(DARK_TEXT_DIM));
                ui.label(RichText::new(zone.duration_label()).size(9.0).monospace());
                ui.end_row();
                ui.label(RichText::new("Fréquences").size(9.0).color(DARK_TEXT_DIM));
                ui.label(RichText::new(zone.frequency_label()).size(9.0).monospace());
                ui.end_row();
            });

            ui.label(RichText::new("Notes").size(9.0).color(DARK_TEXT_DIM));
            if ui.text_edit_multiline(&mut self.notes_buf).changed() {
                cmd.push(WorkbenchCommand::AnnotateZone { id: zone.id, notes: self.notes_buf.clone() });
            }

            ui.add_space(4.0);
            if ui.button(RichText::new("🗑 Supprimer").size(10.0)).clicked() {
                cmd.push(WorkbenchCommand::DeleteZone(zone.id));
            }
        } else {
            self.edit_zone = None;
        }
    }
}
