// src/app.rs (chironium-ui)
use std::time::Instant;

use chironium_core::catalog::Catalog;
use chironium_core::commands::WorkbenchCommand;
use chironium_core::location::{Location, Module};
use chironium_core::session::SessionState;
use eframe::egui;
use rfd::FileDialog;
use serde::{Deserialize, Serialize};

use crate::chironium_log;
use crate::launcher::Launcher;
use crate::modules::export::build_csv;
use crate::modules::{
    analysis::AnalysisModule, derush::DerushModule, export::ExportModule,
    interpretation::InterpretationModule, media::MediaModule, WorkbenchModule,
};
use crate::theme::{configure_style, ACCENT, DARK_TEXT_DIM, OK_GREEN};

const STATUS_LINGER_SECS: f64 = 3.0;

#[derive(Serialize, Deserialize)]
struct AppStorage {
    session: SessionState,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct ChironiumApp {
    catalog: Catalog,
    session: SessionState,
    launcher: Launcher,
    // Module panels as concrete types — a typo in a dispatch arm is a compile
    // error instead of a silently blank panel.
    media:          MediaModule,
    derush:         DerushModule,
    analysis:       AnalysisModule,
    interpretation: InterpretationModule,
    export:         ExportModule,
    /// Commands emitted by modules each frame, processed after the UI pass.
    pending_cmds: Vec<WorkbenchCommand>,
    status_since: Option<Instant>,
}

impl ChironiumApp {
    pub fn new(cc: &eframe::CreationContext<'_>, deep_link: Option<Location>) -> Self {
        configure_style(&cc.egui_ctx);
        // Pin to dark mode — prevents egui overwriting the theme on OS
        // light/dark changes.
        cc.egui_ctx.options_mut(|o| {
            o.theme_preference = egui::ThemePreference::Dark;
        });

        let mut session = cc
            .storage
            .and_then(|s| eframe::get_value::<AppStorage>(s, eframe::APP_KEY))
            .map(|d| d.session)
            .unwrap_or_default();

        // A deep link on the command line wins over the restored location.
        if let Some(location) = deep_link {
            session.location = Some(location);
        }

        let catalog = Catalog::seed();
        // The projection is never persisted, so derive it before first paint —
        // this is what makes restored sessions and deep links land on the
        // right file without a trip through the media module.
        session.reconcile(&catalog);

        Self {
            catalog,
            session,
            launcher:       Launcher::new(),
            media:          MediaModule::new(),
            derush:         DerushModule::new(),
            analysis:       AnalysisModule,
            interpretation: InterpretationModule::new(),
            export:         ExportModule,
            pending_cmds:   Vec::new(),
            status_since:   None,
        }
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.session.status = Some(text.into());
        self.status_since = Some(Instant::now());
    }

    fn process_command(&mut self, cmd: WorkbenchCommand) {
        match cmd {
            // ── Project ──────────────────────────────────────────────────────
            WorkbenchCommand::OpenProject(name) => {
                chironium_log!("project opened: {name}");
                self.session.open_project(name);
            }
            WorkbenchCommand::CloseProject => {
                self.session.close_project();
            }
            WorkbenchCommand::SaveProject => {
                self.set_status("Projet enregistré");
            }

            // ── Navigation ───────────────────────────────────────────────────
            WorkbenchCommand::Navigate(module) => {
                self.session.navigate_to(module, None);
            }
            WorkbenchCommand::OpenFile(id) => {
                self.session.open_file(&id, &self.catalog);
            }
            WorkbenchCommand::CloseFile => {
                self.session.clear_selection();
            }

            // ── Playback ─────────────────────────────────────────────────────
            WorkbenchCommand::Play => {
                let total = self.session.active_file.as_ref().map(|f| f.duration_secs()).unwrap_or(0.0);
                if total > 0.0 && self.session.current_time >= total - 0.1 {
                    self.session.current_time = 0.0;
                }
                self.session.is_playing = true;
            }
            WorkbenchCommand::Pause => {
                self.session.is_playing = false;
            }
            WorkbenchCommand::SetPlayhead(t) => {
                self.session.current_time = t.max(0.0);
            }
            WorkbenchCommand::ZoomIn => {
                self.session.zoom = (self.session.zoom * 1.25).min(8.0);
            }
            WorkbenchCommand::ZoomOut => {
                self.session.zoom = (self.session.zoom / 1.25).max(1.0);
            }

            // ── Zones ────────────────────────────────────────────────────────
            WorkbenchCommand::CreateZone { start, end, freq_low, freq_high } => {
                let Some(file_id) = self.session.active_file.as_ref().map(|f| f.id.clone()) else {
                    return;
                };
                match self.session.zones.create(&file_id, start, end, freq_low, freq_high) {
                    Ok(_) => {
                        let n = self.session.zones.zones_for(&file_id).len();
                        self.set_status(format!("Zone créée ({n} au total)"));
                    }
                    Err(e) => {
                        chironium_log!("zone rejected: {e}");
                        self.set_status(format!("Zone refusée : {e}"));
                    }
                }
            }
            WorkbenchCommand::RenameZone { id, name } => {
                self.session.zones.rename(id, name);
            }
            WorkbenchCommand::AnnotateZone { id, notes } => {
                self.session.zones.annotate(id, notes);
            }
            WorkbenchCommand::DeleteZone(id) => {
                self.session.zones.delete(id);
                // A zone's contact has no meaning without its zone.
                self.session.contacts.remove_for_zone(id);
            }
            WorkbenchCommand::SelectZone(id) => {
                self.session.zones.select(id);
            }

            // ── Contacts ─────────────────────────────────────────────────────
            WorkbenchCommand::RunIdentification => {
                let Some(file_id) = self.session.active_file.as_ref().map(|f| f.id.clone()) else {
                    return;
                };
                let zones = self.session.zones.zones_for(&file_id).to_vec();
                let added = self.session.contacts.identify_zones(&file_id, &zones);
                chironium_log!("identification: {added} new contacts on file {file_id}");
                self.set_status(match added {
                    0 => "Identification : aucun nouveau contact".to_owned(),
                    1 => "Identification : 1 nouveau contact".to_owned(),
                    n => format!("Identification : {n} nouveaux contacts"),
                });
                self.session.navigate_to(Module::Interpretation, None);
            }
            WorkbenchCommand::SelectContact(id) => {
                self.session.selected_contact = id;
            }
            WorkbenchCommand::CorrectContact { id, species } => {
                self.session.contacts.set_species(id, species);
            }
            WorkbenchCommand::SetContactNotes { id, notes } => {
                self.session.contacts.set_notes(id, notes);
            }
            WorkbenchCommand::ValidateContact(id) => {
                self.session.contacts.validate(id);
            }
            WorkbenchCommand::RejectContact(id) => {
                self.session.contacts.reject(id);
                if self.session.selected_contact == Some(id) {
                    self.session.selected_contact = None;
                }
            }

            // ── Export / status ──────────────────────────────────────────────
            WorkbenchCommand::RequestCsvExport => {
                self.session.pending_csv_pick = true;
            }
            WorkbenchCommand::ClearStatus => {
                self.session.status = None;
                self.status_since = None;
            }
        }
    }

    // The save dialog ideally belongs in ExportModule since it is purely an
    // export concern, but WorkbenchModule::ui() receives &SessionState, so
    // modules cannot drain pending_csv_pick themselves. Same trade-off as
    // keeping it in the app shell: one writer.
    fn handle_csv_pick(&mut self) {
        if !self.session.pending_csv_pick {
            return;
        }
        self.session.pending_csv_pick = false;

        let Some(file) = self.session.active_file.clone() else { return };
        let stem = file.name.strip_suffix(".wav").unwrap_or(&file.name);
        let default_name = format!("{stem}_contacts.csv");

        let Some(dest) = FileDialog::new()
            .set_file_name(&default_name)
            .add_filter("CSV", &["csv"])
            .save_file()
        else {
            return;
        };

        let csv = build_csv(&file, &self.session.zones, &self.session.contacts);
        match write_csv(&dest, &csv) {
            Ok(()) => {
                chironium_log!("csv exported: {}", dest.display());
                self.set_status(format!("Export réussi : {}", dest.display()));
            }
            Err(e) => {
                chironium_log!("csv export failed: {e:#}");
                self.set_status(format!("Échec de l'export : {e}"));
            }
        }
    }

    fn top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").exact_height(36.0).show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(egui::RichText::new("🦇 Chironium").strong().size(15.0).color(ACCENT));
                ui.separator();

                if let Some(location) = &self.session.location {
                    let project = location.project.clone();
                    ui.menu_button(egui::RichText::new(format!("📁 {project}")).size(12.0), |ui| {
                        if ui.button("💾 Enregistrer le projet").clicked() {
                            self.pending_cmds.push(WorkbenchCommand::SaveProject);
                            ui.close();
                        }
                        if ui.button("🔄 Changer de projet").clicked() {
                            self.pending_cmds.push(WorkbenchCommand::CloseProject);
                            ui.close();
                        }
                        ui.separator();
                        if ui.button("✖ Fermer le projet").clicked() {
                            self.pending_cmds.push(WorkbenchCommand::CloseProject);
                            ui.close();
                        }
                    });
                    ui.separator();
                    self.tab_strip(ui);
                }
            });
        });
    }

    /// Media is always offered; the pipeline tabs appear once a file is
    /// active (or the location already points into them, deep-link case).
    fn tab_strip(&mut self, ui: &mut egui::Ui) {
        let current = self.session.module();

        let media = ui.selectable_label(
            current == Some(Module::Media),
            egui::RichText::new("Media").size(12.0),
        );
        if media.clicked() {
            self.pending_cmds.push(WorkbenchCommand::Navigate(Module::Media));
        }

        if !self.session.secondary_tabs_visible() {
            return;
        }

        if let Some(file) = &self.session.active_file {
            ui.label(
                egui::RichText::new(format!("🎵 {}", crate::helpers::format::ellipsize(&file.name, 28)))
                    .size(10.0)
                    .color(DARK_TEXT_DIM),
            );
        }
        for module in [Module::Derush, Module::Analyse, Module::Interpretation, Module::Export] {
            let tab = ui.selectable_label(
                current == Some(module),
                egui::RichText::new(module.label()).size(12.0),
            );
            if tab.clicked() {
                self.pending_cmds.push(WorkbenchCommand::Navigate(module));
            }
        }
    }

    fn status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").exact_height(24.0).show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(egui::RichText::new("Chironium v1.0").size(10.0).color(DARK_TEXT_DIM));
                ui.separator();
                match &self.session.status {
                    Some(status) => {
                        let label = egui::Label::new(
                            egui::RichText::new(status).size(10.0).color(OK_GREEN),
                        )
                        .sense(egui::Sense::click());
                        // Click to dismiss before the auto-clear kicks in.
                        if ui.add(label).clicked() {
                            self.pending_cmds.push(WorkbenchCommand::ClearStatus);
                        }
                    }
                    None => {
                        ui.label(egui::RichText::new("Prêt").size(10.0).color(DARK_TEXT_DIM));
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let rate = self
                        .session
                        .active_file
                        .as_ref()
                        .map(|f| f.sample_rate.clone())
                        .unwrap_or_else(|| "384 kHz".to_owned());
                    ui.label(
                        egui::RichText::new(format!("Fréquence d'échantillonnage : {rate}"))
                            .size(10.0)
                            .color(DARK_TEXT_DIM),
                    );
                });
            });
        });
    }
}

fn write_csv(dest: &std::path::Path, csv: &str) -> anyhow::Result<()> {
    use anyhow::Context as _;
    std::fs::write(dest, csv).with_context(|| format!("écriture de {}", dest.display()))
}

// ── eframe::App ───────────────────────────────────────────────────────────────

impl eframe::App for ChironiumApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        // Runtime-only fields are #[serde(skip)] on SessionState, so a plain
        // clone is the snapshot.
        eframe::set_value(storage, eframe::APP_KEY, &AppStorage { session: self.session.clone() });
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_csv_pick();

        if self.session.location.is_none() {
            egui::CentralPanel::default().show(ctx, |ui| {
                self.launcher.ui(ui, &mut self.pending_cmds);
            });
        } else {
            self.top_bar(ctx);
            self.status_bar(ctx);

            egui::CentralPanel::default().show(ctx, |ui| {
                let module = self.session.module().unwrap_or(Module::Media);
                let panel: &mut dyn WorkbenchModule = match module {
                    Module::Media => &mut self.media,
                    Module::Derush => &mut self.derush,
                    Module::Analyse => &mut self.analysis,
                    Module::Interpretation => &mut self.interpretation,
                    Module::Export => &mut self.export,
                };
                panel.ui(ui, &self.session, &self.catalog, &mut self.pending_cmds);
            });
        }

        // ── Process commands emitted by modules this frame ────────────────────
        let cmds: Vec<WorkbenchCommand> = self.pending_cmds.drain(..).collect();
        let had_cmds = !cmds.is_empty();
        for cmd in cmds {
            self.process_command(cmd);
        }
        if had_cmds {
            // Location is the source of truth; re-derive the projection after
            // every batch so no command has to remember to do it.
            self.session.reconcile(&self.catalog);
        }

        // Transient status lines fade out on their own.
        if let Some(since) = self.status_since {
            if since.elapsed().as_secs_f64() > STATUS_LINGER_SECS {
                self.session.status = None;
                self.status_since = None;
            } else {
                ctx.request_repaint_after(std::time::Duration::from_millis(250));
            }
        }

        // ── Simulated playback ────────────────────────────────────────────────
        if self.session.is_playing {
            let dt = ctx.input(|i| i.stable_dt as f64);
            self.session.current_time += dt;
            let total = self.session.active_file.as_ref().map(|f| f.duration_secs()).unwrap_or(0.0);
            if total > 0.0 && self.session.current_time >= total {
                self.session.current_time = total;
                self.session.is_playing = false;
            }
            ctx.request_repaint();
        }
    }
}
