// crates/chironium-ui/src/launcher.rs
//
// Project launcher, shown whenever the session has no location. Recent
// projects are a fixed demo list — real project persistence is out of
// scope, opening any of them lands on the same embedded catalog.

use chironium_core::commands::WorkbenchCommand;
use egui::{Align, Layout, RichText, Stroke, Ui};

use crate::theme::{ACCENT, DARK_BG_2, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM};

struct RecentProject {
    name:     &'static str,
    modified: &'static str,
    files:    u32,
}

const RECENT: [RecentProject; 3] = [
    RecentProject { name: "Étude_Parc_Naturel_2024", modified: "Il y a 2 jours", files: 16 },
    RecentProject { name: "Inventaire_Chiroptères_Loire", modified: "Il y a 1 semaine", files: 42 },
    RecentProject { name: "Suivi_Migration_Automne", modified: "Il y a 3 semaines", files: 128 },
];

pub struct Launcher {
    search:   String,
    new_name: String,
}

impl Launcher {
    pub fn new() -> Self {
        Self { search: String::new(), new_name: String::new() }
    }

    pub fn ui(&mut self, ui: &mut Ui, cmd: &mut Vec<WorkbenchCommand>) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.label(RichText::new("🦇 Chironium").size(28.0).strong().color(ACCENT));
            ui.label(
                RichText::new("Dépouillement d'enregistrements ultrasonores")
                    .size(12.0)
                    .color(DARK_TEXT_DIM),
            );
            ui.add_space(24.0);
        });

        let panel_w = (ui.available_width() * 0.6).clamp(320.0, 560.0);
        ui.vertical_centered(|ui| {
            ui.set_max_width(panel_w);

            // ── New project ──────────────────────────────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .stroke(Stroke::new(1.0, DARK_BORDER))
                .corner_radius(egui::CornerRadius::same(5))
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    ui.label(RichText::new("Nouveau projet").size(12.0).strong());
                    ui.horizontal(|ui| {
                        let edit = ui.add(
                            egui::TextEdit::singleline(&mut self.new_name)
                                .hint_text("Nom du projet")
                                .desired_width(ui.available_width() - 90.0),
                        );
                        let submit =
                            edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                        let name = self.new_name.trim();
                        if ui.add_enabled(!name.is_empty(), egui::Button::new("Créer")).clicked()
                            || (submit && !name.is_empty())
                        {
                            cmd.push(WorkbenchCommand::OpenProject(name.to_owned()));
                        }
                    });
                });

            ui.add_space(14.0);

            // ── Recent projects ──────────────────────────────────────────────
            ui.horizontal(|ui| {
                ui.label(RichText::new("Projets récents").size(12.0).strong());
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.search)
                            .hint_text("🔍 Rechercher")
                            .desired_width(160.0),
                    );
                });
            });
            ui.add_space(6.0);

            let needle = self.search.to_lowercase();
            let mut shown = 0;
            for project in &RECENT {
                if !needle.is_empty() && !project.name.to_lowercase().contains(&needle) {
                    continue;
                }
                shown += 1;

                let resp = egui::Frame::new()
                    .fill(DARK_BG_2)
                    .stroke(Stroke::new(1.0, DARK_BORDER))
                    .corner_radius(egui::CornerRadius::same(5))
                    .inner_margin(egui::Margin::same(10))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("📁").size(14.0));
                            ui.vertical(|ui| {
                                ui.label(RichText::new(project.name).size(12.0).strong());
                                ui.label(
                                    RichText::new(format!(
                                        "{} · {} fichiers",
                                        project.modified, project.files
                                    ))
                                    .size(9.0)
                                    .color(DARK_TEXT_DIM),
                                );
                            });
                        });
                    })
                    .response;

                let interact = ui.interact(
                    resp.rect,
                    egui::Id::new("recent").with(project.name),
                    egui::Sense::click(),
                );
                if interact.hovered() {
                    ui.painter().rect_stroke(
                        resp.rect,
                        egui::CornerRadius::same(5),
                        Stroke::new(1.0, ACCENT),
                        egui::StrokeKind::Outside,
                    );
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if interact.clicked() {
                    cmd.push(WorkbenchCommand::OpenProject(project.name.to_owned()));
                }
                ui.add_space(6.0);
            }

            if shown == 0 {
                egui::Frame::new()
                    .fill(DARK_BG_3)
                    .corner_radius(egui::CornerRadius::same(5))
                    .inner_margin(egui::Margin::same(10))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(format!("Aucun projet ne correspond à « {} »", self.search))
                                .size(10.0)
                                .color(DARK_TEXT_DIM),
                        );
                    });
            }
        });
    }
}
