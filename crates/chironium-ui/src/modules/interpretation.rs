// crates/chironium-ui/src/modules/interpretation.rs
//
// Interpretation module: review the contacts produced by the identification
// pass. List + filter on the left, stats and species rollup below, and a
// detail panel on the right where the operator corrects the species,
// validates, or rejects.

use chironium_core::catalog::Catalog;
use chironium_core::commands::WorkbenchCommand;
use chironium_core::contacts::{Contact, SPECIES};
use chironium_core::session::SessionState;
use egui::{Align, Layout, RichText, Sense, Stroke, Ui};
use uuid::Uuid;

use super::{no_file_placeholder, WorkbenchModule};
use crate::theme::{
    ACCENT, DARK_BG_0, DARK_BG_2, DARK_BG_3, DARK_BORDER, DARK_TEXT_DIM, ERR_RED, OK_GREEN,
    WARN_ORANGE,
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Filter {
    All,
    Validated,
    Pending,
}

impl Filter {
    fn label(self) -> &'static str {
        match self {
            Filter::All => "Tous",
            Filter::Validated => "Validés",
            Filter::Pending => "À vérifier",
        }
    }

    fn keeps(self, contact: &Contact) -> bool {
        match self {
            Filter::All => true,
            Filter::Validated => contact.validated,
            Filter::Pending => !contact.validated,
        }
    }
}

pub struct InterpretationModule {
    filter:     Filter,
    /// Notes buffer for the selected contact, re-seeded on selection change.
    edit_contact: Option<Uuid>,
    notes_buf:    String,
}

impl InterpretationModule {
    pub fn new() -> Self {
        Self { filter: Filter::All, edit_contact: None, notes_buf: String::new() }
    }
}

impl WorkbenchModule for InterpretationModule {
    fn name(&self) -> &str {
        "Interprétation"
    }

    fn ui(
        &mut self,
        ui: &mut Ui,
        session: &SessionState,
        _catalog: &Catalog,
        cmd: &mut Vec<WorkbenchCommand>,
    ) {
        let Some(file) = session.active_file.as_ref() else {
            no_file_placeholder(ui);
            return;
        };

        egui::SidePanel::right("interp_detail")
            .resizable(true)
            .default_width(300.0)
            .min_width(240.0)
            .show_inside(ui, |ui| {
                self.detail_panel(ui, session, cmd);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            // ── Header with filter ───────────────────────────────────────────
            egui::Frame::new()
                .fill(DARK_BG_2)
                .inner_margin(egui::Margin { left: 8, right: 8, top: 6, bottom: 6 })
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("🔎 Contacts").size(12.0).strong());
                        ui.separator();
                        for f in [Filter::All, Filter::Validated, Filter::Pending] {
                            if ui.selectable_label(self.filter == f, RichText::new(f.label()).size(10.0)).clicked() {
                                self.filter = f;
                            }
                        }
                    });
                });
            ui.separator();

            let contacts: Vec<&Contact> =
                session.contacts.for_file(&file.id).filter(|c| self.filter.keeps(c)).collect();

            if session.contacts.for_file(&file.id).next().is_none() {
                ui.add_space(30.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(
                            "Aucun contact.\nLancez l'identification depuis le module Analyse.",
                        )
                        .size(11.0)
                        .color(DARK_TEXT_DIM),
                    );
                });
                return;
            }

            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - 140.0)
                .show(ui, |ui| {
                    for contact in &contacts {
                        self.contact_row(ui, contact, session, cmd);
                    }
                    if contacts.is_empty() {
                        ui.add_space(12.0);
                        ui.vertical_centered(|ui| {
                            ui.label(
                                RichText::new("Aucun contact pour ce filtre")
                                    .size(10.0)
                                    .color(DARK_TEXT_DIM),
                            );
                        });
                    }
                });

            ui.separator();
            stats_strip(ui, session, &file.id);
        });
    }
}

impl InterpretationModule {
    fn contact_row(
        &mut self,
        ui: &mut Ui,
        contact: &Contact,
        session: &SessionState,
        cmd: &mut Vec<WorkbenchCommand>,
    ) {
        let is_sel = session.selected_contact == Some(contact.id);
        let resp = egui::Frame::new()
            .fill(if is_sel { DARK_BG_3 } else { DARK_BG_2 })
            .stroke(Stroke::new(1.0, if is_sel { ACCENT } else { DARK_BORDER }))
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(egui::Margin::same(6))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    let (icon, color) = if contact.validated {
                        ("✔", OK_GREEN)
                    } else {
                        ("…", WARN_ORANGE)
                    };
                    ui.label(RichText::new(icon).size(10.0).color(color));
                    ui.label(RichText::new(&contact.species).size(11.0).strong().italics());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(
                            RichText::new(format!("{} %", contact.confidence))
                                .size(10.0)
                                .monospace()
                                .color(confidence_color(contact.confidence)),
                        );
                        ui.label(RichText::new(&contact.zone_name).size(9.0).color(DARK_TEXT_DIM));
                    });
                });
            })
            .response;

        let interact =
            ui.interact(resp.rect, egui::Id::new("contact_row").with(contact.id), Sense::click());
        if interact.clicked() {
            cmd.push(WorkbenchCommand::SelectContact(Some(contact.id)));
        }
        ui.add_space(3.0);
    }

    fn detail_panel(&mut self, ui: &mut Ui, session: &SessionState, cmd: &mut Vec<WorkbenchCommand>) {
        ui.label(RichText::new("Détail du contact").size(12.0).strong());
        ui.separator();

        let contact = session.selected_contact.and_then(|id| session.contacts.get(id));
        let Some(contact) = contact else {
            self.edit_contact = None;
            ui.add_space(20.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("Sélectionnez un contact").size(10.0).color(DARK_TEXT_DIM));
            });
            return;
        };

        if self.edit_contact != Some(contact.id) {
            self.edit_contact = Some(contact.id);
            self.notes_buf = contact.notes.clone();
        }

        ui.label(RichText::new("Espèce").size(9.0).color(DARK_TEXT_DIM));
        let mut species = contact.species.clone();
        egui::ComboBox::from_id_salt("species_pick")
            .selected_text(RichText::new(&species).italics())
            .width(ui.available_width() - 8.0)
            .show_ui(ui, |ui| {
                for candidate in SPECIES {
                    if ui.selectable_value(&mut species, candidate.to_owned(), candidate).clicked() {
                        cmd.push(WorkbenchCommand::CorrectContact {
                            id: contact.id,
                            species: candidate.to_owned(),
                        });
                    }
                }
            });

        ui.add_space(6.0);
        ui.label(RichText::new("Confiance").size(9.0).color(DARK_TEXT_DIM));
        confidence_bar(ui, contact.confidence);

        ui.add_space(6.0);
        egui::Grid::new("contact_props").num_columns(2).spacing([10.0, 3.0]).show(ui, |ui| {
            ui.label(RichText::new("Zone").size(9.0).color(DARK_TEXT_DIM));
            ui.label(RichText::new(&contact.zone_name).size(9.0));
            ui.end_row();
            ui.label(RichText::new("Statut").size(9.0).color(DARK_TEXT_DIM));
            let (txt, col) = if contact.validated {
                ("validé", OK_GREEN)
            } else {
                ("à vérifier", WARN_ORANGE)
            };
            ui.label(RichText::new(txt).size(9.0).color(col));
            ui.end_row();
        });

        ui.add_space(6.0);
        ui.label(RichText::new("Notes").size(9.0).color(DARK_TEXT_DIM));
        if ui.text_edit_multiline(&mut self.notes_buf).changed() {
            cmd.push(WorkbenchCommand::SetContactNotes {
                id: contact.id,
                notes: self.notes_buf.clone(),
            });
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if !contact.validated
                && ui.button(RichText::new("✔ Valider").size(10.0).color(OK_GREEN)).clicked()
            {
                cmd.push(WorkbenchCommand::ValidateContact(contact.id));
            }
            if ui.button(RichText::new("✖ Rejeter").size(10.0).color(ERR_RED)).clicked() {
                cmd.push(WorkbenchCommand::RejectContact(contact.id));
            }
        });
    }
}

fn confidence_color(pct: u8) -> egui::Color32 {
    if pct >= 80 {
        OK_GREEN
    } else if pct >= 60 {
        WARN_ORANGE
    } else {
        ERR_RED
    }
}

fn confidence_bar(ui: &mut Ui, pct: u8) {
    let width = ui.available_width() - 8.0;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 10.0), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 3.0, DARK_BG_0);
    let mut fill = rect;
    fill.set_width(rect.width() * f32::from(pct) / 100.0);
    painter.rect_filled(fill, 3.0, confidence_color(pct));
    ui.label(RichText::new(format!("{pct} %")).size(9.0).monospace().color(DARK_TEXT_DIM));
}

fn stats_strip(ui: &mut Ui, session: &SessionState, file_id: &str) {
    let stats = session.contacts.stats(file_id);
    ui.horizontal(|ui| {
        stat_cell(ui, "Total", &stats.total.to_string(), ACCENT);
        stat_cell(ui, "Validés", &stats.validated.to_string(), OK_GREEN);
        stat_cell(ui, "En attente", &stats.pending.to_string(), WARN_ORANGE);
        stat_cell(ui, "Confiance moy.", &format!("{} %", stats.mean_confidence), DARK_TEXT_DIM);
    });

    let rollup = session.contacts.species_rollup(file_id);
    if !rollup.is_empty() {
        ui.add_space(4.0);
        ui.label(RichText::new("Espèces détectées").size(10.0).strong());
        for (species, count, mean) in rollup {
            ui.horizontal(|ui| {
                ui.label(RichText::new(species).size(9.0).italics());
                ui.label(
                    RichText::new(format!("×{count} · {mean} %"))
                        .size(9.0)
                        .monospace()
                        .color(DARK_TEXT_DIM),
                );
            });
        }
    }
}

fn stat_cell(ui: &mut Ui, label: &str, value: &str, color: egui::Color32) {
    egui::Frame::new()
        .fill(DARK_BG_2)
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::same(6))
        .show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(value).size(14.0).strong().color(color));
                ui.label(RichText::new(label).size(8.0).color(DARK_TEXT_DIM));
            });
        });
}
