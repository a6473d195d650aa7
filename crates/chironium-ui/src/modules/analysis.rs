// crates/chironium-ui/src/modules/analysis.rs
//
// Analysis module: per-zone acoustic parameters (demo values derived from
// the zone bounds) and the FM descent curve. The validate button runs the
// identification pass and moves on to interpretation.

use chironium_core::catalog::Catalog;
use chironium_core::commands::WorkbenchCommand;
use chironium_core::session::SessionState;
use chironium_core::zones::{CallMeasurements, Zone};
use egui::{Align, Align2, FontId, Layout, Pos2, RichText, Sense, Stroke, Ui};
use egui_extras::{Column, TableBuilder};

use super::{no_file_placeholder, WorkbenchModule};
use crate::theme::{ANALYSE_VIOLET, DARK_BG_0, DARK_BG_2, DARK_TEXT_DIM, ZONE_ORANGE};

pub struct AnalysisModule;

impl WorkbenchModule for AnalysisModule {
    fn name(&self) -> &str {
        "Analyse"
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
        let zones = session.zones.zones_for(&file.id);

        // ── Header ──────────────────────────────────────────────────────────
        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin { left: 8, right: 8, top: 6, bottom: 6 })
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("📊 Analyse acoustique").size(12.0).strong());
                    ui.label(RichText::new(&file.name).size(10.0).color(DARK_TEXT_DIM));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let label = RichText::new("✔ Valider et passer à l'interprétation")
                            .size(11.0)
                            .color(ANALYSE_VIOLET);
                        if ui.add_enabled(!zones.is_empty(), egui::Button::new(label)).clicked() {
                            cmd.push(WorkbenchCommand::RunIdentification);
                        }
                    });
                });
            });
        ui.separator();

        if zones.is_empty() {
            ui.add_space(30.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Aucune zone à analyser.\nCréez des zones dans le module Derush.")
                        .size(11.0)
                        .color(DARK_TEXT_DIM),
                );
            });
            return;
        }

        // ── Parameter table ──────────────────────────────────────────────────
        let selected = session.zones.selected;
        TableBuilder::new(ui)
            .striped(true)
            .sense(Sense::click())
            .column(Column::auto().at_least(90.0))
            .column(Column::auto().at_least(70.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::auto().at_least(60.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["Zone", "Durée", "FI", "FT", "Fmax", "Bande passante"] {
                    header.col(|ui| {
                        ui.label(RichText::new(title).size(10.0).strong());
                    });
                }
            })
            .body(|mut body| {
                for zone in zones {
                    let m = CallMeasurements::from_zone(zone);
                    let is_sel = selected == Some(zone.id);
                    body.row(20.0, |mut row| {
                        row.set_selected(is_sel);
                        row.col(|ui| {
                            ui.label(
                                RichText::new(&zone.name)
                                    .size(10.0)
                                    .color(if is_sel { ANALYSE_VIOLET } else { ZONE_ORANGE }),
                            );
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(format!("{:.0} ms", m.duration_ms)).size(10.0).monospace());
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(format!("{:.1} kHz", m.fi_khz)).size(10.0).monospace());
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(format!("{:.1} kHz", m.ft_khz)).size(10.0).monospace());
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(format!("{:.1} kHz", m.fmax_khz)).size(10.0).monospace());
                        });
                        row.col(|ui| {
                            ui.label(RichText::new(format!("{:.1} kHz", m.bandwidth_khz)).size(10.0).monospace());
                        });
                        if row.response().clicked() {
                            cmd.push(WorkbenchCommand::SelectZone(Some(zone.id)));
                        }
                    });
                }
            });

        // ── Descent curve of the selected (or first) zone ────────────────────
        ui.add_space(8.0);
        let zone = session.zones.selected_zone(&file.id).or_else(|| zones.first());
        if let Some(zone) = zone {
            ui.label(
                RichText::new(format!("Courbe de descente FM — {}", zone.name))
                    .size(11.0)
                    .strong(),
            );
            descent_plot(ui, zone);
        }
    }
}

/// Paint the FI → FT sweep of one zone on a small time/frequency canvas.
fn descent_plot(ui: &mut Ui, zone: &Zone) {
    let m = CallMeasurements::from_zone(zone);
    let width = ui.available_width().max(200.0);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 140.0), Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, DARK_BG_0);

    // Pad the band so the curve doesn't hug the edges.
    let f_top = m.fmax_khz + 5.0;
    let f_bot = (m.ft_khz - 5.0).max(0.0);
    let span = (f_top - f_bot).max(1.0);
    let ms_max = m.duration_ms.max(1.0);

    let curve = m.descent_curve(48);
    let points: Vec<Pos2> = curve
        .iter()
        .map(|&(ms, khz)| {
            Pos2::new(
                rect.min.x + 16.0 + (ms / ms_max) as f32 * (rect.width() - 32.0),
                rect.max.y - 14.0 - ((khz - f_bot) / span) * (rect.height() - 28.0),
            )
        })
        .collect();
    painter.add(egui::Shape::line(points, Stroke::new(2.0, ANALYSE_VIOLET)));

    painter.text(
        Pos2::new(rect.min.x + 16.0, rect.min.y + 6.0),
        Align2::LEFT_TOP,
        format!("FI {:.1} kHz", m.fi_khz),
        FontId::monospace(9.0),
        DARK_TEXT_DIM,
    );
    painter.text(
        Pos2::new(rect.max.x - 16.0, rect.max.y - 6.0),
        Align2::RIGHT_BOTTOM,
        format!("FT {:.1} kHz · {:.0} ms", m.ft_khz, m.duration_ms),
        FontId::monospace(9.0),
        DARK_TEXT_DIM,
    );
}
