// crates/chironium-ui/src/modules/export.rs
//
// Export module: contact sheet of the active file as semicolon-separated
// CSV (the import convention of French spreadsheet locales). The module
// renders a preview and emits RequestCsvExport; the save dialog and the
// actual write happen in app.rs, outside the UI pass.

use chironium_core::catalog::{ActiveFile, Catalog};
use chironium_core::commands::WorkbenchCommand;
use chironium_core::contacts::ContactLog;
use chironium_core::session::SessionState;
use chironium_core::zones::ZoneStore;
use egui::{Align, Layout, RichText, Ui};

use super::{no_file_placeholder, WorkbenchModule};
use crate::theme::{ACCENT, DARK_BG_0, DARK_BG_2, DARK_TEXT_DIM, OK_GREEN};

const CSV_HEADER: &str =
    "fichier;source;zone;espece;confiance_pct;statut;debut_s;duree_ms;freq_basse_khz;freq_haute_khz;notes";

/// Quote a field when it contains the separator, a quote, or a newline.
fn csv_field(s: &str) -> String {
    if s.contains([';', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_owned()
    }
}

/// Build the contact sheet for one file. One row per contact, joined with
/// its zone's bounds; contacts whose zone disappeared are skipped (the
/// stores drop them together, so this is belt and braces for old sessions).
pub fn build_csv(file: &ActiveFile, zones: &ZoneStore, contacts: &ContactLog) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for contact in contacts.for_file(&file.id) {
        let Some(zone) = zones.get(contact.zone_id) else { continue };
        let status = if contact.validated { "valide" } else { "a_verifier" };
        out.push_str(&format!(
            "{};{};{};{};{};{};{:.3};{:.0};{:.1};{:.1};{}\n",
            csv_field(&file.name),
            csv_field(&file.source_name),
            csv_field(&zone.name),
            csv_field(&contact.species),
            contact.confidence,
            status,
            zone.start,
            zone.duration_secs() * 1000.0,
            zone.freq_low,
            zone.freq_high,
            csv_field(&contact.notes),
        ));
    }
    out
}

pub struct ExportModule;

impl WorkbenchModule for ExportModule {
    fn name(&self) -> &str {
        "Export"
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

        let contact_count = session.contacts.for_file(&file.id).count();
        let csv = build_csv(file, &session.zones, &session.contacts);

        egui::Frame::new()
            .fill(DARK_BG_2)
            .inner_margin(egui::Margin { left: 8, right: 8, top: 6, bottom: 6 })
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("📤 Export CSV").size(12.0).strong());
                    ui.label(
                        RichText::new(format!("{} — {} contacts", file.name, contact_count))
                            .size(10.0)
                            .color(DARK_TEXT_DIM),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let label = RichText::new("💾 Exporter…").size(11.0).color(OK_GREEN);
                        if ui.add_enabled(contact_count > 0, egui::Button::new(label)).clicked() {
                            cmd.push(WorkbenchCommand::RequestCsvExport);
                        }
                    });
                });
            });
        ui.separator();

        if contact_count == 0 {
            ui.add_space(30.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("Rien à exporter.\nValidez des contacts dans l'interprétation.")
                        .size(11.0)
                        .color(DARK_TEXT_DIM),
                );
            });
            return;
        }

        ui.label(RichText::new("Aperçu").size(10.0).color(DARK_TEXT_DIM));
        egui::Frame::new()
            .fill(DARK_BG_0)
            .corner_radius(egui::CornerRadius::same(4))
            .inner_margin(egui::Margin::same(8))
            .show(ui, |ui| {
                egui::ScrollArea::both().show(ui, |ui| {
                    ui.label(RichText::new(&csv).size(9.0).monospace().color(ACCENT));
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chironium_core::catalog::Catalog;

    fn fixture() -> (ActiveFile, ZoneStore, ContactLog) {
        let file = Catalog::seed().find_file("16").unwrap();
        let mut zones = ZoneStore::default();
        zones.create(&file.id, 1.2, 1.35, 45.0, 52.0).unwrap();
        let mut contacts = ContactLog::default();
        contacts.identify_zones(&file.id, zones.zones_for(&file.id));
        (file, zones, contacts)
    }

    #[test]
    fn header_then_one_row_per_contact() {
        let (file, zones, contacts) = fixture();
        let csv = build_csv(&file, &zones, &contacts);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("transect_2024-10-25_0001.wav;"));
        assert!(lines[1].contains(";Zone 1;"));
        // Zone geometry columns.
        assert!(lines[1].contains(";1.200;150;45.0;52.0;"));
    }

    #[test]
    fn status_column_tracks_validation() {
        let (file, zones, mut contacts) = fixture();
        assert!(build_csv(&file, &zones, &contacts).contains(";a_verifier;"));
        let id = contacts.for_file(&file.id).next().unwrap().id;
        contacts.validate(id);
        assert!(build_csv(&file, &zones, &contacts).contains(";valide;"));
    }

    #[test]
    fn fields_with_separator_are_quoted() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a;b"), "\"a;b\"");
        assert_eq!(csv_field("dit \"social\""), "\"dit \"\"social\"\"\"");
        assert_eq!(csv_field("ligne\nsuite"), "\"ligne\nsuite\"");
    }

    #[test]
    fn notes_survive_the_round_trip_quoting() {
        let (file, mut zones, mut contacts) = fixture();
        zones.rename(zones.zones_for(&file.id)[0].id, "Zone; transit");
        let id = contacts.for_file(&file.id).next().unwrap().id;
        contacts.set_notes(id, "cri social; à réécouter");
        let csv = build_csv(&file, &zones, &contacts);
        assert!(csv.contains("\"Zone; transit\""));
        assert!(csv.contains("\"cri social; à réécouter\""));
    }

    #[test]
    fn contact_without_zone_is_skipped() {
        let (file, mut zones, contacts) = fixture();
        let zone_id = zones.zones_for(&file.id)[0].id;
        // Delete the zone directly, bypassing the command path that would
        // also drop the contact.
        zones.delete(zone_id);
        let csv = build_csv(&file, &zones, &contacts);
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn empty_log_yields_header_only() {
        let file = Catalog::seed().find_file("3").unwrap();
        let csv = build_csv(&file, &ZoneStore::default(), &ContactLog::default());
        assert_eq!(csv, format!("{CSV_HEADER}\n"));
    }
}
