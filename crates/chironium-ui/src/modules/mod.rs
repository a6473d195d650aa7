// crates/chironium-ui/src/modules/mod.rs
//
// Module registry. To add a new pipeline stage:
//   1. Create modules/mystage.rs implementing WorkbenchModule
//   2. Add `pub mod mystage;` below
//   3. Add a Module variant in chironium-core and a dispatch arm in app.rs

pub mod analysis;
pub mod derush;
pub mod export;
pub mod interpretation;
pub mod media;

use chironium_core::catalog::Catalog;
use chironium_core::commands::WorkbenchCommand;
use chironium_core::session::SessionState;
use egui::Ui;

/// Every pipeline module implements this trait.
/// Modules read session + catalog and emit commands — they never mutate
/// state directly; app.rs processes the commands after the UI pass.
pub trait WorkbenchModule {
    fn name(&self) -> &str;
    fn ui(
        &mut self,
        ui: &mut Ui,
        session: &SessionState,
        catalog: &Catalog,
        cmd: &mut Vec<WorkbenchCommand>,
    );
}

/// Centered placeholder for secondary modules reached with no active file
/// (deep link to a file that didn't resolve, for instance). A state, not
/// an error.
pub fn no_file_placeholder(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.4);
        ui.label(
            egui::RichText::new("Aucun fichier sélectionné")
                .size(14.0)
                .color(crate::theme::DARK_TEXT_DIM),
        );
        ui.label(
            egui::RichText::new("Ouvrez un enregistrement depuis le module Media")
                .size(11.0)
                .color(crate::theme::DARK_TEXT_DIM),
        );
    });
}
