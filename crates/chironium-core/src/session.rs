// crates/chironium-core/src/session.rs
//
// The session: one navigable location, the active-file projection derived
// from it, and the zone/contact stores. Serialized through eframe storage;
// the projection is #[serde(skip)] and re-derived on load, which makes
// reconcile() load-bearing at startup, not just on tab switches.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{ActiveFile, Catalog};
use crate::contacts::ContactLog;
use crate::location::{Location, Module};
use crate::zones::ZoneStore;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    /// None = launcher. The single source of truth for "where the user is".
    pub location: Option<Location>,

    /// Display-ready projection of the file named by `location.file_id`.
    /// Cache only — never trusted across a location change, never saved.
    #[serde(skip)]
    pub active_file: Option<ActiveFile>,

    pub zones:    ZoneStore,
    pub contacts: ContactLog,

    /// Interpretation-module pointer; runtime only.
    #[serde(skip)]
    pub selected_contact: Option<Uuid>,

    // ── Simulated playback (runtime only) ───────────────────────────────────
    #[serde(skip)]
    pub is_playing:   bool,
    #[serde(skip)]
    pub current_time: f64,
    #[serde(default = "default_zoom")]
    pub zoom: f32,

    /// Transient status line (zone rejections, CSV results). Cleared by the
    /// app after a few seconds.
    #[serde(skip)]
    pub status: Option<String>,
    /// Set by RequestCsvExport; the app drains it before the next UI pass
    /// and opens the save dialog there (modules only see &SessionState).
    #[serde(skip)]
    pub pending_csv_pick: bool,
}

fn default_zoom() -> f32 {
    1.0
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            location:         None,
            active_file:      None,
            zones:            ZoneStore::default(),
            contacts:         ContactLog::default(),
            selected_contact: None,
            is_playing:       false,
            current_time:     0.0,
            zoom:             1.0,
            status:           None,
            pending_csv_pick: false,
        }
    }
}

impl SessionState {
    pub fn open_project(&mut self, name: impl Into<String>) {
        self.location = Some(Location::for_project(name));
        self.active_file = None;
        self.stop_playback();
    }

    pub fn close_project(&mut self) {
        self.location = None;
        self.active_file = None;
        self.stop_playback();
    }

    pub fn module(&self) -> Option<Module> {
        self.location.as_ref().map(|l| l.module)
    }

    /// Switch module. Media drops the file id (it is the "close the file
    /// context" destination); every other module carries the active file
    /// forward when the caller omits one, so tab switches never silently
    /// lose the open file.
    pub fn navigate_to(&mut self, module: Module, file_id: Option<String>) {
        let carried = file_id.or_else(|| self.active_file.as_ref().map(|f| f.id.clone()));
        let Some(loc) = &mut self.location else { return };
        loc.module = module;
        loc.file_id = if module == Module::Media { None } else { carried };
    }

    /// Double-activation of a catalog file: media → derush with the id.
    /// Unknown ids are ignored — the catalog stays authoritative.
    pub fn open_file(&mut self, id: &str, catalog: &Catalog) {
        if catalog.find_file(id).is_none() {
            return;
        }
        if let Some(loc) = &mut self.location {
            loc.module = Module::Derush;
            loc.file_id = Some(id.to_owned());
        }
        self.reconcile(catalog);
    }

    /// Unset the projection and return to media.
    pub fn clear_selection(&mut self) {
        if let Some(loc) = &mut self.location {
            loc.module = Module::Media;
            loc.file_id = None;
        }
        self.active_file = None;
        self.stop_playback();
    }

    /// One-directional reconciliation: derive the projection from the
    /// location's file id. Idempotent — if the projection already matches,
    /// nothing changes; a lookup miss reads as "no file selected", never an
    /// error. Runs after every command batch and once at startup/deep-link.
    pub fn reconcile(&mut self, catalog: &Catalog) {
        let wanted = self.location.as_ref().and_then(|l| l.file_id.clone());
        match wanted {
            None => {
                // Losing the file context also ends its playback; otherwise
                // a Navigate(Media) during playback leaves the clock running
                // with no file behind it.
                if self.active_file.is_some() || self.is_playing {
                    self.stop_playback();
                }
                self.active_file = None;
            }
            Some(id) => {
                if self.active_file.as_ref().map(|f| f.id.as_str()) != Some(id.as_str()) {
                    self.active_file = catalog.find_file(&id);
                    self.stop_playback();
                }
            }
        }
    }

    /// Secondary tabs are offered when a file is active, or when the
    /// current module is already secondary (a deep link to derush stays
    /// reachable and shows the placeholder while nothing resolves).
    pub fn secondary_tabs_visible(&self) -> bool {
        self.active_file.is_some()
            || self.module().map(Module::is_secondary).unwrap_or(false)
    }

    fn stop_playback(&mut self) {
        self.is_playing = false;
        self.current_time = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbench() -> (SessionState, Catalog) {
        let catalog = Catalog::seed();
        let mut session = SessionState::default();
        session.open_project("Étude_Parc_Naturel_2024");
        (session, catalog)
    }

    #[test]
    fn open_project_lands_on_media_without_file() {
        let (session, _) = workbench();
        let loc = session.location.unwrap();
        assert_eq!(loc.module, Module::Media);
        assert_eq!(loc.file_id, None);
        assert!(session.active_file.is_none());
    }

    #[test]
    fn open_file_goes_to_derush_with_projection() {
        let (mut session, catalog) = workbench();
        session.open_file("16", &catalog);
        assert_eq!(session.module(), Some(Module::Derush));
        let file = session.active_file.as_ref().unwrap();
        assert_eq!(file.name, "transect_2024-10-25_0001.wav");
        assert_eq!(file.source_name, "Transect Forestier - Zone Mobile");
    }

    #[test]
    fn open_unknown_file_is_ignored() {
        let (mut session, catalog) = workbench();
        session.open_file("999", &catalog);
        assert_eq!(session.module(), Some(Module::Media));
        assert!(session.active_file.is_none());
    }

    #[test]
    fn reconcile_is_idempotent() {
        let (mut session, catalog) = workbench();
        session.open_file("3", &catalog);
        let before = session.active_file.clone();
        session.reconcile(&catalog);
        session.reconcile(&catalog);
        assert_eq!(session.active_file, before);
    }

    #[test]
    fn tab_switch_carries_the_active_file_forward() {
        let (mut session, catalog) = workbench();
        session.open_file("5", &catalog);
        session.navigate_to(Module::Analyse, None);
        session.reconcile(&catalog);
        let loc = session.location.as_ref().unwrap();
        assert_eq!(loc.module, Module::Analyse);
        assert_eq!(loc.file_id.as_deref(), Some("5"));
        assert_eq!(session.active_file.as_ref().unwrap().id, "5");
    }

    #[test]
    fn navigating_to_media_drops_the_file() {
        let (mut session, catalog) = workbench();
        session.open_file("5", &catalog);
        session.navigate_to(Module::Media, None);
        session.reconcile(&catalog);
        let loc = session.location.as_ref().unwrap();
        assert_eq!(loc.file_id, None);
        assert!(session.active_file.is_none());
    }

    #[test]
    fn navigating_to_media_during_playback_stops_the_clock() {
        let (mut session, catalog) = workbench();
        session.open_file("16", &catalog);
        session.is_playing = true;
        session.current_time = 42.0;
        session.navigate_to(Module::Media, None);
        session.reconcile(&catalog);
        assert!(session.active_file.is_none());
        assert!(!session.is_playing);
        assert_eq!(session.current_time, 0.0);
    }

    #[test]
    fn external_location_change_rederives_the_projection() {
        let (mut session, catalog) = workbench();
        session.open_file("1", &catalog);
        assert_eq!(session.active_file.as_ref().unwrap().id, "1");

        // Simulate a bookmarked link overwriting the location.
        session.location.as_mut().unwrap().file_id = Some("11".into());
        session.reconcile(&catalog);
        let file = session.active_file.as_ref().unwrap();
        assert_eq!(file.id, "11");
        assert_eq!(file.source_name, "Rivière Sud - Site 2");
    }

    #[test]
    fn deep_link_to_derush_resolves_without_visiting_media() {
        let catalog = Catalog::seed();
        let mut session = SessionState::default();
        session.location =
            Some(Location::parse("/project/Suivi_Migration_Automne/derush/16").unwrap());
        session.reconcile(&catalog);
        let file = session.active_file.as_ref().unwrap();
        assert_eq!(file.name, "transect_2024-10-25_0001.wav");
        assert_eq!(file.source_name, "Transect Forestier - Zone Mobile");
        assert!(session.secondary_tabs_visible());
    }

    #[test]
    fn deep_link_to_missing_file_shows_placeholder_state() {
        let catalog = Catalog::seed();
        let mut session = SessionState::default();
        session.location = Some(Location::parse("/project/demo/derush/999").unwrap());
        session.reconcile(&catalog);
        assert!(session.active_file.is_none());
        // The derush tab stays reachable and shows "no file selected".
        assert!(session.secondary_tabs_visible());
        assert_eq!(session.module(), Some(Module::Derush));
    }

    #[test]
    fn clear_selection_returns_to_media() {
        let (mut session, catalog) = workbench();
        session.open_file("16", &catalog);
        session.is_playing = true;
        session.clear_selection();
        assert_eq!(session.module(), Some(Module::Media));
        assert!(session.active_file.is_none());
        assert!(!session.is_playing);
        assert!(!session.secondary_tabs_visible());
    }

    #[test]
    fn selecting_the_same_file_twice_is_stable() {
        let (mut session, catalog) = workbench();
        session.open_file("7", &catalog);
        let first = session.active_file.clone();
        session.open_file("7", &catalog);
        assert_eq!(session.active_file, first);
    }

    #[test]
    fn navigation_round_trips_through_the_location() {
        let (mut session, catalog) = workbench();
        session.open_file("2", &catalog);
        for module in [Module::Derush, Module::Analyse, Module::Interpretation, Module::Export] {
            session.navigate_to(module, None);
            session.reconcile(&catalog);
            let loc = session.location.as_ref().unwrap();
            assert_eq!(loc.module, module);
            assert_eq!(loc.file_id.as_deref(), Some("2"));
        }
    }
}
