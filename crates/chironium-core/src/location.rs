// crates/chironium-core/src/location.rs
//
// The navigable location: which project is open, which pipeline module is
// shown, and optionally which file is active. The location is the single
// source of truth — the active-file projection is derived from it, never
// the other way around.
//
// Route form: /project/<name>/<module>[/<file>]
// mirroring the launcher deep links (`/project/Étude_Parc_Naturel_2024/media`).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five pipeline modules, in pipeline order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    Media,
    Derush,
    Analyse,
    Interpretation,
    Export,
}

impl Module {
    pub const ALL: [Module; 5] = [
        Module::Media,
        Module::Derush,
        Module::Analyse,
        Module::Interpretation,
        Module::Export,
    ];

    /// Route segment; stable, ASCII, lowercase.
    pub fn slug(self) -> &'static str {
        match self {
            Module::Media => "media",
            Module::Derush => "derush",
            Module::Analyse => "analyse",
            Module::Interpretation => "interpretation",
            Module::Export => "export",
        }
    }

    /// Tab label as displayed.
    pub fn label(self) -> &'static str {
        match self {
            Module::Media => "Media",
            Module::Derush => "Derush",
            Module::Analyse => "Analyse",
            Module::Interpretation => "Interprétation",
            Module::Export => "Export",
        }
    }

    pub fn from_slug(s: &str) -> Option<Module> {
        Module::ALL.into_iter().find(|m| m.slug() == s)
    }

    /// Everything except Media works on the active file and is only offered
    /// as a destination once a file is open (or already current).
    pub fn is_secondary(self) -> bool {
        self != Module::Media
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationParseError {
    #[error("route must start with /project/: {0}")]
    BadPrefix(String),
    #[error("project name is empty")]
    EmptyProject,
    #[error("missing module segment")]
    MissingModule,
    #[error("unknown module: {0}")]
    UnknownModule(String),
    #[error("file id segment is empty")]
    EmptyFileId,
    #[error("unexpected trailing segments after file id")]
    TrailingSegments,
}

/// `(project, module, optional file id)` — where the user is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub project: String,
    pub module:  Module,
    pub file_id: Option<String>,
}

impl Location {
    /// Entry location for a freshly opened project.
    pub fn for_project(project: impl Into<String>) -> Self {
        Self { project: project.into(), module: Module::Media, file_id: None }
    }

    /// Parse `/project/<name>/<module>[/<file>]`. Round-trips exactly with
    /// [`Location::to_route`] for every valid tuple (project non-empty and
    /// `/`-free, module one of the five, file id non-empty).
    pub fn parse(route: &str) -> Result<Location, LocationParseError> {
        let rest = route
            .strip_prefix("/project/")
            .ok_or_else(|| LocationParseError::BadPrefix(route.to_owned()))?;

        let mut parts = rest.split('/');
        let project = parts.next().unwrap_or("");
        if project.is_empty() {
            return Err(LocationParseError::EmptyProject);
        }
        let module_seg = parts.next().ok_or(LocationParseError::MissingModule)?;
        if module_seg.is_empty() {
            return Err(LocationParseError::MissingModule);
        }
        let module = Module::from_slug(module_seg)
            .ok_or_else(|| LocationParseError::UnknownModule(module_seg.to_owned()))?;

        let file_id = match parts.next() {
            None => None,
            Some("") => return Err(LocationParseError::EmptyFileId),
            Some(f) => Some(f.to_owned()),
        };
        if parts.next().is_some() {
            return Err(LocationParseError::TrailingSegments);
        }

        Ok(Location { project: project.to_owned(), module, file_id })
    }

    pub fn to_route(&self) -> String {
        match &self.file_id {
            Some(f) => format!("/project/{}/{}/{}", self.project, self.module.slug(), f),
            None => format!("/project/{}/{}", self.project, self.module.slug()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_route() {
        let loc = Location::parse("/project/Suivi_Migration_Automne/media").unwrap();
        assert_eq!(loc.project, "Suivi_Migration_Automne");
        assert_eq!(loc.module, Module::Media);
        assert_eq!(loc.file_id, None);
    }

    #[test]
    fn parse_route_with_file() {
        let loc = Location::parse("/project/demo/derush/16").unwrap();
        assert_eq!(loc.module, Module::Derush);
        assert_eq!(loc.file_id.as_deref(), Some("16"));
    }

    #[test]
    fn round_trip_every_module_with_and_without_file() {
        for module in Module::ALL {
            for file_id in [None, Some("16".to_owned())] {
                let loc = Location { project: "demo".into(), module, file_id };
                assert_eq!(Location::parse(&loc.to_route()).unwrap(), loc);
            }
        }
    }

    #[test]
    fn parse_errors_are_typed() {
        assert!(matches!(
            Location::parse("/projects/x/media"),
            Err(LocationParseError::BadPrefix(_))
        ));
        assert_eq!(Location::parse("/project//media"), Err(LocationParseError::EmptyProject));
        assert_eq!(Location::parse("/project/x"), Err(LocationParseError::MissingModule));
        assert!(matches!(
            Location::parse("/project/x/waveform"),
            Err(LocationParseError::UnknownModule(_))
        ));
        assert_eq!(Location::parse("/project/x/derush/"), Err(LocationParseError::EmptyFileId));
        assert_eq!(
            Location::parse("/project/x/derush/16/extra"),
            Err(LocationParseError::TrailingSegments)
        );
    }

    #[test]
    fn module_slugs_round_trip() {
        for m in Module::ALL {
            assert_eq!(Module::from_slug(m.slug()), Some(m));
        }
        assert_eq!(Module::from_slug("interprétation"), None);
    }
}
