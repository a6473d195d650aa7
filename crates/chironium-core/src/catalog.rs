// crates/chironium-core/src/catalog.rs
//
// The read-only recording catalog: Source → ImportBatch → AudioFile.
// Seed data ships embedded as JSON and is deserialized once at startup.
// Nothing in this slice mutates the catalog — import/delete stay UI stubs.

use serde::{Deserialize, Serialize};

use crate::helpers::time::parse_clock;

/// A physical recording device/site.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Source {
    pub id:        String,
    pub name:      String,
    /// Free text — either a formatted GPS string or a route description.
    pub location:  String,
    pub device_id: String,
    pub latitude:  f64,
    pub longitude: f64,
    pub photo_url: Option<String>,
    pub imports:   Vec<ImportBatch>,
}

/// A dated group of files ingested together from one source.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImportBatch {
    pub id:         String,
    pub name:       String,
    pub date:       String,
    /// Declared count for the whole batch on the recorder; the seed only
    /// carries a sample of the files, so this can exceed `files.len()`.
    pub file_count: u32,
    pub total_size: String,
    pub files:      Vec<AudioFile>,
}

/// A single cataloged recording. Immutable once cataloged.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AudioFile {
    pub id:          String,
    pub name:        String,
    /// Display string as produced by the recorder (`5:34`).
    pub duration:    String,
    pub size:        String,
    pub date:        String,
    pub sample_rate: String,
}

/// Denormalized projection of an [`AudioFile`] joined with its owning
/// source and import batch names. This is a cache of a catalog lookup,
/// never a second source of truth — it is re-derived from the file id
/// whenever the navigation location changes.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveFile {
    pub id:          String,
    pub name:        String,
    pub duration:    String,
    pub size:        String,
    pub date:        String,
    pub sample_rate: String,
    pub source_name: String,
    pub import_name: String,
}

impl ActiveFile {
    /// Duration in seconds, parsed from the catalog display string.
    /// Unparseable strings degrade to 0.0 rather than failing.
    pub fn duration_secs(&self) -> f64 {
        parse_clock(&self.duration).unwrap_or(0.0)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Catalog {
    pub sources: Vec<Source>,
}

impl Catalog {
    /// The embedded survey seed: 3 sources, 6 import batches, 16 files.
    pub fn seed() -> Self {
        serde_json::from_str(include_str!("../assets/catalog.json"))
            .expect("embedded catalog seed is valid JSON")
    }

    /// Look a file up by identifier and join it with its owning source and
    /// batch names. Deterministic, side-effect-free linear search; a miss
    /// is `None`, never an error — callers treat it as "no active file".
    pub fn find_file(&self, id: &str) -> Option<ActiveFile> {
        for source in &self.sources {
            for batch in &source.imports {
                if let Some(file) = batch.files.iter().find(|f| f.id == id) {
                    return Some(ActiveFile {
                        id:          file.id.clone(),
                        name:        file.name.clone(),
                        duration:    file.duration.clone(),
                        size:        file.size.clone(),
                        date:        file.date.clone(),
                        sample_rate: file.sample_rate.clone(),
                        source_name: source.name.clone(),
                        import_name: batch.name.clone(),
                    });
                }
            }
        }
        None
    }

    pub fn find_source(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    /// Declared file total for a source: the sum of the recorders'
    /// per-batch `file_count`, which can exceed the files sampled into the
    /// seed. This is the number the catalog tree displays.
    pub fn source_file_total(&self, source: &Source) -> u32 {
        source.imports.iter().map(|b| b.file_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_loads_and_has_expected_shape() {
        let cat = Catalog::seed();
        assert_eq!(cat.sources.len(), 3);
        let batches: usize = cat.sources.iter().map(|s| s.imports.len()).sum();
        assert_eq!(batches, 6);
        let files: usize = cat
            .sources
            .iter()
            .flat_map(|s| &s.imports)
            .map(|b| b.files.len())
            .sum();
        assert_eq!(files, 16);
    }

    #[test]
    fn file_ids_are_unique_across_the_whole_catalog() {
        let cat = Catalog::seed();
        let mut ids: Vec<&str> = cat
            .sources
            .iter()
            .flat_map(|s| &s.imports)
            .flat_map(|b| &b.files)
            .map(|f| f.id.as_str())
            .collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before, "duplicate file id in seed catalog");
    }

    #[test]
    fn find_file_joins_owner_names() {
        let cat = Catalog::seed();
        let hit = cat.find_file("1").unwrap();
        assert_eq!(hit.name, "session_2024-10-28_site1_0001.wav");
        assert_eq!(hit.source_name, "Forêt Nord - Site 1");
        assert_eq!(hit.import_name, "Octobre 2024 - Semaine 4");
    }

    #[test]
    fn find_file_resolves_the_transect_recording() {
        let cat = Catalog::seed();
        let hit = cat.find_file("16").unwrap();
        assert_eq!(hit.name, "transect_2024-10-25_0001.wav");
        assert_eq!(hit.source_name, "Transect Forestier - Zone Mobile");
        assert_eq!(hit.import_name, "Octobre 2024 - Passage 2");
        assert_eq!(hit.duration_secs(), 525.0);
    }

    #[test]
    fn source_total_is_the_declared_count_not_the_sample() {
        let cat = Catalog::seed();
        for source in &cat.sources {
            let declared: u32 = source.imports.iter().map(|b| b.file_count).sum();
            let sampled: usize = source.imports.iter().map(|b| b.files.len()).sum();
            assert_eq!(cat.source_file_total(source), declared);
            assert!(declared as usize >= sampled);
        }
    }

    #[test]
    fn find_file_miss_is_none_not_panic() {
        let cat = Catalog::seed();
        assert!(cat.find_file("does-not-exist").is_none());
        assert!(cat.find_file("").is_none());
    }

    #[test]
    fn every_seed_id_resolves_exactly_once() {
        let cat = Catalog::seed();
        for n in 1..=16 {
            let id = n.to_string();
            let hit = cat.find_file(&id).expect("seed id must resolve");
            assert_eq!(hit.id, id);
        }
    }
}
