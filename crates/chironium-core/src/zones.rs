// crates/chironium-core/src/zones.rs
//
// Derush zones: user-drawn time/frequency annotation regions on a file.
// The store is session-global, keyed by file id — revisiting a file within
// a session finds its zones again. Only the zone id is guaranteed unique;
// display names may repeat (deleting "Zone 1" never renumbers "Zone 2").

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::helpers::time::{format_freq_range, format_ms};

#[derive(Debug, Error, PartialEq)]
pub enum ZoneBoundsError {
    #[error("fin de zone ({end:.3}s) doit dépasser le début ({start:.3}s)")]
    EmptyTimeRange { start: f64, end: f64 },
    #[error("plafond de fréquence ({high:.1} kHz) doit dépasser le plancher ({low:.1} kHz)")]
    EmptyFrequencyRange { low: f32, high: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id:        Uuid,
    pub name:      String,
    /// Seconds from the start of the file; `start < end` always holds.
    pub start:     f64,
    pub end:       f64,
    /// kHz; `freq_low < freq_high` always holds.
    pub freq_low:  f32,
    pub freq_high: f32,
    #[serde(default)]
    pub notes:     String,
}

impl Zone {
    pub fn duration_secs(&self) -> f64 {
        self.end - self.start
    }

    /// `150 ms` — the zones-list label.
    pub fn duration_label(&self) -> String {
        format_ms(self.duration_secs())
    }

    /// `45-52 kHz` — the zones-list label.
    pub fn frequency_label(&self) -> String {
        format_freq_range(self.freq_low, self.freq_high)
    }
}

/// Demo-grade acoustic parameters derived from a zone's bounds. No real
/// signal analysis happens anywhere in Chironium — these are the display
/// values the analysis table shows, deterministic in the zone geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CallMeasurements {
    pub duration_ms:   f64,
    /// Initial frequency of the sweep, near the top of the band.
    pub fi_khz:        f32,
    /// Terminal frequency, the band floor.
    pub ft_khz:        f32,
    pub fmax_khz:      f32,
    pub bandwidth_khz: f32,
}

impl CallMeasurements {
    pub fn from_zone(zone: &Zone) -> Self {
        let bandwidth = zone.freq_high - zone.freq_low;
        Self {
            duration_ms:   zone.duration_secs() * 1000.0,
            fi_khz:        zone.freq_low + bandwidth * 0.7,
            ft_khz:        zone.freq_low,
            fmax_khz:      zone.freq_high,
            bandwidth_khz: bandwidth,
        }
    }

    /// The FM descent curve painted in the analysis module: `n` points of
    /// (ms offset, kHz), sweeping from FI down to FT with the slight convex
    /// knee typical of pipistrelle calls.
    pub fn descent_curve(&self, n: usize) -> Vec<(f64, f32)> {
        let n = n.max(2);
        (0..n)
            .map(|i| {
                let t = i as f64 / (n - 1) as f64;
                let eased = 1.0 - (1.0 - t) * (1.0 - t);
                let khz = self.fi_khz - (self.fi_khz - self.ft_khz) * eased as f32;
                (t * self.duration_ms, khz)
            })
            .collect()
    }
}

/// All zones of the session, keyed by file id, plus the selected-zone
/// pointer. Mutated only through the command handlers — single writer.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ZoneStore {
    files: HashMap<String, Vec<Zone>>,
    #[serde(default)]
    pub selected: Option<Uuid>,
}

impl ZoneStore {
    /// Zones of one file, in creation order. Empty slice when none exist.
    pub fn zones_for(&self, file_id: &str) -> &[Zone] {
        self.files.get(file_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Validate bounds, append with the auto-numbered default name
    /// ("Zone N", N = current count + 1), and select the new zone.
    /// Zero or negative extents are rejected, not clamped.
    pub fn create(
        &mut self,
        file_id: &str,
        start: f64,
        end: f64,
        freq_low: f32,
        freq_high: f32,
    ) -> Result<Uuid, ZoneBoundsError> {
        if end <= start {
            return Err(ZoneBoundsError::EmptyTimeRange { start, end });
        }
        if freq_high <= freq_low {
            return Err(ZoneBoundsError::EmptyFrequencyRange { low: freq_low, high: freq_high });
        }

        let zones = self.files.entry(file_id.to_owned()).or_default();
        let id = Uuid::new_v4();
        zones.push(Zone {
            id,
            name: format!("Zone {}", zones.len() + 1),
            start,
            end,
            freq_low,
            freq_high,
            notes: String::new(),
        });
        self.selected = Some(id);
        Ok(id)
    }

    /// In-place rename; no-op if the id is unknown.
    pub fn rename(&mut self, id: Uuid, name: impl Into<String>) {
        if let Some(zone) = self.get_mut(id) {
            zone.name = name.into();
        }
    }

    /// In-place notes update; no-op if the id is unknown.
    pub fn annotate(&mut self, id: Uuid, notes: impl Into<String>) {
        if let Some(zone) = self.get_mut(id) {
            zone.notes = notes.into();
        }
    }

    /// Remove a zone. Clears the selected pointer if it pointed there.
    /// Surviving zones keep their names — no renumbering.
    pub fn delete(&mut self, id: Uuid) {
        for zones in self.files.values_mut() {
            zones.retain(|z| z.id != id);
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    pub fn select(&mut self, id: Option<Uuid>) {
        self.selected = id;
    }

    pub fn get(&self, id: Uuid) -> Option<&Zone> {
        self.files.values().flatten().find(|z| z.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut Zone> {
        self.files.values_mut().flatten().find(|z| z.id == id)
    }

    /// The selected zone, but only if it belongs to `file_id` — a stale
    /// pointer from another file reads as "nothing selected".
    pub fn selected_zone(&self, file_id: &str) -> Option<&Zone> {
        let id = self.selected?;
        self.zones_for(file_id).iter().find(|z| z.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_numbers_and_selects() {
        let mut store = ZoneStore::default();
        let a = store.create("16", 1.2, 1.35, 45.0, 52.0).unwrap();
        let zones = store.zones_for("16");
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "Zone 1");
        assert_eq!(zones[0].start, 1.2);
        assert_eq!(zones[0].end, 1.35);
        assert_eq!(store.selected, Some(a));

        store.create("16", 2.8, 3.0, 38.0, 48.0).unwrap();
        assert_eq!(store.zones_for("16")[1].name, "Zone 2");
    }

    #[test]
    fn delete_does_not_renumber_survivors() {
        let mut store = ZoneStore::default();
        let a = store.create("16", 1.2, 1.35, 45.0, 52.0).unwrap();
        store.create("16", 2.8, 3.0, 38.0, 48.0).unwrap();
        store.delete(a);
        let zones = store.zones_for("16");
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].name, "Zone 2");
    }

    #[test]
    fn deleting_selected_zone_clears_pointer() {
        let mut store = ZoneStore::default();
        let a = store.create("16", 1.2, 1.35, 45.0, 52.0).unwrap();
        assert_eq!(store.selected, Some(a));
        store.delete(a);
        assert_eq!(store.selected, None);
    }

    #[test]
    fn zero_length_zone_is_rejected() {
        let mut store = ZoneStore::default();
        assert_eq!(
            store.create("16", 2.0, 2.0, 10.0, 20.0),
            Err(ZoneBoundsError::EmptyTimeRange { start: 2.0, end: 2.0 })
        );
        assert!(store.zones_for("16").is_empty());
    }

    #[test]
    fn zero_height_band_is_rejected() {
        let mut store = ZoneStore::default();
        assert_eq!(
            store.create("16", 1.0, 2.0, 40.0, 40.0),
            Err(ZoneBoundsError::EmptyFrequencyRange { low: 40.0, high: 40.0 })
        );
    }

    #[test]
    fn rename_and_annotate_unknown_id_are_no_ops() {
        let mut store = ZoneStore::default();
        store.create("16", 1.2, 1.35, 45.0, 52.0).unwrap();
        let ghost = Uuid::new_v4();
        store.rename(ghost, "Fantôme");
        store.annotate(ghost, "rien");
        assert_eq!(store.zones_for("16")[0].name, "Zone 1");
        assert!(store.zones_for("16")[0].notes.is_empty());
    }

    #[test]
    fn zones_are_kept_per_file() {
        let mut store = ZoneStore::default();
        store.create("1", 0.5, 0.7, 30.0, 40.0).unwrap();
        store.create("16", 1.2, 1.35, 45.0, 52.0).unwrap();
        assert_eq!(store.zones_for("1").len(), 1);
        assert_eq!(store.zones_for("16").len(), 1);
        // First zone of each file gets the same default name.
        assert_eq!(store.zones_for("1")[0].name, "Zone 1");
        assert_eq!(store.zones_for("16")[0].name, "Zone 1");
        assert!(store.zones_for("2").is_empty());
    }

    #[test]
    fn selected_zone_is_scoped_to_the_file() {
        let mut store = ZoneStore::default();
        let a = store.create("1", 0.5, 0.7, 30.0, 40.0).unwrap();
        assert!(store.selected_zone("1").is_some());
        assert!(store.selected_zone("16").is_none());
        store.select(None);
        assert!(store.selected_zone("1").is_none());
        store.select(Some(a));
        assert_eq!(store.selected_zone("1").map(|z| z.id), Some(a));
    }

    #[test]
    fn labels_match_the_field_sheet_format() {
        let mut store = ZoneStore::default();
        let id = store.create("16", 1.2, 1.35, 45.0, 52.0).unwrap();
        let zone = store.get(id).unwrap();
        assert_eq!(zone.duration_label(), "150 ms");
        assert_eq!(zone.frequency_label(), "45-52 kHz");
    }

    #[test]
    fn measurements_derive_from_bounds() {
        let zone = Zone {
            id: Uuid::new_v4(),
            name: "Zone 1".into(),
            start: 1.2,
            end: 1.35,
            freq_low: 38.5,
            freq_high: 52.1,
            notes: String::new(),
        };
        let m = CallMeasurements::from_zone(&zone);
        assert!((m.duration_ms - 150.0).abs() < 1e-6);
        assert_eq!(m.ft_khz, 38.5);
        assert_eq!(m.fmax_khz, 52.1);
        assert!((m.bandwidth_khz - 13.6).abs() < 1e-4);
        assert!(m.fi_khz > m.ft_khz && m.fi_khz < m.fmax_khz);

        let curve = m.descent_curve(8);
        assert_eq!(curve.len(), 8);
        assert_eq!(curve[0].1, m.fi_khz);
        assert!((curve[7].1 - m.ft_khz).abs() < 1e-4);
        // Monotone descent.
        assert!(curve.windows(2).all(|w| w[1].1 <= w[0].1));
    }
}
