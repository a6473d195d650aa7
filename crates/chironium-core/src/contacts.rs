// crates/chironium-core/src/contacts.rs
//
// Contacts: per-zone species identifications reviewed in the interpretation
// module. The classifier is a deterministic demo — same non-goal class as
// the synthetic spectrogram, it produces stable plausible values from the
// zone geometry, not from any real inference.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::zones::Zone;

/// Taxa offered by the demo classifier. The last entry is the fallback for
/// low-confidence contacts.
pub const SPECIES: [&str; 7] = [
    "Pipistrellus pipistrellus",
    "Pipistrellus kuhlii",
    "Nyctalus leisleri",
    "Myotis daubentonii",
    "Eptesicus serotinus",
    "Barbastella barbastellus",
    "Non identifié",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id:         Uuid,
    pub file_id:    String,
    pub zone_id:    Uuid,
    /// Zone name at identification time; kept for display even if the zone
    /// is later renamed.
    pub zone_name:  String,
    pub species:    String,
    /// Percent, 0–100.
    pub confidence: u8,
    pub validated:  bool,
    #[serde(default)]
    pub notes:      String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContactStats {
    pub total:           usize,
    pub validated:       usize,
    pub pending:         usize,
    pub mean_confidence: u8,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ContactLog {
    contacts: Vec<Contact>,
}

// FNV-1a over the file id and zone id, so the demo classifier gives the
// same answer for the same zone on every run and every revisit.
fn demo_seed(file_id: &str, zone: &Zone) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for b in file_id.bytes().chain(zone.id.as_bytes().iter().copied()) {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    h
}

impl ContactLog {
    /// Classify one zone. Pure function of (file id, zone id, zone bounds):
    /// the species leans on the band floor the way field keys do (pipistrelle
    /// bands sit in the 35–55 kHz range, Nyctalus lower), the confidence on
    /// the hash, and short low-confidence contacts fall back to "Non identifié".
    pub fn classify(file_id: &str, zone: &Zone) -> Contact {
        let mut h = demo_seed(file_id, zone);
        let mut next = move || {
            // splitmix64 step — cheap, deterministic stream from the seed
            h = h.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = h;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        };

        let confidence = 55 + (next() % 41) as u8; // 55–95 %
        let species = if confidence < 60 {
            SPECIES[6]
        } else if zone.freq_low >= 50.0 {
            SPECIES[3] // Myotis, high and quiet
        } else if zone.freq_low >= 42.0 {
            SPECIES[0]
        } else if zone.freq_low >= 36.0 {
            SPECIES[1]
        } else if zone.freq_low >= 28.0 {
            SPECIES[4]
        } else {
            SPECIES[2]
        };

        Contact {
            id:         Uuid::new_v4(),
            file_id:    file_id.to_owned(),
            zone_id:    zone.id,
            zone_name:  zone.name.clone(),
            species:    species.to_owned(),
            confidence,
            validated:  false,
            notes:      String::new(),
        }
    }

    /// Run the classifier over every zone of `file_id` that has no contact
    /// yet. Returns how many contacts were added. Existing contacts are
    /// never overwritten — re-running identification is idempotent.
    pub fn identify_zones(&mut self, file_id: &str, zones: &[Zone]) -> usize {
        let mut added = 0;
        for zone in zones {
            if self.contacts.iter().any(|c| c.zone_id == zone.id) {
                continue;
            }
            self.contacts.push(Self::classify(file_id, zone));
            added += 1;
        }
        added
    }

    pub fn for_file<'a>(&'a self, file_id: &'a str) -> impl Iterator<Item = &'a Contact> {
        self.contacts.iter().filter(move |c| c.file_id == file_id)
    }

    pub fn get(&self, id: Uuid) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut Contact> {
        self.contacts.iter_mut().find(|c| c.id == id)
    }

    /// Correcting the species marks the contact as reviewed.
    pub fn set_species(&mut self, id: Uuid, species: impl Into<String>) {
        if let Some(c) = self.get_mut(id) {
            c.species = species.into();
            c.validated = true;
        }
    }

    pub fn set_notes(&mut self, id: Uuid, notes: impl Into<String>) {
        if let Some(c) = self.get_mut(id) {
            c.notes = notes.into();
        }
    }

    pub fn validate(&mut self, id: Uuid) {
        if let Some(c) = self.get_mut(id) {
            c.validated = true;
        }
    }

    /// Rejecting removes the contact; the zone stays and can be
    /// re-identified on the next pass.
    pub fn reject(&mut self, id: Uuid) {
        self.contacts.retain(|c| c.id != id);
    }

    /// Drop the contact tied to a deleted zone.
    pub fn remove_for_zone(&mut self, zone_id: Uuid) {
        self.contacts.retain(|c| c.zone_id != zone_id);
    }

    pub fn stats(&self, file_id: &str) -> ContactStats {
        let contacts: Vec<&Contact> = self.for_file(file_id).collect();
        let total = contacts.len();
        let validated = contacts.iter().filter(|c| c.validated).count();
        let mean_confidence = if total == 0 {
            0
        } else {
            (contacts.iter().map(|c| u32::from(c.confidence)).sum::<u32>() / total as u32) as u8
        };
        ContactStats { total, validated, pending: total - validated, mean_confidence }
    }

    /// Species rollup for a file: (species, contact count, mean confidence),
    /// in order of first appearance.
    pub fn species_rollup(&self, file_id: &str) -> Vec<(String, usize, u8)> {
        let mut rollup: Vec<(String, usize, u32)> = Vec::new();
        for contact in self.for_file(file_id) {
            match rollup.iter_mut().find(|(s, _, _)| *s == contact.species) {
                Some((_, n, sum)) => {
                    *n += 1;
                    *sum += u32::from(contact.confidence);
                }
                None => rollup.push((contact.species.clone(), 1, u32::from(contact.confidence))),
            }
        }
        rollup
            .into_iter()
            .map(|(s, n, sum)| (s, n, (sum / n as u32) as u8))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(start: f64, end: f64, low: f32, high: f32) -> Zone {
        Zone {
            id: Uuid::new_v4(),
            name: "Zone 1".into(),
            start,
            end,
            freq_low: low,
            freq_high: high,
            notes: String::new(),
        }
    }

    #[test]
    fn classifier_is_deterministic() {
        let z = zone(1.2, 1.35, 45.0, 52.0);
        let a = ContactLog::classify("16", &z);
        let b = ContactLog::classify("16", &z);
        assert_eq!(a.species, b.species);
        assert_eq!(a.confidence, b.confidence);
        assert!((55..=95).contains(&a.confidence));
        assert!(SPECIES.contains(&a.species.as_str()));
    }

    #[test]
    fn identify_is_idempotent_per_zone() {
        let mut log = ContactLog::default();
        let zones = vec![zone(1.2, 1.35, 45.0, 52.0), zone(2.8, 3.0, 38.0, 48.0)];
        assert_eq!(log.identify_zones("16", &zones), 2);
        assert_eq!(log.identify_zones("16", &zones), 0);
        assert_eq!(log.for_file("16").count(), 2);
    }

    #[test]
    fn stats_count_validated_and_pending() {
        let mut log = ContactLog::default();
        let zones = vec![zone(1.2, 1.35, 45.0, 52.0), zone(2.8, 3.0, 38.0, 48.0)];
        log.identify_zones("16", &zones);
        let first = log.for_file("16").next().unwrap().id;
        log.validate(first);

        let stats = log.stats("16");
        assert_eq!(stats.total, 2);
        assert_eq!(stats.validated, 1);
        assert_eq!(stats.pending, 1);
        assert!(stats.mean_confidence >= 55);

        // Stats are per file — another file's log is empty.
        assert_eq!(log.stats("1").total, 0);
        assert_eq!(log.stats("1").mean_confidence, 0);
    }

    #[test]
    fn correcting_species_marks_reviewed() {
        let mut log = ContactLog::default();
        log.identify_zones("16", &[zone(1.2, 1.35, 45.0, 52.0)]);
        let id = log.for_file("16").next().unwrap().id;
        log.set_species(id, "Pipistrellus kuhlii");
        let c = log.get(id).unwrap();
        assert_eq!(c.species, "Pipistrellus kuhlii");
        assert!(c.validated);
    }

    #[test]
    fn reject_removes_and_allows_reidentification() {
        let mut log = ContactLog::default();
        let zones = vec![zone(1.2, 1.35, 45.0, 52.0)];
        log.identify_zones("16", &zones);
        let id = log.for_file("16").next().unwrap().id;
        log.reject(id);
        assert_eq!(log.for_file("16").count(), 0);
        assert_eq!(log.identify_zones("16", &zones), 1);
    }

    #[test]
    fn deleting_a_zone_drops_its_contact() {
        let mut log = ContactLog::default();
        let z = zone(1.2, 1.35, 45.0, 52.0);
        log.identify_zones("16", std::slice::from_ref(&z));
        log.remove_for_zone(z.id);
        assert_eq!(log.for_file("16").count(), 0);
    }

    #[test]
    fn rollup_groups_by_species() {
        let mut log = ContactLog::default();
        // Same band floor → same species, deterministically.
        let zones = vec![zone(1.0, 1.1, 45.0, 52.0), zone(2.0, 2.1, 45.0, 51.0)];
        log.identify_zones("16", &zones);
        let rollup = log.species_rollup("16");
        let total: usize = rollup.iter().map(|(_, n, _)| n).sum();
        assert_eq!(total, 2);
        assert!(!rollup.is_empty());
    }
}
