// crates/chironium-ui/src/helpers/format.rs
//
// UI-layer string utilities that don't belong in chironium-core.
// Time/frequency formatting lives in chironium_core::helpers::time — this
// module only holds rendering-side helpers with no meaning off screen.

/// Clip `s` to at most `max_chars` characters, appending "…" when anything
/// was cut so a clipped name is distinguishable from a full one.
///
/// Used by the tab strip and the catalog tree to keep long recorder file
/// names from overflowing fixed-width labels. `max_chars` counts characters,
/// not bytes, so multibyte names never split a codepoint.
pub fn ellipsize(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_owned();
    }
    if max_chars == 0 {
        return String::new();
    }
    // Reserve one slot for the ellipsis itself.
    let keep = max_chars - 1;
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_string_is_unchanged() {
        assert_eq!(ellipsize("hello", 10), "hello");
        assert_eq!(ellipsize("hello", 5), "hello");
    }

    #[test]
    fn clipped_string_ends_with_ellipsis() {
        let out = ellipsize("transect_2024-10-25_0001.wav", 12);
        assert_eq!(out.chars().count(), 12);
        assert!(out.ends_with('…'));
        assert!(out.starts_with("transect_20"));
    }

    #[test]
    fn multibyte_does_not_split_codepoint() {
        assert_eq!(ellipsize("ééééé", 3), "éé…");
        assert_eq!(ellipsize("élan", 10), "élan");
    }

    #[test]
    fn zero_budget_is_empty() {
        assert_eq!(ellipsize("hello", 0), "");
    }
}
