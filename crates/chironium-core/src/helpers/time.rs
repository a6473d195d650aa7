// crates/chironium-core/src/helpers/time.rs
//
// Shared time/frequency formatting used by both chironium-ui and the CSV
// export path. Catalog durations are stored as the display strings the
// recorders produce ("5:34"), so the parser here is the single place that
// turns them back into seconds.

/// Parse a catalog duration string (`M:SS` or `H:MM:SS`) into seconds.
///
/// Returns `None` for anything that doesn't look like a clock string —
/// callers fall back to a zero-length file rather than failing.
///
/// ```
/// use chironium_core::helpers::time::parse_clock;
/// assert_eq!(parse_clock("5:34"),    Some(334.0));
/// assert_eq!(parse_clock("8:45"),    Some(525.0));
/// assert_eq!(parse_clock("1:04:35"), Some(3875.0));
/// assert_eq!(parse_clock("n/a"),     None);
/// ```
pub fn parse_clock(s: &str) -> Option<f64> {
    let parts: Vec<&str> = s.split(':').collect();
    let nums: Option<Vec<f64>> = parts.iter().map(|p| p.trim().parse::<f64>().ok()).collect();
    match nums?.as_slice() {
        [m, s] => Some(m * 60.0 + s),
        [h, m, s] => Some(h * 3600.0 + m * 60.0 + s),
        _ => None,
    }
}

/// Format a position in seconds as `M:SS` for the playhead readout.
///
/// ```
/// use chironium_core::helpers::time::format_clock;
/// assert_eq!(format_clock(0.0),   "0:00");
/// assert_eq!(format_clock(334.0), "5:34");
/// ```
pub fn format_clock(secs: f64) -> String {
    let s = secs.max(0.0) as u64;
    format!("{}:{:02}", s / 60, s % 60)
}

/// Format a zone length in seconds as the millisecond label shown in the
/// zones list (`150 ms`). Bat calls live well under a second, so ms is the
/// natural unit.
///
/// ```
/// use chironium_core::helpers::time::format_ms;
/// assert_eq!(format_ms(0.15), "150 ms");
/// assert_eq!(format_ms(0.2),  "200 ms");
/// ```
pub fn format_ms(secs: f64) -> String {
    format!("{} ms", (secs * 1000.0).round() as i64)
}

/// Format a frequency band as the label shown next to each zone
/// (`45-52 kHz`). Bounds are rounded to whole kHz like the field sheets.
///
/// ```
/// use chironium_core::helpers::time::format_freq_range;
/// assert_eq!(format_freq_range(45.3, 52.1), "45-52 kHz");
/// ```
pub fn format_freq_range(low_khz: f32, high_khz: f32) -> String {
    format!("{}-{} kHz", low_khz.round() as i64, high_khz.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_clock_rejects_garbage() {
        assert_eq!(parse_clock(""), None);
        assert_eq!(parse_clock("5"), None);
        assert_eq!(parse_clock("a:bc"), None);
        assert_eq!(parse_clock("1:2:3:4"), None);
    }

    #[test]
    fn clock_round_trip_on_catalog_values() {
        for s in ["5:34", "3:12", "8:45", "2:12"] {
            let secs = parse_clock(s).unwrap();
            assert_eq!(format_clock(secs), s);
        }
    }

    #[test]
    fn ms_rounds_to_whole_milliseconds() {
        assert_eq!(format_ms(0.1504), "150 ms");
        assert_eq!(format_ms(0.0), "0 ms");
    }
}
