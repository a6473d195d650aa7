pub mod spectrogram;
pub mod waveform;

/// FNV-1a over a file id. Seeds every synthetic view so the imagery is
/// stable across frames, revisits, and runs — the fake spectrogram of file
/// "16" always looks the same.
pub fn file_seed(file_id: &str) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for b in file_id.bytes() {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::file_seed;

    #[test]
    fn seed_is_stable_and_discriminates() {
        assert_eq!(file_seed("16"), file_seed("16"));
        assert_ne!(file_seed("16"), file_seed("1"));
        assert_ne!(file_seed("1"), file_seed("11"));
    }
}
