// crates/chironium-ui/src/helpers/log.rs
//
// File-backed logging for the UI crate. Release builds on Windows run with
// `windows_subsystem = "windows"`, so there is no console and `eprintln!`
// goes nowhere; everything is appended to <temp>/chironium.log instead,
// which works the same in every launch mode.

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Append one timestamped line to the log file. Failures are swallowed —
/// logging is already the fallback path.
pub fn clog(msg: &str) {
    let path = std::env::temp_dir().join("chironium.log");
    let Ok(mut file) = std::fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let ts = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    let _ = writeln!(file, "[{ts}] {msg}");
}

/// `eprintln!`-style formatting routed through [`clog`].
#[macro_export]
macro_rules! chironium_log {
    ($($arg:tt)*) => {
        $crate::helpers::log::clog(&format!($($arg)*))
    };
}
