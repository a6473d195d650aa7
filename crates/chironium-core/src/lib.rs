// crates/chironium-core/src/lib.rs
//
// Pure survey data and session state — no egui, no I/O beyond the embedded
// seed catalog. Everything the UI crate renders lives here as plain data.

pub mod catalog;
pub mod commands;
pub mod contacts;
pub mod helpers;
pub mod location;
pub mod session;
pub mod zones;
