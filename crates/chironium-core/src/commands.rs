// crates/chironium-core/src/commands.rs
//
// Every user action in Chironium is expressed as a WorkbenchCommand.
// Modules emit these; app.rs processes them after the UI pass, then
// reconciles selection against the location. Adding a feature = one
// variant here + one match arm in app.rs.

use uuid::Uuid;

use crate::location::Module;

#[derive(Debug, Clone)]
pub enum WorkbenchCommand {
    // ── Project ──────────────────────────────────────────────────────────────
    /// Enter the workbench at the media module of the named project.
    OpenProject(String),
    /// Back to the launcher. Zones and contacts stay in the session.
    CloseProject,
    /// Snapshot happens through eframe storage on its own schedule; this
    /// just confirms to the user via the status line.
    SaveProject,

    // ── Navigation ───────────────────────────────────────────────────────────
    /// Switch tab. Media drops the file id; secondary modules carry the
    /// current file forward.
    Navigate(Module),
    /// Double-activation of a catalog file: media → derush with the id.
    OpenFile(String),
    /// Close the file context and return to media.
    CloseFile,

    // ── Playback (simulated) ─────────────────────────────────────────────────
    Play,
    Pause,
    SetPlayhead(f64),
    ZoomIn,
    ZoomOut,

    // ── Zones ────────────────────────────────────────────────────────────────
    /// Bounds arrive normalized (min < max is the caller's job only for
    /// ordering; degenerate extents are rejected by the store).
    CreateZone { start: f64, end: f64, freq_low: f32, freq_high: f32 },
    RenameZone { id: Uuid, name: String },
    AnnotateZone { id: Uuid, notes: String },
    DeleteZone(Uuid),
    SelectZone(Option<Uuid>),

    // ── Contacts ─────────────────────────────────────────────────────────────
    /// Run the demo classifier over every zone of the active file that has
    /// no contact yet, then navigate to interpretation.
    RunIdentification,
    SelectContact(Option<Uuid>),
    CorrectContact { id: Uuid, species: String },
    SetContactNotes { id: Uuid, notes: String },
    ValidateContact(Uuid),
    RejectContact(Uuid),

    // ── Export / status ──────────────────────────────────────────────────────
    /// Open the save dialog on the next frame and write the CSV there.
    RequestCsvExport,
    ClearStatus,
}
