//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::form::FieldId;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Field Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Focus the next form field
    NextField,
    /// Focus the previous form field
    PrevField,
    /// Jump to the first field
    FirstField,
    /// Jump to the last field
    LastField,

    // ─────────────────────────────────────────────────────────────────────────
    // Field Editing
    // ─────────────────────────────────────────────────────────────────────────
    /// Begin editing the focused field (opens a picker for set fields)
    BeginEdit,
    /// Commit the inline input buffer into the draft
    CommitEdit,
    /// Abandon the inline input buffer
    CancelEdit,
    /// Cycle the travel-type selection
    CycleTravelType,
    /// Toggle the highlighted picker entry on the draft
    ToggleOption(FieldId, usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────────
    /// Validate the draft and open the result overlay on success
    Submit,
    /// Clear the draft and return to an empty form
    ResetForm,
    /// Write the submitted snapshot to the export file
    ExportSnapshot,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,
}
