//! Model layer - form state and overlay management
//!
//! - `TripDraft` / `TripSnapshot` - the record the form edits and freezes
//! - `range_days` - inclusive date enumeration for the work-day picker
//! - `ModalStack` - modal overlay management

pub mod date_range;
pub mod form;
pub mod modal;

pub use date_range::{parse_date, range_days, weekday_label, DATE_FORMAT};
pub use form::{FieldId, FieldKind, TravelType, TripDraft, TripSnapshot, ValidationErrors};
pub use modal::{Modal, ModalStack};
