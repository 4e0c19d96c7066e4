//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering
//! logic. Components communicate through Actions rather than direct state
//! mutation.

pub mod form;
pub mod help_dialog;
pub mod layout;
pub mod option_picker;
pub mod quit_dialog;
pub mod result_dialog;

pub use form::FormComponent;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_form_layout, centered_popup};
pub use option_picker::{OptionPickerDialog, PickerEntry};
pub use quit_dialog::QuitDialog;
pub use result_dialog::ResultDialog;
