//! Modal stack for managing overlays
//!
//! The form's submitted/confirm states are modals on top of the editing
//! screen rather than boolean flags scattered through the app.

use crate::model::form::FieldId;

/// Represents a modal overlay that can be displayed on top of the form
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    /// Quit confirmation dialog
    QuitConfirm,
    /// Checkbox picker for a set-valued field (activities, work days)
    Picker { field: FieldId },
    /// Submitted snapshot rendered as JSON
    Result,
    /// Help dialog showing all keyboard shortcuts
    Help,
}

/// A stack of modal overlays
///
/// Only the top modal receives input events.
#[derive(Debug, Default)]
pub struct ModalStack {
    stack: Vec<Modal>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    pub fn push(&mut self, modal: Modal) {
        self.stack.push(modal);
    }

    pub fn pop(&mut self) -> Option<Modal> {
        self.stack.pop()
    }

    /// The top modal without removing it
    pub fn top(&self) -> Option<&Modal> {
        self.stack.last()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modal_stack_push_pop() {
        let mut stack = ModalStack::new();
        assert!(stack.top().is_none());

        stack.push(Modal::QuitConfirm);
        stack.push(Modal::Help);

        assert_eq!(stack.pop(), Some(Modal::Help));
        assert_eq!(stack.pop(), Some(Modal::QuitConfirm));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_modal_stack_top() {
        let mut stack = ModalStack::new();
        stack.push(Modal::Result);
        assert_eq!(stack.top(), Some(&Modal::Result));

        stack.push(Modal::Picker {
            field: FieldId::DayActivities,
        });
        assert_eq!(
            stack.top(),
            Some(&Modal::Picker {
                field: FieldId::DayActivities
            })
        );
    }
}
