//! Trip preference form screen
//!
//! Renders the field list, tracks focus, and hosts the inline editor for
//! text and date fields. Set-valued fields open the option picker instead.

use crate::action::Action;
use crate::component::Component;
use crate::components::calculate_form_layout;
use crate::model::form::{FieldId, FieldKind, TripDraft, ValidationErrors};
use crate::model::DATE_FORMAT;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Column where field values start, so the form reads as a table.
const LABEL_COLUMN_WIDTH: usize = 38;

/// The main form component
pub struct FormComponent {
    /// Index into `FieldId::all()` of the focused field
    pub focus_index: usize,
    /// List state for rendering
    pub list_state: ListState,
    /// Whether the focused field is being edited inline
    pub editing: bool,
    /// Inline input buffer
    pub input: String,
    /// Parse error for the inline editor (e.g. malformed date)
    pub edit_error: Option<String>,
    /// Validation errors from the last failed submit
    pub errors: ValidationErrors,
}

impl Default for FormComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl FormComponent {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            focus_index: 0,
            list_state,
            editing: false,
            input: String::new(),
            edit_error: None,
            errors: ValidationErrors::new(),
        }
    }

    /// The field the cursor is on
    pub fn focused_field(&self) -> FieldId {
        FieldId::all()[self.focus_index.min(FieldId::all().len() - 1)]
    }

    /// Begin inline editing, pre-filling the buffer with the current value
    pub fn start_edit(&mut self, initial: String) {
        self.editing = true;
        self.input = initial;
        self.edit_error = None;
    }

    /// Leave inline editing, discarding the buffer
    pub fn stop_edit(&mut self) {
        self.editing = false;
        self.input.clear();
        self.edit_error = None;
    }

    pub fn set_edit_error(&mut self, message: String) {
        self.edit_error = Some(message);
    }

    /// Replace the inline validation messages after a failed submit
    pub fn set_errors(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    /// Drop the message for a field the user just fixed
    pub fn clear_error(&mut self, field: FieldId) {
        self.errors.remove(&field);
    }

    /// Return focus and errors to the initial state (after a form reset)
    pub fn reset(&mut self) {
        self.focus_index = 0;
        self.list_state.select(Some(0));
        self.stop_edit();
        self.errors.clear();
    }

    fn select(&mut self, index: usize) {
        self.focus_index = index;
        self.list_state.select(Some(index));
    }

    fn next(&mut self) {
        let len = FieldId::all().len();
        self.select((self.focus_index + 1) % len);
    }

    fn previous(&mut self) {
        let len = FieldId::all().len();
        self.select((self.focus_index + len - 1) % len);
    }
}

impl Component for FormComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.editing {
            let action = match key.code {
                KeyCode::Enter => Some(Action::CommitEdit),
                KeyCode::Esc => Some(Action::CancelEdit),
                KeyCode::Backspace => {
                    self.input.pop();
                    self.edit_error = None;
                    None
                }
                KeyCode::Char(c) => {
                    self.input.push(c);
                    self.edit_error = None;
                    None
                }
                _ => None,
            };
            return Ok(action);
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::NextField),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::PrevField),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstField),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastField),
            KeyCode::Enter => Some(Action::BeginEdit),
            KeyCode::Char(' ') => match self.focused_field().kind() {
                FieldKind::TravelType => Some(Action::CycleTravelType),
                FieldKind::WorkDays | FieldKind::Tags => Some(Action::BeginEdit),
                _ => None,
            },
            KeyCode::Char('s') => Some(Action::Submit),
            KeyCode::Char('r') => Some(Action::ResetForm),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::NextField => self.next(),
            Action::PrevField => self.previous(),
            Action::FirstField => self.select(0),
            Action::LastField => self.select(FieldId::all().len() - 1),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // The form needs the draft, so rendering goes through draw_with_draft
        Ok(())
    }
}

impl FormComponent {
    pub fn draw_with_draft(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        draft: &TripDraft,
        status_message: Option<&str>,
    ) -> Result<()> {
        let layout = calculate_form_layout(area);

        // Title bar
        let title = Paragraph::new(Line::from(Span::styled(
            " Preferências de Viagem ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, layout.title);

        // Field list
        let value_width = (layout.fields.width as usize)
            .saturating_sub(LABEL_COLUMN_WIDTH + 6)
            .max(10);

        let items: Vec<ListItem> = FieldId::all()
            .iter()
            .enumerate()
            .map(|(i, field)| self.field_item(*field, i, draft, value_width))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD))
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, layout.fields, &mut self.list_state);

        // Status line
        if let Some(message) = status_message {
            let status = Paragraph::new(Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(Color::Yellow),
            )));
            frame.render_widget(status, layout.status);
        }

        // Help bar
        let help_text = if self.editing {
            " Enter  Confirmar   Esc  Cancelar   Digite para editar"
        } else {
            " j/k  Navegar   Enter  Editar   Space  Alternar   s  Enviar   r  Limpar   ?  Ajuda   q  Sair"
        };
        let help = Paragraph::new(Line::from(Span::styled(
            help_text,
            Style::default().fg(Color::DarkGray),
        )))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, layout.help);

        Ok(())
    }

    /// Build the one- or two-line list entry for a field
    fn field_item(
        &self,
        field: FieldId,
        index: usize,
        draft: &TripDraft,
        value_width: usize,
    ) -> ListItem<'static> {
        let is_focused = index == self.focus_index;
        let is_editing = is_focused && self.editing;

        let label_style = if is_focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let (value, value_style) = if is_editing {
            (
                format!("{}_", self.input),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            let summary = value_summary(draft, field);
            let style = if summary == "—" {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Green)
            };
            (truncate_to_width(&summary, value_width), style)
        };

        let mut lines = vec![Line::from(vec![
            Span::styled(pad_to_width(field.label(), LABEL_COLUMN_WIDTH), label_style),
            Span::styled(value, value_style),
        ])];

        // Inline parse error while editing, validation message otherwise
        let message = if is_editing {
            self.edit_error.clone()
        } else {
            self.errors.get(&field).cloned()
        };
        if let Some(message) = message {
            lines.push(Line::from(Span::styled(
                format!("{}✗ {}", " ".repeat(LABEL_COLUMN_WIDTH), message),
                Style::default().fg(Color::Red),
            )));
        }

        ListItem::new(lines)
    }
}

/// Short textual rendering of a field's current value
pub fn value_summary(draft: &TripDraft, field: FieldId) -> String {
    let date = |d: Option<chrono::NaiveDate>| {
        d.map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "—".to_string())
    };

    match field {
        FieldId::StartDate => date(draft.start_date),
        FieldId::EndDate => date(draft.end_date),
        FieldId::SpecialDate => date(draft.special_date),
        FieldId::WorkHours => text_or_dash(&draft.work_hours),
        FieldId::Location => text_or_dash(&draft.location),
        FieldId::TravelType => draft
            .travel_type
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| "—".to_string()),
        FieldId::WorkDays => {
            if draft.work_days.is_empty() {
                "—".to_string()
            } else {
                draft
                    .work_days
                    .iter()
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
        _ => match draft.tags(field) {
            Some(tags) if !tags.is_empty() => {
                tags.iter().cloned().collect::<Vec<_>>().join(", ")
            }
            _ => "—".to_string(),
        },
    }
}

fn text_or_dash(text: &str) -> String {
    if text.trim().is_empty() {
        "—".to_string()
    } else {
        text.to_string()
    }
}

/// Pad a label to a fixed display width (labels contain accented chars,
/// so byte-based format padding would misalign the columns)
fn pad_to_width(text: &str, width: usize) -> String {
    let text_width = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(text_width)))
}

/// Cut a value down to the available display width, appending an ellipsis
fn truncate_to_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::form::TravelType;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_focus_wraps_around() {
        let mut form = FormComponent::new();
        form.update(Action::PrevField).unwrap();
        assert_eq!(form.focus_index, FieldId::all().len() - 1);

        form.update(Action::NextField).unwrap();
        assert_eq!(form.focus_index, 0);
    }

    #[test]
    fn test_space_on_travel_type_cycles() {
        let mut form = FormComponent::new();
        form.update(Action::LastField).unwrap();
        // Last field is Location; move back to TravelType
        form.update(Action::PrevField).unwrap();
        assert_eq!(form.focused_field(), FieldId::TravelType);

        let key = KeyEvent::from(KeyCode::Char(' '));
        let action = form.handle_key_event(key).unwrap();
        assert_eq!(action, Some(Action::CycleTravelType));
    }

    #[test]
    fn test_editing_captures_input() {
        let mut form = FormComponent::new();
        form.start_edit(String::new());

        for c in "2024-07-01".chars() {
            form.handle_key_event(KeyEvent::from(KeyCode::Char(c))).unwrap();
        }
        assert_eq!(form.input, "2024-07-01");

        form.handle_key_event(KeyEvent::from(KeyCode::Backspace)).unwrap();
        assert_eq!(form.input, "2024-07-0");

        let action = form.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::CommitEdit));
    }

    #[test]
    fn test_value_summary_renders_draft_fields() {
        let mut draft = TripDraft::new();
        assert_eq!(value_summary(&draft, FieldId::StartDate), "—");

        draft.set_start_date(Some(date("2024-07-01")));
        draft.set_end_date(Some(date("2024-07-02")));
        draft.toggle_work_day(date("2024-07-01"));
        draft.travel_type = Some(TravelType::Luxury);
        draft.location = "Gramado".to_string();

        assert_eq!(value_summary(&draft, FieldId::StartDate), "2024-07-01");
        assert_eq!(value_summary(&draft, FieldId::WorkDays), "2024-07-01");
        assert_eq!(value_summary(&draft, FieldId::TravelType), "Luxo");
        assert_eq!(value_summary(&draft, FieldId::Location), "Gramado");
        assert_eq!(value_summary(&draft, FieldId::DayActivities), "—");
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("abc", 10), "abc");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Accented chars count one column each
        assert_eq!(truncate_to_width("atrações", 20), "atrações");
    }

    #[test]
    fn test_pad_to_width_uses_display_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(
            UnicodeWidthStr::width(pad_to_width("Data de início", 20).as_str()),
            20
        );
    }
}
