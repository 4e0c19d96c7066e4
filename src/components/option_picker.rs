//! Option picker dialog component
//!
//! Checkbox list used for every set-valued field: the activity
//! vocabularies and the work-day selection. Toggles apply to the draft
//! immediately; Enter/Esc just closes the dialog.

use crate::action::Action;
use crate::component::Component;
use crate::components::centered_popup;
use crate::model::form::FieldId;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// One checkbox row
#[derive(Debug, Clone)]
pub struct PickerEntry {
    /// Text shown in the list
    pub label: String,
    /// Whether the option is currently in the draft
    pub checked: bool,
}

/// Checkbox picker dialog
pub struct OptionPickerDialog {
    /// Field the picker is editing
    pub field: FieldId,
    /// Dialog title
    pub title: String,
    /// Message shown when there is nothing to pick
    pub empty_message: String,
    /// Checkbox rows
    pub entries: Vec<PickerEntry>,
    /// Highlighted row
    pub selected_index: usize,
    /// List state for rendering
    pub list_state: ListState,
}

impl Default for OptionPickerDialog {
    fn default() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            field: FieldId::DayActivities,
            title: String::new(),
            empty_message: String::new(),
            entries: Vec::new(),
            selected_index: 0,
            list_state,
        }
    }
}

impl OptionPickerDialog {
    /// Configure the dialog for a new invocation
    pub fn open(
        &mut self,
        field: FieldId,
        title: String,
        empty_message: String,
        entries: Vec<PickerEntry>,
    ) {
        self.field = field;
        self.title = title;
        self.empty_message = empty_message;
        self.entries = entries;
        self.selected_index = 0;
        self.list_state.select(Some(0));
    }

    fn select_next(&mut self) {
        if self.selected_index + 1 < self.entries.len() {
            self.selected_index += 1;
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn select_prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
            self.list_state.select(Some(self.selected_index));
        }
    }
}

impl Component for OptionPickerDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::CloseModal),
            KeyCode::Char(' ') => {
                if self.entries.is_empty() {
                    None
                } else {
                    Some(Action::ToggleOption(self.field, self.selected_index))
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        // The app mutates the draft; mirror the toggle on the checkbox row
        if let Action::ToggleOption(field, index) = action {
            if field == self.field {
                if let Some(entry) = self.entries.get_mut(index) {
                    entry.checked = !entry.checked;
                }
            }
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let content_height = if self.entries.is_empty() {
            5
        } else {
            self.entries.len() as u16 + 2
        };
        let popup_height = (content_height + 6).min(area.height.saturating_sub(2)).max(10);
        let popup_area = centered_popup(area, 56, popup_height);

        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ])
            .split(popup_area);

        // Header
        let selected = self.entries.iter().filter(|e| e.checked).count();
        let header = Paragraph::new(Line::from(Span::styled(
            format!("{} selecionado(s)", selected),
            Style::default().fg(Color::Cyan),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", self.title))
                .title_style(
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                ),
        );
        frame.render_widget(header, chunks[0]);

        if self.entries.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    self.empty_message.clone(),
                    Style::default().fg(Color::Yellow),
                )),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(empty, chunks[1]);
        } else {
            let items: Vec<ListItem> = self
                .entries
                .iter()
                .map(|entry| {
                    let (mark, style) = if entry.checked {
                        ("[x] ", Style::default().fg(Color::Green))
                    } else {
                        ("[ ] ", Style::default().fg(Color::White))
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(mark, Style::default().fg(Color::Green)),
                        Span::styled(entry.label.clone(), style),
                    ]))
                })
                .collect();

            let list = List::new(items)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::DarkGray)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("▶ ");

            frame.render_stateful_widget(list, chunks[1], &mut self.list_state);
        }

        // Help bar
        let help_text = if self.entries.is_empty() {
            vec![
                Span::styled(" Esc/Enter ", Style::default().fg(Color::Yellow)),
                Span::raw("Fechar"),
            ]
        } else {
            vec![
                Span::styled(" Space ", Style::default().fg(Color::Yellow)),
                Span::raw("Marcar  "),
                Span::styled(" j/k ", Style::default().fg(Color::Cyan)),
                Span::raw("Navegar  "),
                Span::styled(" Esc/Enter ", Style::default().fg(Color::Yellow)),
                Span::raw("Concluir"),
            ]
        };
        let help = Paragraph::new(Line::from(help_text))
            .alignment(ratatui::layout::Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(labels: &[&str]) -> Vec<PickerEntry> {
        labels
            .iter()
            .map(|l| PickerEntry {
                label: l.to_string(),
                checked: false,
            })
            .collect()
    }

    #[test]
    fn test_space_emits_toggle_for_highlighted_entry() {
        let mut picker = OptionPickerDialog::default();
        picker.open(
            FieldId::NightActivities,
            "Atividades noturnas".to_string(),
            String::new(),
            entries(&["bares", "shows"]),
        );

        picker.handle_key_event(KeyEvent::from(KeyCode::Down)).unwrap();
        let action = picker
            .handle_key_event(KeyEvent::from(KeyCode::Char(' ')))
            .unwrap();
        assert_eq!(action, Some(Action::ToggleOption(FieldId::NightActivities, 1)));
    }

    #[test]
    fn test_toggle_update_flips_checkbox() {
        let mut picker = OptionPickerDialog::default();
        picker.open(
            FieldId::FoodPreferences,
            "Preferências".to_string(),
            String::new(),
            entries(&["churrasco"]),
        );

        picker
            .update(Action::ToggleOption(FieldId::FoodPreferences, 0))
            .unwrap();
        assert!(picker.entries[0].checked);

        // A toggle for a different field is ignored
        picker
            .update(Action::ToggleOption(FieldId::DayActivities, 0))
            .unwrap();
        assert!(picker.entries[0].checked);
    }

    #[test]
    fn test_navigation_clamps_to_bounds() {
        let mut picker = OptionPickerDialog::default();
        picker.open(
            FieldId::DayActivities,
            "Atividades".to_string(),
            String::new(),
            entries(&["praia", "compras"]),
        );

        picker.handle_key_event(KeyEvent::from(KeyCode::Up)).unwrap();
        assert_eq!(picker.selected_index, 0);

        picker.handle_key_event(KeyEvent::from(KeyCode::Down)).unwrap();
        picker.handle_key_event(KeyEvent::from(KeyCode::Down)).unwrap();
        assert_eq!(picker.selected_index, 1);
    }

    #[test]
    fn test_space_on_empty_picker_is_ignored() {
        let mut picker = OptionPickerDialog::default();
        picker.open(
            FieldId::WorkDays,
            "Dias de trabalho".to_string(),
            "Defina as datas da viagem primeiro".to_string(),
            Vec::new(),
        );

        let action = picker
            .handle_key_event(KeyEvent::from(KeyCode::Char(' ')))
            .unwrap();
        assert_eq!(action, None);
    }
}
