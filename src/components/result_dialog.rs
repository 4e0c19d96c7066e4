//! Result dialog component
//!
//! Shows the submitted snapshot as pretty-printed JSON in a scrollable
//! overlay. From here the user can export the JSON or reset the form.

use crate::action::Action;
use crate::component::Component;
use crate::model::form::TripSnapshot;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Submitted snapshot overlay
#[derive(Default)]
pub struct ResultDialog {
    pub scroll_offset: usize,
}

impl Component for ResultDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
            KeyCode::Char('r') => Some(Action::ResetForm),
            KeyCode::Char('s') => Some(Action::ExportSnapshot),
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll_offset = self.scroll_offset.saturating_add(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                None
            }
            KeyCode::PageDown => {
                self.scroll_offset = self.scroll_offset.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(10);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, _frame: &mut Frame, _area: Rect) -> Result<()> {
        // Needs the snapshot, so rendering goes through draw_with_snapshot
        Ok(())
    }
}

impl ResultDialog {
    pub fn draw_with_snapshot(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &TripSnapshot,
        json: &str,
        status_message: Option<&str>,
    ) -> Result<()> {
        frame.render_widget(Clear, area);

        let margin = 3;
        let dialog_area = Rect::new(
            area.x + margin,
            area.y + margin,
            area.width.saturating_sub(margin * 2),
            area.height.saturating_sub(margin * 2),
        );

        let mut content: Vec<Line> = json
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Green))))
            .collect();

        content.push(Line::from(""));
        if let Some(message) = status_message {
            content.push(Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Yellow),
            )));
            content.push(Line::from(""));
        }
        content.push(Line::from(vec![
            Span::styled(" s ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("Exportar JSON  "),
            Span::styled(" r ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw("Novo formulário  "),
            Span::styled(" Esc ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw("Fechar"),
        ]));

        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        // Clamp scroll offset
        let max_scroll = total.saturating_sub(visible_height);
        if self.scroll_offset > max_scroll {
            self.scroll_offset = max_scroll;
        }

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Viagem para {} ", snapshot.location))
                    .title_style(
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                    .border_style(Style::default().fg(Color::Green)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state =
                ScrollbarState::new(total.saturating_sub(visible_height)).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(ratatui::layout::Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_keys_map_to_actions() {
        let mut dialog = ResultDialog::default();

        let action = dialog.handle_key_event(KeyEvent::from(KeyCode::Esc)).unwrap();
        assert_eq!(action, Some(Action::CloseModal));

        let action = dialog
            .handle_key_event(KeyEvent::from(KeyCode::Char('r')))
            .unwrap();
        assert_eq!(action, Some(Action::ResetForm));

        let action = dialog
            .handle_key_event(KeyEvent::from(KeyCode::Char('s')))
            .unwrap();
        assert_eq!(action, Some(Action::ExportSnapshot));
    }

    #[test]
    fn test_scroll_stays_non_negative() {
        let mut dialog = ResultDialog::default();
        dialog.handle_key_event(KeyEvent::from(KeyCode::Up)).unwrap();
        assert_eq!(dialog.scroll_offset, 0);

        dialog.handle_key_event(KeyEvent::from(KeyCode::Down)).unwrap();
        assert_eq!(dialog.scroll_offset, 1);
    }
}
