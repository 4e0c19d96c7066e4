//! Root application component
//!
//! The App struct implements the Component trait, acting as the root
//! component that owns the draft record and delegates event handling and
//! rendering to child components. The form's state machine (editing,
//! submitted, confirming quit) lives in the modal stack.

use crate::action::Action;
use crate::component::Component;
use crate::components::{
    FormComponent, HelpDialog, OptionPickerDialog, PickerEntry, QuitDialog, ResultDialog,
};
use crate::config::Config;
use crate::model::date_range::{parse_date, weekday_label, DATE_FORMAT};
use crate::model::form::{FieldId, FieldKind, TravelType, TripDraft, TripSnapshot};
use crate::model::modal::{Modal, ModalStack};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::fs;
use std::path::PathBuf;

/// Root application state
pub struct App {
    /// Option vocabularies and export location
    pub config: Config,
    /// The record being edited
    pub draft: TripDraft,
    /// Frozen copy of the draft after a successful submit
    pub snapshot: Option<TripSnapshot>,
    /// Pretty JSON rendering of the snapshot, cached for the overlay
    pub snapshot_json: Option<String>,
    /// Active overlays, top receives input
    pub modals: ModalStack,
    /// Set when the main loop should exit
    pub should_quit: bool,
    /// One-line feedback shown on the status line
    pub status_message: Option<String>,

    // Components
    pub form: FormComponent,
    pub picker: OptionPickerDialog,
    pub result_dialog: ResultDialog,
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> App {
        // Write the defaults on first run so the vocabularies are editable
        let config = Config::load().unwrap_or_else(|| {
            let config = Config::default();
            let _ = config.save();
            config
        });
        Self::with_config(config)
    }

    /// Create an App with an explicit config (used by tests)
    pub fn with_config(config: Config) -> App {
        App {
            config,
            draft: TripDraft::new(),
            snapshot: None,
            snapshot_json: None,
            modals: ModalStack::new(),
            should_quit: false,
            status_message: None,
            form: FormComponent::new(),
            picker: OptionPickerDialog::default(),
            result_dialog: ResultDialog::default(),
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
        }
    }

    /// Current value of an inline-editable field, as edit-buffer text
    fn editable_value(&self, field: FieldId) -> String {
        let date = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
        };
        match field {
            FieldId::StartDate => date(self.draft.start_date),
            FieldId::EndDate => date(self.draft.end_date),
            FieldId::SpecialDate => date(self.draft.special_date),
            FieldId::WorkHours => self.draft.work_hours.clone(),
            FieldId::Location => self.draft.location.clone(),
            _ => String::new(),
        }
    }

    /// Configure and open the checkbox picker for a set-valued field
    fn open_picker(&mut self, field: FieldId) {
        let (entries, empty_message) = if field.kind() == FieldKind::WorkDays {
            let entries = self
                .draft
                .work_day_candidates()
                .iter()
                .map(|d| PickerEntry {
                    label: format!("{} ({})", d.format(DATE_FORMAT), weekday_label(*d)),
                    checked: self.draft.work_days.contains(d),
                })
                .collect();
            (
                entries,
                "Defina as datas de início e fim primeiro".to_string(),
            )
        } else {
            let selected = self.draft.tags(field).cloned().unwrap_or_default();
            let entries = self
                .config
                .vocabulary(field)
                .unwrap_or(&[])
                .iter()
                .map(|tag| PickerEntry {
                    label: tag.clone(),
                    checked: selected.contains(tag),
                })
                .collect();
            (entries, String::new())
        };

        self.picker
            .open(field, field.label().to_string(), empty_message, entries);
        self.modals.push(Modal::Picker { field });
    }

    /// Apply the inline input buffer to the draft
    fn commit_edit(&mut self) {
        let field = self.form.focused_field();
        let input = self.form.input.trim().to_string();

        match field.kind() {
            FieldKind::Text => {
                match field {
                    FieldId::WorkHours => self.draft.work_hours = input,
                    FieldId::Location => self.draft.location = input,
                    _ => {}
                }
                self.form.stop_edit();
                self.form.clear_error(field);
            }
            FieldKind::Date => {
                // Empty input clears the date; anything else must parse
                let value = if input.is_empty() {
                    Some(None)
                } else {
                    parse_date(&input).map(Some)
                };
                match value {
                    Some(value) => {
                        match field {
                            FieldId::StartDate => self.draft.set_start_date(value),
                            FieldId::EndDate => self.draft.set_end_date(value),
                            FieldId::SpecialDate => self.draft.special_date = value,
                            _ => {}
                        }
                        self.form.stop_edit();
                        self.form.clear_error(field);
                    }
                    None => {
                        self.form
                            .set_edit_error("Data inválida, use AAAA-MM-DD".to_string());
                    }
                }
            }
            _ => self.form.stop_edit(),
        }
    }

    /// Validate the draft; on success freeze it and open the result overlay
    fn submit(&mut self) -> Result<()> {
        match self.draft.submit() {
            Ok(snapshot) => {
                self.snapshot_json = Some(snapshot.to_pretty_json()?);
                self.snapshot = Some(snapshot);
                self.form.set_errors(Default::default());
                self.status_message = None;
                self.result_dialog.scroll_offset = 0;
                self.modals.push(Modal::Result);
            }
            Err(errors) => {
                self.form.set_errors(errors);
                self.status_message =
                    Some("Preencha os campos obrigatórios destacados".to_string());
            }
        }
        Ok(())
    }

    /// Write the submitted JSON to the export file
    fn export_snapshot(&self) -> Result<PathBuf> {
        let json = self
            .snapshot_json
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Nenhum envio para exportar"))?;
        let path = Config::export_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine export path"))?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Discard everything and return to an empty form
    fn reset_form(&mut self) {
        self.draft.reset();
        self.snapshot = None;
        self.snapshot_json = None;
        self.form.reset();
        if matches!(self.modals.top(), Some(Modal::Result)) {
            self.modals.pop();
        }
        self.status_message = Some("Formulário limpo".to_string());
    }
}

impl Component for App {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // Ctrl+C always quits, regardless of what is on screen
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        match self.modals.top() {
            Some(Modal::QuitConfirm) => self.quit_dialog.handle_key_event(key),
            Some(Modal::Picker { .. }) => self.picker.handle_key_event(key),
            Some(Modal::Result) => self.result_dialog.handle_key_event(key),
            Some(Modal::Help) => self.help_dialog.handle_key_event(key),
            None => self.form.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {}
            Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Field Navigation (delegate to FormComponent)
            // ─────────────────────────────────────────────────────────────────
            Action::NextField | Action::PrevField | Action::FirstField | Action::LastField => {
                self.form.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Field Editing
            // ─────────────────────────────────────────────────────────────────
            Action::BeginEdit => {
                let field = self.form.focused_field();
                match field.kind() {
                    FieldKind::Text | FieldKind::Date => {
                        let initial = self.editable_value(field);
                        self.form.start_edit(initial);
                    }
                    FieldKind::TravelType => return Ok(Some(Action::CycleTravelType)),
                    FieldKind::WorkDays | FieldKind::Tags => self.open_picker(field),
                }
            }
            Action::CommitEdit => self.commit_edit(),
            Action::CancelEdit => self.form.stop_edit(),
            Action::CycleTravelType => {
                self.draft.travel_type = Some(TravelType::next(self.draft.travel_type));
                self.form.clear_error(FieldId::TravelType);
            }
            Action::ToggleOption(field, index) => {
                if field.kind() == FieldKind::WorkDays {
                    if let Some(day) = self.draft.work_day_candidates().get(index).copied() {
                        self.draft.toggle_work_day(day);
                    }
                } else if let Some(tag) = self
                    .config
                    .vocabulary(field)
                    .and_then(|vocab| vocab.get(index))
                    .cloned()
                {
                    self.draft.toggle_tag(field, &tag);
                }
                self.picker.update(action)?;
            }

            // ─────────────────────────────────────────────────────────────────
            // Submission
            // ─────────────────────────────────────────────────────────────────
            Action::Submit => self.submit()?,
            Action::ResetForm => self.reset_form(),
            Action::ExportSnapshot => {
                self.status_message = Some(match self.export_snapshot() {
                    Ok(path) => format!("JSON exportado para {}", path.display()),
                    Err(e) => format!("Falha ao exportar: {}", e),
                });
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => {
                self.modals.push(Modal::QuitConfirm);
            }
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.form
            .draw_with_draft(frame, area, &self.draft, self.status_message.as_deref())?;

        if let Some(modal) = self.modals.top().cloned() {
            match modal {
                Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
                Modal::Picker { .. } => self.picker.draw(frame, area)?,
                Modal::Result => {
                    if let (Some(snapshot), Some(json)) =
                        (self.snapshot.as_ref(), self.snapshot_json.as_deref())
                    {
                        self.result_dialog.draw_with_snapshot(
                            frame,
                            area,
                            snapshot,
                            json,
                            self.status_message.as_deref(),
                        )?;
                    }
                }
                Modal::Help => self.help_dialog.draw(frame, area)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn test_app() -> App {
        App::with_config(Config::default())
    }

    /// Drive the action loop the way main() does, following chained actions
    fn dispatch(app: &mut App, action: Action) {
        let mut current = Some(action);
        while let Some(a) = current {
            current = app.update(a).unwrap();
        }
    }

    fn fill_required_fields(app: &mut App) {
        app.draft.set_start_date(Some(date("2024-07-01")));
        app.draft.set_end_date(Some(date("2024-07-03")));
        app.draft.work_hours = "09:00-12:00".to_string();
        app.draft.travel_type = Some(TravelType::Luxury);
        app.draft.location = "Salvador".to_string();
    }

    #[test]
    fn test_submit_incomplete_form_shows_errors_not_overlay() {
        let mut app = test_app();
        let before = app.draft.clone();

        dispatch(&mut app, Action::Submit);

        assert!(app.modals.is_empty());
        assert!(app.snapshot.is_none());
        assert_eq!(
            app.form.errors.get(&FieldId::Location).map(String::as_str),
            Some("Local é obrigatório")
        );
        assert_eq!(app.draft, before);
    }

    #[test]
    fn test_submit_complete_form_opens_result_overlay() {
        let mut app = test_app();
        fill_required_fields(&mut app);

        dispatch(&mut app, Action::Submit);

        assert_eq!(app.modals.top(), Some(&Modal::Result));
        assert!(app.form.errors.is_empty());
        let json = app.snapshot_json.as_deref().unwrap();
        assert!(json.contains("\"startDate\": \"2024-07-01\""));
        assert!(json.contains("\"travelType\": \"luxury\""));
    }

    #[test]
    fn test_reset_after_submit_clears_everything() {
        let mut app = test_app();
        fill_required_fields(&mut app);
        dispatch(&mut app, Action::Submit);

        dispatch(&mut app, Action::ResetForm);

        assert!(app.modals.is_empty());
        assert!(app.snapshot.is_none());
        assert_eq!(app.draft, TripDraft::new());
    }

    #[test]
    fn test_commit_edit_parses_date_into_draft() {
        let mut app = test_app();
        app.form.start_edit(String::new());
        app.form.input = "2024-07-01".to_string();

        dispatch(&mut app, Action::CommitEdit);

        assert_eq!(app.draft.start_date, Some(date("2024-07-01")));
        assert!(!app.form.editing);
    }

    #[test]
    fn test_commit_edit_rejects_malformed_date() {
        let mut app = test_app();
        app.form.start_edit(String::new());
        app.form.input = "01/07/2024".to_string();

        dispatch(&mut app, Action::CommitEdit);

        assert_eq!(app.draft.start_date, None);
        assert!(app.form.editing);
        assert!(app.form.edit_error.is_some());
    }

    #[test]
    fn test_commit_empty_date_clears_value() {
        let mut app = test_app();
        app.draft.set_start_date(Some(date("2024-07-01")));
        app.form.start_edit("2024-07-01".to_string());
        app.form.input.clear();

        dispatch(&mut app, Action::CommitEdit);

        assert_eq!(app.draft.start_date, None);
    }

    #[test]
    fn test_begin_edit_on_travel_type_cycles_value() {
        let mut app = test_app();
        dispatch(&mut app, Action::LastField);
        dispatch(&mut app, Action::PrevField);
        assert_eq!(app.form.focused_field(), FieldId::TravelType);

        dispatch(&mut app, Action::BeginEdit);
        assert_eq!(app.draft.travel_type, Some(TravelType::Luxury));

        dispatch(&mut app, Action::BeginEdit);
        assert_eq!(app.draft.travel_type, Some(TravelType::Economy));
    }

    #[test]
    fn test_picker_toggle_updates_draft_and_checkbox() {
        let mut app = test_app();
        app.open_picker(FieldId::DayActivities);
        assert!(matches!(app.modals.top(), Some(Modal::Picker { .. })));

        dispatch(&mut app, Action::ToggleOption(FieldId::DayActivities, 0));

        let first = app.config.day_activities[0].clone();
        assert!(app.draft.day_activities.contains(&first));
        assert!(app.picker.entries[0].checked);
    }

    #[test]
    fn test_work_day_picker_lists_range() {
        let mut app = test_app();
        app.draft.set_start_date(Some(date("2024-07-01")));
        app.draft.set_end_date(Some(date("2024-07-03")));

        app.open_picker(FieldId::WorkDays);
        assert_eq!(app.picker.entries.len(), 3);
        assert_eq!(app.picker.entries[0].label, "2024-07-01 (seg)");

        dispatch(&mut app, Action::ToggleOption(FieldId::WorkDays, 1));
        assert!(app.draft.work_days.contains(&date("2024-07-02")));
    }

    #[test]
    fn test_ctrl_c_force_quits_from_anywhere() {
        let mut app = test_app();
        app.modals.push(Modal::Help);

        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let action = app.handle_key_event(key).unwrap();
        assert_eq!(action, Some(Action::ForceQuit));
    }
}
