//! Trip preference form state
//!
//! `TripDraft` is the mutable record edited field-by-field; a successful
//! submit produces an immutable `TripSnapshot` for display and export.
//! Validation failures are domain values (field -> message), not errors.

use crate::model::date_range::range_days;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// All form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldId {
    StartDate,
    EndDate,
    WorkDays,
    WorkHours,
    DayActivities,
    NightActivities,
    FoodPreferences,
    OutdoorActivities,
    CulturalActivities,
    SpecialDate,
    SpecialDayActivities,
    SpecialNightActivities,
    TravelType,
    Location,
}

impl FieldId {
    /// Fields in the order the form renders them.
    pub fn all() -> &'static [FieldId] {
        &[
            FieldId::StartDate,
            FieldId::EndDate,
            FieldId::WorkDays,
            FieldId::WorkHours,
            FieldId::DayActivities,
            FieldId::NightActivities,
            FieldId::FoodPreferences,
            FieldId::OutdoorActivities,
            FieldId::CulturalActivities,
            FieldId::SpecialDate,
            FieldId::SpecialDayActivities,
            FieldId::SpecialNightActivities,
            FieldId::TravelType,
            FieldId::Location,
        ]
    }

    /// Label shown next to the field.
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::StartDate => "Data de início",
            FieldId::EndDate => "Data de fim",
            FieldId::WorkDays => "Dias de trabalho",
            FieldId::WorkHours => "Horário de trabalho",
            FieldId::DayActivities => "Atividades diurnas",
            FieldId::NightActivities => "Atividades noturnas",
            FieldId::FoodPreferences => "Preferências gastronômicas",
            FieldId::OutdoorActivities => "Atividades ao ar livre",
            FieldId::CulturalActivities => "Atividades culturais",
            FieldId::SpecialDate => "Data especial",
            FieldId::SpecialDayActivities => "Atividades diurnas (data especial)",
            FieldId::SpecialNightActivities => "Atividades noturnas (data especial)",
            FieldId::TravelType => "Tipo de viagem",
            FieldId::Location => "Local",
        }
    }

    /// Message shown inline when a required field is left empty.
    pub fn required_message(&self) -> Option<&'static str> {
        match self {
            FieldId::StartDate => Some("Data de início é obrigatória"),
            FieldId::EndDate => Some("Data de fim é obrigatória"),
            FieldId::WorkHours => Some("Horário de trabalho é obrigatório"),
            FieldId::TravelType => Some("Tipo de viagem é obrigatório"),
            FieldId::Location => Some("Local é obrigatório"),
            _ => None,
        }
    }

    /// Kind of editor the field needs.
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldId::StartDate | FieldId::EndDate | FieldId::SpecialDate => FieldKind::Date,
            FieldId::WorkHours | FieldId::Location => FieldKind::Text,
            FieldId::TravelType => FieldKind::TravelType,
            FieldId::WorkDays => FieldKind::WorkDays,
            _ => FieldKind::Tags,
        }
    }
}

/// How a field is edited in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, edited inline
    Text,
    /// `YYYY-MM-DD` date, edited inline
    Date,
    /// Luxury/economy toggle
    TravelType,
    /// Checkbox picker over the trip's day range
    WorkDays,
    /// Checkbox picker over a fixed vocabulary
    Tags,
}

/// Travel tier selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelType {
    Luxury,
    Economy,
}

impl TravelType {
    pub fn label(&self) -> &'static str {
        match self {
            TravelType::Luxury => "Luxo",
            TravelType::Economy => "Econômico",
        }
    }

    /// Cycle through the options (Space on the travel-type field).
    pub fn next(selected: Option<TravelType>) -> TravelType {
        match selected {
            None | Some(TravelType::Economy) => TravelType::Luxury,
            Some(TravelType::Luxury) => TravelType::Economy,
        }
    }
}

/// Validation result: field -> human-readable message.
pub type ValidationErrors = BTreeMap<FieldId, String>;

/// The in-progress trip preference record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripDraft {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub work_days: BTreeSet<NaiveDate>,
    pub work_hours: String,
    pub day_activities: BTreeSet<String>,
    pub night_activities: BTreeSet<String>,
    pub food_preferences: BTreeSet<String>,
    pub outdoor_activities: BTreeSet<String>,
    pub cultural_activities: BTreeSet<String>,
    pub special_date: Option<NaiveDate>,
    pub special_day_activities: BTreeSet<String>,
    pub special_night_activities: BTreeSet<String>,
    pub travel_type: Option<TravelType>,
    pub location: String,
}

impl TripDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trip start, pruning work days that leave the window.
    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.start_date = date;
        self.prune_work_days();
    }

    /// Set the trip end, pruning work days that leave the window.
    pub fn set_end_date(&mut self, date: Option<NaiveDate>) {
        self.end_date = date;
        self.prune_work_days();
    }

    /// Candidate work days: every day of the trip, inclusive.
    pub fn work_day_candidates(&self) -> Vec<NaiveDate> {
        range_days(self.start_date, self.end_date)
    }

    /// Toggle a work day; days outside the trip window are ignored.
    pub fn toggle_work_day(&mut self, day: NaiveDate) {
        if !self.work_day_candidates().contains(&day) {
            return;
        }
        if !self.work_days.remove(&day) {
            self.work_days.insert(day);
        }
    }

    /// Drop selected work days that no longer fall inside the window.
    fn prune_work_days(&mut self) {
        let candidates: BTreeSet<NaiveDate> =
            self.work_day_candidates().into_iter().collect();
        self.work_days.retain(|d| candidates.contains(d));
    }

    /// The tag set backing a checkbox-vocabulary field, if it has one.
    pub fn tags_mut(&mut self, field: FieldId) -> Option<&mut BTreeSet<String>> {
        match field {
            FieldId::DayActivities => Some(&mut self.day_activities),
            FieldId::NightActivities => Some(&mut self.night_activities),
            FieldId::FoodPreferences => Some(&mut self.food_preferences),
            FieldId::OutdoorActivities => Some(&mut self.outdoor_activities),
            FieldId::CulturalActivities => Some(&mut self.cultural_activities),
            FieldId::SpecialDayActivities => Some(&mut self.special_day_activities),
            FieldId::SpecialNightActivities => Some(&mut self.special_night_activities),
            _ => None,
        }
    }

    pub fn tags(&self, field: FieldId) -> Option<&BTreeSet<String>> {
        match field {
            FieldId::DayActivities => Some(&self.day_activities),
            FieldId::NightActivities => Some(&self.night_activities),
            FieldId::FoodPreferences => Some(&self.food_preferences),
            FieldId::OutdoorActivities => Some(&self.outdoor_activities),
            FieldId::CulturalActivities => Some(&self.cultural_activities),
            FieldId::SpecialDayActivities => Some(&self.special_day_activities),
            FieldId::SpecialNightActivities => Some(&self.special_night_activities),
            _ => None,
        }
    }

    /// Toggle a tag on a vocabulary-backed field.
    pub fn toggle_tag(&mut self, field: FieldId, tag: &str) {
        if let Some(set) = self.tags_mut(field) {
            if !set.remove(tag) {
                set.insert(tag.to_string());
            }
        }
    }

    /// Run the validation rule set over the current draft.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        let mut require = |field: FieldId, empty: bool| {
            if empty {
                if let Some(msg) = field.required_message() {
                    errors.insert(field, msg.to_string());
                }
            }
        };

        require(FieldId::StartDate, self.start_date.is_none());
        require(FieldId::EndDate, self.end_date.is_none());
        require(FieldId::WorkHours, self.work_hours.trim().is_empty());
        require(FieldId::TravelType, self.travel_type.is_none());
        require(FieldId::Location, self.location.trim().is_empty());

        errors
    }

    /// Validate and, on success, freeze the draft into a snapshot.
    ///
    /// On failure the draft is left untouched and the caller gets the
    /// per-field messages to display inline.
    pub fn submit(&self) -> Result<TripSnapshot, ValidationErrors> {
        let errors = self.validate();
        let (start_date, end_date, travel_type) = match (
            self.start_date,
            self.end_date,
            self.travel_type,
            errors.is_empty(),
        ) {
            (Some(s), Some(e), Some(t), true) => (s, e, t),
            _ => return Err(errors),
        };

        Ok(TripSnapshot {
            start_date,
            end_date,
            work_days: self.work_days.iter().copied().collect(),
            work_hours: self.work_hours.trim().to_string(),
            day_activities: self.day_activities.iter().cloned().collect(),
            night_activities: self.night_activities.iter().cloned().collect(),
            food_preferences: self.food_preferences.iter().cloned().collect(),
            outdoor_activities: self.outdoor_activities.iter().cloned().collect(),
            cultural_activities: self.cultural_activities.iter().cloned().collect(),
            special_date: self.special_date,
            special_day_activities: self.special_day_activities.iter().cloned().collect(),
            special_night_activities: self.special_night_activities.iter().cloned().collect(),
            travel_type,
            location: self.location.trim().to_string(),
        })
    }

    /// Return the draft to its initial empty state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Immutable record produced by a successful submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSnapshot {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub work_days: Vec<NaiveDate>,
    pub work_hours: String,
    pub day_activities: Vec<String>,
    pub night_activities: Vec<String>,
    pub food_preferences: Vec<String>,
    pub outdoor_activities: Vec<String>,
    pub cultural_activities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_date: Option<NaiveDate>,
    pub special_day_activities: Vec<String>,
    pub special_night_activities: Vec<String>,
    pub travel_type: TravelType,
    pub location: String,
}

impl TripSnapshot {
    /// Pretty JSON for the result overlay and the export file.
    pub fn to_pretty_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// A draft with every required field populated.
    fn complete_draft() -> TripDraft {
        let mut draft = TripDraft::new();
        draft.set_start_date(Some(date("2024-07-01")));
        draft.set_end_date(Some(date("2024-07-03")));
        draft.toggle_work_day(date("2024-07-02"));
        draft.work_hours = "09:00-12:00".to_string();
        draft.toggle_tag(FieldId::DayActivities, "praia");
        draft.travel_type = Some(TravelType::Economy);
        draft.location = "Florianópolis".to_string();
        draft
    }

    #[test]
    fn test_submit_empty_draft_reports_all_required_fields() {
        let draft = TripDraft::new();
        let errors = draft.submit().unwrap_err();

        assert_eq!(errors.len(), 5);
        assert_eq!(
            errors.get(&FieldId::StartDate).map(String::as_str),
            Some("Data de início é obrigatória")
        );
        assert_eq!(
            errors.get(&FieldId::Location).map(String::as_str),
            Some("Local é obrigatório")
        );
    }

    #[test]
    fn test_submit_blank_location_only_flags_location() {
        let mut draft = complete_draft();
        draft.location = "   ".to_string();
        let before = draft.clone();

        let errors = draft.submit().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(&FieldId::Location).map(String::as_str),
            Some("Local é obrigatório")
        );
        // Failed submit must leave the draft untouched
        assert_eq!(draft, before);
    }

    #[test]
    fn test_submit_complete_draft_snapshots_all_fields() {
        let draft = complete_draft();
        let snapshot = draft.submit().unwrap();

        assert_eq!(snapshot.start_date, date("2024-07-01"));
        assert_eq!(snapshot.end_date, date("2024-07-03"));
        assert_eq!(snapshot.work_days, vec![date("2024-07-02")]);
        assert_eq!(snapshot.work_hours, "09:00-12:00");
        assert_eq!(snapshot.day_activities, vec!["praia".to_string()]);
        assert_eq!(snapshot.travel_type, TravelType::Economy);
        assert_eq!(snapshot.location, "Florianópolis");
        assert_eq!(snapshot.special_date, None);
    }

    #[test]
    fn test_work_day_candidates_follow_window() {
        let mut draft = TripDraft::new();
        assert!(draft.work_day_candidates().is_empty());

        draft.set_start_date(Some(date("2024-07-01")));
        assert!(draft.work_day_candidates().is_empty());

        draft.set_end_date(Some(date("2024-07-03")));
        assert_eq!(
            draft.work_day_candidates(),
            vec![date("2024-07-01"), date("2024-07-02"), date("2024-07-03")]
        );
    }

    #[test]
    fn test_toggle_work_day_outside_window_ignored() {
        let mut draft = TripDraft::new();
        draft.set_start_date(Some(date("2024-07-01")));
        draft.set_end_date(Some(date("2024-07-03")));

        draft.toggle_work_day(date("2024-07-10"));
        assert!(draft.work_days.is_empty());

        draft.toggle_work_day(date("2024-07-01"));
        assert!(draft.work_days.contains(&date("2024-07-01")));
    }

    #[test]
    fn test_shrinking_window_prunes_work_days() {
        let mut draft = TripDraft::new();
        draft.set_start_date(Some(date("2024-07-01")));
        draft.set_end_date(Some(date("2024-07-05")));
        draft.toggle_work_day(date("2024-07-02"));
        draft.toggle_work_day(date("2024-07-05"));

        draft.set_end_date(Some(date("2024-07-03")));

        assert!(draft.work_days.contains(&date("2024-07-02")));
        assert!(!draft.work_days.contains(&date("2024-07-05")));
    }

    #[test]
    fn test_clearing_bound_prunes_all_work_days() {
        let mut draft = TripDraft::new();
        draft.set_start_date(Some(date("2024-07-01")));
        draft.set_end_date(Some(date("2024-07-03")));
        draft.toggle_work_day(date("2024-07-02"));

        draft.set_start_date(None);
        assert!(draft.work_days.is_empty());
    }

    #[test]
    fn test_toggle_tag_adds_and_removes() {
        let mut draft = TripDraft::new();
        draft.toggle_tag(FieldId::NightActivities, "bares");
        assert!(draft.night_activities.contains("bares"));

        draft.toggle_tag(FieldId::NightActivities, "bares");
        assert!(draft.night_activities.is_empty());
    }

    #[test]
    fn test_travel_type_cycles() {
        assert_eq!(TravelType::next(None), TravelType::Luxury);
        assert_eq!(TravelType::next(Some(TravelType::Luxury)), TravelType::Economy);
        assert_eq!(TravelType::next(Some(TravelType::Economy)), TravelType::Luxury);
    }

    #[test]
    fn test_reset_returns_to_empty() {
        let mut draft = complete_draft();
        draft.reset();
        assert_eq!(draft, TripDraft::new());
    }

    #[test]
    fn test_snapshot_json_uses_camel_case_and_iso_dates() {
        let snapshot = complete_draft().submit().unwrap();
        let json = snapshot.to_pretty_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["startDate"], "2024-07-01");
        assert_eq!(value["endDate"], "2024-07-03");
        assert_eq!(value["travelType"], "economy");
        assert_eq!(value["workDays"][0], "2024-07-02");
        // Optional date left empty is omitted entirely
        assert!(value.get("specialDate").is_none());
    }
}
