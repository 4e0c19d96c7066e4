use crate::model::form::FieldId;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Options offered for each activity checkbox group.
    /// The special-date groups reuse the day/night vocabularies.
    #[serde(default = "default_day_activities")]
    pub day_activities: Vec<String>,
    #[serde(default = "default_night_activities")]
    pub night_activities: Vec<String>,
    #[serde(default = "default_food_preferences")]
    pub food_preferences: Vec<String>,
    #[serde(default = "default_outdoor_activities")]
    pub outdoor_activities: Vec<String>,
    #[serde(default = "default_cultural_activities")]
    pub cultural_activities: Vec<String>,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_day_activities() -> Vec<String> {
    strings(&["praia", "piscina", "passeio de barco", "city tour", "compras"])
}

fn default_night_activities() -> Vec<String> {
    strings(&["bares", "baladas", "shows", "jantar romântico"])
}

fn default_food_preferences() -> Vec<String> {
    strings(&[
        "churrasco",
        "frutos do mar",
        "comida regional",
        "massas",
        "vegetariana",
    ])
}

fn default_outdoor_activities() -> Vec<String> {
    strings(&["trilha", "ciclismo", "mergulho", "stand up paddle"])
}

fn default_cultural_activities() -> Vec<String> {
    strings(&["museus", "teatro", "centro histórico", "feiras de artesanato"])
}

impl Default for Config {
    fn default() -> Self {
        Self {
            day_activities: default_day_activities(),
            night_activities: default_night_activities(),
            food_preferences: default_food_preferences(),
            outdoor_activities: default_outdoor_activities(),
            cultural_activities: default_cultural_activities(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".trip-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Where the result overlay exports the submitted JSON.
    pub fn export_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("last_trip.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Vocabulary backing a checkbox field, if it uses one.
    pub fn vocabulary(&self, field: FieldId) -> Option<&[String]> {
        match field {
            FieldId::DayActivities | FieldId::SpecialDayActivities => Some(&self.day_activities),
            FieldId::NightActivities | FieldId::SpecialNightActivities => {
                Some(&self.night_activities)
            }
            FieldId::FoodPreferences => Some(&self.food_preferences),
            FieldId::OutdoorActivities => Some(&self.outdoor_activities),
            FieldId::CulturalActivities => Some(&self.cultural_activities),
            _ => None,
        }
    }
}
