use crate::calc::alternatives::AlternativeTolerances;
use crate::calc::scorer::ScoringPolicy;
use crate::data::persistence::Persistable;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for one planning session, read from the `settings` key of config.yaml.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PlannerSettings {
    pub budget: u32,
    pub allow_past_days: bool,
    /// Longest run of PTO days proposed as a single candidate.
    pub max_block_length: usize,
    /// Candidates kept after score ranking for exact effectiveness evaluation.
    pub finalist_limit: usize,
    pub region: Option<String>,
    pub scoring: ScoringPolicy,
    pub alternatives: AlternativeTolerances,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        PlannerSettings {
            budget: 10,
            allow_past_days: false,
            max_block_length: 5,
            finalist_limit: 200,
            region: None,
            scoring: ScoringPolicy::default(),
            alternatives: AlternativeTolerances::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
struct SettingsWrapper {
    #[serde(default)]
    settings: PlannerSettings,
}

impl Persistable for SettingsWrapper {
    fn filename() -> &'static str {
        "config.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

impl PlannerSettings {
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(SettingsWrapper::load_from(dir)?.settings)
    }

    pub fn save(&self, dir: &Path) -> Result<()> {
        let wrapper = SettingsWrapper {
            settings: self.clone(),
        };
        wrapper.save_to(dir)
    }
}
