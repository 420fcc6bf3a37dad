use dashmap::DashMap;

use crate::state::{
    events::TeamLabels,
    match_state::{PerTeam, Team},
};

/// Identifying fields for a team. Owned by the UI layer, never by the match core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamProfile {
    /// Display name.
    pub name: String,
    /// Free-form notes kept next to the team card.
    pub notes: String,
}

/// Team names and notes for both sides, with configured defaults to fall back on.
#[derive(Debug)]
pub struct TeamRoster {
    profiles: DashMap<Team, TeamProfile>,
    default_names: PerTeam<String>,
}

impl TeamRoster {
    /// Build a roster seeded with the default names and empty notes.
    pub fn new(default_names: PerTeam<String>) -> Self {
        let roster = Self {
            profiles: DashMap::new(),
            default_names,
        };
        roster.reset();
        roster
    }

    /// Profile for `team`.
    pub fn profile(&self, team: Team) -> TeamProfile {
        self.profiles
            .get(&team)
            .map(|entry| entry.value().clone())
            .unwrap_or_else(|| self.default_profile(team))
    }

    /// Update the provided fields, keeping the others. Blank names fall back to the default.
    pub fn update(&self, team: Team, name: Option<String>, notes: Option<String>) -> TeamProfile {
        let mut entry = self
            .profiles
            .entry(team)
            .or_insert_with(|| self.default_profile(team));
        if let Some(name) = name {
            let trimmed = name.trim();
            entry.name = if trimmed.is_empty() {
                self.default_names[team].clone()
            } else {
                trimmed.to_string()
            };
        }
        if let Some(notes) = notes {
            entry.notes = notes;
        }
        entry.value().clone()
    }

    /// Restore default names and clear notes for both teams.
    pub fn reset(&self) {
        for team in Team::ALL {
            self.profiles.insert(team, self.default_profile(team));
        }
    }

    fn default_profile(&self, team: Team) -> TeamProfile {
        TeamProfile {
            name: self.default_names[team].clone(),
            notes: String::new(),
        }
    }
}

impl TeamLabels for TeamRoster {
    fn label(&self, team: Team) -> String {
        self.profile(team).name
    }
}
