use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    dto::validation::validate_team_name,
    state::{
        match_state::Team,
        roster::{TeamProfile, TeamRoster},
    },
};

/// Name and notes shown for a team.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct TeamProfileDto {
    /// Side this profile belongs to.
    pub team: Team,
    /// Display name.
    pub name: String,
    /// Free-form notes.
    pub notes: String,
}

impl From<(Team, TeamProfile)> for TeamProfileDto {
    fn from((team, profile): (Team, TeamProfile)) -> Self {
        Self {
            team,
            name: profile.name,
            notes: profile.notes,
        }
    }
}

/// Both team profiles in display order.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamsResponse {
    /// Home first, then away.
    pub teams: Vec<TeamProfileDto>,
}

impl From<&TeamRoster> for TeamsResponse {
    fn from(roster: &TeamRoster) -> Self {
        Self {
            teams: Team::ALL
                .into_iter()
                .map(|team| (team, roster.profile(team)).into())
                .collect(),
        }
    }
}

/// Partial update of a team profile. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateTeamRequest {
    /// New display name; blank restores the default.
    #[serde(default)]
    #[validate(custom(function = "validate_team_name"))]
    pub name: Option<String>,
    /// New notes.
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}
