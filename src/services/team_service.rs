use tracing::info;

use crate::{
    dto::{
        scoreboard::ScoreboardSnapshot,
        team::{TeamProfileDto, TeamsResponse, UpdateTeamRequest},
    },
    services::sse_events::{broadcast_scoreboard, broadcast_team_updated},
    state::{SharedState, match_state::Team},
};

/// Both team profiles.
pub fn teams(state: &SharedState) -> TeamsResponse {
    TeamsResponse::from(state.roster())
}

/// Rename a team or edit its notes, then refresh every display so the new name shows up.
pub async fn update_team(
    state: &SharedState,
    team: Team,
    request: UpdateTeamRequest,
) -> TeamProfileDto {
    let profile = state.roster().update(team, request.name, request.notes);
    info!(?team, name = %profile.name, "team profile updated");

    let dto = TeamProfileDto::from((team, profile));
    broadcast_team_updated(state.public_sse(), dto.clone());

    let snapshot = state.with_controller(|c| c.snapshot()).await;
    broadcast_scoreboard(
        state.public_sse(),
        &ScoreboardSnapshot::new(&snapshot, state.roster()),
    );
    dto
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, state::AppState};

    #[tokio::test]
    async fn rename_is_broadcast_with_the_scoreboard() {
        let (state, _ticks) = AppState::new(&AppConfig::default());
        let mut rx = state.public_sse().subscribe();

        let dto = update_team(
            &state,
            Team::Home,
            UpdateTeamRequest {
                name: Some("  Lions ".into()),
                notes: None,
            },
        )
        .await;
        assert_eq!(dto.name, "Lions");

        let first = rx.recv().await.unwrap();
        assert_eq!(first.event.as_deref(), Some("team.updated"));
        let second = rx.recv().await.unwrap();
        assert_eq!(second.event.as_deref(), Some("scoreboard"));
        assert!(second.data.contains("\"home_name\":\"Lions\""));
    }

    #[tokio::test]
    async fn blank_name_falls_back_to_default() {
        let (state, _ticks) = AppState::new(&AppConfig::default());
        update_team(
            &state,
            Team::Away,
            UpdateTeamRequest {
                name: Some("Bears".into()),
                notes: Some("zone defence".into()),
            },
        )
        .await;
        let dto = update_team(
            &state,
            Team::Away,
            UpdateTeamRequest {
                name: Some("   ".into()),
                notes: None,
            },
        )
        .await;
        assert_eq!(dto.name, "Away");
        assert_eq!(dto.notes, "zone defence");
        assert_eq!(teams(&state).teams[1], dto);
    }
}
