//! Business logic behind the match control routes. Each helper takes the controller
//! lock once, so the action runs as one step with no tick or other action in between.

use tracing::debug;

use crate::{
    dto::{
        scoreboard::{
            OutcomeResponse, PeriodResponse, ScoreRequest, ScoreboardSnapshot, TeamRequest,
            UndoResponse,
        },
        settings::SettingsDto,
    },
    error::ServiceError,
    state::{
        SharedState,
        controller::{MatchController, MatchError},
        events::Snapshot,
    },
};

/// Current scoreboard.
pub async fn scoreboard(state: &SharedState) -> ScoreboardSnapshot {
    let snapshot = state.with_controller(|c| c.snapshot()).await;
    named(state, &snapshot)
}

/// Add points for a team.
pub async fn score(
    state: &SharedState,
    request: ScoreRequest,
) -> Result<ScoreboardSnapshot, ServiceError> {
    let snapshot = state
        .with_controller(|c| c.score(request.team, request.points))
        .await
        .map_err(|err| rejected(state, err))?;
    Ok(named(state, &snapshot))
}

/// Record a foul against a team.
pub async fn foul(state: &SharedState, request: TeamRequest) -> ScoreboardSnapshot {
    let snapshot = state.with_controller(|c| c.foul(request.team)).await;
    named(state, &snapshot)
}

/// Spend one of a team's timeouts.
pub async fn timeout(
    state: &SharedState,
    request: TeamRequest,
) -> Result<ScoreboardSnapshot, ServiceError> {
    let snapshot = state
        .with_controller(|c| c.timeout(request.team))
        .await
        .map_err(|err| rejected(state, err))?;
    Ok(named(state, &snapshot))
}

/// Revert the most recent score, foul or timeout.
pub async fn undo(state: &SharedState) -> Result<UndoResponse, ServiceError> {
    let (action, snapshot) = state
        .with_controller(|c| c.undo().map(|action| (action, c.snapshot())))
        .await
        .map_err(|err| rejected(state, err))?;
    Ok(UndoResponse::new(action, named(state, &snapshot)))
}

/// Give the possession arrow to a team.
pub async fn set_possession(state: &SharedState, request: TeamRequest) -> ScoreboardSnapshot {
    let snapshot = state
        .with_controller(|c| c.set_possession(request.team))
        .await;
    named(state, &snapshot)
}

/// Move to the next period and restart the clock.
pub async fn next_period(state: &SharedState) -> PeriodResponse {
    period_change(state, MatchController::advance_period).await
}

/// Move back one period, never below the first, and restart the clock.
pub async fn previous_period(state: &SharedState) -> PeriodResponse {
    period_change(state, MatchController::retreat_period).await
}

/// Start the clock when stopped, pause it when running.
pub async fn toggle_clock(state: &SharedState) -> ScoreboardSnapshot {
    let snapshot = state
        .with_controller(|c| {
            c.start_pause_clock();
            c.snapshot()
        })
        .await;
    named(state, &snapshot)
}

/// Stop the clock and restore the full period length.
pub async fn reset_clock(state: &SharedState) -> ScoreboardSnapshot {
    let snapshot = state.with_controller(|c| c.reset_clock()).await;
    named(state, &snapshot)
}

/// Stop the clock and announce the result.
pub async fn end_game(state: &SharedState) -> OutcomeResponse {
    let (outcome, score) = state
        .with_controller(|c| {
            let outcome = c.end_game();
            (outcome, c.state().score())
        })
        .await;
    OutcomeResponse::new(outcome, score, state.roster())
}

/// Clear counters and the clock, keeping team names.
pub async fn new_game(state: &SharedState) -> ScoreboardSnapshot {
    let snapshot = state.with_controller(|c| c.new_game()).await;
    named(state, &snapshot)
}

/// Like a new game, but team names and notes return to defaults.
pub async fn full_reset(state: &SharedState) -> ScoreboardSnapshot {
    let snapshot = state.with_controller(|c| c.full_reset()).await;
    named(state, &snapshot)
}

/// Current match settings.
pub async fn settings(state: &SharedState) -> SettingsDto {
    state.with_controller(|c| c.settings()).await.into()
}

/// Apply new settings; a stopped clock picks up the new length at once.
pub async fn update_settings(state: &SharedState, request: SettingsDto) -> SettingsDto {
    let settings = state
        .with_controller(|c| {
            c.update_settings(request.into());
            c.settings()
        })
        .await;
    debug!(?settings, "settings applied");
    settings.into()
}

async fn period_change<F>(state: &SharedState, change: F) -> PeriodResponse
where
    F: FnOnce(&mut MatchController) -> crate::state::period::PeriodChange,
{
    let (change, snapshot) = state
        .with_controller(|c| {
            let change = change(c);
            (change, c.snapshot())
        })
        .await;
    PeriodResponse::new(change, named(state, &snapshot))
}

fn named(state: &SharedState, snapshot: &Snapshot) -> ScoreboardSnapshot {
    ScoreboardSnapshot::new(snapshot, state.roster())
}

fn rejected(state: &SharedState, err: MatchError) -> ServiceError {
    debug!(error = %err, "match action rejected");
    ServiceError::from_match(err, state.roster())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        dto::scoreboard::ClockPhaseDto,
        state::{AppState, match_state::Team},
    };

    fn app() -> SharedState {
        AppState::new(&AppConfig::default()).0
    }

    #[tokio::test]
    async fn timeouts_run_out_and_undo_restores_one() {
        let state = app();
        for _ in 0..5 {
            timeout(&state, TeamRequest { team: Team::Home })
                .await
                .unwrap();
        }
        let err = timeout(&state, TeamRequest { team: Team::Home })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "No timeouts left for Home");

        let response = undo(&state).await.unwrap();
        assert_eq!(response.scoreboard.timeouts_remaining.home, 1);
    }

    #[tokio::test]
    async fn score_and_end_game_use_roster_names() {
        let state = app();
        state
            .roster()
            .update(Team::Away, Some("Bears".into()), None);
        score(
            &state,
            ScoreRequest {
                team: Team::Away,
                points: 3,
            },
        )
        .await
        .unwrap();

        let outcome = end_game(&state).await;
        assert_eq!(outcome.winner, Some(Team::Away));
        assert_eq!(outcome.message, "Bears wins 3-0");
        assert!(
            state
                .transcript()
                .lines()
                .iter()
                .any(|line| line.ends_with("Bears scored +3. (0-3)"))
        );
    }

    #[tokio::test]
    async fn toggle_clock_runs_and_pauses() {
        let state = app();
        let running = toggle_clock(&state).await;
        assert!(running.running);
        let paused = toggle_clock(&state).await;
        assert!(!paused.running);
        assert_eq!(paused.clock_phase, ClockPhaseDto::Paused);

        let reset = reset_clock(&state).await;
        assert_eq!(reset.clock_phase, ClockPhaseDto::Idle);
    }

    #[tokio::test]
    async fn full_reset_restores_default_names() {
        let state = app();
        state
            .roster()
            .update(Team::Home, Some("Lions".into()), Some("notes".into()));
        let scoreboard = full_reset(&state).await;
        assert_eq!(scoreboard.home_name, "Home");
        assert_eq!(state.transcript().lines().len(), 1);
    }

    #[tokio::test]
    async fn settings_round_trip_through_the_controller() {
        let state = app();
        let applied = update_settings(
            &state,
            SettingsDto {
                period_length_secs: 600,
                auto_advance: true,
            },
        )
        .await;
        assert_eq!(applied, settings(&state).await);
        assert_eq!(scoreboard(&state).await.clock, "10:00");
    }
}
