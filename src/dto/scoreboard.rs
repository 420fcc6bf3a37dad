//! DTOs for the match control API and the scoreboard SSE payload.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::{
    clock::ClockPhase,
    events::{Snapshot, TeamLabels},
    match_state::{Outcome, PerTeam, Team},
    period::PeriodChange,
    undo::UndoAction,
};

/// Largest number of points accepted in a single scoring action.
pub const MAX_POINTS_PER_ACTION: u32 = 10;

/// Request to add points to a team.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ScoreRequest {
    /// Team receiving the points.
    pub team: Team,
    /// Points to add, 1 to [`MAX_POINTS_PER_ACTION`].
    #[validate(range(min = 1, max = MAX_POINTS_PER_ACTION))]
    pub points: u32,
}

/// Request targeting a single team (foul, timeout, possession).
#[derive(Debug, Deserialize, ToSchema)]
pub struct TeamRequest {
    /// Team the action applies to.
    pub team: Team,
}

/// A value for each team.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
pub struct TeamTotals {
    /// Home value.
    pub home: u32,
    /// Away value.
    pub away: u32,
}

impl From<PerTeam<u32>> for TeamTotals {
    fn from(value: PerTeam<u32>) -> Self {
        Self {
            home: value.home,
            away: value.away,
        }
    }
}

impl From<PerTeam<u8>> for TeamTotals {
    fn from(value: PerTeam<u8>) -> Self {
        Self {
            home: value.home.into(),
            away: value.away.into(),
        }
    }
}

/// Countdown phase exposed to clients.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClockPhaseDto {
    /// Stopped at full length, not started since the last reset.
    Idle,
    /// Counting down.
    Running,
    /// Stopped after being started; resumes where it left off.
    Paused,
    /// Reached zero.
    Expired,
}

impl From<ClockPhase> for ClockPhaseDto {
    fn from(value: ClockPhase) -> Self {
        match value {
            ClockPhase::Idle => ClockPhaseDto::Idle,
            ClockPhase::Running => ClockPhaseDto::Running,
            ClockPhase::Paused => ClockPhaseDto::Paused,
            ClockPhase::Expired => ClockPhaseDto::Expired,
        }
    }
}

/// Everything a display needs to draw the scoreboard.
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct ScoreboardSnapshot {
    /// Display name of the home team.
    pub home_name: String,
    /// Display name of the away team.
    pub away_name: String,
    /// Points per team.
    pub score: TeamTotals,
    /// Fouls per team.
    pub fouls: TeamTotals,
    /// Timeouts left per team.
    pub timeouts_remaining: TeamTotals,
    /// Team holding the possession arrow.
    pub possession: Team,
    /// Current period, starting at 1.
    pub period: u32,
    /// Remaining time formatted as `MM:SS`.
    pub clock: String,
    /// Remaining time in seconds.
    pub remaining_secs: u32,
    /// Configured period length in seconds.
    pub period_length_secs: u32,
    /// Whether the clock is counting down.
    pub running: bool,
    /// Phase of the countdown.
    pub clock_phase: ClockPhaseDto,
    /// Team to highlight as leader; absent on a tie.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader: Option<Team>,
    /// Number of actions that can still be undone.
    pub undo_depth: usize,
}

impl ScoreboardSnapshot {
    /// Combine a core snapshot with the UI-owned team names.
    pub fn new(snapshot: &Snapshot, labels: &dyn TeamLabels) -> Self {
        Self {
            home_name: labels.label(Team::Home),
            away_name: labels.label(Team::Away),
            score: snapshot.score.into(),
            fouls: snapshot.fouls.into(),
            timeouts_remaining: snapshot.timeouts_remaining.into(),
            possession: snapshot.possession,
            period: snapshot.period,
            clock: snapshot.clock.clone(),
            remaining_secs: snapshot.remaining_secs,
            period_length_secs: snapshot.period_length_secs,
            running: snapshot.running,
            clock_phase: snapshot.clock_phase.into(),
            leader: snapshot.leader(),
            undo_depth: snapshot.undo_depth,
        }
    }
}

/// Kind of action that was reversed.
#[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UndoneKind {
    /// Points were removed.
    Score,
    /// A foul was removed.
    Foul,
    /// A timeout was given back.
    Timeout,
}

/// Response to an undo request.
#[derive(Debug, Serialize, ToSchema)]
pub struct UndoResponse {
    /// Kind of action that was reverted.
    pub kind: UndoneKind,
    /// Team the reverted action belonged to.
    pub team: Team,
    /// Points removed, for score actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    /// Scoreboard after the undo.
    pub scoreboard: ScoreboardSnapshot,
}

impl UndoResponse {
    /// Describe `action` alongside the resulting scoreboard.
    pub fn new(action: UndoAction, scoreboard: ScoreboardSnapshot) -> Self {
        let (kind, points) = match action {
            UndoAction::Score { points, .. } => (UndoneKind::Score, Some(points)),
            UndoAction::Foul { .. } => (UndoneKind::Foul, None),
            UndoAction::Timeout { .. } => (UndoneKind::Timeout, None),
        };
        Self {
            kind,
            team: action.team(),
            points,
            scoreboard,
        }
    }
}

/// Response to a period change.
#[derive(Debug, Serialize, ToSchema)]
pub struct PeriodResponse {
    /// Period before the change.
    pub from: u32,
    /// Period after the change.
    pub to: u32,
    /// Scoreboard after the change.
    pub scoreboard: ScoreboardSnapshot,
}

impl PeriodResponse {
    /// Pair a period change with the resulting scoreboard.
    pub fn new(change: PeriodChange, scoreboard: ScoreboardSnapshot) -> Self {
        Self {
            from: change.from,
            to: change.to,
            scoreboard,
        }
    }
}

/// Final result returned when the game is ended.
#[derive(Debug, Serialize, ToSchema)]
pub struct OutcomeResponse {
    /// `true` when both teams finished level.
    pub tie: bool,
    /// Winning team; absent on a tie.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Team>,
    /// Final points per team.
    pub score: TeamTotals,
    /// Sentence suitable for a winner banner.
    pub message: String,
}

impl OutcomeResponse {
    /// Build the response for `outcome` with names from `labels`.
    pub fn new(outcome: Outcome, score: PerTeam<u32>, labels: &dyn TeamLabels) -> Self {
        let (winner, message) = match outcome {
            Outcome::Win(team) => (
                Some(team),
                format!(
                    "{} wins {}-{}",
                    labels.label(team),
                    score[team],
                    score[team.other()]
                ),
            ),
            Outcome::Tie => (
                None,
                format!("It's a tie {}-{}", score.home, score.away),
            ),
        };
        Self {
            tie: winner.is_none(),
            winner,
            score: score.into(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::events::PlainLabels;
    use validator::Validate;

    #[test]
    fn score_request_rejects_out_of_range_points() {
        let ok = ScoreRequest {
            team: Team::Home,
            points: 3,
        };
        assert!(ok.validate().is_ok());

        let zero = ScoreRequest {
            team: Team::Home,
            points: 0,
        };
        assert!(zero.validate().is_err());

        let huge = ScoreRequest {
            team: Team::Away,
            points: MAX_POINTS_PER_ACTION + 1,
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn outcome_message_puts_winner_first() {
        let response = OutcomeResponse::new(
            Outcome::Win(Team::Away),
            PerTeam { home: 58, away: 60 },
            &PlainLabels,
        );
        assert_eq!(response.message, "Away wins 60-58");
        assert!(!response.tie);

        let response = OutcomeResponse::new(Outcome::Tie, PerTeam::splat(58), &PlainLabels);
        assert!(response.tie);
        assert_eq!(response.winner, None);
    }

    #[test]
    fn snapshot_serializes_team_keys_in_snake_case() {
        let snapshot = Snapshot {
            score: PerTeam { home: 2, away: 0 },
            fouls: PerTeam::splat(0),
            timeouts_remaining: PerTeam::splat(5),
            possession: Team::Away,
            period: 1,
            clock: "12:00".into(),
            remaining_secs: 720,
            period_length_secs: 720,
            running: false,
            clock_phase: ClockPhase::Idle,
            undo_depth: 1,
        };
        let json = serde_json::to_value(ScoreboardSnapshot::new(&snapshot, &PlainLabels)).unwrap();
        assert_eq!(json["possession"], "away");
        assert_eq!(json["leader"], "home");
        assert_eq!(json["clock_phase"], "idle");
        assert_eq!(json["score"]["home"], 2);
    }
}
