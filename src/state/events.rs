//! Outbound contract between the match core and the collaborators that draw the
//! scoreboard, play cues and keep the transcript.

use thiserror::Error;
use tracing::warn;

use crate::state::{
    clock::ClockPhase,
    match_state::{Outcome, PerTeam, Team, leader_of},
    undo::UndoAction,
};

/// Immutable view of the match handed to the render collaborator after every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Points per team.
    pub score: PerTeam<u32>,
    /// Fouls per team.
    pub fouls: PerTeam<u32>,
    /// Timeouts left per team.
    pub timeouts_remaining: PerTeam<u8>,
    /// Team in possession.
    pub possession: Team,
    /// Current period, starting at 1.
    pub period: u32,
    /// Remaining time as `MM:SS`.
    pub clock: String,
    /// Remaining time in seconds.
    pub remaining_secs: u32,
    /// Configured period length in seconds, for progress bars.
    pub period_length_secs: u32,
    /// Whether the countdown is live.
    pub running: bool,
    /// Phase of the countdown.
    pub clock_phase: ClockPhase,
    /// Number of actions that can still be undone.
    pub undo_depth: usize,
}

impl Snapshot {
    /// Team currently ahead, `None` on a tie. Used for the leader highlight.
    pub fn leader(&self) -> Option<Team> {
        leader_of(self.score)
    }
}

/// Discrete audio cue. Carries no payload; muting is up to the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Points were added.
    Scored,
    /// A foul was charged.
    Fouled,
    /// A timeout was spent.
    TimeoutUsed,
    /// An action was reverted.
    Undone,
    /// The clock ran out.
    PeriodEnded,
    /// One of the last seconds of a period ticked by.
    NearExpiry,
    /// The game was ended.
    GameEnded,
    /// The possession arrow moved.
    PossessionChanged,
}

impl Cue {
    /// Stable wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Cue::Scored => "scored",
            Cue::Fouled => "fouled",
            Cue::TimeoutUsed => "timeout_used",
            Cue::Undone => "undone",
            Cue::PeriodEnded => "period_ended",
            Cue::NearExpiry => "near_expiry",
            Cue::GameEnded => "game_ended",
            Cue::PossessionChanged => "possession_changed",
        }
    }
}

/// Resolves display names for teams. Names belong to the UI layer, not to the core.
pub trait TeamLabels {
    /// Display name for `team`.
    fn label(&self, team: Team) -> String;
}

/// Labels without a roster: the side names themselves.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PlainLabels;

#[cfg(test)]
impl TeamLabels for PlainLabels {
    fn label(&self, team: Team) -> String {
        match team {
            Team::Home => "Home".into(),
            Team::Away => "Away".into(),
        }
    }
}

/// Transcript entry emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    /// Points were added.
    Scored {
        /// Scoring team.
        team: Team,
        /// Points added.
        points: u32,
        /// Score after the action.
        score: PerTeam<u32>,
    },
    /// A foul was charged.
    Fouled {
        /// Team charged.
        team: Team,
        /// Fouls after the action.
        fouls: PerTeam<u32>,
    },
    /// A timeout was spent.
    TimeoutUsed {
        /// Team calling the timeout.
        team: Team,
        /// Timeouts left after the action.
        timeouts: PerTeam<u8>,
    },
    /// The given action was reversed.
    Undone(UndoAction),
    /// Possession was assigned.
    PossessionChanged(Team),
    /// The clock ran out in the given period.
    PeriodEnded(u32),
    /// The period counter moved to the given value.
    PeriodChanged(u32),
    /// The match was ended.
    GameEnded {
        /// Final result.
        outcome: Outcome,
        /// Final score.
        score: PerTeam<u32>,
    },
    /// Counters were reset, team names kept.
    NewGame,
    /// Counters and team fields were reset.
    FullReset,
}

impl LogEntry {
    /// Entries that begin a fresh transcript.
    pub fn starts_new_transcript(&self) -> bool {
        matches!(self, LogEntry::NewGame | LogEntry::FullReset)
    }

    /// Human readable line with team names resolved through `labels`.
    pub fn describe(&self, labels: &dyn TeamLabels) -> String {
        match self {
            LogEntry::Scored {
                team,
                points,
                score,
            } => format!(
                "{} scored +{points}. ({}-{})",
                labels.label(*team),
                score.home,
                score.away
            ),
            LogEntry::Fouled { team, fouls } => format!(
                "{} committed a foul. Fouls: {}-{}",
                labels.label(*team),
                fouls.home,
                fouls.away
            ),
            LogEntry::TimeoutUsed { team, timeouts } => format!(
                "{} used a timeout. Timeouts left: {}-{}",
                labels.label(*team),
                timeouts.home,
                timeouts.away
            ),
            LogEntry::Undone(UndoAction::Score { team, points }) => {
                format!("Undo: removed {points} from {}.", labels.label(*team))
            }
            LogEntry::Undone(UndoAction::Foul { team }) => {
                format!("Undo: removed a foul from {}.", labels.label(*team))
            }
            LogEntry::Undone(UndoAction::Timeout { team }) => {
                format!("Undo: restored a timeout to {}.", labels.label(*team))
            }
            LogEntry::PossessionChanged(team) => format!("Possession -> {}", labels.label(*team)),
            LogEntry::PeriodEnded(period) => format!("Period {period} ended."),
            LogEntry::PeriodChanged(period) => format!("Moved to period {period}"),
            LogEntry::GameEnded { outcome, score } => match outcome {
                Outcome::Win(team) => format!(
                    "Game ended. {} wins {}-{}",
                    labels.label(*team),
                    score[*team],
                    score[team.other()]
                ),
                Outcome::Tie => format!("Game ended. It's a tie {}-{}", score.home, score.away),
            },
            LogEntry::NewGame => "New game started".into(),
            LogEntry::FullReset => "Full reset performed".into(),
        }
    }
}

/// Failure reported by a collaborator. Never rolls back core state.
#[derive(Debug, Error)]
#[error("{collaborator} collaborator failed: {message}")]
pub struct CollaboratorError {
    /// Which collaborator failed.
    pub collaborator: &'static str,
    /// Failure detail.
    pub message: String,
}

impl CollaboratorError {
    /// Build an error for the named collaborator.
    pub fn new(collaborator: &'static str, message: impl Into<String>) -> Self {
        Self {
            collaborator,
            message: message.into(),
        }
    }
}

/// Draws the scoreboard.
pub trait Renderer: Send {
    /// Redraw from `snapshot`.
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), CollaboratorError>;
    /// Clear team names and notes held by the UI layer.
    fn clear_team_fields(&mut self) -> Result<(), CollaboratorError>;
}

/// Plays feedback cues.
pub trait AudioCues: Send {
    /// Play `cue`, or ignore it when muted.
    fn cue(&mut self, cue: Cue) -> Result<(), CollaboratorError>;
}

/// Keeps the human readable transcript.
pub trait PlayLog: Send {
    /// Append `entry` to the transcript.
    fn record(&mut self, entry: &LogEntry) -> Result<(), CollaboratorError>;
}

/// The three outbound collaborators of a match.
pub struct Collaborators {
    /// Render collaborator.
    pub renderer: Box<dyn Renderer>,
    /// Audio collaborator.
    pub audio: Box<dyn AudioCues>,
    /// Log collaborator.
    pub log: Box<dyn PlayLog>,
}

impl Collaborators {
    pub(crate) fn render(&mut self, snapshot: &Snapshot) {
        if let Err(err) = self.renderer.render(snapshot) {
            warn!(error = %err, "failed to render snapshot");
        }
    }

    pub(crate) fn clear_team_fields(&mut self) {
        if let Err(err) = self.renderer.clear_team_fields() {
            warn!(error = %err, "failed to clear team fields");
        }
    }

    pub(crate) fn cue(&mut self, cue: Cue) {
        if let Err(err) = self.audio.cue(cue) {
            warn!(cue = cue.as_str(), error = %err, "failed to play cue");
        }
    }

    pub(crate) fn log(&mut self, entry: LogEntry) {
        if let Err(err) = self.log.record(&entry) {
            warn!(entry = ?entry, error = %err, "failed to record log entry");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named;

    impl TeamLabels for Named {
        fn label(&self, team: Team) -> String {
            match team {
                Team::Home => "Lions".into(),
                Team::Away => "Bears".into(),
            }
        }
    }

    #[test]
    fn describes_actions_with_external_names() {
        let entry = LogEntry::Scored {
            team: Team::Away,
            points: 3,
            score: PerTeam { home: 10, away: 13 },
        };
        assert_eq!(entry.describe(&Named), "Bears scored +3. (10-13)");

        let entry = LogEntry::Undone(UndoAction::Timeout { team: Team::Home });
        assert_eq!(entry.describe(&Named), "Undo: restored a timeout to Lions.");
    }

    #[test]
    fn game_end_lists_winner_score_first() {
        let entry = LogEntry::GameEnded {
            outcome: Outcome::Win(Team::Away),
            score: PerTeam { home: 58, away: 60 },
        };
        assert_eq!(entry.describe(&Named), "Game ended. Bears wins 60-58");

        let entry = LogEntry::GameEnded {
            outcome: Outcome::Tie,
            score: PerTeam { home: 58, away: 58 },
        };
        assert_eq!(entry.describe(&PlainLabels), "Game ended. It's a tie 58-58");
    }

    #[test]
    fn only_resets_start_a_new_transcript() {
        assert!(LogEntry::NewGame.starts_new_transcript());
        assert!(LogEntry::FullReset.starts_new_transcript());
        assert!(!LogEntry::PeriodEnded(2).starts_new_transcript());
    }
}
