use thiserror::Error;
use tracing::{debug, info};

use crate::state::{
    clock::{Clock, ClockPhase, TickGeneration, TickOutcome, TickScheduler},
    events::{Collaborators, Cue, LogEntry, Snapshot},
    match_state::{MatchState, NoTimeoutsLeft, Outcome, ScoreOverflow, Team},
    period::{PeriodChange, PeriodController},
    undo::{EmptyUndo, UndoAction, UndoLog},
};

/// Period length used when nothing else is configured (12 minutes).
pub const DEFAULT_PERIOD_LENGTH_SECS: u32 = 720;

/// Rejected match actions. Every variant leaves the match untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The team has already spent all its timeouts.
    #[error("no timeouts left for {0:?}")]
    NoTimeoutsLeft(Team),
    /// The undo history is empty.
    #[error("nothing to undo")]
    EmptyUndo,
    /// A score must add at least one point.
    #[error("points must be greater than zero")]
    ZeroPoints,
    /// The team's total would no longer fit in the score counter.
    #[error("score for {0:?} would overflow")]
    ScoreOverflow(Team),
}

impl From<ScoreOverflow> for MatchError {
    fn from(ScoreOverflow(team): ScoreOverflow) -> Self {
        MatchError::ScoreOverflow(team)
    }
}

impl From<NoTimeoutsLeft> for MatchError {
    fn from(NoTimeoutsLeft(team): NoTimeoutsLeft) -> Self {
        MatchError::NoTimeoutsLeft(team)
    }
}

impl From<EmptyUndo> for MatchError {
    fn from(_: EmptyUndo) -> Self {
        MatchError::EmptyUndo
    }
}

/// Externally supplied settings, read whenever the clock is started or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSettings {
    /// Length of a period in seconds.
    pub period_length_secs: u32,
    /// Start the next period automatically when the clock runs out.
    pub auto_advance: bool,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            period_length_secs: DEFAULT_PERIOD_LENGTH_SECS,
            auto_advance: false,
        }
    }
}

/// Façade owning one match session: state, clock, undo history and period logic.
///
/// Every method is a single atomic step. Core bookkeeping is committed first, then
/// collaborators are notified, so a failing collaborator never leaves the match half
/// updated.
pub struct MatchController {
    state: MatchState,
    clock: Clock,
    undo: UndoLog,
    periods: PeriodController,
    settings: MatchSettings,
    collaborators: Collaborators,
}

impl MatchController {
    /// Create a fresh match with an idle clock.
    pub fn new(
        settings: MatchSettings,
        scheduler: Box<dyn TickScheduler>,
        collaborators: Collaborators,
    ) -> Self {
        Self {
            state: MatchState::new(),
            clock: Clock::new(settings.period_length_secs, scheduler),
            undo: UndoLog::new(),
            periods: PeriodController::new(settings.auto_advance),
            settings,
            collaborators,
        }
    }

    /// Settings currently in force.
    pub fn settings(&self) -> MatchSettings {
        self.settings
    }

    /// Read-only view of the counters.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Read-only view of the clock.
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Current view of the match.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.state.score(),
            fouls: self.state.fouls(),
            timeouts_remaining: self.state.timeouts_remaining(),
            possession: self.state.possession(),
            period: self.state.period(),
            clock: self.clock.display(),
            remaining_secs: self.clock.remaining_secs(),
            period_length_secs: self.clock.period_length_secs(),
            running: self.clock.is_running(),
            clock_phase: self.clock.phase(),
            undo_depth: self.undo.len(),
        }
    }

    /// Add `points` to `team` and record the action for undo.
    pub fn score(&mut self, team: Team, points: u32) -> Result<Snapshot, MatchError> {
        if points == 0 {
            return Err(MatchError::ZeroPoints);
        }
        self.state.add_score(team, points)?;
        self.undo.push(UndoAction::Score { team, points });
        info!(?team, points, "points added");

        self.collaborators.log(LogEntry::Scored {
            team,
            points,
            score: self.state.score(),
        });
        self.collaborators.cue(Cue::Scored);
        Ok(self.publish())
    }

    /// Charge `team` with a foul and record the action for undo.
    pub fn foul(&mut self, team: Team) -> Snapshot {
        self.state.add_foul(team);
        self.undo.push(UndoAction::Foul { team });
        info!(?team, "foul recorded");

        self.collaborators.log(LogEntry::Fouled {
            team,
            fouls: self.state.fouls(),
        });
        self.collaborators.cue(Cue::Fouled);
        self.publish()
    }

    /// Spend one of `team`'s timeouts. Nothing is recorded when none are left.
    pub fn timeout(&mut self, team: Team) -> Result<Snapshot, MatchError> {
        self.state.use_timeout(team)?;
        self.undo.push(UndoAction::Timeout { team });
        info!(?team, "timeout used");

        self.collaborators.log(LogEntry::TimeoutUsed {
            team,
            timeouts: self.state.timeouts_remaining(),
        });
        self.collaborators.cue(Cue::TimeoutUsed);
        Ok(self.publish())
    }

    /// Reverse the most recent score, foul or timeout.
    pub fn undo(&mut self) -> Result<UndoAction, MatchError> {
        let action = self.undo.pop()?;
        action.revert(&mut self.state);
        info!(?action, "action undone");

        self.collaborators.log(LogEntry::Undone(action));
        self.collaborators.cue(Cue::Undone);
        self.publish();
        Ok(action)
    }

    /// Give the possession arrow to `team`.
    pub fn set_possession(&mut self, team: Team) -> Snapshot {
        self.state.set_possession(team);
        debug!(?team, "possession assigned");

        self.collaborators.log(LogEntry::PossessionChanged(team));
        self.collaborators.cue(Cue::PossessionChanged);
        self.publish()
    }

    /// Move to the next period and restart the clock.
    pub fn advance_period(&mut self) -> PeriodChange {
        let change = self.periods.advance(
            &mut self.state,
            &mut self.clock,
            self.settings.period_length_secs,
        );
        self.after_period_change(change);
        change
    }

    /// Move back one period (not below the first) and restart the clock.
    pub fn retreat_period(&mut self) -> PeriodChange {
        let change = self.periods.retreat(
            &mut self.state,
            &mut self.clock,
            self.settings.period_length_secs,
        );
        self.after_period_change(change);
        change
    }

    /// Pause a running clock, otherwise start it. Returns the resulting phase.
    pub fn start_pause_clock(&mut self) -> ClockPhase {
        if self.clock.is_running() {
            self.clock.pause();
        } else {
            self.clock.set_period_length(self.settings.period_length_secs);
            self.clock.start();
        }
        info!(
            remaining = self.clock.remaining_secs(),
            running = self.clock.is_running(),
            "clock toggled"
        );
        self.publish();
        self.clock.phase()
    }

    /// Stop the clock and rewind it to the configured period length.
    pub fn reset_clock(&mut self) -> Snapshot {
        self.clock.reset(Some(self.settings.period_length_secs));
        info!(length = self.settings.period_length_secs, "clock reset");
        self.publish()
    }

    /// Zero scores and fouls, restore timeouts, clear undo history and go back to
    /// period 1 with an idle clock.
    pub fn new_game(&mut self) -> Snapshot {
        self.reset_match();
        info!("new game started");
        self.collaborators.log(LogEntry::NewGame);
        self.publish()
    }

    /// Like [`MatchController::new_game`], and also asks the UI layer to clear team
    /// names and notes.
    pub fn full_reset(&mut self) -> Snapshot {
        self.reset_match();
        info!("full reset performed");
        self.collaborators.clear_team_fields();
        self.collaborators.log(LogEntry::FullReset);
        self.publish()
    }

    /// Stop the clock and report the result. Counters are left as they are.
    pub fn end_game(&mut self) -> Outcome {
        self.clock.pause();
        let outcome = match self.state.leader() {
            Some(team) => Outcome::Win(team),
            None => Outcome::Tie,
        };
        info!(?outcome, "game ended");

        self.collaborators.log(LogEntry::GameEnded {
            outcome,
            score: self.state.score(),
        });
        self.collaborators.cue(Cue::GameEnded);
        self.publish();
        outcome
    }

    /// Replace the externally supplied settings. A stopped clock is rewound to the new
    /// length straight away; a running one picks it up on its next start or reset.
    pub fn update_settings(&mut self, settings: MatchSettings) -> Snapshot {
        self.settings = settings;
        self.periods.set_auto_advance(settings.auto_advance);
        if !self.clock.is_running() {
            self.clock.reset(Some(settings.period_length_secs));
        }
        info!(
            period_length_secs = settings.period_length_secs,
            auto_advance = settings.auto_advance,
            "match settings updated"
        );
        self.publish()
    }

    /// Apply one scheduled tick. Ticks from a countdown that was since paused, reset
    /// or restarted are dropped.
    pub fn on_tick(&mut self, generation: TickGeneration) -> TickOutcome {
        if generation != self.clock.generation() {
            debug!(
                generation,
                current = self.clock.generation(),
                "dropping stale tick"
            );
            return TickOutcome::Ignored;
        }

        let outcome = self.clock.tick();
        match outcome {
            TickOutcome::Ignored => return outcome,
            TickOutcome::Counted { .. } => {}
            TickOutcome::NearExpiry { .. } => self.collaborators.cue(Cue::NearExpiry),
            TickOutcome::Expired => {
                let period = self.state.period();
                info!(period, "period ended");
                self.collaborators.log(LogEntry::PeriodEnded(period));
                self.collaborators.cue(Cue::PeriodEnded);

                if let Some(change) = self.periods.on_expired(
                    &mut self.state,
                    &mut self.clock,
                    self.settings.period_length_secs,
                ) {
                    info!(period = change.to, "auto-advanced to next period");
                    self.collaborators.log(LogEntry::PeriodChanged(change.to));
                }
            }
        }
        self.publish();
        outcome
    }

    fn after_period_change(&mut self, change: PeriodChange) {
        if change.moved() {
            info!(from = change.from, to = change.to, "period changed");
            self.collaborators.log(LogEntry::PeriodChanged(change.to));
        }
        self.publish();
    }

    fn reset_match(&mut self) {
        self.state.reset_counters();
        if !self.undo.is_empty() {
            debug!(discarded = self.undo.len(), "undo history cleared");
            self.undo.clear();
        }
        self.clock.reset(Some(self.settings.period_length_secs));
    }

    fn publish(&mut self) -> Snapshot {
        let snapshot = self.snapshot();
        self.collaborators.render(&snapshot);
        snapshot
    }
}
