use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of timeouts each team starts a match with.
pub const MAX_TIMEOUTS: u8 = 5;

/// One of the two sides of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    /// Home side.
    Home,
    /// Away side.
    Away,
}

impl Team {
    /// Both teams in display order.
    pub const ALL: [Team; 2] = [Team::Home, Team::Away];

    /// The opposing team.
    pub fn other(self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }
}

/// A value tracked once per team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PerTeam<T> {
    /// Value for [`Team::Home`].
    pub home: T,
    /// Value for [`Team::Away`].
    pub away: T,
}

impl<T: Clone> PerTeam<T> {
    /// Build a pair holding the same value for both teams.
    pub fn splat(value: T) -> Self {
        Self {
            home: value.clone(),
            away: value,
        }
    }
}

impl<T> Index<Team> for PerTeam<T> {
    type Output = T;

    fn index(&self, team: Team) -> &T {
        match team {
            Team::Home => &self.home,
            Team::Away => &self.away,
        }
    }
}

impl<T> IndexMut<Team> for PerTeam<T> {
    fn index_mut(&mut self, team: Team) -> &mut T {
        match team {
            Team::Home => &mut self.home,
            Team::Away => &mut self.away,
        }
    }
}

/// Final result of a match as returned when the game is ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The given team finished with strictly more points.
    Win(Team),
    /// Both teams finished level.
    Tie,
}

/// Score, fouls, timeouts, possession and period for both teams.
///
/// Counters are unsigned so they can never go negative; inverse operations clamp
/// instead of failing so an undo can always be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    score: PerTeam<u32>,
    fouls: PerTeam<u32>,
    timeouts_remaining: PerTeam<u8>,
    possession: Team,
    period: u32,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            score: PerTeam::default(),
            fouls: PerTeam::default(),
            timeouts_remaining: PerTeam::splat(MAX_TIMEOUTS),
            possession: Team::Home,
            period: 1,
        }
    }
}

/// Raised by [`MatchState::add_score`] when the total would exceed `u32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOverflow(pub Team);

/// Raised by [`MatchState::use_timeout`] when the team has none left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoTimeoutsLeft(pub Team);

impl MatchState {
    /// Fresh state: zero scores and fouls, full timeouts, period 1, home possession.
    pub fn new() -> Self {
        Self::default()
    }

    /// Points per team.
    pub fn score(&self) -> PerTeam<u32> {
        self.score
    }

    /// Fouls per team.
    pub fn fouls(&self) -> PerTeam<u32> {
        self.fouls
    }

    /// Timeouts left per team.
    pub fn timeouts_remaining(&self) -> PerTeam<u8> {
        self.timeouts_remaining
    }

    /// Team holding the possession arrow.
    pub fn possession(&self) -> Team {
        self.possession
    }

    /// Current period, starting at 1.
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Add `points` to `team`. Fails without mutation when the total would not fit,
    /// so a later `undo_score` is always the exact inverse.
    pub fn add_score(&mut self, team: Team, points: u32) -> Result<(), ScoreOverflow> {
        let total = self.score[team]
            .checked_add(points)
            .ok_or(ScoreOverflow(team))?;
        self.score[team] = total;
        Ok(())
    }

    /// Charge `team` with one foul.
    pub fn add_foul(&mut self, team: Team) {
        self.fouls[team] = self.fouls[team].saturating_add(1);
    }

    /// Spend one timeout, leaving the counter untouched when none are left.
    pub fn use_timeout(&mut self, team: Team) -> Result<(), NoTimeoutsLeft> {
        let remaining = &mut self.timeouts_remaining[team];
        if *remaining == 0 {
            return Err(NoTimeoutsLeft(team));
        }
        *remaining -= 1;
        Ok(())
    }

    /// Remove `points` from `team`, stopping at zero.
    pub fn undo_score(&mut self, team: Team, points: u32) {
        self.score[team] = self.score[team].saturating_sub(points);
    }

    /// Remove one foul from `team`, stopping at zero.
    pub fn undo_foul(&mut self, team: Team) {
        self.fouls[team] = self.fouls[team].saturating_sub(1);
    }

    /// Give one timeout back to `team`, up to [`MAX_TIMEOUTS`].
    pub fn undo_timeout(&mut self, team: Team) {
        let remaining = &mut self.timeouts_remaining[team];
        *remaining = (*remaining + 1).min(MAX_TIMEOUTS);
    }

    /// Give the possession arrow to `team`.
    pub fn set_possession(&mut self, team: Team) {
        self.possession = team;
    }

    /// Team with strictly more points, `None` on a tie.
    pub fn leader(&self) -> Option<Team> {
        leader_of(self.score)
    }

    pub(crate) fn set_period(&mut self, period: u32) {
        self.period = period.max(1);
    }

    /// Zero the counters and go back to period 1. Possession is kept.
    pub(crate) fn reset_counters(&mut self) {
        self.score = PerTeam::default();
        self.fouls = PerTeam::default();
        self.timeouts_remaining = PerTeam::splat(MAX_TIMEOUTS);
        self.period = 1;
    }
}

/// Leader for a pair of scores, `None` on a tie.
pub fn leader_of(score: PerTeam<u32>) -> Option<Team> {
    if score.home > score.away {
        Some(Team::Home)
    } else if score.away > score.home {
        Some(Team::Away)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_full_timeouts_in_first_period() {
        let state = MatchState::new();
        assert_eq!(state.score(), PerTeam { home: 0, away: 0 });
        assert_eq!(state.timeouts_remaining(), PerTeam::splat(MAX_TIMEOUTS));
        assert_eq!(state.period(), 1);
        assert_eq!(state.possession(), Team::Home);
    }

    #[test]
    fn use_timeout_fails_at_zero_without_mutation() {
        let mut state = MatchState::new();
        for _ in 0..MAX_TIMEOUTS {
            state.use_timeout(Team::Away).unwrap();
        }
        let before = state.clone();
        assert_eq!(state.use_timeout(Team::Away), Err(NoTimeoutsLeft(Team::Away)));
        assert_eq!(state, before);
    }

    #[test]
    fn inverse_operations_clamp() {
        let mut state = MatchState::new();
        state.undo_foul(Team::Home);
        state.undo_foul(Team::Home);
        assert_eq!(state.fouls().home, 0);

        state.undo_timeout(Team::Home);
        assert_eq!(state.timeouts_remaining().home, MAX_TIMEOUTS);

        state.add_score(Team::Home, 2).unwrap();
        state.undo_score(Team::Home, 3);
        assert_eq!(state.score().home, 0);
    }

    #[test]
    fn timeouts_stay_in_bounds_for_mixed_sequences() {
        let mut state = MatchState::new();
        for step in 0..40u32 {
            if step % 3 == 0 {
                state.undo_timeout(Team::Home);
            } else {
                let _ = state.use_timeout(Team::Home);
            }
            assert!(state.timeouts_remaining().home <= MAX_TIMEOUTS);
        }
    }

    #[test]
    fn score_overflow_is_rejected_without_mutation() {
        let mut state = MatchState::new();
        state.add_score(Team::Home, u32::MAX - 1).unwrap();
        let before = state.clone();

        assert_eq!(state.add_score(Team::Home, 2), Err(ScoreOverflow(Team::Home)));
        assert_eq!(state, before);

        state.add_score(Team::Home, 1).unwrap();
        state.undo_score(Team::Home, 1);
        assert_eq!(state, before);
    }

    #[test]
    fn leader_requires_strict_lead() {
        let mut state = MatchState::new();
        assert_eq!(state.leader(), None);
        state.add_score(Team::Away, 3).unwrap();
        assert_eq!(state.leader(), Some(Team::Away));
        state.add_score(Team::Home, 3).unwrap();
        assert_eq!(state.leader(), None);
    }

    #[test]
    fn per_team_indexing_targets_the_right_side() {
        let mut pair = PerTeam::splat(0u32);
        pair[Team::Away] = 7;
        assert_eq!(pair.home, 0);
        assert_eq!(pair[Team::Away], 7);
        assert_eq!(Team::Home.other(), Team::Away);
    }
}
