//! SSE-backed collaborators of the match controller: the scoreboard renderer, the
//! audio cue feed and the transcript writer.

use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::{
    dto::{
        format_wall_clock, now_local,
        scoreboard::ScoreboardSnapshot,
        sse::{CueEvent, LogLineEvent, ServerEvent, TeamUpdatedEvent, TeamsResetEvent},
        team::{TeamProfileDto, TeamsResponse},
    },
    state::{
        SseHub,
        events::{
            AudioCues, CollaboratorError, Collaborators, Cue, LogEntry, PlayLog, Renderer, Snapshot,
        },
        roster::TeamRoster,
        transcript::Transcript,
    },
};

const EVENT_SCOREBOARD: &str = "scoreboard";
const EVENT_CUE: &str = "cue";
const EVENT_LOG: &str = "log";
const EVENT_TEAMS_RESET: &str = "teams.reset";
const EVENT_TEAM_UPDATED: &str = "team.updated";
const EVENT_INFO: &str = "info";

/// Wire the three collaborators onto the public hub.
pub fn collaborators(
    hub: SseHub,
    roster: Arc<TeamRoster>,
    transcript: Arc<Transcript>,
) -> Collaborators {
    Collaborators {
        renderer: Box::new(SseRenderer {
            hub: hub.clone(),
            roster: roster.clone(),
        }),
        audio: Box::new(SseAudio { hub: hub.clone() }),
        log: Box::new(TranscriptLog {
            hub,
            roster,
            transcript,
        }),
    }
}

/// Pushes scoreboard snapshots, with team names resolved, to every display.
pub struct SseRenderer {
    hub: SseHub,
    roster: Arc<TeamRoster>,
}

impl Renderer for SseRenderer {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), CollaboratorError> {
        let payload = ScoreboardSnapshot::new(snapshot, self.roster.as_ref());
        send_event(&self.hub, EVENT_SCOREBOARD, &payload).map_err(|err| {
            CollaboratorError::new("render", format!("failed to encode scoreboard: {err}"))
        })
    }

    fn clear_team_fields(&mut self) -> Result<(), CollaboratorError> {
        self.roster.reset();
        let payload = TeamsResetEvent {
            teams: TeamsResponse::from(self.roster.as_ref()).teams,
        };
        send_event(&self.hub, EVENT_TEAMS_RESET, &payload).map_err(|err| {
            CollaboratorError::new("render", format!("failed to encode team reset: {err}"))
        })
    }
}

/// Forwards audio cues; displays decide whether to play them.
pub struct SseAudio {
    hub: SseHub,
}

impl AudioCues for SseAudio {
    fn cue(&mut self, cue: Cue) -> Result<(), CollaboratorError> {
        let (frequency_hz, duration_ms) = tone(cue);
        let payload = CueEvent {
            cue: cue.as_str().to_string(),
            frequency_hz,
            duration_ms,
        };
        send_event(&self.hub, EVENT_CUE, &payload)
            .map_err(|err| CollaboratorError::new("audio", format!("failed to encode cue: {err}")))
    }
}

/// Beep frequency (Hz) and duration (ms) for each cue.
pub fn tone(cue: Cue) -> (u32, u32) {
    match cue {
        Cue::Scored => (880, 60),
        Cue::Fouled => (220, 80),
        Cue::TimeoutUsed => (440, 80),
        Cue::Undone => (300, 60),
        Cue::PeriodEnded => (150, 180),
        Cue::NearExpiry => (1000, 20),
        Cue::GameEnded => (600, 180),
        Cue::PossessionChanged => (520, 40),
    }
}

/// Writes time-stamped lines into the transcript and streams them to displays.
pub struct TranscriptLog {
    hub: SseHub,
    roster: Arc<TeamRoster>,
    transcript: Arc<Transcript>,
}

impl PlayLog for TranscriptLog {
    fn record(&mut self, entry: &LogEntry) -> Result<(), CollaboratorError> {
        let cleared = entry.starts_new_transcript();
        if cleared {
            self.transcript.clear();
        }

        let line = format!(
            "[{}] {}",
            format_wall_clock(now_local()),
            entry.describe(self.roster.as_ref())
        );
        self.transcript.append(line.clone());

        send_event(&self.hub, EVENT_LOG, &LogLineEvent { line, cleared }).map_err(|err| {
            CollaboratorError::new("log", format!("failed to encode log line: {err}"))
        })
    }
}

/// Broadcast that a team profile changed.
pub fn broadcast_team_updated(hub: &SseHub, team: TeamProfileDto) {
    if let Err(err) = send_event(hub, EVENT_TEAM_UPDATED, &TeamUpdatedEvent { team }) {
        warn!(event = EVENT_TEAM_UPDATED, error = %err, "failed to serialize public SSE payload");
    }
}

/// Broadcast the given scoreboard, e.g. to bring a newly connected display up to date.
pub fn broadcast_scoreboard(hub: &SseHub, scoreboard: &ScoreboardSnapshot) {
    if let Err(err) = send_event(hub, EVENT_SCOREBOARD, scoreboard) {
        warn!(event = EVENT_SCOREBOARD, error = %err, "failed to serialize public SSE payload");
    }
}

/// Send a human-readable info message onto the public SSE stream.
pub fn broadcast_info(hub: &SseHub, message: &str) {
    hub.broadcast(ServerEvent::new(
        Some(EVENT_INFO.to_string()),
        message.to_string(),
    ));
}

fn send_event(hub: &SseHub, event: &str, payload: &impl Serialize) -> serde_json::Result<()> {
    let event = ServerEvent::json(Some(event.to_string()), payload)?;
    hub.broadcast(event);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{
        clock::ClockPhase,
        match_state::{PerTeam, Team},
    };

    fn roster() -> Arc<TeamRoster> {
        Arc::new(TeamRoster::new(PerTeam {
            home: "Home".into(),
            away: "Others".into(),
        }))
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            score: PerTeam { home: 0, away: 3 },
            fouls: PerTeam::splat(0),
            timeouts_remaining: PerTeam::splat(5),
            possession: Team::Home,
            period: 2,
            clock: "00:04".into(),
            remaining_secs: 4,
            period_length_secs: 720,
            running: true,
            clock_phase: ClockPhase::Running,
            undo_depth: 1,
        }
    }

    #[tokio::test]
    async fn renderer_publishes_named_scoreboard() {
        let hub = SseHub::new(8);
        let mut rx = hub.subscribe();
        let roster = roster();
        roster.update(Team::Home, Some("Lions".into()), None);

        let mut renderer = SseRenderer {
            hub: hub.clone(),
            roster,
        };
        renderer.render(&snapshot()).unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event.as_deref(), Some(EVENT_SCOREBOARD));
        let json: serde_json::Value = serde_json::from_str(&event.data).unwrap();
        assert_eq!(json["home_name"], "Lions");
        assert_eq!(json["leader"], "away");
        assert_eq!(json["clock"], "00:04");
    }

    #[tokio::test]
    async fn clearing_team_fields_resets_the_roster() {
        let hub = SseHub::new(8);
        let mut rx = hub.subscribe();
        let roster = roster();
        roster.update(Team::Away, Some("Bears".into()), Some("tall".into()));

        let mut renderer = SseRenderer {
            hub,
            roster: roster.clone(),
        };
        renderer.clear_team_fields().unwrap();

        assert_eq!(roster.profile(Team::Away).name, "Others");
        assert_eq!(roster.profile(Team::Away).notes, "");
        let event = rx.recv().await.unwrap();
        assert_eq!(event.event.as_deref(), Some(EVENT_TEAMS_RESET));
    }

    #[tokio::test]
    async fn audio_cue_carries_tone() {
        let hub = SseHub::new(8);
        let mut rx = hub.subscribe();
        SseAudio { hub }.cue(Cue::NearExpiry).unwrap();

        let event = rx.recv().await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&event.data).unwrap();
        assert_eq!(json["cue"], "near_expiry");
        assert_eq!(json["frequency_hz"], 1000);
    }

    #[test]
    fn transcript_is_cleared_by_new_game() {
        let transcript = Arc::new(Transcript::new());
        let mut log = TranscriptLog {
            hub: SseHub::new(8),
            roster: roster(),
            transcript: transcript.clone(),
        };

        log.record(&LogEntry::PossessionChanged(Team::Away)).unwrap();
        log.record(&LogEntry::PeriodEnded(1)).unwrap();
        assert_eq!(transcript.lines().len(), 2);
        assert!(transcript.lines()[0].ends_with("] Possession -> Others"));

        log.record(&LogEntry::NewGame).unwrap();
        let lines = transcript.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] New game started"));
    }
}
