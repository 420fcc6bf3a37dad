use serde::Serialize;
use utoipa::ToSchema;

use crate::dto::team::TeamProfileDto;

#[derive(Clone, Debug)]
/// Dispatched payload carried across SSE channels.
pub struct ServerEvent {
    /// SSE event name, if any.
    pub event: Option<String>,
    /// Encoded payload.
    pub data: String,
}

impl ServerEvent {
    /// Build an event from an already encoded payload.
    pub fn new(event: Option<String>, data: String) -> Self {
        Self { event, data }
    }

    /// Convenience wrapper that serialises `payload` into the SSE data field.
    pub fn json<E, T>(event: E, payload: &T) -> serde_json::Result<Self>
    where
        E: Into<Option<String>>,
        T: Serialize,
    {
        Ok(Self {
            event: event.into(),
            data: serde_json::to_string(payload)?,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Audio cue with the tone a display should play for it.
pub struct CueEvent {
    /// Cue name (`scored`, `fouled`, `timeout_used`, `undone`, `period_ended`,
    /// `near_expiry`, `game_ended`, `possession_changed`).
    pub cue: String,
    /// Tone frequency in hertz.
    pub frequency_hz: u32,
    /// Tone duration in milliseconds.
    pub duration_ms: u32,
}

#[derive(Debug, Serialize, ToSchema)]
/// A transcript line appended to the play-by-play log.
pub struct LogLineEvent {
    /// Time-stamped line.
    pub line: String,
    /// Set when the transcript was cleared before this line.
    pub cleared: bool,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a full reset restored team names and cleared notes.
pub struct TeamsResetEvent {
    /// Profiles after the reset.
    pub teams: Vec<TeamProfileDto>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Broadcast when a team profile changed.
pub struct TeamUpdatedEvent {
    /// Profile after the change.
    pub team: TeamProfileDto,
}
