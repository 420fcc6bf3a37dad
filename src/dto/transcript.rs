use serde::Serialize;
use utoipa::ToSchema;

/// Play-by-play transcript of the current game.
#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptResponse {
    /// Lines in chronological order, each prefixed with `[HH:MM:SS]`.
    pub lines: Vec<String>,
}
