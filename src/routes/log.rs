use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::transcript::TranscriptResponse, state::SharedState};

#[utoipa::path(
    get,
    path = "/log",
    tag = "match",
    responses((status = 200, description = "Play-by-play transcript, oldest first", body = TranscriptResponse))
)]
/// Return the play-by-play transcript of the current game.
pub async fn transcript(State(state): State<SharedState>) -> Json<TranscriptResponse> {
    Json(TranscriptResponse {
        lines: state.transcript().lines(),
    })
}

/// Configure the transcript route.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/log", get(transcript))
}
