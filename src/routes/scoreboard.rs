use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use validator::Validate;

use crate::{
    dto::{
        scoreboard::{
            OutcomeResponse, PeriodResponse, ScoreRequest, ScoreboardSnapshot, TeamRequest,
            UndoResponse,
        },
        settings::SettingsDto,
    },
    error::AppError,
    services::match_service,
    state::SharedState,
};

/// Match control endpoints driven by the operator console.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/match", get(get_match))
        .route("/match/score", post(score))
        .route("/match/foul", post(foul))
        .route("/match/timeout", post(timeout))
        .route("/match/undo", post(undo))
        .route("/match/possession", post(possession))
        .route("/match/period/next", post(next_period))
        .route("/match/period/previous", post(previous_period))
        .route("/match/clock/toggle", post(toggle_clock))
        .route("/match/clock/reset", post(reset_clock))
        .route("/match/end", post(end_game))
        .route("/match/new", post(new_game))
        .route("/match/reset", post(full_reset))
        .route("/match/settings", get(get_settings).put(update_settings))
}

/// Current scoreboard.
#[utoipa::path(
    get,
    path = "/match",
    tag = "match",
    responses((status = 200, description = "Current scoreboard", body = ScoreboardSnapshot))
)]
pub async fn get_match(State(state): State<SharedState>) -> Json<ScoreboardSnapshot> {
    Json(match_service::scoreboard(&state).await)
}

/// Add points for a team.
#[utoipa::path(
    post,
    path = "/match/score",
    tag = "match",
    request_body = ScoreRequest,
    responses(
        (status = 200, description = "Points added", body = ScoreboardSnapshot),
        (status = 400, description = "Points outside 1..=10")
    )
)]
pub async fn score(
    State(state): State<SharedState>,
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreboardSnapshot>, AppError> {
    payload.validate()?;
    Ok(Json(match_service::score(&state, payload).await?))
}

/// Record a foul.
#[utoipa::path(
    post,
    path = "/match/foul",
    tag = "match",
    request_body = TeamRequest,
    responses((status = 200, description = "Foul recorded", body = ScoreboardSnapshot))
)]
pub async fn foul(
    State(state): State<SharedState>,
    Json(payload): Json<TeamRequest>,
) -> Json<ScoreboardSnapshot> {
    Json(match_service::foul(&state, payload).await)
}

/// Spend a timeout.
#[utoipa::path(
    post,
    path = "/match/timeout",
    tag = "match",
    request_body = TeamRequest,
    responses(
        (status = 200, description = "Timeout used", body = ScoreboardSnapshot),
        (status = 409, description = "No timeouts left for that team")
    )
)]
pub async fn timeout(
    State(state): State<SharedState>,
    Json(payload): Json<TeamRequest>,
) -> Result<Json<ScoreboardSnapshot>, AppError> {
    Ok(Json(match_service::timeout(&state, payload).await?))
}

/// Revert the last score, foul or timeout.
#[utoipa::path(
    post,
    path = "/match/undo",
    tag = "match",
    responses(
        (status = 200, description = "Action reverted", body = UndoResponse),
        (status = 409, description = "Nothing to undo")
    )
)]
pub async fn undo(State(state): State<SharedState>) -> Result<Json<UndoResponse>, AppError> {
    Ok(Json(match_service::undo(&state).await?))
}

/// Give the possession arrow to a team.
#[utoipa::path(
    post,
    path = "/match/possession",
    tag = "match",
    request_body = TeamRequest,
    responses((status = 200, description = "Possession arrow set", body = ScoreboardSnapshot))
)]
pub async fn possession(
    State(state): State<SharedState>,
    Json(payload): Json<TeamRequest>,
) -> Json<ScoreboardSnapshot> {
    Json(match_service::set_possession(&state, payload).await)
}

/// Move to the next period and restart the clock.
#[utoipa::path(
    post,
    path = "/match/period/next",
    tag = "match",
    responses((status = 200, description = "Next period started", body = PeriodResponse))
)]
pub async fn next_period(State(state): State<SharedState>) -> Json<PeriodResponse> {
    Json(match_service::next_period(&state).await)
}

/// Move back one period and restart the clock.
#[utoipa::path(
    post,
    path = "/match/period/previous",
    tag = "match",
    responses((status = 200, description = "Previous period restarted", body = PeriodResponse))
)]
pub async fn previous_period(State(state): State<SharedState>) -> Json<PeriodResponse> {
    Json(match_service::previous_period(&state).await)
}

/// Start or pause the game clock.
#[utoipa::path(
    post,
    path = "/match/clock/toggle",
    tag = "clock",
    responses((status = 200, description = "Clock started or paused", body = ScoreboardSnapshot))
)]
pub async fn toggle_clock(State(state): State<SharedState>) -> Json<ScoreboardSnapshot> {
    Json(match_service::toggle_clock(&state).await)
}

/// Stop the clock and rewind it to the period length.
#[utoipa::path(
    post,
    path = "/match/clock/reset",
    tag = "clock",
    responses((status = 200, description = "Clock stopped at full length", body = ScoreboardSnapshot))
)]
pub async fn reset_clock(State(state): State<SharedState>) -> Json<ScoreboardSnapshot> {
    Json(match_service::reset_clock(&state).await)
}

/// End the game and announce the result.
#[utoipa::path(
    post,
    path = "/match/end",
    tag = "match",
    responses((status = 200, description = "Final result", body = OutcomeResponse))
)]
pub async fn end_game(State(state): State<SharedState>) -> Json<OutcomeResponse> {
    Json(match_service::end_game(&state).await)
}

/// Start a new game, keeping team names.
#[utoipa::path(
    post,
    path = "/match/new",
    tag = "match",
    responses((status = 200, description = "Fresh game, team names kept", body = ScoreboardSnapshot))
)]
pub async fn new_game(State(state): State<SharedState>) -> Json<ScoreboardSnapshot> {
    Json(match_service::new_game(&state).await)
}

/// Start a new game and restore default team names.
#[utoipa::path(
    post,
    path = "/match/reset",
    tag = "match",
    responses((status = 200, description = "Fresh game with default team names", body = ScoreboardSnapshot))
)]
pub async fn full_reset(State(state): State<SharedState>) -> Json<ScoreboardSnapshot> {
    Json(match_service::full_reset(&state).await)
}

/// Current period length and auto-advance flag.
#[utoipa::path(
    get,
    path = "/match/settings",
    tag = "settings",
    responses((status = 200, description = "Current settings", body = SettingsDto))
)]
pub async fn get_settings(State(state): State<SharedState>) -> Json<SettingsDto> {
    Json(match_service::settings(&state).await)
}

/// Change the period length or the auto-advance flag.
#[utoipa::path(
    put,
    path = "/match/settings",
    tag = "settings",
    request_body = SettingsDto,
    responses(
        (status = 200, description = "Settings applied", body = SettingsDto),
        (status = 400, description = "Period length out of range")
    )
)]
pub async fn update_settings(
    State(state): State<SharedState>,
    Json(payload): Json<SettingsDto>,
) -> Result<Json<SettingsDto>, AppError> {
    payload.validate()?;
    Ok(Json(match_service::update_settings(&state, payload).await))
}
