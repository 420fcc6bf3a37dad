use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, put},
};
use validator::Validate;

use crate::{
    dto::team::{TeamProfileDto, TeamsResponse, UpdateTeamRequest},
    error::AppError,
    services::team_service,
    state::{SharedState, match_state::Team},
};

/// Team name and notes endpoints.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/teams", get(list_teams))
        .route("/teams/{team}", put(update_team))
}

/// List both team profiles.
#[utoipa::path(
    get,
    path = "/teams",
    tag = "teams",
    responses((status = 200, description = "Both team profiles", body = TeamsResponse))
)]
pub async fn list_teams(State(state): State<SharedState>) -> Json<TeamsResponse> {
    Json(team_service::teams(&state))
}

/// Rename a team or edit its notes. A blank name restores the default.
#[utoipa::path(
    put,
    path = "/teams/{team}",
    tag = "teams",
    params(("team" = Team, Path, description = "Side to update")),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = TeamProfileDto),
        (status = 400, description = "Name too long or contains control characters")
    )
)]
pub async fn update_team(
    State(state): State<SharedState>,
    Path(team): Path<Team>,
    Json(payload): Json<UpdateTeamRequest>,
) -> Result<Json<TeamProfileDto>, AppError> {
    payload.validate()?;
    Ok(Json(team_service::update_team(&state, team, payload).await))
}
