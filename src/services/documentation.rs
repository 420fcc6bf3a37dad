use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI document for the courtside scoreboard.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::public_stream,
        crate::routes::log::transcript,
        crate::routes::scoreboard::get_match,
        crate::routes::scoreboard::score,
        crate::routes::scoreboard::foul,
        crate::routes::scoreboard::timeout,
        crate::routes::scoreboard::undo,
        crate::routes::scoreboard::possession,
        crate::routes::scoreboard::next_period,
        crate::routes::scoreboard::previous_period,
        crate::routes::scoreboard::toggle_clock,
        crate::routes::scoreboard::reset_clock,
        crate::routes::scoreboard::end_game,
        crate::routes::scoreboard::new_game,
        crate::routes::scoreboard::full_reset,
        crate::routes::scoreboard::get_settings,
        crate::routes::scoreboard::update_settings,
        crate::routes::teams::list_teams,
        crate::routes::teams::update_team,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::scoreboard::ScoreRequest,
            crate::dto::scoreboard::TeamRequest,
            crate::dto::scoreboard::TeamTotals,
            crate::dto::scoreboard::ClockPhaseDto,
            crate::dto::scoreboard::ScoreboardSnapshot,
            crate::dto::scoreboard::UndoneKind,
            crate::dto::scoreboard::UndoResponse,
            crate::dto::scoreboard::PeriodResponse,
            crate::dto::scoreboard::OutcomeResponse,
            crate::dto::settings::SettingsDto,
            crate::dto::team::TeamProfileDto,
            crate::dto::team::TeamsResponse,
            crate::dto::team::UpdateTeamRequest,
            crate::dto::transcript::TranscriptResponse,
            crate::dto::sse::CueEvent,
            crate::dto::sse::LogLineEvent,
            crate::dto::sse::TeamsResetEvent,
            crate::dto::sse::TeamUpdatedEvent,
            crate::state::match_state::Team,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sse", description = "Server-sent events streams"),
        (name = "match", description = "Scoring, fouls, timeouts, periods and game lifecycle"),
        (name = "clock", description = "Game clock control"),
        (name = "settings", description = "Period length and auto-advance"),
        (name = "teams", description = "Team names and notes"),
    )
)]
pub struct ApiDoc;
