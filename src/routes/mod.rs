use axum::Router;

use crate::state::SharedState;

/// Swagger UI.
pub mod docs;
/// Health check route.
pub mod health;
/// Transcript route.
pub mod log;
/// Match control routes.
pub mod scoreboard;
/// Server-sent events stream.
pub mod sse;
/// Team profile routes.
pub mod teams;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(sse::router())
        .merge(scoreboard::router())
        .merge(teams::router())
        .merge(log::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
