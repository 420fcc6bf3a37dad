use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness along with how many displays are listening and whether the clock runs.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let clock_running = state.with_controller(|c| c.clock().is_running()).await;
    HealthResponse::ok(state.public_sse().subscriber_count(), clock_running)
}
