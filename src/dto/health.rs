use serde::Serialize;
use utoipa::ToSchema;

/// Health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status, always "ok" while the server answers.
    pub status: String,
    /// Number of displays subscribed to the public SSE stream.
    pub displays: usize,
    /// Whether the game clock is counting down.
    pub clock_running: bool,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(displays: usize, clock_running: bool) -> Self {
        Self {
            status: "ok".to_string(),
            displays,
            clock_running,
        }
    }
}
