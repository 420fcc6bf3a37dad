/// Tokio-backed clock ticker and the pump that feeds ticks to the controller.
pub mod clock_service;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Match control operations behind the HTTP routes.
pub mod match_service;
/// SSE-backed renderer, audio cue and transcript collaborators.
pub mod sse_events;
/// Server-Sent Events streaming service.
pub mod sse_service;
/// Team name and notes updates.
pub mod team_service;
