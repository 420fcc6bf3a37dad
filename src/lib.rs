//! Library crate for courtside-back, exposing modules for binaries and tests.

mod config;
mod dto;
mod error;
/// HTTP route trees.
pub mod routes;
/// Service layer between routes and match state.
pub mod services;
/// Match core and shared application state.
pub mod state;
