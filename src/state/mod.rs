/// Game clock and the tick scheduling seam.
pub mod clock;
/// Match controller façade.
pub mod controller;
/// Snapshots, cues, log entries and collaborator traits.
pub mod events;
/// Score, fouls, timeouts, possession and period.
pub mod match_state;
/// Period transitions and auto-advance.
pub mod period;
/// Team names and notes.
pub mod roster;
mod sse;
/// In-memory play-by-play transcript.
pub mod transcript;
/// Bounded undo history.
pub mod undo;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::AppConfig,
    services::{
        clock_service::{TickReceiver, TokioTicker},
        sse_events,
    },
};

pub use self::sse::SseHub;
use self::{controller::MatchController, roster::TeamRoster, transcript::Transcript};

/// Shared handle passed to every route and background task.
pub type SharedState = Arc<AppState>;

/// Capacity of the public SSE broadcast channel. Ticks alone produce one event per second.
pub const PUBLIC_SSE_CAPACITY: usize = 64;

/// Central application state owning the single match session and the UI-side stores.
///
/// Every mutation of the match goes through one mutex, so user actions and clock ticks
/// are applied one at a time and never interleave.
pub struct AppState {
    controller: Mutex<MatchController>,
    public_sse: SseHub,
    roster: Arc<TeamRoster>,
    transcript: Arc<Transcript>,
}

impl AppState {
    /// Construct the shared state and hand back the receiving end of the tick channel,
    /// which the caller drives with [`crate::services::clock_service::run_tick_pump`].
    pub fn new(config: &AppConfig) -> (SharedState, TickReceiver) {
        let (ticker, ticks) = TokioTicker::channel();
        let public_sse = SseHub::new(PUBLIC_SSE_CAPACITY);
        let roster = Arc::new(TeamRoster::new(config.default_names()));
        let transcript = Arc::new(Transcript::new());

        let collaborators =
            sse_events::collaborators(public_sse.clone(), roster.clone(), transcript.clone());
        let controller =
            MatchController::new(config.match_settings(), Box::new(ticker), collaborators);

        let state = Arc::new(Self {
            controller: Mutex::new(controller),
            public_sse,
            roster,
            transcript,
        });
        (state, ticks)
    }

    /// Run `f` with exclusive access to the match controller.
    pub async fn with_controller<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut MatchController) -> T,
    {
        let mut guard = self.controller.lock().await;
        f(&mut guard)
    }

    /// Broadcast hub used for the public SSE stream.
    pub fn public_sse(&self) -> &SseHub {
        &self.public_sse
    }

    /// Team names and notes shown next to the scoreboard.
    pub fn roster(&self) -> &TeamRoster {
        &self.roster
    }

    /// Play-by-play transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}
