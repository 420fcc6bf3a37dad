use std::time::Duration;

use tokio::{
    runtime::Handle,
    sync::mpsc,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, info, warn};

use crate::state::{
    SharedState,
    clock::{TickGeneration, TickOutcome, TickScheduler},
};

/// Delay between two clock ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Receiving end of the tick channel, drained by [`run_tick_pump`].
pub type TickReceiver = mpsc::UnboundedReceiver<TickGeneration>;

/// [`TickScheduler`] backed by a Tokio interval task.
///
/// At most one task is alive: arming aborts the previous task before spawning the new
/// one, and cancelling or dropping the ticker aborts it.
pub struct TokioTicker {
    tx: mpsc::UnboundedSender<TickGeneration>,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl TokioTicker {
    /// Build a one-second ticker together with the receiver its ticks are delivered to.
    pub fn channel() -> (Self, TickReceiver) {
        Self::with_period(TICK_PERIOD)
    }

    /// Same as [`TokioTicker::channel`] with a custom period.
    pub fn with_period(period: Duration) -> (Self, TickReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                period,
                task: None,
            },
            rx,
        )
    }

    /// Whether a repeating task is currently scheduled.
    pub fn is_armed(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl TickScheduler for TokioTicker {
    fn arm(&mut self, generation: TickGeneration) {
        if self.is_armed() {
            debug!(generation, "replacing live tick task");
        }
        self.cancel();

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(err) => {
                warn!(error = %err, "no Tokio runtime available; clock ticks disabled");
                return;
            }
        };

        let tx = self.tx.clone();
        let period = self.period;
        self.task = Some(handle.spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(generation).is_err() {
                    break;
                }
            }
        }));
        debug!(generation, "tick task armed");
    }

    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Apply delivered ticks to the match one at a time until the channel closes.
pub async fn run_tick_pump(state: SharedState, mut ticks: TickReceiver) {
    info!("clock tick pump started");
    while let Some(generation) = ticks.recv().await {
        let outcome = state
            .with_controller(|controller| controller.on_tick(generation))
            .await;
        if outcome == TickOutcome::Expired {
            debug!(generation, "countdown expired");
        }
    }
    info!("clock tick pump stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, timeout};

    #[tokio::test(start_paused = true)]
    async fn delivers_one_tick_per_period_with_the_armed_generation() {
        let (mut ticker, mut rx) = TokioTicker::channel();
        ticker.arm(7);

        advance(TICK_PERIOD).await;
        assert_eq!(rx.recv().await, Some(7));
        advance(TICK_PERIOD).await;
        assert_eq!(rx.recv().await, Some(7));
        assert!(ticker.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_delivery() {
        let (mut ticker, mut rx) = TokioTicker::channel();
        ticker.arm(1);
        advance(TICK_PERIOD).await;
        assert_eq!(rx.recv().await, Some(1));

        ticker.cancel();
        assert!(!ticker.is_armed());
        let next = timeout(TICK_PERIOD * 3, rx.recv()).await;
        assert!(next.is_err(), "no tick may arrive after cancel");
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_previous_task() {
        let (mut ticker, mut rx) = TokioTicker::channel();
        ticker.arm(1);
        ticker.arm(2);

        advance(TICK_PERIOD).await;
        assert_eq!(rx.recv().await, Some(2));
        advance(TICK_PERIOD).await;
        assert_eq!(rx.recv().await, Some(2));
    }
}
