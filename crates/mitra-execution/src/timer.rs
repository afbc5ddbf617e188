//! Cancellable timers that post events back to their owner.
//!
//! Timers carry no domain state. Each one runs as a small tokio task bound
//! to a child `CancellationToken` and only sends a prebuilt event over an
//! unbounded channel. Cancelling the parent token, calling `cancel()`, or
//! dropping the handle all stop the task.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

/// A periodic event source.
///
/// The first event is sent one full `period` after spawning, not
/// immediately.
pub struct Ticker {
    token: CancellationToken,
}

impl Ticker {
    pub fn spawn<E>(
        period: Duration,
        parent: &CancellationToken,
        events: mpsc::UnboundedSender<E>,
        event: E,
    ) -> Self
    where
        E: Clone + Send + 'static,
    {
        let token = parent.child_token();
        let cancelled = token.clone();

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        if events.send(event.clone()).is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::trace!(target: "timer", "ticker stopped");
        });

        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// A one-shot delayed event.
pub struct Scheduled {
    token: CancellationToken,
}

impl Scheduled {
    pub fn spawn<E>(
        delay: Duration,
        parent: &CancellationToken,
        events: mpsc::UnboundedSender<E>,
        event: E,
    ) -> Self
    where
        E: Send + 'static,
    {
        let token = parent.child_token();
        let cancelled = token.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancelled.cancelled() => {
                    tracing::trace!(target: "timer", "scheduled event cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    let _ = events.send(event);
                }
            }
        });

        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for Scheduled {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
