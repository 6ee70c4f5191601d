use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tracing::trace;

/// Enforces a minimum interval between consecutive requests.
#[derive(Debug)]
pub(crate) struct Pacer {
    interval: Duration,
    last: Option<Instant>,
}

impl Pacer {
    pub(crate) fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Wait until the next request is allowed, then claim the slot.
    pub(crate) async fn wait(&mut self) {
        if let Some(last) = self.last {
            let next = last + self.interval;
            if Instant::now() < next {
                trace!(wait_ms = (next - Instant::now()).as_millis() as u64, "pacing");
                sleep_until(next).await;
            }
        }
        self.last = Some(Instant::now());
    }
}
