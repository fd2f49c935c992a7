use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

/// `tokio::time::interval` rejects a zero period
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Fixed-period tick source running as its own task.
///
/// Ticks are numbered from 1 and delivered on the receiver returned by
/// [`Ticker::spawn`]; the receiver yields `None` once the ticker stops.
#[derive(Debug)]
pub struct Ticker {
    task: JoinHandle<()>,
}

impl Ticker {
    /// Start ticking; the first tick fires one `period` from now.
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn(period: Duration) -> (Self, UnboundedReceiver<u64>) {
        let period = period.max(MIN_PERIOD);
        let (tx, rx) = mpsc::unbounded_channel();
        let first = Instant::now() + period;
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut n = 0u64;
            loop {
                interval.tick().await;
                n += 1;
                trace!(tick = n, "tick");
                if tx.send(n).is_err() {
                    break;
                }
            }
        });
        (Self { task }, rx)
    }

    /// Stop the ticker; no tick is delivered after the task winds down
    pub fn cancel(&self) {
        self.task.abort();
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
