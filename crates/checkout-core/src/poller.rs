//! # Approval Poller
//!
//! Generic polling loop used by both provider adapters to wait for
//! out-of-band user approval. The provider is asked for the resource state
//! once per interval; the loop ends when the check reports approval or when
//! the waiting surface is dismissed (cancellation).
//!
//! Single-flight rule: a tick that fires while a check is still in flight is
//! skipped, never queued, so at most one check is outstanding per series.
//! Cancellation does not abort an in-flight check; a verdict that arrives
//! after cancellation is discarded.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What a single status check concluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<T> {
    /// The user approved; carries the last-seen provider payload.
    Approved(T),
    /// Not approved yet (including transient check failures).
    Pending,
}

/// How a polling series ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// Approval was detected; carries the check's payload.
    Approved(T),
    /// The waiting surface was dismissed before approval. No answer.
    Abandoned,
}

impl<T> PollOutcome<T> {
    pub fn is_abandoned(&self) -> bool {
        matches!(self, PollOutcome::Abandoned)
    }
}

/// Per-tick state handed to the check function.
#[derive(Debug, Clone, Copy)]
pub struct PollTick {
    /// 1-based count of checks performed in this series.
    pub attempt: u64,
}

/// Interval-driven approval polling.
pub struct ApprovalPoller {
    interval: Duration,
    cancel: CancellationToken,
}

impl ApprovalPoller {
    /// A poller ticking every `interval`, cancelled by `cancel`.
    pub fn new(interval: Duration, cancel: CancellationToken) -> Self {
        Self { interval, cancel }
    }

    /// Run the series until approval or cancellation.
    ///
    /// `check` performs one provider round trip and must resolve `Pending`
    /// on any state other than approval, including request failures; the
    /// next tick retries it.
    pub async fn run<T, F, Fut>(&self, mut check: F) -> PollOutcome<T>
    where
        F: FnMut(PollTick) -> Fut,
        Fut: Future<Output = Verdict<T>>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        // Ticks that land during an in-flight check are dropped: the
        // single-flight rule.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // An interval's first tick fires immediately; consume it so the
        // first check waits one full interval, like every later one.
        ticker.tick().await;

        let mut attempt: u64 = 0;
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    debug!(attempt, "approval wait dismissed");
                    return PollOutcome::Abandoned;
                }
                _ = ticker.tick() => {}
            }

            attempt += 1;
            let verdict = check(PollTick { attempt }).await;

            // The check is not aborted by cancellation; its verdict is
            // discarded if the surface went away while it was in flight.
            if self.cancel.is_cancelled() {
                debug!(attempt, "discarding check result after dismissal");
                return PollOutcome::Abandoned;
            }

            if let Verdict::Approved(payload) = verdict {
                debug!(attempt, "approval detected");
                return PollOutcome::Approved(payload);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_approves_after_pending_checks() {
        let poller = ApprovalPoller::new(Duration::from_millis(100), CancellationToken::new());
        let calls = Arc::new(AtomicU64::new(0));
        let counter = calls.clone();

        let outcome = poller
            .run(|_tick| {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n >= 3 {
                        Verdict::Approved("ord_123")
                    } else {
                        Verdict::Pending
                    }
                }
            })
            .await;

        assert_eq!(outcome, PollOutcome::Approved("ord_123"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_flight_slow_check() {
        // A check spanning several tick periods must not overlap the next
        // one: ticks during the check are skipped, so two slow checks mean
        // exactly two calls even though six intervals elapse.
        let poller = ApprovalPoller::new(Duration::from_millis(100), CancellationToken::new());
        let calls = Arc::new(AtomicU64::new(0));
        let in_flight = Arc::new(AtomicU64::new(0));
        let counter = calls.clone();
        let gauge = in_flight.clone();

        let outcome = poller
            .run(|_tick| {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                let gauge = gauge.clone();
                async move {
                    assert_eq!(gauge.fetch_add(1, Ordering::SeqCst), 0, "overlapping checks");
                    tokio::time::sleep(Duration::from_millis(250)).await;
                    gauge.fetch_sub(1, Ordering::SeqCst);
                    if n == 2 {
                        Verdict::Approved(())
                    } else {
                        Verdict::Pending
                    }
                }
            })
            .await;

        assert_eq!(outcome, PollOutcome::Approved(()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandonment_is_silent() {
        let cancel = CancellationToken::new();
        let poller = ApprovalPoller::new(Duration::from_millis(100), cancel.clone());
        let calls = Arc::new(AtomicU64::new(0));
        let counter = calls.clone();

        let waiter = tokio::spawn(async move {
            poller
                .run(move |_tick| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { Verdict::<()>::Pending }
                })
                .await
        });

        tokio::time::sleep(Duration::from_millis(350)).await;
        cancel.cancel();

        let outcome = waiter.await.unwrap();
        assert!(outcome.is_abandoned());
        // A few pending checks ran, none of them completed the wait.
        assert!(calls.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_result_discarded_after_cancel() {
        // Approval arriving from a check that was in flight when the
        // surface was dismissed must not be acted upon.
        let cancel = CancellationToken::new();
        let poller = ApprovalPoller::new(Duration::from_millis(100), cancel.clone());
        let dismiss = cancel.clone();

        let outcome = poller
            .run(move |_tick| {
                let dismiss = dismiss.clone();
                async move {
                    dismiss.cancel();
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    Verdict::Approved("too_late")
                }
            })
            .await;

        assert!(outcome.is_abandoned());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_first_tick() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let poller = ApprovalPoller::new(Duration::from_secs(3600), cancel);

        let outcome = poller
            .run(|_tick| async { Verdict::Approved(()) })
            .await;

        assert!(outcome.is_abandoned());
    }
}
