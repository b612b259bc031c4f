//! The poll loop.

use crate::{HeightSource, PollConfig, PollError, PollFailure};
use blockpoll_types::{BlockHeight, PollWindow};
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Evaluates a check once per new block until it passes or the window ends.
///
/// The poller owns a height source and a configuration; every call to
/// [`BlockPoller::poll`] runs an independent loop with its own local state,
/// so one poller can serve concurrent polls.
#[derive(Debug, Clone)]
pub struct BlockPoller<H> {
    source: H,
    config: PollConfig,
}

impl<H: HeightSource> BlockPoller<H> {
    /// Create a poller with the default configuration.
    pub fn new(source: H) -> Self {
        Self::with_config(source, PollConfig::default())
    }

    /// Create a poller with a custom configuration.
    pub fn with_config(source: H, config: PollConfig) -> Self {
        Self { source, config }
    }

    /// Poll `check` over `[start, max]`, validating the window first.
    pub async fn poll_range<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        start: BlockHeight,
        max: BlockHeight,
        check: F,
    ) -> Result<T, PollError>
    where
        F: FnMut(BlockHeight) -> Fut,
        Fut: Future<Output = Result<T, PollFailure>>,
    {
        let window = PollWindow::new(start, max)?;
        self.poll(cancel, window, check).await
    }

    /// Poll `check` once per newly observed height within `window`.
    ///
    /// Returns the first success value. A [`PollFailure::Mismatch`] is retried
    /// on the next height; once a mismatch is observed at a height `>= max`
    /// the poll ends with [`PollError::Exhausted`] carrying that mismatch.
    /// The check is never run below `window.start()`, and runs at most once
    /// per distinct height.
    pub async fn poll<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        window: PollWindow,
        check: F,
    ) -> Result<T, PollError>
    where
        F: FnMut(BlockHeight) -> Fut,
        Fut: Future<Output = Result<T, PollFailure>>,
    {
        match self.config.deadline {
            Some(deadline) => {
                match tokio::time::timeout(deadline, self.run(cancel, window, check)).await {
                    Ok(outcome) => outcome,
                    Err(_) => {
                        warn!(%window, ?deadline, "Poll deadline exceeded");
                        Err(PollError::DeadlineExceeded(deadline))
                    }
                }
            }
            None => self.run(cancel, window, check).await,
        }
    }

    async fn run<T, F, Fut>(
        &self,
        cancel: &CancellationToken,
        window: PollWindow,
        mut check: F,
    ) -> Result<T, PollError>
    where
        F: FnMut(BlockHeight) -> Fut,
        Fut: Future<Output = Result<T, PollFailure>>,
    {
        // Lowest height the next attempt may run at. Only ever moves forward.
        let mut next_height = window.start();
        let mut height_errors: u32 = 0;
        let mut attempts: u64 = 0;

        loop {
            if cancel.is_cancelled() {
                debug!(%window, attempts, "Poll cancelled");
                return Err(PollError::Cancelled);
            }

            let read = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(%window, attempts, "Poll cancelled during height read");
                    return Err(PollError::Cancelled);
                }
                read = self.source.current_height() => read,
            };

            let height = match read {
                Ok(height) => {
                    height_errors = 0;
                    height
                }
                Err(e) => {
                    height_errors = height_errors.saturating_add(1);
                    warn!(error = %e, consecutive = height_errors, "Height read failed");
                    if let Some(limit) = self.config.max_height_errors {
                        if height_errors >= limit {
                            return Err(PollError::HeightUnavailable {
                                attempts: height_errors,
                                source: e,
                            });
                        }
                    }
                    self.wait_for_next_height(cancel).await?;
                    continue;
                }
            };

            if height < next_height {
                // No new block yet, or the source regressed.
                trace!(%height, %next_height, "Waiting for next height");
                self.wait_for_next_height(cancel).await?;
                continue;
            }
            next_height = height.next();
            attempts += 1;

            match check(height).await {
                Ok(value) => {
                    debug!(%height, %window, attempts, "Poll condition met");
                    return Ok(value);
                }
                Err(PollFailure::Permanent(reason)) => {
                    warn!(%height, %reason, "Poll condition rejected");
                    return Err(PollError::Rejected { height, reason });
                }
                Err(PollFailure::Mismatch(reason)) => {
                    if window.is_exhausted_at(height) {
                        debug!(%height, %window, attempts, %reason, "Poll window exhausted");
                        return Err(PollError::Exhausted {
                            last_height: height,
                            reason,
                        });
                    }
                    debug!(%height, %reason, "Poll condition not met yet");
                }
            }
        }
    }

    /// Sleep one poll interval, or return early if cancelled.
    async fn wait_for_next_height(&self, cancel: &CancellationToken) -> Result<(), PollError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(PollError::Cancelled),
            _ = tokio::time::sleep(self.config.poll_interval) => Ok(()),
        }
    }
}

/// Poll `check` over `[start, max]` against `source` with default settings.
pub async fn poll<H, T, F, Fut>(
    cancel: &CancellationToken,
    source: &H,
    start: BlockHeight,
    max: BlockHeight,
    check: F,
) -> Result<T, PollError>
where
    H: HeightSource + ?Sized,
    F: FnMut(BlockHeight) -> Fut,
    Fut: Future<Output = Result<T, PollFailure>>,
{
    BlockPoller::new(source)
        .poll_range(cancel, start, max, check)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{height_fn, HeightError};
    use std::future::ready;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tracing_test::traced_test;

    fn fixed(height: u64) -> impl HeightSource {
        height_fn(move || ready(Ok(BlockHeight(height))))
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_at_start_does_not_wait() {
        let cancel = CancellationToken::new();
        let started = tokio::time::Instant::now();

        let value = poll(&cancel, &fixed(10), BlockHeight(10), BlockHeight(20), |h| {
            ready(Ok::<_, PollFailure>(h.0 * 2))
        })
        .await
        .unwrap();

        assert_eq!(value, 20);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_inverted_window_never_checks() {
        let cancel = CancellationToken::new();
        let mut calls = 0;

        let err = poll(&cancel, &fixed(20), BlockHeight(20), BlockHeight(10), |_| {
            calls += 1;
            ready(Ok::<(), PollFailure>(()))
        })
        .await
        .unwrap_err();

        assert!(matches!(err, PollError::InvalidWindow(_)));
        assert_eq!(calls, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_checks_below_start() {
        let counter = Arc::new(AtomicU64::new(3));
        let source = {
            let counter = counter.clone();
            height_fn(move || ready(Ok(BlockHeight(counter.fetch_add(1, Ordering::SeqCst)))))
        };
        let cancel = CancellationToken::new();
        let mut seen = Vec::new();

        let err = poll(&cancel, &source, BlockHeight(6), BlockHeight(7), |h| {
            seen.push(h.0);
            ready(Err::<(), _>(PollFailure::mismatch("not yet")))
        })
        .await
        .unwrap_err();

        assert!(err.is_exhausted());
        assert_eq!(seen, vec![6, 7]);
    }

    #[tokio::test]
    async fn test_permanent_failure_stops_immediately() {
        let cancel = CancellationToken::new();
        let mut calls = 0;

        let err = poll(&cancel, &fixed(4), BlockHeight(1), BlockHeight(100), |_| {
            calls += 1;
            ready(Err::<(), _>(PollFailure::permanent("no such proposal")))
        })
        .await
        .unwrap_err();

        match err {
            PollError::Rejected { height, reason } => {
                assert_eq!(height, BlockHeight(4));
                assert_eq!(reason, "no such proposal");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(calls, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_height_error_limit() {
        let source = height_fn(|| ready(Err(HeightError::Unavailable("node down".into()))));
        let poller =
            BlockPoller::with_config(&source, PollConfig::default().with_max_height_errors(3));
        let cancel = CancellationToken::new();

        let err = poller
            .poll_range(&cancel, BlockHeight(1), BlockHeight(2), |_| {
                ready(Ok::<(), PollFailure>(()))
            })
            .await
            .unwrap_err();

        match err {
            PollError::HeightUnavailable { attempts, source } => {
                assert_eq!(attempts, 3);
                assert_eq!(source, HeightError::Unavailable("node down".into()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn test_height_read_failure_is_logged_and_retried() {
        let reads = Arc::new(AtomicU64::new(0));
        let source = {
            let reads = reads.clone();
            height_fn(move || {
                let n = reads.fetch_add(1, Ordering::SeqCst);
                ready(if n == 0 {
                    Err(HeightError::query("request timed out"))
                } else {
                    Ok(BlockHeight(2))
                })
            })
        };
        let cancel = CancellationToken::new();

        let value = poll(&cancel, &source, BlockHeight(2), BlockHeight(2), |h| {
            ready(Ok::<_, PollFailure>(h))
        })
        .await
        .unwrap();

        assert_eq!(value, BlockHeight(2));
        assert_eq!(reads.load(Ordering::SeqCst), 2);
        assert!(logs_contain("Height read failed"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_on_stalled_source() {
        let poller = BlockPoller::with_config(
            fixed(1),
            PollConfig::default().with_deadline(Duration::from_secs(2)),
        );
        let cancel = CancellationToken::new();

        let err = poller
            .poll_range(&cancel, BlockHeight(5), BlockHeight(6), |_| {
                ready(Ok::<(), PollFailure>(()))
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PollError::DeadlineExceeded(d) if d == Duration::from_secs(2)));
        assert!(err.is_cancelled());
    }
}
