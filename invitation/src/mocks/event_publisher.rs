//! Mock event publisher for testing.

use crate::context::RequestContext;
use crate::error::{CloseError, InvitationError, Result};
use crate::events::NotificationEvent;
use crate::providers::EventPublisher;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

#[derive(Debug, Default)]
struct Inner {
    events: Vec<NotificationEvent>,
    attempts: usize,
    fail_enqueue: bool,
    delay: Option<Duration>,
    close_error: Option<CloseError>,
    closed: bool,
}

/// Mock event publisher.
///
/// Records every accepted event. Failures, slow brokers and broken teardown
/// can be simulated.
#[derive(Debug, Clone, Default)]
pub struct MockEventPublisher {
    inner: Arc<Mutex<Inner>>,
}

impl MockEventPublisher {
    /// Create a publisher that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every `enqueue` fail with a publish error.
    pub fn fail_enqueues(&self, fail: bool) {
        self.lock().fail_enqueue = fail;
    }

    /// Delay every `enqueue` by `delay` before it completes.
    pub fn delay_enqueues(&self, delay: Duration) {
        self.lock().delay = Some(delay);
    }

    /// Make `close` fail with `error`.
    pub fn fail_close(&self, error: CloseError) {
        self.lock().close_error = Some(error);
    }

    /// Events accepted so far.
    #[must_use]
    pub fn events(&self) -> Vec<NotificationEvent> {
        self.lock().events.clone()
    }

    /// Number of `enqueue` calls, successful or not.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }

    /// Whether `close` has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

impl EventPublisher for MockEventPublisher {
    async fn enqueue(&self, ctx: &RequestContext, event: &NotificationEvent) -> Result<()> {
        let (fail, delay) = {
            let mut inner = self.lock();
            inner.attempts += 1;
            (inner.fail_enqueue, inner.delay)
        };

        ctx.run("publish", async {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if fail {
                return Err(InvitationError::Publish("mock publish failure".to_string()));
            }
            self.lock().events.push(event.clone());
            Ok(())
        })
        .await
    }

    async fn close(&self) -> Result<()> {
        let mut inner = self.lock();
        inner.closed = true;
        match inner.close_error.clone() {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}
