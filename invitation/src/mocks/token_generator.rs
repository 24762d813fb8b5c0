//! Mock token generator for testing.

use crate::providers::TokenGenerator;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Deterministic token generator.
///
/// Returns the configured token. In sequence mode it appends an increasing
/// counter so every call yields a distinct token.
#[derive(Debug, Clone)]
pub struct MockTokenGenerator {
    token: String,
    sequential: bool,
    counter: Arc<AtomicUsize>,
}

impl MockTokenGenerator {
    /// Always return `token`.
    #[must_use]
    pub fn fixed(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            sequential: false,
            counter: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Return `{prefix}-0`, `{prefix}-1`, ...
    #[must_use]
    pub fn sequence(prefix: impl Into<String>) -> Self {
        Self {
            token: prefix.into(),
            sequential: true,
            counter: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of tokens generated so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}

impl Default for MockTokenGenerator {
    fn default() -> Self {
        Self::fixed("fixed-mock-token")
    }
}

impl TokenGenerator for MockTokenGenerator {
    fn generate(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        if self.sequential {
            format!("{}-{n}", self.token)
        } else {
            self.token.clone()
        }
    }
}
