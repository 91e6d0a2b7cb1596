//! Request sequencing and cancellation.
//!
//! Every submission draws the next number from a [`RequestSequence`]. Only
//! the response tagged with the latest number may be applied; anything older
//! is stale. The same counter backs [`CancellationToken`]: a token is live
//! while its number is still the latest one, so drawing a new number (or
//! calling [`RequestSequence::cancel_all`]) cancels every older token.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonic request counter shared with the tokens it hands out.
#[derive(Debug, Clone, Default)]
pub struct RequestSequence {
    latest: Arc<AtomicU64>,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the next request number, superseding all earlier ones.
    pub fn next_seq(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The most recently drawn number, or zero.
    pub fn current(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.current()
    }

    /// Supersede every outstanding request without starting a new one.
    pub fn cancel_all(&self) -> u64 {
        self.next_seq()
    }

    /// A token that stays live while `seq` is the latest number.
    pub fn token(&self, seq: u64) -> CancellationToken {
        CancellationToken {
            latest: Some(Arc::clone(&self.latest)),
            seq,
        }
    }
}

/// Cooperative cancellation for one submission.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    /// `None` for tokens that are never cancelled.
    latest: Option<Arc<AtomicU64>>,
    seq: u64,
}

impl CancellationToken {
    /// A token that is never cancelled.
    pub fn noop() -> Self {
        Self::default()
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        match &self.latest {
            Some(latest) => latest.load(Ordering::Relaxed) != self.seq,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_increase() {
        let sequence = RequestSequence::new();
        assert_eq!(sequence.current(), 0);
        assert_eq!(sequence.next_seq(), 1);
        assert_eq!(sequence.next_seq(), 2);
        assert!(sequence.is_latest(2));
        assert!(!sequence.is_latest(1));
    }

    #[test]
    fn test_newer_request_cancels_older_token() {
        let sequence = RequestSequence::new();
        let first = sequence.token(sequence.next_seq());
        assert!(!first.is_cancelled());

        let second = sequence.token(sequence.next_seq());
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());

        sequence.cancel_all();
        assert!(second.is_cancelled());
    }

    #[test]
    fn test_clones_share_the_counter() {
        let sequence = RequestSequence::new();
        let token = sequence.token(sequence.next_seq());
        sequence.clone().next_seq();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_noop_token_is_never_cancelled() {
        let token = CancellationToken::noop();
        assert!(!token.is_cancelled());
        assert!(!CancellationToken::default().is_cancelled());
    }
}
