//! # Epoch Clock
//!
//! Time is bucketed into epochs of `rate_limit_ms` milliseconds. Each
//! identity gets `user_message_limit` messages per epoch.

use shared_types::{Epoch, DEFAULT_RATE_LIMIT_MS};

/// Epoch containing `now_ms`.
///
/// A zero `rate_limit_ms` falls back to [`DEFAULT_RATE_LIMIT_MS`].
pub fn current_epoch(now_ms: u64, rate_limit_ms: u64) -> Epoch {
    let rate_limit_ms = if rate_limit_ms == 0 {
        DEFAULT_RATE_LIMIT_MS
    } else {
        rate_limit_ms
    };
    now_ms / rate_limit_ms
}

/// Epochs accepted around the current one.
///
/// `tolerance` absorbs clock skew and network latency between client and
/// relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpochWindow {
    /// Epoch the relay is in.
    pub current: Epoch,
    /// Epochs accepted on either side of `current`.
    pub tolerance: u64,
}

impl EpochWindow {
    /// Window around `current`.
    pub fn new(current: Epoch, tolerance: u64) -> Self {
        Self { current, tolerance }
    }

    /// Window for a room's rate limit at `now_ms`.
    pub fn at(now_ms: u64, rate_limit_ms: u64, tolerance: u64) -> Self {
        Self::new(current_epoch(now_ms, rate_limit_ms), tolerance)
    }

    /// Oldest accepted epoch.
    pub fn lower(&self) -> Epoch {
        self.current.saturating_sub(self.tolerance)
    }

    /// Newest accepted epoch.
    pub fn upper(&self) -> Epoch {
        self.current.saturating_add(self.tolerance)
    }

    /// `current - tolerance <= epoch <= current + tolerance`
    pub fn contains(&self, epoch: Epoch) -> bool {
        (self.lower()..=self.upper()).contains(&epoch)
    }
}
