//! Inter-tick pacing and external cancellation
//!
//! The detection loop suspends only while reading a sample and while pausing
//! between ticks. Pausing goes through [`Pacer`] so tests can run a loop
//! without sleeping; [`CancellationToken`] lets another thread stop a loop
//! at the next tick boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Suspends the caller between ticks
pub trait Pacer {
    fn pause(&mut self, interval: Duration);
}

/// Pauses by sleeping the current thread
#[derive(Copy, Clone, Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, interval: Duration) {
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
}

/// Returns immediately, keeping count of the pauses it was asked for
#[derive(Clone, Debug, Default)]
pub struct NoPause {
    pauses: u64,
    requested: Duration,
}

impl NoPause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pauses requested so far
    pub fn pauses(&self) -> u64 {
        self.pauses
    }

    /// Total time the caller would have slept
    pub fn requested(&self) -> Duration {
        self.requested
    }
}

impl Pacer for NoPause {
    fn pause(&mut self, interval: Duration) {
        self.pauses += 1;
        self.requested += interval;
    }
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, interval: Duration) {
        (**self).pause(interval)
    }
}

/// Shared flag checked once per tick. Clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        tracing::debug!("cancellation requested");
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pause_accounting() {
        let mut pacer = NoPause::new();
        pacer.pause(Duration::from_millis(100));
        pacer.pause(Duration::from_millis(100));
        assert_eq!(pacer.pauses(), 2);
        assert_eq!(pacer.requested(), Duration::from_millis(200));
    }

    #[test]
    fn test_pacer_through_mut_ref() {
        fn drive<P: Pacer>(mut pacer: P) {
            pacer.pause(Duration::from_millis(5));
        }
        let mut pacer = NoPause::new();
        drive(&mut pacer);
        assert_eq!(pacer.pauses(), 1);
    }

    #[test]
    fn test_token_clones_share_state() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());
        token.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn test_token_across_threads() {
        let token = CancellationToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel())
            .join()
            .unwrap();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_thread_pacer_zero_interval_returns() {
        ThreadPacer.pause(Duration::ZERO);
    }
}
