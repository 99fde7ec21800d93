//! Trailing-edge debounce over host timers.
//!
//! Host timers cannot be cancelled. Instead every change arms a fresh timer of the
//! same length and the debouncer counts how many are still outstanding. Since all
//! timers share one duration, the one armed last fires last. Only that firing, when
//! the outstanding count drops back to zero, releases the pending change.

use std::time::Duration;

/// Default quiet period before a change is acted on.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debouncer {
    window: Duration,
    outstanding: usize,
    pending: bool,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            outstanding: 0,
            pending: false,
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Records a change and returns the length of the timer to arm for it.
    pub fn arm(&mut self) -> Duration {
        self.outstanding += 1;
        self.pending = true;
        self.window
    }

    /// Accounts for one fired timer.
    ///
    /// # Returns
    ///
    /// `true` if the quiet period has elapsed with a change pending.
    pub fn on_timer(&mut self) -> bool {
        if self.outstanding == 0 {
            return false;
        }
        self.outstanding -= 1;
        if self.outstanding == 0 && self.pending {
            self.pending = false;
            return true;
        }
        false
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_fires_once_on_last_timer() {
        let mut debouncer = Debouncer::default();
        for _ in 0..5 {
            debouncer.arm();
        }

        let fired: Vec<bool> = (0..5).map(|_| debouncer.on_timer()).collect();
        assert_eq!(fired, vec![false, false, false, false, true]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn stray_timers_are_ignored() {
        let mut debouncer = Debouncer::default();
        assert!(!debouncer.on_timer());
        debouncer.arm();
        assert!(debouncer.on_timer());
        assert!(!debouncer.on_timer());
    }

    #[test]
    fn change_after_firing_starts_a_new_window() {
        let mut debouncer = Debouncer::new(Duration::from_millis(250));
        assert_eq!(debouncer.arm(), Duration::from_millis(250));
        assert!(debouncer.on_timer());
        debouncer.arm();
        assert!(debouncer.is_pending());
        assert!(debouncer.on_timer());
    }
}
