//! Bounded undo history and the snapshot debounce that feeds it.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::theme::Theme;

/// Default capacity: the initial snapshot plus five changes.
pub const DEFAULT_MAX_ENTRIES: usize = 6;

/// Default quiet period before a change is snapshotted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Ring buffer of full theme snapshots, oldest first.
#[derive(Debug, Clone)]
pub struct ThemeHistory {
    entries: VecDeque<Theme>,
    max_entries: usize,
    /// Set by `undo` so the state it restores is not captured again.
    suppress_next_capture: bool,
}

impl Default for ThemeHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl ThemeHistory {
    /// `max_entries` is clamped to at least 2 so one undo is always possible.
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(2);
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
            suppress_next_capture: false,
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn save_state(&mut self, snapshot: Theme) {
        if self.suppress_next_capture {
            self.suppress_next_capture = false;
            tracing::trace!("Skipping snapshot of restored state");
            return;
        }

        if self.entries.is_empty() {
            tracing::debug!("Seeding history with initial snapshot");
        }
        self.entries.push_back(snapshot);
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }

    /// Drop the newest snapshot and return the one before it.
    pub fn undo(&mut self) -> Option<Theme> {
        if !self.can_undo() {
            return None;
        }
        self.entries.pop_back();
        self.suppress_next_capture = true;
        self.entries.back().cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.entries.len() >= 2
    }

    /// Number of undoable changes.
    pub fn history_count(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    pub fn clear_history(&mut self) {
        self.entries.clear();
        self.suppress_next_capture = false;
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppress_next_capture
    }
}

// ===== Time =====

/// Source of monotonic time for the debounce.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock advanced by hand. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Cancel-and-reschedule deadline. Each `schedule` pushes the deadline out
/// by the full delay; the deadline fires once.
#[derive(Debug, Clone)]
pub struct SnapshotDebounce {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SnapshotDebounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once, when the deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for SnapshotDebounce {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn theme_with_blur(blur: f64) -> Theme {
        let mut theme = Theme::default();
        theme.background.backdrop_filter.blur = blur;
        theme
    }

    #[test]
    fn test_first_save_seeds_initial() {
        let mut history = ThemeHistory::default();
        history.save_state(Theme::default());
        assert!(!history.can_undo());
        assert_eq!(history.history_count(), 0);
    }

    #[test]
    fn test_bounded_after_many_changes() {
        let mut history = ThemeHistory::default();
        for i in 0..(DEFAULT_MAX_ENTRIES + 10) {
            history.save_state(theme_with_blur(i as f64));
        }
        assert_eq!(history.history_count(), DEFAULT_MAX_ENTRIES - 1);
    }

    #[test]
    fn test_undo_returns_previous_and_suppresses() {
        let mut history = ThemeHistory::default();
        history.save_state(theme_with_blur(1.0));
        history.save_state(theme_with_blur(2.0));

        let restored = history.undo().unwrap();
        assert_eq!(restored.background.backdrop_filter.blur, 1.0);
        assert!(history.is_suppressed());

        // The restored state is not recorded again.
        history.save_state(restored);
        assert!(!history.is_suppressed());
        assert_eq!(history.history_count(), 0);
    }

    #[test]
    fn test_undo_without_history_is_noop() {
        let mut history = ThemeHistory::default();
        assert!(history.undo().is_none());
        history.save_state(Theme::default());
        assert!(history.undo().is_none());
        assert!(!history.is_suppressed());
        assert_eq!(history.history_count(), 0);
    }

    #[test]
    fn test_clear_history_resets_flag() {
        let mut history = ThemeHistory::default();
        history.save_state(theme_with_blur(1.0));
        history.save_state(theme_with_blur(2.0));
        history.undo();
        history.clear_history();
        assert!(!history.is_suppressed());

        history.save_state(theme_with_blur(3.0));
        assert_eq!(history.history_count(), 0);
        history.save_state(theme_with_blur(4.0));
        assert_eq!(history.history_count(), 1);
    }

    #[test]
    fn test_capacity_clamped() {
        assert_eq!(ThemeHistory::new(0).max_entries(), 2);
    }

    #[test]
    fn test_debounce_reschedules() {
        let clock = ManualClock::new();
        let mut debounce = SnapshotDebounce::new(Duration::from_millis(500));

        debounce.schedule(clock.now());
        clock.advance(Duration::from_millis(300));
        debounce.schedule(clock.now());
        clock.advance(Duration::from_millis(300));
        assert!(!debounce.fire_if_due(clock.now()));

        clock.advance(Duration::from_millis(200));
        assert!(debounce.fire_if_due(clock.now()));
        assert!(!debounce.fire_if_due(clock.now()));
        assert!(!debounce.is_pending());
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::new();
        let other = clock.clone();
        let start = other.now();
        clock.advance(Duration::from_secs(1));
        assert_eq!(other.now() - start, Duration::from_secs(1));
    }
}
