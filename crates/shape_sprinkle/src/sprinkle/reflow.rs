//! Reflow triggers and trailing-edge debouncing.
//!
//! Time is always passed in by the caller, so the last-write-wins behavior can
//! be exercised without real timers.
use std::time::{Duration, Instant};

/// Delay used to collapse bursts of resize events.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(140);

/// Trailing-edge debouncer holding at most one pending deadline.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule a run `delay` after `now`, replacing any pending one.
    /// Returns `true` if a pending run was replaced.
    pub fn schedule(&mut self, now: Instant) -> bool {
        let deadline = now.checked_add(self.delay).unwrap_or(now);
        self.deadline.replace(deadline).is_some()
    }

    /// Drop the pending run, if any.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns `true` once when the pending deadline has passed, clearing it.
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

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Layout-affecting events a host forwards to a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflowTrigger {
    /// Page finished loading.
    Load,
    Resize,
    OrientationChange,
    /// Web fonts finished loading.
    FontsReady,
}

/// What the scheduler decided for a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflowAction {
    /// Run the pipeline immediately.
    RunNow,
    /// A debounced run is pending.
    Deferred,
    /// The layer does not react to this trigger.
    Ignored,
}

/// Maps triggers to immediate or debounced runs for one layer.
#[derive(Debug, Clone)]
pub struct ReflowScheduler {
    debouncer: Debouncer,
    fonts_ready: bool,
}

impl ReflowScheduler {
    pub fn new(delay: Duration, reflow_on_fonts_ready: bool) -> Self {
        Self {
            debouncer: Debouncer::new(delay),
            fonts_ready: reflow_on_fonts_ready,
        }
    }

    pub fn on_trigger(&mut self, trigger: ReflowTrigger, now: Instant) -> ReflowAction {
        match trigger {
            ReflowTrigger::Load => ReflowAction::RunNow,
            ReflowTrigger::Resize | ReflowTrigger::OrientationChange => {
                self.debouncer.schedule(now);
                ReflowAction::Deferred
            }
            ReflowTrigger::FontsReady if self.fonts_ready => {
                self.debouncer.schedule(now);
                ReflowAction::Deferred
            }
            ReflowTrigger::FontsReady => ReflowAction::Ignored,
        }
    }

    /// Whether the debounced run is due at `now`. Fires at most once per schedule.
    pub fn poll(&mut self, now: Instant) -> bool {
        self.debouncer.fire_if_due(now)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }
}

impl Default for ReflowScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE, false)
    }
}
