//! Event types and sinks for observing layer runs.
//!
//! This module defines [`SprinkleEvent`] and a few sinks to collect or forward
//! events emitted by [`crate::sprinkle::runner::run_layer`] and
//! [`crate::sprinkle::runner::Sprinkler`].
use tracing::{debug, trace};

use crate::sprinkle::reflow::{ReflowAction, ReflowTrigger};
use crate::sprinkle::runner::{PlacedShape, RunResult, SkipReason};

/// Describes events emitted while running a layer.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum SprinkleEvent {
    /// Emitted once the surface is measured and zones are built.
    RunStarted {
        layer_id: String,
        /// Target shape count derived from the surface size.
        target_count: usize,
        /// Maximum number of attempts the run may spend.
        budget: usize,
        /// Number of exclusion zones in the snapshot.
        zones: usize,
    },

    /// Emitted for every accepted shape.
    ShapePlaced { layer_id: String, shape: PlacedShape },

    /// Emitted after the shapes were rendered.
    RunFinished { layer_id: String, result: RunResult },

    /// Emitted when the run was skipped without placing anything.
    RunSkipped { layer_id: String, reason: SkipReason },

    /// Emitted when a host trigger was handled by the scheduler.
    TriggerHandled {
        layer_id: String,
        trigger: ReflowTrigger,
        action: ReflowAction,
    },
}

/// Receives [`SprinkleEvent`]s as a layer runs.
pub trait EventSink {
    fn send(&mut self, event: SprinkleEvent);
}

/// Discards every event.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: SprinkleEvent) {}
}

/// Hands each event to a closure.
pub struct FnSink<F: FnMut(SprinkleEvent)>(F);

impl<F: FnMut(SprinkleEvent)> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: FnMut(SprinkleEvent)> EventSink for FnSink<F> {
    #[inline]
    fn send(&mut self, event: SprinkleEvent) {
        (self.0)(event);
    }
}

/// Keeps events in arrival order.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<SprinkleEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[SprinkleEvent] {
        &self.events
    }

    pub fn into_inner(self) -> Vec<SprinkleEvent> {
        self.events
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: SprinkleEvent) {
        self.events.push(event);
    }
}

/// Writes events to `tracing`: skips at `debug`, triggers and placements
/// at `trace`, and a per-run summary at `debug`. Counts what it has seen.
#[derive(Debug, Default)]
pub struct TracingSink {
    runs: usize,
    skips: usize,
    shapes: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed runs observed.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Skipped runs observed.
    pub fn skips(&self) -> usize {
        self.skips
    }

    /// Shapes placed across all runs.
    pub fn shapes(&self) -> usize {
        self.shapes
    }
}

impl EventSink for TracingSink {
    fn send(&mut self, event: SprinkleEvent) {
        match event {
            SprinkleEvent::RunStarted {
                layer_id,
                target_count,
                budget,
                zones,
            } => {
                trace!("[{layer_id}] start: target {target_count}, budget {budget}, {zones} zones");
            }
            SprinkleEvent::ShapePlaced { layer_id, shape } => {
                self.shapes += 1;
                trace!(
                    "[{layer_id}] {} at {:?}",
                    shape.attributes.kind.class_name(),
                    shape.position
                );
            }
            SprinkleEvent::RunFinished { layer_id, result } => {
                self.runs += 1;
                debug!(
                    "[{layer_id}] finished: {}/{} shapes, {} rejected",
                    result.shapes.len(),
                    result.target_count,
                    result.stats.rejected()
                );
            }
            SprinkleEvent::RunSkipped { layer_id, reason } => {
                self.skips += 1;
                debug!("[{layer_id}] skipped: {reason}");
            }
            SprinkleEvent::TriggerHandled {
                layer_id,
                trigger,
                action,
            } => trace!("[{layer_id}] {trigger:?} -> {action:?}"),
        }
    }
}
