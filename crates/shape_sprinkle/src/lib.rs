#![forbid(unsafe_code)]
//! shape_sprinkle: decorative shape scattering for page surfaces.
//!
//! Modules:
//! - geometry: rectangles, circles, surfaces and exclusion zones in surface-local units
//! - layout: the measurement seam through which a host reports live element geometry
//! - exclusion: turn measured foreground content into exclusion zones
//! - sampling: uniform draws and the bounded rejection-sampling placement loop
//! - sprinkle: layer configs, shape styling, rendering, events, runner and reflow scheduling
//! - meeting: next meeting date and backdrop shape randomization
pub mod error;
pub mod exclusion;
pub mod geometry;
pub mod layout;
pub mod meeting;
pub mod sampling;
pub mod sprinkle;

/// Convenient re-exports for common types. Import with `use shape_sprinkle::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::exclusion::{build_exclusions, ForegroundSpec, Match, ZoneShape};
    pub use crate::geometry::{Circle, ExclusionZone, Rect, Surface, Units};
    pub use crate::layout::{Layout, StaticLayout};
    pub use crate::meeting::{next_meeting, BackdropRanges, BackdropStyle, MeetingBadge};
    pub use crate::sampling::{
        place, Axis, Density, EdgeMargins, Placed, Placement, PlacementParams, PlacementStats,
        SequenceRng, UnitRange,
    };
    pub use crate::sprinkle::config::{LayerConfig, SamplingRegion};
    pub use crate::sprinkle::events::{EventSink, FnSink, SprinkleEvent, TracingSink, VecSink};
    pub use crate::sprinkle::reflow::{
        Debouncer, ReflowAction, ReflowScheduler, ReflowTrigger, DEFAULT_DEBOUNCE,
    };
    pub use crate::sprinkle::render::{render, Precision, ShapeElement, ShapeLayer, VecLayer};
    pub use crate::sprinkle::runner::{
        plan_layer, run_layer, PlacedShape, RunOutcome, RunResult, SkipReason, Sprinkler,
    };
    pub use crate::sprinkle::style::{Footprint, ShapeAttributes, StyleRanges};
    pub use crate::sprinkle::ShapeKind;
}
