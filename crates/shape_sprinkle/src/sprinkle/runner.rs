//! Runs the measure, exclude, place and render pipeline for a layer.
use std::fmt;
use std::time::Instant;

use glam::Vec2;
use rand::RngCore;
use tracing::{debug, info};

use crate::error::Result;
use crate::exclusion::build_exclusions;
use crate::geometry::{ExclusionZone, Rect, Surface};
use crate::layout::Layout;
use crate::sampling::{place, PlacementParams, PlacementStats};
use crate::sprinkle::config::{LayerConfig, SamplingRegion};
use crate::sprinkle::events::{EventSink, SprinkleEvent};
use crate::sprinkle::reflow::{ReflowAction, ReflowScheduler, ReflowTrigger};
use crate::sprinkle::render::{render, ShapeElement, ShapeLayer};
use crate::sprinkle::style::ShapeAttributes;

/// A shape accepted by a run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedShape {
    /// Center in surface-local units.
    pub position: Vec2,
    /// Footprint radius in surface-local units.
    pub radius: f32,
    pub attributes: ShapeAttributes,
}

impl PlacedShape {
    /// Build the renderable element using the layer's classes and units.
    pub fn to_element(&self, config: &LayerConfig) -> ShapeElement {
        ShapeElement::materialize(
            &config.class_name,
            &config.color_property,
            config.units,
            config.precision,
            self.position,
            &self.attributes,
        )
    }
}

/// Why a run placed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A required element is not on the page.
    MissingElement(String),
    /// A required element has zero width or height.
    EmptyGeometry(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingElement(s) => write!(f, "missing element '{s}'"),
            SkipReason::EmptyGeometry(s) => write!(f, "element '{s}' has no area"),
        }
    }
}

/// Result of a completed run.
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    /// Shapes in acceptance order.
    pub shapes: Vec<PlacedShape>,
    /// Count the run aimed for.
    pub target_count: usize,
    /// Exclusion zones active during the run.
    pub zones: Vec<ExclusionZone>,
    /// Region candidates were drawn from.
    pub region: Rect,
    pub stats: PlacementStats,
}

impl RunResult {
    /// Fewer shapes than targeted were placed.
    pub fn is_partial(&self) -> bool {
        self.shapes.len() < self.target_count
    }
}

/// Outcome of one layer run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Placed(RunResult),
    Skipped(SkipReason),
}

impl RunOutcome {
    pub fn shapes(&self) -> &[PlacedShape] {
        match self {
            RunOutcome::Placed(result) => &result.shapes,
            RunOutcome::Skipped(_) => &[],
        }
    }

    pub fn result(&self) -> Option<&RunResult> {
        match self {
            RunOutcome::Placed(result) => Some(result),
            RunOutcome::Skipped(_) => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RunOutcome::Skipped(_))
    }
}

/// Measure, build zones and place shapes without rendering anything.
pub fn plan_layer<S: Layout + ?Sized>(
    config: &LayerConfig,
    layout: &S,
    rng: &mut dyn RngCore,
) -> RunOutcome {
    plan_layer_internal(config, layout, rng, &mut ())
}

/// Run the full pipeline and render into `target`.
///
/// The target is cleared first, so a skipped run leaves it empty and a
/// completed run leaves exactly this run's shapes.
pub fn run_layer<L, S>(
    config: &LayerConfig,
    layout: &S,
    target: &mut L,
    rng: &mut dyn RngCore,
    sink: Option<&mut dyn EventSink>,
) -> RunOutcome
where
    L: ShapeLayer + ?Sized,
    S: Layout + ?Sized,
{
    if let Some(s) = sink {
        run_layer_internal(config, layout, target, rng, s)
    } else {
        run_layer_internal(config, layout, target, rng, &mut ())
    }
}

fn run_layer_internal<L, S>(
    config: &LayerConfig,
    layout: &S,
    target: &mut L,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> RunOutcome
where
    L: ShapeLayer + ?Sized,
    S: Layout + ?Sized,
{
    let outcome = plan_layer_internal(config, layout, rng, sink);
    match &outcome {
        RunOutcome::Placed(result) => {
            let rendered = render(target, result.shapes.iter().map(|s| s.to_element(config)));
            info!(
                "Layer '{}': rendered {}/{} shapes after {} attempts.",
                config.id, rendered, result.target_count, result.stats.attempts
            );
            sink.send(SprinkleEvent::RunFinished {
                layer_id: config.id.clone(),
                result: result.clone(),
            });
        }
        RunOutcome::Skipped(_) => target.clear(),
    }
    outcome
}

fn plan_layer_internal<S: Layout + ?Sized>(
    config: &LayerConfig,
    layout: &S,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> RunOutcome {
    match prepare(config, layout) {
        Ok((surface, region, zones)) => {
            let result = place_shapes(config, &surface, region, zones, rng, sink);
            RunOutcome::Placed(result)
        }
        Err(reason) => {
            debug!("Layer '{}' skipped: {}.", config.id, reason);
            sink.send(SprinkleEvent::RunSkipped {
                layer_id: config.id.clone(),
                reason: reason.clone(),
            });
            RunOutcome::Skipped(reason)
        }
    }
}

/// Measure the surface and snapshot region and zones for this run.
fn prepare<S: Layout + ?Sized>(
    config: &LayerConfig,
    layout: &S,
) -> std::result::Result<(Surface, Rect, Vec<ExclusionZone>), SkipReason> {
    let surface_rect = layout
        .query(&config.surface)
        .ok_or_else(|| SkipReason::MissingElement(config.surface.clone()))?;
    if let Some(container) = &config.container {
        if layout.query(container).is_none() {
            return Err(SkipReason::MissingElement(container.clone()));
        }
    }
    let surface = Surface::new(surface_rect, config.units)
        .ok_or_else(|| SkipReason::EmptyGeometry(config.surface.clone()))?;
    let region = resolve_region(config, &surface, layout)?;
    let zones = build_exclusions(
        &surface,
        layout,
        &config.foreground,
        &config.structural_zones,
    );
    Ok((surface, region, zones))
}

fn resolve_region<S: Layout + ?Sized>(
    config: &LayerConfig,
    surface: &Surface,
    layout: &S,
) -> std::result::Result<Rect, SkipReason> {
    match &config.region {
        SamplingRegion::Full => Ok(Rect::from_size(surface.extent())),
        SamplingRegion::LeftOf {
            anchor,
            gap_px,
            inset_px,
        } => {
            let rect = layout
                .query(anchor)
                .ok_or_else(|| SkipReason::MissingElement(anchor.clone()))?;
            if rect.is_empty() {
                return Err(SkipReason::EmptyGeometry(anchor.clone()));
            }
            let center_x = surface.point_to_local(rect.center()).x;
            let right = center_x - surface.length_to_local(*gap_px);
            let width = (right - surface.length_to_local(*inset_px)).max(0.0);
            Ok(Rect::new(0.0, 0.0, width, surface.extent().y))
        }
    }
}

fn place_shapes(
    config: &LayerConfig,
    surface: &Surface,
    region: Rect,
    zones: Vec<ExclusionZone>,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> RunResult {
    let target_count = config.density.target_count(surface.viewport().size());
    let params = PlacementParams::new(surface.extent(), target_count)
        .with_region(region)
        .with_attempts_per_shape(config.attempts_per_shape)
        .with_min_gap(config.min_gap)
        .with_edges(config.edges);

    debug!(
        "Layer '{}': target {} shapes, {} zones, budget {}.",
        config.id,
        target_count,
        zones.len(),
        params.budget()
    );
    sink.send(SprinkleEvent::RunStarted {
        layer_id: config.id.clone(),
        target_count,
        budget: params.budget(),
        zones: zones.len(),
    });

    let placement = place(&params, &zones, rng, |rng| {
        let attrs = config.style.draw(rng);
        let radius = surface.length_to_local(config.footprint.radius_px(attrs.size_px));
        (attrs, radius)
    });

    let shapes: Vec<PlacedShape> = placement
        .placed
        .into_iter()
        .map(|p| PlacedShape {
            position: p.position,
            radius: p.radius,
            attributes: p.payload,
        })
        .collect();
    for shape in &shapes {
        sink.send(SprinkleEvent::ShapePlaced {
            layer_id: config.id.clone(),
            shape: shape.clone(),
        });
    }

    RunResult {
        shapes,
        target_count,
        zones,
        region,
        stats: placement.stats,
    }
}

/// Owns one layer's config, render target and reflow scheduling.
pub struct Sprinkler<L: ShapeLayer> {
    config: LayerConfig,
    target: L,
    scheduler: ReflowScheduler,
    runs: usize,
}

impl<L: ShapeLayer> Sprinkler<L> {
    pub fn try_new(config: LayerConfig, target: L) -> Result<Self> {
        config.validate()?;
        let scheduler = ReflowScheduler::new(config.debounce(), config.reflow_on_fonts_ready);
        Ok(Self {
            config,
            target,
            scheduler,
            runs: 0,
        })
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn target(&self) -> &L {
        &self.target
    }

    pub fn into_target(self) -> L {
        self.target
    }

    /// Number of pipeline runs so far, skipped ones included.
    pub fn runs(&self) -> usize {
        self.runs
    }

    /// When the pending debounced run becomes due, if one is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    /// Run the pipeline now.
    pub fn reflow<S: Layout + ?Sized>(&mut self, layout: &S, rng: &mut impl RngCore) -> RunOutcome {
        self.reflow_with_events(layout, rng, &mut ())
    }

    pub fn reflow_with_events<S: Layout + ?Sized>(
        &mut self,
        layout: &S,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> RunOutcome {
        self.runs += 1;
        run_layer_internal(&self.config, layout, &mut self.target, rng, sink)
    }

    /// Forward a host trigger. Runs immediately for [`ReflowTrigger::Load`];
    /// otherwise the run is debounced and happens in a later [`Self::tick`].
    pub fn handle<S: Layout + ?Sized>(
        &mut self,
        trigger: ReflowTrigger,
        now: Instant,
        layout: &S,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Option<RunOutcome> {
        let action = self.scheduler.on_trigger(trigger, now);
        sink.send(SprinkleEvent::TriggerHandled {
            layer_id: self.config.id.clone(),
            trigger,
            action,
        });
        match action {
            ReflowAction::RunNow => Some(self.reflow_with_events(layout, rng, sink)),
            ReflowAction::Deferred | ReflowAction::Ignored => None,
        }
    }

    /// Run the debounced reflow if it is due at `now`.
    pub fn tick<S: Layout + ?Sized>(
        &mut self,
        now: Instant,
        layout: &S,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Option<RunOutcome> {
        if self.scheduler.poll(now) {
            Some(self.reflow_with_events(layout, rng, sink))
        } else {
            None
        }
    }
}
