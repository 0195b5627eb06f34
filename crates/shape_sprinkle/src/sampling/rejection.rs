//! Bounded rejection sampling of non-overlapping positions.
//!
//! Candidates are drawn uniformly inside a sampling region and rejected when they
//! cross an edge margin, fall inside an [`ExclusionZone`], or crowd an already
//! accepted shape. The loop stops at the target count or when the attempt
//! budget (`count * attempts_per_shape`) runs out; stopping short is a normal
//! outcome.
use glam::Vec2;
use rand::RngCore;

use crate::geometry::{ExclusionZone, Rect};
use crate::sampling::rand01;

/// Upper bound on the up-front allocation for accepted shapes.
const PREALLOC_LIMIT: usize = 256;

/// Minimum distance from each surface edge a shape center must keep.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeMargins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl EdgeMargins {
    pub const NONE: Self = Self {
        left: 0.0,
        right: 0.0,
        top: 0.0,
        bottom: 0.0,
    };

    /// Margins on the left and right edges only.
    pub const fn horizontal(margin: f32) -> Self {
        Self {
            left: margin,
            right: margin,
            top: 0.0,
            bottom: 0.0,
        }
    }

    /// Margins on the top and bottom edges only.
    pub const fn vertical(margin: f32) -> Self {
        Self {
            left: 0.0,
            right: 0.0,
            top: margin,
            bottom: margin,
        }
    }

    /// Whether `p` keeps its distance from every edge of a surface of `extent`.
    pub fn admits(&self, p: Vec2, extent: Vec2) -> bool {
        p.x >= self.left
            && p.x <= extent.x - self.right
            && p.y >= self.top
            && p.y <= extent.y - self.bottom
    }
}

/// Which measured surface dimension drives the shape count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    #[default]
    Width,
    Height,
}

/// Target count heuristic: `clamp(round(dimension / unit_px), min, max)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Density {
    pub axis: Axis,
    pub unit_px: f32,
    pub min: usize,
    pub max: usize,
}

impl Density {
    pub const fn new(axis: Axis, unit_px: f32, min: usize, max: usize) -> Self {
        Self {
            axis,
            unit_px,
            min,
            max,
        }
    }

    /// Target count for a surface measuring `size_px` in viewport pixels.
    pub fn target_count(&self, size_px: Vec2) -> usize {
        let dim = match self.axis {
            Axis::Width => size_px.x,
            Axis::Height => size_px.y,
        };
        let raw = (dim / self.unit_px).round();
        let raw = if raw.is_finite() && raw > 0.0 {
            raw as usize
        } else {
            0
        };
        raw.min(self.max).max(self.min)
    }
}

/// Inputs for one placement run, all in surface-local units.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementParams {
    /// Rectangle candidates are drawn from.
    pub region: Rect,
    /// Full surface size, used for edge margins.
    pub extent: Vec2,
    /// Target number of shapes.
    pub count: usize,
    /// Attempts allowed per requested shape.
    pub attempts_per_shape: usize,
    /// Gap kept between the footprints of any two shapes.
    pub min_gap: f32,
    pub edges: EdgeMargins,
}

impl PlacementParams {
    /// Draw from the whole surface.
    pub fn new(extent: Vec2, count: usize) -> Self {
        Self {
            region: Rect::from_size(extent),
            extent,
            count,
            attempts_per_shape: 120,
            min_gap: 0.0,
            edges: EdgeMargins::NONE,
        }
    }

    pub fn with_region(mut self, region: Rect) -> Self {
        self.region = region;
        self
    }

    pub fn with_attempts_per_shape(mut self, attempts: usize) -> Self {
        self.attempts_per_shape = attempts;
        self
    }

    pub fn with_min_gap(mut self, min_gap: f32) -> Self {
        self.min_gap = min_gap;
        self
    }

    pub fn with_edges(mut self, edges: EdgeMargins) -> Self {
        self.edges = edges;
        self
    }

    /// Total attempts the run may spend.
    pub fn budget(&self) -> usize {
        self.count.saturating_mul(self.attempts_per_shape)
    }
}

/// An accepted candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Placed<T> {
    pub position: Vec2,
    /// Footprint radius used for spacing and circular zones.
    pub radius: f32,
    pub payload: T,
}

/// Attempt accounting for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementStats {
    pub attempts: usize,
    pub rejected_edge: usize,
    pub rejected_zone: usize,
    pub rejected_spacing: usize,
}

impl PlacementStats {
    pub fn rejected(&self) -> usize {
        self.rejected_edge + self.rejected_zone + self.rejected_spacing
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Placement<T> {
    pub placed: Vec<Placed<T>>,
    pub stats: PlacementStats,
}

/// Run the rejection-sampling loop.
///
/// Each attempt draws `x`, then `y`, then calls `draw` for the candidate's
/// payload and footprint radius, whether or not the candidate is accepted.
/// A candidate is rejected when:
/// - it violates `params.edges`,
/// - any zone [blocks](ExclusionZone::blocks) it,
/// - its distance to an accepted shape is below the sum of both radii plus `min_gap`.
pub fn place<T, F>(
    params: &PlacementParams,
    zones: &[ExclusionZone],
    rng: &mut dyn RngCore,
    mut draw: F,
) -> Placement<T>
where
    F: FnMut(&mut dyn RngCore) -> (T, f32),
{
    let budget = params.budget();
    let region = params.region;
    let mut placed: Vec<Placed<T>> =
        Vec::with_capacity(params.count.min(budget).min(PREALLOC_LIMIT));
    let mut stats = PlacementStats::default();

    while placed.len() < params.count && stats.attempts < budget {
        stats.attempts += 1;

        let position = Vec2::new(
            region.x + rand01(rng) * region.w.max(0.0),
            region.y + rand01(rng) * region.h.max(0.0),
        );
        let (payload, radius) = draw(rng);

        if !params.edges.admits(position, params.extent) {
            stats.rejected_edge += 1;
            continue;
        }

        if zones.iter().any(|z| z.blocks(position, radius)) {
            stats.rejected_zone += 1;
            continue;
        }

        let crowded = placed
            .iter()
            .any(|p| p.position.distance(position) < p.radius + radius + params.min_gap);
        if crowded {
            stats.rejected_spacing += 1;
            continue;
        }

        placed.push(Placed {
            position,
            radius,
            payload,
        });
    }

    Placement { placed, stats }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::geometry::Circle;
    use crate::sampling::SequenceRng;

    fn point(_: &mut dyn RngCore) -> ((), f32) {
        ((), 0.0)
    }

    fn assert_spaced<T>(placed: &[Placed<T>], min_gap: f32) {
        for i in 0..placed.len() {
            for j in (i + 1)..placed.len() {
                let a = &placed[i];
                let b = &placed[j];
                assert!(
                    a.position.distance(b.position) >= a.radius + b.radius + min_gap,
                    "{:?} and {:?} are too close",
                    a.position,
                    b.position
                );
            }
        }
    }

    #[test]
    fn density_clamps_rounded_ratio() {
        let hero = Density::new(Axis::Width, 100.0, 12, 18);
        assert_eq!(hero.target_count(Vec2::new(1000.0, 500.0)), 12);
        assert_eq!(hero.target_count(Vec2::new(1449.0, 500.0)), 14);
        assert_eq!(hero.target_count(Vec2::new(4000.0, 500.0)), 18);

        let rail = Density::new(Axis::Height, 80.0, 8, 14);
        assert_eq!(rail.target_count(Vec2::new(300.0, 880.0)), 11);
        assert_eq!(rail.target_count(Vec2::new(300.0, 0.0)), 8);
        assert_eq!(rail.target_count(Vec2::new(300.0, f32::NAN)), 8);
    }

    #[test]
    fn edge_margins_are_inclusive_bounds() {
        let m = EdgeMargins::horizontal(2.5);
        let extent = Vec2::splat(100.0);
        assert!(m.admits(Vec2::new(2.5, 0.0), extent));
        assert!(m.admits(Vec2::new(97.5, 100.0), extent));
        assert!(!m.admits(Vec2::new(2.4, 50.0), extent));
        assert!(!m.admits(Vec2::new(97.6, 50.0), extent));
        assert!(EdgeMargins::NONE.admits(Vec2::ZERO, extent));
    }

    #[test]
    fn zero_count_spends_no_attempts() {
        let mut rng = SequenceRng::new([0.5]);
        let params = PlacementParams::new(Vec2::splat(100.0), 0);
        let out = place(&params, &[], &mut rng, point);
        assert!(out.placed.is_empty());
        assert_eq!(out.stats.attempts, 0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn huge_count_without_budget_returns_empty() {
        let mut rng = SequenceRng::new([0.5]);
        let params =
            PlacementParams::new(Vec2::splat(100.0), usize::MAX).with_attempts_per_shape(0);
        let out = place(&params, &[], &mut rng, point);
        assert!(out.placed.is_empty());
        assert_eq!(out.stats.attempts, 0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn deterministic_sequence_yields_exact_positions() {
        // Second candidate lands inside the zone, third is too close to the first.
        let mut rng = SequenceRng::new([0.25, 0.25, 0.5, 0.5, 0.25, 0.3125, 0.75, 0.75]);
        let zone = ExclusionZone::Rect(Rect::new(40.0, 40.0, 20.0, 20.0));
        let params = PlacementParams::new(Vec2::splat(100.0), 2)
            .with_attempts_per_shape(10)
            .with_min_gap(10.0);
        let out = place(&params, &[zone], &mut rng, point);

        let positions: Vec<Vec2> = out.placed.iter().map(|p| p.position).collect();
        assert_eq!(positions, vec![Vec2::new(25.0, 25.0), Vec2::new(75.0, 75.0)]);
        assert_eq!(out.stats.attempts, 4);
        assert_eq!(out.stats.rejected_zone, 1);
        assert_eq!(out.stats.rejected_spacing, 1);
    }

    #[test]
    fn exhausted_budget_returns_partial_result() {
        // Every draw lands on the same point, so only the first is accepted.
        let mut rng = SequenceRng::new([0.5]);
        let params = PlacementParams::new(Vec2::splat(100.0), 5)
            .with_attempts_per_shape(3)
            .with_min_gap(1.0);
        let out = place(&params, &[], &mut rng, point);
        assert_eq!(out.placed.len(), 1);
        assert_eq!(out.stats.attempts, 15);
        assert_eq!(out.stats.rejected(), 14);
    }

    #[test]
    fn hero_like_run_respects_rect_and_spacing() {
        let mut rng = StdRng::seed_from_u64(42);
        let title = Rect::new(30.0, 30.0, 40.0, 30.0);
        let zones = [
            ExclusionZone::Rect(title),
            ExclusionZone::Rect(Rect::new(0.0, 0.0, 2.5, 100.0)),
            ExclusionZone::Rect(Rect::new(97.5, 0.0, 2.5, 100.0)),
        ];
        let params = PlacementParams::new(Vec2::splat(100.0), 14)
            .with_attempts_per_shape(140)
            .with_min_gap(6.5)
            .with_edges(EdgeMargins::horizontal(2.5));
        let out = place(&params, &zones, &mut rng, point);

        assert!(!out.placed.is_empty());
        assert!(out.placed.len() <= 14);
        for p in &out.placed {
            assert!(!title.contains_strict(p.position));
            assert!(p.position.x >= 2.5 && p.position.x <= 97.5);
        }
        assert_spaced(&out.placed, 6.5);
    }

    #[test]
    fn radii_widen_spacing_and_circle_zones() {
        let mut rng = StdRng::seed_from_u64(7);
        let icons = [
            ExclusionZone::Circle(Circle::new(Vec2::new(150.0, 200.0), 30.0)),
            ExclusionZone::Circle(Circle::new(Vec2::new(150.0, 500.0), 30.0)),
        ];
        let params = PlacementParams::new(Vec2::new(300.0, 800.0), 12)
            .with_region(Rect::new(0.0, 0.0, 120.0, 800.0))
            .with_attempts_per_shape(120)
            .with_min_gap(6.0)
            .with_edges(EdgeMargins::vertical(8.0));
        let out = place(&params, &icons, &mut rng, |rng| {
            let size = 10.0 + rand01(rng) * 18.0;
            ((), (size * 0.5).max(10.0) + 10.0)
        });

        for p in &out.placed {
            assert!(p.position.x < 120.0);
            assert!(p.position.y >= 8.0 && p.position.y <= 792.0);
            for zone in &icons {
                if let ExclusionZone::Circle(c) = zone {
                    assert!(p.position.distance(c.center) >= c.radius + p.radius);
                }
            }
        }
        assert_spaced(&out.placed, 6.0);
    }
}
