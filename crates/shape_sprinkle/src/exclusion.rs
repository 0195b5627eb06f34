//! Exclusion zones derived from measured foreground content.
//!
//! Each [`ForegroundSpec`] names one or more selectors and the clearance that
//! shapes must keep from the matched elements. Elements that are absent from
//! the layout contribute nothing; building zones never fails.
use tracing::trace;

use crate::geometry::{Circle, ExclusionZone, Rect, Surface};
use crate::layout::Layout;

/// How many elements a [`ForegroundSpec`] picks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Match {
    /// The first element of the first selector that matches anything.
    #[default]
    First,
    /// Every element of every selector.
    All,
}

/// Zone geometry produced for a matched element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneShape {
    /// The element's box grown by the margin on every side.
    #[default]
    Rect,
    /// A circle at the element's center with radius `max(w, h) / 2 + margin`.
    Circle,
}

/// Foreground content that shapes must stay clear of.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForegroundSpec {
    /// Selectors tried in order.
    pub selectors: Vec<String>,
    /// Required clearance in viewport pixels.
    pub margin_px: f32,
    pub matching: Match,
    pub shape: ZoneShape,
}

impl ForegroundSpec {
    /// Rectangular zone around the first element found among `selectors`.
    pub fn first<S: Into<String>>(selectors: impl IntoIterator<Item = S>, margin_px: f32) -> Self {
        Self {
            selectors: selectors.into_iter().map(Into::into).collect(),
            margin_px,
            matching: Match::First,
            shape: ZoneShape::Rect,
        }
    }

    /// Rectangular zones around every element matched by `selectors`.
    pub fn all<S: Into<String>>(selectors: impl IntoIterator<Item = S>, margin_px: f32) -> Self {
        Self {
            matching: Match::All,
            ..Self::first(selectors, margin_px)
        }
    }

    /// Use circular zones instead of rectangles.
    pub fn as_circles(mut self) -> Self {
        self.shape = ZoneShape::Circle;
        self
    }

    fn resolve<L: Layout + ?Sized>(&self, layout: &L) -> Vec<Rect> {
        match self.matching {
            Match::First => self
                .selectors
                .iter()
                .find_map(|s| layout.query(s))
                .into_iter()
                .collect(),
            Match::All => self
                .selectors
                .iter()
                .flat_map(|s| layout.query_all(s))
                .collect(),
        }
    }

    fn zone_for(&self, surface: &Surface, rect: Rect) -> ExclusionZone {
        match self.shape {
            ZoneShape::Rect => {
                ExclusionZone::Rect(surface.inflate(surface.to_local(rect), self.margin_px))
            }
            ZoneShape::Circle => {
                let radius_px = rect.w.max(rect.h) * 0.5 + self.margin_px;
                ExclusionZone::Circle(Circle::new(
                    surface.point_to_local(rect.center()),
                    surface.length_to_local(radius_px),
                ))
            }
        }
    }
}

/// Snapshot the exclusion zones for one placement run.
///
/// Foreground zones come first, in configuration order, followed by the fixed
/// `structural` rectangles which are already in local units.
pub fn build_exclusions<L: Layout + ?Sized>(
    surface: &Surface,
    layout: &L,
    foreground: &[ForegroundSpec],
    structural: &[Rect],
) -> Vec<ExclusionZone> {
    let mut zones = Vec::with_capacity(foreground.len() + structural.len());
    for entry in foreground {
        let rects = entry.resolve(layout);
        if rects.is_empty() {
            trace!("No elements for {:?}; no zone added.", entry.selectors);
        }
        zones.extend(rects.into_iter().map(|r| entry.zone_for(surface, r)));
    }
    zones.extend(
        structural
            .iter()
            .map(|r| ExclusionZone::Rect(surface.clamp_to_bounds(*r))),
    );
    zones
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::geometry::Units;
    use crate::layout::StaticLayout;

    fn percent_surface() -> Surface {
        Surface::new(Rect::new(0.0, 0.0, 1000.0, 500.0), Units::Percent).unwrap()
    }

    #[test]
    fn first_match_falls_back_through_selectors() {
        let layout = StaticLayout::new().with(".hero-title", Rect::new(300.0, 150.0, 400.0, 150.0));
        let fg = ForegroundSpec::first([".title-wrap", ".hero-title"], 0.0);
        let zones = build_exclusions(&percent_surface(), &layout, &[fg], &[]);
        match zones.as_slice() {
            [ExclusionZone::Rect(r)] => {
                let expected = [30.0, 30.0, 40.0, 30.0];
                for (got, want) in [r.x, r.y, r.w, r.h].into_iter().zip(expected) {
                    assert!((got - want).abs() < 1e-4, "{got} != {want}");
                }
            }
            other => panic!("unexpected zones: {other:?}"),
        }
    }

    #[test]
    fn all_match_collects_every_element() {
        let layout = StaticLayout::new()
            .with_all(
                ".btn",
                [
                    Rect::new(100.0, 400.0, 100.0, 40.0),
                    Rect::new(300.0, 400.0, 100.0, 40.0),
                ],
            )
            .with("[data-cta]", Rect::new(500.0, 400.0, 100.0, 40.0));
        let fg = ForegroundSpec::all([".btn", "[data-cta]"], 22.0);
        let zones = build_exclusions(&percent_surface(), &layout, &[fg], &[]);
        assert_eq!(zones.len(), 3);
    }

    #[test]
    fn missing_elements_contribute_nothing() {
        let layout = StaticLayout::new();
        let foreground = [
            ForegroundSpec::first([".title-wrap"], 36.0),
            ForegroundSpec::all([".btn"], 22.0),
        ];
        let gutters = [Rect::new(0.0, 0.0, 2.5, 100.0)];
        let zones = build_exclusions(&percent_surface(), &layout, &foreground, &gutters);
        assert_eq!(zones, vec![ExclusionZone::Rect(gutters[0])]);
    }

    #[test]
    fn circles_use_larger_dimension_plus_margin() {
        let surface = Surface::new(Rect::new(10.0, 10.0, 300.0, 600.0), Units::Pixels).unwrap();
        let layout = StaticLayout::new().with(".icon", Rect::new(110.0, 210.0, 20.0, 30.0));
        let fg = ForegroundSpec::all([".icon"], 18.0).as_circles();
        let zones = build_exclusions(&surface, &layout, &[fg], &[]);
        match zones.as_slice() {
            [ExclusionZone::Circle(c)] => {
                assert_eq!(c.center, Vec2::new(110.0, 215.0));
                assert_eq!(c.radius, 33.0);
            }
            other => panic!("unexpected zones: {other:?}"),
        }
    }
}
