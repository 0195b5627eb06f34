//! Geometry primitives shared by the exclusion builder and the placement loop.
//!
//! Two coordinate conventions exist: viewport coordinates (what a host measures)
//! and surface-local coordinates (what placement works in). A [`Surface`] converts
//! between the two, either into percent-of-surface or pixel offsets depending on
//! its [`Units`].
use glam::Vec2;

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(size: Vec2) -> Self {
        Self::new(0.0, 0.0, size.x, size.y)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// True when either dimension is zero, negative or not a number.
    pub fn is_empty(&self) -> bool {
        !(self.w > 0.0 && self.h > 0.0)
    }

    /// Strict interior test. Points on an edge are outside.
    pub fn contains_strict(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }
}

/// Circle given by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Unit convention for surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Units {
    /// 0..100 on both axes, independent of the measured size.
    #[default]
    Percent,
    /// Pixel offsets from the surface's top-left corner.
    Pixels,
}

/// A measured reference frame that placements are computed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    viewport: Rect,
    units: Units,
}

impl Surface {
    /// Returns `None` when the measured rectangle has no area.
    pub fn new(viewport: Rect, units: Units) -> Option<Self> {
        if viewport.is_empty() {
            return None;
        }
        Some(Self { viewport, units })
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Size of the surface in local units.
    pub fn extent(&self) -> Vec2 {
        match self.units {
            Units::Percent => Vec2::splat(100.0),
            Units::Pixels => self.viewport.size(),
        }
    }

    /// Local units per viewport pixel on each axis.
    fn scale(&self) -> Vec2 {
        match self.units {
            Units::Percent => Vec2::new(100.0 / self.viewport.w, 100.0 / self.viewport.h),
            Units::Pixels => Vec2::ONE,
        }
    }

    pub fn point_to_local(&self, p: Vec2) -> Vec2 {
        (p - self.viewport.min()) * self.scale()
    }

    /// Translate a viewport rectangle into surface-local coordinates.
    pub fn to_local(&self, rect: Rect) -> Rect {
        let min = self.point_to_local(rect.min());
        let size = rect.size() * self.scale();
        Rect::new(min.x, min.y, size.x, size.y)
    }

    /// Per-axis local size of a pixel margin.
    pub fn margin_to_local(&self, px: f32) -> Vec2 {
        self.scale() * px
    }

    /// Local length of a pixel distance, measured along the horizontal axis.
    pub fn length_to_local(&self, px: f32) -> f32 {
        px * self.scale().x
    }

    /// Clamp each component into `[0, extent]` of its own axis.
    ///
    /// Width and height are clamped independently of the origin, so a zone may
    /// still reach past the far edge; containment tests are unaffected by that.
    pub fn clamp_to_bounds(&self, rect: Rect) -> Rect {
        let e = self.extent();
        Rect::new(
            rect.x.clamp(0.0, e.x),
            rect.y.clamp(0.0, e.y),
            rect.w.clamp(0.0, e.x),
            rect.h.clamp(0.0, e.y),
        )
    }

    /// Grow a local rectangle by a pixel margin on every side, then clamp it.
    pub fn inflate(&self, local: Rect, margin_px: f32) -> Rect {
        let m = self.margin_to_local(margin_px);
        self.clamp_to_bounds(Rect::new(
            local.x - m.x,
            local.y - m.y,
            local.w + 2.0 * m.x,
            local.h + 2.0 * m.y,
        ))
    }
}

/// A region no shape center may fall within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExclusionZone {
    Rect(Rect),
    Circle(Circle),
}

impl ExclusionZone {
    /// Whether a shape centered at `p` with footprint `radius` violates this zone.
    ///
    /// Rectangles test the center only; circles keep the whole footprint out.
    pub fn blocks(&self, p: Vec2, radius: f32) -> bool {
        match self {
            ExclusionZone::Rect(r) => r.contains_strict(p),
            ExclusionZone::Circle(c) => p.distance(c.center) < c.radius + radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn strict_containment_excludes_edges() {
        let r = Rect::new(30.0, 30.0, 40.0, 30.0);
        assert!(r.contains_strict(Vec2::new(50.0, 45.0)));
        assert!(!r.contains_strict(Vec2::new(30.0, 45.0)));
        assert!(!r.contains_strict(Vec2::new(70.0, 45.0)));
        assert!(!r.contains_strict(Vec2::new(50.0, 60.0)));
        assert!(!r.contains_strict(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn zero_area_surface_is_rejected() {
        assert!(Surface::new(Rect::new(0.0, 0.0, 0.0, 0.0), Units::Percent).is_none());
        assert!(Surface::new(Rect::new(0.0, 0.0, 200.0, 0.0), Units::Pixels).is_none());
        assert!(Surface::new(Rect::new(0.0, 0.0, f32::NAN, 10.0), Units::Pixels).is_none());
        assert!(Surface::new(Rect::new(0.0, 0.0, 10.0, 10.0), Units::Pixels).is_some());
    }

    #[test]
    fn percent_surface_maps_viewport_rects() {
        let surface = Surface::new(Rect::new(100.0, 50.0, 1000.0, 500.0), Units::Percent).unwrap();
        let local = surface.to_local(Rect::new(400.0, 200.0, 400.0, 150.0));
        assert!(approx(local.x, 30.0));
        assert!(approx(local.y, 30.0));
        assert!(approx(local.w, 40.0));
        assert!(approx(local.h, 30.0));
        assert_eq!(surface.extent(), Vec2::splat(100.0));
    }

    #[test]
    fn pixel_surface_uses_offsets() {
        let surface = Surface::new(Rect::new(20.0, 40.0, 300.0, 800.0), Units::Pixels).unwrap();
        let local = surface.to_local(Rect::new(50.0, 90.0, 10.0, 12.0));
        assert_eq!(local, Rect::new(30.0, 50.0, 10.0, 12.0));
        assert_eq!(surface.margin_to_local(8.0), Vec2::splat(8.0));
        assert_eq!(surface.extent(), Vec2::new(300.0, 800.0));
    }

    #[test]
    fn inflate_converts_margin_and_clamps() {
        let surface = Surface::new(Rect::new(0.0, 0.0, 1000.0, 500.0), Units::Percent).unwrap();
        // 36px is 3.6% horizontally and 7.2% vertically on a 1000x500 surface.
        let grown = surface.inflate(Rect::new(30.0, 30.0, 40.0, 30.0), 36.0);
        assert!(approx(grown.x, 26.4));
        assert!(approx(grown.y, 22.8));
        assert!(approx(grown.w, 47.2));
        assert!(approx(grown.h, 44.4));

        let edge = surface.inflate(Rect::new(1.0, 95.0, 99.0, 10.0), 36.0);
        assert_eq!(edge.x, 0.0);
        assert!(approx(edge.y, 87.8));
        assert_eq!(edge.w, 100.0);
        assert!(approx(edge.h, 24.4));
    }

    #[test]
    fn circle_zone_accounts_for_candidate_radius() {
        let zone = ExclusionZone::Circle(Circle::new(Vec2::new(100.0, 100.0), 30.0));
        assert!(zone.blocks(Vec2::new(125.0, 100.0), 0.0));
        assert!(!zone.blocks(Vec2::new(135.0, 100.0), 0.0));
        assert!(zone.blocks(Vec2::new(135.0, 100.0), 10.0));
        assert!(!zone.blocks(Vec2::new(140.0, 100.0), 10.0));
    }
}
