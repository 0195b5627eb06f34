//! Per-shape randomized styling.
use rand::RngCore;

use crate::error::{Error, Result};
use crate::sampling::{pick, UnitRange};
use crate::sprinkle::{ShapeKind, DEFAULT_PALETTE};

/// How much room a shape claims around its center during placement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Footprint {
    /// Zero radius; spacing comes from the layer's minimum gap alone.
    #[default]
    Point,
    /// `max(min_px, size / 2) + pad_px`.
    HalfSize { min_px: f32, pad_px: f32 },
}

impl Footprint {
    pub fn radius_px(&self, size_px: f32) -> f32 {
        match *self {
            Footprint::Point => 0.0,
            Footprint::HalfSize { min_px, pad_px } => (size_px * 0.5).max(min_px) + pad_px,
        }
    }
}

/// Resolved styling for one shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeAttributes {
    pub kind: ShapeKind,
    pub color: String,
    pub size_px: f32,
    pub duration_s: f32,
    pub delay_s: f32,
    /// Horizontal sway amplitude.
    pub sway_px: f32,
    /// Vertical bob amplitude.
    pub bob_px: f32,
    /// `None` leaves the shape unrotated.
    pub rotation_deg: Option<f32>,
    pub rotation_amplitude_deg: Option<f32>,
    pub spin_duration_s: Option<f32>,
    pub opacity: Option<f32>,
}

/// Ranges every shape attribute is drawn from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleRanges {
    pub kinds: Vec<ShapeKind>,
    pub palette: Vec<String>,
    pub size_px: UnitRange,
    /// Floor the drawn size to whole pixels.
    pub whole_pixel_size: bool,
    pub duration_s: UnitRange,
    pub delay_s: UnitRange,
    pub sway_px: UnitRange,
    pub bob_px: UnitRange,
    pub rotation_deg: UnitRange,
    /// Also rotate kinds that look the same at any angle.
    pub rotate_invariant_kinds: bool,
    pub rotation_amplitude_deg: Option<UnitRange>,
    pub spin_duration_s: Option<UnitRange>,
    pub opacity: Option<UnitRange>,
}

impl StyleRanges {
    /// Bold, fairly energetic shapes for a hero banner.
    pub fn hero() -> Self {
        Self {
            kinds: ShapeKind::ALL.to_vec(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            size_px: UnitRange::new(14.0, 36.0),
            whole_pixel_size: true,
            duration_s: UnitRange::new(18.0, 26.0),
            delay_s: UnitRange::new(0.0, 6.0),
            sway_px: UnitRange::new(12.0, 22.0),
            bob_px: UnitRange::new(8.0, 16.0),
            rotation_deg: UnitRange::symmetric(8.0),
            rotate_invariant_kinds: false,
            rotation_amplitude_deg: Some(UnitRange::new(2.0, 4.0)),
            spin_duration_s: Some(UnitRange::new(40.0, 60.0)),
            opacity: None,
        }
    }

    /// Small, faint shapes for a side rail. Delays are negative so the
    /// animations start out of phase.
    pub fn side_rail() -> Self {
        Self {
            kinds: vec![ShapeKind::Circle, ShapeKind::Square, ShapeKind::Diamond],
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            size_px: UnitRange::new(10.0, 28.0),
            whole_pixel_size: false,
            duration_s: UnitRange::new(18.0, 36.0),
            delay_s: UnitRange::new(0.0, -10.0),
            sway_px: UnitRange::new(4.0, 10.0),
            bob_px: UnitRange::new(3.0, 9.0),
            rotation_deg: UnitRange::symmetric(4.0),
            rotate_invariant_kinds: true,
            rotation_amplitude_deg: None,
            spin_duration_s: None,
            opacity: Some(UnitRange::new(0.08, 0.15)),
        }
    }

    pub fn with_kinds(mut self, kinds: impl Into<Vec<ShapeKind>>) -> Self {
        self.kinds = kinds.into();
        self
    }

    pub fn with_palette<S: Into<String>>(mut self, palette: impl IntoIterator<Item = S>) -> Self {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_size(mut self, size_px: UnitRange) -> Self {
        self.size_px = size_px;
        self
    }

    pub fn with_opacity(mut self, opacity: Option<UnitRange>) -> Self {
        self.opacity = opacity;
        self
    }

    /// Draw one shape's attributes.
    ///
    /// Draw order is kind, color, size, duration, delay, sway, bob, rotation,
    /// then rotation amplitude, spin duration and opacity when configured. The
    /// rotation draw is consumed even for kinds that end up unrotated.
    pub fn draw(&self, rng: &mut dyn RngCore) -> ShapeAttributes {
        let kind = pick(&self.kinds, rng).copied().unwrap_or(ShapeKind::Circle);
        let color = pick(&self.palette, rng).cloned().unwrap_or_default();
        let mut size_px = self.size_px.sample(rng);
        if self.whole_pixel_size {
            size_px = size_px.floor();
        }
        let duration_s = self.duration_s.sample(rng);
        let delay_s = self.delay_s.sample(rng);
        let sway_px = self.sway_px.sample(rng);
        let bob_px = self.bob_px.sample(rng);
        let rotation = self.rotation_deg.sample(rng);
        let rotation_deg =
            (self.rotate_invariant_kinds || !kind.is_rotation_invariant()).then_some(rotation);

        ShapeAttributes {
            kind,
            color,
            size_px,
            duration_s,
            delay_s,
            sway_px,
            bob_px,
            rotation_deg,
            rotation_amplitude_deg: self.rotation_amplitude_deg.map(|r| r.sample(rng)),
            spin_duration_s: self.spin_duration_s.map(|r| r.sample(rng)),
            opacity: self.opacity.map(|r| r.sample(rng)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.kinds.is_empty() {
            return Err(Error::InvalidConfig("style needs at least one kind".into()));
        }
        if self.palette.is_empty() {
            return Err(Error::InvalidConfig("style needs at least one color".into()));
        }
        let ranges = [
            ("size_px", Some(self.size_px)),
            ("duration_s", Some(self.duration_s)),
            ("delay_s", Some(self.delay_s)),
            ("sway_px", Some(self.sway_px)),
            ("bob_px", Some(self.bob_px)),
            ("rotation_deg", Some(self.rotation_deg)),
            ("rotation_amplitude_deg", self.rotation_amplitude_deg),
            ("spin_duration_s", self.spin_duration_s),
            ("opacity", self.opacity),
        ];
        for (name, range) in ranges {
            if let Some(r) = range {
                if !r.is_finite() {
                    return Err(Error::InvalidConfig(format!("{name} must be finite")));
                }
            }
        }
        if self.size_px.min < 0.0 || self.size_px.max < 0.0 {
            return Err(Error::InvalidConfig("size_px must be >= 0".into()));
        }
        if let Some(op) = self.opacity {
            let unit = 0.0..=1.0;
            if !unit.contains(&op.min) || !unit.contains(&op.max) {
                return Err(Error::InvalidConfig("opacity must lie in [0, 1]".into()));
            }
        }
        Ok(())
    }
}

impl Default for StyleRanges {
    fn default() -> Self {
        Self::hero()
    }
}
