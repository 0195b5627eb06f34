//! Layer configuration and the two page presets.
use std::time::Duration;

use crate::error::{Error, Result};
use crate::exclusion::ForegroundSpec;
use crate::geometry::{Rect, Units};
use crate::sampling::{Axis, Density, EdgeMargins};
use crate::sprinkle::reflow::DEFAULT_DEBOUNCE;
use crate::sprinkle::render::Precision;
use crate::sprinkle::style::{Footprint, StyleRanges};

/// Largest `density.max` a layer may request.
pub const MAX_SHAPES_PER_LAYER: usize = 1024;

/// Where candidate positions are drawn from.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SamplingRegion {
    /// The whole surface.
    #[default]
    Full,
    /// The strip left of an anchor element's horizontal center, minus `gap_px`
    /// from the anchor and `inset_px` of padding. The anchor must exist and
    /// have a non-zero size.
    LeftOf {
        anchor: String,
        gap_px: f32,
        inset_px: f32,
    },
}

/// Everything one decorative layer needs for a run.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerConfig {
    /// Identifier used in logs and events.
    pub id: String,
    /// Coordinate convention for placements.
    pub units: Units,
    /// Selector of the element whose box is the reference frame.
    pub surface: String,
    /// Selector of the shape container, when it differs from the surface.
    pub container: Option<String>,
    pub region: SamplingRegion,
    /// Foreground content shapes must stay clear of.
    pub foreground: Vec<ForegroundSpec>,
    /// Fixed zones in local units, added after the foreground zones.
    pub structural_zones: Vec<Rect>,
    pub edges: EdgeMargins,
    pub density: Density,
    /// Retry budget multiplier: the run stops after `count * attempts_per_shape` draws.
    pub attempts_per_shape: usize,
    /// Gap between shape footprints in local units.
    pub min_gap: f32,
    pub footprint: Footprint,
    pub style: StyleRanges,
    /// Class put on every rendered shape before its kind class.
    pub class_name: String,
    /// Style property that receives the color.
    pub color_property: String,
    /// Number formatting for positions and motion values.
    pub precision: Precision,
    /// Re-run once web fonts finish loading.
    pub reflow_on_fonts_ready: bool,
    pub debounce_ms: u64,
}

impl LayerConfig {
    /// Create a layer over `surface` with permissive defaults.
    pub fn new(id: impl Into<String>, surface: impl Into<String>, units: Units) -> Self {
        Self {
            id: id.into(),
            units,
            surface: surface.into(),
            container: None,
            region: SamplingRegion::Full,
            foreground: Vec::new(),
            structural_zones: Vec::new(),
            edges: EdgeMargins::NONE,
            density: Density::new(Axis::Width, 100.0, 1, 16),
            attempts_per_shape: 120,
            min_gap: 0.0,
            footprint: Footprint::Point,
            style: StyleRanges::default(),
            class_name: "shape".into(),
            color_property: "--color".into(),
            precision: Precision::Fixed,
            reflow_on_fonts_ready: false,
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
        }
    }

    /// Hero banner layer: percent coordinates, large clearances around the
    /// title, tagline, buttons and title icons, plus narrow side gutters.
    pub fn hero() -> Self {
        Self::new("hero", ".shape-layer", Units::Percent)
            .with_foreground(vec![
                ForegroundSpec::first([".title-wrap", ".hero-title"], 36.0),
                ForegroundSpec::first([".tagline", "#home + .tagline", ".hero .tagline"], 24.0),
                ForegroundSpec::all([".btn", "[data-cta]"], 22.0),
                ForegroundSpec::all([".title-icon"], 16.0),
            ])
            .with_structural_zones(vec![
                Rect::new(0.0, 0.0, 2.5, 100.0),
                Rect::new(97.5, 0.0, 2.5, 100.0),
            ])
            .with_edges(EdgeMargins::horizontal(2.5))
            .with_density(Density::new(Axis::Width, 100.0, 12, 18))
            .with_attempts_per_shape(140)
            .with_min_gap(6.5)
            .with_style(StyleRanges::hero())
            .with_reflow_on_fonts_ready(true)
    }

    /// Side rail layer: pixel coordinates, shapes kept left of the timeline
    /// rail and clear of its icons.
    pub fn side_rail() -> Self {
        Self::new("side_rail", "#eligibility .elig__side", Units::Pixels)
            .with_container(".elig-shapes")
            .with_region(SamplingRegion::LeftOf {
                anchor: ".elig-tl-line".into(),
                gap_px: 16.0,
                inset_px: 8.0,
            })
            .with_foreground(vec![ForegroundSpec::all([".elig-tl-icon"], 18.0).as_circles()])
            .with_edges(EdgeMargins::vertical(8.0))
            .with_density(Density::new(Axis::Height, 80.0, 8, 14))
            .with_attempts_per_shape(120)
            .with_min_gap(6.0)
            .with_footprint(Footprint::HalfSize {
                min_px: 10.0,
                pad_px: 10.0,
            })
            .with_style(StyleRanges::side_rail())
            .with_class_name("elig-shape")
            .with_color_property("color")
            .with_precision(Precision::Exact)
    }

    pub fn with_container(mut self, selector: impl Into<String>) -> Self {
        self.container = Some(selector.into());
        self
    }

    pub fn with_region(mut self, region: SamplingRegion) -> Self {
        self.region = region;
        self
    }

    pub fn with_foreground(mut self, foreground: Vec<ForegroundSpec>) -> Self {
        self.foreground = foreground;
        self
    }

    pub fn with_structural_zones(mut self, zones: Vec<Rect>) -> Self {
        self.structural_zones = zones;
        self
    }

    pub fn with_edges(mut self, edges: EdgeMargins) -> Self {
        self.edges = edges;
        self
    }

    pub fn with_density(mut self, density: Density) -> Self {
        self.density = density;
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

    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn with_style(mut self, style: StyleRanges) -> Self {
        self.style = style;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_color_property(mut self, property: impl Into<String>) -> Self {
        self.color_property = property.into();
        self
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_reflow_on_fonts_ready(mut self, enabled: bool) -> Self {
        self.reflow_on_fonts_ready = enabled;
        self
    }

    pub fn with_debounce(mut self, delay: Duration) -> Self {
        self.debounce_ms = delay.as_millis() as u64;
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.surface.trim().is_empty() {
            return Err(Error::InvalidConfig("surface selector is empty".into()));
        }
        if self.attempts_per_shape == 0 {
            return Err(Error::InvalidConfig("attempts_per_shape must be > 0".into()));
        }
        if !self.min_gap.is_finite() || self.min_gap < 0.0 {
            return Err(Error::InvalidConfig("min_gap must be finite and >= 0".into()));
        }
        if self.density.unit_px.is_nan() || self.density.unit_px <= 0.0 {
            return Err(Error::InvalidConfig("density unit_px must be > 0".into()));
        }
        if self.density.max > MAX_SHAPES_PER_LAYER {
            return Err(Error::InvalidConfig(format!(
                "density max ({}) exceeds {MAX_SHAPES_PER_LAYER}",
                self.density.max
            )));
        }
        if self.density.min > self.density.max {
            return Err(Error::InvalidConfig(format!(
                "density min ({}) exceeds max ({})",
                self.density.min, self.density.max
            )));
        }
        for entry in &self.foreground {
            if entry.selectors.is_empty() {
                return Err(Error::InvalidConfig("foreground entry without selectors".into()));
            }
            if !entry.margin_px.is_finite() {
                return Err(Error::InvalidConfig("foreground margin must be finite".into()));
            }
        }
        if let SamplingRegion::LeftOf {
            gap_px, inset_px, ..
        } = &self.region
        {
            if !gap_px.is_finite() || !inset_px.is_finite() {
                return Err(Error::InvalidConfig("region offsets must be finite".into()));
            }
        }
        self.style.validate()
    }
}
