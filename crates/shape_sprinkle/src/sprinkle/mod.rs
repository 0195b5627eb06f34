//! Decorative shape layers: configuration, styling, rendering and reflow.
//!
//! A layer run measures the page through a [`crate::layout::Layout`], builds
//! exclusion zones, places shapes with [`crate::sampling::place`], gives each
//! one randomized styling and renders the result into a [`render::ShapeLayer`],
//! replacing whatever the previous run left there.
pub mod config;
pub mod events;
pub mod reflow;
pub mod render;
pub mod runner;
pub mod style;

/// Visual type of a decorative shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Circle,
    Square,
    Diamond,
    Pill,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Diamond,
        ShapeKind::Pill,
    ];

    /// Class name used when rendering.
    pub fn class_name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Diamond => "diamond",
            ShapeKind::Pill => "pill",
        }
    }

    /// Rotating this kind does not change how it looks.
    pub fn is_rotation_invariant(self) -> bool {
        matches!(self, ShapeKind::Circle)
    }
}

/// Default palette shared by both page layers.
pub const DEFAULT_PALETTE: [&str; 4] = ["#f52c7a", "#ec8a14", "#2de2e6", "#f2c94c"];
