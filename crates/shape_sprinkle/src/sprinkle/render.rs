//! Materialized shapes and the containers they are rendered into.
//!
//! A [`ShapeLayer`] is owned by exactly one decorative layer. [`render`] always
//! clears it before appending, so repeated runs never accumulate shapes.
use glam::Vec2;

use crate::geometry::Units;
use crate::sprinkle::style::ShapeAttributes;

/// How positions and motion values are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precision {
    /// Fixed decimals: 3 for percent positions, 1 for pixel positions and
    /// amplitudes, 2 for durations and delays.
    #[default]
    Fixed,
    /// Shortest representation that round-trips the drawn value.
    Exact,
}

impl Precision {
    fn write(self, v: f32, decimals: usize, suffix: &str) -> String {
        match self {
            Precision::Fixed => format!("{v:.decimals$}{suffix}"),
            Precision::Exact => format!("{v}{suffix}"),
        }
    }
}

/// A renderable shape: classes, position and style properties.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeElement {
    pub class: String,
    pub left: String,
    pub top: String,
    /// Style properties in insertion order.
    pub properties: Vec<(String, String)>,
}

impl ShapeElement {
    /// Build the element for a placed shape.
    ///
    /// Rotation, rotation amplitude, spin and opacity keep fixed decimals
    /// under either [`Precision`].
    pub fn materialize(
        class_name: &str,
        color_property: &str,
        units: Units,
        precision: Precision,
        position: Vec2,
        attrs: &ShapeAttributes,
    ) -> Self {
        let (decimals, unit) = match units {
            Units::Percent => (3, "%"),
            Units::Pixels => (1, "px"),
        };
        let left = precision.write(position.x, decimals, unit);
        let top = precision.write(position.y, decimals, unit);

        let mut properties = vec![
            (color_property.to_string(), attrs.color.clone()),
            ("--sz".to_string(), format!("{}px", attrs.size_px)),
            ("--dur".to_string(), precision.write(attrs.duration_s, 2, "s")),
            ("--delay".to_string(), precision.write(attrs.delay_s, 2, "s")),
            ("--ax".to_string(), precision.write(attrs.sway_px, 1, "px")),
            ("--ay".to_string(), precision.write(attrs.bob_px, 1, "px")),
        ];
        if let Some(amp) = attrs.rotation_amplitude_deg {
            properties.push(("--rAmp".into(), format!("{amp:.2}deg")));
        }
        if let Some(spin) = attrs.spin_duration_s {
            properties.push(("--spinDur".into(), format!("{spin:.1}s")));
        }
        if let Some(rot) = attrs.rotation_deg {
            properties.push(("--rot".into(), format!("{rot:.1}deg")));
        }
        if let Some(op) = attrs.opacity {
            properties.push(("--op".into(), format!("{op:.3}")));
        }

        Self {
            class: format!("{class_name} {}", attrs.kind.class_name()),
            left,
            top,
            properties,
        }
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A container the pipeline fully owns and repopulates each run.
pub trait ShapeLayer {
    fn clear(&mut self);
    fn append(&mut self, element: ShapeElement);
}

/// Replace the layer's contents with `elements`. Returns how many were appended.
pub fn render<L, I>(layer: &mut L, elements: I) -> usize
where
    L: ShapeLayer + ?Sized,
    I: IntoIterator<Item = ShapeElement>,
{
    layer.clear();
    let mut n = 0;
    for element in elements {
        layer.append(element);
        n += 1;
    }
    n
}

/// An in-memory layer that keeps rendered elements in a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct VecLayer {
    elements: Vec<ShapeElement>,
    clears: usize,
}

impl VecLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[ShapeElement] {
        &self.elements
    }

    pub fn into_inner(self) -> Vec<ShapeElement> {
        self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// How many times the layer has been cleared.
    pub fn clears(&self) -> usize {
        self.clears
    }
}

impl ShapeLayer for VecLayer {
    fn clear(&mut self) {
        self.elements.clear();
        self.clears += 1;
    }

    fn append(&mut self, element: ShapeElement) {
        self.elements.push(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprinkle::ShapeKind;

    fn attrs(kind: ShapeKind) -> ShapeAttributes {
        ShapeAttributes {
            kind,
            color: "#2de2e6".into(),
            size_px: 20.0,
            duration_s: 21.456,
            delay_s: -3.0,
            sway_px: 12.34,
            bob_px: 8.0,
            rotation_deg: Some(-2.3),
            rotation_amplitude_deg: None,
            spin_duration_s: None,
            opacity: Some(0.1),
        }
    }

    #[test]
    fn materialize_formats_position_and_properties() {
        let el = ShapeElement::materialize(
            "elig-shape",
            "color",
            Units::Pixels,
            Precision::Fixed,
            Vec2::new(12.3, 300.0),
            &attrs(ShapeKind::Diamond),
        );
        assert_eq!(el.class, "elig-shape diamond");
        assert_eq!(el.left, "12.3px");
        assert_eq!(el.top, "300.0px");
        assert_eq!(el.property("color"), Some("#2de2e6"));
        assert_eq!(el.property("--sz"), Some("20px"));
        assert_eq!(el.property("--dur"), Some("21.46s"));
        assert_eq!(el.property("--delay"), Some("-3.00s"));
        assert_eq!(el.property("--rot"), Some("-2.3deg"));
        assert_eq!(el.property("--op"), Some("0.100"));
        assert_eq!(el.property("--spinDur"), None);
    }

    #[test]
    fn percent_positions_carry_percent_suffix() {
        let el = ShapeElement::materialize(
            "shape",
            "--color",
            Units::Percent,
            Precision::Fixed,
            Vec2::new(12.5, 50.0),
            &attrs(ShapeKind::Pill),
        );
        assert_eq!(el.left, "12.500%");
        assert_eq!(el.top, "50.000%");
        assert_eq!(el.property("--color"), Some("#2de2e6"));
    }

    #[test]
    fn exact_precision_keeps_drawn_motion_values() {
        let el = ShapeElement::materialize(
            "elig-shape",
            "color",
            Units::Pixels,
            Precision::Exact,
            Vec2::new(12.34, 300.5),
            &attrs(ShapeKind::Square),
        );
        assert_eq!(el.left, "12.34px");
        assert_eq!(el.top, "300.5px");
        assert_eq!(el.property("--dur"), Some("21.456s"));
        assert_eq!(el.property("--delay"), Some("-3s"));
        assert_eq!(el.property("--ax"), Some("12.34px"));
        assert_eq!(el.property("--ay"), Some("8px"));
        assert_eq!(el.property("--rot"), Some("-2.3deg"));
        assert_eq!(el.property("--op"), Some("0.100"));
    }

    #[test]
    fn render_replaces_previous_contents() {
        let mut layer = VecLayer::new();
        let el = ShapeElement::materialize(
            "shape",
            "--color",
            Units::Percent,
            Precision::Fixed,
            Vec2::new(10.0, 10.0),
            &attrs(ShapeKind::Square),
        );
        assert_eq!(render(&mut layer, vec![el.clone(), el.clone(), el.clone()]), 3);
        assert_eq!(render(&mut layer, vec![el]), 1);
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.clears(), 2);
        assert_eq!(render(&mut layer, Vec::new()), 0);
        assert!(layer.is_empty());
    }
}
