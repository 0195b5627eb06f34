use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use image::{Rgb, RgbImage};
use shape_sprinkle::prelude::{ExclusionZone, PlacedShape, RunResult, ShapeKind};

/// Install a `tracing` fmt subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();
}

/// Parse `#rrggbb` into an RGB triple.
pub fn parse_hex_color(s: &str) -> Option<[u8; 3]> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

/// How a run result is drawn into a PNG.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    /// Surface extent in local units.
    pub extent: Vec2,
    /// Image pixels per viewport pixel, used for shape sizes.
    pub pixel_scale: f32,
    pub background: [u8; 3],
    /// Outline color for exclusion zones, `None` hides them.
    pub zone_color: Option<[u8; 3]>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32), extent: Vec2) -> Self {
        Self {
            image_size,
            extent,
            pixel_scale: 1.0,
            background: [14, 16, 24],
            zone_color: Some([90, 90, 110]),
        }
    }

    pub fn with_pixel_scale(mut self, scale: f32) -> Self {
        self.pixel_scale = scale;
        self
    }

    pub fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = rgb;
        self
    }

    pub fn with_zone_color(mut self, rgb: Option<[u8; 3]>) -> Self {
        self.zone_color = rgb;
        self
    }

    fn to_image(&self, p: Vec2) -> Vec2 {
        let (w, h) = self.image_size;
        Vec2::new(p.x / self.extent.x * w as f32, p.y / self.extent.y * h as f32)
    }

    fn image_scale(&self) -> Vec2 {
        let (w, h) = self.image_size;
        Vec2::new(w as f32 / self.extent.x, h as f32 / self.extent.y)
    }
}

/// Draw zones and shapes of `result` and write the image to `path`.
pub fn render_run_result_to_png(
    result: &RunResult,
    rc: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = rc.image_size;
    let mut img = RgbImage::from_pixel(w, h, Rgb(rc.background));

    if let Some(color) = rc.zone_color {
        for zone in &result.zones {
            draw_zone_outline(&mut img, rc, zone, color);
        }
    }
    for shape in &result.shapes {
        draw_shape(&mut img, rc, shape);
    }

    let path = path.as_ref();
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}

fn blend(img: &mut RgbImage, x: i64, y: i64, color: [u8; 3], alpha: f32) {
    if x < 0 || y < 0 || x >= img.width() as i64 || y >= img.height() as i64 {
        return;
    }
    let px = img.get_pixel_mut(x as u32, y as u32);
    for (dst, src) in px.0.iter_mut().zip(color) {
        *dst = (*dst as f32 * (1.0 - alpha) + src as f32 * alpha).round() as u8;
    }
}

fn draw_zone_outline(img: &mut RgbImage, rc: &RenderConfig, zone: &ExclusionZone, color: [u8; 3]) {
    match zone {
        ExclusionZone::Rect(r) => {
            let a = rc.to_image(r.min());
            let b = rc.to_image(r.min() + r.size());
            let (x0, y0, x1, y1) = (a.x as i64, a.y as i64, b.x as i64, b.y as i64);
            for x in x0..=x1 {
                blend(img, x, y0, color, 1.0);
                blend(img, x, y1, color, 1.0);
            }
            for y in y0..=y1 {
                blend(img, x0, y, color, 1.0);
                blend(img, x1, y, color, 1.0);
            }
        }
        ExclusionZone::Circle(c) => {
            let center = rc.to_image(c.center);
            let radius = c.radius * rc.image_scale().x;
            let steps = (radius * 8.0).max(32.0) as usize;
            for i in 0..steps {
                let t = i as f32 / steps as f32 * std::f32::consts::TAU;
                let p = center + Vec2::new(t.cos(), t.sin()) * radius;
                blend(img, p.x as i64, p.y as i64, color, 1.0);
            }
        }
    }
}

fn draw_shape(img: &mut RgbImage, rc: &RenderConfig, shape: &PlacedShape) {
    let attrs = &shape.attributes;
    let color = parse_hex_color(&attrs.color).unwrap_or([235, 235, 235]);
    let alpha = attrs.opacity.map_or(0.85, |o| (o * 4.0).clamp(0.2, 1.0));
    let center = rc.to_image(shape.position);
    let half = (attrs.size_px * rc.pixel_scale * 0.5).max(1.0);
    let angle = attrs.rotation_deg.unwrap_or(0.0).to_radians();
    let (sin, cos) = angle.sin_cos();

    let reach = half * 1.5;
    let (x0, x1) = ((center.x - reach) as i64, (center.x + reach) as i64);
    let (y0, y1) = ((center.y - reach) as i64, (center.y + reach) as i64);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
            // Into the shape's own frame.
            let local = Vec2::new(d.x * cos + d.y * sin, -d.x * sin + d.y * cos);
            if covers(attrs.kind, local, half) {
                blend(img, x, y, color, alpha);
            }
        }
    }
}

fn covers(kind: ShapeKind, p: Vec2, half: f32) -> bool {
    match kind {
        ShapeKind::Circle => p.length() <= half,
        ShapeKind::Square => p.x.abs() <= half && p.y.abs() <= half,
        ShapeKind::Diamond => p.x.abs() + p.y.abs() <= half,
        ShapeKind::Pill => {
            // Capsule twice as wide as tall.
            let r = half * 0.5;
            let dx = (p.x.abs() - (half - r)).max(0.0);
            dx * dx + p.y * p.y <= r * r
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_colors() {
        assert_eq!(parse_hex_color("#f52c7a"), Some([0xf5, 0x2c, 0x7a]));
        assert_eq!(parse_hex_color("f52c7a"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn pill_is_wider_than_tall() {
        assert!(covers(ShapeKind::Pill, Vec2::new(8.0, 0.0), 10.0));
        assert!(!covers(ShapeKind::Pill, Vec2::new(0.0, 8.0), 10.0));
        assert!(covers(ShapeKind::Diamond, Vec2::new(4.0, 4.0), 10.0));
        assert!(!covers(ShapeKind::Diamond, Vec2::new(6.0, 6.0), 10.0));
    }
}
