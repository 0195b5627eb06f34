use shape_sprinkle::prelude::{Rect, StaticLayout};

/// A hero banner of `width` x `height` pixels with a centered title block,
/// tagline, two buttons and a title icon.
pub fn hero_layout(width: f32, height: f32) -> StaticLayout {
    let cx = width * 0.5;
    let title_w = (width * 0.42).min(640.0);
    let title_h = height * 0.28;
    let title_y = height * 0.26;
    let tagline_y = title_y + title_h + 18.0;
    let button_y = tagline_y + 64.0;

    StaticLayout::new()
        .with(".shape-layer", Rect::new(0.0, 0.0, width, height))
        .with(
            ".title-wrap",
            Rect::new(cx - title_w * 0.5, title_y, title_w, title_h),
        )
        .with(
            ".tagline",
            Rect::new(cx - title_w * 0.4, tagline_y, title_w * 0.8, 32.0),
        )
        .with_all(
            ".btn",
            [
                Rect::new(cx - 160.0, button_y, 150.0, 48.0),
                Rect::new(cx + 10.0, button_y, 150.0, 48.0),
            ],
        )
        .with(
            ".title-icon",
            Rect::new(cx + title_w * 0.5 - 24.0, title_y - 30.0, 48.0, 48.0),
        )
}

/// An eligibility side panel at `top` with a vertical timeline rail and one
/// icon per step.
pub fn side_rail_layout(top: f32, width: f32, height: f32, steps: usize) -> StaticLayout {
    let rail_x = width * 0.75;
    let spacing = height / (steps.max(1) as f32 + 1.0);
    let icons: Vec<Rect> = (1..=steps)
        .map(|i| Rect::new(rail_x - 20.0, top + spacing * i as f32 - 20.0, 40.0, 40.0))
        .collect();

    StaticLayout::new()
        .with("#eligibility .elig__side", Rect::new(0.0, top, width, height))
        .with(".elig-shapes", Rect::new(0.0, top, width, height))
        .with(".elig-tl-line", Rect::new(rail_x - 2.0, top, 4.0, height))
        .with_all(".elig-tl-icon", icons)
}
