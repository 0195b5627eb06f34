use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shape_sprinkle::prelude::*;
use shape_sprinkle_examples::{hero_layout, init_tracing, render_run_result_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let (width, height) = (1440.0, 720.0);
    let layout = hero_layout(width, height);

    let config = LayerConfig::hero();
    let mut target = VecLayer::new();
    let mut rng = StdRng::seed_from_u64(2025);
    let outcome = run_layer(&config, &layout, &mut target, &mut rng, None);

    let Some(result) = outcome.result() else {
        anyhow::bail!("hero layer was skipped: {outcome:?}");
    };
    for el in target.as_slice().iter().take(3) {
        tracing::info!("{} at ({}, {}) {:?}", el.class, el.left, el.top, el.properties);
    }
    tracing::info!(
        "{} of {} shapes, {} attempts",
        result.shapes.len(),
        result.target_count,
        result.stats.attempts
    );

    // Percent coordinates map straight onto the image.
    let rc = RenderConfig::new((width as u32, height as u32), Vec2::splat(100.0));
    render_run_result_to_png(result, &rc, "hero-layer-preview.png")?;

    Ok(())
}
