use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shape_sprinkle::prelude::*;
use shape_sprinkle_examples::{
    init_tracing, render_run_result_to_png, side_rail_layout, RenderConfig,
};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let (width, height) = (340.0, 960.0);
    let layout = side_rail_layout(1400.0, width, height, 5);

    let mut sprinkler = Sprinkler::try_new(LayerConfig::side_rail(), VecLayer::new())?;
    let mut rng = StdRng::seed_from_u64(7);
    let mut sink = TracingSink::new();
    let outcome = sprinkler.reflow_with_events(&layout, &mut rng, &mut sink);
    tracing::info!("sink saw {} placements", sink.shapes());

    let Some(result) = outcome.result() else {
        anyhow::bail!("side rail was skipped: {outcome:?}");
    };
    tracing::info!(
        "region {:?}, {} of {} shapes, rejected edge={} zone={} spacing={}",
        result.region,
        result.shapes.len(),
        result.target_count,
        result.stats.rejected_edge,
        result.stats.rejected_zone,
        result.stats.rejected_spacing
    );

    let rc = RenderConfig::new((width as u32, height as u32), Vec2::new(width, height))
        .with_background([245, 243, 238]);
    render_run_result_to_png(result, &rc, "side-rail-preview.png")?;

    Ok(())
}
