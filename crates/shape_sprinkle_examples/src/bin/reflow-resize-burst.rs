use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use shape_sprinkle::prelude::*;
use shape_sprinkle_examples::{hero_layout, init_tracing};

// Simulates a window drag: a burst of resize events every 16 ms, then a
// fonts-ready notification. Only one debounced reflow should follow.
fn main() -> anyhow::Result<()> {
    init_tracing();
    let mut rng = StdRng::seed_from_u64(11);
    let mut sink = FnSink::new(|event| match event {
        SprinkleEvent::TriggerHandled {
            trigger, action, ..
        } => tracing::debug!("{trigger:?} -> {action:?}"),
        SprinkleEvent::RunFinished { result, .. } => {
            tracing::info!("reflow placed {} shapes", result.shapes.len())
        }
        SprinkleEvent::RunSkipped { reason, .. } => tracing::warn!("skipped: {reason}"),
        _ => {}
    });

    let mut sprinkler = Sprinkler::try_new(LayerConfig::hero(), VecLayer::new())?;
    let t0 = Instant::now();
    sprinkler.handle(
        ReflowTrigger::Load,
        t0,
        &hero_layout(1280.0, 640.0),
        &mut rng,
        &mut sink,
    );

    let mut now = t0;
    let mut width = 1280.0;
    for _ in 0..20 {
        now += Duration::from_millis(16);
        width -= 24.0;
        let layout = hero_layout(width, 640.0);
        sprinkler.handle(ReflowTrigger::Resize, now, &layout, &mut rng, &mut sink);
        sprinkler.tick(now, &layout, &mut rng, &mut sink);
    }
    sprinkler.handle(
        ReflowTrigger::FontsReady,
        now,
        &hero_layout(width, 640.0),
        &mut rng,
        &mut sink,
    );

    let layout = hero_layout(width, 640.0);
    while let Some(deadline) = sprinkler.next_deadline() {
        now = deadline;
        sprinkler.tick(now, &layout, &mut rng, &mut sink);
    }

    tracing::info!(
        "{} runs, {} shapes on screen at width {width}",
        sprinkler.runs(),
        sprinkler.target().len()
    );
    Ok(())
}
