use anyhow::Context;
use chrono::{Datelike, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use shape_sprinkle::prelude::*;
use shape_sprinkle_examples::init_tracing;

// Usage: meeting-date [YYYY-MM-DD]
fn main() -> anyhow::Result<()> {
    init_tracing();
    let from = match std::env::args().nth(1) {
        Some(arg) => NaiveDate::parse_from_str(&arg, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{arg}'"))?,
        None => Local::now().date_naive(),
    };

    let next = next_meeting(from).context("date out of range")?;
    let badge = MeetingBadge::for_date(next);
    tracing::info!("next meeting after {from}: {next} [{} {}]", badge.month, badge.day);

    let mut rng = StdRng::seed_from_u64(from.num_days_from_ce() as u64);
    for (i, style) in BackdropRanges::default()
        .decorate(4, &mut rng)
        .iter()
        .enumerate()
    {
        tracing::info!("backdrop shape {i}: {:?}", style.properties());
    }
    Ok(())
}
