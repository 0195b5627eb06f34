//! Meeting schedule badge and the randomized motion of the meeting backdrop.
//!
//! Meetings happen on the first and third Friday of every month.
use chrono::{Datelike, Months, NaiveDate, Weekday};
use rand::RngCore;

use crate::sampling::UnitRange;

fn nth_friday(year: i32, month: u32, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Fri, n)
}

/// The next first-or-third Friday strictly after the start of `from`.
///
/// A meeting day itself counts as already started, so on the first Friday
/// this returns the third one, and on the third Friday it returns the first
/// Friday of the following month. Returns `None` only past the end of the
/// supported calendar.
pub fn next_meeting(from: NaiveDate) -> Option<NaiveDate> {
    let first = nth_friday(from.year(), from.month(), 1)?;
    if from < first {
        return Some(first);
    }
    let third = nth_friday(from.year(), from.month(), 3)?;
    if from < third {
        return Some(third);
    }
    let next_month = from.with_day(1)?.checked_add_months(Months::new(1))?;
    nth_friday(next_month.year(), next_month.month(), 1)
}

/// Month and day labels for the meeting badge, e.g. `OCT` / `17`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingBadge {
    pub month: String,
    pub day: String,
}

impl MeetingBadge {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            month: date.format("%b").to_string().to_uppercase(),
            day: date.day().to_string(),
        }
    }

    /// Badge for the next meeting after `from`.
    pub fn upcoming(from: NaiveDate) -> Option<Self> {
        next_meeting(from).map(Self::for_date)
    }
}

/// Motion values for one backdrop shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackdropStyle {
    pub delay_s: f32,
    pub duration_s: f32,
    pub spin_duration_s: f32,
    pub opacity: f32,
}

impl BackdropStyle {
    /// Style properties to apply to the shape element.
    pub fn properties(&self) -> Vec<(String, String)> {
        vec![
            ("--delay".into(), format!("{:.2}s", self.delay_s)),
            ("--dur".into(), format!("{:.2}s", self.duration_s)),
            ("--spinDur".into(), format!("{:.2}s", self.spin_duration_s)),
            ("opacity".into(), format!("{:.2}", self.opacity)),
        ]
    }
}

/// Ranges for the backdrop shapes. These shapes are fixed in markup, so only
/// their motion and opacity are randomized.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BackdropRanges {
    pub delay_s: UnitRange,
    pub duration_s: UnitRange,
    pub spin_duration_s: UnitRange,
    pub opacity: UnitRange,
}

impl Default for BackdropRanges {
    fn default() -> Self {
        Self {
            delay_s: UnitRange::new(0.0, 6.0),
            duration_s: UnitRange::new(18.0, 28.0),
            spin_duration_s: UnitRange::new(40.0, 64.0),
            opacity: UnitRange::new(0.09, 0.17),
        }
    }
}

impl BackdropRanges {
    /// Draws delay, duration, spin and opacity in that order.
    pub fn draw(&self, rng: &mut dyn RngCore) -> BackdropStyle {
        BackdropStyle {
            delay_s: self.delay_s.sample(rng),
            duration_s: self.duration_s.sample(rng),
            spin_duration_s: self.spin_duration_s.sample(rng),
            opacity: self.opacity.sample(rng),
        }
    }

    /// One style per backdrop shape.
    pub fn decorate(&self, count: usize, rng: &mut dyn RngCore) -> Vec<BackdropStyle> {
        (0..count).map(|_| self.draw(rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::sampling::SequenceRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn picks_first_then_third_friday() {
        // October 2026: Fridays on the 2nd and 16th.
        assert_eq!(next_meeting(date(2026, 10, 1)), Some(date(2026, 10, 2)));
        assert_eq!(next_meeting(date(2026, 10, 2)), Some(date(2026, 10, 16)));
        assert_eq!(next_meeting(date(2026, 10, 15)), Some(date(2026, 10, 16)));
    }

    #[test]
    fn after_third_friday_rolls_into_next_month() {
        assert_eq!(next_meeting(date(2026, 10, 16)), Some(date(2026, 11, 6)));
        assert_eq!(next_meeting(date(2026, 10, 31)), Some(date(2026, 11, 6)));
        assert_eq!(next_meeting(date(2026, 12, 19)), Some(date(2027, 1, 1)));
    }

    #[test]
    fn badge_uses_upper_case_month() {
        let badge = MeetingBadge::for_date(date(2025, 10, 17));
        assert_eq!(badge.month, "OCT");
        assert_eq!(badge.day, "17");
        let next = MeetingBadge::upcoming(date(2025, 10, 4)).expect("meeting exists");
        assert_eq!(next, badge);
    }

    #[test]
    fn backdrop_draws_in_order_and_formats() {
        let mut rng = SequenceRng::new([0.5, 0.0, 0.5, 0.5]);
        let style = BackdropRanges::default().draw(&mut rng);
        assert_eq!(style.delay_s, 3.0);
        assert_eq!(style.duration_s, 18.0);
        assert_eq!(style.spin_duration_s, 52.0);
        assert_eq!(rng.draws(), 4);

        let props = style.properties();
        assert_eq!(props[0], ("--delay".to_string(), "3.00s".to_string()));
        assert_eq!(props[2], ("--spinDur".to_string(), "52.00s".to_string()));
        assert_eq!(props[3].0, "opacity");
    }

    #[test]
    fn decorate_stays_within_ranges() {
        let ranges = BackdropRanges::default();
        let mut rng = StdRng::seed_from_u64(31);
        let styles = ranges.decorate(6, &mut rng);
        assert_eq!(styles.len(), 6);
        for s in styles {
            assert!(ranges.delay_s.contains(s.delay_s));
            assert!(ranges.duration_s.contains(s.duration_s));
            assert!(ranges.spin_duration_s.contains(s.spin_duration_s));
            assert!(ranges.opacity.contains(s.opacity));
        }
    }
}
