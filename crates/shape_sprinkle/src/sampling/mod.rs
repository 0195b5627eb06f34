//! Random draws and the constrained placement loop.
//!
//! Every stochastic decision in the crate goes through an injected
//! [`rand::RngCore`] and [`rand01`], so a seeded RNG or a [`SequenceRng`]
//! makes runs reproducible.
use rand::RngCore;

pub mod rejection;
pub mod sequence;

pub use rejection::{
    place, Axis, Density, EdgeMargins, Placed, Placement, PlacementParams, PlacementStats,
};
pub use sequence::SequenceRng;

const UNIT_STEPS: f32 = 16_777_216.0; // 2^24, the f32 mantissa width

/// Uniform draw in `[0, 1)`.
///
/// Uses the upper 24 bits so every result is exactly representable and
/// strictly below one.
#[inline]
pub fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() >> 8) as f32 / UNIT_STEPS
}

/// Pick one element uniformly.
pub(crate) fn pick<'a, T>(items: &'a [T], rng: &mut dyn RngCore) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = ((rand01(rng) * items.len() as f32) as usize).min(items.len() - 1);
    items.get(idx)
}

/// Half-open interval `[min, max)` sampled uniformly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitRange {
    pub min: f32,
    pub max: f32,
}

impl UnitRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Symmetric range `[-amplitude, amplitude)`.
    pub const fn symmetric(amplitude: f32) -> Self {
        Self::new(-amplitude, amplitude)
    }

    pub fn sample(&self, rng: &mut dyn RngCore) -> f32 {
        self.min + rand01(rng) * (self.max - self.min)
    }

    pub fn contains(&self, v: f32) -> bool {
        v >= self.min.min(self.max) && v <= self.max.max(self.min)
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRng {
        value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    #[test]
    fn rand01_returns_zero_for_zero_input() {
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand01(&mut rng), 0.0);
    }

    #[test]
    fn rand01_stays_below_one() {
        let mut rng = FixedRng { value: u32::MAX };
        let result = rand01(&mut rng);
        assert!(result < 1.0);
        assert!(result > 0.999_999);
    }

    #[test]
    fn rand01_midpoint() {
        let mut rng = FixedRng { value: 1 << 31 };
        assert_eq!(rand01(&mut rng), 0.5);
    }

    #[test]
    fn pick_never_indexes_out_of_bounds() {
        let items = ["a", "b", "c"];
        let mut high = FixedRng { value: u32::MAX };
        assert_eq!(pick(&items, &mut high), Some(&"c"));
        let mut low = FixedRng { value: 0 };
        assert_eq!(pick(&items, &mut low), Some(&"a"));
        let empty: [&str; 0] = [];
        assert!(pick(&empty, &mut low).is_none());
    }

    #[test]
    fn unit_range_samples_between_bounds() {
        let range = UnitRange::new(18.0, 26.0);
        let mut mid = FixedRng { value: 1 << 31 };
        assert_eq!(range.sample(&mut mid), 22.0);
        let mut low = FixedRng { value: 0 };
        assert_eq!(range.sample(&mut low), 18.0);

        let delay = UnitRange::new(0.0, -10.0);
        let v = delay.sample(&mut mid);
        assert_eq!(v, -5.0);
        assert!(delay.contains(v));
        assert!(!delay.contains(1.0));
    }
}
