//! Deterministic RNG that replays a fixed list of unit draws.
use rand::RngCore;

/// Replays `values` (each in `[0, 1)`) through [`crate::sampling::rand01`],
/// cycling when exhausted. An empty sequence always yields zero.
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Total draws served so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }

    fn next_value(&mut self) -> f32 {
        let v = if self.values.is_empty() {
            0.0
        } else {
            self.values[self.cursor % self.values.len()]
        };
        self.cursor += 1;
        v
    }
}

impl RngCore for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        let v = self.next_value().clamp(0.0, 1.0);
        let steps = ((v * 16_777_216.0) as u32).min(0x00FF_FFFF);
        steps << 8
    }

    fn next_u64(&mut self) -> u64 {
        (self.next_u32() as u64) << 32
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
