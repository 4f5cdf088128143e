//! Candidate generation inside a circular brush.
//!
//! Candidates are drawn in the horizontal plane (XZ, +Y up) around the brush center and are
//! projected onto the target surface afterwards by a
//! [`SurfaceProjector`](crate::surface::SurfaceProjector).
use rand::Rng;

pub mod disc;

pub use disc::{sample_candidate, RadialDistribution};

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn Rng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

#[cfg(test)]
pub(crate) mod test_rng {
    use core::convert::Infallible;

    use rand::{Rng, TryRng};

    /// Rng that returns the same word forever.
    pub struct FixedRng {
        pub value: u32,
    }

    impl TryRng for FixedRng {
        type Error = Infallible;

        fn try_next_u32(&mut self) -> Result<u32, Infallible> {
            Ok(self.value)
        }

        fn try_next_u64(&mut self) -> Result<u64, Infallible> {
            Ok(self.value as u64)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Infallible> {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
            Ok(())
        }
    }

    /// Rng that cycles through a fixed list of words.
    pub struct SequenceRng {
        pub values: Vec<u32>,
        pub index: usize,
    }

    impl SequenceRng {
        pub fn new(values: Vec<u32>) -> Self {
            Self { values, index: 0 }
        }
    }

    impl TryRng for SequenceRng {
        type Error = Infallible;

        fn try_next_u32(&mut self) -> Result<u32, Infallible> {
            let v = self.values[self.index % self.values.len()];
            self.index += 1;
            Ok(v)
        }

        fn try_next_u64(&mut self) -> Result<u64, Infallible> {
            Ok(self.next_u32() as u64)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Infallible> {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
            Ok(())
        }
    }
}
