//! Random Number Generators.

use crate::common::*;

/// 64-bit precision value for 1 - epsilon.
pub const ONE_MINUS_EPSILON: Float = hexf64!("0x1.fffffffffffffp-1"); // 0.99999999999999989

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// A source of canonical random numbers used to drive path construction.
///
/// Sources are owned by the thread working on a sample and are never shared;
/// use `create_compatible()` to obtain an independent stream for another
/// thread or task.
pub trait Random: Send {
    /// Returns a uniformly distributed value in `[0, 1)`.
    fn next(&mut self) -> Float;

    /// Restarts the stream from its initial state.
    fn reset(&mut self);

    /// Returns a new, independent stream of the same kind.
    ///
    /// * `seed` - Selects the stream.
    fn create_compatible(&self, seed: u64) -> Box<dyn Random>;
}

// Allows `Box<dyn Random>` from `create_compatible()` to be used where a
// `&mut dyn Random` is expected.
impl<R: Random + ?Sized> Random for Box<R> {
    #[inline]
    fn next(&mut self) -> Float {
        (**self).next()
    }

    #[inline]
    fn reset(&mut self) {
        (**self).reset()
    }

    #[inline]
    fn create_compatible(&self, seed: u64) -> Box<dyn Random> {
        (**self).create_compatible(seed)
    }
}

/// Implements the PCG32 pseudo-random number generator.
#[derive(Clone)]
pub struct RNG {
    state: u64,
    inc: u64,
    sequence_index: Option<u64>,
}

impl Default for RNG {
    /// Return a new instance of `RNG` with default state and stream.
    fn default() -> Self {
        Self {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
            sequence_index: None,
        }
    }
}

impl RNG {
    /// Create a new `RNG` by seeding it with the given starting sequence.
    ///
    /// * `sequence_index` - The starting sequence to seed with.
    pub fn new(sequence_index: u64) -> Self {
        let mut ret = Self {
            state: 0,
            inc: 0,
            sequence_index: Some(sequence_index),
        };
        ret.set_sequence(sequence_index);
        ret
    }

    /// Initialize the random number generator sequence.
    ///
    /// * `init_seq` - The starting sequence to seed with.
    #[inline(always)]
    fn set_sequence(&mut self, init_seq: u64) {
        self.state = 0;
        let (inc, _) = init_seq.overflowing_shl(1);
        self.inc = inc | 1;
        let _ = self.uniform_u32();

        let (state, _) = self.state.overflowing_add(PCG32_DEFAULT_STATE);
        self.state = state;
        let _ = self.uniform_u32();
    }

    /// Returns a uniformly distributed u32 value.
    #[inline(always)]
    pub fn uniform_u32(&mut self) -> u32 {
        let old_state = self.state;
        let (new_state, _) = old_state.overflowing_mul(PCG32_MULT);
        let (new_state, _) = new_state.overflowing_add(self.inc);
        self.state = new_state;

        let (xor_shifted, _) = old_state.overflowing_shr(18);
        let (xor_shifted, _) = (xor_shifted ^ old_state).overflowing_shr(27);
        let xor_shifted = xor_shifted as u32;

        let (rot, _) = old_state.overflowing_shr(59);
        let rot = rot as u32;

        let (r1, _) = xor_shifted.overflowing_shr(rot);
        let (bits, _) = (!rot).overflowing_add(1);
        let (r2, _) = xor_shifted.overflowing_shl(bits & 31);

        r1 | r2
    }

    /// Returns a uniformly distributed value over the half open interval [0.0, 1.0).
    pub fn uniform_float(&mut self) -> Float {
        min(
            self.uniform_u32() as Float * hexf64!("0x1.0p-32"),
            ONE_MINUS_EPSILON,
        )
    }
}

impl Random for RNG {
    fn next(&mut self) -> Float {
        self.uniform_float()
    }

    fn reset(&mut self) {
        *self = match self.sequence_index {
            Some(seq) => Self::new(seq),
            None => Self::default(),
        };
    }

    fn create_compatible(&self, seed: u64) -> Box<dyn Random> {
        Box::new(Self::new(seed))
    }
}

/// Replays a fixed, cyclic sequence of values. Useful to drive path
/// construction deterministically.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: Vec<Float>,
    next: usize,
    draws: usize,
}

impl SequenceRandom {
    /// Create a new `SequenceRandom`.
    ///
    /// * `values` - The values to replay; must be non-empty and in `[0, 1)`.
    pub fn new(values: &[Float]) -> Self {
        assert!(!values.is_empty(), "SequenceRandom requires at least one value");
        debug_assert!(values.iter().all(|&v| (0.0..1.0).contains(&v)));
        Self {
            values: values.to_vec(),
            next: 0,
            draws: 0,
        }
    }

    /// Returns the number of values drawn since creation or the last reset.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl Random for SequenceRandom {
    fn next(&mut self) -> Float {
        let v = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        self.draws += 1;
        v
    }

    fn reset(&mut self) {
        self.next = 0;
        self.draws = 0;
    }

    /// The returned stream starts `seed` positions into the sequence.
    fn create_compatible(&self, seed: u64) -> Box<dyn Random> {
        let n = self.values.len();
        Box::new(Self {
            values: self.values.clone(),
            next: (seed % n as u64) as usize,
            draws: 0,
        })
    }
}
