//! RNG module - uniform piece-kind generation
//!
//! The controller pulls kinds from a [`KindSource`]. The default
//! [`UniformKinds`] draws each kind independently with equal probability from
//! a seeded LCG, so a seed fully determines a session.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Supplies the kind of each upcoming piece.
pub trait KindSource {
    fn next_kind(&mut self) -> PieceKind;
}

/// Independent uniform draws over the seven kinds
#[derive(Debug, Clone)]
pub struct UniformKinds {
    rng: SimpleRng,
    seed: u32,
}

impl UniformKinds {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl KindSource for UniformKinds {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

impl Default for UniformKinds {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed sequence of kinds, cycling when exhausted.
///
/// Handy for scripted sessions and tests.
#[derive(Debug, Clone)]
pub struct CycleKinds {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl CycleKinds {
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "CycleKinds needs at least one kind");
        Self { kinds, index: 0 }
    }
}

impl KindSource for CycleKinds {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..1000 {
            assert!(rng.next_range(7) < 7);
        }
    }

    #[test]
    fn test_uniform_kinds_cover_all_seven() {
        let mut source = UniformKinds::new(2024);
        let mut counts = [0u32; 7];
        for _ in 0..7000 {
            let kind = source.next_kind();
            counts[(kind.id() - 1) as usize] += 1;
        }
        // Loose bounds: each kind should land near 1000.
        for (i, &count) in counts.iter().enumerate() {
            assert!((700..1300).contains(&count), "kind {} drawn {} times", i + 1, count);
        }
    }

    #[test]
    fn test_uniform_kinds_same_seed_same_sequence() {
        let mut a = UniformKinds::new(7);
        let mut b = UniformKinds::new(7);
        for _ in 0..50 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_cycle_kinds_wraps() {
        let mut source = CycleKinds::new([PieceKind::O, PieceKind::T]);
        assert_eq!(source.next_kind(), PieceKind::O);
        assert_eq!(source.next_kind(), PieceKind::T);
        assert_eq!(source.next_kind(), PieceKind::O);
    }
}
