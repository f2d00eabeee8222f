//! Deterministic deal generators with serializable state.
//!
//! ## Generators
//!
//! - **LC** (`LcRandom31`): the 31/33-bit linear congruential generator used
//!   by Microsoft FreeCell. Selected for seeds below `LC_SEED_LIMIT` and for
//!   `ms<N>` deals. Its state is a single integer.
//! - **MT** (`MtRandom`): MT19937 seeded the way CPython's `random.seed(int)`
//!   seeds it, so deals agree with existing game numbers. Its state is the
//!   624-word vector plus the read index.
//!
//! Both shuffle with the same Fisher–Yates walk from the end of the slice,
//! drawing `randint(0, n)` for each position `n`. Replaying a seed after
//! `reset()` always produces the same permutation.
//!
//! ```
//! use solitaire_engine::core::GameRandom;
//!
//! let mut a = GameRandom::from_seed(1234567890123456);
//! let mut b = GameRandom::from_seed(1234567890123456);
//! let mut xs: Vec<u32> = (0..52).collect();
//! let mut ys = xs.clone();
//! a.shuffle(&mut xs);
//! b.shuffle(&mut ys);
//! assert_eq!(xs, ys);
//! ```
//!
//! `SeedPicker` is the only non-replayable piece: it draws fresh seeds for
//! `new_game(None)` from ChaCha8.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, GameNumberError};

/// Seeds below this use the LC generator.
pub const LC_SEED_LIMIT: u128 = 32_000;

/// Largest seed accepted for MT games (exclusive).
pub const MT_SEED_LIMIT: u128 = 100_000_000_000_000_000_000;

/// Lower bound for randomly picked MT seeds.
pub const MT_PICK_MIN: u128 = 10_000_000_000_000_000;

const MT_N: usize = 624;
const MT_M: usize = 397;

/// Which algorithm a generator runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RandomKind {
    Lc,
    Mt,
}

/// Where a seed came from. Only `Random` games count toward statistics
/// by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedOrigin {
    #[default]
    Unknown,
    /// Picked by the engine.
    Random,
    /// Entered by the player as a game number.
    Selected,
    /// Read back from a save stream.
    Restored,
}

/// Serializable generator state for saves and for the random snapshot moves.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RandomState {
    Lc { seedx: u64 },
    Mt { words: Vec<u32>, index: u16 },
}

impl RandomState {
    #[must_use]
    pub fn kind(&self) -> RandomKind {
        match self {
            RandomState::Lc { .. } => RandomKind::Lc,
            RandomState::Mt { .. } => RandomKind::Mt,
        }
    }
}

// =============================================================================
// LC generator
// =============================================================================

/// Microsoft-compatible linear congruential generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LcRandom31 {
    seed: u64,
    seedx: u64,
}

impl LcRandom31 {
    /// Largest accepted seed (`2^33 - 1`).
    pub const MAX_SEED: u64 = (1u64 << 33) - 1;

    pub fn new(seed: u64) -> Result<Self, GameNumberError> {
        if seed > Self::MAX_SEED {
            return Err(GameNumberError::OutOfRange(seed.to_string()));
        }
        Ok(Self {
            seed,
            seedx: Self::initial_seedx(seed),
        })
    }

    fn initial_seedx(seed: u64) -> u64 {
        if seed < 0x1_0000_0000 {
            seed
        } else {
            seed - 0x1_0000_0000
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn reset(&mut self) {
        self.seedx = Self::initial_seedx(self.seed);
    }

    fn step(&mut self) -> u64 {
        self.seedx = (self.seedx.wrapping_mul(214_013).wrapping_add(2_531_011)) & Self::MAX_SEED;
        self.seedx >> 16
    }

    /// Next raw value: 15 bits for 31-bit seeds, 16 bits plus one above.
    pub fn next_raw(&mut self) -> u32 {
        if self.seed < 0x1_0000_0000 {
            let r = (self.step() & 0x7fff) as u32;
            if self.seed < 0x8000_0000 {
                r
            } else {
                r | 0x8000
            }
        } else {
            (self.step() & 0xffff) as u32 + 1
        }
    }

    /// Uniform-ish integer in `a..=b` (`a + r % span`).
    pub fn randint(&mut self, a: usize, b: usize) -> usize {
        let span = (b + 1).saturating_sub(a);
        if span <= 1 {
            return a;
        }
        a + self.next_raw() as usize % span
    }
}

// =============================================================================
// MT generator
// =============================================================================

/// MT19937 with CPython-compatible seeding and `random()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MtRandom {
    seed: u128,
    mt: Vec<u32>,
    index: usize,
}

impl MtRandom {
    #[must_use]
    pub fn new(seed: u128) -> Self {
        let mut r = Self {
            seed,
            mt: vec![0; MT_N],
            index: MT_N,
        };
        r.reset();
        r
    }

    #[must_use]
    pub fn seed(&self) -> u128 {
        self.seed
    }

    /// Re-seed from the initial seed.
    pub fn reset(&mut self) {
        let mut key: Vec<u32> = self
            .seed
            .to_le_bytes()
            .chunks(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        while key.len() > 1 && key.last() == Some(&0) {
            key.pop();
        }
        self.init_by_array(&key);
    }

    fn init_genrand(&mut self, s: u32) {
        self.mt[0] = s;
        for i in 1..MT_N {
            let prev = self.mt[i - 1];
            self.mt[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        self.index = MT_N;
    }

    fn init_by_array(&mut self, key: &[u32]) {
        self.init_genrand(19_650_218);
        let mut i = 1usize;
        let mut j = 0usize;
        for _ in 0..MT_N.max(key.len()) {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ 1_664_525u32.wrapping_mul(prev ^ (prev >> 30)))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= MT_N {
                self.mt[0] = self.mt[MT_N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }
        for _ in 0..MT_N - 1 {
            let prev = self.mt[i - 1];
            self.mt[i] = (self.mt[i] ^ 1_566_083_941u32.wrapping_mul(prev ^ (prev >> 30)))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= MT_N {
                self.mt[0] = self.mt[MT_N - 1];
                i = 1;
            }
        }
        self.mt[0] = 0x8000_0000;
        self.index = MT_N;
    }

    fn twist(&mut self) {
        for i in 0..MT_N {
            let y = (self.mt[i] & 0x8000_0000) | (self.mt[(i + 1) % MT_N] & 0x7fff_ffff);
            let mut next = self.mt[(i + MT_M) % MT_N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= 0x9908_b0df;
            }
            self.mt[i] = next;
        }
        self.index = 0;
    }

    pub fn next_u32(&mut self) -> u32 {
        if self.index >= MT_N {
            self.twist();
        }
        let mut y = self.mt[self.index];
        self.index += 1;
        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    /// Float in `[0, 1)` with 53 bits of precision.
    pub fn random(&mut self) -> f64 {
        let a = u64::from(self.next_u32() >> 5);
        let b = u64::from(self.next_u32() >> 6);
        ((a << 26) + b) as f64 / (1u64 << 53) as f64
    }

    /// Integer in `a..=b` (`a + floor(random() * span)`).
    pub fn randint(&mut self, a: usize, b: usize) -> usize {
        let span = (b + 1).saturating_sub(a);
        if span <= 1 {
            return a;
        }
        a + (self.random() * span as f64) as usize
    }
}

// =============================================================================
// GameRandom
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
enum Generator {
    Lc { rng: LcRandom31, ms: bool },
    Mt(MtRandom),
}

/// The generator owned by one game: algorithm, seed, and seed origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameRandom {
    generator: Generator,
    origin: SeedOrigin,
}

impl GameRandom {
    /// Pick the generator the way game numbers do: LC below 32000, MT above.
    ///
    /// Seeds at or above `MT_SEED_LIMIT` are clamped into range by taking
    /// them modulo the limit; use `parse_game_number` to reject them instead.
    #[must_use]
    pub fn from_seed(seed: u128) -> Self {
        if seed < LC_SEED_LIMIT {
            Self {
                generator: Generator::Lc {
                    rng: LcRandom31 {
                        seed: seed as u64,
                        seedx: seed as u64,
                    },
                    ms: false,
                },
                origin: SeedOrigin::Unknown,
            }
        } else {
            Self::mt(seed % MT_SEED_LIMIT)
        }
    }

    /// An LC generator that renders as `%05d`.
    pub fn lc(seed: u64) -> Result<Self, GameNumberError> {
        Ok(Self {
            generator: Generator::Lc {
                rng: LcRandom31::new(seed)?,
                ms: false,
            },
            origin: SeedOrigin::Unknown,
        })
    }

    /// A Microsoft deal, rendered as `ms<N>`.
    pub fn ms(seed: u64) -> Result<Self, GameNumberError> {
        Ok(Self {
            generator: Generator::Lc {
                rng: LcRandom31::new(seed)?,
                ms: true,
            },
            origin: SeedOrigin::Unknown,
        })
    }

    #[must_use]
    pub fn mt(seed: u128) -> Self {
        Self {
            generator: Generator::Mt(MtRandom::new(seed)),
            origin: SeedOrigin::Unknown,
        }
    }

    /// Set the seed origin.
    #[must_use]
    pub fn with_origin(mut self, origin: SeedOrigin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn kind(&self) -> RandomKind {
        match self.generator {
            Generator::Lc { .. } => RandomKind::Lc,
            Generator::Mt(_) => RandomKind::Mt,
        }
    }

    #[must_use]
    pub fn initial_seed(&self) -> u128 {
        match &self.generator {
            Generator::Lc { rng, .. } => u128::from(rng.seed),
            Generator::Mt(rng) => rng.seed,
        }
    }

    /// Whether this is an `ms<N>` deal.
    #[must_use]
    pub fn is_ms_deal(&self) -> bool {
        matches!(self.generator, Generator::Lc { ms: true, .. })
    }

    #[must_use]
    pub fn origin(&self) -> SeedOrigin {
        self.origin
    }

    pub fn set_origin(&mut self, origin: SeedOrigin) {
        self.origin = origin;
    }

    /// Restore the originally seeded state.
    pub fn reset(&mut self) {
        match &mut self.generator {
            Generator::Lc { rng, .. } => rng.reset(),
            Generator::Mt(rng) => rng.reset(),
        }
    }

    /// Integer in `a..=b`.
    pub fn randint(&mut self, a: usize, b: usize) -> usize {
        match &mut self.generator {
            Generator::Lc { rng, .. } => rng.randint(a, b),
            Generator::Mt(rng) => rng.randint(a, b),
        }
    }

    /// Fisher–Yates from the end: for `n = len-1 ..= 1`, swap `n` with
    /// `randint(0, n)`.
    pub fn shuffle<T>(&mut self, seq: &mut [T]) {
        for n in (1..seq.len()).rev() {
            let j = self.randint(0, n);
            seq.swap(n, j);
        }
    }

    #[must_use]
    pub fn state(&self) -> RandomState {
        match &self.generator {
            Generator::Lc { rng, .. } => RandomState::Lc { seedx: rng.seedx },
            Generator::Mt(rng) => RandomState::Mt {
                words: rng.mt.clone(),
                index: rng.index as u16,
            },
        }
    }

    /// Restore a state captured by `state()` on a generator of the same kind.
    pub fn set_state(&mut self, state: &RandomState) -> Result<(), EngineError> {
        match (&mut self.generator, state) {
            (Generator::Lc { rng, .. }, RandomState::Lc { seedx }) => {
                if *seedx > LcRandom31::MAX_SEED {
                    return Err(EngineError::invariant("LC state out of range"));
                }
                rng.seedx = *seedx;
                Ok(())
            }
            (Generator::Mt(rng), RandomState::Mt { words, index }) => {
                if words.len() != MT_N || usize::from(*index) > MT_N {
                    return Err(EngineError::invariant("malformed MT state"));
                }
                rng.mt.copy_from_slice(words);
                rng.index = usize::from(*index);
                Ok(())
            }
            (_, other) => Err(EngineError::invariant(format!(
                "random state of kind {:?} applied to {:?} generator",
                other.kind(),
                self.kind()
            ))),
        }
    }
}

// =============================================================================
// Seed picking
// =============================================================================

/// Source of fresh seeds for games started without a game number.
#[derive(Clone, Debug)]
pub struct SeedPicker {
    inner: ChaCha8Rng,
}

impl SeedPicker {
    /// Seed the picker; `None` draws from OS entropy.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let inner = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { inner }
    }

    /// A fresh MT seed in `[MT_PICK_MIN, MT_SEED_LIMIT)`.
    pub fn pick_seed(&mut self) -> u128 {
        self.inner.gen_range(MT_PICK_MIN..MT_SEED_LIMIT)
    }

    /// A fresh generator tagged `SeedOrigin::Random`.
    pub fn pick(&mut self) -> GameRandom {
        GameRandom::mt(self.pick_seed()).with_origin(SeedOrigin::Random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal(rng: &mut GameRandom) -> Vec<u32> {
        let mut cards: Vec<u32> = (0..52).collect();
        rng.reset();
        rng.shuffle(&mut cards);
        cards
    }

    #[test]
    fn test_from_seed_selects_generator() {
        assert_eq!(GameRandom::from_seed(0).kind(), RandomKind::Lc);
        assert_eq!(GameRandom::from_seed(31_999).kind(), RandomKind::Lc);
        assert_eq!(GameRandom::from_seed(32_000).kind(), RandomKind::Mt);
    }

    #[test]
    fn test_lc_first_values_match_msvc_rand() {
        // MSVC rand() seeded with 1 yields 41, 18467, 6334.
        let mut rng = LcRandom31::new(1).unwrap();
        assert_eq!(rng.next_raw(), 41);
        assert_eq!(rng.next_raw(), 18467);
        assert_eq!(rng.next_raw(), 6334);
    }

    #[test]
    fn test_mt_matches_reference_output() {
        // First genrand_uint32 outputs for init_by_array([0x123, 0x234, 0x345, 0x456]).
        let mut rng = MtRandom::new(0);
        rng.init_by_array(&[0x123, 0x234, 0x345, 0x456]);
        assert_eq!(rng.next_u32(), 1_067_595_299);
        assert_eq!(rng.next_u32(), 955_945_823);
        assert_eq!(rng.next_u32(), 477_289_528);
    }

    #[test]
    fn test_determinism_after_reset() {
        let mut rng = GameRandom::from_seed(1_234_567_890_123_456);
        let first = deal(&mut rng);
        let second = deal(&mut rng);
        assert_eq!(first, second);

        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..52).collect::<Vec<_>>());
    }

    #[test]
    fn test_different_seeds() {
        let a = deal(&mut GameRandom::from_seed(100_000));
        let b = deal(&mut GameRandom::from_seed(100_001));
        assert_ne!(a, b);
    }

    #[test]
    fn test_state_round_trip() {
        for mut rng in [GameRandom::from_seed(617), GameRandom::from_seed(9_876_543_210)] {
            for _ in 0..50 {
                rng.randint(0, 51);
            }
            let state = rng.state();
            let expected: Vec<_> = (0..10).map(|_| rng.randint(0, 1000)).collect();
            rng.set_state(&state).unwrap();
            let actual: Vec<_> = (0..10).map(|_| rng.randint(0, 1000)).collect();
            assert_eq!(expected, actual);
        }
    }

    #[test]
    fn test_set_state_rejects_other_kind() {
        let mut lc = GameRandom::from_seed(5);
        let mt_state = GameRandom::from_seed(50_000).state();
        assert!(matches!(lc.set_state(&mt_state), Err(EngineError::Invariant(_))));
    }

    #[test]
    fn test_ms_seed_range() {
        assert!(GameRandom::ms(LcRandom31::MAX_SEED).is_ok());
        assert!(GameRandom::ms(LcRandom31::MAX_SEED + 1).is_err());
        assert!(GameRandom::ms(11_982).unwrap().is_ms_deal());
    }

    #[test]
    fn test_seed_picker_range_and_determinism() {
        let mut a = SeedPicker::new(Some(7));
        let mut b = SeedPicker::new(Some(7));
        for _ in 0..20 {
            let seed = a.pick_seed();
            assert!((MT_PICK_MIN..MT_SEED_LIMIT).contains(&seed));
            assert_eq!(seed, b.pick_seed());
        }
        assert_eq!(a.pick().origin(), SeedOrigin::Random);
    }

    #[test]
    fn test_state_serde() {
        let state = GameRandom::from_seed(42).state();
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: RandomState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
