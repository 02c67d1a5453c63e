use std::{ops::RangeInclusive, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseSeedError;

/// Supplies the vertical center of each newly placed gap.
///
/// The simulation draws from exactly one source, so injecting a seeded or
/// scripted implementation makes an episode reproducible.
pub trait GapSource {
    /// Returns a gap center from `range`.
    fn sample_gap_center(&mut self, range: RangeInclusive<u16>) -> u16;
}

impl<S> GapSource for &mut S
where
    S: GapSource + ?Sized,
{
    fn sample_gap_center(&mut self, range: RangeInclusive<u16>) -> u16 {
        (**self).sample_gap_center(range)
    }
}

/// Seed for deterministic gap placement.
///
/// A 128-bit seed for the PCG generator behind [`SeededGapSource`].
/// Serialized as a 32-character hex string so recordings stay readable.
///
/// # Example
///
/// ```
/// use flappy_engine::{GapSource, SeededGapSource, WorldSeed};
/// use rand::Rng as _;
///
/// let seed: WorldSeed = rand::rng().random();
/// let mut a = SeededGapSource::with_seed(seed);
/// let mut b = SeededGapSource::with_seed(seed);
///
/// for _ in 0..10 {
///     assert_eq!(a.sample_gap_center(150..=362), b.sample_gap_center(150..=362));
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldSeed([u8; 16]);

impl WorldSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    fn to_hex(self) -> String {
        format!("{:032x}", u128::from_be_bytes(self.0))
    }
}

impl std::fmt::Display for WorldSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for WorldSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseSeedError::InvalidLength(s.len()));
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::InvalidHex)?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for WorldSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for WorldSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("{e}: {hex_str:?}")))
    }
}

/// Allows generating random `WorldSeed` values with `rng.random()`.
impl Distribution<WorldSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> WorldSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        WorldSeed(seed)
    }
}

/// Uniform gap placement driven by a seeded PCG generator.
#[derive(Debug, Clone)]
pub struct SeededGapSource {
    seed: WorldSeed,
    rng: Pcg32,
}

impl Default for SeededGapSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SeededGapSource {
    /// Creates a source with a seed drawn from the thread-local generator.
    ///
    /// For deterministic placement, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: WorldSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// The seed this source was created from.
    #[must_use]
    pub fn seed(&self) -> WorldSeed {
        self.seed
    }
}

impl GapSource for SeededGapSource {
    /// An empty range yields its start without advancing the generator.
    fn sample_gap_center(&mut self, range: RangeInclusive<u16>) -> u16 {
        if range.is_empty() {
            return *range.start();
        }
        self.rng.random_range(range)
    }
}

/// Replays a fixed list of gap centers, cycling when exhausted.
///
/// Values are returned as given, even if they fall outside the requested range.
///
/// # Panics
///
/// [`ScriptedGapSource::new`] panics if `centers` is empty.
#[derive(Debug, Clone)]
pub struct ScriptedGapSource {
    centers: Vec<u16>,
    next: usize,
}

impl ScriptedGapSource {
    #[must_use]
    pub fn new(centers: impl Into<Vec<u16>>) -> Self {
        let centers = centers.into();
        assert!(!centers.is_empty(), "scripted gap source needs at least one value");
        Self { centers, next: 0 }
    }

    /// A source that always places the gap at `center`.
    #[must_use]
    pub fn constant(center: u16) -> Self {
        Self::new([center])
    }
}

impl GapSource for ScriptedGapSource {
    fn sample_gap_center(&mut self, _range: RangeInclusive<u16>) -> u16 {
        let center = self.centers[self.next];
        self.next = (self.next + 1) % self.centers.len();
        center
    }
}
