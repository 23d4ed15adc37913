use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Serialize, Serializer};

use crate::{Piece, PieceKind};

/// A stream of piece kinds for the [`Spawner`] to draw from.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
}

impl<S> PieceSource for Box<S>
where
    S: PieceSource + ?Sized,
{
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }
}

/// Draws each kind independently and uniformly from an RNG.
///
/// Every draw is independent: there is no bag, and the same kind may repeat
/// any number of times in a row.
#[derive(Debug, Clone)]
pub struct UniformSource<R = Pcg32> {
    rng: R,
}

impl<R> UniformSource<R>
where
    R: Rng,
{
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformSource<Pcg32> {
    /// Creates a source seeded from the thread-local RNG.
    ///
    /// For a reproducible sequence, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn random() -> Self {
        Self::with_seed(rand::rng().random())
    }

    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self::new(Pcg32::from_seed(seed.0))
    }
}

impl<R> PieceSource for UniformSource<R>
where
    R: Rng,
{
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Replays a fixed sequence of kinds, starting over when it runs out.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceKind, PieceSource, ScriptedSource};
///
/// let mut source = ScriptedSource::new(vec![PieceKind::I, PieceKind::O]).unwrap();
/// assert_eq!(source.next_kind(), PieceKind::I);
/// assert_eq!(source.next_kind(), PieceKind::O);
/// assert_eq!(source.next_kind(), PieceKind::I);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl ScriptedSource {
    /// Returns `None` if `kinds` is empty.
    #[must_use]
    pub fn new(kinds: Vec<PieceKind>) -> Option<Self> {
        (!kinds.is_empty()).then_some(Self { kinds, index: 0 })
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }
}

/// Creates pieces for a grid of a given width.
///
/// The spawner keeps no history; the [`Engine`](super::Engine) holds the
/// current and next pieces.
#[derive(Debug, Clone)]
pub struct Spawner<S> {
    source: S,
    grid_width: usize,
}

impl<S> Spawner<S>
where
    S: PieceSource,
{
    pub fn new(source: S, grid_width: usize) -> Self {
        Self { source, grid_width }
    }

    /// Draws the next kind and places it centered on the top row.
    pub fn spawn(&mut self) -> Piece {
        Piece::spawn(self.source.next_kind(), self.grid_width)
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the [`UniformSource`] RNG. The same seed always yields
/// the same piece sequence. Its text form is 32 hex digits.
///
/// # Example
///
/// ```
/// use blockfall_engine::PieceSeed;
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
/// let parsed: PieceSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {input:?}: expected 32 hex digits")]
pub struct ParsePieceSeedError {
    pub input: String,
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePieceSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}
