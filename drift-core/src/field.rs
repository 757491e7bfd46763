use noise::{NoiseFn, Perlin};
use rand::Rng;

/// A seeded, deterministic 3-D coherent noise field.
///
/// This is the single source of "organic" motion for the whole scene:
/// the mesh, the particle cloud, and the tile renderer all sample it
/// independently. It is a pure function of its inputs — the same seed
/// and the same coordinates always produce the same value, and nearby
/// coordinates produce nearby values.
///
/// The permutation table is derived from the seed at construction and
/// never changes afterwards, so a [`NoiseField`] can be shared freely
/// by reference between consumers.
#[derive(Clone, Debug)]
pub struct NoiseField {
    perlin: Perlin,
    seed: u32,
}

impl NoiseField {
    /// Creates a noise field from an optional seed.
    ///
    /// If `seed` is `None`, a seed is drawn once from the thread RNG
    /// and fixed for the lifetime of the field; it is *not*
    /// re-randomized per sample. Use [`NoiseField::seed`] to recover
    /// the effective seed for reproduction.
    pub fn new(seed: Option<u32>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self::from_seed(seed)
    }

    /// Creates a noise field from an explicit seed.
    pub fn from_seed(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            seed,
        }
    }

    /// Returns the seed this field was built from.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Samples the field at `(x, y, z)`.
    ///
    /// Total for all finite inputs and never fails. The raw Perlin
    /// output is clamped into `[-1, 1]` so downstream normalization
    /// can rely on the documented range.
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let v = self.perlin.get([x as f64, y as f64, z as f64]) as f32;
        v.clamp(-1.0, 1.0)
    }

    /// Samples the field and normalizes the result into `[0, 1]`.
    ///
    /// Every consumer in the scene wants the `v * 0.5 + 0.5` mapping,
    /// so it lives here rather than being repeated at each call site.
    pub fn sample01(&self, x: f32, y: f32, z: f32) -> f32 {
        self.sample(x, y, z) * 0.5 + 0.5
    }
}
