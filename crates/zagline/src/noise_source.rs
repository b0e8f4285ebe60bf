//! Coherent noise sources keyed by integer coordinates.
//!
//! The generator samples noise at `(line_index, segment_index)` pairs. Anything
//! that maps such a pair to a value in [-1, 1], and always gives the same
//! answer for the same pair, can drive it.

use noise::{NoiseFn, Simplex};

/// A deterministic 2D noise function over integer coordinates.
///
/// ## Rust Lesson #3: Traits
///
/// A trait is like a TypeScript interface, except implementations can be
/// added to types you didn't write. Below we implement `NoiseSource` for every
/// closure `Fn(i32, i32) -> f64`, so tests can pass `|_, _| 0.5` directly.
pub trait NoiseSource {
    /// Sample the field at `(x, y)`. Implementations return values in [-1, 1].
    fn sample(&self, x: i32, y: i32) -> f64;
}

impl<F> NoiseSource for F
where
    F: Fn(i32, i32) -> f64,
{
    #[inline]
    fn sample(&self, x: i32, y: i32) -> f64 {
        self(x, y)
    }
}

/// Simplex noise from the `noise` crate, fixed to one seed for its lifetime.
///
/// # Example
/// ```
/// use zagline::{NoiseSource, SimplexNoise};
///
/// let noise = SimplexNoise::new(42);
/// let v = noise.sample(1, 0);
/// assert!((-1.0..=1.0).contains(&v));
/// assert_eq!(v, noise.sample(1, 0));
/// ```
#[derive(Clone)]
pub struct SimplexNoise {
    seed: u32,
    inner: Simplex,
}

impl SimplexNoise {
    /// Create a noise source. The same seed always produces the same field.
    pub fn new(seed: u32) -> Self {
        Self { seed, inner: Simplex::new(seed) }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseSource for SimplexNoise {
    #[inline]
    fn sample(&self, x: i32, y: i32) -> f64 {
        // Simplex output can overshoot the unit range by a hair.
        self.inner.get([x as f64, y as f64]).clamp(-1.0, 1.0)
    }
}

impl std::fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexNoise").field("seed", &self.seed).finish()
    }
}
