//! # Terrain Generator
//!
//! Pure functions from world coordinates to column height and block value,
//! driven by two fractal noise fields. For a fixed pair of noise sources the
//! generator is fully deterministic, which is what lets the map cache evict and
//! regenerate voxels without the world ever changing underneath the player.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// The empty (air) block value.
pub const EMPTY: u8 = 0;

/// Frequency applied to world coordinates before sampling the height noise.
pub const HEIGHT_FREQUENCY: f64 = 0.007;
/// Number of octaves in the height noise.
pub const HEIGHT_OCTAVES: usize = 4;
/// Peak-to-peak terrain height in voxels.
pub const HEIGHT_AMPLITUDE: f64 = 60.0;

/// Frequency applied before sampling the material noise. The negative sign is
/// deliberate: it offsets the material field into the mirrored noise quadrant
/// so block palettes do not correlate with terrain height.
pub const MATERIAL_FREQUENCY: f64 = -0.044;
/// Number of octaves in the material noise.
pub const MATERIAL_OCTAVES: usize = 2;
/// Width of the solid block palette; values land in `[1, 1 + PALETTE_SPAN]`.
pub const PALETTE_SPAN: f64 = 10.0;

const PERSISTENCE: f64 = 0.5;
const LACUNARITY: f64 = 2.0;

/// A deterministic 2D noise field with output in `[0, 1]`.
///
/// The production implementation is fractal Perlin noise; tests substitute
/// constant or call-counting sources through this seam.
pub trait NoiseField {
    /// Samples the field at the given (already frequency-scaled) point.
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Fractal-Brownian Perlin noise normalized into `[0, 1]`.
pub struct FractalNoise {
    fbm: Fbm<Perlin>,
}

impl FractalNoise {
    /// Creates a noise field with the given seed and octave count.
    pub fn new(seed: u32, octaves: usize) -> Self {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(octaves)
            .set_persistence(PERSISTENCE)
            .set_lacunarity(LACUNARITY);
        Self { fbm }
    }
}

impl NoiseField for FractalNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        // Fbm output is roughly [-1, 1]; remap onto the unit interval.
        (0.5 * (self.fbm.get([x, y]) + 1.0)).clamp(0.0, 1.0)
    }
}

/// Maps world columns to heights and world voxels to block values.
pub struct TerrainGenerator {
    height_noise: Box<dyn NoiseField>,
    material_noise: Box<dyn NoiseField>,
}

impl TerrainGenerator {
    /// Creates the production generator with the default seed.
    pub fn new() -> Self {
        Self::with_sources(
            Box::new(FractalNoise::new(0, HEIGHT_OCTAVES)),
            Box::new(FractalNoise::new(0, MATERIAL_OCTAVES)),
        )
    }

    /// Creates a generator over arbitrary noise sources.
    pub fn with_sources(
        height_noise: Box<dyn NoiseField>,
        material_noise: Box<dyn NoiseField>,
    ) -> Self {
        Self {
            height_noise,
            material_noise,
        }
    }

    /// Terrain height of the column at `(x, y)`, truncated toward zero.
    pub fn height(&self, x: i64, y: i64) -> i64 {
        let n = self
            .height_noise
            .sample(x as f64 * HEIGHT_FREQUENCY, y as f64 * HEIGHT_FREQUENCY);
        ((n - 0.5) * HEIGHT_AMPLITUDE) as i64
    }

    /// Block value at `(x, y, z)` given the column's `height`.
    ///
    /// Air above the surface; below it a palette value in `[1, 11]` chosen by
    /// the material noise, truncated toward zero.
    pub fn block(&self, x: i64, y: i64, z: i64, height: i64) -> u8 {
        if z > height {
            return EMPTY;
        }
        let n = self.material_noise.sample(
            x as f64 * MATERIAL_FREQUENCY,
            y as f64 * MATERIAL_FREQUENCY,
        );
        (1.0 + n * PALETTE_SPAN) as u8
    }
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::NoiseField;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Noise field returning the same value everywhere.
    pub struct ConstNoise(pub f64);

    impl NoiseField for ConstNoise {
        fn sample(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    /// Deterministic pseudo-noise that varies with position.
    pub struct HashNoise;

    impl NoiseField for HashNoise {
        fn sample(&self, x: f64, y: f64) -> f64 {
            let v = (x * 12.9898 + y * 78.233).sin() * 43758.5453;
            v - v.floor()
        }
    }

    /// Wrapper counting how many samples an inner field served.
    pub struct CountingNoise<N> {
        pub inner: N,
        pub calls: Rc<Cell<u64>>,
    }

    impl<N: NoiseField> NoiseField for CountingNoise<N> {
        fn sample(&self, x: f64, y: f64) -> f64 {
            self.calls.set(self.calls.get() + 1);
            self.inner.sample(x, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::ConstNoise;
    use super::*;

    fn const_generator(value: f64) -> TerrainGenerator {
        TerrainGenerator::with_sources(Box::new(ConstNoise(value)), Box::new(ConstNoise(value)))
    }

    #[test]
    fn flat_noise_gives_sea_level_terrain() {
        let generator = const_generator(0.5);
        assert_eq!(generator.height(0, 0), 0);
        assert_eq!(generator.height(1000, -1000), 0);

        // z = 0 is not above the surface; floor(0.5 * 10) = 5, so block 6.
        let height = generator.height(3, 4);
        assert_eq!(generator.block(3, 4, 0, height), 6);
        assert_eq!(generator.block(3, 4, 1, height), EMPTY);
        assert_eq!(generator.block(3, 4, -40, height), 6);
    }

    #[test]
    fn heights_truncate_toward_zero() {
        // (0.49 - 0.5) * 60 = -0.6: C-style truncation gives 0, not -1.
        assert_eq!(const_generator(0.49).height(0, 0), 0);
        assert_eq!(const_generator(0.2).height(0, 0), -18);
        assert_eq!(const_generator(1.0).height(0, 0), 30);
    }

    #[test]
    fn palette_stays_in_range() {
        for value in [0.0, 0.05, 0.33, 0.7, 0.9999] {
            let generator = const_generator(value);
            let block = generator.block(0, 0, -5, generator.height(0, 0));
            assert!((1..=11).contains(&block), "palette escaped: {block}");
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = TerrainGenerator::new();
        let b = TerrainGenerator::new();
        for (x, y) in [(0, 0), (17, -90), (-12345, 54321)] {
            assert_eq!(a.height(x, y), b.height(x, y));
            let h = a.height(x, y);
            for z in [h - 2, h, h + 2] {
                assert_eq!(a.block(x, y, z, h), b.block(x, y, z, h));
            }
        }
    }
}
