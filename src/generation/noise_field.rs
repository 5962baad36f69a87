//! Noise sampling seam.
//!
//! Generation passes never construct noise themselves. They ask a
//! [`NoiseSource`] for a fresh [`NoiseField`] at the start of each pass, so
//! every pass (and every resource type) samples an independent field, and
//! tests can substitute fixed values.

use noise::{Constant, NoiseFn, Simplex};

use super::rng::SeededRng;

/// Coherent noise sampled in two or three dimensions, returning values in `[-1, 1]`.
pub trait NoiseField {
    /// Samples the horizontal plane.
    fn sample_2d(&self, x: f64, z: f64) -> f64;

    /// Samples the volume.
    fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64;
}

impl<T> NoiseField for T
where
    T: NoiseFn<f64, 2> + NoiseFn<f64, 3>,
{
    fn sample_2d(&self, x: f64, z: f64) -> f64 {
        NoiseFn::<f64, 2>::get(self, [x, z])
    }

    fn sample_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        NoiseFn::<f64, 3>::get(self, [x, y, z])
    }
}

/// Hands out one independent noise field per request.
pub trait NoiseSource {
    /// The field type produced.
    type Field: NoiseField;

    /// Produces the field for the next pass. Successive calls must not return correlated fields.
    fn next_field(&mut self) -> Self::Field;
}

/// Simplex fields whose seeds are drawn from a seeded random stream.
///
/// Two sources built from the same world seed hand out the same sequence of
/// fields, which is what makes whole-world regeneration reproducible.
#[derive(Clone, Debug)]
pub struct SimplexSource {
    rng: SeededRng,
}

impl SimplexSource {
    /// Creates a source whose field sequence is fixed by `seed`.
    pub fn new(seed: u32) -> Self {
        SimplexSource {
            rng: SeededRng::new(seed),
        }
    }
}

impl NoiseSource for SimplexSource {
    type Field = Simplex;

    fn next_field(&mut self) -> Simplex {
        Simplex::new(self.rng.next_u32())
    }
}

/// Every field returns the same value everywhere. Produces flat worlds.
#[derive(Copy, Clone, Debug)]
pub struct ConstantSource {
    value: f64,
}

impl ConstantSource {
    /// Creates a source whose fields all sample to `value`.
    pub fn new(value: f64) -> Self {
        ConstantSource { value }
    }
}

impl NoiseSource for ConstantSource {
    type Field = Constant;

    fn next_field(&mut self) -> Constant {
        Constant::new(self.value)
    }
}
