//! Random tensor construction.
//!
//! Available with the `random` feature.

use rand::distr::StandardUniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::scalar::Scalar;
use crate::shape::Shape;
use crate::tensor::Tensor;

/// Types that can be sampled uniformly from `[0, 1)`.
pub trait RandomUniform: Scalar {
    fn sample_uniform<R: Rng>(rng: &mut R) -> Self;
}

/// Types that can be sampled from the standard normal distribution.
pub trait RandomNormal: Scalar {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self;
}

macro_rules! impl_random {
    ($($t:ty),*) => {
        $(
            impl RandomUniform for $t {
                fn sample_uniform<R: Rng>(rng: &mut R) -> Self {
                    rng.sample(StandardUniform)
                }
            }

            impl RandomNormal for $t {
                fn sample_normal<R: Rng>(rng: &mut R) -> Self {
                    rng.sample(StandardNormal)
                }
            }
        )*
    };
}

impl_random!(f32, f64);

impl<T: RandomUniform, S: Shape> Tensor<T, S> {
    /// Create a tensor with uniform random values in `[0, 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseur::Matrix;
    ///
    /// let t = Matrix::<f64>::random([2, 3]);
    /// assert_eq!(t.dims(), vec![2, 3]);
    /// assert!(t.data().iter().all(|&v| (0.0..1.0).contains(&v)));
    /// ```
    pub fn random(shape: impl Into<S>) -> Self {
        Self::random_with_rng(shape, &mut rand::rng())
    }

    /// Like [`Tensor::random`], drawing from `rng`.
    pub fn random_with_rng<R: Rng>(shape: impl Into<S>, rng: &mut R) -> Self {
        let mut t = Self::zeros(shape);
        t.data_mut().iter_mut().for_each(|x| *x = T::sample_uniform(rng));
        t
    }
}

impl<T: RandomNormal, S: Shape> Tensor<T, S> {
    /// Create a tensor with standard normal random values.
    pub fn randn(shape: impl Into<S>) -> Self {
        Self::randn_with_rng(shape, &mut rand::rng())
    }

    /// Standard normal values from a generator seeded with `seed`, so the
    /// result is reproducible.
    ///
    /// # Examples
    ///
    /// ```
    /// use tenseur::Vector;
    ///
    /// let a = Vector::<f64>::randn_seeded(8, 42);
    /// let b = Vector::<f64>::randn_seeded(8, 42);
    /// assert_eq!(a, b);
    /// ```
    pub fn randn_seeded(shape: impl Into<S>, seed: u64) -> Self {
        Self::randn_with_rng(shape, &mut StdRng::seed_from_u64(seed))
    }

    /// Like [`Tensor::randn`], drawing from `rng`.
    pub fn randn_with_rng<R: Rng>(shape: impl Into<S>, rng: &mut R) -> Self {
        let mut t = Self::zeros(shape);
        t.data_mut().iter_mut().for_each(|x| *x = T::sample_normal(rng));
        t
    }
}

#[cfg(test)]
mod tests {
    use crate::tensor::{Matrix, StaticVector, Vector};
    use crate::shape::StaticVectorShape;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_in_unit_interval() {
        let t = Matrix::<f32>::random([4, 5]);
        assert_eq!(t.len(), 20);
        for &v in t.data() {
            assert!((0.0..1.0).contains(&v), "value {} not in [0, 1)", v);
        }
    }

    #[test]
    fn test_random_reproducible() {
        let mut rng1 = StdRng::seed_from_u64(12345);
        let t1 = Matrix::<f64>::random_with_rng([3, 4], &mut rng1);

        let mut rng2 = StdRng::seed_from_u64(12345);
        let t2 = Matrix::<f64>::random_with_rng([3, 4], &mut rng2);

        assert_eq!(t1.data(), t2.data());
    }

    #[test]
    fn test_randn_moments() {
        let t = Vector::<f64>::randn_seeded(1000, 7);

        let mean = t.data().iter().sum::<f64>() / 1000.0;
        assert!(mean.abs() < 0.2, "mean {} too far from 0", mean);

        let var = t.data().iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 1000.0;
        assert!(var > 0.7 && var < 1.3, "variance {} too far from 1", var);
    }

    #[test]
    fn test_randn_static() {
        let a = StaticVector::<f64, 4>::randn_seeded(StaticVectorShape::<4>, 1);
        let b = StaticVector::<f64, 4>::randn_seeded(StaticVectorShape::<4>, 2);
        assert_ne!(a.data(), b.data());
    }
}
