//! Disc sampling around a brush center.
use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use crate::sampling::rand01;

/// How the radial distance of a brush candidate is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RadialDistribution {
    /// `r = radius * sqrt(u)`: uniform density over the disc area.
    #[default]
    AreaUniform,
    /// `r = radius * u`: denser toward the brush center.
    ///
    /// Kept for brushes that rely on the centre-weighted look.
    Linear,
}

impl RadialDistribution {
    /// Map a unit random value `u` in [0, 1] to a distance in [0, `radius`].
    #[inline]
    pub fn distance(self, u: f32, radius: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        let r = match self {
            RadialDistribution::AreaUniform => radius * u.sqrt(),
            RadialDistribution::Linear => radius * u,
        };
        r.min(radius)
    }

    /// Draw a candidate in the disc of `radius` around `center` (see [`sample_candidate`]).
    #[inline]
    pub fn sample(self, center: Vec3, radius: f32, rng: &mut dyn Rng) -> Vec3 {
        sample_candidate(center, radius, self, rng)
    }
}

/// Draw a point in the horizontal disc of `radius` around `center`.
///
/// The angle is uniform in `[0, 2π)` and the distance follows `distribution`. The returned
/// point keeps `center.y`; projection onto the surface happens later. A non-finite or
/// non-positive radius returns `center` unchanged.
pub fn sample_candidate(
    center: Vec3,
    radius: f32,
    distribution: RadialDistribution,
    rng: &mut dyn Rng,
) -> Vec3 {
    if !radius.is_finite() || radius <= 0.0 {
        return center;
    }

    let angle = rand01(rng) * TAU;
    let distance = distribution.distance(rand01(rng), radius);

    let (sin, cos) = angle.sin_cos();
    center + Vec3::new(cos * distance, 0.0, sin * distance)
}
