//! Placement: the committed set and the sampler that proposes new members.
use glam::Vec3;

pub mod sampler;
pub mod set;

pub use sampler::{AttemptOutcome, AttemptStats, PlacementSampler, PreviewIter};
pub use set::{PlacementSet, PlacementSnapshot};

/// True iff `point` is at least `min_distance` away from every member of `placed`.
///
/// Linear scan; sets stay in the hundreds for a hand-painted brush.
pub fn is_far_enough(point: Vec3, placed: &[Vec3], min_distance: f32) -> bool {
    placed.iter().all(|q| point.distance(*q) >= min_distance)
}
