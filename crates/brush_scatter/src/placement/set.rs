//! Committed placement positions.
use std::ops::Deref;
use std::sync::Arc;

use glam::Vec3;

use crate::placement::is_far_enough;

/// Insertion-ordered set of committed positions.
///
/// No member is closer than the `min_distance` that was in force when it was inserted. The
/// only ways in are [`PlacementSet::try_insert`] and the only way out is
/// [`PlacementSet::clear`]. Storage is shared with outstanding snapshots and copied on write.
#[derive(Debug, Clone, Default)]
pub struct PlacementSet {
    points: Arc<Vec<Vec3>>,
}

impl PlacementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `point` if it keeps at least `min_distance` from every member.
    pub fn try_insert(&mut self, point: Vec3, min_distance: f32) -> bool {
        if !point.is_finite() || !is_far_enough(point, &self.points, min_distance) {
            return false;
        }
        Arc::make_mut(&mut self.points).push(point);
        true
    }

    /// Immutable view of the current members; unaffected by later inserts or clears.
    pub fn snapshot(&self) -> PlacementSnapshot {
        PlacementSnapshot(Arc::clone(&self.points))
    }

    /// Removes every member and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.points.len();
        self.points = Arc::new(Vec::new());
        count
    }

    #[inline]
    pub fn as_slice(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.points.iter().copied()
    }
}

/// Read-only, cheaply clonable view of a [`PlacementSet`] at one point in time.
#[derive(Debug, Clone, Default)]
pub struct PlacementSnapshot(Arc<Vec<Vec3>>);

impl PlacementSnapshot {
    #[inline]
    pub fn as_slice(&self) -> &[Vec3] {
        &self.0
    }
}

impl Deref for PlacementSnapshot {
    type Target = [Vec3];

    fn deref(&self) -> &[Vec3] {
        &self.0
    }
}

impl PartialEq for PlacementSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
