//! Placement sampler: brush candidates, surface projection and the spacing check.
//!
//! A *placement attempt* samples one candidate in the brush disc, drops it onto the surface
//! and checks it against the committed positions. Misses and spacing rejections are normal
//! outcomes of an attempt, reported through [`AttemptOutcome`] rather than errors. The sampler
//! only reads the committed positions; committing is the caller's job.
use std::iter::FusedIterator;

use glam::Vec3;
use rand::Rng;
use tracing::trace;

use crate::brush::BrushState;
use crate::placement::is_far_enough;
use crate::sampling::{sample_candidate, RadialDistribution};
use crate::surface::{project_to_surface, SurfaceProjector};

/// Result of a single placement attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttemptOutcome {
    /// Projected candidate that respects the spacing.
    Accepted(Vec3),
    /// The brush is not over the surface.
    NoBrushCenter,
    /// The downward ray missed the surface.
    ProjectionMiss,
    /// The projected candidate is too close to a committed position.
    SpacingViolation,
}

impl AttemptOutcome {
    #[inline]
    pub fn accepted(self) -> Option<Vec3> {
        match self {
            AttemptOutcome::Accepted(p) => Some(p),
            _ => None,
        }
    }
}

/// Running tally of attempt outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttemptStats {
    pub attempts: usize,
    pub accepted: usize,
    pub no_brush_center: usize,
    pub projection_misses: usize,
    pub spacing_violations: usize,
}

impl AttemptStats {
    pub fn record(&mut self, outcome: &AttemptOutcome) {
        self.attempts += 1;
        match outcome {
            AttemptOutcome::Accepted(_) => self.accepted += 1,
            AttemptOutcome::NoBrushCenter => self.no_brush_center += 1,
            AttemptOutcome::ProjectionMiss => self.projection_misses += 1,
            AttemptOutcome::SpacingViolation => self.spacing_violations += 1,
        }
    }

    /// Fraction of attempts that were accepted, 0 when nothing was attempted.
    pub fn acceptance_rate(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.accepted as f32 / self.attempts as f32
        }
    }
}

/// Stateless sampler parameterised by the radial distribution of its candidates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementSampler {
    pub distribution: RadialDistribution,
}

impl PlacementSampler {
    pub fn new(distribution: RadialDistribution) -> Self {
        Self { distribution }
    }

    /// Candidate in the horizontal disc of `radius` around `center`, before projection.
    #[inline]
    pub fn sample_candidate(&self, center: Vec3, radius: f32, rng: &mut dyn Rng) -> Vec3 {
        sample_candidate(center, radius, self.distribution, rng)
    }

    /// One attempt: sample, project, check spacing.
    pub fn attempt(
        &self,
        brush: &BrushState,
        surface: &dyn SurfaceProjector,
        placed: &[Vec3],
        min_distance: f32,
        rng: &mut dyn Rng,
    ) -> AttemptOutcome {
        let Some(center) = brush.center() else {
            return AttemptOutcome::NoBrushCenter;
        };

        let candidate = self.sample_candidate(center, brush.radius(), rng);
        let Some(hit) = project_to_surface(surface, candidate) else {
            trace!("candidate {candidate} missed the surface");
            return AttemptOutcome::ProjectionMiss;
        };

        if is_far_enough(hit, placed, min_distance) {
            AttemptOutcome::Accepted(hit)
        } else {
            AttemptOutcome::SpacingViolation
        }
    }

    /// One attempt, reduced to the accepted point if any.
    #[inline]
    pub fn try_place_one(
        &self,
        brush: &BrushState,
        surface: &dyn SurfaceProjector,
        placed: &[Vec3],
        min_distance: f32,
        rng: &mut dyn Rng,
    ) -> Option<Vec3> {
        self.attempt(brush, surface, placed, min_distance, rng)
            .accepted()
    }

    /// Lazily runs `count` independent attempts and yields the accepted points.
    ///
    /// Preview points are checked against `placed` only, not against each other, so the
    /// result shows where a single next placement would land. The iterator is finite and
    /// yields between 0 and `count` points.
    pub fn refresh_preview<'a>(
        &self,
        brush: &BrushState,
        surface: &'a dyn SurfaceProjector,
        placed: &'a [Vec3],
        min_distance: f32,
        count: usize,
        rng: &'a mut dyn Rng,
    ) -> PreviewIter<'a> {
        PreviewIter {
            sampler: *self,
            brush: *brush,
            surface,
            placed,
            min_distance,
            remaining: count,
            rng,
            stats: AttemptStats::default(),
        }
    }
}

/// Iterator returned by [`PlacementSampler::refresh_preview`].
pub struct PreviewIter<'a> {
    sampler: PlacementSampler,
    brush: BrushState,
    surface: &'a dyn SurfaceProjector,
    placed: &'a [Vec3],
    min_distance: f32,
    remaining: usize,
    rng: &'a mut dyn Rng,
    stats: AttemptStats,
}

impl PreviewIter<'_> {
    /// Outcomes of the attempts made so far.
    pub fn stats(&self) -> AttemptStats {
        self.stats
    }

    /// Attempts not yet made.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl Iterator for PreviewIter<'_> {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        while self.remaining > 0 {
            self.remaining -= 1;
            let outcome = self.sampler.attempt(
                &self.brush,
                self.surface,
                self.placed,
                self.min_distance,
                &mut *self.rng,
            );
            self.stats.record(&outcome);
            if let AttemptOutcome::Accepted(p) = outcome {
                return Some(p);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl FusedIterator for PreviewIter<'_> {}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::placement::PlacementSet;
    use crate::surface::FlatSurface;

    const MIN_DISTANCE: f32 = 0.25;

    fn brush_at(center: Vec3, radius: f32) -> BrushState {
        let mut brush = BrushState::new(radius, 0.5, 10.0, 0.5);
        brush.set_center(Some(center));
        brush
    }

    fn pairwise_min_distance(points: &[Vec3]) -> f32 {
        let mut min = f32::MAX;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                min = min.min(points[i].distance(points[j]));
            }
        }
        min
    }

    /// Triangular lattice with `spacing` covering the XZ disc of `radius`.
    fn lattice_disc(radius: f32, spacing: f32) -> Vec<Vec3> {
        let row_height = spacing * 3.0_f32.sqrt() * 0.5;
        let rows = (radius / row_height).ceil() as i32;
        let cols = (radius / spacing).ceil() as i32 + 1;
        let mut out = Vec::new();
        for row in -rows..=rows {
            let offset = if row.rem_euclid(2) == 1 { spacing * 0.5 } else { 0.0 };
            for col in -cols..=cols {
                let p = Vec2::new(col as f32 * spacing + offset, row as f32 * row_height);
                if p.length() <= radius {
                    out.push(Vec3::new(p.x, 0.0, p.y));
                }
            }
        }
        out
    }

    #[test]
    fn first_placement_lands_on_surface_inside_brush() {
        let mut rng = StdRng::seed_from_u64(2025);
        let sampler = PlacementSampler::default();
        let surface = FlatSurface::new(0.0);
        let brush = brush_at(Vec3::ZERO, 2.0);

        let p = sampler
            .try_place_one(&brush, &surface, &[], MIN_DISTANCE, &mut rng)
            .expect("flat unbounded surface always accepts the first point");
        assert_eq!(p.y, 0.0);
        assert!(p.distance(Vec3::ZERO) <= 2.0 + 1e-4);

        // With `p` committed, nothing within the spacing may come back.
        let placed = [p];
        let mut accepted = 0;
        for _ in 0..2000 {
            if let Some(q) = sampler.try_place_one(&brush, &surface, &placed, MIN_DISTANCE, &mut rng)
            {
                assert!(q.distance(p) >= MIN_DISTANCE);
                accepted += 1;
            }
        }
        assert!(accepted > 0);
    }

    #[test]
    fn outcomes_cover_each_rejection_path() {
        let mut rng = StdRng::seed_from_u64(3);
        let sampler = PlacementSampler::default();
        let surface = FlatSurface::square(0.0, 1.0);

        let mut brush = BrushState::new(1.0, 0.5, 10.0, 0.5);
        assert_eq!(
            sampler.attempt(&brush, &surface, &[], MIN_DISTANCE, &mut rng),
            AttemptOutcome::NoBrushCenter
        );

        brush.set_center(Some(Vec3::new(50.0, 0.0, 50.0)));
        assert_eq!(
            sampler.attempt(&brush, &surface, &[], MIN_DISTANCE, &mut rng),
            AttemptOutcome::ProjectionMiss
        );

        brush.set_center(Some(Vec3::ZERO));
        brush.set_radius(0.5);
        let blocker = [Vec3::ZERO];
        assert_eq!(
            sampler.attempt(&brush, &surface, &blocker, 2.0, &mut rng),
            AttemptOutcome::SpacingViolation
        );
    }

    #[test]
    fn committing_accepted_points_keeps_spacing_invariant() {
        let mut rng = StdRng::seed_from_u64(99);
        let sampler = PlacementSampler::default();
        let surface = FlatSurface::new(0.0);
        let mut set = PlacementSet::new();

        for step in 0..3000 {
            // Wander the brush to exercise overlapping strokes.
            let t = step as f32 * 0.01;
            let brush = brush_at(Vec3::new(t.sin() * 3.0, 0.0, t.cos() * 3.0), 1.5);
            if let Some(p) = sampler.try_place_one(
                &brush,
                &surface,
                set.as_slice(),
                MIN_DISTANCE,
                &mut rng,
            ) {
                assert!(set.try_insert(p, MIN_DISTANCE));
            }
        }

        assert!(set.len() > 50);
        assert!(pairwise_min_distance(set.as_slice()) >= MIN_DISTANCE);
    }

    #[test]
    fn sampler_never_mutates_the_placement_set() {
        let mut rng = StdRng::seed_from_u64(5);
        let sampler = PlacementSampler::default();
        let surface = FlatSurface::new(0.0);
        let brush = brush_at(Vec3::ZERO, 3.0);

        let mut set = PlacementSet::new();
        set.try_insert(Vec3::ZERO, MIN_DISTANCE);
        set.try_insert(Vec3::new(1.0, 0.0, 0.0), MIN_DISTANCE);
        let before = set.snapshot();

        let _ = sampler.try_place_one(&brush, &surface, set.as_slice(), MIN_DISTANCE, &mut rng);
        let preview: Vec<Vec3> = sampler
            .refresh_preview(&brush, &surface, set.as_slice(), MIN_DISTANCE, 50, &mut rng)
            .collect();

        assert!(!preview.is_empty());
        assert_eq!(set.snapshot(), before);
    }

    #[test]
    fn preview_on_empty_set_lies_on_surface() {
        let mut rng = StdRng::seed_from_u64(17);
        let sampler = PlacementSampler::default();
        // Brush straddles the surface edge so some attempts miss.
        let surface = FlatSurface::square(1.25, 2.0);
        let brush = brush_at(Vec3::new(2.0, 0.0, 0.0), 2.0);

        let mut iter = sampler.refresh_preview(&brush, &surface, &[], MIN_DISTANCE, 100, &mut rng);
        let points: Vec<Vec3> = iter.by_ref().collect();
        let stats = iter.stats();

        assert!(points.len() <= 100);
        assert_eq!(stats.attempts, 100);
        assert_eq!(stats.accepted, points.len());
        assert!(stats.projection_misses > 0);
        for p in &points {
            assert_eq!(p.y, 1.25);
            assert!(p.x <= 2.0 && p.x >= -2.0 && p.z <= 2.0 && p.z >= -2.0);
        }
    }

    #[test]
    fn preview_shrinks_as_the_disc_saturates() {
        let sampler = PlacementSampler::default();
        let surface = FlatSurface::new(0.0);
        let brush = brush_at(Vec3::ZERO, 10.0);

        let preview_len = |placed: &[Vec3], seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            sampler
                .refresh_preview(&brush, &surface, placed, MIN_DISTANCE, 100, &mut rng)
                .count()
        };

        let empty = preview_len(&[], 1);
        assert_eq!(empty, 100);

        // 500 spaced points scattered over the disc.
        let mut rng = StdRng::seed_from_u64(2);
        let mut sparse = PlacementSet::new();
        while sparse.len() < 500 {
            if let Some(p) =
                sampler.try_place_one(&brush, &surface, sparse.as_slice(), MIN_DISTANCE, &mut rng)
            {
                sparse.try_insert(p, MIN_DISTANCE);
            }
        }
        let partial = preview_len(sparse.as_slice(), 1);
        assert!(partial < empty, "partial {partial} vs empty {empty}");
        assert!(partial > 0);

        // A lattice at the spacing leaves no free spot anywhere in the disc.
        let saturated = lattice_disc(10.5, MIN_DISTANCE);
        assert!(pairwise_min_distance(&saturated[..200]) >= MIN_DISTANCE - 1e-4);
        let full = preview_len(&saturated, 1);
        assert_eq!(full, 0);
    }

    #[test]
    fn preview_iterator_is_finite_and_fused() {
        let mut rng = StdRng::seed_from_u64(8);
        let sampler = PlacementSampler::default();
        let surface = FlatSurface::new(0.0);
        let brush = brush_at(Vec3::ZERO, 2.0);

        let mut iter = sampler.refresh_preview(&brush, &surface, &[], MIN_DISTANCE, 3, &mut rng);
        assert_eq!(iter.size_hint(), (0, Some(3)));
        assert!(iter.next().is_some());
        assert!(iter.next().is_some());
        assert!(iter.next().is_some());
        assert_eq!(iter.remaining(), 0);
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    #[test]
    fn attempt_stats_tally() {
        let mut stats = AttemptStats::default();
        assert_eq!(stats.acceptance_rate(), 0.0);
        stats.record(&AttemptOutcome::Accepted(Vec3::ZERO));
        stats.record(&AttemptOutcome::ProjectionMiss);
        stats.record(&AttemptOutcome::SpacingViolation);
        stats.record(&AttemptOutcome::NoBrushCenter);
        assert_eq!(stats.attempts, 4);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.acceptance_rate(), 0.25);
    }
}
