//! Capped seed-point and stream-surface collections for trajectory-based
//! visualization.
//!
//! The core stores and bounds these; the renderer consumes them. Streamline
//! tracing and stream-surface advancement are visualization-side; the
//! renderer advances strip geometry in place through
//! [`TrajectorySeeder::surfaces_mut`] using velocity samples from the grid
//! and history.

use smoke_engine_core::Vec2;
use std::collections::VecDeque;

/// Hard ceiling on streamline seed points; further clicks are dropped.
pub const SEED_POINT_CAP: usize = 20;

/// Hard ceiling on stream-surface strips.
pub const STREAM_SURFACE_CAP: usize = 10;

/// Points per stream-surface rib.
pub const STRIP_POINTS: usize = 8;

/// One cross-section ("rib") of a stream-surface ribbon: 8 ordered points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStrip {
    points: [Vec2; STRIP_POINTS],
}

impl SurfaceStrip {
    /// Builds a rib of 8 points evenly spaced along `p1 -> p2`
    /// (7 equal sub-intervals).
    pub fn between(p1: Vec2, p2: Vec2) -> Self {
        let mut points = [Vec2::ZERO; STRIP_POINTS];
        for (i, point) in points.iter_mut().enumerate() {
            *point = p1.lerp(p2, i as f64 / (STRIP_POINTS - 1) as f64);
        }
        Self { points }
    }

    /// The rib's points, in order from `p1` to `p2`.
    pub fn points(&self) -> &[Vec2; STRIP_POINTS] {
        &self.points
    }

    /// Mutable access for in-place advancement by the renderer.
    pub fn points_mut(&mut self) -> &mut [Vec2; STRIP_POINTS] {
        &mut self.points
    }
}

/// Bounded collections of streamline seed points and stream-surface strips.
///
/// Both are created on user request, capped by hard ceilings, and cleared
/// wholesale on grid re-initialization.
#[derive(Debug, Default)]
pub struct TrajectorySeeder {
    seed_points: Vec<Vec2>,
    surfaces: VecDeque<SurfaceStrip>,
}

impl TrajectorySeeder {
    /// Creates empty collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a streamline seed point; silently dropped at the cap.
    pub fn add_seedpoint(&mut self, point: Vec2) {
        if self.seed_points.len() < SEED_POINT_CAP {
            self.seed_points.push(point);
        }
    }

    /// Adds a stream-surface rib interpolated along `p1 -> p2`, pushed to
    /// the front; silently dropped at the cap (existing strips are kept).
    pub fn add_streamsurface(&mut self, p1: Vec2, p2: Vec2) {
        if self.surfaces.len() < STREAM_SURFACE_CAP {
            self.surfaces.push_front(SurfaceStrip::between(p1, p2));
        }
    }

    /// The current seed points, in insertion order.
    pub fn seed_points(&self) -> &[Vec2] {
        &self.seed_points
    }

    /// The current strips, most recently added first.
    pub fn surfaces(&self) -> impl ExactSizeIterator<Item = &SurfaceStrip> {
        self.surfaces.iter()
    }

    /// Mutable strip access for the renderer's per-tick advancement.
    pub fn surfaces_mut(&mut self) -> impl ExactSizeIterator<Item = &mut SurfaceStrip> {
        self.surfaces.iter_mut()
    }

    /// Empties both collections (grid re-initialization).
    pub fn clear(&mut self) {
        self.seed_points.clear();
        self.surfaces.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_endpoints_match_segment() {
        let strip = SurfaceStrip::between(Vec2::new(1.0, 2.0), Vec2::new(8.0, 9.0));
        assert_eq!(strip.points()[0], Vec2::new(1.0, 2.0));
        assert_eq!(strip.points()[7], Vec2::new(8.0, 9.0));
    }

    #[test]
    fn strip_points_are_evenly_spaced() {
        let strip = SurfaceStrip::between(Vec2::new(0.0, 0.0), Vec2::new(7.0, 0.0));
        for (i, p) in strip.points().iter().enumerate() {
            assert!((p.x - i as f64).abs() < 1e-12);
            assert!(p.y.abs() < 1e-12);
        }
    }

    #[test]
    fn degenerate_segment_yields_coincident_points() {
        let p = Vec2::new(3.0, 4.0);
        let strip = SurfaceStrip::between(p, p);
        assert!(strip.points().iter().all(|&q| q == p));
    }

    #[test]
    fn seedpoints_stop_growing_at_cap() {
        let mut seeder = TrajectorySeeder::new();
        for i in 0..SEED_POINT_CAP + 5 {
            seeder.add_seedpoint(Vec2::new(i as f64, 0.0));
        }
        assert_eq!(seeder.seed_points().len(), SEED_POINT_CAP);
        // The first points are kept; late arrivals are the ones dropped.
        assert_eq!(seeder.seed_points()[0], Vec2::new(0.0, 0.0));
        assert_eq!(
            seeder.seed_points()[SEED_POINT_CAP - 1],
            Vec2::new((SEED_POINT_CAP - 1) as f64, 0.0)
        );
    }

    #[test]
    fn surfaces_stop_growing_at_cap() {
        let mut seeder = TrajectorySeeder::new();
        for i in 0..STREAM_SURFACE_CAP + 3 {
            seeder.add_streamsurface(Vec2::new(i as f64, 0.0), Vec2::new(i as f64, 1.0));
        }
        assert_eq!(seeder.surfaces().len(), STREAM_SURFACE_CAP);
    }

    #[test]
    fn surfaces_are_front_inserted() {
        let mut seeder = TrajectorySeeder::new();
        seeder.add_streamsurface(Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0));
        seeder.add_streamsurface(Vec2::new(2.0, 0.0), Vec2::new(2.0, 1.0));
        let first = seeder.surfaces().next().unwrap();
        assert_eq!(first.points()[0], Vec2::new(2.0, 0.0));
    }

    #[test]
    fn surfaces_mut_allows_in_place_advancement() {
        let mut seeder = TrajectorySeeder::new();
        seeder.add_streamsurface(Vec2::ZERO, Vec2::new(7.0, 0.0));
        for strip in seeder.surfaces_mut() {
            for p in strip.points_mut() {
                *p += Vec2::new(0.0, 1.0);
            }
        }
        let strip = seeder.surfaces().next().unwrap();
        assert!(strip.points().iter().all(|p| (p.y - 1.0).abs() < 1e-12));
    }

    #[test]
    fn clear_empties_both_collections() {
        let mut seeder = TrajectorySeeder::new();
        seeder.add_seedpoint(Vec2::ZERO);
        seeder.add_streamsurface(Vec2::ZERO, Vec2::ONE);
        seeder.clear();
        assert!(seeder.seed_points().is_empty());
        assert_eq!(seeder.surfaces().len(), 0);
    }
}
