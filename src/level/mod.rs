//! Level geometry and ground queries.
//!
//! The `Level` resource holds the static ground geometry of the current
//! course as a list of axis-aligned slabs. The controller never touches slab
//! data directly; it asks the two queries every tick: `overlaps_circle` for
//! ground-contact checks and `top_below` for collision response.
//!
//! # Example:
//!
//! ```ignore
//! // Is the wheel (radius 0.35 plus margin) touching ground?
//! let grounded = level.overlaps_circle(wheel_pos, 0.35 + 0.05);
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One axis-aligned ground slab, described by its center and half-extents.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct GroundSlab {
    pub x: f32,
    pub y: f32,
    pub half_width: f32,
    pub half_height: f32,
}

impl GroundSlab {
    /// Y coordinate of the slab's walkable top surface.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.y + self.half_height
    }

    /// Whether a circle at `center` with radius `radius` overlaps this slab.
    /// Closest-point test: clamp the center into the slab and compare the
    /// remaining distance against the radius.
    #[must_use]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let cx = center.x.clamp(self.x - self.half_width, self.x + self.half_width);
        let cy = center.y.clamp(self.y - self.half_height, self.y + self.half_height);
        let d = center - Vec2::new(cx, cy);
        d.length_squared() <= radius * radius
    }
}

/// The `Level` resource: the currently loaded course.
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct Level {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slabs: Vec<GroundSlab>,
}

impl Default for Level {
    /// A single wide floor slab, enough to ride on when no level file exists.
    fn default() -> Self {
        Level {
            name: "flat".to_string(),
            slabs: vec![GroundSlab {
                x: 0.0,
                y: -1.0,
                half_width: 200.0,
                half_height: 1.0,
            }],
        }
    }
}

impl Level {
    /// Whether a circle at `center` with radius `radius` touches any ground
    /// slab. This is the controller's per-tick ground contact query.
    #[must_use]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        self.slabs.iter().any(|s| s.overlaps_circle(center, radius))
    }

    /// Highest walkable top surface under a circle at `center`, considering
    /// only slabs the circle horizontally reaches and whose top is not above
    /// the circle's center. Used to snap a falling body onto the ground.
    #[must_use]
    pub fn top_below(&self, center: Vec2, radius: f32) -> Option<f32> {
        self.slabs
            .iter()
            .filter(|s| (center.x - s.x).abs() <= s.half_width + radius)
            .filter(|s| s.top() <= center.y)
            .map(GroundSlab::top)
            .fold(None, |acc, top| Some(acc.map_or(top, |a: f32| a.max(top))))
    }
}

pub mod loader;

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Level {
        Level {
            name: "test".to_string(),
            slabs: vec![GroundSlab { x: 0.0, y: -1.0, half_width: 10.0, half_height: 1.0 }],
        }
    }

    #[test]
    fn circle_resting_on_floor_overlaps() {
        let level = floor();
        // wheel center exactly one radius above the surface, plus margin
        assert!(level.overlaps_circle(Vec2::new(0.0, 0.3), 0.35));
        assert!(!level.overlaps_circle(Vec2::new(0.0, 0.5), 0.35));
    }

    #[test]
    fn circle_past_slab_edge_does_not_overlap() {
        let level = floor();
        assert!(level.overlaps_circle(Vec2::new(10.2, 0.1), 0.35));
        assert!(!level.overlaps_circle(Vec2::new(11.0, 0.1), 0.35));
    }

    #[test]
    fn top_below_picks_highest_reachable_surface() {
        let mut level = floor();
        level.slabs.push(GroundSlab { x: 0.0, y: 1.0, half_width: 2.0, half_height: 0.5 });
        // above the raised slab: its top (1.5) wins over the floor (0.0)
        assert_eq!(level.top_below(Vec2::new(0.0, 3.0), 0.35), Some(1.5));
        // off to the side only the floor remains
        assert_eq!(level.top_below(Vec2::new(5.0, 3.0), 0.35), Some(0.0));
        // nothing under us at all
        assert_eq!(level.top_below(Vec2::new(50.0, 3.0), 0.35), None);
    }
}
