//! Arena geometry: a shrinking circle with one rotating exit gap
//!
//! Gap angles are measured in [0, 2π) from the arena's visual "up"
//! direction, which is a quarter turn away from the physical atan2 origin.
//! `boundary_angle` converts a physical offset into that frame.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GAP_ANGLE_OFFSET;
use crate::{polar_to_cartesian, wrap_angle};

/// Angular window in the arena wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapWindow {
    /// Start angle (radians, wrapped to [0, 2π))
    pub start: f32,
    /// Width as a fraction of the full circle (0.0 - 1.0)
    pub width: f32,
}

impl GapWindow {
    pub fn new(start: f32, width: f32) -> Self {
        Self {
            start: wrap_angle(start),
            width: width.clamp(0.0, 1.0),
        }
    }

    /// Angular span in radians
    #[inline]
    pub fn angular_span(&self) -> f32 {
        self.width * TAU
    }

    /// End angle (wrapped; may be numerically below `start`)
    pub fn end(&self) -> f32 {
        wrap_angle(self.start + self.angular_span())
    }

    /// Check if an angle lies inside the window (both edges inclusive)
    pub fn contains_angle(&self, theta: f32) -> bool {
        if self.width <= 0.0 {
            return false;
        }
        if self.width >= 1.0 {
            return true;
        }

        let theta = wrap_angle(theta);
        let start = self.start;
        let end = self.end();

        if start <= end {
            theta >= start && theta <= end
        } else {
            // Window spans the 0/2π seam
            theta >= start || theta <= end
        }
    }

    pub fn rotate(&mut self, delta: f32) {
        self.start = wrap_angle(self.start + delta);
    }
}

/// The circular playing field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    pub center: Vec2,
    pub radius: f32,
    /// Radius restored at every round start
    pub initial_radius: f32,
    /// Shrinking stops here
    pub min_radius: f32,
    pub gap: GapWindow,
}

impl Arena {
    pub fn new(center: Vec2, initial_radius: f32, min_radius: f32, gap_width: f32) -> Self {
        Self {
            center,
            radius: initial_radius,
            initial_radius,
            min_radius,
            gap: GapWindow::new(0.0, gap_width),
        }
    }

    /// Restore full size and park the gap at angle 0
    pub fn reset(&mut self, center: Vec2, initial_radius: f32) {
        self.center = center;
        self.initial_radius = initial_radius;
        self.radius = initial_radius;
        self.gap.start = 0.0;
    }

    /// Shrink toward the floor. No-op at the floor or with fewer than two
    /// live entities. Returns whether the radius changed.
    pub fn shrink(&mut self, delta: f32, live_count: usize) -> bool {
        if live_count < 2 || delta <= 0.0 || self.radius <= self.min_radius {
            return false;
        }
        self.radius = (self.radius - delta).max(self.min_radius);
        true
    }

    pub fn rotate_gap(&mut self, delta: f32) {
        self.gap.rotate(delta);
    }

    /// Gap membership for an angle already in the gap frame
    #[inline]
    pub fn angle_in_gap(&self, angle: f32) -> bool {
        self.gap.contains_angle(angle)
    }

    /// Gap-frame angle of a world position, measured around the center
    pub fn boundary_angle(&self, pos: Vec2) -> f32 {
        let offset = pos - self.center;
        wrap_angle(offset.y.atan2(offset.x) + GAP_ANGLE_OFFSET)
    }

    /// World position at `distance` from the center along a gap-frame angle
    pub fn point_at(&self, angle: f32, distance: f32) -> Vec2 {
        self.center + polar_to_cartesian(distance, angle - GAP_ANGLE_OFFSET)
    }

    /// Whether a world position is aligned with the gap
    pub fn is_in_gap(&self, pos: Vec2) -> bool {
        self.angle_in_gap(self.boundary_angle(pos))
    }
}
