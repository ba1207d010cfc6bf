//! Global configuration constants and per-query tuning for the narrow phase.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Threshold below which lengths and squared lengths are treated as zero.
pub const GEOMETRY_EPSILON: f32 = 1e-6;

/// Default on-plane band used when splitting a single polygon.
pub const DEFAULT_SPLIT_THRESHOLD: f32 = 1e-4;

/// Default on-plane band used when clipping against a whole plane hull.
pub const DEFAULT_HULL_CLIP_THRESHOLD: f32 = 1e-3;

/// Margin a cross-product axis must win by before it replaces a face axis.
pub const DEFAULT_EDGE_AXIS_BIAS: f32 = 1e-4;

/// Two vertices closer than this on every component are merged.
pub const POINTS_SAME_THRESHOLD: f32 = 1e-4;

/// Capacity of a [`Polygon`](crate::collision::clipping::Polygon).
pub const MAX_POLY_VERTICES: usize = 32;

/// Capacity of a [`PlaneHull`](crate::collision::clipping::PlaneHull).
pub const MAX_HULL_PLANES: usize = 32;

/// Capacity of a [`ContactManifold`](crate::collision::contact::ContactManifold).
pub const MAX_CONTACT_POINTS: usize = 8;

/// Box-side normal reported when the sphere center lies inside the box ("push down").
pub const FALLBACK_BOX_NORMAL: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Sphere-side normal reported when the nearest box point coincides with the sphere center ("push up").
pub const FALLBACK_SPHERE_NORMAL: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// Initial value of the best-axis tracker under [`AxisSelection::LegacySentinel`].
pub const LEGACY_DEPTH_SENTINEL: f32 = -10000.0;

/// Policy used by the box-box SAT to pick the contact axis among overlapping axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisSelection {
    /// Keep the axis with the smallest overlap; face axes win ties.
    #[default]
    LeastPenetration,
    /// Tracker starts at [`LEGACY_DEPTH_SENTINEL`] and is only replaced when it is
    /// larger than the candidate overlap. No non-negative overlap ever satisfies
    /// that, so overlapping boxes end up without a recorded axis and report no contact.
    LegacySentinel,
}

/// Tuning knobs for the narrow-phase routines that have any.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    pub axis_selection: AxisSelection,
    /// Extra overlap margin required for an edge-edge axis to beat the current best.
    pub edge_axis_bias: f32,
    /// On-plane band used when clipping the reference face against the incident hull.
    pub hull_clip_threshold: f32,
    /// Fill per-point penetration for face contacts from the incident face plane.
    /// When `false` face contacts carry zero penetration.
    pub estimate_face_penetration: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            axis_selection: AxisSelection::default(),
            edge_axis_bias: DEFAULT_EDGE_AXIS_BIAS,
            hull_clip_threshold: DEFAULT_HULL_CLIP_THRESHOLD,
            estimate_face_penetration: true,
        }
    }
}

impl CollisionConfig {
    /// Configuration that reproduces the legacy best-axis tracker.
    pub fn legacy() -> Self {
        Self {
            axis_selection: AxisSelection::LegacySentinel,
            estimate_face_penetration: false,
            ..Self::default()
        }
    }
}
