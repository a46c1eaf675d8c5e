//! Hand-built fake hosts shared by the inline test suites.

use cgmath::{InnerSpace, Vector2, Vector3, vec2, vec3};

use crate::teleport::{CollisionWorld, NavMeshQuery, RayHit, TraceChannels};
use crate::vignette::ScreenProjection;

/// Infinite horizontal plane that blocks downward-crossing segments on a
/// configurable channel set.
pub struct GroundPlane {
    pub height: f32,
    pub channels: TraceChannels,
}

impl GroundPlane {
    pub fn new(height: f32) -> Self {
        GroundPlane {
            height,
            channels: TraceChannels::VISIBILITY,
        }
    }
}

impl CollisionWorld for GroundPlane {
    fn cast_segment(
        &self,
        start: Vector3<f32>,
        end: Vector3<f32>,
        channels: TraceChannels,
        _trace_complex: bool,
    ) -> Option<RayHit> {
        if !channels.intersects(self.channels) {
            return None;
        }
        if start.y < self.height || end.y >= self.height {
            return None;
        }

        let t = (start.y - self.height) / (start.y - end.y);
        let position = start + (end - start) * t;
        Some(RayHit {
            position,
            normal: vec3(0.0, 1.0, 0.0),
            distance: (position - start).magnitude(),
        })
    }
}

/// Navmesh covering the whole horizontal plane at a fixed height.
pub struct FlatNavMesh {
    pub height: f32,
}

impl NavMeshQuery for FlatNavMesh {
    fn project_point(&self, point: Vector3<f32>, extents: Vector3<f32>) -> Option<Vector3<f32>> {
        if (point.y - self.height).abs() <= extents.y {
            Some(vec3(point.x, self.height, point.z))
        } else {
            None
        }
    }
}

/// Orthographic screen projector: world x maps right from the viewport
/// center, world y maps up.
pub struct OrthoScreen {
    pub viewport: Vector2<f32>,
}

impl ScreenProjection for OrthoScreen {
    fn world_to_screen(&self, world: Vector3<f32>) -> Option<Vector2<f32>> {
        Some(vec2(
            self.viewport.x * 0.5 + world.x,
            self.viewport.y * 0.5 - world.y,
        ))
    }

    fn viewport_size(&self) -> Vector2<f32> {
        self.viewport
    }
}
