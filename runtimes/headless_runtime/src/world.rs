//! Simulated host world: trimesh collision, a rectangle-set navmesh, and a
//! pinhole screen projector. These are the reference implementations of the
//! locomotion core's host seams.

use cgmath::{InnerSpace, Vector2, Vector3, vec2, vec3};
use rapier3d::parry::query::Ray;
use rapier3d::prelude::*;

use blinkstep::teleport::{CollisionWorld, NavMeshQuery, RayHit, TraceChannels};
use blinkstep::vignette::ScreenProjection;

pub fn vec_to_npoint(vec: Vector3<f32>) -> Point<Real> {
    point![vec.x, vec.y, vec.z]
}

pub fn vec_to_nvec(vec: Vector3<f32>) -> Vector<Real> {
    vector![vec.x, vec.y, vec.z]
}

pub fn nvec_to_vec(vec: Vector<Real>) -> Vector3<f32> {
    vec3(vec.x, vec.y, vec.z)
}

/// Static collision geometry built from rapier trimeshes, with collision
/// groups carrying the trace channel of each surface.
pub struct SimWorld {
    colliders: ColliderSet,
}

impl SimWorld {
    /// The scenario arena: a large floor at y=0, a raised platform ahead of
    /// the spawn, and a far wall. Distances are centimeters.
    pub fn arena() -> Self {
        let mut world = SimWorld {
            colliders: ColliderSet::new(),
        };

        // Floor slab.
        world.add_quad(
            vec3(-2000.0, 0.0, -2000.0),
            vec3(2000.0, 0.0, -2000.0),
            vec3(2000.0, 0.0, 2000.0),
            vec3(-2000.0, 0.0, 2000.0),
            TraceChannels::VISIBILITY,
        );

        // Platform top at y=150 ahead of the spawn.
        world.add_quad(
            vec3(-100.0, 150.0, -700.0),
            vec3(100.0, 150.0, -700.0),
            vec3(100.0, 150.0, -500.0),
            vec3(-100.0, 150.0, -500.0),
            TraceChannels::VISIBILITY,
        );

        // Back wall closing off the arena.
        world.add_quad(
            vec3(-2000.0, 0.0, -2000.0),
            vec3(-2000.0, 400.0, -2000.0),
            vec3(2000.0, 400.0, -2000.0),
            vec3(2000.0, 0.0, -2000.0),
            TraceChannels::VISIBILITY,
        );

        world
    }

    fn add_quad(
        &mut self,
        a: Vector3<f32>,
        b: Vector3<f32>,
        c: Vector3<f32>,
        d: Vector3<f32>,
        channels: TraceChannels,
    ) {
        let vertices = vec![
            vec_to_npoint(a),
            vec_to_npoint(b),
            vec_to_npoint(c),
            vec_to_npoint(d),
        ];
        let indices = vec![[0, 1, 2], [0, 2, 3]];
        let collider = ColliderBuilder::trimesh(vertices, indices)
            .collision_groups(InteractionGroups::new(
                Group::from_bits_truncate(channels.bits()),
                Group::all(),
            ))
            .build();
        self.colliders.insert(collider);
    }
}

impl CollisionWorld for SimWorld {
    fn cast_segment(
        &self,
        start: Vector3<f32>,
        end: Vector3<f32>,
        channels: TraceChannels,
        _trace_complex: bool,
    ) -> Option<RayHit> {
        let span = end - start;
        let length = span.magnitude();
        if length <= f32::EPSILON {
            return None;
        }
        let direction = span / length;
        let ray = Ray::new(vec_to_npoint(start), vec_to_nvec(direction));

        // Trimesh casts are per-triangle already, so trace_complex needs no
        // separate handling here.
        let mut closest: Option<RayHit> = None;
        for (_, collider) in self.colliders.iter() {
            if collider.collision_groups().memberships.bits() & channels.bits() == 0 {
                continue;
            }
            let Some(intersection) =
                collider
                    .shape()
                    .cast_ray_and_get_normal(collider.position(), &ray, length, true)
            else {
                continue;
            };
            if closest
                .as_ref()
                .is_none_or(|hit| intersection.time_of_impact < hit.distance)
            {
                closest = Some(RayHit {
                    position: start + direction * intersection.time_of_impact,
                    normal: nvec_to_vec(intersection.normal),
                    distance: intersection.time_of_impact,
                });
            }
        }
        closest
    }
}

/// One walkable axis-aligned rectangle at a fixed height. `min`/`max` span
/// the x and z axes.
#[derive(Clone, Copy, Debug)]
pub struct WalkableRect {
    pub min: Vector2<f32>,
    pub max: Vector2<f32>,
    pub height: f32,
}

/// A navmesh standing in for the engine's baked walkable-surface data:
/// point projection finds the nearest point on any rectangle within the
/// tolerance box.
pub struct RectNavMesh {
    rects: Vec<WalkableRect>,
}

impl RectNavMesh {
    pub fn new(rects: Vec<WalkableRect>) -> Self {
        RectNavMesh { rects }
    }

    /// Walkable cover for [`SimWorld::arena`]: the floor short of the far
    /// end, plus the platform top. The strip beyond z=-800 is intentionally
    /// unwalkable so overshooting arcs produce invalid targets.
    pub fn arena() -> Self {
        Self::new(vec![
            WalkableRect {
                min: vec2(-1900.0, -800.0),
                max: vec2(1900.0, 1900.0),
                height: 0.0,
            },
            WalkableRect {
                min: vec2(-100.0, -700.0),
                max: vec2(100.0, -500.0),
                height: 150.0,
            },
        ])
    }
}

impl NavMeshQuery for RectNavMesh {
    fn project_point(&self, point: Vector3<f32>, extents: Vector3<f32>) -> Option<Vector3<f32>> {
        let mut best: Option<(f32, Vector3<f32>)> = None;
        for rect in &self.rects {
            let candidate = vec3(
                point.x.clamp(rect.min.x, rect.max.x),
                rect.height,
                point.z.clamp(rect.min.y, rect.max.y),
            );
            let delta = candidate - point;
            if delta.x.abs() > extents.x || delta.y.abs() > extents.y || delta.z.abs() > extents.z {
                continue;
            }
            let distance = delta.magnitude2();
            if best.is_none_or(|(closest, _)| distance < closest) {
                best = Some((distance, candidate));
            }
        }
        best.map(|(_, candidate)| candidate)
    }
}

/// Perspective projection onto a fixed viewport, standing in for the
/// engine's player camera.
pub struct PinholeScreen {
    position: Vector3<f32>,
    forward: Vector3<f32>,
    fov_y_radians: f32,
    viewport: Vector2<f32>,
}

impl PinholeScreen {
    pub fn new(position: Vector3<f32>, forward: Vector3<f32>) -> Self {
        PinholeScreen {
            position,
            forward: forward.normalize(),
            fov_y_radians: std::f32::consts::FRAC_PI_2,
            viewport: vec2(1280.0, 720.0),
        }
    }
}

impl ScreenProjection for PinholeScreen {
    fn world_to_screen(&self, world: Vector3<f32>) -> Option<Vector2<f32>> {
        let world_up = vec3(0.0, 1.0, 0.0);
        let right = self.forward.cross(world_up);
        if right.magnitude2() <= f32::EPSILON {
            // Looking straight up or down; no stable screen basis.
            return None;
        }
        let right = right.normalize();
        let up = right.cross(self.forward);

        let delta = world - self.position;
        let depth = delta.dot(self.forward);
        if depth <= 1.0 {
            return None;
        }

        let tan_half = (self.fov_y_radians * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;
        let ndc_x = delta.dot(right) / (depth * tan_half * aspect);
        let ndc_y = delta.dot(up) / (depth * tan_half);

        Some(vec2(
            (ndc_x * 0.5 + 0.5) * self.viewport.x,
            (0.5 - ndc_y * 0.5) * self.viewport.y,
        ))
    }

    fn viewport_size(&self) -> Vector2<f32> {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downward_segment_hits_floor() {
        let world = SimWorld::arena();
        let hit = world
            .cast_segment(
                vec3(50.0, 120.0, 200.0),
                vec3(50.0, -30.0, 200.0),
                TraceChannels::VISIBILITY,
                true,
            )
            .expect("floor hit");

        assert!(hit.position.y.abs() < 1e-3);
        assert!((hit.distance - 120.0).abs() < 1e-3);
        assert!(hit.normal.y > 0.9);
    }

    #[test]
    fn test_channel_mismatch_passes_through() {
        let world = SimWorld::arena();
        let hit = world.cast_segment(
            vec3(0.0, 120.0, 0.0),
            vec3(0.0, -30.0, 0.0),
            TraceChannels::CAMERA,
            true,
        );

        assert!(hit.is_none());
    }

    #[test]
    fn test_closest_hit_wins_over_platform() {
        let world = SimWorld::arena();
        let hit = world
            .cast_segment(
                vec3(0.0, 300.0, -600.0),
                vec3(0.0, -50.0, -600.0),
                TraceChannels::VISIBILITY,
                true,
            )
            .expect("platform hit");

        assert!((hit.position.y - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_navmesh_rejects_the_far_strip() {
        let nav = RectNavMesh::arena();
        let tolerance = vec3(100.0, 100.0, 100.0);

        assert!(nav.project_point(vec3(0.0, 0.0, -400.0), tolerance).is_some());
        assert!(nav.project_point(vec3(0.0, 0.0, -1300.0), tolerance).is_none());
    }

    #[test]
    fn test_navmesh_snaps_to_platform_height() {
        let nav = RectNavMesh::arena();
        let projected = nav
            .project_point(vec3(10.0, 160.0, -600.0), vec3(100.0, 100.0, 100.0))
            .expect("platform projection");

        assert_eq!(projected, vec3(10.0, 150.0, -600.0));
    }

    #[test]
    fn test_screen_center_projects_to_viewport_center() {
        let screen = PinholeScreen::new(vec3(0.0, 170.0, 0.0), vec3(0.0, 0.0, -1.0));
        let pixels = screen
            .world_to_screen(vec3(0.0, 170.0, -500.0))
            .expect("projection");

        assert!((pixels.x - 640.0).abs() < 1e-3);
        assert!((pixels.y - 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera_does_not_project() {
        let screen = PinholeScreen::new(vec3(0.0, 170.0, 0.0), vec3(0.0, 0.0, -1.0));

        assert!(screen.world_to_screen(vec3(0.0, 170.0, 500.0)).is_none());
    }
}
