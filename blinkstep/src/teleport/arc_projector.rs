use bitflags::bitflags;
use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::ArcProjectionConfig;

bitflags! {
    /// Collision filter lanes a segment cast tests against.
    #[derive(Serialize, Deserialize)]
    pub struct TraceChannels: u32 {
        const VISIBILITY = 1 << 0;
        const CAMERA = 1 << 1;
        const NAVIGATION = 1 << 2;
    }
}

/// A blocking hit returned from a segment cast.
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub position: Vector3<f32>,
    pub normal: Vector3<f32>,
    pub distance: f32,
}

/// World-geometry collision queries provided by the host engine.
pub trait CollisionWorld {
    /// Cast a segment from `start` to `end` against the given channels and
    /// return the closest blocking hit. `trace_complex` requests
    /// per-triangle testing on mesh geometry.
    fn cast_segment(
        &self,
        start: Vector3<f32>,
        end: Vector3<f32>,
        channels: TraceChannels,
        trace_complex: bool,
    ) -> Option<RayHit>;
}

/// Sampled arc plus landing information for one targeting pass. Recomputed
/// every tick, never persisted.
#[derive(Clone, Debug)]
pub struct ProjectionResult {
    /// Points along the flown arc, origin first, hit point last when one
    /// exists.
    pub points: Vec<Vector3<f32>>,
    pub hit_point: Option<Vector3<f32>>,
    pub is_blocking_hit: bool,
}

/// How a targeting arc is projected into the world.
pub trait ArcProjectionStrategy {
    fn project(
        &self,
        world: &dyn CollisionWorld,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        speed: f32,
    ) -> ProjectionResult;
}

/// Closed-form kinematic sampling under constant downward gravity, cast
/// segment by segment until the first blocking hit. The launch direction is
/// used as-is; a zero direction degenerates to a straight-down fall.
pub struct BallisticArcProjection {
    config: ArcProjectionConfig,
}

impl BallisticArcProjection {
    pub fn new(config: ArcProjectionConfig) -> Self {
        BallisticArcProjection { config }
    }

    fn position_at_time(
        origin: Vector3<f32>,
        velocity: Vector3<f32>,
        gravity: f32,
        time: f32,
    ) -> Vector3<f32> {
        Vector3::new(
            origin.x + velocity.x * time,
            origin.y + velocity.y * time - 0.5 * gravity * time * time,
            origin.z + velocity.z * time,
        )
    }
}

impl Default for BallisticArcProjection {
    fn default() -> Self {
        Self::new(ArcProjectionConfig::default())
    }
}

impl ArcProjectionStrategy for BallisticArcProjection {
    fn project(
        &self,
        world: &dyn CollisionWorld,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        speed: f32,
    ) -> ProjectionResult {
        let velocity = direction * speed;

        let mut points = Vec::with_capacity(self.config.max_steps + 1);
        points.push(origin);

        let mut previous = origin;
        for step in 1..=self.config.max_steps {
            let t = step as f32 * self.config.step_seconds;
            let next = Self::position_at_time(origin, velocity, self.config.gravity, t);

            if let Some(hit) = world.cast_segment(previous, next, self.config.channels, true) {
                points.push(hit.position);
                return ProjectionResult {
                    points,
                    hit_point: Some(hit.position),
                    is_blocking_hit: true,
                };
            }

            points.push(next);
            previous = next;
        }

        ProjectionResult {
            points,
            hit_point: None,
            is_blocking_hit: false,
        }
    }
}
