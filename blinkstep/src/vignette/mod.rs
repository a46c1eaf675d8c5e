//! Motion-comfort vignette.
//!
//! Maps the character's speed to a vignette radius through the comfort
//! curve, and anchors the vignette opening toward the direction of travel by
//! projecting a point ahead of the head onto the screen. Both halves are
//! independently toggleable; with no material bound the controller emits
//! nothing at all.

pub mod comfort_curve;

pub use comfort_curve::{ComfortCurve, CurveKey, VignetteRadiusStrategy};

use cgmath::{InnerSpace, Vector2, Vector3, vec2};

use crate::config::VignetteConfig;
use crate::effect::Effect;
use crate::input_context::Head;

/// World-to-screen projection provided by the host camera.
pub trait ScreenProjection {
    /// Project a world point to pixel coordinates, `None` when the point
    /// cannot be brought onto the screen.
    fn world_to_screen(&self, world: Vector3<f32>) -> Option<Vector2<f32>>;

    fn viewport_size(&self) -> Vector2<f32>;
}

/// The last shader parameters computed by the controller, in normalized
/// screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VignetteParams {
    pub radius: f32,
    pub center: Vector2<f32>,
}

impl Default for VignetteParams {
    fn default() -> Self {
        VignetteParams {
            radius: 1.0,
            center: vec2(0.5, 0.5),
        }
    }
}

/// Movement below this speed reads as stationary.
const NEAR_ZERO_SPEED: f32 = 1e-4;

/// Derives the vignette shader parameters from the current velocity, once
/// per tick.
pub struct VignetteController {
    material_bound: bool,
    radius_enabled: bool,
    center_enabled: bool,
    anchor_distance: f32,
    radius_strategy: Option<Box<dyn VignetteRadiusStrategy>>,
    params: VignetteParams,
}

impl VignetteController {
    /// Build the controller with a comfort curve from the config. An empty
    /// curve leaves the radius strategy unset, which skips radius updates.
    pub fn new(config: &VignetteConfig) -> Self {
        let radius_strategy: Option<Box<dyn VignetteRadiusStrategy>> =
            if config.comfort_curve.is_empty() {
                None
            } else {
                Some(Box::new(ComfortCurve::from_keys(
                    config.comfort_curve.clone(),
                )))
            };
        Self::with_strategy(config, radius_strategy)
    }

    pub fn with_strategy(
        config: &VignetteConfig,
        radius_strategy: Option<Box<dyn VignetteRadiusStrategy>>,
    ) -> Self {
        VignetteController {
            material_bound: config.material.is_some(),
            radius_enabled: config.radius_enabled,
            center_enabled: config.center_enabled,
            anchor_distance: config.anchor_distance,
            radius_strategy,
            params: VignetteParams::default(),
        }
    }

    pub fn params(&self) -> VignetteParams {
        self.params
    }

    pub fn update(
        &mut self,
        head: &Head,
        velocity: Vector3<f32>,
        screen: Option<&dyn ScreenProjection>,
    ) -> Vec<Effect> {
        if !self.material_bound {
            return vec![];
        }

        let mut effects = Vec::new();

        if self.radius_enabled {
            if let Some(strategy) = &self.radius_strategy {
                let radius = strategy.radius_for_speed(velocity.magnitude());
                self.params.radius = radius;
                effects.push(Effect::SetVignetteRadius { radius });
            }
        }

        if self.center_enabled {
            let center = self.compute_center(head, velocity, screen);
            self.params.center = center;
            effects.push(Effect::SetVignetteCenter { center });
        }

        effects
    }

    /// Anchor a point `anchor_distance` along the travel direction and
    /// project it to normalized screen space. The dot product against the
    /// view forward signs the offset, keeping the anchor on the travel side
    /// of the view for both forward and backward movement. Stationary
    /// movement, a missing projector, and an unprojectable anchor all fall
    /// back to the screen center.
    fn compute_center(
        &self,
        head: &Head,
        velocity: Vector3<f32>,
        screen: Option<&dyn ScreenProjection>,
    ) -> Vector2<f32> {
        let speed = velocity.magnitude();
        if speed < NEAR_ZERO_SPEED {
            return vec2(0.5, 0.5);
        }
        let Some(screen) = screen else {
            return vec2(0.5, 0.5);
        };

        let movement_direction = velocity / speed;
        let movement_sign = head.forward().dot(movement_direction);
        let anchor = head.position + movement_direction * (movement_sign * self.anchor_distance);

        match screen.world_to_screen(anchor) {
            Some(pixels) => {
                let viewport = screen.viewport_size();
                vec2(pixels.x / viewport.x, pixels.y / viewport.y)
            }
            None => vec2(0.5, 0.5),
        }
    }
}
