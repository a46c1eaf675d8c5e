use cgmath::{Vector3, vec3};
use serde::{Deserialize, Serialize};

use crate::teleport::TraceChannels;
use crate::vignette::CurveKey;

/// Tuning for the ballistic arc sampler. Distances are in world units
/// (centimeters), so gravity defaults to 980.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcProjectionConfig {
    pub gravity: f32,
    pub step_seconds: f32,
    pub max_steps: usize,
    pub channels: TraceChannels,
}

impl Default for ArcProjectionConfig {
    fn default() -> Self {
        ArcProjectionConfig {
            gravity: 980.0,
            step_seconds: 0.05,
            max_steps: 200,
            channels: TraceChannels::VISIBILITY,
        }
    }
}

/// Configuration for teleport targeting and the fade-then-relocate commit.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleportConfig {
    pub enabled: bool,
    /// Launch speed of the targeting arc.
    pub projectile_speed: f32,
    /// Not enforced by the projection; kept for host-side tuning surfaces.
    pub max_teleport_distance: f32,
    /// Length of the visual fade to black.
    pub fade_duration: f32,
    /// Wait between a request and the relocation commit.
    pub relocation_delay: f32,
    /// Half-extents of the navmesh projection search box.
    pub nav_tolerance: Vector3<f32>,
}

impl Default for TeleportConfig {
    fn default() -> Self {
        TeleportConfig {
            enabled: true,
            projectile_speed: 1000.0,
            max_teleport_distance: 1000.0,
            fade_duration: 0.2,
            relocation_delay: 0.2,
            nav_tolerance: vec3(100.0, 100.0, 100.0),
        }
    }
}

/// Configuration for the motion-comfort vignette.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VignetteConfig {
    /// Shader material the parameters are bound to. `None` disables the
    /// vignette entirely.
    pub material: Option<String>,
    pub radius_enabled: bool,
    pub center_enabled: bool,
    /// How far along the travel direction the center anchor sits.
    pub anchor_distance: f32,
    /// Speed-to-radius keys, in any order.
    pub comfort_curve: Vec<CurveKey>,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        VignetteConfig {
            material: Some("motion_vignette".to_string()),
            radius_enabled: true,
            center_enabled: true,
            anchor_distance: 500.0,
            comfort_curve: vec![
                CurveKey {
                    speed: 0.0,
                    radius: 1.0,
                },
                CurveKey {
                    speed: 150.0,
                    radius: 0.8,
                },
                CurveKey {
                    speed: 600.0,
                    radius: 0.45,
                },
            ],
        }
    }
}

/// Configuration for smooth movement input.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub yaw_degrees_per_second: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        MovementConfig {
            yaw_degrees_per_second: 45.0,
        }
    }
}

/// Top-level locomotion configuration. Every section carries serde defaults,
/// so a partial JSON document overrides only the fields it names.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    pub teleport: TeleportConfig,
    pub arc: ArcProjectionConfig,
    pub vignette: VignetteConfig,
    pub movement: MovementConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_carry_tuning_values() {
        let config = LocomotionConfig::default();

        assert!(config.teleport.enabled);
        assert_eq!(config.teleport.projectile_speed, 1000.0);
        assert_eq!(config.teleport.fade_duration, 0.2);
        assert_eq!(config.teleport.relocation_delay, 0.2);
        assert_eq!(config.teleport.nav_tolerance, vec3(100.0, 100.0, 100.0));
        assert_eq!(config.arc.gravity, 980.0);
        assert_eq!(config.arc.max_steps, 200);
        assert_eq!(config.arc.channels, TraceChannels::VISIBILITY);
        assert_eq!(config.vignette.material.as_deref(), Some("motion_vignette"));
        assert!(config.vignette.radius_enabled);
        assert!(config.vignette.center_enabled);
        assert_eq!(config.vignette.anchor_distance, 500.0);
        assert_eq!(config.movement.yaw_degrees_per_second, 45.0);
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let config: LocomotionConfig =
            serde_json::from_str(r#"{ "teleport": { "projectile_speed": 750.0 } }"#).unwrap();

        assert_eq!(config.teleport.projectile_speed, 750.0);
        assert_eq!(config.teleport.fade_duration, 0.2);
        assert_eq!(config.vignette.anchor_distance, 500.0);
        assert_eq!(config.vignette.comfort_curve.len(), 3);
    }

    #[test]
    fn test_null_material_unbinds_vignette() {
        let config: LocomotionConfig =
            serde_json::from_str(r#"{ "vignette": { "material": null } }"#).unwrap();

        assert!(config.vignette.material.is_none());
    }
}
