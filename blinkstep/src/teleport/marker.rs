use cgmath::{Vector3, vec3};
use tracing::debug;

use crate::config::TeleportConfig;
use crate::effect::Effect;
use crate::input_context::Hand;
use crate::teleport::arc_projector::{ArcProjectionStrategy, CollisionWorld};
use crate::teleport::surface_validator::{NavMeshQuery, SurfaceValidator};

/// Marker state mirrored to the host every tick. `visible` implies
/// `world_position` is the most recent validated projection hit.
#[derive(Clone, Copy, Debug)]
pub struct DestinationMarker {
    pub visible: bool,
    pub world_position: Vector3<f32>,
}

impl DestinationMarker {
    /// Markers start hidden until the first valid projection.
    pub fn hidden() -> Self {
        DestinationMarker {
            visible: false,
            world_position: vec3(0.0, 0.0, 0.0),
        }
    }

    pub fn target(&self) -> Option<Vector3<f32>> {
        if self.visible {
            Some(self.world_position)
        } else {
            None
        }
    }
}

/// Drives the destination marker from the aiming hand. Marker state is a
/// pure function of the current projection, with no hysteresis; visibility
/// is re-emitted every tick.
pub struct DestinationMarkerSystem {
    projectile_speed: f32,
    validator: SurfaceValidator,
    marker: DestinationMarker,
}

impl DestinationMarkerSystem {
    pub fn new(config: &TeleportConfig) -> Self {
        DestinationMarkerSystem {
            projectile_speed: config.projectile_speed,
            validator: SurfaceValidator::from_config(config),
            marker: DestinationMarker::hidden(),
        }
    }

    pub fn marker(&self) -> &DestinationMarker {
        &self.marker
    }

    /// Project the arc from `hand` along its forward vector, validate the
    /// landing point, and refresh the marker.
    pub fn update(
        &mut self,
        projection: &dyn ArcProjectionStrategy,
        collision: &dyn CollisionWorld,
        nav_mesh: Option<&dyn NavMeshQuery>,
        hand: &Hand,
    ) -> Vec<Effect> {
        let result = projection.project(
            collision,
            hand.position,
            hand.forward(),
            self.projectile_speed,
        );

        let destination = match result.hit_point {
            Some(hit) if result.is_blocking_hit && self.validator.is_navigable(nav_mesh, hit) => {
                Some(hit)
            }
            _ => None,
        };

        let mut effects = Vec::new();
        match destination {
            Some(position) => {
                if !self.marker.visible {
                    debug!("Destination marker shown at {:?}", position);
                }
                self.marker = DestinationMarker {
                    visible: true,
                    world_position: position,
                };
                effects.push(Effect::ShowDestinationMarker { position });
            }
            None => {
                if self.marker.visible {
                    debug!("Destination marker hidden");
                }
                self.marker.visible = false;
                effects.push(Effect::HideDestinationMarker);
            }
        }

        if result.points.len() > 1 {
            effects.push(Effect::DrawDebugArc {
                points: result.points,
            });
        }

        effects
    }

    /// Drop the marker without a projection pass. Emits only on the
    /// visible-to-hidden transition.
    pub fn hide(&mut self) -> Vec<Effect> {
        if !self.marker.visible {
            return vec![];
        }
        debug!("Destination marker hidden");
        self.marker.visible = false;
        vec![Effect::HideDestinationMarker]
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Quaternion, vec3};

    use super::*;
    use crate::teleport::arc_projector::{BallisticArcProjection, TraceChannels};
    use crate::test_support::{FlatNavMesh, GroundPlane};

    fn aiming_hand() -> Hand {
        Hand {
            position: vec3(0.0, 100.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }

    fn system() -> (DestinationMarkerSystem, BallisticArcProjection) {
        (
            DestinationMarkerSystem::new(&TeleportConfig::default()),
            BallisticArcProjection::default(),
        )
    }

    #[test]
    fn test_valid_hit_shows_marker_at_landing_point() {
        let (mut system, projection) = system();
        let world = GroundPlane::new(0.0);
        let nav = FlatNavMesh { height: 0.0 };

        let effects = system.update(&projection, &world, Some(&nav), &aiming_hand());

        assert!(system.marker().visible);
        assert!(system.marker().world_position.y.abs() < 1e-3);
        assert!(system.marker().world_position.z < -400.0);
        assert!(matches!(effects[0], Effect::ShowDestinationMarker { .. }));
        assert!(
            effects
                .iter()
                .any(|effect| matches!(effect, Effect::DrawDebugArc { .. }))
        );
    }

    #[test]
    fn test_unnavigable_hit_hides_marker() {
        let (mut system, projection) = system();
        let world = GroundPlane::new(0.0);
        let nav = FlatNavMesh { height: 500.0 };

        let effects = system.update(&projection, &world, Some(&nav), &aiming_hand());

        assert!(!system.marker().visible);
        assert!(matches!(effects[0], Effect::HideDestinationMarker));
    }

    #[test]
    fn test_missed_arc_hides_marker_but_still_draws_it() {
        let (mut system, projection) = system();
        let world = GroundPlane {
            height: 0.0,
            channels: TraceChannels::NAVIGATION,
        };
        let nav = FlatNavMesh { height: 0.0 };

        let effects = system.update(&projection, &world, Some(&nav), &aiming_hand());

        assert!(!system.marker().visible);
        assert!(matches!(effects[0], Effect::HideDestinationMarker));
        assert!(
            effects
                .iter()
                .any(|effect| matches!(effect, Effect::DrawDebugArc { .. }))
        );
    }

    #[test]
    fn test_update_is_idempotent_for_unchanged_pose() {
        let (mut system, projection) = system();
        let world = GroundPlane::new(0.0);
        let nav = FlatNavMesh { height: 0.0 };

        system.update(&projection, &world, Some(&nav), &aiming_hand());
        let first = *system.marker();
        let effects = system.update(&projection, &world, Some(&nav), &aiming_hand());
        let second = *system.marker();

        assert!(first.visible && second.visible);
        assert_eq!(first.world_position, second.world_position);
        assert!(matches!(
            effects[0],
            Effect::ShowDestinationMarker { position } if position == first.world_position
        ));
    }

    #[test]
    fn test_hide_emits_only_on_transition() {
        let (mut system, projection) = system();
        let world = GroundPlane::new(0.0);
        let nav = FlatNavMesh { height: 0.0 };

        system.update(&projection, &world, Some(&nav), &aiming_hand());
        assert_eq!(system.hide(), vec![Effect::HideDestinationMarker]);
        assert_eq!(system.hide(), vec![]);
    }
}
