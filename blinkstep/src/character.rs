use cgmath::Vector3;

use crate::config::LocomotionConfig;
use crate::effect::Effect;
use crate::input_context::InputContext;
use crate::teleport::{
    ArcProjectionStrategy, BallisticArcProjection, CollisionWorld, DestinationMarker,
    DestinationMarkerSystem, NavMeshQuery, TeleportPhase, TeleportStateMachine,
};
use crate::time::Time;
use crate::vignette::{ScreenProjection, VignetteController, VignetteParams, VignetteRadiusStrategy};

/// Per-tick physical state of the player body, queried from the host.
#[derive(Clone, Copy, Debug)]
pub struct BodyState {
    pub velocity: Vector3<f32>,
    /// Half the collision capsule's vertical extent; offsets teleport
    /// landings to foot level.
    pub capsule_half_height: f32,
}

/// The host seams bundled for one update pass. Collision is always present;
/// navigation and screen projection may be absent and degrade to "no
/// teleport target" and "centered vignette" respectively.
pub struct HostContext<'a> {
    pub collision: &'a dyn CollisionWorld,
    pub nav_mesh: Option<&'a dyn NavMeshQuery>,
    pub screen: Option<&'a dyn ScreenProjection>,
}

/// The player-controlled VR character: destination marker targeting, the
/// teleport request machine, smooth movement input, and the comfort
/// vignette, advanced once per frame through [`VrCharacter::update`].
pub struct VrCharacter {
    teleport_enabled: bool,
    yaw_degrees_per_second: f32,
    projection: Box<dyn ArcProjectionStrategy>,
    marker_system: DestinationMarkerSystem,
    state_machine: TeleportStateMachine,
    vignette: VignetteController,
    was_teleport_pressed: bool,
}

impl VrCharacter {
    pub fn new(config: &LocomotionConfig) -> Self {
        Self::assemble(
            config,
            Box::new(BallisticArcProjection::new(config.arc.clone())),
            VignetteController::new(&config.vignette),
        )
    }

    /// Inject replacement shaping strategies while keeping the rest of the
    /// configuration.
    pub fn with_strategies(
        config: &LocomotionConfig,
        projection: Box<dyn ArcProjectionStrategy>,
        radius_strategy: Option<Box<dyn VignetteRadiusStrategy>>,
    ) -> Self {
        Self::assemble(
            config,
            projection,
            VignetteController::with_strategy(&config.vignette, radius_strategy),
        )
    }

    fn assemble(
        config: &LocomotionConfig,
        projection: Box<dyn ArcProjectionStrategy>,
        vignette: VignetteController,
    ) -> Self {
        VrCharacter {
            teleport_enabled: config.teleport.enabled,
            yaw_degrees_per_second: config.movement.yaw_degrees_per_second,
            projection,
            marker_system: DestinationMarkerSystem::new(&config.teleport),
            state_machine: TeleportStateMachine::new(&config.teleport),
            vignette,
            was_teleport_pressed: false,
        }
    }

    pub fn marker(&self) -> &DestinationMarker {
        self.marker_system.marker()
    }

    pub fn teleport_phase(&self) -> TeleportPhase {
        self.state_machine.phase()
    }

    pub fn vignette_params(&self) -> VignetteParams {
        self.vignette.params()
    }

    /// Run one frame. The marker pass always runs before the trigger check,
    /// so a teleport request sees the marker computed from this tick's hand
    /// pose, and the commit deadline is checked after both.
    pub fn update(
        &mut self,
        time: &Time,
        input: &InputContext,
        body: &BodyState,
        host: &HostContext,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();

        let teleport_released = self.was_teleport_pressed && !input.teleport_pressed;
        self.was_teleport_pressed = input.teleport_pressed;

        if self.teleport_enabled {
            effects.extend(self.marker_system.update(
                self.projection.as_ref(),
                host.collision,
                host.nav_mesh,
                &input.right_hand,
            ));

            if teleport_released {
                match self
                    .state_machine
                    .request_teleport(time, self.marker_system.marker())
                {
                    Effect::NoEffect => {}
                    effect => effects.push(effect),
                }
            }

            match self
                .state_machine
                .update(time, self.marker_system.marker(), body.capsule_half_height)
            {
                Effect::NoEffect => {}
                Effect::Multiple(batch) => effects.extend(batch),
                effect => effects.push(effect),
            }
        } else {
            effects.extend(self.marker_system.hide());
        }

        let axes = input.axes;
        if axes.forward != 0.0 {
            effects.push(Effect::AddMovementInput {
                world_direction: input.head.forward() * axes.forward,
            });
        }
        if axes.right != 0.0 {
            effects.push(Effect::AddMovementInput {
                world_direction: input.head.right() * axes.right,
            });
        }
        if axes.rotate != 0.0 {
            effects.push(Effect::AddYawInput {
                degrees: self.yaw_degrees_per_second * axes.rotate * time.elapsed.as_secs_f32(),
            });
        }

        effects.extend(self.vignette.update(&input.head, body.velocity, host.screen));

        effects
    }
}
