//! Fade-then-relocate request machine.
//!
//! A request fades the view out and schedules a one-shot deadline
//! `relocation_delay` ahead on the frame clock. The deadline is the commit
//! point: if the marker is still visible the player relocates and the fade
//! snaps off, otherwise the request aborts with the fade stop alone.
//! Relocation and the snap-back complete within the deadline tick, so the
//! only phase that persists across ticks is the fade-out wait.
//!
//! Deadlines carry the request generation. A newer request or a cancel bumps
//! the generation, which makes any older deadline inert; overlapping
//! requests therefore supersede instead of double-firing.

use cgmath::vec3;
use tracing::{debug, info};

use crate::config::TeleportConfig;
use crate::effect::Effect;
use crate::teleport::marker::DestinationMarker;
use crate::time::Time;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TeleportPhase {
    Idle,
    FadingOut { relocate_at: f32, generation: u64 },
}

pub struct TeleportStateMachine {
    fade_duration: f32,
    relocation_delay: f32,
    phase: TeleportPhase,
    generation: u64,
}

impl TeleportStateMachine {
    pub fn new(config: &TeleportConfig) -> Self {
        TeleportStateMachine {
            fade_duration: config.fade_duration,
            relocation_delay: config.relocation_delay,
            phase: TeleportPhase::Idle,
            generation: 0,
        }
    }

    pub fn phase(&self) -> TeleportPhase {
        self.phase
    }

    /// Begin the fade toward the marker. A hidden marker makes this a
    /// no-op; a still-pending request is superseded by the new one.
    pub fn request_teleport(&mut self, time: &Time, marker: &DestinationMarker) -> Effect {
        if !marker.visible {
            debug!("Teleport requested without a visible destination; ignoring");
            return Effect::NoEffect;
        }

        if let TeleportPhase::FadingOut { .. } = self.phase {
            info!("Pending teleport superseded by a newer request");
        }

        self.generation += 1;
        let relocate_at = time.total.as_secs_f32() + self.relocation_delay;
        self.phase = TeleportPhase::FadingOut {
            relocate_at,
            generation: self.generation,
        };
        info!(
            "Teleport requested toward {:?}, committing at t={:.2}",
            marker.world_position, relocate_at
        );

        Effect::StartCameraFade {
            from_alpha: 1.0,
            to_alpha: 0.0,
            duration: self.fade_duration,
            color: vec3(0.0, 0.0, 0.0),
        }
    }

    /// Abandon any pending request and stop the fade.
    pub fn cancel(&mut self) -> Effect {
        match self.phase {
            TeleportPhase::Idle => Effect::NoEffect,
            TeleportPhase::FadingOut { .. } => {
                self.generation += 1;
                self.phase = TeleportPhase::Idle;
                info!("Teleport request cancelled");
                Effect::StopCameraFade
            }
        }
    }

    /// Deadline check, run every tick. Fires on the first tick at or after
    /// the stored deadline, and only if the deadline's generation is still
    /// current. The destination is read from the marker now, not at request
    /// time.
    pub fn update(
        &mut self,
        time: &Time,
        marker: &DestinationMarker,
        capsule_half_height: f32,
    ) -> Effect {
        let (relocate_at, generation) = match self.phase {
            TeleportPhase::Idle => return Effect::NoEffect,
            TeleportPhase::FadingOut {
                relocate_at,
                generation,
            } => (relocate_at, generation),
        };

        if generation != self.generation || time.total.as_secs_f32() < relocate_at {
            return Effect::NoEffect;
        }

        self.phase = TeleportPhase::Idle;

        match marker.target() {
            Some(destination) => {
                let position = destination + vec3(0.0, capsule_half_height, 0.0);
                info!("Teleporting to {:?}", position);
                Effect::combine(vec![
                    Effect::SetPlayerPosition {
                        position,
                        is_teleport: true,
                    },
                    Effect::StopCameraFade,
                ])
            }
            None => {
                info!("Destination lost before the fade completed; aborting");
                Effect::StopCameraFade
            }
        }
    }
}
