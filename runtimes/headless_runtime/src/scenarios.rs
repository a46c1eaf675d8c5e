//! Scripted per-frame input for driving the locomotion core without a
//! headset. Poses are body-relative; the runtime offsets them by the
//! simulated character position each frame.

use cgmath::{Deg, Quaternion, Rotation3, vec3};

use blinkstep::{Hand, Head, InputContext, MovementAxes};

const HEAD_HEIGHT: f32 = 170.0;
const HAND_HEIGHT: f32 = 150.0;

/// Frame index where the scripted teleport button is released.
pub const TELEPORT_RELEASE_FRAME: usize = 45;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// Smooth locomotion: throttle ramps and a yaw sweep, driving the
    /// movement effects and the comfort vignette.
    Walk,
    /// Aim at the floor, hold, release, and ride the fade to the landing.
    Teleport,
    /// Release toward a valid target, then swing the aim past the walkable
    /// strip so the marker is gone when the commit deadline fires.
    AbortedTeleport,
}

impl Scenario {
    pub fn parse(name: &str) -> Option<Scenario> {
        match name {
            "walk" => Some(Scenario::Walk),
            "teleport" => Some(Scenario::Teleport),
            "aborted-teleport" | "aborted" => Some(Scenario::AbortedTeleport),
            _ => None,
        }
    }

    pub fn input_for_frame(&self, frame: usize) -> InputContext {
        match self {
            Scenario::Walk => walk_input(frame),
            Scenario::Teleport => teleport_input(frame),
            Scenario::AbortedTeleport => aborted_teleport_input(frame),
        }
    }
}

fn head() -> Head {
    Head {
        position: vec3(0.0, HEAD_HEIGHT, 0.0),
        rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
    }
}

/// Aiming hand held out to the right, pitched around x.
fn aiming_hand(pitch_degrees: f32) -> Hand {
    Hand {
        position: vec3(30.0, HAND_HEIGHT, -20.0),
        rotation: Quaternion::from_angle_x(Deg(pitch_degrees)),
    }
}

fn walk_input(frame: usize) -> InputContext {
    let forward = match frame {
        0..=29 => frame as f32 / 30.0,
        30..=149 => 1.0,
        150..=179 => (180 - frame) as f32 / 30.0,
        _ => 0.0,
    };
    let rotate = if (60..90).contains(&frame) { 0.25 } else { 0.0 };

    InputContext {
        head: head(),
        right_hand: aiming_hand(-30.0),
        axes: MovementAxes {
            forward,
            right: 0.0,
            rotate,
        },
        ..InputContext::default()
    }
}

fn teleport_input(frame: usize) -> InputContext {
    InputContext {
        head: head(),
        right_hand: aiming_hand(-30.0),
        teleport_pressed: (30..TELEPORT_RELEASE_FRAME).contains(&frame),
        ..InputContext::default()
    }
}

fn aborted_teleport_input(frame: usize) -> InputContext {
    // The downward aim is held through the release frame so the marker is
    // still visible when the release edge is processed and the fade starts.
    // Afterwards the aim swings upward; the longer arc lands beyond the
    // walkable strip, so the marker is hidden by the time the relocation
    // deadline fires.
    let pitch = if frame <= TELEPORT_RELEASE_FRAME {
        -30.0
    } else {
        30.0
    };

    InputContext {
        head: head(),
        right_hand: aiming_hand(pitch),
        teleport_pressed: (30..TELEPORT_RELEASE_FRAME).contains(&frame),
        ..InputContext::default()
    }
}
