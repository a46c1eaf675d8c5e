use cgmath::{Vector2, Vector3};

/// Host-mutation commands returned from an update pass. The core never
/// touches engine state directly; the host applies these in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    NoEffect,
    Multiple(Vec<Effect>),
    /// Move the player capsule. `is_teleport` suppresses interpolation.
    SetPlayerPosition {
        position: Vector3<f32>,
        is_teleport: bool,
    },
    /// Feed a world-space direction into the host movement component.
    AddMovementInput {
        world_direction: Vector3<f32>,
    },
    AddYawInput {
        degrees: f32,
    },
    ShowDestinationMarker {
        position: Vector3<f32>,
    },
    HideDestinationMarker,
    /// Fade the view toward `color`. Alpha is scene opacity, 1 fully
    /// visible and 0 fully faded.
    StartCameraFade {
        from_alpha: f32,
        to_alpha: f32,
        duration: f32,
        color: Vector3<f32>,
    },
    StopCameraFade,
    SetVignetteRadius {
        radius: f32,
    },
    SetVignetteCenter {
        center: Vector2<f32>,
    },
    /// One-frame debug visualization of the sampled targeting arc.
    DrawDebugArc {
        points: Vec<Vector3<f32>>,
    },
}

impl Effect {
    /// Collapse a batch into the smallest equivalent effect. `NoEffect`
    /// entries are dropped and nested `Multiple` batches are flattened.
    pub fn combine(effects: Vec<Effect>) -> Effect {
        let mut flattened = Vec::new();
        for effect in effects {
            flatten_into(&mut flattened, effect);
        }

        match flattened.len() {
            0 => Effect::NoEffect,
            1 => flattened.remove(0),
            _ => Effect::Multiple(flattened),
        }
    }
}

fn flatten_into(out: &mut Vec<Effect>, effect: Effect) {
    match effect {
        Effect::NoEffect => {}
        Effect::Multiple(effects) => {
            for effect in effects {
                flatten_into(out, effect);
            }
        }
        other => out.push(other),
    }
}
