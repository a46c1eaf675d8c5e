use cgmath::{Quaternion, Vector3, vec3};

/// Tracked head pose, refreshed by the host every tick.
#[derive(Clone, Debug)]
pub struct Head {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Head {
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * vec3(0.0, 0.0, -1.0)
    }

    pub fn right(&self) -> Vector3<f32> {
        self.rotation * vec3(1.0, 0.0, 0.0)
    }
}

impl Default for Head {
    fn default() -> Self {
        Head {
            position: vec3(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }
}

/// Tracked hand pose, refreshed by the host every tick.
#[derive(Clone, Debug)]
pub struct Hand {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl Hand {
    pub fn forward(&self) -> Vector3<f32> {
        self.rotation * vec3(0.0, 0.0, -1.0)
    }

    pub fn right(&self) -> Vector3<f32> {
        self.rotation * vec3(1.0, 0.0, 0.0)
    }
}

impl Default for Hand {
    fn default() -> Self {
        Hand {
            position: vec3(0.0, 0.0, 0.0),
            rotation: Quaternion::new(1.0, 0.0, 0.0, 0.0),
        }
    }
}

/// Scalar movement throttles in [-1, 1] from the host input bindings.
#[derive(Clone, Copy, Debug, Default)]
pub struct MovementAxes {
    pub forward: f32,
    pub right: f32,
    pub rotate: f32,
}

/// Everything the host reports about the player for one tick. The teleport
/// button is delivered as its current state; released-edge detection happens
/// inside the locomotion core.
#[derive(Clone, Debug, Default)]
pub struct InputContext {
    pub head: Head,
    pub left_hand: Hand,
    pub right_hand: Hand,
    pub axes: MovementAxes,
    pub teleport_pressed: bool,
}
