//! VR locomotion core: arc-targeted blink teleportation with a fade-out
//! commit, smooth movement input, and a velocity-driven comfort vignette.
//!
//! The host engine stays behind narrow seams. Collision casts, navmesh
//! projection, and screen projection come in through the traits defined next
//! to their consumers; every mutation goes back out as an [`Effect`] for the
//! host to apply. [`VrCharacter::update`] runs one frame of the whole system.

pub mod character;
pub mod config;
pub mod effect;
pub mod input_context;
pub mod teleport;
pub mod time;
pub mod vignette;

#[cfg(test)]
pub(crate) mod test_support;

pub use character::{BodyState, HostContext, VrCharacter};
pub use config::{
    ArcProjectionConfig, LocomotionConfig, MovementConfig, TeleportConfig, VignetteConfig,
};
pub use effect::Effect;
pub use input_context::{Hand, Head, InputContext, MovementAxes};
pub use teleport::{
    ArcProjectionStrategy, BallisticArcProjection, CollisionWorld, DestinationMarker,
    DestinationMarkerSystem, NavMeshQuery, ProjectionResult, RayHit, SurfaceValidator,
    TeleportPhase, TeleportStateMachine, TraceChannels,
};
pub use time::Time;
pub use vignette::{
    ComfortCurve, CurveKey, ScreenProjection, VignetteController, VignetteParams,
    VignetteRadiusStrategy,
};
