// Arc-based blink teleportation.
//
// Targeting projects a ballistic arc from the aiming hand every tick and
// validates the landing point against the navigation mesh. A committed
// request fades the view out, relocates when the fade deadline fires, and
// snaps the fade back off.

pub mod arc_projector;
pub mod marker;
pub mod state_machine;
pub mod surface_validator;

pub use arc_projector::{
    ArcProjectionStrategy, BallisticArcProjection, CollisionWorld, ProjectionResult, RayHit,
    TraceChannels,
};
pub use marker::{DestinationMarker, DestinationMarkerSystem};
pub use state_machine::{TeleportPhase, TeleportStateMachine};
pub use surface_validator::{NavMeshQuery, SurfaceValidator};
