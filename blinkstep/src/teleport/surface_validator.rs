use cgmath::Vector3;
use tracing::trace;

use crate::config::TeleportConfig;

/// Navigation-mesh point projection provided by the host engine.
pub trait NavMeshQuery {
    /// Project `point` onto the navmesh, searching an axis-aligned box of
    /// half-size `extents` around it.
    fn project_point(&self, point: Vector3<f32>, extents: Vector3<f32>) -> Option<Vector3<f32>>;
}

/// Validates teleport landing points against the navigation mesh.
pub struct SurfaceValidator {
    tolerance: Vector3<f32>,
}

impl SurfaceValidator {
    pub fn new(tolerance: Vector3<f32>) -> Self {
        SurfaceValidator { tolerance }
    }

    pub fn from_config(config: &TeleportConfig) -> Self {
        Self::new(config.nav_tolerance)
    }

    /// True iff a navigation system exists and `point` projects onto it
    /// within the tolerance box. A missing navigation system degrades to
    /// "not navigable".
    pub fn is_navigable(&self, nav_mesh: Option<&dyn NavMeshQuery>, point: Vector3<f32>) -> bool {
        match nav_mesh {
            Some(nav_mesh) => nav_mesh.project_point(point, self.tolerance).is_some(),
            None => {
                trace!("No navigation system; treating {:?} as not navigable", point);
                false
            }
        }
    }
}
