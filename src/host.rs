//! The seam between the pipeline and the host 3D application.
//!
//! The core never touches scene-graph objects directly: the engine asks the
//! host to create, recolor, reshape, and remove primitives through this
//! trait, and keeps its own index from element symbols and bonds to the
//! returned handles. Host-side concerns (collections, materials, object
//! naming) stay entirely on the host's side of the trait.

use glam::DVec3;

use crate::color::Rgba;
use crate::geometry::CylinderPose;

/// Scene operations a host application must provide.
///
/// Handles are opaque to the engine; it only stores and replays them. A
/// host backed by a real scene graph maps them to object IDs, a test host
/// maps them to table keys.
pub trait SceneHost {
    /// Opaque identifier for a created primitive.
    type Handle: Copy + Eq;

    /// Create a sphere primitive for atom `index` of element `element`.
    fn add_sphere(
        &mut self,
        element: &str,
        index: usize,
        center: DVec3,
        radius: f64,
    ) -> Self::Handle;

    /// Create a cylinder primitive for a bond with the given pose.
    fn add_bond(&mut self, pose: &CylinderPose) -> Self::Handle;

    /// Apply one color to a group of primitives.
    fn apply_color(&mut self, handles: &[Self::Handle], color: Rgba);

    /// Change the radius of an existing sphere.
    fn update_sphere_radius(&mut self, handle: Self::Handle, radius: f64);

    /// Re-pose an existing bond cylinder.
    fn update_bond(&mut self, handle: Self::Handle, pose: &CylinderPose);

    /// Remove a primitive from the scene.
    fn remove(&mut self, handle: Self::Handle);
}
