//! Oriented cylinder construction between two points.
//!
//! The primitive cylinder is assumed to lie along the unit Z axis, centered
//! at the origin, with unit radius and unit length; a [`CylinderPose`]
//! carries everything a host needs to place it between two atoms.

use glam::{DQuat, DVec3};

use crate::error::VizError;

/// The primitive cylinder's long axis.
pub const CYLINDER_AXIS: DVec3 = DVec3::Z;

/// Below this cross-product magnitude the bond direction is treated as
/// (anti)parallel to the primitive axis.
const AXIS_EPSILON: f64 = 1e-3;

/// Placement of a cylinder primitive connecting two points.
///
/// Fully derived from the endpoints and the thickness setting; recomputing
/// with a different thickness changes only `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderPose {
    /// Midpoint between the two endpoints.
    pub position: DVec3,
    /// Rotation taking the primitive Z axis onto the bond direction.
    pub orientation: DQuat,
    /// Distance between the endpoints.
    pub length: f64,
    /// Radial scale (half the bond thickness).
    pub radius: f64,
}

/// Compute the pose of a cylinder connecting `p1` to `p2`.
///
/// The rotation axis is `Z × direction`. When that cross product vanishes
/// the direction is parallel or antiparallel to Z: parallel needs no
/// rotation, while antiparallel gets an explicit 180° flip about X (any
/// axis perpendicular to Z would do; an unrotated cylinder would silently
/// point the wrong way).
///
/// # Errors
///
/// Returns [`VizError::DegenerateBond`] when `p1 == p2`.
pub fn cylinder_between(
    p1: DVec3,
    p2: DVec3,
    thickness: f64,
) -> Result<CylinderPose, VizError> {
    if p1 == p2 {
        return Err(VizError::DegenerateBond(p1));
    }

    let length = p1.distance(p2);
    let direction = (p2 - p1) / length;

    let rotation_axis = CYLINDER_AXIS.cross(direction);
    let orientation = if rotation_axis.length() < AXIS_EPSILON {
        if CYLINDER_AXIS.dot(direction) < 0.0 {
            DQuat::from_axis_angle(DVec3::X, std::f64::consts::PI)
        } else {
            DQuat::IDENTITY
        }
    } else {
        let angle = CYLINDER_AXIS.dot(direction).clamp(-1.0, 1.0).acos();
        DQuat::from_axis_angle(rotation_axis.normalize(), angle)
    };

    Ok(CylinderPose {
        position: (p1 + p2) / 2.0,
        orientation,
        length,
        radius: thickness / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn aligned_with_z_needs_no_rotation() {
        let pose = cylinder_between(
            DVec3::ZERO,
            DVec3::new(0.0, 0.0, 2.0),
            0.4,
        )
        .unwrap();
        assert_eq!(pose.length, 2.0);
        assert_eq!(pose.radius, 0.2);
        assert_eq!(pose.position, DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(pose.orientation, DQuat::IDENTITY);
    }

    #[test]
    fn coincident_endpoints_fail() {
        let err = cylinder_between(DVec3::ZERO, DVec3::ZERO, 0.4);
        assert!(matches!(err, Err(VizError::DegenerateBond(_))));
    }

    #[test]
    fn antiparallel_direction_is_flipped() {
        let pose = cylinder_between(
            DVec3::ZERO,
            DVec3::new(0.0, 0.0, -2.0),
            0.4,
        )
        .unwrap();
        let rotated = pose.orientation * CYLINDER_AXIS;
        assert!(rotated.abs_diff_eq(DVec3::new(0.0, 0.0, -1.0), TOL));
        assert_eq!(pose.length, 2.0);
        assert_eq!(pose.position, DVec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn orientation_maps_axis_onto_bond_direction() {
        let p1 = DVec3::new(1.0, -2.0, 0.5);
        let p2 = DVec3::new(-0.5, 3.0, 2.0);
        let pose = cylinder_between(p1, p2, 0.3).unwrap();

        let direction = (p2 - p1).normalize();
        let rotated = pose.orientation * CYLINDER_AXIS;
        assert!(rotated.abs_diff_eq(direction, TOL));
        assert!((pose.orientation.length() - 1.0).abs() < TOL);
        assert!(pose.position.abs_diff_eq((p1 + p2) / 2.0, TOL));
        assert!((pose.length - p1.distance(p2)).abs() < TOL);
    }

    #[test]
    fn thickness_change_touches_only_radius() {
        let p1 = DVec3::new(0.2, 0.4, -1.0);
        let p2 = DVec3::new(-1.3, 2.2, 0.7);
        let thin = cylinder_between(p1, p2, 0.2).unwrap();
        let thick = cylinder_between(p1, p2, 0.8).unwrap();

        assert_eq!(thin.position, thick.position);
        assert_eq!(thin.orientation, thick.orientation);
        assert_eq!(thin.length, thick.length);
        assert_eq!(thin.radius, 0.1);
        assert_eq!(thick.radius, 0.4);
    }

    #[test]
    fn nearly_parallel_direction_stays_identity() {
        // Cross product magnitude below the epsilon: no rotation rather
        // than an unstable normalize.
        let pose = cylinder_between(
            DVec3::ZERO,
            DVec3::new(1e-5, 0.0, 1.0),
            0.2,
        )
        .unwrap();
        assert_eq!(pose.orientation, DQuat::IDENTITY);
    }
}
