//! The orchestration layer driving a [`SceneHost`].
//!
//! [`Visualizer`] owns all session state: the materials table, the
//! interactive options, and (once a structure is loaded) the parsed atoms,
//! the color table, the detected bonds, and the indices from elements and
//! bonds to host handles. The core modules stay pure; every recompute
//! (cutoff change, thickness change, radius change) flows through `&mut
//! self` here, which serializes recomputation against rendering by
//! construction.

use rustc_hash::FxHashMap;

use crate::bonds::{self, Bond};
use crate::color::{self, ColorTable};
use crate::elements;
use crate::error::VizError;
use crate::geometry;
use crate::host::SceneHost;
use crate::materials::Materials;
use crate::options::Options;
use crate::structure::Structure;

/// Session state for one loaded structure.
struct Loaded<Handle> {
    structure: Structure,
    colors: ColorTable,
    atom_handles: Vec<Handle>,
    /// Element symbol → sphere handles, for group recoloring/rescaling.
    element_index: FxHashMap<String, Vec<Handle>>,
    /// Bonds that produced a primitive, index-aligned with `bond_handles`.
    bonds: Vec<Bond>,
    bond_handles: Vec<Handle>,
}

/// Drives a host scene from parsed structures and interactive settings.
pub struct Visualizer<H: SceneHost> {
    host: H,
    materials: Materials,
    options: Options,
    loaded: Option<Loaded<H::Handle>>,
}

impl<H: SceneHost> Visualizer<H> {
    /// Create a visualizer over a host with the given materials and
    /// options.
    pub fn new(host: H, materials: Materials, options: Options) -> Self {
        Self {
            host,
            materials,
            options,
            loaded: None,
        }
    }

    /// Load a structure from text, replacing any previously loaded one.
    ///
    /// Parses, validates every element against the materials table, assigns
    /// colors, detects bonds, then rebuilds the host scene: one sphere per
    /// atom, one cylinder per bond, one color per element group. On error
    /// the previously loaded scene is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::MalformedInput`] for unparsable text and
    /// [`VizError::UnknownElement`] for an element missing from the
    /// materials table or the canonical color vocabulary.
    pub fn load_structure(&mut self, contents: &str) -> Result<(), VizError> {
        let structure = Structure::parse(contents)?;
        let elements = structure.distinct_elements();
        for element in &elements {
            if !elements::is_known(element) || !self.materials.has_entry(element)
            {
                return Err(VizError::UnknownElement(element.clone()));
            }
        }
        let colors = color::assign_colors(&elements)?;
        let rules = self.materials.bond_rules();
        let detected = bonds::detect(
            &structure.atoms,
            &rules,
            self.options.geometry.bond_cutoff,
        )?;

        // Everything derivable has been computed; only now touch the scene.
        self.clear_scene();

        let mut atom_handles = Vec::with_capacity(structure.atoms.len());
        let mut element_index: FxHashMap<String, Vec<H::Handle>> =
            FxHashMap::default();
        for (index, atom) in structure.atoms.iter().enumerate() {
            let radius = self.element_radius(&atom.element);
            let handle =
                self.host.add_sphere(&atom.element, index, atom.position, radius);
            atom_handles.push(handle);
            element_index
                .entry(atom.element.clone())
                .or_default()
                .push(handle);
        }

        let (kept_bonds, bond_handles) = build_bond_primitives(
            &mut self.host,
            detected,
            self.options.geometry.bond_thickness,
        );

        for element in &elements {
            if let (Some(handles), Some(&color_value)) =
                (element_index.get(element), colors.get(element))
            {
                self.host.apply_color(handles, color_value);
            }
        }

        log::info!(
            "loaded structure: {} atoms, {} elements, {} bonds",
            structure.atoms.len(),
            elements.len(),
            kept_bonds.len()
        );

        self.loaded = Some(Loaded {
            structure,
            colors,
            atom_handles,
            element_index,
            bonds: kept_bonds,
            bond_handles,
        });
        Ok(())
    }

    /// Change the bond cutoff distance and rebuild the bond set.
    ///
    /// Bond primitives are removed wholesale and re-created from a fresh
    /// detection pass; atom spheres are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::UnknownElement`] if the materials table no
    /// longer covers an element of the loaded structure.
    pub fn set_cutoff(&mut self, cutoff: f64) -> Result<(), VizError> {
        self.options.geometry.bond_cutoff = cutoff;
        let rules = self.materials.bond_rules();
        let thickness = self.options.geometry.bond_thickness;

        let host = &mut self.host;
        let Some(loaded) = self.loaded.as_mut() else {
            return Ok(());
        };

        let detected =
            bonds::detect(&loaded.structure.atoms, &rules, cutoff)?;
        for handle in loaded.bond_handles.drain(..) {
            host.remove(handle);
        }
        let (kept_bonds, bond_handles) =
            build_bond_primitives(host, detected, thickness);

        log::debug!(
            "cutoff {cutoff}: {} bonds after recompute",
            kept_bonds.len()
        );
        loaded.bonds = kept_bonds;
        loaded.bond_handles = bond_handles;
        Ok(())
    }

    /// Change the bond thickness, re-posing existing bond cylinders.
    ///
    /// A thickness-only recompute changes each pose's radius and nothing
    /// else, so the bond set itself is kept.
    ///
    /// # Errors
    ///
    /// Propagates [`VizError::DegenerateBond`]; unreachable for bonds that
    /// already produced a primitive.
    pub fn set_thickness(&mut self, thickness: f64) -> Result<(), VizError> {
        self.options.geometry.bond_thickness = thickness;

        let host = &mut self.host;
        let Some(loaded) = self.loaded.as_ref() else {
            return Ok(());
        };
        for (bond, &handle) in loaded.bonds.iter().zip(&loaded.bond_handles) {
            let pose =
                geometry::cylinder_between(bond.pos_a, bond.pos_b, thickness)?;
            host.update_bond(handle, &pose);
        }
        Ok(())
    }

    /// Override the sphere radius for one element and rescale its spheres.
    pub fn set_element_radius(&mut self, element: &str, radius: f64) {
        let _ = self
            .options
            .geometry
            .radius_overrides
            .insert(element.to_owned(), radius);

        let host = &mut self.host;
        if let Some(loaded) = self.loaded.as_ref() {
            if let Some(handles) = loaded.element_index.get(element) {
                for &handle in handles {
                    host.update_sphere_radius(handle, radius);
                }
            }
        }
    }

    /// The loaded structure, if any.
    pub fn structure(&self) -> Option<&Structure> {
        self.loaded.as_ref().map(|l| &l.structure)
    }

    /// The bonds currently represented in the scene.
    pub fn bonds(&self) -> &[Bond] {
        self.loaded.as_ref().map_or(&[], |l| l.bonds.as_slice())
    }

    /// The color table of the loaded structure, if any.
    pub fn color_table(&self) -> Option<&ColorTable> {
        self.loaded.as_ref().map(|l| &l.colors)
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Borrow the host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Consume the visualizer, returning the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// Effective sphere radius for an element: interactive override first,
    /// then the materials table.
    fn element_radius(&self, element: &str) -> f64 {
        self.options
            .geometry
            .radius_overrides
            .get(element)
            .copied()
            .or_else(|| self.materials.radius(element))
            .unwrap_or(1.0)
    }

    /// Remove every primitive of the previously loaded structure.
    fn clear_scene(&mut self) {
        let host = &mut self.host;
        if let Some(loaded) = self.loaded.take() {
            for handle in loaded.atom_handles {
                host.remove(handle);
            }
            for handle in loaded.bond_handles {
                host.remove(handle);
            }
        }
    }
}

/// Create a cylinder primitive per bond, skipping (with a warning) bonds
/// whose endpoints coincide. Returns the kept bonds and their handles,
/// index-aligned.
fn build_bond_primitives<H: SceneHost>(
    host: &mut H,
    detected: Vec<Bond>,
    thickness: f64,
) -> (Vec<Bond>, Vec<H::Handle>) {
    let mut kept = Vec::with_capacity(detected.len());
    let mut handles = Vec::with_capacity(detected.len());
    for bond in detected {
        match geometry::cylinder_between(bond.pos_a, bond.pos_b, thickness) {
            Ok(pose) => {
                handles.push(host.add_bond(&pose));
                kept.push(bond);
            }
            Err(e) => {
                log::warn!(
                    "skipping bond {}-{}: {e}",
                    bond.atom_a,
                    bond.atom_b
                );
            }
        }
    }
    (kept, handles)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use glam::DVec3;

    use super::*;
    use crate::color::Rgba;
    use crate::geometry::CylinderPose;

    struct SphereRecord {
        element: String,
        center: DVec3,
        radius: f64,
    }

    /// Test double that records every scene call.
    #[derive(Default)]
    struct RecordingHost {
        next: u32,
        spheres: HashMap<u32, SphereRecord>,
        bonds: HashMap<u32, CylinderPose>,
        colors: HashMap<u32, Rgba>,
        removed: Vec<u32>,
    }

    impl RecordingHost {
        fn allocate(&mut self) -> u32 {
            self.next += 1;
            self.next
        }
    }

    impl SceneHost for RecordingHost {
        type Handle = u32;

        fn add_sphere(
            &mut self,
            element: &str,
            _index: usize,
            center: DVec3,
            radius: f64,
        ) -> u32 {
            let handle = self.allocate();
            let _ = self.spheres.insert(
                handle,
                SphereRecord {
                    element: element.to_owned(),
                    center,
                    radius,
                },
            );
            handle
        }

        fn add_bond(&mut self, pose: &CylinderPose) -> u32 {
            let handle = self.allocate();
            let _ = self.bonds.insert(handle, *pose);
            handle
        }

        fn apply_color(&mut self, handles: &[u32], color: Rgba) {
            for &handle in handles {
                let _ = self.colors.insert(handle, color);
            }
        }

        fn update_sphere_radius(&mut self, handle: u32, radius: f64) {
            if let Some(record) = self.spheres.get_mut(&handle) {
                record.radius = radius;
            }
        }

        fn update_bond(&mut self, handle: u32, pose: &CylinderPose) {
            let _ = self.bonds.insert(handle, *pose);
        }

        fn remove(&mut self, handle: u32) {
            let _ = self.spheres.remove(&handle);
            let _ = self.bonds.remove(&handle);
            let _ = self.colors.remove(&handle);
            self.removed.push(handle);
        }
    }

    const MATERIALS: &str = r#"{
        "atom_info": {
            "H": { "radius": 0.37 },
            "O": { "radius": 0.73 }
        },
        "bond_info": {
            "H": ["H", "O"],
            "O": []
        }
    }"#;

    const WATERISH: &str = "3\nwater-ish\nO 0 0 0\nH 0 0 0.9\nH 0.9 0 0\n";

    fn visualizer() -> Visualizer<RecordingHost> {
        Visualizer::new(
            RecordingHost::default(),
            Materials::from_json(MATERIALS).unwrap(),
            Options::default(),
        )
    }

    #[test]
    fn load_creates_spheres_bonds_and_colors() {
        let mut viz = visualizer();
        viz.load_structure(WATERISH).unwrap();

        let host = viz.host();
        assert_eq!(host.spheres.len(), 3);
        // O-H, O-H, H-H all within the default cutoff of 3.0
        assert_eq!(host.bonds.len(), 3);
        assert_eq!(viz.bonds().len(), 3);

        for (handle, record) in &host.spheres {
            let expected = if record.element == "O" {
                [1.0, 0.0, 0.0, 1.0]
            } else {
                [1.0, 1.0, 1.0, 1.0]
            };
            assert_eq!(host.colors[handle], expected);
        }

        // Sphere radii come from the materials table
        let o_sphere = host
            .spheres
            .values()
            .find(|r| r.element == "O")
            .unwrap();
        assert_eq!(o_sphere.radius, 0.73);
        assert_eq!(o_sphere.center, DVec3::ZERO);
    }

    #[test]
    fn set_cutoff_rebuilds_only_bonds() {
        let mut viz = visualizer();
        viz.load_structure(WATERISH).unwrap();
        assert_eq!(viz.bonds().len(), 3);

        // Shrinking the cutoff drops the H-H pair (separation ~1.27)
        viz.set_cutoff(1.0).unwrap();
        assert_eq!(viz.bonds().len(), 2);
        assert_eq!(viz.host().bonds.len(), 2);
        assert_eq!(viz.host().spheres.len(), 3);
        assert_eq!(viz.options().geometry.bond_cutoff, 1.0);

        // Growing it back restores all three
        viz.set_cutoff(3.0).unwrap();
        assert_eq!(viz.bonds().len(), 3);
    }

    #[test]
    fn set_thickness_changes_only_pose_radius() {
        let mut viz = visualizer();
        viz.load_structure(WATERISH).unwrap();

        let before: HashMap<u32, CylinderPose> = viz.host().bonds.clone();
        viz.set_thickness(0.5).unwrap();
        let after = &viz.host().bonds;

        assert_eq!(before.len(), after.len());
        for (handle, old) in &before {
            let new = &after[handle];
            assert_eq!(new.position, old.position);
            assert_eq!(new.orientation, old.orientation);
            assert_eq!(new.length, old.length);
            assert_eq!(new.radius, 0.25);
        }
        assert_eq!(viz.options().geometry.bond_thickness, 0.5);
    }

    #[test]
    fn set_element_radius_rescales_matching_spheres() {
        let mut viz = visualizer();
        viz.load_structure(WATERISH).unwrap();

        viz.set_element_radius("H", 2.0);
        for record in viz.host().spheres.values() {
            if record.element == "H" {
                assert_eq!(record.radius, 2.0);
            } else {
                assert_eq!(record.radius, 0.73);
            }
        }
        assert_eq!(viz.options().geometry.radius_overrides["H"], 2.0);
    }

    #[test]
    fn radius_override_survives_reload() {
        let mut viz = visualizer();
        viz.set_element_radius("H", 1.5);
        viz.load_structure(WATERISH).unwrap();
        for record in viz.host().spheres.values() {
            if record.element == "H" {
                assert_eq!(record.radius, 1.5);
            }
        }
    }

    #[test]
    fn reload_removes_previous_primitives() {
        let mut viz = visualizer();
        viz.load_structure(WATERISH).unwrap();
        let first_count =
            viz.host().spheres.len() + viz.host().bonds.len();
        assert_eq!(first_count, 6);

        viz.load_structure("1\nlone hydrogen\nH 0 0 0\n").unwrap();
        let host = viz.host();
        assert_eq!(host.spheres.len(), 1);
        assert!(host.bonds.is_empty());
        assert_eq!(host.removed.len(), 6);
    }

    #[test]
    fn element_without_materials_entry_fails() {
        let mut viz = visualizer();
        let err = viz.load_structure("1\nnitrogen\nN 0 0 0\n");
        assert!(matches!(err, Err(VizError::UnknownElement(_))));
    }

    #[test]
    fn non_canonical_symbol_fails_despite_materials_entry() {
        // A materials file may carry arbitrary keys; the structure's
        // symbols must still belong to the element vocabulary.
        let materials = r#"{
            "atom_info": { "Xq": { "radius": 1.0 } },
            "bond_info": { "Xq": [] }
        }"#;
        let mut viz = Visualizer::new(
            RecordingHost::default(),
            Materials::from_json(materials).unwrap(),
            Options::default(),
        );
        let err = viz.load_structure("1\nnot an element\nXq 0 0 0\n");
        assert!(matches!(err, Err(VizError::UnknownElement(_))));
        assert!(viz.structure().is_none());
    }

    #[test]
    fn failed_load_leaves_previous_scene_intact() {
        let mut viz = visualizer();
        viz.load_structure(WATERISH).unwrap();

        let err = viz.load_structure("2\ntruncated\nH 0 0 0\n");
        assert!(matches!(err, Err(VizError::MalformedInput(_))));
        assert!(viz.structure().is_some());
        assert_eq!(viz.host().spheres.len(), 3);
        assert_eq!(viz.bonds().len(), 3);
    }

    #[test]
    fn coincident_atoms_skip_bond_primitive() {
        let mut viz = visualizer();
        // Two atoms at the same position: bonded by distance 0, but no
        // cylinder can be oriented between them.
        viz.load_structure("2\noverlap\nH 0 0 0\nH 0 0 0\n").unwrap();
        assert!(viz.host().bonds.is_empty());
        assert!(viz.bonds().is_empty());
        assert_eq!(viz.host().spheres.len(), 2);
    }
}
