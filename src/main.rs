//! Demo/debug binary: loads a structure and a materials table, drives a
//! logging host, and reports what a real host application would have been
//! asked to create.

use std::path::Path;

use atomviz::engine::Visualizer;
use atomviz::geometry::CylinderPose;
use atomviz::host::SceneHost;
use atomviz::materials::Materials;
use atomviz::options::Options;
use glam::DVec3;

/// A host that only logs the scene calls it receives.
#[derive(Default)]
struct LoggingHost {
    next: u32,
}

impl LoggingHost {
    fn allocate(&mut self) -> u32 {
        self.next += 1;
        self.next
    }
}

impl SceneHost for LoggingHost {
    type Handle = u32;

    fn add_sphere(
        &mut self,
        element: &str,
        index: usize,
        center: DVec3,
        radius: f64,
    ) -> u32 {
        let handle = self.allocate();
        log::debug!(
            "sphere #{handle}: {element}_{index} at {center} radius {radius}"
        );
        handle
    }

    fn add_bond(&mut self, pose: &CylinderPose) -> u32 {
        let handle = self.allocate();
        log::debug!(
            "bond #{handle}: at {} length {:.3} radius {:.3}",
            pose.position,
            pose.length,
            pose.radius
        );
        handle
    }

    fn apply_color(&mut self, handles: &[u32], color: atomviz::color::Rgba) {
        log::debug!("color {color:?} on {} primitives", handles.len());
    }

    fn update_sphere_radius(&mut self, handle: u32, radius: f64) {
        log::debug!("sphere #{handle}: radius -> {radius}");
    }

    fn update_bond(&mut self, handle: u32, pose: &CylinderPose) {
        log::debug!("bond #{handle}: radius -> {:.3}", pose.radius);
    }

    fn remove(&mut self, handle: u32) {
        log::debug!("remove #{handle}");
    }
}

fn run(
    structure_path: &str,
    materials_path: &str,
    options_path: Option<&str>,
) -> Result<(), atomviz::error::VizError> {
    let materials = Materials::load(Path::new(materials_path))?;
    let options = match options_path {
        Some(path) => Options::load(Path::new(path))?,
        None => Options::default(),
    };

    let mut viz = Visualizer::new(LoggingHost::default(), materials, options);
    let contents = std::fs::read_to_string(structure_path)?;
    viz.load_structure(&contents)?;

    if let Some(structure) = viz.structure() {
        log::info!(
            "{} atoms ({}), {} bonds at cutoff {}",
            structure.atoms.len(),
            structure.distinct_elements().join(", "),
            viz.bonds().len(),
            viz.options().geometry.bond_cutoff
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(structure_path), Some(materials_path)) =
        (args.next(), args.next())
    else {
        log::error!("Usage: atomviz <structure.xyz> <materials.json> [options.toml]");
        std::process::exit(1);
    };
    let options_path = args.next();

    if let Err(e) = run(
        &structure_path,
        &materials_path,
        options_path.as_deref(),
    ) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
