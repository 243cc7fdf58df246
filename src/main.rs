use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use log::info;

use dae_transcoder::{import_dae_from_file, Scene, TranscoderConfig, TransformMode};

/// Imports a COLLADA document and prints the resulting scene graph.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to a .dae file
    path: PathBuf,

    /// Attach every node directly under its visual scene root
    #[arg(long)]
    flatten: bool,

    /// Keep the document's up axis instead of converting to Y-up
    #[arg(long)]
    no_axis_fix: bool,

    /// Scale the scene by the document's unit
    #[arg(long)]
    unit_scale: bool,

    /// Skip tangent generation
    #[arg(long)]
    no_tangents: bool,

    /// Attach every visual scene, not only the instantiated one
    #[arg(long)]
    all_scenes: bool,
}

impl Args {
    fn config(&self) -> TranscoderConfig {
        TranscoderConfig {
            transform_mode: if self.flatten {
                TransformMode::Flatten
            } else {
                TransformMode::Preserve
            },
            convert_up_axis: !self.no_axis_fix,
            apply_unit_scale: self.unit_scale,
            generate_tangents: !self.no_tangents,
            all_visual_scenes: self.all_scenes,
            ..Default::default()
        }
    }
}

fn print_scene(scene: &Scene) {
    scene.walk(|object_id, object, depth| {
        let mut attachments = Vec::new();
        if let Some(mesh) = object.mesh_id.and_then(|id| scene.meshes.get(id)) {
            attachments.push(format!(
                "mesh {} ({} triangles)",
                mesh.name,
                mesh.num_triangles()
            ));
        }
        if let Some(camera) = object.camera_id.and_then(|id| scene.cameras.get(id)) {
            attachments.push(format!("camera {}", camera.name));
        }
        if let Some(light) = object.light_id.and_then(|id| scene.lights.get(id)) {
            attachments.push(format!("light {}", light.name));
        }

        let translation = scene
            .world_matrix(object_id)
            .map(|matrix| matrix.w_axis.truncate())
            .unwrap_or_default();

        println!(
            "{:indent$}{} @ [{:.3}, {:.3}, {:.3}] {}",
            "",
            object.name,
            translation.x,
            translation.y,
            translation.z,
            attachments.iter().join(", "),
            indent = depth * 2
        );
    });
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let args = Args::parse();
    let scene = import_dae_from_file(&args.path, &args.config())?;

    info!(
        "{} objects, {} meshes, {} cameras, {} lights",
        scene.objects.len(),
        scene.meshes.len(),
        scene.cameras.len(),
        scene.lights.len()
    );

    print_scene(&scene);

    Ok(())
}
