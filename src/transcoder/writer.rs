use std::rc::Rc;

use anyhow::{bail, Context};
use log::{debug, error, info, warn};

use crate::config::TranscoderConfig;
use crate::scene_graph::Scene;
use crate::transcoder::builders::{Builder, NodeBuilder};
use crate::transcoder::context::WriterContext;
use crate::transcoder::converters::{
    CameraConverter, Converter, LightConverter, MeshConverter, NodeConverter, RegisteredNodes,
    VisualSceneConverter,
};
use crate::transcoder::error::ParseError;
use crate::transcoder::fw;

/// Callbacks invoked by the loader, once per element, in loading order.
///
/// `start` comes first and `finish` last; after `cancel` nothing else is
/// called. A `write_*` error is reported back through `handle_error`.
pub trait ColladaWriter {
    fn start(&mut self);

    /// Loading stopped and cannot resume.
    fn cancel(&mut self, message: &str);

    /// Returns `true` to stop loading immediately. Critical errors stop
    /// loading whatever this returns.
    fn handle_error(&mut self, error: &ParseError) -> bool;

    fn write_global_asset(&mut self, asset: &fw::FileInfo) -> anyhow::Result<()>;

    fn write_scene(&mut self, scene: &fw::Scene) -> anyhow::Result<()>;

    fn write_visual_scene(&mut self, visual_scene: &fw::VisualScene) -> anyhow::Result<()>;

    fn write_library_nodes(&mut self, library_nodes: &fw::LibraryNodes) -> anyhow::Result<()>;

    fn write_geometry(&mut self, geometry: &fw::Geometry) -> anyhow::Result<()>;

    fn write_material(&mut self, material: &fw::Material) -> anyhow::Result<()>;

    fn write_camera(&mut self, camera: &fw::Camera) -> anyhow::Result<()>;

    fn write_light(&mut self, light: &fw::Light) -> anyhow::Result<()>;

    fn write_controller(&mut self, controller: &fw::Controller) -> anyhow::Result<()>;

    fn finish(&mut self);
}

/// Writes the loaded document into a [`Scene`].
pub struct AssetWriter {
    context: WriterContext,
}

impl AssetWriter {
    pub fn new(config: TranscoderConfig) -> Self {
        Self {
            context: WriterContext::new(config),
        }
    }

    pub fn context(&self) -> &WriterContext {
        &self.context
    }

    pub fn into_scene(self) -> Scene {
        self.context.scene
    }

    fn register_nodes(&mut self, registered: RegisteredNodes) {
        for (id, builder) in registered {
            self.context.libraries.insert_node(id, builder);
        }
    }

    fn selected_visual_scenes(&self) -> Vec<Rc<NodeBuilder>> {
        let libraries = &self.context.libraries;

        if !self.context.config.all_visual_scenes {
            if let Some(id) = self.context.instance_visual_scene {
                match libraries.visual_scenes.get(&id) {
                    Some(root) => return vec![root.clone()],
                    None => warn!(
                        "<scene> instantiates visual scene {} which was not written, attaching all",
                        id
                    ),
                }
            }
        }

        libraries.visual_scenes.values().cloned().collect()
    }
}

impl ColladaWriter for AssetWriter {
    fn start(&mut self) {
        debug!("start");
    }

    fn cancel(&mut self, message: &str) {
        warn!("Import cancelled: {}", message);
        self.context.set_cancelled();
    }

    fn handle_error(&mut self, error: &ParseError) -> bool {
        error!("{}", error);
        false
    }

    fn write_global_asset(&mut self, asset: &fw::FileInfo) -> anyhow::Result<()> {
        debug!(
            "write_global_asset (up axis {:?}, {} m per unit)",
            asset.up_axis, asset.unit_meter
        );

        self.context.up_axis = asset.up_axis;
        self.context.unit_meter = asset.unit_meter;
        self.context.scene.up_axis = asset.up_axis;
        self.context.scene.unit_meter = asset.unit_meter;

        Ok(())
    }

    fn write_scene(&mut self, scene: &fw::Scene) -> anyhow::Result<()> {
        debug!("write_scene");
        self.context.instance_visual_scene = scene.instance_visual_scene;
        Ok(())
    }

    fn write_visual_scene(&mut self, visual_scene: &fw::VisualScene) -> anyhow::Result<()> {
        debug!("write_visual_scene {}", visual_scene.unique_id);

        let mut registered = RegisteredNodes::new();
        let builder = VisualSceneConverter.convert_tree(visual_scene, &self.context, &mut registered);
        self.register_nodes(registered);

        self.context
            .libraries
            .insert_visual_scene(visual_scene.unique_id, Rc::new(builder));

        Ok(())
    }

    fn write_library_nodes(&mut self, library_nodes: &fw::LibraryNodes) -> anyhow::Result<()> {
        debug!("write_library_nodes ({} nodes)", library_nodes.nodes.len());

        let mut registered = RegisteredNodes::new();
        for node in &library_nodes.nodes {
            let builder = NodeConverter.convert_tree(node, &mut registered);
            registered.push((node.unique_id, builder.into()));
        }
        self.register_nodes(registered);

        Ok(())
    }

    fn write_geometry(&mut self, geometry: &fw::Geometry) -> anyhow::Result<()> {
        debug!(
            "write_geometry {}",
            geometry.name.as_deref().unwrap_or_default()
        );

        if let fw::GeometryKind::Unsupported(kind) = geometry.kind {
            bail!(
                "Unsupported geometry type {} for {}",
                kind,
                geometry.original_id.as_deref().unwrap_or("unnamed geometry")
            );
        }

        let mesh = MeshConverter
            .get_node(geometry, &mut self.context)
            .with_context(|| format!("Failed to convert geometry {}", geometry.unique_id))?;
        self.context
            .libraries
            .insert_geometry(geometry.unique_id, mesh);

        Ok(())
    }

    fn write_material(&mut self, material: &fw::Material) -> anyhow::Result<()> {
        debug!("write_material {}", material.unique_id);

        let name = material
            .name
            .clone()
            .or_else(|| material.original_id.clone())
            .unwrap_or_default();
        self.context
            .libraries
            .insert_material(material.unique_id, name);

        Ok(())
    }

    fn write_camera(&mut self, camera: &fw::Camera) -> anyhow::Result<()> {
        debug!("write_camera {}", camera.unique_id);

        let camera_id = CameraConverter.get_node(camera, &mut self.context)?;
        self.context
            .libraries
            .insert_camera(camera.unique_id, camera_id);

        Ok(())
    }

    fn write_light(&mut self, light: &fw::Light) -> anyhow::Result<()> {
        debug!("write_light {}", light.unique_id);

        let light_id = LightConverter.get_node(light, &mut self.context)?;
        self.context
            .libraries
            .insert_light(light.unique_id, light_id);

        Ok(())
    }

    fn write_controller(&mut self, controller: &fw::Controller) -> anyhow::Result<()> {
        debug!(
            "write_controller {} ({:?})",
            controller.unique_id, controller.kind
        );

        match controller.source {
            Some(source) => self
                .context
                .libraries
                .insert_skin(controller.unique_id, source),
            None => bail!("Controller {} has no source", controller.unique_id),
        }

        Ok(())
    }

    fn finish(&mut self) {
        if self.context.is_cancelled() {
            debug!("finish after cancel, nothing to attach");
            return;
        }

        let ctx = &mut self.context;

        // Documents without a visual scene only define geometry; expose each
        // mesh as an untransformed root node.
        if !ctx.has_visual_scenes() {
            let meshes: Vec<_> = ctx.libraries.geometries.values().copied().collect();
            for mesh in meshes {
                let name = ctx
                    .scene
                    .meshes
                    .get(mesh)
                    .map(|model| model.name.clone())
                    .unwrap_or_default();
                let node = ctx.scene.create_child_node(None);
                if let Some(object) = ctx.scene.get_object_mut(node) {
                    object.name = name;
                }
                ctx.scene.set_mesh(node, mesh);
            }
        } else {
            for builder in self.selected_visual_scenes() {
                match builder.build(&mut self.context) {
                    Ok(Some(root)) => self.context.scene.add_child_node(None, root),
                    Ok(None) => {}
                    Err(err) => error!("Failed to build visual scene: {:#}", err),
                }
            }
        }

        let scene = &self.context.scene;
        scene.update_transforms();

        info!(
            "Imported {} nodes ({} roots), {} meshes, {} cameras, {} lights",
            scene.objects.len(),
            scene.root_ids().len(),
            scene.meshes.len(),
            scene.cameras.len(),
            scene.lights.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use glam::{Mat4, Vec3};

    use crate::transcoder::unique_id::{ClassId, UniqueId};

    use super::*;

    fn geometry(object_id: u32, name: &str) -> fw::Geometry {
        fw::Geometry {
            unique_id: UniqueId::new(ClassId::Geometry, object_id),
            original_id: Some(name.to_owned()),
            name: Some(name.to_owned()),
            kind: fw::GeometryKind::Mesh(fw::Mesh {
                primitives: vec![fw::MeshPrimitive {
                    positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
                    ..Default::default()
                }],
            }),
        }
    }

    fn visual_scene(object_id: u32, root_nodes: Vec<fw::Node>) -> fw::VisualScene {
        fw::VisualScene {
            unique_id: UniqueId::new(ClassId::VisualScene, object_id),
            original_id: None,
            name: Some(format!("scene{object_id}")),
            root_nodes,
        }
    }

    #[test]
    fn geometries_without_visual_scene_become_roots() {
        let mut writer = AssetWriter::new(TranscoderConfig::default());
        writer.start();
        writer.write_geometry(&geometry(0, "a")).unwrap();
        writer.write_geometry(&geometry(1, "b")).unwrap();
        writer.finish();

        let scene = writer.into_scene();
        let names: Vec<_> = scene
            .root_ids()
            .iter()
            .map(|&id| scene.get_object(id).unwrap().name.clone())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(scene
            .root_ids()
            .iter()
            .all(|&id| scene.get_object(id).unwrap().mesh_id.is_some()));
    }

    #[test]
    fn unsupported_geometry_is_an_error() {
        let mut writer = AssetWriter::new(TranscoderConfig::default());
        let mut spline = geometry(0, "curve");
        spline.kind = fw::GeometryKind::Unsupported("spline");

        assert!(writer.write_geometry(&spline).is_err());
        assert!(!writer.context().has_geometries());
    }

    #[test]
    fn visual_scene_nodes_reference_geometry() {
        let mut writer = AssetWriter::new(TranscoderConfig::default());
        writer.write_geometry(&geometry(0, "cube")).unwrap();

        let mut node = fw::Node::new(UniqueId::new(ClassId::Node, 0));
        node.name = Some("Cube".to_owned());
        node.transforms.push(Mat4::from_translation(Vec3::Z));
        node.instances.push(UniqueId::new(ClassId::Geometry, 0));
        writer
            .write_visual_scene(&visual_scene(0, vec![node]))
            .unwrap();
        writer.finish();

        let scene = writer.into_scene();
        assert_eq!(scene.root_ids().len(), 1);
        let cube = scene.get_object_by_name("Cube").unwrap();
        assert!(scene.get_object(cube).unwrap().mesh_id.is_some());
        let world = scene.world_matrix(cube).unwrap();
        assert!(world
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn only_the_instantiated_visual_scene_is_attached() {
        let mut writer = AssetWriter::new(TranscoderConfig::default());
        writer.write_visual_scene(&visual_scene(0, Vec::new())).unwrap();
        writer.write_visual_scene(&visual_scene(1, Vec::new())).unwrap();
        writer
            .write_scene(&fw::Scene {
                instance_visual_scene: Some(UniqueId::new(ClassId::VisualScene, 1)),
            })
            .unwrap();
        writer.finish();

        let scene = writer.into_scene();
        assert_eq!(scene.root_ids().len(), 1);
        assert_eq!(scene.get_object(scene.root_ids()[0]).unwrap().name, "scene1");
        assert!(scene.get_object_by_name("scene0").is_none());
        assert_eq!(scene.objects.len(), 1);
    }

    #[test]
    fn all_visual_scenes_can_be_attached() {
        let mut writer = AssetWriter::new(TranscoderConfig {
            all_visual_scenes: true,
            ..Default::default()
        });
        writer.write_visual_scene(&visual_scene(0, Vec::new())).unwrap();
        writer.write_visual_scene(&visual_scene(1, Vec::new())).unwrap();
        writer
            .write_scene(&fw::Scene {
                instance_visual_scene: Some(UniqueId::new(ClassId::VisualScene, 1)),
            })
            .unwrap();
        writer.finish();

        assert_eq!(writer.into_scene().root_ids().len(), 2);
    }

    #[test]
    fn library_nodes_can_be_instantiated_from_visual_scenes() {
        let mut writer = AssetWriter::new(TranscoderConfig::default());
        let mut wheel = fw::Node::new(UniqueId::new(ClassId::Node, 0));
        wheel.name = Some("wheel".to_owned());
        writer
            .write_library_nodes(&fw::LibraryNodes { nodes: vec![wheel] })
            .unwrap();

        let mut car = fw::Node::new(UniqueId::new(ClassId::Node, 1));
        car.name = Some("car".to_owned());
        car.instances = vec![UniqueId::new(ClassId::Node, 0); 4];
        writer.write_visual_scene(&visual_scene(0, vec![car])).unwrap();
        writer.finish();

        let scene = writer.into_scene();
        let car = scene.get_object_by_name("car").unwrap();
        assert_eq!(scene.get_object(car).unwrap().child_ids.len(), 4);
    }

    #[test]
    fn controllers_need_a_source() {
        let mut writer = AssetWriter::new(TranscoderConfig::default());
        let controller = fw::Controller {
            unique_id: UniqueId::new(ClassId::Controller, 0),
            original_id: None,
            kind: fw::ControllerKind::Skin,
            source: None,
        };

        assert!(writer.write_controller(&controller).is_err());
    }

    #[test]
    fn cancel_marks_the_context() {
        let mut writer = AssetWriter::new(TranscoderConfig::default());
        writer.cancel("stop");
        assert!(writer.context().is_cancelled());
        assert!(!writer.handle_error(&ParseError::warning("noise")));
    }

    #[test]
    fn finish_after_cancel_attaches_nothing() {
        let mut writer = AssetWriter::new(TranscoderConfig::default());
        writer.write_geometry(&geometry(0, "a")).unwrap();
        writer.cancel("stop");
        writer.finish();

        assert!(writer.into_scene().root_ids().is_empty());
    }
}
