use std::collections::BTreeMap;
use std::rc::Rc;

use log::warn;

use crate::camera::CameraId;
use crate::config::TranscoderConfig;
use crate::light::LightId;
use crate::model::ModelId;
use crate::scene_graph::{Scene, UpAxis};
use crate::transcoder::builders::node_builder::NodeBuilder;
use crate::transcoder::unique_id::UniqueId;

/// Converted elements keyed by the identifier the loader assigned them.
/// Ordered maps keep iteration in allocation order.
#[derive(Default)]
pub struct Libraries {
    pub geometries: BTreeMap<UniqueId, ModelId>,
    pub materials: BTreeMap<UniqueId, String>,
    pub cameras: BTreeMap<UniqueId, CameraId>,
    pub lights: BTreeMap<UniqueId, LightId>,
    /// Controller to the geometry (or controller) it deforms.
    pub skins: BTreeMap<UniqueId, UniqueId>,
    pub nodes: BTreeMap<UniqueId, Rc<NodeBuilder>>,
    /// Visual scene roots, built in `finish` once the instantiated one is known.
    pub visual_scenes: BTreeMap<UniqueId, Rc<NodeBuilder>>,
}

fn insert_unique<V>(library: &mut BTreeMap<UniqueId, V>, id: UniqueId, value: V, kind: &str) {
    if library.insert(id, value).is_some() {
        warn!("{} {} defined more than once, keeping the last definition", kind, id);
    }
}

impl Libraries {
    pub fn insert_geometry(&mut self, id: UniqueId, mesh: ModelId) {
        insert_unique(&mut self.geometries, id, mesh, "Geometry");
    }

    pub fn insert_material(&mut self, id: UniqueId, name: String) {
        insert_unique(&mut self.materials, id, name, "Material");
    }

    pub fn insert_camera(&mut self, id: UniqueId, camera: CameraId) {
        insert_unique(&mut self.cameras, id, camera, "Camera");
    }

    pub fn insert_light(&mut self, id: UniqueId, light: LightId) {
        insert_unique(&mut self.lights, id, light, "Light");
    }

    pub fn insert_skin(&mut self, id: UniqueId, source: UniqueId) {
        insert_unique(&mut self.skins, id, source, "Controller");
    }

    pub fn insert_node(&mut self, id: UniqueId, node: Rc<NodeBuilder>) {
        insert_unique(&mut self.nodes, id, node, "Node");
    }

    pub fn insert_visual_scene(&mut self, id: UniqueId, root: Rc<NodeBuilder>) {
        insert_unique(&mut self.visual_scenes, id, root, "Visual scene");
    }
}

/// State shared by the writer callbacks for one import.
pub struct WriterContext {
    pub scene: Scene,
    pub libraries: Libraries,
    pub config: TranscoderConfig,
    pub up_axis: UpAxis,
    pub unit_meter: f32,
    pub instance_visual_scene: Option<UniqueId>,
    cancelled: bool,
}

impl WriterContext {
    pub fn new(config: TranscoderConfig) -> Self {
        Self {
            scene: Scene::new(),
            libraries: Libraries::default(),
            config,
            up_axis: UpAxis::Y,
            unit_meter: 1.0,
            instance_visual_scene: None,
            cancelled: false,
        }
    }

    pub fn has_geometries(&self) -> bool {
        !self.libraries.geometries.is_empty()
    }

    pub fn has_visual_scenes(&self) -> bool {
        !self.libraries.visual_scenes.is_empty()
    }

    pub fn set_cancelled(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}
