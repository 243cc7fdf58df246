use std::rc::Rc;

use glam::Mat4;
use log::{debug, warn};

use crate::camera::CameraId;
use crate::config::TransformMode;
use crate::light::LightId;
use crate::model::ModelId;
use crate::scene_graph::{Object3D, ObjectId, Scene};
use crate::transcoder::builders::Builder;
use crate::transcoder::context::{Libraries, WriterContext};
use crate::transcoder::unique_id::{ClassId, UniqueId};

/// Ids of the nodes between the build root and the node being built.
pub type CircularMap = Vec<UniqueId>;

/// Where a node tree is materialized.
pub struct BuildTarget<'a> {
    pub scene: &'a mut Scene,
    pub libraries: &'a Libraries,
    pub transform_mode: TransformMode,
    /// Nodes are no longer created once the scene holds this many objects.
    pub max_nodes: usize,
    flatten_root: Option<ObjectId>,
    limit_reached: bool,
}

impl<'a> BuildTarget<'a> {
    pub fn new(scene: &'a mut Scene, libraries: &'a Libraries, transform_mode: TransformMode) -> Self {
        Self {
            scene,
            libraries,
            transform_mode,
            max_nodes: usize::MAX,
            flatten_root: None,
            limit_reached: false,
        }
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    fn is_full(&mut self) -> bool {
        if self.scene.objects.len() < self.max_nodes {
            return false;
        }
        if !self.limit_reached {
            warn!(
                "Scene reached {} objects, remaining node instances are skipped",
                self.max_nodes
            );
            self.limit_reached = true;
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct NodeBuilder {
    id: Option<UniqueId>,
    original_id: Option<String>,
    name: Option<String>,
    instances: Vec<UniqueId>,
    transforms: Vec<Mat4>,
    children: Vec<Rc<NodeBuilder>>,
    mesh: Option<ModelId>,
    camera: Option<CameraId>,
    light: Option<LightId>,
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: UniqueId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_original_id(mut self, original_id: impl Into<String>) -> Self {
        self.original_id = Some(original_id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Geometry, controller, camera, light or node to instantiate. Resolved
    /// against the libraries at build time.
    pub fn with_instance(mut self, id: UniqueId) -> Self {
        self.instances.push(id);
        self
    }

    /// Appends to the transformation stack; the first transform is outermost.
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn with_child(mut self, child: Rc<NodeBuilder>) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_mesh(mut self, mesh: ModelId) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_camera(mut self, camera: CameraId) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_light(mut self, light: LightId) -> Self {
        self.light = Some(light);
        self
    }

    pub fn id(&self) -> Option<UniqueId> {
        self.id
    }

    pub fn local_matrix(&self) -> Mat4 {
        self.transforms
            .iter()
            .fold(Mat4::IDENTITY, |matrix, transform| matrix * *transform)
    }

    fn display_name(&self) -> String {
        match (&self.name, &self.original_id, self.id) {
            (Some(name), _, _) => name.clone(),
            (None, Some(original_id), _) => original_id.clone(),
            (None, None, Some(id)) => id.to_string(),
            (None, None, None) => "Unnamed".to_owned(),
        }
    }

    /// Materializes this node and everything below it.
    ///
    /// `accumulated` is the transform from the flatten root down to `parent`
    /// and is only meaningful in [`TransformMode::Flatten`]. A node already on
    /// `path` would instantiate its own ancestor; it is skipped and `None`
    /// returned, the rest of the tree still builds.
    pub fn build_with_path(
        &self,
        target: &mut BuildTarget,
        parent: Option<ObjectId>,
        accumulated: Mat4,
        path: &mut CircularMap,
    ) -> Option<ObjectId> {
        if target.is_full() {
            return None;
        }

        if let Some(id) = self.id {
            if path.contains(&id) {
                warn!(
                    "Node {} instantiates one of its own ancestors, skipping it",
                    self.display_name()
                );
                return None;
            }
            path.push(id);
        }

        let object_id = target.scene.add_object(Object3D {
            name: self.display_name(),
            original_id: self.original_id.clone(),
            ..Default::default()
        });

        let local = self.local_matrix();
        let child_accumulated = match (target.transform_mode, target.flatten_root) {
            (TransformMode::Flatten, Some(root)) => {
                let matrix = accumulated * local;
                target.scene.add_child_node(Some(root), object_id);
                target.scene.set_object_transform(object_id, matrix);
                matrix
            }
            (transform_mode, _) => {
                if let Some(parent) = parent {
                    target.scene.add_child_node(Some(parent), object_id);
                }
                target.scene.set_object_transform(object_id, local);
                if transform_mode == TransformMode::Flatten {
                    target.flatten_root = Some(object_id);
                }
                Mat4::IDENTITY
            }
        };

        if let Some(mesh) = self.mesh {
            self.attach_mesh(target, object_id, mesh);
        }
        if let Some(camera) = self.camera {
            self.attach_camera(target, object_id, camera);
        }
        if let Some(light) = self.light {
            self.attach_light(target, object_id, light);
        }

        for &instance in &self.instances {
            self.attach_instance(target, object_id, instance, child_accumulated, path);
        }

        for child in &self.children {
            child.build_with_path(target, Some(object_id), child_accumulated, path);
        }

        if self.id.is_some() {
            path.pop();
        }

        Some(object_id)
    }

    fn attach_instance(
        &self,
        target: &mut BuildTarget,
        object_id: ObjectId,
        instance: UniqueId,
        accumulated: Mat4,
        path: &mut CircularMap,
    ) {
        let libraries = target.libraries;

        match instance.class {
            ClassId::Geometry => match libraries.geometries.get(&instance) {
                Some(&mesh) => self.attach_mesh(target, object_id, mesh),
                None => warn!(
                    "{}: geometry {} is not in the library",
                    self.display_name(),
                    instance
                ),
            },
            ClassId::Controller => match resolve_controller(libraries, instance) {
                Some(mesh) => self.attach_mesh(target, object_id, mesh),
                None => warn!(
                    "{}: controller {} does not resolve to a geometry",
                    self.display_name(),
                    instance
                ),
            },
            ClassId::Camera => match libraries.cameras.get(&instance) {
                Some(&camera) => self.attach_camera(target, object_id, camera),
                None => warn!(
                    "{}: camera {} is not in the library",
                    self.display_name(),
                    instance
                ),
            },
            ClassId::Light => match libraries.lights.get(&instance) {
                Some(&light) => self.attach_light(target, object_id, light),
                None => warn!(
                    "{}: light {} is not in the library",
                    self.display_name(),
                    instance
                ),
            },
            ClassId::Node => match libraries.nodes.get(&instance) {
                Some(node) => {
                    debug!("{}: instantiating node {}", self.display_name(), instance);
                    node.build_with_path(target, Some(object_id), accumulated, path);
                }
                None => warn!(
                    "{}: node {} is not in the library",
                    self.display_name(),
                    instance
                ),
            },
            ClassId::Material | ClassId::VisualScene => warn!(
                "{}: {} cannot be instantiated by a node",
                self.display_name(),
                instance
            ),
        }
    }

    fn attach_mesh(&self, target: &mut BuildTarget, object_id: ObjectId, mesh: ModelId) {
        let holder = self.free_slot(target, object_id, |object| object.mesh_id.is_some());
        target.scene.set_mesh(holder, mesh);
    }

    fn attach_camera(&self, target: &mut BuildTarget, object_id: ObjectId, camera: CameraId) {
        let holder = self.free_slot(target, object_id, |object| object.camera_id.is_some());
        target.scene.set_camera(holder, camera);
    }

    fn attach_light(&self, target: &mut BuildTarget, object_id: ObjectId, light: LightId) {
        let holder = self.free_slot(target, object_id, |object| object.light_id.is_some());
        target.scene.set_light(holder, light);
    }

    /// A node holds one mesh, camera and light. Further instances of the same
    /// kind go to an extra node placed where this one is.
    fn free_slot(
        &self,
        target: &mut BuildTarget,
        object_id: ObjectId,
        occupied: impl Fn(&Object3D) -> bool,
    ) -> ObjectId {
        let is_occupied = target.scene.get_object(object_id).is_some_and(&occupied);
        if !is_occupied {
            return object_id;
        }

        let holder = target
            .scene
            .add_object(Object3D::named(format!("{}_instance", self.display_name())));

        match (target.transform_mode, target.flatten_root) {
            (TransformMode::Flatten, Some(root)) if root != object_id => {
                let matrix = target
                    .scene
                    .get_object(object_id)
                    .map(|object| *object.transform.get_local_matrix())
                    .unwrap_or(Mat4::IDENTITY);
                target.scene.add_child_node(Some(root), holder);
                target.scene.set_object_transform(holder, matrix);
            }
            _ => target.scene.add_child_node(Some(object_id), holder),
        }

        holder
    }
}

/// Follows controller sources until a geometry is reached.
fn resolve_controller(libraries: &Libraries, controller: UniqueId) -> Option<ModelId> {
    let mut visited = CircularMap::new();
    let mut current = controller;

    loop {
        match current.class {
            ClassId::Geometry => return libraries.geometries.get(&current).copied(),
            ClassId::Controller => {
                if visited.contains(&current) {
                    warn!("Controller {} has a cyclic source chain", controller);
                    return None;
                }
                visited.push(current);
                current = *libraries.skins.get(&current)?;
            }
            _ => return None,
        }
    }
}

impl Builder for NodeBuilder {
    type Output = Option<ObjectId>;

    fn build(&self, ctx: &mut WriterContext) -> anyhow::Result<Option<ObjectId>> {
        let mut target = BuildTarget::new(
            &mut ctx.scene,
            &ctx.libraries,
            ctx.config.transform_mode,
        )
        .with_max_nodes(ctx.config.max_nodes);
        let mut path = CircularMap::new();

        Ok(self.build_with_path(&mut target, None, Mat4::IDENTITY, &mut path))
    }
}
