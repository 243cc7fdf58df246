use glam::{Mat4, Quat};
use id_arena::Arena;

use crate::camera::{Camera, CameraId};
use crate::light::{Light, LightId};
use crate::model::{Model, ModelId};
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::transform::Transform;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UpAxis {
    X,
    #[default]
    Y,
    Z,
}

impl UpAxis {
    /// Rotation taking a document authored with this up axis to Y-up.
    pub fn to_y_up(self) -> Quat {
        match self {
            UpAxis::X => Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
            UpAxis::Y => Quat::IDENTITY,
            UpAxis::Z => Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
        }
    }
}

/// The imported asset: a node hierarchy plus the meshes, cameras and lights
/// it references.
#[derive(Debug)]
pub struct Scene {
    pub objects: Arena<Object3D>,
    pub meshes: Arena<Model>,
    pub cameras: Arena<Camera>,
    pub lights: Arena<Light>,
    pub up_axis: UpAxis,
    pub unit_meter: f32,
    root_ids: Vec<ObjectId>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
            meshes: Arena::new(),
            cameras: Arena::new(),
            lights: Arena::new(),
            up_axis: UpAxis::default(),
            unit_meter: 1.0,
            root_ids: Vec::new(),
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id)
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn get_object_by_original_id(&self, original_id: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.original_id.as_deref() == Some(original_id))
            .map(|(id, _)| id)
    }

    pub fn add_mesh(&mut self, mesh: Model) -> ModelId {
        self.meshes.alloc(mesh)
    }

    pub fn add_camera(&mut self, camera: Camera) -> CameraId {
        self.cameras.alloc(camera)
    }

    pub fn add_light(&mut self, light: Light) -> LightId {
        self.lights.alloc(light)
    }

    pub fn root_ids(&self) -> &[ObjectId] {
        &self.root_ids
    }

    /// Creates an empty node, either as a root of the asset or under `parent`.
    pub fn create_child_node(&mut self, parent: Option<ObjectId>) -> ObjectId {
        let object_id = self.add_object(Object3D::default());
        self.add_child_node(parent, object_id);
        object_id
    }

    /// Attaches an existing node to `parent`, or to the asset's roots.
    pub fn add_child_node(&mut self, parent: Option<ObjectId>, child_id: ObjectId) {
        match parent {
            Some(parent_id) => self.set_object_parent(child_id, Some(parent_id)),
            None => {
                self.set_object_parent(child_id, None);
                if !self.root_ids.contains(&child_id) {
                    self.root_ids.push(child_id);
                }
            }
        }
    }

    pub fn set_mesh(&mut self, object_id: ObjectId, mesh_id: ModelId) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.mesh_id = Some(mesh_id);
        }
    }

    pub fn set_camera(&mut self, object_id: ObjectId, camera_id: CameraId) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.camera_id = Some(camera_id);
        }
    }

    pub fn set_light(&mut self, object_id: ObjectId, light_id: LightId) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.light_id = Some(light_id);
        }
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        if let Some(child) = self.objects.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                self.root_ids.retain(|&id| id != child_id);
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }

        self.invalidate_object_hierarchy(child_id);
    }

    pub fn set_object_transform(&mut self, object_id: ObjectId, matrix: Mat4) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_matrix(matrix);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    pub fn world_matrix(&self, object_id: ObjectId) -> Option<Mat4> {
        self.objects
            .get(object_id)
            .map(|object| *object.transform.get_world_matrix())
    }

    /// Invalidates world transforms for an object and all its descendants
    pub fn invalidate_object_hierarchy(&self, object_id: ObjectId) {
        if let Some(object) = self.objects.get(object_id) {
            object.transform.invalidate_world();

            for &child_id in &object.child_ids {
                self.invalidate_object_hierarchy(child_id);
            }
        }
    }

    /// Updates all object transforms in hierarchical order
    pub fn update_transforms(&self) {
        let root_objects = self
            .objects
            .iter()
            .filter(|(_, object)| object.parent_id.is_none())
            .map(|(id, _)| id);

        for root_id in root_objects {
            self.update_object_transform_recursive(root_id, Mat4::IDENTITY);
        }
    }

    fn update_object_transform_recursive(&self, object_id: ObjectId, parent_world_matrix: Mat4) {
        if let Some(object) = self.objects.get(object_id) {
            if object.transform.is_world_dirty() {
                let local_matrix = *object.transform.get_local_matrix();
                object
                    .transform
                    .set_world_matrix(parent_world_matrix * local_matrix);
            }

            let world_matrix = *object.transform.get_world_matrix();
            for &child_id in &object.child_ids {
                self.update_object_transform_recursive(child_id, world_matrix);
            }
        }
    }

    /// Visits every node reachable from the roots, depth first, with its depth.
    pub fn walk(&self, mut visit: impl FnMut(ObjectId, &Object3D, usize)) {
        let mut stack: Vec<(ObjectId, usize)> =
            self.root_ids.iter().rev().map(|&id| (id, 0)).collect();

        while let Some((object_id, depth)) = stack.pop() {
            if let Some(object) = self.objects.get(object_id) {
                visit(object_id, object, depth);
                stack.extend(object.child_ids.iter().rev().map(|&id| (id, depth + 1)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn create_child_node_tracks_roots() {
        let mut scene = Scene::new();
        let root = scene.create_child_node(None);
        let child = scene.create_child_node(Some(root));

        assert_eq!(scene.root_ids(), &[root]);
        assert_eq!(scene.get_object(root).unwrap().child_ids, vec![child]);
        assert_eq!(scene.get_object(child).unwrap().parent_id, Some(root));
    }

    #[test]
    fn reparenting_a_root_removes_it_from_roots() {
        let mut scene = Scene::new();
        let a = scene.create_child_node(None);
        let b = scene.create_child_node(None);

        scene.add_child_node(Some(a), b);

        assert_eq!(scene.root_ids(), &[a]);
        assert_eq!(scene.get_object(a).unwrap().child_ids, vec![b]);
    }

    #[test]
    fn world_matrices_compose_parent_first() {
        let mut scene = Scene::new();
        let root = scene.create_child_node(None);
        let child = scene.create_child_node(Some(root));
        scene.set_object_transform(root, Mat4::from_translation(Vec3::X));
        scene.set_object_transform(child, Mat4::from_scale(Vec3::splat(2.0)));

        scene.update_transforms();

        let world = scene.world_matrix(child).unwrap();
        assert!(world
            .transform_point3(Vec3::ONE)
            .abs_diff_eq(Vec3::new(3.0, 2.0, 2.0), 1e-5));
    }

    #[test]
    fn walk_is_depth_first_in_child_order() {
        let mut scene = Scene::new();
        let root = scene.create_child_node(None);
        let first = scene.create_child_node(Some(root));
        let _nested = scene.create_child_node(Some(first));
        let _second = scene.create_child_node(Some(root));

        let mut depths = Vec::new();
        scene.walk(|_, _, depth| depths.push(depth));

        assert_eq!(depths, vec![0, 1, 2, 1]);
    }

    #[test]
    fn z_up_maps_to_y_up() {
        let up = UpAxis::Z.to_y_up() * Vec3::Z;
        assert!(up.abs_diff_eq(Vec3::Y, 1e-6));
        let up = UpAxis::X.to_y_up() * Vec3::X;
        assert!(up.abs_diff_eq(Vec3::Y, 1e-6));
    }
}
