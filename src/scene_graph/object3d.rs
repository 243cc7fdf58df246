use id_arena::Id;

use crate::camera::CameraId;
use crate::light::LightId;
use crate::model::ModelId;
use crate::scene_graph::scene::Scene;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

#[derive(Debug, Default)]
pub struct Object3D {
    pub name: String,
    /// The `id` attribute of the COLLADA element this node came from.
    pub original_id: Option<String>,
    pub transform: Transform,
    pub mesh_id: Option<ModelId>,
    pub camera_id: Option<CameraId>,
    pub light_id: Option<LightId>,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
}

impl Object3D {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn parent<'a>(&self, scene: &'a Scene) -> Option<&'a Object3D> {
        self.parent_id.and_then(|id| scene.get_object(id))
    }

    pub fn children<'a, 'b>(&'a self, scene: &'b Scene) -> impl Iterator<Item = &'b Object3D> + 'b
    where
        'a: 'b,
    {
        self.child_ids
            .iter()
            .filter_map(move |id| scene.get_object(*id))
    }

    pub fn is_empty(&self) -> bool {
        self.mesh_id.is_none()
            && self.camera_id.is_none()
            && self.light_id.is_none()
            && self.child_ids.is_empty()
    }
}
