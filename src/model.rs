use glam::{Vec2, Vec3};
use id_arena::Id;

use crate::math::bounds::AABB;

pub type ModelId = Id<Model>;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coords: Vec2,
    pub tangent: Vec3,
}

#[derive(Clone, Debug)]
pub struct ModelPrimitive {
    pub index: usize,
    /// Material symbol the primitive was bound to in the document.
    pub material: Option<String>,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounding_box: AABB,
}

impl ModelPrimitive {
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_by_triangle_index(&self, face: usize, vert: usize) -> &Vertex {
        &self.vertices[self.indices[face * 3 + vert] as usize]
    }

    pub fn vertex_by_triangle_index_mut(&mut self, face: usize, vert: usize) -> &mut Vertex {
        let index = self.indices[face * 3 + vert] as usize;
        &mut self.vertices[index]
    }

    /// Replaces every vertex normal with the normal of the face it belongs to.
    pub fn generate_flat_normals(&mut self) {
        for face in 0..self.num_triangles() {
            let p0 = self.vertex_by_triangle_index(face, 0).position;
            let p1 = self.vertex_by_triangle_index(face, 1).position;
            let p2 = self.vertex_by_triangle_index(face, 2).position;
            let normal = (p1 - p0).cross(p2 - p0).normalize_or_zero();

            for vert in 0..3 {
                self.vertex_by_triangle_index_mut(face, vert).normal = normal;
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct Model {
    pub name: String,
    pub primitives: Vec<ModelPrimitive>,
}

impl Model {
    pub fn num_vertices(&self) -> usize {
        self.primitives.iter().map(|p| p.vertices.len()).sum()
    }

    pub fn num_triangles(&self) -> usize {
        self.primitives.iter().map(|p| p.num_triangles()).sum()
    }

    pub fn bounding_box(&self) -> Option<AABB> {
        self.primitives
            .iter()
            .map(|p| p.bounding_box)
            .reduce(|a, b| a.union(&b))
    }
}
