// COLLADA exporters rarely write <texbinormal>/<textangent> inputs, so
// tangents are always derived from positions, normals and the first UV set.

use anyhow::bail;
use bevy_mikktspace::{generate_tangents, Geometry};
use glam::Vec3;

use crate::model::ModelPrimitive;

impl Geometry for ModelPrimitive {
    fn num_faces(&self) -> usize {
        self.num_triangles()
    }

    fn num_vertices_of_face(&self, _face: usize) -> usize {
        3
    }

    fn position(&self, face: usize, vert: usize) -> [f32; 3] {
        self.vertex_by_triangle_index(face, vert).position.to_array()
    }

    fn normal(&self, face: usize, vert: usize) -> [f32; 3] {
        self.vertex_by_triangle_index(face, vert).normal.to_array()
    }

    fn tex_coord(&self, face: usize, vert: usize) -> [f32; 2] {
        self.vertex_by_triangle_index(face, vert).tex_coords.to_array()
    }

    fn set_tangent(
        &mut self,
        tangent: [f32; 3],
        _bi_tangent: [f32; 3],
        _f_mag_s: f32,
        _f_mag_t: f32,
        _bi_tangent_preserves_orientation: bool,
        face: usize,
        vert: usize,
    ) {
        self.vertex_by_triangle_index_mut(face, vert).tangent = Vec3::from_array(tangent);
    }
}

impl ModelPrimitive {
    pub fn generate_tangents(&mut self) -> anyhow::Result<()> {
        if self.indices.is_empty() {
            return Ok(());
        }

        if !generate_tangents(self) {
            bail!("Failed to generate tangents for primitive {}", self.index)
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::math::bounds::AABB;
    use crate::model::Vertex;

    use super::*;

    fn vertex(x: f32, y: f32) -> Vertex {
        Vertex {
            position: Vec3::new(x, y, 0.0),
            normal: Vec3::Z,
            tex_coords: Vec2::new(x, y),
            tangent: Vec3::ZERO,
        }
    }

    #[test]
    fn tangents_follow_u_direction() {
        let mut primitive = ModelPrimitive {
            index: 0,
            material: None,
            vertices: vec![vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(1.0, 1.0)],
            indices: vec![0, 1, 2],
            bounding_box: AABB::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0)),
        };

        primitive.generate_tangents().unwrap();

        for vertex in &primitive.vertices {
            assert!(vertex.tangent.abs_diff_eq(Vec3::X, 1e-4));
        }
    }
}
