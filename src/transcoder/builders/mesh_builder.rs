use anyhow::{anyhow, bail};
use glam::{Vec2, Vec3};
use log::{debug, warn};

use crate::math::bounds::AABB;
use crate::model::{Model, ModelId, ModelPrimitive, Vertex};
use crate::transcoder::builders::Builder;
use crate::transcoder::context::WriterContext;
use crate::transcoder::fw::MeshPrimitive;

#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    name: String,
    primitives: Vec<MeshPrimitive>,
    generate_tangents: bool,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_primitive(mut self, primitive: MeshPrimitive) -> Self {
        self.primitives.push(primitive);
        self
    }

    pub fn with_tangents(mut self, generate_tangents: bool) -> Self {
        self.generate_tangents = generate_tangents;
        self
    }

    pub fn build_model(&self) -> anyhow::Result<Model> {
        let mut model = Model {
            name: self.name.clone(),
            primitives: Vec::new(),
        };

        for (index, primitive) in self.primitives.iter().enumerate() {
            if primitive.positions.is_empty() {
                debug!("Skipping empty primitive {} of {}", index, self.name);
                continue;
            }
            if primitive.positions.len() % 3 != 0 {
                bail!(
                    "Primitive {} of {} has {} positions, not a whole number of triangles",
                    index,
                    self.name,
                    primitive.positions.len()
                );
            }

            model
                .primitives
                .push(self.build_primitive(model.primitives.len(), primitive)?);
        }

        if model.primitives.is_empty() {
            return Err(anyhow!("Mesh without primitives: {}", model.name));
        }

        Ok(model)
    }

    fn build_primitive(
        &self,
        index: usize,
        primitive: &MeshPrimitive,
    ) -> anyhow::Result<ModelPrimitive> {
        let num_vertices = primitive.positions.len();

        let has_normals = primitive.normals.len() == num_vertices;
        if !has_normals && !primitive.normals.is_empty() {
            warn!(
                "{}: {} normals for {} positions, regenerating normals",
                self.name,
                primitive.normals.len(),
                num_vertices
            );
        }
        let has_tex_coords = primitive.tex_coords.len() == num_vertices;

        let vertices = primitive
            .positions
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex {
                position,
                normal: if has_normals {
                    primitive.normals[i]
                } else {
                    Vec3::ZERO
                },
                tex_coords: if has_tex_coords {
                    primitive.tex_coords[i]
                } else {
                    Vec2::ZERO
                },
                tangent: Vec3::ZERO,
            })
            .collect::<Vec<_>>();

        let bounding_box = AABB::from_points(primitive.positions.iter().copied())
            .ok_or_else(|| anyhow!("Primitive {} of {} has no positions", index, self.name))?;

        let mut model_primitive = ModelPrimitive {
            index,
            material: primitive.material.clone(),
            vertices,
            indices: (0..num_vertices as u32).collect(),
            bounding_box,
        };

        if !has_normals {
            model_primitive.generate_flat_normals();
        }
        if self.generate_tangents && has_tex_coords {
            model_primitive.generate_tangents()?;
        }

        Ok(model_primitive)
    }
}

impl Builder for MeshBuilder {
    type Output = ModelId;

    fn build(&self, ctx: &mut WriterContext) -> anyhow::Result<ModelId> {
        let model = self.build_model()?;
        debug!(
            "Built mesh {} ({} primitives, {} triangles)",
            model.name,
            model.primitives.len(),
            model.num_triangles()
        );
        Ok(ctx.scene.add_mesh(model))
    }
}
