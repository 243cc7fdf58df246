//! Converters turn framework elements into builders. `get_node` converts and
//! builds in one step.

use std::rc::Rc;

use glam::{Mat4, Quat, Vec3};

use crate::transcoder::builders::{Builder, CameraBuilder, LightBuilder, MeshBuilder, NodeBuilder};
use crate::transcoder::context::WriterContext;
use crate::transcoder::fw;
use crate::transcoder::unique_id::UniqueId;

pub trait Converter {
    type From;
    type Builder: Builder;

    fn convert(&self, from: &Self::From, ctx: &WriterContext) -> Self::Builder;

    fn get_node(
        &self,
        from: &Self::From,
        ctx: &mut WriterContext,
    ) -> anyhow::Result<<Self::Builder as Builder>::Output> {
        self.convert(from, ctx).build(ctx)
    }
}

fn display_name(name: &Option<String>, original_id: &Option<String>, fallback: &str) -> String {
    name.as_ref()
        .or(original_id.as_ref())
        .cloned()
        .unwrap_or_else(|| fallback.to_owned())
}

pub struct MeshConverter;

impl Converter for MeshConverter {
    type From = fw::Geometry;
    type Builder = MeshBuilder;

    fn convert(&self, from: &fw::Geometry, ctx: &WriterContext) -> MeshBuilder {
        let builder = MeshBuilder::new()
            .with_name(display_name(&from.name, &from.original_id, "Mesh"))
            .with_tangents(ctx.config.generate_tangents);

        match &from.kind {
            fw::GeometryKind::Mesh(mesh) => mesh
                .primitives
                .iter()
                .cloned()
                .fold(builder, |builder, primitive| builder.with_primitive(primitive)),
            fw::GeometryKind::Unsupported(_) => builder,
        }
    }
}

pub struct CameraConverter;

impl Converter for CameraConverter {
    type From = fw::Camera;
    type Builder = CameraBuilder;

    fn convert(&self, from: &fw::Camera, _ctx: &WriterContext) -> CameraBuilder {
        CameraBuilder::new(from.projection)
            .with_name(display_name(&from.name, &from.original_id, "Camera"))
    }
}

pub struct LightConverter;

impl Converter for LightConverter {
    type From = fw::Light;
    type Builder = LightBuilder;

    fn convert(&self, from: &fw::Light, _ctx: &WriterContext) -> LightBuilder {
        LightBuilder::new(from.kind)
            .with_name(display_name(&from.name, &from.original_id, "Light"))
            .with_color(from.color)
    }
}

/// Builders created for every node of a converted tree, so that
/// `<instance_node>` can reach nodes nested anywhere in it.
pub type RegisteredNodes = Vec<(UniqueId, Rc<NodeBuilder>)>;

pub struct NodeConverter;

impl NodeConverter {
    pub fn convert_tree(&self, from: &fw::Node, registered: &mut RegisteredNodes) -> NodeBuilder {
        let mut builder = NodeBuilder::new().with_id(from.unique_id);
        if let Some(original_id) = &from.original_id {
            builder = builder.with_original_id(original_id.as_str());
        }
        if let Some(name) = &from.name {
            builder = builder.with_name(name.as_str());
        }
        for transform in &from.transforms {
            builder = builder.with_transform(*transform);
        }
        for instance in &from.instances {
            builder = builder.with_instance(*instance);
        }
        for child in &from.children {
            let child_builder = Rc::new(self.convert_tree(child, registered));
            registered.push((child.unique_id, child_builder.clone()));
            builder = builder.with_child(child_builder);
        }
        builder
    }
}

impl Converter for NodeConverter {
    type From = fw::Node;
    type Builder = NodeBuilder;

    fn convert(&self, from: &fw::Node, _ctx: &WriterContext) -> NodeBuilder {
        self.convert_tree(from, &mut RegisteredNodes::new())
    }
}

/// Converts a visual scene into a root node holding its top-level nodes.
pub struct VisualSceneConverter;

impl VisualSceneConverter {
    pub fn convert_tree(
        &self,
        from: &fw::VisualScene,
        ctx: &WriterContext,
        registered: &mut RegisteredNodes,
    ) -> NodeBuilder {
        let mut builder = NodeBuilder::new()
            .with_id(from.unique_id)
            .with_name(display_name(&from.name, &from.original_id, "Scene"));
        if let Some(original_id) = &from.original_id {
            builder = builder.with_original_id(original_id.as_str());
        }

        let root_transform = self.root_transform(ctx);
        if root_transform != Mat4::IDENTITY {
            builder = builder.with_transform(root_transform);
        }

        for node in &from.root_nodes {
            let node_builder = Rc::new(NodeConverter.convert_tree(node, registered));
            registered.push((node.unique_id, node_builder.clone()));
            builder = builder.with_child(node_builder);
        }

        builder
    }

    /// Up axis and unit correction applied at the root of the scene.
    pub fn root_transform(&self, ctx: &WriterContext) -> Mat4 {
        let rotation = if ctx.config.convert_up_axis {
            ctx.up_axis.to_y_up()
        } else {
            Quat::IDENTITY
        };
        let scale = if ctx.config.apply_unit_scale {
            Vec3::splat(ctx.unit_meter)
        } else {
            Vec3::ONE
        };

        Mat4::from_scale_rotation_translation(scale, rotation, Vec3::ZERO)
    }
}

impl Converter for VisualSceneConverter {
    type From = fw::VisualScene;
    type Builder = NodeBuilder;

    fn convert(&self, from: &fw::VisualScene, ctx: &WriterContext) -> NodeBuilder {
        self.convert_tree(from, ctx, &mut RegisteredNodes::new())
    }
}
