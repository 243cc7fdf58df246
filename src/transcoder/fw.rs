//! Parser-neutral descriptions of COLLADA elements, as handed to a
//! [`ColladaWriter`](super::writer::ColladaWriter). References between
//! elements are already resolved to [`UniqueId`]s.

use glam::{Mat4, Vec2, Vec3};

use crate::scene_graph::UpAxis;
use crate::transcoder::unique_id::UniqueId;

#[derive(Debug, Clone)]
pub struct FileInfo {
    pub up_axis: UpAxis,
    pub unit_name: Option<String>,
    pub unit_meter: f32,
}

impl Default for FileInfo {
    fn default() -> Self {
        Self {
            up_axis: UpAxis::Y,
            unit_name: None,
            unit_meter: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MeshPrimitive {
    pub material: Option<String>,
    /// Three consecutive positions per triangle.
    pub positions: Vec<Vec3>,
    /// Empty, or one per position.
    pub normals: Vec<Vec3>,
    /// Empty, or one per position.
    pub tex_coords: Vec<Vec2>,
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub primitives: Vec<MeshPrimitive>,
}

#[derive(Debug, Clone)]
pub enum GeometryKind {
    Mesh(Mesh),
    Unsupported(&'static str),
}

#[derive(Debug, Clone)]
pub struct Geometry {
    pub unique_id: UniqueId,
    pub original_id: Option<String>,
    pub name: Option<String>,
    pub kind: GeometryKind,
}

#[derive(Debug, Clone)]
pub struct Material {
    pub unique_id: UniqueId,
    pub original_id: Option<String>,
    pub name: Option<String>,
}

/// Angles are in degrees, as written in the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        xfov: Option<f32>,
        yfov: Option<f32>,
        aspect_ratio: Option<f32>,
        znear: f32,
        zfar: f32,
    },
    Orthographic {
        xmag: Option<f32>,
        ymag: Option<f32>,
        aspect_ratio: Option<f32>,
        znear: f32,
        zfar: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub unique_id: UniqueId,
    pub original_id: Option<String>,
    pub name: Option<String>,
    pub projection: Projection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point {
        constant_attenuation: f32,
        linear_attenuation: f32,
        quadratic_attenuation: f32,
    },
    Spot {
        constant_attenuation: f32,
        linear_attenuation: f32,
        quadratic_attenuation: f32,
        /// Full cone angle in degrees.
        falloff_angle: f32,
        falloff_exponent: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Light {
    pub unique_id: UniqueId,
    pub original_id: Option<String>,
    pub name: Option<String>,
    pub color: Vec3,
    pub kind: LightKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    Skin,
    Morph,
}

#[derive(Debug, Clone)]
pub struct Controller {
    pub unique_id: UniqueId,
    pub original_id: Option<String>,
    pub kind: ControllerKind,
    /// The controlled geometry, or another controller for stacked controllers.
    pub source: Option<UniqueId>,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub unique_id: UniqueId,
    pub original_id: Option<String>,
    pub name: Option<String>,
    /// The transformation stack, outermost first.
    pub transforms: Vec<Mat4>,
    /// Geometry, camera, light, controller and node instances in document order.
    pub instances: Vec<UniqueId>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(unique_id: UniqueId) -> Self {
        Self {
            unique_id,
            original_id: None,
            name: None,
            transforms: Vec::new(),
            instances: Vec::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LibraryNodes {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone)]
pub struct VisualScene {
    pub unique_id: UniqueId,
    pub original_id: Option<String>,
    pub name: Option<String>,
    pub root_nodes: Vec<Node>,
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub instance_visual_scene: Option<UniqueId>,
}
