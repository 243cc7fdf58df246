//! Builders accumulate the state of one element and materialize it into the
//! scene graph held by a [`WriterContext`].

pub mod camera_builder;
pub mod light_builder;
pub mod mesh_builder;
pub mod node_builder;

pub use camera_builder::CameraBuilder;
pub use light_builder::LightBuilder;
pub use mesh_builder::MeshBuilder;
pub use node_builder::{CircularMap, NodeBuilder};

use crate::transcoder::context::WriterContext;

pub trait Builder {
    type Output;

    fn build(&self, ctx: &mut WriterContext) -> anyhow::Result<Self::Output>;
}
