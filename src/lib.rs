pub mod asset_pipeline;
pub mod camera;
pub mod config;
pub mod light;
pub mod math;
pub mod model;
pub mod scene_graph;
pub mod transcoder;

pub use config::{TranscoderConfig, TransformMode};
pub use scene_graph::Scene;
pub use transcoder::{
    import_dae_from_file, import_dae_from_slice, import_dae_with_token, CancellationToken,
    ImportError,
};
