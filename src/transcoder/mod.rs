//! COLLADA import. The loader walks a parsed document and hands each element
//! to a [`ColladaWriter`]; [`AssetWriter`] builds a [`Scene`] from them.

use std::path::Path;

use anyhow::Context;
use log::info;

use crate::config::TranscoderConfig;
use crate::scene_graph::Scene;

pub mod builders;
pub mod context;
pub mod converters;
pub mod error;
pub mod fw;
pub mod loader;
pub mod unique_id;
pub mod writer;

pub use error::{CancellationToken, ImportError, ParseError, Severity};
pub use loader::ColladaLoader;
pub use writer::{AssetWriter, ColladaWriter};

pub fn import_dae_from_slice(data: &[u8], config: &TranscoderConfig) -> anyhow::Result<Scene> {
    import_dae_with_token(data, config, CancellationToken::new())
}

pub fn import_dae_from_file(
    path: impl AsRef<Path>,
    config: &TranscoderConfig,
) -> anyhow::Result<Scene> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read COLLADA file {}", path.display()))?;

    info!("Importing {} ({} bytes)", path.display(), data.len());

    import_dae_from_slice(&data, config)
        .with_context(|| format!("Failed to import {}", path.display()))
}

pub fn import_dae_with_token(
    data: &[u8],
    config: &TranscoderConfig,
    token: CancellationToken,
) -> anyhow::Result<Scene> {
    let document = loader::parse_document(data)?;

    let mut writer = AssetWriter::new(config.clone());
    ColladaLoader::new(token).load(&document, &mut writer)?;

    Ok(writer.into_scene())
}
