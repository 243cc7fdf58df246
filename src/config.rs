#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransformMode {
    /// Keep the node hierarchy of the document.
    #[default]
    Preserve,
    /// Attach every node directly under its visual scene root, with the
    /// transforms of its ancestors folded in.
    Flatten,
}

#[derive(Debug, Clone)]
pub struct TranscoderConfig {
    pub transform_mode: TransformMode,
    /// Rotate X-up and Z-up documents to Y-up at the visual scene root.
    pub convert_up_axis: bool,
    /// Scale the visual scene root by the document's `<unit meter>`.
    pub apply_unit_scale: bool,
    pub generate_tangents: bool,
    /// Attach every `<visual_scene>` to the asset, not only the one named by `<scene>`.
    pub all_visual_scenes: bool,
    /// Node instancing stops once the scene holds this many objects.
    pub max_nodes: usize,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            transform_mode: TransformMode::Preserve,
            convert_up_axis: true,
            apply_unit_scale: false,
            generate_tangents: true,
            all_visual_scenes: false,
            max_nodes: 1_000_000,
        }
    }
}
