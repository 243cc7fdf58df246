//! Walks a document parsed by `dae_parser` and drives a [`ColladaWriter`].

use std::borrow::Cow;

use dae_parser::{
    geom::{Importer as DaeImporter, VertexImporter, VertexLoad},
    source::{SourceReader, ST, XYZ},
    Camera as DaeCamera, ControlElement, Controller as DaeController, Document,
    Geometry as DaeGeometry, Input, LightKind as DaeLightKind, Light as DaeLight, LocalMaps,
    Material as DaeMaterial, Node as DaeNode, ProjectionType, Semantic,
    Transform as DaeTransform, UpAxis as DaeUpAxis, Url, Vertices,
    VisualScene as DaeVisualScene,
};
use glam::{Mat4, Quat, Vec2, Vec3};
use log::{debug, info};

use crate::scene_graph::UpAxis;
use crate::transcoder::error::{CancellationToken, ImportError, ParseError, Severity};
use crate::transcoder::fw;
use crate::transcoder::unique_id::{ClassId, IdRegistry, UniqueId};
use crate::transcoder::writer::ColladaWriter;

pub fn parse_document(data: &[u8]) -> Result<Document, ImportError> {
    Document::from_reader(data).map_err(|err| ImportError::Parser(format!("{err:?}")))
}

pub struct ColladaLoader {
    registry: IdRegistry,
    token: CancellationToken,
    issues: Vec<ParseError>,
}

impl ColladaLoader {
    pub fn new(token: CancellationToken) -> Self {
        Self {
            registry: IdRegistry::new(),
            token,
            issues: Vec::new(),
        }
    }

    /// Feeds every supported element of `document` to `writer`: global
    /// asset, materials, cameras, lights, geometries, controllers, library
    /// nodes, visual scenes and finally the scene. Definitions come before the
    /// visual scenes that instantiate them.
    pub fn load<W: ColladaWriter>(
        &mut self,
        document: &Document,
        writer: &mut W,
    ) -> Result<(), ImportError> {
        writer.start();

        let file_info = self.convert_file_info(document);
        self.dispatch(writer, "asset", |w| w.write_global_asset(&file_info))?;

        for material in document.iter::<DaeMaterial>() {
            self.check_cancelled(writer)?;
            let material = self.convert_material(material);
            self.dispatch(writer, "material", |w| w.write_material(&material))?;
        }

        for camera in document.iter::<DaeCamera>() {
            self.check_cancelled(writer)?;
            let camera = self.convert_camera(camera);
            self.dispatch(writer, "camera", |w| w.write_camera(&camera))?;
        }

        for light in document.iter::<DaeLight>() {
            self.check_cancelled(writer)?;
            let light = self.convert_light(light);
            self.dispatch(writer, "light", |w| w.write_light(&light))?;
        }

        let maps = document.local_maps();
        for geometry in document.iter::<DaeGeometry>() {
            self.check_cancelled(writer)?;
            let geometry = self.convert_geometry(geometry, &maps);
            self.dispatch(writer, "geometry", |w| w.write_geometry(&geometry))?;
        }

        for controller in document.iter::<DaeController>() {
            self.check_cancelled(writer)?;
            let controller = self.convert_controller(controller);
            self.dispatch(writer, "controller", |w| w.write_controller(&controller))?;
        }

        let library_nodes: Vec<&DaeNode> = document.iter::<DaeNode>().collect();
        if !library_nodes.is_empty() {
            self.check_cancelled(writer)?;
            let library_nodes = fw::LibraryNodes {
                nodes: library_nodes
                    .into_iter()
                    .map(|node| self.convert_node(node))
                    .collect(),
            };
            self.dispatch(writer, "library nodes", |w| {
                w.write_library_nodes(&library_nodes)
            })?;
        }

        for visual_scene in document.iter::<DaeVisualScene>() {
            self.check_cancelled(writer)?;
            let visual_scene = self.convert_visual_scene(visual_scene);
            self.dispatch(writer, "visual scene", |w| {
                w.write_visual_scene(&visual_scene)
            })?;
        }

        self.check_cancelled(writer)?;
        let scene = fw::Scene {
            instance_visual_scene: document
                .scene
                .as_ref()
                .and_then(|scene| scene.instance_visual_scene.as_ref())
                .and_then(|instance| self.resolve(ClassId::VisualScene, &instance.url.val)),
        };

        let dangling: Vec<String> = self
            .registry
            .dangling()
            .map(|(id, unique_id)| format!("#{id} ({unique_id})"))
            .collect();
        for reference in dangling {
            self.issues.push(ParseError::warning(format!(
                "Reference {reference} has no definition"
            )));
        }

        self.dispatch(writer, "scene", |w| w.write_scene(&scene))?;

        writer.finish();
        Ok(())
    }

    fn check_cancelled<W: ColladaWriter>(&mut self, writer: &mut W) -> Result<(), ImportError> {
        if self.token.is_cancelled() {
            writer.cancel("cancellation requested");
            return Err(ImportError::Cancelled);
        }
        Ok(())
    }

    /// Reports the issues gathered while converting the element, then hands
    /// the element to the writer.
    fn dispatch<W: ColladaWriter>(
        &mut self,
        writer: &mut W,
        what: &str,
        write: impl FnOnce(&mut W) -> anyhow::Result<()>,
    ) -> Result<(), ImportError> {
        for issue in std::mem::take(&mut self.issues) {
            Self::report(writer, issue)?;
        }

        if let Err(err) = write(writer) {
            Self::report(writer, ParseError::error(format!("Writing {what} failed: {err:#}")))?;
        }

        Ok(())
    }

    fn report<W: ColladaWriter>(writer: &mut W, error: ParseError) -> Result<(), ImportError> {
        let stop = writer.handle_error(&error);
        if stop || error.severity == Severity::Critical {
            writer.cancel(&error.message);
            return Err(ImportError::Aborted(error.message));
        }
        Ok(())
    }

    fn resolve(&mut self, class: ClassId, url: &Url) -> Option<UniqueId> {
        match url {
            Url::Fragment(fragment) => {
                Some(self.registry.reference(class, fragment.trim_start_matches('#')))
            }
            Url::Other(other) => {
                self.issues.push(ParseError::warning(format!(
                    "External reference {other} is not supported"
                )));
                None
            }
        }
    }

    fn resolve_instances<'a>(
        &mut self,
        class: ClassId,
        urls: impl IntoIterator<Item = &'a Url>,
        out: &mut Vec<UniqueId>,
    ) {
        for url in urls {
            if let Some(id) = self.resolve(class, url) {
                out.push(id);
            }
        }
    }

    fn convert_file_info(&self, document: &Document) -> fw::FileInfo {
        let asset = &document.asset;
        let up_axis = match asset.up_axis {
            DaeUpAxis::XUp => UpAxis::X,
            DaeUpAxis::YUp => UpAxis::Y,
            DaeUpAxis::ZUp => UpAxis::Z,
        };

        fw::FileInfo {
            up_axis,
            unit_name: asset.unit.name.clone(),
            unit_meter: asset.unit.meter,
        }
    }

    fn convert_material(&mut self, material: &DaeMaterial) -> fw::Material {
        fw::Material {
            unique_id: self
                .registry
                .define(ClassId::Material, material.id.as_deref()),
            original_id: material.id.clone(),
            name: material.name.clone(),
        }
    }

    fn convert_camera(&mut self, camera: &DaeCamera) -> fw::Camera {
        let projection = match &camera.optics.ty {
            ProjectionType::Perspective(perspective) => fw::Projection::Perspective {
                xfov: perspective.xfov,
                yfov: perspective.yfov,
                aspect_ratio: perspective.aspect_ratio,
                znear: perspective.znear,
                zfar: perspective.zfar,
            },
            ProjectionType::Orthographic(orthographic) => fw::Projection::Orthographic {
                xmag: orthographic.xmag,
                ymag: orthographic.ymag,
                aspect_ratio: orthographic.aspect_ratio,
                znear: orthographic.znear,
                zfar: orthographic.zfar,
            },
        };

        fw::Camera {
            unique_id: self.registry.define(ClassId::Camera, camera.id.as_deref()),
            original_id: camera.id.clone(),
            name: camera.name.clone(),
            projection,
        }
    }

    fn convert_light(&mut self, light: &DaeLight) -> fw::Light {
        let (color, kind) = match &light.kind {
            DaeLightKind::Ambient(ambient) => (&ambient.color[..], fw::LightKind::Ambient),
            DaeLightKind::Directional(directional) => {
                (&directional.color[..], fw::LightKind::Directional)
            }
            DaeLightKind::Point(point) => (
                &point.color[..],
                fw::LightKind::Point {
                    constant_attenuation: point.constant_attenuation,
                    linear_attenuation: point.linear_attenuation,
                    quadratic_attenuation: point.quadratic_attenuation,
                },
            ),
            DaeLightKind::Spot(spot) => (
                &spot.color[..],
                fw::LightKind::Spot {
                    constant_attenuation: spot.constant_attenuation,
                    linear_attenuation: spot.linear_attenuation,
                    quadratic_attenuation: spot.quadratic_attenuation,
                    falloff_angle: spot.falloff_angle,
                    falloff_exponent: spot.falloff_exponent,
                },
            ),
        };

        fw::Light {
            unique_id: self.registry.define(ClassId::Light, light.id.as_deref()),
            original_id: light.id.clone(),
            name: light.name.clone(),
            color: Vec3::from_slice(color),
            kind,
        }
    }

    fn convert_geometry(&mut self, geometry: &DaeGeometry, maps: &LocalMaps<'_>) -> fw::Geometry {
        let unique_id = self
            .registry
            .define(ClassId::Geometry, geometry.id.as_deref());
        let label = geometry
            .id
            .as_deref()
            .or(geometry.name.as_deref())
            .unwrap_or("<unnamed geometry>")
            .to_owned();

        let kind = match geometry.element.as_mesh() {
            Some(mesh) => fw::GeometryKind::Mesh(self.convert_mesh(&label, mesh, maps)),
            None => fw::GeometryKind::Unsupported("non-mesh geometry"),
        };

        fw::Geometry {
            unique_id,
            original_id: geometry.id.clone(),
            name: geometry.name.clone(),
            kind,
        }
    }

    fn convert_mesh(&mut self, label: &str, mesh: &dae_parser::Mesh, maps: &LocalMaps<'_>) -> fw::Mesh {
        let mut primitives = Vec::new();

        let Some(vertices) = mesh.vertices.as_ref() else {
            self.issues
                .push(ParseError::error(format!("{label}: mesh has no <vertices>")));
            return fw::Mesh { primitives };
        };

        let (vertices, ignored) = importable_vertices(vertices);
        if !ignored.is_empty() {
            self.issues.push(ParseError::warning(format!(
                "{label}: ignoring <vertices> inputs {}",
                ignored.join(", ")
            )));
        }
        let Some(vertices) = vertices else {
            self.issues.push(ParseError::error(format!(
                "{label}: <vertices> has no POSITION input"
            )));
            return fw::Mesh { primitives };
        };

        for element in &mesh.elements {
            let Some(triangles) = element.as_triangles() else {
                self.issues.push(ParseError::warning(format!(
                    "{label}: only <triangles> primitives are imported, skipping one"
                )));
                continue;
            };

            if !triangles
                .inputs
                .iter()
                .any(|input| matches!(input.semantic, Semantic::Vertex))
            {
                self.issues.push(ParseError::error(format!(
                    "{label}: <triangles> without a VERTEX input, skipping it"
                )));
                continue;
            }
            if let Some(input) = triangles
                .inputs
                .iter()
                .find(|input| !is_importable(&input.semantic, true))
            {
                self.issues.push(ParseError::warning(format!(
                    "{label}: <triangles> with a {:?} input cannot be imported, skipping it",
                    input.semantic
                )));
                continue;
            }

            match import_triangles(&vertices, triangles, maps) {
                Some(primitive) => primitives.push(primitive),
                None => self.issues.push(ParseError::error(format!(
                    "{label}: could not read <triangles> inputs"
                ))),
            }
        }

        debug!("{}: {} triangle primitives", label, primitives.len());
        fw::Mesh { primitives }
    }

    fn convert_controller(&mut self, controller: &DaeController) -> fw::Controller {
        let unique_id = self
            .registry
            .define(ClassId::Controller, controller.id.as_deref());

        let (kind, source) = match &controller.element {
            ControlElement::Skin(skin) => (fw::ControllerKind::Skin, &skin.source.val),
            ControlElement::Morph(morph) => (fw::ControllerKind::Morph, &morph.source.val),
        };

        // The source of a controller is a geometry or, for stacked
        // controllers, another controller.
        let source = match source {
            Url::Fragment(fragment) => {
                let fragment = fragment.trim_start_matches('#');
                match self.registry.lookup_defined(ClassId::Geometry, fragment) {
                    Some(geometry) => Some(geometry),
                    None => Some(self.registry.reference(ClassId::Controller, fragment)),
                }
            }
            other => self.resolve(ClassId::Geometry, other),
        };

        fw::Controller {
            unique_id,
            original_id: controller.id.clone(),
            kind,
            source,
        }
    }

    fn convert_node(&mut self, node: &DaeNode) -> fw::Node {
        let mut converted = fw::Node::new(self.registry.define(ClassId::Node, node.id.as_deref()));
        converted.original_id = node.id.clone();
        converted.name = node.name.clone();

        let label = node
            .name
            .as_deref()
            .or(node.id.as_deref())
            .unwrap_or("<unnamed node>")
            .to_owned();
        for transform in &node.transforms {
            match convert_transform(transform) {
                Some(matrix) => converted.transforms.push(matrix),
                None => self.issues.push(ParseError::warning(format!(
                    "{label}: ignoring unsupported transform {transform:?}"
                ))),
            }
        }

        let mut instances = Vec::new();
        self.resolve_instances(
            ClassId::Geometry,
            node.instance_geometry.iter().map(|instance| &instance.url.val),
            &mut instances,
        );
        self.resolve_instances(
            ClassId::Controller,
            node.instance_controller.iter().map(|instance| &instance.url.val),
            &mut instances,
        );
        self.resolve_instances(
            ClassId::Camera,
            node.instance_camera.iter().map(|instance| &instance.url.val),
            &mut instances,
        );
        self.resolve_instances(
            ClassId::Light,
            node.instance_light.iter().map(|instance| &instance.url.val),
            &mut instances,
        );
        self.resolve_instances(
            ClassId::Node,
            node.instance_node.iter().map(|instance| &instance.url.val),
            &mut instances,
        );
        converted.instances = instances;

        converted.children = node
            .children
            .iter()
            .map(|child| self.convert_node(child))
            .collect();

        converted
    }

    fn convert_visual_scene(&mut self, visual_scene: &DaeVisualScene) -> fw::VisualScene {
        let unique_id = self
            .registry
            .define(ClassId::VisualScene, visual_scene.id.as_deref());
        let root_nodes = visual_scene
            .nodes
            .iter()
            .map(|node| self.convert_node(node))
            .collect::<Vec<_>>();

        info!(
            "Visual scene {} has {} root nodes",
            visual_scene.id.as_deref().unwrap_or("<unnamed>"),
            root_nodes.len()
        );

        fw::VisualScene {
            unique_id,
            original_id: visual_scene.id.clone(),
            name: visual_scene.name.clone(),
            root_nodes,
        }
    }
}

/// COLLADA matrices are row major; rotations are in degrees. `<skew>` is not
/// supported.
fn convert_transform(transform: &DaeTransform) -> Option<Mat4> {
    match transform {
        DaeTransform::Matrix(matrix) => Some(Mat4::from_cols_slice(&matrix.0[..]).transpose()),
        DaeTransform::Translate(translation) => {
            Some(Mat4::from_translation(Vec3::from_slice(&translation.0[..])))
        }
        DaeTransform::Scale(scale) => Some(Mat4::from_scale(Vec3::from_slice(&scale.0[..]))),
        DaeTransform::Rotate(rotation) => {
            let axis = Vec3::from_slice(&rotation.0[0..3]).normalize_or_zero();
            if axis == Vec3::ZERO {
                return Some(Mat4::IDENTITY);
            }
            let angle = rotation.0[3].to_radians();
            Some(Mat4::from_quat(Quat::from_axis_angle(axis, angle)))
        }
        DaeTransform::LookAt(look_at) => {
            let eye = Vec3::from_slice(&look_at.0[0..3]);
            let interest = Vec3::from_slice(&look_at.0[3..6]);
            let up = Vec3::from_slice(&look_at.0[6..9]);
            // <lookat> places the node at the eye, which is the inverse of a view matrix.
            Some(Mat4::look_at_rh(eye, interest, up).inverse())
        }
        _ => None,
    }
}

/// Semantics the vertex importer reads. Anything else makes it panic.
fn is_importable(semantic: &Semantic, in_primitive: bool) -> bool {
    match semantic {
        Semantic::Position | Semantic::Normal | Semantic::TexCoord => true,
        Semantic::Vertex => in_primitive,
        _ => false,
    }
}

/// `<vertices>` reduced to the inputs the importer reads, and the semantics
/// that were dropped. `None` when no POSITION input is left.
fn importable_vertices(vertices: &Vertices) -> (Option<Cow<'_, Vertices>>, Vec<String>) {
    let ignored: Vec<String> = vertices
        .inputs
        .iter()
        .filter(|input| !is_importable(&input.semantic, false))
        .map(|input| format!("{:?}", input.semantic))
        .collect();

    let kept: Vec<Input> = vertices
        .inputs
        .iter()
        .filter(|input| is_importable(&input.semantic, false))
        .cloned()
        .collect();
    let Some(position) = kept
        .iter()
        .position(|input| matches!(input.semantic, Semantic::Position))
    else {
        return (None, ignored);
    };

    if ignored.is_empty() {
        return (Some(Cow::Borrowed(vertices)), ignored);
    }

    let mut reduced = vertices.clone();
    reduced.inputs = kept.into();
    reduced.position = position;
    (Some(Cow::Owned(reduced)), ignored)
}

fn import_triangles(
    vertices: &Vertices,
    triangles: &dae_parser::Triangles,
    maps: &LocalMaps<'_>,
) -> Option<fw::MeshPrimitive> {
    let vertex_importer: VertexImporter<'_> = vertices.importer(maps).ok()?;
    let importer: DaeImporter<'_> = triangles.importer(maps, vertex_importer).ok()?;
    let data = triangles.data.as_deref()?;

    let mut primitive = fw::MeshPrimitive {
        material: triangles.material.clone(),
        ..Default::default()
    };
    let mut has_normals = true;
    let mut has_tex_coords = true;

    for vertex in importer.read::<(), ImportedVertex>(&(), data) {
        primitive.positions.push(Vec3::from_array(vertex.position));
        match vertex.normal {
            Some(normal) => primitive.normals.push(Vec3::from_array(normal)),
            None => has_normals = false,
        }
        match vertex.tex_coord {
            Some(tex_coord) => primitive.tex_coords.push(Vec2::from_array(tex_coord)),
            None => has_tex_coords = false,
        }
    }

    if !has_normals {
        primitive.normals.clear();
    }
    if !has_tex_coords {
        primitive.tex_coords.clear();
    }

    Some(primitive)
}

#[derive(Clone, Default)]
struct ImportedVertex {
    position: [f32; 3],
    normal: Option<[f32; 3]>,
    tex_coord: Option<[f32; 2]>,
}

impl<'a> VertexLoad<'a> for ImportedVertex {
    fn position(_: &(), reader: &SourceReader<'a, XYZ>, i: u32) -> Self {
        Self {
            position: reader.get(i as usize),
            normal: None,
            tex_coord: None,
        }
    }

    fn add_normal(&mut self, _: &(), reader: &SourceReader<'a, XYZ>, i: u32) {
        self.normal = Some(reader.get(i as usize));
    }

    fn add_texcoord(&mut self, _: &(), reader: &SourceReader<'a, ST>, i: u32, set: Option<u32>) {
        // Only the first texture coordinate set is kept.
        if self.tex_coord.is_none() && set.unwrap_or(0) == 0 {
            self.tex_coord = Some(reader.get(i as usize));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        stop_on_error: bool,
        errors: Vec<ParseError>,
        cancelled: Option<String>,
    }

    impl ColladaWriter for Recorder {
        fn start(&mut self) {}

        fn cancel(&mut self, message: &str) {
            self.cancelled = Some(message.to_owned());
        }

        fn handle_error(&mut self, error: &ParseError) -> bool {
            self.errors.push(error.clone());
            self.stop_on_error
        }

        fn write_global_asset(&mut self, _: &fw::FileInfo) -> anyhow::Result<()> {
            Ok(())
        }

        fn write_scene(&mut self, _: &fw::Scene) -> anyhow::Result<()> {
            Ok(())
        }

        fn write_visual_scene(&mut self, _: &fw::VisualScene) -> anyhow::Result<()> {
            Ok(())
        }

        fn write_library_nodes(&mut self, _: &fw::LibraryNodes) -> anyhow::Result<()> {
            Ok(())
        }

        fn write_geometry(&mut self, _: &fw::Geometry) -> anyhow::Result<()> {
            anyhow::bail!("no room for geometry")
        }

        fn write_material(&mut self, _: &fw::Material) -> anyhow::Result<()> {
            Ok(())
        }

        fn write_camera(&mut self, _: &fw::Camera) -> anyhow::Result<()> {
            Ok(())
        }

        fn write_light(&mut self, _: &fw::Light) -> anyhow::Result<()> {
            Ok(())
        }

        fn write_controller(&mut self, _: &fw::Controller) -> anyhow::Result<()> {
            Ok(())
        }

        fn finish(&mut self) {}
    }

    #[test]
    fn warnings_do_not_stop_loading() {
        let mut recorder = Recorder::default();

        let result = ColladaLoader::report(&mut recorder, ParseError::warning("odd"));

        assert!(result.is_ok());
        assert_eq!(recorder.errors.len(), 1);
        assert!(recorder.cancelled.is_none());
    }

    #[test]
    fn critical_errors_abort_even_when_the_writer_continues() {
        let mut recorder = Recorder::default();

        let result = ColladaLoader::report(&mut recorder, ParseError::critical("broken"));

        assert!(matches!(result, Err(ImportError::Aborted(message)) if message == "broken"));
        assert_eq!(recorder.cancelled.as_deref(), Some("broken"));
    }

    #[test]
    fn writer_can_stop_on_any_error() {
        let mut recorder = Recorder {
            stop_on_error: true,
            ..Default::default()
        };

        let result = ColladaLoader::report(&mut recorder, ParseError::warning("odd"));

        assert!(matches!(result, Err(ImportError::Aborted(_))));
    }

    #[test]
    fn failed_writes_are_reported_as_errors() {
        let mut loader = ColladaLoader::new(CancellationToken::new());
        let mut recorder = Recorder::default();
        loader.issues.push(ParseError::warning("pending"));

        loader
            .dispatch(&mut recorder, "geometry", |w| {
                w.write_geometry(&fw::Geometry {
                    unique_id: UniqueId::new(ClassId::Geometry, 0),
                    original_id: None,
                    name: None,
                    kind: fw::GeometryKind::Unsupported("spline"),
                })
            })
            .unwrap();

        let severities: Vec<Severity> = recorder.errors.iter().map(|e| e.severity).collect();
        assert_eq!(severities, vec![Severity::Warning, Severity::Error]);
        assert!(recorder.errors[1].message.contains("no room for geometry"));
        assert!(loader.issues.is_empty());
    }

    #[test]
    fn cancellation_is_checked_between_elements() {
        let token = CancellationToken::new();
        let mut loader = ColladaLoader::new(token.clone());
        let mut recorder = Recorder::default();

        assert!(loader.check_cancelled(&mut recorder).is_ok());
        token.cancel();

        assert!(matches!(
            loader.check_cancelled(&mut recorder),
            Err(ImportError::Cancelled)
        ));
        assert!(recorder.cancelled.is_some());
    }

    #[test]
    fn external_urls_are_reported() {
        let mut loader = ColladaLoader::new(CancellationToken::new());

        let resolved = loader.resolve(ClassId::Geometry, &Url::Other("other.dae#mesh".into()));

        assert!(resolved.is_none());
        assert_eq!(loader.issues.len(), 1);
    }

    #[test]
    fn fragments_resolve_to_the_same_id() {
        let mut loader = ColladaLoader::new(CancellationToken::new());

        let a = loader.resolve(ClassId::Node, &Url::Fragment("wheel".into()));
        let b = loader.resolve(ClassId::Node, &Url::Fragment("wheel".into()));

        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn rotate_uses_degrees() {
        let rotate = DaeTransform::Rotate(dae_parser::Rotate(Box::new([0.0, 0.0, 1.0, 90.0])));

        let matrix = convert_transform(&rotate).unwrap();

        assert!(matrix.transform_vector3(Vec3::X).abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn matrices_are_read_row_major() {
        let values = [
            1.0, 0.0, 0.0, 5.0, //
            0.0, 1.0, 0.0, 6.0, //
            0.0, 0.0, 1.0, 7.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        let matrix = DaeTransform::Matrix(dae_parser::Matrix(Box::new(values)));

        let matrix = convert_transform(&matrix).unwrap();

        assert_eq!(matrix.transform_point3(Vec3::ZERO), Vec3::new(5.0, 6.0, 7.0));
    }
}
