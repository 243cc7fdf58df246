use dae_transcoder::scene_graph::UpAxis;
use dae_transcoder::{
    import_dae_from_slice, import_dae_with_token, CancellationToken, ImportError,
    TranscoderConfig, TransformMode,
};
use glam::Vec3;

const DOCUMENT: &str = r##"<?xml version="1.0" encoding="utf-8"?>
<COLLADA xmlns="http://www.collada.org/2005/11/COLLADASchema" version="1.4.1">
  <asset>
    <created>2024-01-01T00:00:00</created>
    <modified>2024-01-01T00:00:00</modified>
    <unit name="centimeter" meter="0.01"/>
    <up_axis>Z_UP</up_axis>
  </asset>
  <library_cameras>
    <camera id="cam" name="cam">
      <optics>
        <technique_common>
          <perspective>
            <yfov>45</yfov>
            <aspect_ratio>1.5</aspect_ratio>
            <znear>0.1</znear>
            <zfar>100</zfar>
          </perspective>
        </technique_common>
      </optics>
    </camera>
  </library_cameras>
  <library_geometries>
    <geometry id="tri-mesh" name="tri">
      <mesh>
        <source id="tri-positions">
          <float_array id="tri-positions-array" count="9">0 0 0 1 0 0 0 1 0</float_array>
          <technique_common>
            <accessor source="#tri-positions-array" count="3" stride="3">
              <param name="X" type="float"/>
              <param name="Y" type="float"/>
              <param name="Z" type="float"/>
            </accessor>
          </technique_common>
        </source>
        <vertices id="tri-vertices">
          <input semantic="POSITION" source="#tri-positions"/>
        </vertices>
        <triangles count="1">
          <input semantic="VERTEX" source="#tri-vertices" offset="0"/>
          <p>0 1 2</p>
        </triangles>
      </mesh>
    </geometry>
  </library_geometries>
  <library_nodes>
    <node id="post" name="post">
      <translate>0 0 1</translate>
      <instance_camera url="#cam"/>
    </node>
  </library_nodes>
  <library_visual_scenes>
    <visual_scene id="Scene" name="Scene">
      <node id="Tri" name="Tri">
        <translate>1 2 3</translate>
        <instance_geometry url="#tri-mesh"/>
      </node>
      <node id="Rig" name="Rig">
        <instance_node url="#post"/>
        <instance_node url="#post"/>
      </node>
      <node id="loop" name="Loop">
        <instance_node url="#loop"/>
      </node>
    </visual_scene>
  </library_visual_scenes>
  <scene>
    <instance_visual_scene url="#Scene"/>
  </scene>
</COLLADA>
"##;

#[test]
fn imports_document_into_scene_graph() {
    let scene = import_dae_from_slice(DOCUMENT.as_bytes(), &TranscoderConfig::default()).unwrap();

    assert_eq!(scene.up_axis, UpAxis::Z);
    assert!((scene.unit_meter - 0.01).abs() < 1e-6);
    assert_eq!(scene.root_ids().len(), 1);
    assert_eq!(scene.meshes.len(), 1);
    assert_eq!(scene.cameras.len(), 1);

    let tri = scene.get_object_by_name("Tri").unwrap();
    let mesh_id = scene.get_object(tri).unwrap().mesh_id.unwrap();
    assert_eq!(scene.meshes[mesh_id].num_triangles(), 1);

    // Z-up is rotated to Y-up at the visual scene root.
    let position = scene.world_matrix(tri).unwrap().transform_point3(Vec3::ZERO);
    assert!(position.abs_diff_eq(Vec3::new(1.0, 3.0, -2.0), 1e-5));
}

#[test]
fn instanced_library_nodes_become_children() {
    let scene = import_dae_from_slice(DOCUMENT.as_bytes(), &TranscoderConfig::default()).unwrap();

    let rig = scene.get_object_by_name("Rig").unwrap();
    let rig = scene.get_object(rig).unwrap();
    assert_eq!(rig.child_ids.len(), 2);

    for &post in &rig.child_ids {
        let post = scene.get_object(post).unwrap();
        assert_eq!(post.name, "post");
        assert!(post.camera_id.is_some());
    }
}

#[test]
fn self_instancing_node_terminates() {
    let scene = import_dae_from_slice(DOCUMENT.as_bytes(), &TranscoderConfig::default()).unwrap();

    let looping = scene.get_object_by_original_id("loop").unwrap();
    assert!(scene.get_object(looping).unwrap().child_ids.is_empty());
}

#[test]
fn flatten_attaches_nodes_to_the_scene_root() {
    let config = TranscoderConfig {
        transform_mode: TransformMode::Flatten,
        convert_up_axis: false,
        ..Default::default()
    };
    let scene = import_dae_from_slice(DOCUMENT.as_bytes(), &config).unwrap();

    let root = scene.root_ids()[0];
    let mut depths = Vec::new();
    scene.walk(|_, _, depth| depths.push(depth));
    assert!(depths.iter().all(|&depth| depth <= 1));

    let post = scene
        .get_object(root)
        .unwrap()
        .children(&scene)
        .find(|object| object.name == "post")
        .unwrap();
    let position = post.transform.get_world_matrix().transform_point3(Vec3::ZERO);
    assert!(position.abs_diff_eq(Vec3::Z, 1e-6));
}

#[test]
fn cancelled_token_stops_import() {
    let token = CancellationToken::new();
    token.cancel();

    let err = import_dae_with_token(DOCUMENT.as_bytes(), &TranscoderConfig::default(), token)
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ImportError>(),
        Some(ImportError::Cancelled)
    ));
}

#[test]
fn malformed_documents_are_parser_errors() {
    let err = import_dae_from_slice(b"<COLLADA>", &TranscoderConfig::default()).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ImportError>(),
        Some(ImportError::Parser(_))
    ));
}
