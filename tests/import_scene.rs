//! End-to-end import of a hand-built document: a skinned plane under a
//! group, with a bone, attribute layers and object connections.

use fbx::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn vec3_entry(name: &str, x: f64, y: f64, z: f64) -> Element {
    Element::with_properties(
        "P",
        [
            Property::string(name),
            Property::string("Vector3D"),
            Property::string(""),
            Property::string("A"),
            Property::float64(x),
            Property::float64(y),
            Property::float64(z),
        ],
    )
}

fn model(id: i64, name: &str, class: &str, props: Vec<Element>) -> Element {
    let mut block = Element::new("Properties70");
    block.children = props;
    Element::with_properties(
        "Model",
        [
            Property::int64(id),
            Property::string(format!("{name}\0\u{1}Model")),
            Property::string(class),
        ],
    )
    .child(block)
}

fn string_child(tag: &str, value: &str) -> Element {
    Element::with_properties(tag, [Property::string(value)])
}

fn geometry(id: i64) -> Element {
    Element::with_properties(
        "Geometry",
        [Property::int64(id), Property::string("plane\0\u{1}Geometry"), Property::string("Mesh")],
    )
    .child(Element::with_properties(
        "Vertices",
        [Property::float64_array(&[
            0.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, //
            1.0, 1.0, 0.0, //
            0.0, 1.0, 0.0,
        ])],
    ))
    .child(Element::with_properties(
        "PolygonVertexIndex",
        [Property::int32_array(&[0, 1, 2, -4])],
    ))
    .child(
        Element::new("LayerElementNormal")
            .child(string_child("MappingInformationType", "ByPolygonVertex"))
            .child(string_child("ReferenceInformationType", "Direct"))
            .child(Element::with_properties(
                "Normals",
                [Property::float64_array(&[
                    0.0, 0.0, 1.0, //
                    0.0, 0.0, 1.0, //
                    0.0, 0.0, 1.0, //
                    0.0, 0.0, 1.0,
                ])],
            )),
    )
    .child(
        Element::new("LayerElementMaterial")
            .child(string_child("MappingInformationType", "AllSame"))
            .child(string_child("ReferenceInformationType", "IndexToDirect"))
            // AllSame + IndexToDirect resolves indices[indices[0]]
            .child(Element::with_properties("Materials", [Property::int32_array(&[1, 0])])),
    )
}

fn deformer(id: i64, class: &str) -> Element {
    Element::with_properties(
        "Deformer",
        [Property::int64(id), Property::string("d\0\u{1}Deformer"), Property::string(class)],
    )
}

fn connection(child: i64, parent: i64) -> Element {
    Element::with_properties(
        "C",
        [Property::string("OO"), Property::int64(child), Property::int64(parent)],
    )
}

fn document() -> Element {
    let cluster = deformer(500, "Cluster")
        .child(Element::with_properties("Indexes", [Property::int32_array(&[0, 1])]))
        .child(Element::with_properties("Weights", [Property::float64_array(&[1.0, 0.5])]));

    Element::new("Document")
        .child(
            Element::new("Objects")
                .child(model(10, "group", "Null", vec![vec3_entry("Lcl Translation", 1.0, 0.0, 0.0)]))
                .child(model(
                    20,
                    "plane",
                    "Mesh",
                    vec![vec3_entry("Lcl Translation", 0.0, 1.0, 0.0)],
                ))
                .child(model(30, "bone", "LimbNode", vec![]))
                .child(geometry(100))
                .child(deformer(400, "Skin"))
                .child(cluster),
        )
        .child(
            Element::new("Connections")
                .child(connection(10, 0)) // group under root
                .child(connection(20, 10)) // plane under group
                .child(connection(30, 10)) // bone under group
                .child(connection(100, 20)) // geometry on plane
                .child(connection(30, 500)) // bone drives cluster
                .child(connection(500, 400)) // cluster in skin
                .child(connection(400, 100)), // skin deforms geometry
        )
}

#[test]
fn imports_full_scene() {
    init_tracing();
    let scene = import_scene(&document(), ImportPolicy::Strict).unwrap();

    // Synthetic root + 3 models
    assert_eq!(scene.hierarchy.len(), 4);
    let group = scene.hierarchy.find_by_name(scene.root, "group").unwrap();
    let plane = scene.hierarchy.find_by_name(scene.root, "plane").unwrap();
    let bone = scene.hierarchy.find_by_name(scene.root, "bone").unwrap();

    assert_eq!(scene.hierarchy.node(group).parent, Some(scene.root));
    assert_eq!(scene.hierarchy.node(plane).parent, Some(group));
    assert_eq!(scene.hierarchy.node(bone).parent, Some(group));
    assert!(scene.hierarchy.node(group).is_group());
    assert!(matches!(scene.hierarchy.node(bone).kind, NodeKind::Bone));

    // World matrices composed top-down
    let world = scene.hierarchy.node(plane).matrix_world;
    assert_eq!(world.w_axis.x, 1.0);
    assert_eq!(world.w_axis.y, 1.0);

    // Geometry attached through connections
    let geometry_index = scene.hierarchy.node(plane).geometry.unwrap();
    let buffers = &scene.geometries[geometry_index];
    assert_eq!(buffers.vertex_count(), 4);
    assert_eq!(buffers.polygon_vertices().len(), 4);
}

#[test]
fn wires_skin_and_cluster() {
    let scene = import_scene(&document(), ImportPolicy::Strict).unwrap();
    let plane = scene.hierarchy.find_by_name(scene.root, "plane").unwrap();
    let bone = scene.hierarchy.find_by_name(scene.root, "bone").unwrap();

    let skin_id = scene.hierarchy.node(plane).skeleton.unwrap();
    let skin = scene.skin(skin_id);
    assert_eq!(skin.cluster_count(), 1);

    let cluster = skin.cluster(0).unwrap();
    assert_eq!(cluster.bone, Some(bone));
    assert_eq!(cluster.indices, [0, 1]);
    assert_eq!(cluster.weights, [1.0, 0.5]);

    // Bind matrix captured from the node's world transform
    assert_eq!(scene.hierarchy.node(plane).bind_matrix, scene.hierarchy.node(plane).matrix_world);

    assert!(skin.cluster(1).is_err());
}

#[test]
fn resolves_material_double_indirection() {
    let scene = import_scene(&document(), ImportPolicy::Strict).unwrap();
    let buffers = &scene.geometries[0];
    let materials = buffers.materials.as_ref().unwrap();

    // The array doubles as values and indices: the slot is
    // indices[indices[0]] = indices[1] = 0, and the value there is 1.
    let expanded = buffers.expand_layer(materials).unwrap();
    let values: &[i32] = bytemuck::cast_slice(&expanded);
    assert_eq!(values, [1, 1, 1, 1]);
}

#[test]
fn best_effort_skips_malformed_layer() {
    init_tracing();
    let mut doc = document();
    // Corrupt the normal layer's mapping string inside the geometry
    let objects = &mut doc.children[0];
    let geometry = &mut objects.children[3];
    geometry.children[2].children[0].properties[0] = Property::string("ByEdge");

    assert!(import_scene(&doc, ImportPolicy::Strict).is_err());

    let scene = import_scene(&doc, ImportPolicy::BestEffort).unwrap();
    let buffers = &scene.geometries[0];
    assert!(buffers.normals.is_none());
    assert!(buffers.materials.is_some());
}
