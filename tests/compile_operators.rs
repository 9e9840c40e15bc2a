// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Operator compilation properties

use scadgraph::graph::{BooleanOperation, NodeType, SocketKind, SocketValue};
use scadgraph::{compile_call, CompileContext, NodeId, OperatorCall, Warning};

fn call(ctx: &mut CompileContext, name: &str, args: &str, children: Vec<NodeId>) -> NodeId {
    compile_call(ctx, &OperatorCall::new(name, args, children)).unwrap()
}

fn vector_input(ctx: &CompileContext, node: NodeId, socket: &str) -> [f64; 3] {
    ctx.graph
        .node(node)
        .unwrap()
        .input(socket)
        .and_then(|s| s.value.as_vector())
        .unwrap()
}

fn node_type(ctx: &CompileContext, node: NodeId) -> NodeType {
    ctx.graph.node(node).unwrap().node_type
}

#[test]
fn test_every_operator_yields_geometry_output() {
    let mut ctx = CompileContext::default();
    let child = call(&mut ctx, "cube", "size = 1, center = true", vec![]);

    let cases: &[(&str, &str, bool)] = &[
        ("sphere", "$fn = 0, $fa = 12, $fs = 2, r = 1", false),
        ("cube", "size = [1, 2, 3], center = false", false),
        ("cylinder", "$fn = 16, h = 2, r1 = 1, r2 = 1, center = true", false),
        ("multmatrix", "[[1, 0, 0, 0], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]", true),
        ("color", "[0, 0, 1, 1]", true),
        ("difference", "", true),
        ("union", "", true),
        ("group", "", true),
        ("render", "convexity = 2", true),
        ("intersection", "", true),
        ("text", "text = \"abc\", size = 10", false),
        ("circle", "$fn = 0, $fa = 12, $fs = 2, r = 1", false),
        ("square", "size = [2, 2], center = false", false),
        ("polygon", "points = [[0, 0], [1, 0], [0, 1]], paths = undef, convexity = 1", false),
        ("linear_extrude", "height = 3, center = false, convexity = 1", true),
        ("hull", "", true),
        ("minkowski", "convexity = 0", true),
        ("rotate_extrude", "angle = 360", true),
    ];

    for (name, args, takes_child) in cases {
        let children = if *takes_child { vec![child] } else { vec![] };
        let before = ctx.graph.node_count();
        let result = call(&mut ctx, name, args, children);

        assert!(result.0 >= before, "{} must return a node it created", name);
        let node = ctx.graph.node(result).unwrap();
        assert!(
            node.first_output(SocketKind::Geometry).is_some(),
            "{} result has no geometry output",
            name
        );
    }
}

#[test]
fn test_uncentered_cube_is_translated_by_half_size() {
    let mut ctx = CompileContext::default();
    let result = call(&mut ctx, "cube", "size = [2, 4, 6], center = false", vec![]);

    assert_eq!(node_type(&ctx, result), NodeType::Transform);
    assert_eq!(vector_input(&ctx, result, "Translation"), [1.0, 2.0, 3.0]);

    let sources = ctx.graph.sources(result, 0);
    assert_eq!(sources.len(), 1);
    assert_eq!(node_type(&ctx, sources[0]), NodeType::MeshCube);
    assert_eq!(vector_input(&ctx, sources[0], "Size"), [2.0, 4.0, 6.0]);
}

#[test]
fn test_centered_cube_is_the_primitive() {
    let mut ctx = CompileContext::default();
    let result = call(&mut ctx, "cube", "size = [2, 4, 6], center = true", vec![]);
    assert_eq!(node_type(&ctx, result), NodeType::MeshCube);
    assert_eq!(ctx.graph.node_count(), 2);
}

#[test]
fn test_centered_cylinder_is_shifted_down() {
    let mut ctx = CompileContext::default();
    let result = call(&mut ctx, "cylinder", "h = 10, r1 = 3, r2 = 3, center = true", vec![]);
    assert_eq!(node_type(&ctx, result), NodeType::Transform);
    assert_eq!(vector_input(&ctx, result, "Translation"), [0.0, 0.0, -5.0]);
    assert_eq!(node_type(&ctx, ctx.graph.sources(result, 0)[0]), NodeType::MeshCone);

    let result = call(&mut ctx, "cylinder", "h = 10, r1 = 3, r2 = 3, center = false", vec![]);
    assert_eq!(node_type(&ctx, result), NodeType::MeshCone);
}

#[test]
fn test_color_materials_are_shared() {
    let mut ctx = CompileContext::default();
    let a = call(&mut ctx, "sphere", "r = 1", vec![]);
    let b = call(&mut ctx, "sphere", "r = 2", vec![]);
    let c = call(&mut ctx, "sphere", "r = 3", vec![]);

    let red1 = call(&mut ctx, "color", "[1, 0, 0, 1]", vec![a]);
    let red2 = call(&mut ctx, "color", "[1.0, 0.0, 0.0, 1.0]", vec![b]);
    let blue = call(&mut ctx, "color", "[0, 0, 1, 1]", vec![c]);

    let material = |id| ctx.graph.node(id).unwrap().input("Material").unwrap().value.clone();
    assert_eq!(material(red1), material(red2));
    assert_ne!(material(red1), material(blue));
    assert_eq!(ctx.materials.len(), 2);
    assert!(matches!(material(red1), SocketValue::Material(Some(_))));
}

#[test]
fn test_difference_wiring() {
    let mut ctx = CompileContext::default();
    let a = call(&mut ctx, "cube", "size = 10, center = true", vec![]);
    let b = call(&mut ctx, "sphere", "r = 6", vec![]);
    let c = call(&mut ctx, "cylinder", "h = 20, r = 2, center = true", vec![]);
    let result = call(&mut ctx, "difference", "", vec![a, b, c]);

    assert_eq!(
        node_type(&ctx, result),
        NodeType::MeshBoolean {
            operation: BooleanOperation::Difference
        }
    );
    assert_eq!(ctx.graph.sources(result, 0), vec![a]);
    assert_eq!(ctx.graph.sources(result, 1), vec![b, c]);
}

#[test]
fn test_minkowski_matches_hull_with_one_warning() {
    let build = |name: &str| {
        let mut ctx = CompileContext::default();
        let a = call(&mut ctx, "cube", "size = 2, center = true", vec![]);
        let b = call(&mut ctx, "sphere", "r = 1", vec![]);
        call(&mut ctx, name, "", vec![a, b]);
        ctx
    };
    let hull = build("hull");
    let minkowski = build("minkowski");

    let types = |ctx: &CompileContext| -> Vec<NodeType> {
        ctx.graph.nodes().iter().map(|n| n.node_type).collect()
    };
    assert_eq!(types(&hull), types(&minkowski));
    assert_eq!(hull.graph.links(), minkowski.graph.links());

    assert!(hull.warnings().is_empty());
    assert_eq!(minkowski.warnings(), &[Warning::MinkowskiApproximation { line: 0 }]);
}

#[test]
fn test_unknown_operator_becomes_unit_cube() {
    let mut ctx = CompileContext::default();
    let result = compile_call(
        &mut ctx,
        &OperatorCall::new("frobnicate", "x = 1", vec![]).at_line(7),
    )
    .unwrap();

    assert_eq!(node_type(&ctx, result), NodeType::MeshCube);
    assert_eq!(vector_input(&ctx, result, "Size"), [1.0, 1.0, 1.0]);
    assert_eq!(ctx.warnings().len(), 1);
    assert!(ctx.warnings()[0].to_string().contains("frobnicate"));
    assert_eq!(ctx.warnings()[0].line(), 7);
}

#[test]
fn test_polygon_references_hidden_mesh() {
    let mut ctx = CompileContext::default();
    let result = call(&mut ctx, "polygon", "points = [[0, 0], [1, 0], [0, 1]]", vec![]);

    let node = ctx.graph.node(result).unwrap();
    assert_eq!(node.node_type, NodeType::ObjectInfo);
    let handle = match node.input("Object").unwrap().value {
        SocketValue::Object(Some(handle)) => handle,
        ref other => panic!("unexpected object input {:?}", other),
    };

    let object = ctx.objects.object(handle).unwrap();
    assert_eq!(object.mesh.vertex_count(), 3);
    assert_eq!(object.mesh.face_count(), 1);
    assert_eq!(object.mesh.faces[0], vec![0, 1, 2]);
    assert!(object.mesh.vertices.iter().all(|v| v.z == 0.0));
    assert!(object.visibility.hide_render);
    assert!(object.visibility.hide_viewport);
    assert!(object.visibility.hide_select);
}

#[test]
fn test_single_child_transform_without_children() {
    let mut ctx = CompileContext::default();
    let result = call(&mut ctx, "color", "[1, 1, 1, 1]", vec![]);
    assert_eq!(node_type(&ctx, result), NodeType::SetMaterial);
    assert!(ctx.graph.links().is_empty());
}
