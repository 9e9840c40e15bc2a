// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Operator dispatcher
//!
//! Turns one operator call, its evaluated arguments and its compiled children
//! into graph nodes. Every call yields exactly one result node whose geometry
//! output represents the operator.

use super::context::CompileContext;
use super::decompose::{decompose, matrix_from_rows};
use super::operator::{Operator, OperatorCall};
use super::params::Params;
use crate::args::{evaluate_args, ArgMap, Value};
use crate::diagnostics::Warning;
use crate::error::{CompileError, Result};
use crate::graph::{
    BooleanOperation, FillMode, NodeGraph, NodeId, NodeType, SocketKind, SocketValue,
};
use crate::host::{build_polygon, build_polyhedron, ObjectHandle};
use nalgebra::Vector3;

/// Evaluates the call's argument text and compiles it
pub fn compile_call(ctx: &mut CompileContext, call: &OperatorCall) -> Result<NodeId> {
    let args = evaluate_args(&call.args).map_err(|source| CompileError::Evaluation {
        line: call.line,
        source,
    })?;
    compile(ctx, call, &args)
}

/// Compiles one call with already evaluated arguments.
///
/// Argument evaluation and wiring errors are fatal. Unknown operators and
/// `minkowski` only record a warning.
pub fn compile(ctx: &mut CompileContext, call: &OperatorCall, args: &ArgMap) -> Result<NodeId> {
    let params = Params::new(&call.name, call.line, args);
    let children = call.children.as_slice();

    let result = match Operator::from_name(&call.name) {
        Operator::Sphere => sphere(ctx, &params)?,
        Operator::Cube => cube(ctx, &params)?,
        Operator::Cylinder => cylinder(ctx, &params)?,
        Operator::Multmatrix => multmatrix(ctx, &params, children)?,
        Operator::Color => color(ctx, &params, children)?,
        Operator::Difference => boolean(&mut ctx.graph, BooleanOperation::Difference, children)?,
        Operator::Union => boolean(&mut ctx.graph, BooleanOperation::Union, children)?,
        Operator::Intersection => {
            boolean(&mut ctx.graph, BooleanOperation::Intersect, children)?
        }
        Operator::Text => text(ctx, &params)?,
        Operator::Circle => circle(ctx, &params)?,
        Operator::Square => square(ctx, &params)?,
        Operator::Polygon => polygon(ctx, &params)?,
        Operator::Polyhedron => polyhedron(ctx, &params)?,
        Operator::LinearExtrude => linear_extrude(ctx, &params, children)?,
        Operator::Hull => hull(&mut ctx.graph, children)?,
        Operator::Minkowski => {
            ctx.diagnostics
                .warn(Warning::MinkowskiApproximation { line: call.line });
            hull(&mut ctx.graph, children)?
        }
        Operator::Unknown(name) => {
            ctx.diagnostics.warn(Warning::UnknownOperator {
                name,
                line: call.line,
            });
            let cube = ctx.graph.add_node(NodeType::MeshCube);
            ctx.graph
                .set_input(cube, "Size", SocketValue::Vector([1.0, 1.0, 1.0]))?;
            cube
        }
    };

    log::debug!(
        "line {}: {}({}) with {} children -> {}",
        call.line,
        call.name,
        call.args,
        children.len(),
        result
    );
    Ok(result)
}

fn sphere(ctx: &mut CompileContext, params: &Params) -> Result<NodeId> {
    let r = params.radius("r", "d", Some(0))?.unwrap_or(1.0);
    let fragments = params.fragments(r, &ctx.config)?;

    let graph = &mut ctx.graph;
    let sphere = graph.add_node(NodeType::MeshUVSphere);
    graph.set_input(sphere, "Radius", SocketValue::Float(r))?;
    graph.set_input(sphere, "Segments", SocketValue::Int(fragments))?;
    graph.set_input(sphere, "Rings", SocketValue::Int(fragments))?;
    Ok(sphere)
}

fn cube(ctx: &mut CompileContext, params: &Params) -> Result<NodeId> {
    let size = params.size("size", Some(0), [1.0; 3], "a number or a 3-vector")?;
    let center = params.flag("center", false)?;

    let graph = &mut ctx.graph;
    let cube = graph.add_node(NodeType::MeshCube);
    graph.set_input(cube, "Size", SocketValue::Vector(size))?;

    // The box primitive is origin-centered
    if center {
        Ok(cube)
    } else {
        add_translate(graph, cube, size.map(|s| s / 2.0))
    }
}

fn cylinder(ctx: &mut CompileContext, params: &Params) -> Result<NodeId> {
    let h = params.number_or("h", Some(0), 1.0)?;
    let r = params.radius("r", "d", None)?;
    let r1 = params.radius("r1", "d1", Some(1))?.or(r).unwrap_or(1.0);
    let r2 = params.radius("r2", "d2", Some(2))?.or(r).unwrap_or(1.0);
    let center = params.flag("center", false)?;
    let fragments = params.fragments(r1.max(r2), &ctx.config)?;

    let graph = &mut ctx.graph;
    let cone = graph.add_node(NodeType::MeshCone);
    graph.set_input(cone, "Depth", SocketValue::Float(h))?;
    // Deliberately OpenSCAD's convention: r1 is the bottom radius, not the top
    graph.set_input(cone, "Radius Bottom", SocketValue::Float(r1))?;
    graph.set_input(cone, "Radius Top", SocketValue::Float(r2))?;
    graph.set_input(cone, "Vertices", SocketValue::Int(fragments))?;

    if center {
        add_translate(graph, cone, [0.0, 0.0, -h / 2.0])
    } else {
        Ok(cone)
    }
}

fn multmatrix(ctx: &mut CompileContext, params: &Params, children: &[NodeId]) -> Result<NodeId> {
    let rows = params
        .value("m", Some(0))
        .and_then(Value::as_matrix4)
        .ok_or_else(|| params.invalid("m", "a 4x4 matrix"))?;
    let d = decompose(&matrix_from_rows(&rows));

    let graph = &mut ctx.graph;
    let transform = graph.add_node(NodeType::Transform);
    graph.set_input(transform, "Translation", vector(&d.translation))?;
    graph.set_input(transform, "Rotation", vector(&d.rotation))?;
    graph.set_input(transform, "Scale", vector(&d.scale))?;
    link_single(graph, children, transform, 0)?;
    Ok(transform)
}

fn color(ctx: &mut CompileContext, params: &Params, children: &[NodeId]) -> Result<NodeId> {
    let rgba = params
        .value("c", Some(0))
        .and_then(Value::as_numbers)
        .and_then(|c| match c.as_slice() {
            [r, g, b] => Some([*r, *g, *b, 1.0]),
            [r, g, b, a] => Some([*r, *g, *b, *a]),
            _ => None,
        })
        .ok_or_else(|| params.invalid("c", "an RGB or RGBA vector"))?;
    let material = ctx.materials.get(rgba);

    let graph = &mut ctx.graph;
    let set_material = graph.add_node(NodeType::SetMaterial);
    graph.set_input(set_material, "Material", SocketValue::Material(Some(material)))?;
    link_single(graph, children, set_material, 0)?;
    Ok(set_material)
}

fn text(ctx: &mut CompileContext, params: &Params) -> Result<NodeId> {
    let string = params.string("text", Some(0))?.to_string();
    let size = params.number_or("size", Some(1), 10.0)?;

    let graph = &mut ctx.graph;
    let curves = graph.add_node(NodeType::StringToCurves);
    graph.set_input(curves, "String", SocketValue::String(string))?;
    graph.set_input(curves, "Size", SocketValue::Float(size))?;
    add_fill(graph, curves)
}

fn circle(ctx: &mut CompileContext, params: &Params) -> Result<NodeId> {
    let r = params.radius("r", "d", Some(0))?.unwrap_or(1.0);
    let fragments = params.fragments(r, &ctx.config)?;

    let graph = &mut ctx.graph;
    let circle = graph.add_node(NodeType::CurveCircle);
    graph.set_input(circle, "Radius", SocketValue::Float(r))?;
    graph.set_input(circle, "Resolution", SocketValue::Int(fragments))?;
    add_fill(graph, circle)
}

fn square(ctx: &mut CompileContext, params: &Params) -> Result<NodeId> {
    let [w, h] = params.size("size", Some(0), [1.0; 2], "a number or a 2-vector")?;
    let center = params.flag("center", false)?;

    let graph = &mut ctx.graph;
    let quad = graph.add_node(NodeType::CurveQuadrilateral);
    graph.set_input(quad, "Width", SocketValue::Float(w))?;
    graph.set_input(quad, "Height", SocketValue::Float(h))?;
    let filled = add_fill(graph, quad)?;

    if center {
        Ok(filled)
    } else {
        add_translate(graph, filled, [w / 2.0, h / 2.0, 0.0])
    }
}

fn polygon(ctx: &mut CompileContext, params: &Params) -> Result<NodeId> {
    let points = params
        .value("points", Some(0))
        .and_then(Value::as_rows::<2>)
        .filter(|p| p.len() >= 3)
        .ok_or_else(|| params.invalid("points", "a list of at least three 2D points"))?;

    let object = build_polygon(&mut ctx.objects, &points);
    object_info(&mut ctx.graph, object)
}

fn polyhedron(ctx: &mut CompileContext, params: &Params) -> Result<NodeId> {
    let points = params
        .value("points", Some(0))
        .and_then(Value::as_rows::<3>)
        .ok_or_else(|| params.invalid("points", "a list of 3D points"))?;

    let (name, faces) = match params.value("faces", Some(1)) {
        Some(faces) => ("faces", faces),
        None => (
            "triangles",
            params
                .value("triangles", None)
                .ok_or_else(|| params.invalid("faces", "a list of index lists"))?,
        ),
    };
    let faces = faces
        .as_index_lists()
        .filter(|faces| {
            faces
                .iter()
                .all(|f| f.len() >= 3 && f.iter().all(|&i| i < points.len()))
        })
        .ok_or_else(|| params.invalid(name, "index lists of at least three valid points"))?;

    let object = build_polyhedron(&mut ctx.objects, &points, faces);
    object_info(&mut ctx.graph, object)
}

fn linear_extrude(
    ctx: &mut CompileContext,
    params: &Params,
    children: &[NodeId],
) -> Result<NodeId> {
    let height = params.number_or("height", Some(0), 100.0)?;

    let graph = &mut ctx.graph;
    let base = single_geometry(graph, children)?;

    let extrude = graph.add_node(NodeType::ExtrudeMesh);
    graph.set_input(extrude, "Individual", SocketValue::Bool(false))?;
    graph.set_input(extrude, "Offset Scale", SocketValue::Float(height))?;

    // Union of base and extrusion closes the bottom cap
    let union = graph.add_node(NodeType::MeshBoolean {
        operation: BooleanOperation::Union,
    });
    if let Some(base) = base {
        link_geometry(graph, base, extrude, 0)?;
        link_geometry(graph, base, union, 1)?;
    }
    link_geometry(graph, extrude, union, 1)?;

    add_translate(graph, union, [0.0, 0.0, height / 2.0])
}

/// Convex hull of all children.
///
/// A single-input hull node gets the union of the children; a multi-input one
/// is fed the children directly.
fn hull(graph: &mut NodeGraph, children: &[NodeId]) -> Result<NodeId> {
    let hull = graph.add_node(NodeType::ConvexHull);
    let accepts_many = graph.node(hull)?.inputs[0].multi_input;

    if accepts_many {
        for &child in children {
            link_geometry(graph, child, hull, 0)?;
        }
    } else {
        let union = boolean(graph, BooleanOperation::Union, children)?;
        link_geometry(graph, union, hull, 0)?;
    }
    Ok(hull)
}

/// Boolean node over `children`.
///
/// Difference takes its base from the first child and subtracts the rest;
/// union and intersection feed every child into the multi-input operand.
fn boolean(
    graph: &mut NodeGraph,
    operation: BooleanOperation,
    children: &[NodeId],
) -> Result<NodeId> {
    let node = graph.add_node(NodeType::MeshBoolean { operation });

    let operands = match (operation, children.split_first()) {
        (BooleanOperation::Difference, Some((&base, rest))) => {
            link_geometry(graph, base, node, 0)?;
            rest
        }
        _ => children,
    };
    for &child in operands {
        link_geometry(graph, child, node, 1)?;
    }
    Ok(node)
}

/// One geometry standing for all children: none, the child, or their union
fn single_geometry(graph: &mut NodeGraph, children: &[NodeId]) -> Result<Option<NodeId>> {
    match children {
        [] => Ok(None),
        [child] => Ok(Some(*child)),
        _ => boolean(graph, BooleanOperation::Union, children).map(Some),
    }
}

/// Links the implicit union of `children` into `to`, if there are any
fn link_single(
    graph: &mut NodeGraph,
    children: &[NodeId],
    to: NodeId,
    to_socket: usize,
) -> Result<()> {
    if let Some(child) = single_geometry(graph, children)? {
        link_geometry(graph, child, to, to_socket)?;
    }
    Ok(())
}

fn object_info(graph: &mut NodeGraph, object: ObjectHandle) -> Result<NodeId> {
    let info = graph.add_node(NodeType::ObjectInfo);
    graph.set_input(info, "Object", SocketValue::Object(Some(object)))?;
    Ok(info)
}

/// Transform node translating the geometry of `from` by `offset`
fn add_translate(graph: &mut NodeGraph, from: NodeId, offset: [f64; 3]) -> Result<NodeId> {
    let transform = graph.add_node(NodeType::Transform);
    graph.set_input(transform, "Translation", SocketValue::Vector(offset))?;
    link_geometry(graph, from, transform, 0)?;
    Ok(transform)
}

/// N-gon fill of the curve output of `from`
fn add_fill(graph: &mut NodeGraph, from: NodeId) -> Result<NodeId> {
    let fill = graph.add_node(NodeType::FillCurve {
        mode: FillMode::Ngons,
    });
    let socket = output_of_kind(graph, from, SocketKind::Curve)?;
    graph.link(from, socket, fill, 0)?;
    Ok(fill)
}

fn link_geometry(graph: &mut NodeGraph, from: NodeId, to: NodeId, to_socket: usize) -> Result<()> {
    let socket = geometry_output(graph, from)?;
    graph.link(from, socket, to, to_socket)?;
    Ok(())
}

/// Index of the first geometry output of `node`
pub fn geometry_output(graph: &NodeGraph, node: NodeId) -> Result<usize> {
    output_of_kind(graph, node, SocketKind::Geometry)
}

fn output_of_kind(graph: &NodeGraph, node: NodeId, kind: SocketKind) -> Result<usize> {
    let n = graph.node(node)?;
    n.first_output(kind).ok_or(CompileError::MissingSocket {
        node,
        node_type: n.node_type.id_name(),
        kind,
    })
}

fn vector(v: &Vector3<f64>) -> SocketValue {
    SocketValue::Vector([v.x, v.y, v.z])
}
