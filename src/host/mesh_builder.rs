// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Builds hidden helper meshes for `polygon()` and `polyhedron()`

use super::objects::{MeshData, ObjectHandle, ObjectRegistry, Visibility};
use nalgebra::Point3;

/// Builds one flat face from a 2D vertex ring at z = 0.
///
/// The object is registered and hidden in render, viewport and selection so
/// it only shows up through the graph's object-reference node.
pub fn build_polygon(registry: &mut ObjectRegistry, points: &[[f64; 2]]) -> ObjectHandle {
    let vertices: Vec<Point3<f64>> = points
        .iter()
        .map(|p| Point3::new(p[0], p[1], 0.0))
        .collect();
    let faces = vec![(0..vertices.len()).collect()];

    register_hidden(registry, "scad_poly", MeshData { vertices, faces })
}

/// Builds a closed mesh from 3D points and face index rings.
///
/// Face indices must already be validated against `points`.
pub fn build_polyhedron(
    registry: &mut ObjectRegistry,
    points: &[[f64; 3]],
    faces: Vec<Vec<usize>>,
) -> ObjectHandle {
    let vertices = points
        .iter()
        .map(|p| Point3::new(p[0], p[1], p[2]))
        .collect();

    register_hidden(registry, "scad_polyhedron", MeshData { vertices, faces })
}

fn register_hidden(registry: &mut ObjectRegistry, name: &str, mesh: MeshData) -> ObjectHandle {
    let handle = registry.register(name, mesh);
    registry.set_visibility(handle, Visibility::hidden());
    handle
}
