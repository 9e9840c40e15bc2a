// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Host-side resources referenced by the graph: materials and helper objects

mod material;
mod mesh_builder;
mod objects;

pub use material::{Material, MaterialCache, MaterialHandle, Shader};
pub use mesh_builder::{build_polygon, build_polyhedron};
pub use objects::{MeshData, ObjectHandle, ObjectRegistry, SceneObject, Visibility};
