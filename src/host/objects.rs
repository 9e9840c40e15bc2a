// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Standalone mesh objects referenced from the graph

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Handle of a registered object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectHandle(pub usize);

/// Polygon mesh data: vertices and faces as vertex index rings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshData {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Vec<usize>>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Per-context visibility flags of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Visibility {
    pub hide_render: bool,
    pub hide_viewport: bool,
    pub hide_select: bool,
}

impl Visibility {
    /// Hidden in render, viewport and selection at once
    pub fn hidden() -> Self {
        Self {
            hide_render: true,
            hide_viewport: true,
            hide_select: true,
        }
    }

    pub fn is_fully_hidden(&self) -> bool {
        self.hide_render && self.hide_viewport && self.hide_select
    }
}

/// A mesh object registered with the host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneObject {
    pub name: String,
    pub mesh: MeshData,
    pub visibility: Visibility,
}

/// Object registry of the host scene
#[derive(Debug, Default, Clone)]
pub struct ObjectRegistry {
    objects: Vec<SceneObject>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `mesh` as a visible object
    pub fn register(&mut self, name: &str, mesh: MeshData) -> ObjectHandle {
        let handle = ObjectHandle(self.objects.len());
        self.objects.push(SceneObject {
            name: name.to_string(),
            mesh,
            visibility: Visibility::default(),
        });
        handle
    }

    /// Replaces the visibility flags of an object
    pub fn set_visibility(&mut self, handle: ObjectHandle, visibility: Visibility) -> bool {
        match self.objects.get_mut(handle.0) {
            Some(object) => {
                object.visibility = visibility;
                true
            }
            None => false,
        }
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&SceneObject> {
        self.objects.get(handle.0)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
