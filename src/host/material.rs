// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Color material cache
//!
//! Known limitation: a material assigned with `color()` does not survive a
//! later mesh boolean, because the boolean node rebuilds the mesh without
//! per-face material slots.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Handle of a registered shading resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialHandle(pub usize);

/// Surface shader of a generated material
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Shader {
    /// Diffuse BSDF wired into the material output
    DiffuseBsdf { color: [f64; 4] },
}

/// A shading resource with a flat base color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub name: String,
    pub diffuse_color: [f64; 4],
    pub surface: Shader,
}

/// Lazily creates one material per distinct RGBA value
#[derive(Debug, Default, Clone)]
pub struct MaterialCache {
    materials: Vec<Material>,
    by_key: AHashMap<String, MaterialHandle>,
}

impl MaterialCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical cache key of an RGBA quadruple.
    ///
    /// `{:?}` prints the shortest representation that parses back to the same
    /// `f64`, so equal keys mean bit-identical components.
    pub fn key(rgba: [f64; 4]) -> String {
        format!(
            "col_[{:?}, {:?}, {:?}, {:?}]",
            rgba[0], rgba[1], rgba[2], rgba[3]
        )
    }

    /// Returns the material for `rgba`, creating it on first use
    pub fn get(&mut self, rgba: [f64; 4]) -> MaterialHandle {
        let key = Self::key(rgba);
        if let Some(handle) = self.by_key.get(&key) {
            return *handle;
        }

        let handle = MaterialHandle(self.materials.len());
        log::debug!("creating material {}", key);
        self.materials.push(Material {
            name: key.clone(),
            diffuse_color: rgba,
            surface: Shader::DiffuseBsdf { color: rgba },
        });
        self.by_key.insert(key, handle);
        handle
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.0)
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
