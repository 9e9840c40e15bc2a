// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Compilation state shared by every call of one tree

use crate::config::CompilerConfig;
use crate::diagnostics::{Diagnostics, Warning};
use crate::graph::{NodeGraph, NodeId};
use crate::host::{Material, MaterialCache, ObjectRegistry, SceneObject};
use serde::Serialize;

/// Owns the graph and the host resources one compilation mutates.
///
/// Passed explicitly into every compiling call; nothing is global.
#[derive(Debug)]
pub struct CompileContext {
    pub graph: NodeGraph,
    pub materials: MaterialCache,
    pub objects: ObjectRegistry,
    pub diagnostics: Diagnostics,
    pub config: CompilerConfig,
}

impl CompileContext {
    pub fn new(config: CompilerConfig) -> Self {
        Self {
            graph: NodeGraph::new(config.graph_name.clone()),
            materials: MaterialCache::new(),
            objects: ObjectRegistry::new(),
            diagnostics: Diagnostics::new(),
            config,
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        self.diagnostics.warnings()
    }

    /// Consumes the context into a finished scene whose root is `result`
    pub fn into_scene(self, result: NodeId) -> CompiledScene {
        CompiledScene {
            graph: self.graph,
            materials: self.materials.materials().to_vec(),
            objects: self.objects.objects().to_vec(),
            warnings: self.diagnostics.into_warnings(),
            result,
        }
    }
}

impl Default for CompileContext {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

/// Everything the host needs to materialize one compiled tree
#[derive(Debug, Clone, Serialize)]
pub struct CompiledScene {
    pub graph: NodeGraph,
    pub materials: Vec<Material>,
    pub objects: Vec<SceneObject>,
    pub warnings: Vec<Warning>,
    /// Node linked into the graph output
    pub result: NodeId,
}

impl CompiledScene {
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}
