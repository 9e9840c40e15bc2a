// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Kernel API: CSG source or call streams in, compiled scenes out

use crate::ast::lower_with_passes;
use crate::compiler::{compile_stream, CallStream, CompileContext, CompiledScene};
use crate::config::CompilerConfig;
use crate::error::Result;
use crate::io::{import_csg_file, is_call_stream, parse_csg, read_call_stream};
use anyhow::Context;
use std::path::Path;

/// Main kernel; every compilation gets a fresh context
#[derive(Debug, Clone, Default)]
pub struct Kernel {
    config: CompilerConfig,
}

impl Kernel {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Parse and simplify CSG source into a call stream
    pub fn lower_source(&self, source: &str) -> Result<CallStream> {
        let tree = parse_csg(source)?;
        lower_with_passes(tree, &self.config.passes)
    }

    /// Compile a call stream into a finished scene
    pub fn compile_stream(&self, stream: &CallStream) -> Result<CompiledScene> {
        let mut ctx = CompileContext::new(self.config.clone());
        let result = compile_stream(&mut ctx, stream)?;
        Ok(ctx.into_scene(result))
    }

    /// Compile CSG source into a finished scene
    pub fn compile_source(&self, source: &str) -> Result<CompiledScene> {
        let stream = self.lower_source(source)?;
        self.compile_stream(&stream)
    }

    /// Load a call stream from a `.json` stream or a `.csg` file
    pub fn load_stream(&self, path: impl AsRef<Path>) -> anyhow::Result<CallStream> {
        let path = path.as_ref();
        if is_call_stream(path) {
            return read_call_stream(path);
        }
        let tree = import_csg_file(path)?;
        lower_with_passes(tree, &self.config.passes)
            .with_context(|| format!("Failed to lower {}", path.display()))
    }

    /// Compile a `.json` stream or a `.csg` file
    pub fn compile_file(&self, path: impl AsRef<Path>) -> anyhow::Result<CompiledScene> {
        let path = path.as_ref();
        let stream = self.load_stream(path)?;
        self.compile_stream(&stream)
            .with_context(|| format!("Failed to compile {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;
    use crate::graph::NodeType;

    #[test]
    fn test_compile_source() {
        let scene = Kernel::default()
            .compile_source("group() { cube(size = [1, 1, 1], center = true); }")
            .unwrap();
        let graph = &scene.graph;
        assert_eq!(graph.node(scene.result).unwrap().node_type, NodeType::MeshCube);
        assert_eq!(graph.sources(graph.output_node(), 0), vec![scene.result]);
    }

    #[test]
    fn test_empty_source_is_fatal() {
        let kernel = Kernel::default();
        assert_eq!(kernel.compile_source("group();").unwrap_err(), CompileError::EmptyStream);
        assert_eq!(kernel.compile_source("").unwrap_err(), CompileError::EmptyStream);
    }

    #[test]
    fn test_passes_can_be_disabled() {
        let source = "group() { cube(size = 1); }";
        let with = Kernel::default().lower_source(source).unwrap();
        let without = Kernel::new(CompilerConfig::without_passes())
            .lower_source(source)
            .unwrap();
        assert_eq!(with.len(), 1);
        assert_eq!(without.len(), 3);
    }

    #[test]
    fn test_graph_name_from_config() {
        let config = CompilerConfig {
            graph_name: "scad".to_string(),
            ..CompilerConfig::default()
        };
        let scene = Kernel::new(config).compile_source("sphere(r = 1);").unwrap();
        assert_eq!(scene.graph.name, "scad");
    }
}
