// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! scadgraph
//!
//! Compiles OpenSCAD CSG operator trees into geometry node graphs: primitives,
//! booleans, transforms, extrusions and curve shapes become typed nodes and
//! links, with shared color materials and hidden helper meshes on the side.

pub mod args;
pub mod ast;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod host;
pub mod io;
pub mod kernel;
pub mod utils;

pub use args::{evaluate_args, ArgMap, Value};
pub use ast::CsgNode;
pub use compiler::{
    compile, compile_call, compile_stream, finalize, CallStream, CompileContext, CompiledScene,
    Operator, OperatorCall, StreamCall,
};
pub use config::CompilerConfig;
pub use diagnostics::{Diagnostics, Warning};
pub use error::{ArgError, CompileError, GraphError, ParseError, Result};
pub use graph::{NodeGraph, NodeId, NodeType, SocketKind, SocketValue};
pub use host::{MaterialCache, MaterialHandle, ObjectHandle, ObjectRegistry};
pub use io::{import_csg_file, parse_csg};
pub use kernel::Kernel;

/// Compile CSG source with the default configuration
pub fn compile_source(source: &str) -> Result<CompiledScene> {
    Kernel::default().compile_source(source)
}
