// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Output finalizer

use super::context::CompileContext;
use super::dispatch::geometry_output;
use crate::error::Result;
use crate::graph::NodeId;

/// Links the geometry output of `result` into the graph's output node.
///
/// The output socket takes a single link, so finalizing twice fails with
/// [`crate::error::GraphError::SocketOccupied`].
pub fn finalize(ctx: &mut CompileContext, result: NodeId) -> Result<()> {
    let socket = geometry_output(&ctx.graph, result)?;
    let output = ctx.graph.output_node();
    ctx.graph.link(result, socket, output, 0)?;
    log::debug!("finalized graph output from {}", result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CompileError, GraphError};
    use crate::graph::NodeType;

    #[test]
    fn test_single_link_into_output() {
        let mut ctx = CompileContext::default();
        let cube = ctx.graph.add_node(NodeType::MeshCube);
        finalize(&mut ctx, cube).unwrap();

        let output = ctx.graph.output_node();
        assert_eq!(ctx.graph.sources(output, 0), vec![cube]);
    }

    #[test]
    fn test_second_finalize_is_rejected() {
        let mut ctx = CompileContext::default();
        let a = ctx.graph.add_node(NodeType::MeshCube);
        let b = ctx.graph.add_node(NodeType::MeshUVSphere);
        finalize(&mut ctx, a).unwrap();

        let err = finalize(&mut ctx, b).unwrap_err();
        assert!(matches!(
            err,
            CompileError::Graph(GraphError::SocketOccupied { .. })
        ));
        assert_eq!(ctx.graph.links().len(), 1);
    }

    #[test]
    fn test_curve_result_is_missing_socket() {
        let mut ctx = CompileContext::default();
        let circle = ctx.graph.add_node(NodeType::CurveCircle);
        assert!(matches!(
            finalize(&mut ctx, circle),
            Err(CompileError::MissingSocket { .. })
        ));
    }
}
