// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Bottom-up operator call streams
//!
//! A [`CallStream`] is the flat form of an operator tree: every call refers
//! to its children by the index of an earlier call, so compiling the calls in
//! order always has the children ready.

use super::context::CompileContext;
use super::dispatch::compile_call;
use super::finalize::finalize;
use super::operator::OperatorCall;
use crate::error::{CompileError, Result};
use crate::graph::NodeId;
use serde::{Deserialize, Serialize};

/// One call of a stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCall {
    pub name: String,
    #[serde(default)]
    pub args: String,
    /// Indices of earlier calls, in call order
    #[serde(default)]
    pub children: Vec<usize>,
    #[serde(default)]
    pub line: usize,
}

impl StreamCall {
    pub fn new(name: impl Into<String>, args: impl Into<String>, children: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
            children,
            line: 0,
        }
    }
}

/// Ordered calls plus the index of the call whose result is the graph output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallStream {
    pub calls: Vec<StreamCall>,
    pub output: usize,
}

impl CallStream {
    /// Stream whose output is its last call
    pub fn new(calls: Vec<StreamCall>) -> Self {
        let output = calls.len().saturating_sub(1);
        Self { calls, output }
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

/// Compiles every call of `stream` in order and finalizes the graph output.
///
/// Returns the node linked into the output.
pub fn compile_stream(ctx: &mut CompileContext, stream: &CallStream) -> Result<NodeId> {
    if stream.is_empty() {
        return Err(CompileError::EmptyStream);
    }
    if stream.output >= stream.len() {
        return Err(CompileError::UnknownOutput(stream.output));
    }

    let mut results: Vec<NodeId> = Vec::with_capacity(stream.len());
    for (index, call) in stream.calls.iter().enumerate() {
        let children = call
            .children
            .iter()
            .map(|&child| {
                results
                    .get(child)
                    .copied()
                    .ok_or(CompileError::ForwardReference { call: index, child })
            })
            .collect::<Result<Vec<_>>>()?;

        let operator_call =
            OperatorCall::new(call.name.as_str(), call.args.as_str(), children).at_line(call.line);
        results.push(compile_call(ctx, &operator_call)?);
    }

    let result = results[stream.output];
    finalize(ctx, result)?;

    log::info!(
        "compiled {} calls into {} nodes ({} warnings)",
        stream.len(),
        ctx.graph.node_count(),
        ctx.diagnostics.len()
    );
    Ok(result)
}
