// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Error types
//!
//! Every error here is structural: it aborts the branch being compiled and
//! surfaces to the caller. Vocabulary gaps are not errors, see
//! [`crate::diagnostics`].

use crate::graph::{NodeId, SocketKind};
use thiserror::Error;

/// Errors raised while evaluating a raw argument list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgError {
    /// The text is not a well-formed argument list.
    #[error("malformed argument list `{text}`: {message}")]
    Syntax { text: String, message: String },

    /// A positional argument follows a named one.
    #[error("positional argument after named argument in `{0}`")]
    PositionalAfterNamed(String),

    /// The same name is bound twice.
    #[error("argument `{name}` given more than once in `{text}`")]
    Duplicate { name: String, text: String },

    /// A numeric literal does not fit an `f64`.
    #[error("invalid number literal `{0}`")]
    Number(String),
}

/// Errors raised by graph construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    #[error("node {node} ({node_type}) has no input socket {socket}")]
    NoSuchInput {
        node: NodeId,
        node_type: &'static str,
        socket: usize,
    },

    #[error("node {node} ({node_type}) has no output socket {socket}")]
    NoSuchOutput {
        node: NodeId,
        node_type: &'static str,
        socket: usize,
    },

    /// A single-input socket already has its link.
    #[error("input `{socket}` of node {node} already has an incoming link")]
    SocketOccupied { node: NodeId, socket: &'static str },

    #[error("cannot link a {from} output into a {to} input")]
    KindMismatch { from: SocketKind, to: SocketKind },

    /// A default value of the wrong shape was assigned to a socket.
    #[error("input `{socket}` of {node_type} does not accept a {kind} value")]
    ValueMismatch {
        node_type: &'static str,
        socket: &'static str,
        kind: SocketKind,
    },

    #[error("node {node} ({node_type}) has no input named `{socket}`")]
    NoSuchNamedInput {
        node: NodeId,
        node_type: &'static str,
        socket: String,
    },
}

/// Errors raised while reading CSG source text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("CSG syntax error: {0}")]
    Syntax(String),
}

/// Errors raised while compiling operator calls into a node graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Argument text of a call could not be evaluated.
    #[error("line {line}: {source}")]
    Evaluation {
        line: usize,
        #[source]
        source: ArgError,
    },

    /// A node lacks the geometry (or curve) output the wiring expects.
    #[error("node {node} ({node_type}) has no {kind} output")]
    MissingSocket {
        node: NodeId,
        node_type: &'static str,
        kind: SocketKind,
    },

    /// A required argument is missing or has the wrong shape.
    #[error("line {line}: {operator}() argument `{name}` must be {expected}")]
    InvalidArgument {
        operator: String,
        name: String,
        expected: &'static str,
        line: usize,
    },

    /// A call references a child that is not compiled yet.
    #[error("call {call} references call {child}, which is not compiled before it")]
    ForwardReference { call: usize, child: usize },

    /// The stream's output refers to a call that does not exist.
    #[error("output refers to call {0}, which does not exist")]
    UnknownOutput(usize),

    /// Nothing to compile: the operator stream is missing or empty.
    #[error("operator stream is empty")]
    EmptyStream,

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;
