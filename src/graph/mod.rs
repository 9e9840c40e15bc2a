// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Geometry node graph model
//!
//! Nodes with typed sockets, links between them, and the graph that owns both.

mod graph;
mod node;
mod socket;

pub use graph::{Link, NodeGraph};
pub use node::{BooleanOperation, FillMode, Node, NodeId, NodeType};
pub use socket::{Socket, SocketKind, SocketValue};
