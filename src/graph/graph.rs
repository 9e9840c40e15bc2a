// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Node graph container

use super::node::{Node, NodeId, NodeType};
use super::socket::SocketValue;
use crate::error::GraphError;
use serde::Serialize;

/// Directed connection from an output socket to an input socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub from_node: NodeId,
    pub from_socket: usize,
    pub to_node: NodeId,
    pub to_socket: usize,
}

/// Owns all nodes and links of one geometry node tree.
///
/// A fresh graph is seeded with its single [`NodeType::GroupOutput`] node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeGraph {
    pub name: String,
    nodes: Vec<Node>,
    links: Vec<Link>,
    output: NodeId,
}

impl NodeGraph {
    pub fn new(name: impl Into<String>) -> Self {
        let output = NodeId(0);
        Self {
            name: name.into(),
            nodes: vec![Node::new(output, NodeType::GroupOutput)],
            links: Vec::new(),
            output,
        }
    }

    /// Adds a node of the given type and returns its id
    pub fn add_node(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, node_type));
        id
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(id.0).ok_or(GraphError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, GraphError> {
        self.nodes.get_mut(id.0).ok_or(GraphError::UnknownNode(id))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// The designated output node
    pub fn output_node(&self) -> NodeId {
        self.output
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Sets the default value of the input socket called `socket`
    pub fn set_input(
        &mut self,
        id: NodeId,
        socket: &str,
        value: SocketValue,
    ) -> Result<(), GraphError> {
        let node = self.node_mut(id)?;
        let node_type = node.node_type.id_name();
        let input = node
            .inputs
            .iter_mut()
            .find(|s| s.name == socket)
            .ok_or_else(|| GraphError::NoSuchNamedInput {
                node: id,
                node_type,
                socket: socket.to_string(),
            })?;

        if !input.accepts(&value) {
            return Err(GraphError::ValueMismatch {
                node_type,
                socket: input.name,
                kind: input.kind,
            });
        }
        input.value = value;
        Ok(())
    }

    /// Links output `from_socket` of `from` into input `to_socket` of `to`.
    ///
    /// Single-input sockets accept one link; multi-input sockets accept any
    /// number, kept in insertion order.
    pub fn link(
        &mut self,
        from: NodeId,
        from_socket: usize,
        to: NodeId,
        to_socket: usize,
    ) -> Result<Link, GraphError> {
        let source = self.node(from)?;
        let from_kind = source
            .outputs
            .get(from_socket)
            .ok_or(GraphError::NoSuchOutput {
                node: from,
                node_type: source.node_type.id_name(),
                socket: from_socket,
            })?
            .kind;

        let target = self.node(to)?;
        let input = target.inputs.get(to_socket).ok_or(GraphError::NoSuchInput {
            node: to,
            node_type: target.node_type.id_name(),
            socket: to_socket,
        })?;

        if !from_kind.links_to(input.kind) {
            return Err(GraphError::KindMismatch {
                from: from_kind,
                to: input.kind,
            });
        }
        if !input.multi_input && self.incoming(to, to_socket).next().is_some() {
            return Err(GraphError::SocketOccupied {
                node: to,
                socket: input.name,
            });
        }

        let link = Link {
            from_node: from,
            from_socket,
            to_node: to,
            to_socket,
        };
        self.links.push(link);
        Ok(link)
    }

    /// Links arriving at one input socket, in insertion order
    pub fn incoming(&self, node: NodeId, socket: usize) -> impl Iterator<Item = &Link> {
        self.links
            .iter()
            .filter(move |l| l.to_node == node && l.to_socket == socket)
    }

    /// Nodes feeding one input socket, in insertion order
    pub fn sources(&self, node: NodeId, socket: usize) -> Vec<NodeId> {
        self.incoming(node, socket).map(|l| l.from_node).collect()
    }

    /// Number of nodes of each type, keyed by host identifier
    pub fn type_histogram(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for node in &self.nodes {
            let name = node.node_type.id_name();
            match counts.iter_mut().find(|(n, _)| *n == name) {
                Some((_, count)) => *count += 1,
                None => counts.push((name, 1)),
            }
        }
        counts
    }
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new("Geometry Nodes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BooleanOperation, SocketKind};

    #[test]
    fn test_new_graph_is_seeded_with_output() {
        let graph = NodeGraph::default();
        assert_eq!(graph.node_count(), 1);
        let output = graph.node(graph.output_node()).unwrap();
        assert_eq!(output.node_type, NodeType::GroupOutput);
        assert_eq!(output.inputs.len(), 1);
    }

    #[test]
    fn test_single_input_socket_rejects_second_link() {
        let mut graph = NodeGraph::default();
        let a = graph.add_node(NodeType::MeshCube);
        let b = graph.add_node(NodeType::MeshCube);
        let t = graph.add_node(NodeType::Transform);

        graph.link(a, 0, t, 0).unwrap();
        let err = graph.link(b, 0, t, 0).unwrap_err();
        assert!(matches!(err, GraphError::SocketOccupied { .. }));
    }

    #[test]
    fn test_multi_input_socket_keeps_link_order() {
        let mut graph = NodeGraph::default();
        let a = graph.add_node(NodeType::MeshCube);
        let b = graph.add_node(NodeType::MeshUVSphere);
        let union = graph.add_node(NodeType::MeshBoolean {
            operation: BooleanOperation::Union,
        });

        graph.link(a, 0, union, 1).unwrap();
        graph.link(b, 0, union, 1).unwrap();
        assert_eq!(graph.sources(union, 1), vec![a, b]);
    }

    #[test]
    fn test_curve_cannot_link_into_geometry() {
        let mut graph = NodeGraph::default();
        let circle = graph.add_node(NodeType::CurveCircle);
        let t = graph.add_node(NodeType::Transform);
        let err = graph.link(circle, 0, t, 0).unwrap_err();
        assert_eq!(
            err,
            GraphError::KindMismatch {
                from: SocketKind::Curve,
                to: SocketKind::Geometry
            }
        );
    }

    #[test]
    fn test_type_histogram_counts_in_first_seen_order() {
        let mut graph = NodeGraph::default();
        graph.add_node(NodeType::MeshCube);
        graph.add_node(NodeType::Transform);
        graph.add_node(NodeType::MeshCube);
        assert_eq!(
            graph.type_histogram(),
            vec![
                ("NodeGroupOutput", 1),
                ("GeometryNodeMeshCube", 2),
                ("GeometryNodeTransform", 1),
            ]
        );
    }

    #[test]
    fn test_set_input_checks_kind() {
        let mut graph = NodeGraph::default();
        let cube = graph.add_node(NodeType::MeshCube);
        graph
            .set_input(cube, "Size", SocketValue::Vector([2.0, 4.0, 6.0]))
            .unwrap();
        assert!(graph
            .set_input(cube, "Size", SocketValue::Float(2.0))
            .is_err());
        assert!(graph
            .set_input(cube, "Radius", SocketValue::Float(2.0))
            .is_err());
    }
}
