// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Node type catalog
//!
//! Each [`NodeType`] declares the ordered input and output sockets the host
//! creates for it. Socket order matters: boolean combinators address their
//! operands by position.

use super::socket::{Socket, SocketKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node inside one [`super::NodeGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mesh boolean operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BooleanOperation {
    Intersect,
    Union,
    Difference,
}

/// How a fill node triangulates closed curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FillMode {
    Triangles,
    Ngons,
}

/// Types of graph nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeType {
    // Mesh primitives
    MeshUVSphere,
    MeshCube,
    MeshCone,

    // Curve primitives
    CurveCircle,
    CurveQuadrilateral,
    StringToCurves,
    FillCurve { mode: FillMode },

    // Geometry operations
    Transform,
    SetMaterial,
    MeshBoolean { operation: BooleanOperation },
    ExtrudeMesh,
    ConvexHull,
    ObjectInfo,

    /// Sink of the graph
    GroupOutput,
}

impl NodeType {
    /// Host identifier of the node type
    pub fn id_name(&self) -> &'static str {
        match self {
            NodeType::MeshUVSphere => "GeometryNodeMeshUVSphere",
            NodeType::MeshCube => "GeometryNodeMeshCube",
            NodeType::MeshCone => "GeometryNodeMeshCone",
            NodeType::CurveCircle => "GeometryNodeCurvePrimitiveCircle",
            NodeType::CurveQuadrilateral => "GeometryNodeCurvePrimitiveQuadrilateral",
            NodeType::StringToCurves => "GeometryNodeStringToCurves",
            NodeType::FillCurve { .. } => "GeometryNodeFillCurve",
            NodeType::Transform => "GeometryNodeTransform",
            NodeType::SetMaterial => "GeometryNodeSetMaterial",
            NodeType::MeshBoolean { .. } => "GeometryNodeMeshBoolean",
            NodeType::ExtrudeMesh => "GeometryNodeExtrudeMesh",
            NodeType::ConvexHull => "GeometryNodeConvexHull",
            NodeType::ObjectInfo => "GeometryNodeObjectInfo",
            NodeType::GroupOutput => "NodeGroupOutput",
        }
    }

    /// Ordered input socket declarations with their default values
    pub fn inputs(&self) -> Vec<Socket> {
        match self {
            NodeType::MeshUVSphere => vec![
                Socket::int("Segments", 32),
                Socket::int("Rings", 16),
                Socket::float("Radius", 1.0),
            ],
            NodeType::MeshCube => vec![
                Socket::vector("Size", [1.0, 1.0, 1.0]),
                Socket::int("Vertices X", 2),
                Socket::int("Vertices Y", 2),
                Socket::int("Vertices Z", 2),
            ],
            NodeType::MeshCone => vec![
                Socket::int("Vertices", 32),
                Socket::int("Side Segments", 1),
                Socket::int("Fill Segments", 1),
                Socket::float("Radius Top", 0.0),
                Socket::float("Radius Bottom", 1.0),
                Socket::float("Depth", 2.0),
            ],
            NodeType::CurveCircle => vec![
                Socket::int("Resolution", 32),
                Socket::float("Radius", 1.0),
            ],
            NodeType::CurveQuadrilateral => vec![
                Socket::float("Width", 2.0),
                Socket::float("Height", 2.0),
            ],
            NodeType::StringToCurves => vec![
                Socket::string("String", ""),
                Socket::float("Size", 1.0),
                Socket::float("Character Spacing", 1.0),
                Socket::float("Word Spacing", 1.0),
                Socket::float("Line Spacing", 1.0),
            ],
            NodeType::FillCurve { .. } => vec![Socket::curve("Curve")],
            NodeType::Transform => vec![
                Socket::geometry("Geometry"),
                Socket::vector("Translation", [0.0, 0.0, 0.0]),
                Socket::vector("Rotation", [0.0, 0.0, 0.0]),
                Socket::vector("Scale", [1.0, 1.0, 1.0]),
            ],
            NodeType::SetMaterial => vec![
                Socket::geometry("Geometry"),
                Socket::bool("Selection", true),
                Socket::material("Material"),
            ],
            NodeType::MeshBoolean { .. } => vec![
                Socket::geometry("Mesh 1"),
                Socket::geometry("Mesh 2").multi(),
                Socket::bool("Self Intersection", false),
                Socket::bool("Hole Tolerant", false),
            ],
            NodeType::ExtrudeMesh => vec![
                Socket::geometry("Mesh"),
                Socket::bool("Selection", true),
                Socket::vector("Offset", [0.0, 0.0, 0.0]),
                Socket::float("Offset Scale", 1.0),
                Socket::bool("Individual", true),
            ],
            NodeType::ConvexHull => vec![Socket::geometry("Geometry")],
            NodeType::ObjectInfo => vec![
                Socket::object("Object"),
                Socket::bool("As Instance", false),
            ],
            NodeType::GroupOutput => vec![Socket::geometry("Geometry")],
        }
    }

    /// Ordered output socket declarations
    pub fn outputs(&self) -> Vec<Socket> {
        match self {
            NodeType::MeshUVSphere | NodeType::MeshCube | NodeType::MeshCone => {
                vec![Socket::output("Mesh", SocketKind::Geometry)]
            }
            NodeType::CurveCircle | NodeType::CurveQuadrilateral => {
                vec![Socket::output("Curve", SocketKind::Curve)]
            }
            NodeType::StringToCurves => vec![
                Socket::output("Curve Instances", SocketKind::Curve),
                Socket::output("Remainder", SocketKind::String),
            ],
            NodeType::FillCurve { .. } => vec![Socket::output("Mesh", SocketKind::Geometry)],
            NodeType::Transform | NodeType::SetMaterial => {
                vec![Socket::output("Geometry", SocketKind::Geometry)]
            }
            NodeType::MeshBoolean { .. } => vec![Socket::output("Mesh", SocketKind::Geometry)],
            NodeType::ExtrudeMesh => vec![
                Socket::output("Mesh", SocketKind::Geometry),
                Socket::output("Top", SocketKind::Bool),
                Socket::output("Side", SocketKind::Bool),
            ],
            NodeType::ConvexHull => vec![Socket::output("Convex Hull", SocketKind::Geometry)],
            NodeType::ObjectInfo => vec![
                Socket::output("Location", SocketKind::Vector),
                Socket::output("Rotation", SocketKind::Vector),
                Socket::output("Scale", SocketKind::Vector),
                Socket::output("Geometry", SocketKind::Geometry),
            ],
            NodeType::GroupOutput => Vec::new(),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id_name())
    }
}

/// A node instance in the graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(flatten)]
    pub node_type: NodeType,
    pub inputs: Vec<Socket>,
    pub outputs: Vec<Socket>,
}

impl Node {
    pub fn new(id: NodeId, node_type: NodeType) -> Self {
        Self {
            id,
            node_type,
            inputs: node_type.inputs(),
            outputs: node_type.outputs(),
        }
    }

    /// Position of the input socket called `name`
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|s| s.name == name)
    }

    pub fn input(&self, name: &str) -> Option<&Socket> {
        self.inputs.iter().find(|s| s.name == name)
    }

    /// First output of the given kind
    pub fn first_output(&self, kind: SocketKind) -> Option<usize> {
        self.outputs.iter().position(|s| s.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_second_operand_is_multi_input() {
        let node = Node::new(
            NodeId(0),
            NodeType::MeshBoolean {
                operation: BooleanOperation::Difference,
            },
        );
        assert!(!node.inputs[0].multi_input);
        assert!(node.inputs[1].multi_input);
    }

    #[test]
    fn test_object_info_geometry_is_not_first_output() {
        let node = Node::new(NodeId(0), NodeType::ObjectInfo);
        assert_eq!(node.first_output(SocketKind::Geometry), Some(3));
    }

    #[test]
    fn test_curve_primitives_have_no_mesh_output() {
        for node_type in [
            NodeType::CurveCircle,
            NodeType::CurveQuadrilateral,
            NodeType::StringToCurves,
        ] {
            let node = Node::new(NodeId(0), node_type);
            assert_eq!(node.first_output(SocketKind::Geometry), None);
            assert_eq!(node.first_output(SocketKind::Curve), Some(0));
        }
    }

    #[test]
    fn test_convex_hull_takes_a_single_geometry() {
        let geometry_inputs = NodeType::ConvexHull
            .inputs()
            .iter()
            .filter(|s| s.kind == SocketKind::Geometry)
            .count();
        assert_eq!(geometry_inputs, 1);
    }
}
