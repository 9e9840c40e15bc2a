// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Operator vocabulary

use crate::graph::NodeId;

/// One call of the operator tree, with its children already compiled
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorCall {
    pub name: String,
    /// Raw argument text, evaluated by [`crate::args::evaluate_args`]
    pub args: String,
    /// Result nodes of the children, in call order
    pub children: Vec<NodeId>,
    /// Source line, for diagnostics only
    pub line: usize,
}

impl OperatorCall {
    pub fn new(name: impl Into<String>, args: impl Into<String>, children: Vec<NodeId>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
            children,
            line: 0,
        }
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// Recognized operators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operator {
    Sphere,
    Cube,
    Cylinder,
    Multmatrix,
    Color,
    Difference,
    /// `union`, `group` and `render`
    Union,
    Intersection,
    Text,
    Circle,
    Square,
    Polygon,
    Polyhedron,
    LinearExtrude,
    Hull,
    Minkowski,
    /// Anything else; compiled to a placeholder
    Unknown(String),
}

impl Operator {
    pub fn from_name(name: &str) -> Self {
        match name {
            "sphere" => Operator::Sphere,
            "cube" => Operator::Cube,
            "cylinder" => Operator::Cylinder,
            "multmatrix" => Operator::Multmatrix,
            "color" => Operator::Color,
            "difference" => Operator::Difference,
            "union" | "group" | "render" => Operator::Union,
            "intersection" => Operator::Intersection,
            "text" => Operator::Text,
            "circle" => Operator::Circle,
            "square" => Operator::Square,
            "polygon" => Operator::Polygon,
            "polyhedron" => Operator::Polyhedron,
            "linear_extrude" => Operator::LinearExtrude,
            "hull" => Operator::Hull,
            "minkowski" => Operator::Minkowski,
            other => Operator::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Operator::Unknown(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_and_render_are_union() {
        assert_eq!(Operator::from_name("group"), Operator::Union);
        assert_eq!(Operator::from_name("union"), Operator::Union);
        assert_eq!(Operator::from_name("render"), Operator::Union);
    }

    #[test]
    fn test_unknown_names_are_kept() {
        let op = Operator::from_name("rotate_extrude");
        assert_eq!(op, Operator::Unknown("rotate_extrude".into()));
        assert!(!op.is_known());
        assert!(Operator::from_name("hull").is_known());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!(!Operator::from_name("Cube").is_known());
    }
}
