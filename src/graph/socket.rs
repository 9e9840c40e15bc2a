// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Socket kinds and default values

use crate::host::{MaterialHandle, ObjectHandle};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Data kind carried by a socket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SocketKind {
    /// Mesh geometry
    Geometry,
    /// Spline data; must pass through a fill step to become a mesh
    Curve,
    Float,
    Int,
    Vector,
    String,
    Bool,
    Material,
    Object,
}

impl SocketKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocketKind::Geometry => "geometry",
            SocketKind::Curve => "curve",
            SocketKind::Float => "float",
            SocketKind::Int => "int",
            SocketKind::Vector => "vector",
            SocketKind::String => "string",
            SocketKind::Bool => "bool",
            SocketKind::Material => "material",
            SocketKind::Object => "object",
        }
    }

    /// Whether an output of kind `self` may feed an input of kind `to`.
    ///
    /// Curves never feed geometry inputs directly; only a fill node accepts them.
    pub fn links_to(&self, to: SocketKind) -> bool {
        match (self, to) {
            (SocketKind::Geometry, SocketKind::Geometry) => true,
            (SocketKind::Curve, SocketKind::Curve) => true,
            (SocketKind::Float | SocketKind::Int, SocketKind::Float | SocketKind::Int) => true,
            (a, b) => *a == b,
        }
    }
}

impl fmt::Display for SocketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default value stored on an unlinked input socket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SocketValue {
    /// Geometry and curve sockets carry no default
    None,
    Float(f64),
    Int(i64),
    Vector([f64; 3]),
    String(String),
    Bool(bool),
    Material(Option<MaterialHandle>),
    Object(Option<ObjectHandle>),
}

impl SocketValue {
    /// Kind of socket this value can be stored on
    pub fn kind(&self) -> Option<SocketKind> {
        match self {
            SocketValue::None => None,
            SocketValue::Float(_) => Some(SocketKind::Float),
            SocketValue::Int(_) => Some(SocketKind::Int),
            SocketValue::Vector(_) => Some(SocketKind::Vector),
            SocketValue::String(_) => Some(SocketKind::String),
            SocketValue::Bool(_) => Some(SocketKind::Bool),
            SocketValue::Material(_) => Some(SocketKind::Material),
            SocketValue::Object(_) => Some(SocketKind::Object),
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            SocketValue::Float(v) => Some(*v),
            SocketValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            SocketValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<[f64; 3]> {
        match self {
            SocketValue::Vector(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SocketValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

/// Declaration of one socket on a node type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Socket {
    pub name: &'static str,
    pub kind: SocketKind,
    /// Accepts any number of incoming links
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub multi_input: bool,
    pub value: SocketValue,
}

impl Socket {
    pub fn geometry(name: &'static str) -> Self {
        Self::new(name, SocketKind::Geometry, SocketValue::None)
    }

    pub fn curve(name: &'static str) -> Self {
        Self::new(name, SocketKind::Curve, SocketValue::None)
    }

    pub fn float(name: &'static str, value: f64) -> Self {
        Self::new(name, SocketKind::Float, SocketValue::Float(value))
    }

    pub fn int(name: &'static str, value: i64) -> Self {
        Self::new(name, SocketKind::Int, SocketValue::Int(value))
    }

    pub fn vector(name: &'static str, value: [f64; 3]) -> Self {
        Self::new(name, SocketKind::Vector, SocketValue::Vector(value))
    }

    pub fn string(name: &'static str, value: &str) -> Self {
        Self::new(name, SocketKind::String, SocketValue::String(value.to_string()))
    }

    pub fn bool(name: &'static str, value: bool) -> Self {
        Self::new(name, SocketKind::Bool, SocketValue::Bool(value))
    }

    pub fn material(name: &'static str) -> Self {
        Self::new(name, SocketKind::Material, SocketValue::Material(None))
    }

    pub fn object(name: &'static str) -> Self {
        Self::new(name, SocketKind::Object, SocketValue::Object(None))
    }

    /// Output sockets carry no value
    pub fn output(name: &'static str, kind: SocketKind) -> Self {
        Self::new(name, kind, SocketValue::None)
    }

    pub fn multi(mut self) -> Self {
        self.multi_input = true;
        self
    }

    fn new(name: &'static str, kind: SocketKind, value: SocketValue) -> Self {
        Self {
            name,
            kind,
            multi_input: false,
            value,
        }
    }

    /// Whether `value` may be stored as this socket's default
    pub fn accepts(&self, value: &SocketValue) -> bool {
        match (self.kind, value) {
            (SocketKind::Float, SocketValue::Int(_)) => true,
            (kind, value) => value.kind() == Some(kind),
        }
    }
}
