// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CSG operator tree

use serde::{Deserialize, Serialize};

/// One operator call of a CSG file, with its nested children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsgNode {
    pub name: String,
    /// Raw argument text between the call's parentheses
    pub args: String,
    pub children: Vec<CsgNode>,
    /// 1-based source line; 0 for the implicit root
    pub line: usize,
}

impl CsgNode {
    pub fn new(name: impl Into<String>, args: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
            children: Vec::new(),
            line: 0,
        }
    }

    pub fn with_children(mut self, children: Vec<CsgNode>) -> Self {
        self.children = children;
        self
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Number of calls in the subtree, this one included
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(CsgNode::count).sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(CsgNode::depth).max().unwrap_or(0)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_depth() {
        let tree = CsgNode::new("group", "").with_children(vec![
            CsgNode::new("cube", "size = 1"),
            CsgNode::new("multmatrix", "").with_children(vec![CsgNode::new("sphere", "r = 1")]),
        ]);
        assert_eq!(tree.count(), 4);
        assert_eq!(tree.depth(), 3);
        assert!(!tree.is_leaf());
    }
}
