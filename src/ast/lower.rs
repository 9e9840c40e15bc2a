// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Lowering of a CSG tree into a bottom-up call stream

use super::node::CsgNode;
use super::simplify::simplify;
use crate::compiler::{CallStream, StreamCall};
use crate::config::PassConfig;
use crate::error::{CompileError, Result};
use ahash::AHashMap;
use sha2::{digest::Output, Digest, Sha256};

type SubtreeHash = Output<Sha256>;

/// Simplifies `root` with the enabled passes and lowers what remains.
///
/// A tree that simplifies away entirely is [`CompileError::EmptyStream`].
pub fn lower_with_passes(root: CsgNode, passes: &PassConfig) -> Result<CallStream> {
    let root = simplify(root, passes)?.ok_or(CompileError::EmptyStream)?;
    Ok(lower(&root, passes.dedupe_subtrees))
}

/// Emits every call after its children.
///
/// With `dedupe`, structurally identical subtrees (same name, arguments and
/// children) are emitted once and shared by every parent referencing them.
pub fn lower(root: &CsgNode, dedupe: bool) -> CallStream {
    let mut lowering = Lowering {
        calls: Vec::new(),
        seen: AHashMap::new(),
        dedupe,
    };
    let (output, _) = lowering.emit(root);

    let shared = root.count() - lowering.calls.len();
    if shared > 0 {
        log::info!("shared {} duplicate calls", shared);
    }
    CallStream {
        calls: lowering.calls,
        output,
    }
}

struct Lowering {
    calls: Vec<StreamCall>,
    seen: AHashMap<SubtreeHash, usize>,
    dedupe: bool,
}

impl Lowering {
    fn emit(&mut self, node: &CsgNode) -> (usize, SubtreeHash) {
        let (children, hashes): (Vec<usize>, Vec<SubtreeHash>) =
            node.children.iter().map(|child| self.emit(child)).unzip();

        let hash = subtree_hash(node, &hashes);
        if self.dedupe {
            if let Some(&index) = self.seen.get(&hash) {
                return (index, hash);
            }
        }

        let index = self.calls.len();
        self.calls.push(StreamCall {
            name: node.name.clone(),
            args: node.args.clone(),
            children,
            line: node.line,
        });
        self.seen.insert(hash.clone(), index);
        (index, hash)
    }
}

/// Merkle hash over name, arguments and child hashes
fn subtree_hash(node: &CsgNode, children: &[SubtreeHash]) -> SubtreeHash {
    let mut hasher = Sha256::new();
    for field in [node.name.as_bytes(), node.args.as_bytes()] {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field);
    }
    hasher.update((children.len() as u64).to_le_bytes());
    for child in children {
        hasher.update(child);
    }
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CsgNode {
        let arm = || {
            CsgNode::new(
                "multmatrix",
                "[[1, 0, 0, 2], [0, 1, 0, 0], [0, 0, 1, 0], [0, 0, 0, 1]]",
            )
            .with_children(vec![CsgNode::new("sphere", "r = 1")])
        };
        CsgNode::new("union", "").with_children(vec![
            arm(),
            arm(),
            CsgNode::new("cube", "size = 1"),
        ])
    }

    #[test]
    fn test_children_precede_parents() {
        let stream = lower(&sample(), false);
        assert_eq!(stream.len(), 6);
        for (index, call) in stream.calls.iter().enumerate() {
            assert!(call.children.iter().all(|&c| c < index));
        }
        assert_eq!(stream.output, 5);
        assert_eq!(stream.calls[5].name, "union");
    }

    #[test]
    fn test_identical_subtrees_are_shared() {
        let stream = lower(&sample(), true);
        assert_eq!(stream.len(), 4);
        let union = &stream.calls[stream.output];
        assert_eq!(union.children[0], union.children[1]);
        assert_ne!(union.children[0], union.children[2]);
    }

    #[test]
    fn test_argument_text_distinguishes_subtrees() {
        let tree = CsgNode::new("union", "").with_children(vec![
            CsgNode::new("sphere", "r = 1"),
            CsgNode::new("sphere", "r = 2"),
        ]);
        assert_eq!(lower(&tree, true).len(), 3);
    }

    #[test]
    fn test_field_boundaries_are_unambiguous() {
        let a = CsgNode::new("ab", "c");
        let b = CsgNode::new("a", "bc");
        assert_ne!(subtree_hash(&a, &[]), subtree_hash(&b, &[]));
    }

    #[test]
    fn test_empty_after_passes() {
        let tree = CsgNode::new("group", "").with_children(vec![CsgNode::new("union", "")]);
        assert_eq!(
            lower_with_passes(tree, &PassConfig::default()),
            Err(CompileError::EmptyStream)
        );
    }

    #[test]
    fn test_lines_are_kept() {
        let tree = CsgNode::new("cube", "size = 1").at_line(7);
        assert_eq!(lower(&tree, true).calls[0].line, 7);
    }
}
