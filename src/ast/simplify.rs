// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Tree simplification passes run before lowering

use super::node::CsgNode;
use crate::args::evaluate_args;
use crate::compiler::matrix_from_rows;
use crate::config::PassConfig;
use crate::error::{CompileError, Result};
use nalgebra::Matrix4;

/// Operators that produce nothing without children
const DEAD_WHEN_EMPTY: &[&str] = &[
    "linear_extrude",
    "intersection",
    "difference",
    "multmatrix",
    "minkowski",
    "color",
    "offset",
    "render",
    "group",
    "union",
    "hull",
];

/// Operators that are the identity on a single child
const NOP_WITH_ONE_CHILD: &[&str] = &[
    "intersection",
    "difference",
    "minkowski",
    "render",
    "group",
    "union",
];

/// Runs the enabled passes in order. `None` means nothing is left.
pub fn simplify(root: CsgNode, passes: &PassConfig) -> Result<Option<CsgNode>> {
    let before = root.count();
    let root = if passes.remove_dead_code || passes.collapse_nops {
        match prune(root, passes.remove_dead_code, passes.collapse_nops) {
            Some(root) => root,
            None => return Ok(None),
        }
    } else {
        root
    };
    let root = if passes.fold_matrices {
        fold_matrices(root)?
    } else {
        root
    };

    log::info!("simplified tree from {} to {} calls", before, root.count());
    Ok(Some(root))
}

/// Removes empty grouping and transform calls and collapses single-child
/// grouping calls, bottom-up. Child order is preserved.
///
/// An empty `difference` base or an empty `intersection` operand empties the
/// whole call; only union operands and subtrahends are dropped individually.
pub fn prune(mut node: CsgNode, remove_dead: bool, collapse_nops: bool) -> Option<CsgNode> {
    let children = std::mem::take(&mut node.children);
    for (index, child) in children.into_iter().enumerate() {
        match prune(child, remove_dead, collapse_nops) {
            Some(child) => node.children.push(child),
            None if empties_parent(&node.name, index) => {
                log::debug!("line {}: {}() has an empty operand", node.line, node.name);
                return None;
            }
            None => {}
        }
    }

    let name = node.name.as_str();
    if remove_dead && node.children.is_empty() && DEAD_WHEN_EMPTY.contains(&name) {
        log::debug!("line {}: removing empty {}()", node.line, name);
        return None;
    }
    if collapse_nops && node.children.len() == 1 && NOP_WITH_ONE_CHILD.contains(&name) {
        return node.children.pop();
    }
    Some(node)
}

/// Multiplies each chain of single-child `multmatrix` calls into its head.
pub fn fold_matrices(mut node: CsgNode) -> Result<CsgNode> {
    if is_chain_link(&node) {
        let mut product = read_matrix(&node)?;
        let mut folded = 0;
        let mut tail = node.children.pop();

        while let Some(next) = tail.take() {
            if is_chain_link(&next) {
                product *= read_matrix(&next)?;
                folded += 1;
                tail = next.children.into_iter().next();
            } else {
                node.children.push(next);
            }
        }

        if folded > 0 {
            log::debug!("line {}: folded {} matrices", node.line, folded + 1);
            node.args = format_matrix(&product);
        }
    }

    node.children = node
        .children
        .into_iter()
        .map(fold_matrices)
        .collect::<Result<Vec<_>>>()?;
    Ok(node)
}

/// Whether an empty child at `index` leaves nothing of the `name` call
fn empties_parent(name: &str, index: usize) -> bool {
    match name {
        "intersection" => true,
        "difference" => index == 0,
        _ => false,
    }
}

fn is_chain_link(node: &CsgNode) -> bool {
    node.name == "multmatrix" && node.children.len() == 1
}

fn read_matrix(node: &CsgNode) -> Result<Matrix4<f64>> {
    let args = evaluate_args(&node.args).map_err(|source| CompileError::Evaluation {
        line: node.line,
        source,
    })?;
    let rows = args
        .defined("m")
        .or_else(|| args.positional(0))
        .and_then(|m| m.as_matrix4())
        .ok_or_else(|| CompileError::InvalidArgument {
            operator: node.name.clone(),
            name: "m".to_string(),
            expected: "a 4x4 matrix",
            line: node.line,
        })?;
    Ok(matrix_from_rows(&rows))
}

/// Row-major argument text of a matrix
pub fn format_matrix(m: &Matrix4<f64>) -> String {
    let rows: Vec<String> = (0..4)
        .map(|i| format!("[{}, {}, {}, {}]", m[(i, 0)], m[(i, 1)], m[(i, 2)], m[(i, 3)]))
        .collect();
    format!("[{}]", rows.join(", "))
}
