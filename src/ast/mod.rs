// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CSG operator tree
//!
//! The tree read from a `.csg` file, the passes that simplify it, and its
//! lowering into the bottom-up [`crate::compiler::CallStream`] the compiler
//! consumes.

mod lower;
mod node;
mod simplify;

pub use lower::{lower, lower_with_passes};
pub use node::CsgNode;
pub use simplify::{fold_matrices, format_matrix, prune, simplify};
