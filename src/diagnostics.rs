// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Recoverable vocabulary warnings
//!
//! Unknown operators and the Minkowski approximation never abort a
//! compilation. Each one is logged through `log::warn!` and recorded here so
//! callers can report or count them.

use serde::Serialize;
use std::fmt;

/// A vocabulary gap that was worked around
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Operator name outside the supported vocabulary; a unit cube was substituted
    UnknownOperator { name: String, line: usize },
    /// `minkowski()` was compiled as a convex hull of its children
    MinkowskiApproximation { line: usize },
}

impl Warning {
    pub fn line(&self) -> usize {
        match self {
            Warning::UnknownOperator { line, .. } | Warning::MinkowskiApproximation { line } => {
                *line
            }
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::UnknownOperator { name, line } => write!(
                f,
                "line {}: unknown operator {}, replaced with a unit cube",
                line, name
            ),
            Warning::MinkowskiApproximation { line } => write!(
                f,
                "line {}: unimplemented operator minkowski, replaced with hull",
                line
            ),
        }
    }
}

/// Warning sink shared by one compilation
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and records a warning
    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
