// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Operator argument evaluation
//!
//! Parses the raw argument text of one CSG call (positional and named
//! bindings over literals, vectors, booleans and `undef`) into an [`ArgMap`].

mod evaluator;
mod value;

pub use evaluator::evaluate_args;
pub use value::{binding_name, positional_name, ArgMap, Value, POSITIONAL_PREFIX, SPECIAL_PREFIX};
