// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Operator compiler
//!
//! Lowers operator calls into the geometry node graph, one call at a time and
//! strictly bottom-up.

mod context;
mod decompose;
mod dispatch;
mod finalize;
mod operator;
mod params;
mod stream;

pub use context::{CompileContext, CompiledScene};
pub use decompose::{decompose, matrix_from_rows, Decomposed};
pub use dispatch::{compile, compile_call, geometry_output};
pub use finalize::finalize;
pub use operator::{Operator, OperatorCall};
pub use stream::{compile_stream, CallStream, StreamCall};
