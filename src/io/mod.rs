// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - parsing, importing, and exporting

mod export_json;
mod importer;
mod parser;

pub use export_json::{export as export_json, export_stream, to_json};
pub use importer::{import_csg_file, is_call_stream, read_call_stream};
pub use parser::parse_csg;
