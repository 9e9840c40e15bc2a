// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CSG and call-stream file importer

use crate::ast::CsgNode;
use crate::compiler::CallStream;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Import a .csg file and parse it into an operator tree
pub fn import_csg_file(path: impl AsRef<Path>) -> Result<CsgNode> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read CSG file: {}", path.display()))?;

    super::parse_csg(&source)
        .with_context(|| format!("Failed to parse CSG file: {}", path.display()))
}

/// Read a JSON call stream
pub fn read_call_stream(path: impl AsRef<Path>) -> Result<CallStream> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read call stream: {}", path.display()))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse call stream: {}", path.display()))
}

/// True for paths the importer treats as JSON call streams
pub fn is_call_stream(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_csg_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "group() {{\n  cube(size = [10, 10, 10], center = false);\n}}")?;

        let tree = import_csg_file(file.path())?;
        assert_eq!(tree.children[0].children[0].name, "cube");
        Ok(())
    }

    #[test]
    fn test_read_call_stream() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
        write!(
            file,
            r#"{{"calls": [{{"name": "sphere", "args": "r = 2", "children": [], "line": 1}}], "output": 0}}"#
        )?;

        assert!(is_call_stream(file.path()));
        let stream = read_call_stream(file.path())?;
        assert_eq!(stream.calls[0].args, "r = 2");
        Ok(())
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = import_csg_file("/nonexistent/model.csg").unwrap_err();
        assert!(err.to_string().contains("Failed to read CSG file"));
    }
}
