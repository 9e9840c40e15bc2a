// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON exporter for compiled scenes and call streams

use crate::compiler::{CallStream, CompiledScene};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Export a compiled scene to a JSON file
pub fn export(scene: &CompiledScene, path: impl AsRef<Path>) -> Result<()> {
    write_json(scene, path.as_ref())
}

/// Export a call stream to a JSON file
pub fn export_stream(stream: &CallStream, path: impl AsRef<Path>) -> Result<()> {
    write_json(stream, path.as_ref())
}

/// Pretty JSON text of any exported document
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize JSON")
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).context("Failed to serialize JSON")?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
