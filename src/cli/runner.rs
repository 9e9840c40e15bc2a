// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Batch runner: discovers `.csg` files and compiles them in parallel

use crate::compiler::CompiledScene;
use crate::io;
use crate::kernel::Kernel;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use walkdir::WalkDir;

/// Counts reported for one compiled file
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub calls: usize,
    pub nodes: usize,
    pub links: usize,
    pub materials: usize,
    pub objects: usize,
    pub warnings: Vec<String>,
}

impl SceneSummary {
    pub fn new(calls: usize, scene: &CompiledScene) -> Self {
        Self {
            calls,
            nodes: scene.graph.node_count(),
            links: scene.graph.links().len(),
            materials: scene.materials.len(),
            objects: scene.objects.len(),
            warnings: scene.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Outcome of compiling one file
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: std::result::Result<SceneSummary, String>,
    pub duration: Duration,
}

impl FileReport {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runner compiling files with one shared configuration
#[derive(Debug, Clone, Default)]
pub struct Runner {
    kernel: Kernel,
}

impl Runner {
    pub fn new(kernel: Kernel) -> Self {
        Self { kernel }
    }

    /// Compile one file, writing its scene JSON into `out_dir` when given
    pub fn compile_file(&self, path: &Path, out_dir: Option<&Path>) -> FileReport {
        let start = Instant::now();
        let result = self
            .compile_and_write(path, out_dir)
            .map_err(|e| format!("{:#}", e));

        FileReport {
            path: path.to_path_buf(),
            result,
            duration: start.elapsed(),
        }
    }

    fn compile_and_write(&self, path: &Path, out_dir: Option<&Path>) -> Result<SceneSummary> {
        let stream = self.kernel.load_stream(path)?;
        let scene = self
            .kernel
            .compile_stream(&stream)
            .with_context(|| format!("Failed to compile {}", path.display()))?;

        if let Some(dir) = out_dir {
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "scene".to_string());
            io::export_json(&scene, dir.join(format!("{}.json", name)))?;
        }
        Ok(SceneSummary::new(stream.len(), &scene))
    }

    /// Compile every file in parallel, one independent compilation per file
    pub fn run_batch(
        &self,
        files: &[PathBuf],
        out_dir: Option<&Path>,
        show_progress: bool,
    ) -> Result<Vec<FileReport>> {
        if let Some(dir) = out_dir {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
        }

        let pb = if show_progress {
            let p = ProgressBar::new(files.len() as u64);
            p.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                    .progress_chars("#>-"),
            );
            Some(p)
        } else {
            None
        };

        let reports: Vec<FileReport> = files
            .par_iter()
            .map(|path| {
                let report = self.compile_file(path, out_dir);
                if let Some(ref p) = pb {
                    p.inc(1);
                }
                report
            })
            .collect();

        if let Some(p) = pb {
            p.finish_and_clear();
        }
        Ok(reports)
    }
}

/// Find `.csg` files among `paths`, descending into directories
pub fn discover_csg_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let is_csg = |p: &Path| p.extension().is_some_and(|ext| ext == "csg");
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() && is_csg(path) {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let entry_path = entry.path();
                if entry_path.is_file() && is_csg(entry_path) {
                    files.push(entry_path.to_path_buf());
                }
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_csg_files() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let nested = temp_dir.path().join("parts");
        fs::create_dir(&nested)?;
        fs::write(temp_dir.path().join("a.csg"), "cube(size = 1);")?;
        fs::write(nested.join("b.csg"), "sphere(r = 1);")?;
        fs::write(temp_dir.path().join("notes.txt"), "not a model")?;

        let files = discover_csg_files(&[temp_dir.path().to_path_buf()]);
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "csg"));
        Ok(())
    }

    #[test]
    fn test_batch_reports_failures_per_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let good = temp_dir.path().join("good.csg");
        let bad = temp_dir.path().join("bad.csg");
        let empty = temp_dir.path().join("empty.csg");
        fs::write(&good, "group() { frobnicate(x = 1); cube(size = 2); }")?;
        fs::write(&bad, "cube(size = [1, 2);")?;
        fs::write(&empty, "group();")?;

        let out = temp_dir.path().join("out");
        let reports = Runner::default().run_batch(
            &[good.clone(), bad, empty],
            Some(&out),
            false,
        )?;

        assert!(reports[0].passed());
        assert!(!reports[1].passed());
        assert!(!reports[2].passed());
        let summary = reports[0].result.as_ref().unwrap();
        assert_eq!(summary.warnings.len(), 1);
        assert!(out.join("good.json").exists());
        Ok(())
    }
}
