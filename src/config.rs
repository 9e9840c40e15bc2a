// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Compiler configuration system

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "scadgraph.toml";

/// Tree simplification passes run before lowering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassConfig {
    /// Drop grouping and transform calls without children
    pub remove_dead_code: bool,
    /// Replace single-child grouping calls by their child
    pub collapse_nops: bool,
    /// Multiply chains of single-child `multmatrix` calls into one
    pub fold_matrices: bool,
    /// Compile structurally identical subtrees once
    pub dedupe_subtrees: bool,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            remove_dead_code: true,
            collapse_nops: true,
            fold_matrices: true,
            dedupe_subtrees: true,
        }
    }
}

/// Compiler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Minimum fragment angle in degrees when a call omits `$fa`
    pub default_fa: f64,
    /// Minimum fragment size when a call omits `$fs`
    pub default_fs: f64,
    /// Upper bound on resolved segment counts
    pub max_fragments: u32,
    /// Name of the generated node tree
    pub graph_name: String,
    pub passes: PassConfig,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            default_fa: 12.0,
            default_fs: 2.0,
            max_fragments: 1024,
            graph_name: "Geometry Nodes".to_string(),
            passes: PassConfig::default(),
        }
    }
}

impl CompilerConfig {
    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: CompilerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load() -> Result<Self> {
        let config = if PathBuf::from(CONFIG_FILE).exists() {
            Self::from_file(CONFIG_FILE)?
        } else {
            Self::default()
        };
        Ok(config.with_env_overrides())
    }

    /// Apply `SCADGRAPH_FA`, `SCADGRAPH_FS` and `SCADGRAPH_MAX_FRAGMENTS`
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(fa) = env_parse("SCADGRAPH_FA") {
            self.default_fa = fa;
        }
        if let Some(fs) = env_parse("SCADGRAPH_FS") {
            self.default_fs = fs;
        }
        if let Some(max) = env_parse("SCADGRAPH_MAX_FRAGMENTS") {
            self.max_fragments = max;
        }
        self
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Configuration with every simplification pass disabled
    pub fn without_passes() -> Self {
        Self {
            passes: PassConfig {
                remove_dead_code: false,
                collapse_nops: false,
                fold_matrices: false,
                dedupe_subtrees: false,
            },
            ..Self::default()
        }
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
