// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use super::runner::FileReport;
use crate::compiler::CompiledScene;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report one compiled scene on stderr
    pub fn report_scene(file: &str, scene: &CompiledScene, duration: Duration) {
        eprintln!("\n{}", "━".repeat(80).bright_black());
        eprintln!("{} {}", "Compiled:".bold(), file.cyan());
        eprintln!("{}", "━".repeat(80).bright_black());
        Self::print_count("Nodes", scene.graph.node_count());
        Self::print_count("Links", scene.graph.links().len());
        Self::print_count("Materials", scene.materials.len());
        Self::print_count("Objects", scene.objects.len());
        eprintln!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );

        eprintln!("\n{}", "Node types:".bold());
        for (name, count) in scene.graph.type_histogram() {
            eprintln!("  {:<40} {}", name.bright_black(), count.to_string().cyan());
        }

        for warning in &scene.warnings {
            Self::report_warning(&warning.to_string());
        }
        eprintln!("{}", "━".repeat(80).bright_black());
    }

    /// Report a batch run and return the number of failed files
    pub fn report_batch(reports: &[FileReport]) -> usize {
        let mut failed = 0;
        let mut warnings = 0;

        for report in reports {
            let file = report.path.display().to_string();
            match &report.result {
                Ok(summary) => {
                    warnings += summary.warnings.len();
                    let marker = if summary.warnings.is_empty() {
                        "✓".green()
                    } else {
                        "!".yellow()
                    };
                    eprintln!(
                        "  {} {} {} ({} calls, {} nodes)",
                        marker,
                        file,
                        Self::format_duration(report.duration).bright_black(),
                        summary.calls,
                        summary.nodes
                    );
                    for warning in &summary.warnings {
                        eprintln!("      {}", warning.yellow());
                    }
                }
                Err(message) => {
                    failed += 1;
                    eprintln!("  {} {}", "✗".red(), file);
                    eprintln!("      {}", message.bright_black());
                }
            }
        }

        eprintln!("\n{}", "═".repeat(80).bright_black());
        eprintln!(
            "  {} {}  {} {}  {} {}",
            "Compiled:".bright_black(),
            (reports.len() - failed).to_string().green(),
            "Failed:".bright_black(),
            if failed > 0 {
                failed.to_string().red()
            } else {
                failed.to_string().green()
            },
            "Warnings:".bright_black(),
            warnings.to_string().yellow()
        );
        eprintln!("{}", "═".repeat(80).bright_black());
        failed
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        eprintln!("{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        eprintln!("{} {}", "ℹ️".bright_blue(), message);
    }

    fn print_count(name: &str, count: usize) {
        eprintln!(
            "  {} {}",
            format!("{}:", name).bright_black(),
            count.to_string().cyan()
        );
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print success message
    pub fn success(message: &str) {
        eprintln!("{} {}", "✅".green(), message.green());
    }
}
