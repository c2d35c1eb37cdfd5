//! Shared helpers for skillforge integration tests

// Not every test module uses every helper
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Spec used across tests: templated frontmatter, tools, a Claude-only field.
pub const PLANNER_SPEC: &str = "---
name: gsd-planner
description: Creates executable phase plans
tools: [Read, Write, Bash, Grep, Glob, WebFetch]
{{#isClaude}}
model: opus
color: green
{{/isClaude}}
skills: [gsd-planning]
---

# Planner

Run {{commandPrefix}}plan-phase to start. Files live under {{platformRoot}}.
";

/// Captured result of a CLI run.
#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Scratch directory holding specs, a config file and output.
pub struct TestProject {
    _temp_dir: TempDir,
    root: PathBuf,
    config_path: PathBuf,
}

impl TestProject {
    /// New project with an empty config, isolated from `~/.skillforge`.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().to_path_buf();
        let config_path = root.join("config.toml");
        std::fs::write(&config_path, "")?;
        Ok(Self {
            _temp_dir: temp_dir,
            root,
            config_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        std::fs::write(&self.config_path, content).context("Failed to write config")
    }

    /// Write `content` to `relative` under the project root.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content).with_context(|| format!("Failed to write {relative}"))?;
        Ok(path)
    }

    pub fn read_file(&self, relative: &str) -> Result<String> {
        std::fs::read_to_string(self.root.join(relative))
            .with_context(|| format!("Failed to read {relative}"))
    }

    /// Command for the binary, running in the project root with this config.
    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("skillforge")?;
        cmd.current_dir(&self.root)
            .env("SKILLFORGE_CONFIG", &self.config_path)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        Ok(cmd)
    }

    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = self.command()?.args(args).output()?;
        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
