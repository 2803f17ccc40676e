#![allow(dead_code)]

use anyhow::{Context, Result};
use component_view::{Component, ResolvedPlatforms, PlatformKind};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// Throwaway monorepo with `core/` and `extended/` at the root, removed on drop.
pub struct TempWorkspace {
    dir: TempDir,
}

impl TempWorkspace {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("failed to create temp workspace")?;
        fs::create_dir_all(dir.path().join("core"))?;
        fs::create_dir_all(dir.path().join("extended"))?;
        Ok(Self { dir })
    }

    pub fn with_files(files: &[&str]) -> Result<Self> {
        let workspace = Self::new()?;
        for file in files {
            workspace.touch(file)?;
        }
        Ok(workspace)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn touch(&self, relative: &str) -> Result<()> {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, "").with_context(|| format!("failed to write {}", path.display()))
    }

    pub fn mkdir(&self, relative: &str) -> Result<()> {
        fs::create_dir_all(self.path(relative))
            .with_context(|| format!("failed to create {relative}"))
    }
}

pub fn files_on(resolved: &ResolvedPlatforms, platform: PlatformKind) -> Vec<String> {
    resolved
        .get(&platform)
        .map(|files| {
            files
                .iter()
                .map(|file| file.relative_filepath.clone())
                .collect()
        })
        .unwrap_or_default()
}

pub fn component_files(component: &Component) -> Vec<String> {
    component
        .files()
        .map(|file| file.relative_filepath.clone())
        .collect()
}

// Runs `cmd` and fails with its stderr when it exits non-zero.
pub fn run_command(mut cmd: std::process::Command) -> Result<std::process::Output> {
    let output = cmd
        .output()
        .with_context(|| format!("failed to spawn {cmd:?}"))?;
    if !output.status.success() {
        anyhow::bail!(
            "{cmd:?} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(output)
}
