pub mod component;
pub mod resolver;
pub mod runner;
pub mod taxonomy;
pub mod view;

pub use component::{Component, ComponentSet, Platform};
pub use resolver::{ArtifactKind, ComponentResolver, DiskFs, FileSystem, ResolvedPlatforms};
pub use runner::{DEFAULT_TEST_URL, test_filter, test_runner_url};
pub use taxonomy::{
    Engine, PlatformKind, SharedNesting, SourceFile, TestKind, classify, component_name,
    filter_seedable, relative_filepath,
};
pub use view::{ComponentView, LogChannel, MemoryChannel, OutputChannel, SeedReport};

use anyhow::{Result, bail};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

// A workspace root carries both of these top-level platform directories.
const ROOT_SENTINELS: [&str; 2] = ["core", "extended"];

pub const ROOT_ENV: &str = "COMPONENT_VIEW_ROOT";

/// Whether `candidate` looks like the monorepo root.
pub fn is_workspace_root(candidate: &Path) -> bool {
    ROOT_SENTINELS
        .iter()
        .all(|sentinel| candidate.join(sentinel).is_dir())
}

fn workspace_root_from_hint(hint: &str) -> Option<PathBuf> {
    if hint.is_empty() {
        return None;
    }
    let hint_path = PathBuf::from(hint);
    if !hint_path.exists() || !is_workspace_root(&hint_path) {
        return None;
    }
    fs::canonicalize(hint_path).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_workspace_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

/// Locate the workspace root: `COMPONENT_VIEW_ROOT`, then the current
/// directory and its ancestors, then the build-time hint.
pub fn find_workspace_root() -> Result<PathBuf> {
    if let Ok(env_root) = env::var(ROOT_ENV) {
        if let Some(root) = workspace_root_from_hint(&env_root) {
            return Ok(root);
        }
    }

    if let Ok(cwd) = env::current_dir() {
        if let Some(root) = search_upwards(&cwd) {
            return Ok(root);
        }
    }

    if let Some(hint) = option_env!("COMPONENT_VIEW_ROOT_HINT") {
        if let Some(root) = workspace_root_from_hint(hint) {
            return Ok(root);
        }
    }

    bail!(
        "Unable to locate the workspace root (a directory with both core/ and extended/). Set {ROOT_ENV} or pass --root."
    );
}

/// Split newline-separated paths, trimming whitespace and skipping blanks.
pub fn split_path_list(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
