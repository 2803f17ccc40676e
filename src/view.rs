//! Open-component session.
//!
//! `ComponentView` keeps the set of components a user has opened, resolves
//! each one when it is first opened and reports progress through an injected
//! [`OutputChannel`]. Taxonomy and resolver code never log; everything the
//! user sees about a session goes through the channel.

use crate::component::{Component, ComponentSet};
use crate::resolver::{ComponentResolver, DiskFs, FileSystem};
use crate::runner::test_runner_url;
use crate::taxonomy::{TestKind, classify};
use anyhow::{Result, anyhow, bail};

/// Line-oriented sink for session messages.
pub trait OutputChannel {
    fn append_line(&mut self, line: &str);
}

impl<C: OutputChannel + ?Sized> OutputChannel for &mut C {
    fn append_line(&mut self, line: &str) {
        (**self).append_line(line);
    }
}

/// Forwards session messages to the `log` facade; `Error:` lines at warn level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogChannel;

impl OutputChannel for LogChannel {
    fn append_line(&mut self, line: &str) {
        if line.starts_with("Error:") {
            log::warn!("{line}");
        } else {
            log::info!("{line}");
        }
    }
}

/// Keeps every line in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryChannel {
    lines: Vec<String>,
}

impl MemoryChannel {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl OutputChannel for MemoryChannel {
    fn append_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Outcome of seeding a view from a list of open files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Identities opened or already open, in input order.
    pub opened: Vec<String>,
    /// Paths that were not component files.
    pub rejected: Vec<String>,
}

pub struct ComponentView<F = DiskFs, C = LogChannel> {
    resolver: ComponentResolver<F>,
    open: ComponentSet,
    channel: C,
}

impl<F: FileSystem, C: OutputChannel> ComponentView<F, C> {
    pub fn new(resolver: ComponentResolver<F>, mut channel: C) -> Self {
        if !crate::is_workspace_root(resolver.root()) {
            channel.append_line("Workspace root is non voyager-web.");
        }
        Self {
            resolver,
            open: ComponentSet::new(),
            channel,
        }
    }

    /// Open the component `relative_filepath` belongs to.
    ///
    /// Style sheets, tests and non-component paths are rejected. An identity
    /// that is already open is returned as is, without resolving again.
    pub fn open_component(&mut self, relative_filepath: &str) -> Result<&Component> {
        let file = classify(relative_filepath);
        if !file.is_seedable() {
            self.channel
                .append_line(&format!("Error: {relative_filepath} is not a component file"));
            bail!("{relative_filepath} is not a component file");
        }

        let mut component = Component::from_file(&file);
        let id = component.id();
        self.channel
            .append_line(&format!("Opening: {}", component.callable_name()));

        if !self.open.has(&component) {
            let resolved = self.resolver.resolve_component(&component)?;
            self.channel.append_line("Found Files:");
            for found in resolved.values().flatten() {
                self.channel.append_line(&found.relative_filepath);
            }
            component.attach(resolved);
            self.open.add(component);
        }

        self.open
            .get(&id)
            .ok_or_else(|| anyhow!("component {id} missing after open"))
    }

    pub fn close_component(&mut self, component: &Component) -> bool {
        self.open.delete(component)
    }

    /// Close whichever open component `relative_filepath` belongs to.
    pub fn close_path(&mut self, relative_filepath: &str) -> bool {
        let component = Component::from_file(&classify(relative_filepath));
        self.open.delete(&component)
    }

    /// Open every component file in `open_files`. Non-component paths are
    /// reported and skipped; filesystem errors abort seeding.
    pub fn seed<I, S>(&mut self, open_files: I) -> Result<SeedReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = SeedReport::default();
        for path in open_files {
            let path = path.as_ref();
            if !classify(path).is_seedable() {
                self.channel
                    .append_line(&format!("Error: {path} is not a component file"));
                report.rejected.push(path.to_string());
                continue;
            }
            let id = self.open_component(path)?.id();
            report.opened.push(id);
        }
        Ok(report)
    }

    /// Runner URL for the component of `relative_filepath`.
    pub fn test_url(&mut self, base: &str, relative_filepath: &str, kind: Option<TestKind>) -> String {
        let file = classify(relative_filepath);
        let url = test_runner_url(base, &file.component_name, kind);
        self.channel.append_line(&format!("Running test: {url}"));
        url
    }

    /// Open components in display order.
    pub fn components(&self) -> Vec<&Component> {
        self.open.to_sorted_vec()
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn workspace(files: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("core")).unwrap();
        fs::create_dir_all(temp.path().join("extended")).unwrap();
        for file in files {
            let path = temp.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }
        temp
    }

    #[test]
    fn open_logs_and_attaches_files() {
        let temp = workspace(&[
            "core/lib/feed/addon/components/update/header.js",
            "core/lib/feed/addon/templates/components/update/header.hbs",
        ]);
        let mut view = ComponentView::new(ComponentResolver::new(temp.path()), MemoryChannel::default());
        let component = view
            .open_component("core/lib/feed/addon/components/update/header.js")
            .unwrap();
        assert_eq!(component.files().count(), 2);

        let lines = view.channel().lines();
        assert_eq!(lines[0], "Opening: header (feed::update/header)");
        assert_eq!(lines[1], "Found Files:");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn non_workspace_root_is_reported() {
        let temp = TempDir::new().unwrap();
        let view = ComponentView::new(ComponentResolver::new(temp.path()), MemoryChannel::default());
        assert_eq!(view.channel().lines(), ["Workspace root is non voyager-web."]);
    }

    #[test]
    fn platform_names_must_be_directories() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("core"), "").unwrap();
        fs::create_dir(temp.path().join("extended")).unwrap();
        let view = ComponentView::new(ComponentResolver::new(temp.path()), MemoryChannel::default());
        assert_eq!(view.channel().lines(), ["Workspace root is non voyager-web."]);
    }

    #[test]
    fn reopening_an_identity_does_not_duplicate() {
        let temp = workspace(&["core/lib/feed/addon/components/header.js"]);
        let mut view = ComponentView::new(ComponentResolver::new(temp.path()), MemoryChannel::default());
        view.open_component("core/lib/feed/addon/components/header.js").unwrap();
        view.open_component("extended/lib/feed-ext/addon/components/header-ext.js")
            .unwrap();
        assert_eq!(view.components().len(), 1);
        assert!(view.close_path("core/lib/feed/addon/components/header.js"));
        assert!(view.components().is_empty());
        assert!(!view.close_path("core/lib/feed/addon/components/header.js"));
    }

    #[test]
    fn seeding_skips_non_component_files() {
        let temp = workspace(&["core/lib/feed/addon/components/header.js"]);
        let mut view = ComponentView::new(ComponentResolver::new(temp.path()), MemoryChannel::default());
        let report = view
            .seed([
                "core/lib/feed/addon/components/header.js",
                "core/lib/feed/addon/styles/components/header.scss",
                "package.json",
            ])
            .unwrap();
        assert_eq!(report.opened, vec!["headerfeed".to_string()]);
        assert_eq!(report.rejected.len(), 2);
        assert!(
            view.channel()
                .lines()
                .contains(&"Error: package.json is not a component file".to_string())
        );
    }

    #[test]
    fn test_url_is_logged() {
        let temp = workspace(&[]);
        let mut view = ComponentView::new(ComponentResolver::new(temp.path()), MemoryChannel::default());
        let url = view.test_url(
            "http://localhost:4200/tests",
            "core/lib/feed/addon/components/header-ext.js",
            Some(TestKind::Unit),
        );
        assert_eq!(url, "http://localhost:4200/tests?filter=/unit.*header/i");
        assert_eq!(view.channel().lines().last(), Some(&format!("Running test: {url}")));
    }
}
