//! Component resolver.
//!
//! Given a component descriptor, the resolver walks the candidate lists from
//! [`candidates`] against the workspace through a [`FileSystem`]. Template and
//! script probes stop at the first existing candidate; test and style probes
//! keep every match. Absence is the normal outcome for most candidates and is
//! never an error; a directory that cannot be listed is.

pub mod candidates;
pub mod fs;

pub use fs::{DiskFs, FileSystem};

use crate::component::Component;
use crate::taxonomy::{PlatformKind, SourceFile, classify};
use anyhow::{Result, bail};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Artifact kinds in the order files are listed within a platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ArtifactKind {
    Template,
    Script,
    Style,
    Test,
}

/// Files found per platform, platforms in priority order.
pub type ResolvedPlatforms = BTreeMap<PlatformKind, Vec<SourceFile>>;

#[derive(Debug, Clone)]
pub struct ComponentResolver<F = DiskFs> {
    root: PathBuf,
    fs: F,
}

impl ComponentResolver<DiskFs> {
    /// Resolver over the real filesystem rooted at the workspace `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, DiskFs)
    }
}

impl<F: FileSystem> ComponentResolver<F> {
    pub fn with_fs(root: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a repository-relative path exists under the root.
    pub fn file_exists(&self, relative_filepath: &str) -> bool {
        self.fs.exists(&self.full_path(relative_filepath))
    }

    pub fn full_path(&self, relative_filepath: &str) -> PathBuf {
        self.root.join(relative_filepath)
    }

    pub fn find_template(&self, platform: &PlatformKind, component: &Component) -> Option<String> {
        self.first_existing(candidates::template_candidates(platform, component))
    }

    pub fn find_script(&self, platform: &PlatformKind, component: &Component) -> Option<String> {
        self.first_existing(candidates::script_candidates(platform, component))
    }

    pub fn find_tests(&self, platform: &PlatformKind, component: &Component) -> Vec<String> {
        candidates::test_candidates(platform, component)
            .into_iter()
            .filter(|candidate| self.file_exists(candidate))
            .collect()
    }

    /// Style sheets in every existing candidate directory whose name ends
    /// with `<component>.scss`. Candidates that are not directories are
    /// skipped; listing failures propagate.
    pub fn find_styles(&self, platform: &PlatformKind, component: &Component) -> Result<Vec<String>> {
        let suffix = candidates::style_suffix(component);
        let mut styles = Vec::new();
        for dir in candidates::style_directories(platform, component) {
            let full = self.full_path(&dir);
            if !self.fs.is_dir(&full) {
                continue;
            }
            for name in self.fs.list_dir(&full)? {
                if name.ends_with(&suffix) {
                    styles.push(format!("{dir}/{name}"));
                }
            }
        }
        Ok(styles)
    }

    /// All four probes for one target platform, in artifact order.
    pub fn probe_platform(
        &self,
        platform: &PlatformKind,
        component: &Component,
    ) -> Result<Vec<(ArtifactKind, String)>> {
        let mut hits = Vec::new();
        if let Some(template) = self.find_template(platform, component) {
            hits.push((ArtifactKind::Template, template));
        }
        if let Some(script) = self.find_script(platform, component) {
            hits.push((ArtifactKind::Script, script));
        }
        for style in self.find_styles(platform, component)? {
            hits.push((ArtifactKind::Style, style));
        }
        for test in self.find_tests(platform, component) {
            hits.push((ArtifactKind::Test, test));
        }
        Ok(hits)
    }

    /// Probe every platform and group the discovered files under the
    /// platform of their own path.
    ///
    /// Each file appears once. Within a platform files are ordered template,
    /// script, style, test, then by probe order. Platforms without files are
    /// absent from the result.
    pub fn resolve_component(&self, component: &Component) -> Result<ResolvedPlatforms> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut hits: Vec<(ArtifactKind, usize, SourceFile)> = Vec::new();
        for platform in &PlatformKind::PROBED {
            for (kind, path) in self.probe_platform(platform, component)? {
                if seen.insert(path.clone()) {
                    let order = hits.len();
                    hits.push((kind, order, classify(&path)));
                }
            }
        }
        hits.sort_by_key(|(kind, order, _)| (*kind, *order));

        let mut resolved = ResolvedPlatforms::new();
        for (_, _, file) in hits {
            resolved.entry(file.platform.clone()).or_default().push(file);
        }
        Ok(resolved)
    }

    /// Classify `relative_filepath`, build its component and attach every
    /// file found for it.
    pub fn resolve_path(&self, relative_filepath: &str) -> Result<Component> {
        let file = classify(relative_filepath);
        if !file.is_seedable() {
            bail!("{relative_filepath} is not a component file");
        }
        let mut component = Component::from_file(&file);
        component.attach(self.resolve_component(&component)?);
        Ok(component)
    }

    fn first_existing(&self, candidates: Vec<String>) -> Option<String> {
        candidates
            .into_iter()
            .find(|candidate| self.file_exists(candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::collections::BTreeSet;

    // In-memory tree that records probe order and can fail listings.
    #[derive(Default)]
    struct FakeFs {
        files: BTreeSet<PathBuf>,
        broken: BTreeSet<PathBuf>,
        probed: RefCell<Vec<PathBuf>>,
    }

    impl FakeFs {
        fn with_files(paths: &[&str]) -> Self {
            let mut fs = FakeFs::default();
            for path in paths {
                fs.files.insert(Path::new("/ws").join(path));
            }
            fs
        }
    }

    impl FileSystem for FakeFs {
        fn exists(&self, path: &Path) -> bool {
            self.probed.borrow_mut().push(path.to_path_buf());
            self.files.contains(path) || self.is_dir(path)
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.files
                .iter()
                .any(|file| file != path && file.starts_with(path))
        }

        fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
            if self.broken.contains(path) {
                return Err(anyhow!("permission denied: {}", path.display()));
            }
            let mut names: Vec<String> = self
                .files
                .iter()
                .filter(|file| file.parent() == Some(path))
                .filter_map(|file| file.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect();
            names.sort();
            Ok(names)
        }
    }

    fn header() -> Component {
        Component::from_file(&classify("core/lib/feed/addon/components/update/header.js"))
    }

    #[test]
    fn first_match_stops_probing() {
        let fs = FakeFs::with_files(&[
            "core/lib/feed/addon/components/update/header.js",
            "core/engines/feed/addon/components/update/header.js",
        ]);
        let resolver = ComponentResolver::with_fs("/ws", &fs);
        let script = resolver.find_script(&PlatformKind::Core, &header());
        assert_eq!(
            script.as_deref(),
            Some("core/lib/feed/addon/components/update/header.js")
        );
        assert_eq!(fs.probed.borrow().len(), 1);
    }

    #[test]
    fn listing_errors_propagate() {
        let mut fs = FakeFs::with_files(&["core/lib/feed/addon/styles/components/update/header.scss"]);
        fs.broken
            .insert(PathBuf::from("/ws/core/lib/feed/addon/styles/components/update"));
        let resolver = ComponentResolver::with_fs("/ws", &fs);
        let err = resolver
            .resolve_component(&header())
            .expect_err("listing failure must surface");
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn files_are_grouped_by_their_own_platform() {
        let fs = FakeFs::with_files(&[
            "core/lib/feed/addon/components/update/header.js",
            "core/lib/voyager-testing/tests/unit/components/feed/update/header-test.js",
            "extended/tests/integration/components/feed/update/header-ext-test.js",
        ]);
        let resolver = ComponentResolver::with_fs("/ws", &fs);
        let resolved = resolver.resolve_component(&header()).unwrap();

        let core: Vec<&str> = resolved[&PlatformKind::Core]
            .iter()
            .map(|file| file.relative_filepath.as_str())
            .collect();
        assert_eq!(
            core,
            vec![
                "core/lib/feed/addon/components/update/header.js",
                "core/lib/voyager-testing/tests/unit/components/feed/update/header-test.js",
            ]
        );
        assert_eq!(resolved[&PlatformKind::Extended].len(), 1);
        assert!(!resolved.contains_key(&PlatformKind::Lib));
    }

    #[test]
    fn resolve_path_rejects_non_components() {
        let resolver = ComponentResolver::with_fs("/ws", FakeFs::default());
        let err = resolver
            .resolve_path("core/lib/feed/addon/styles/components/header.scss")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "core/lib/feed/addon/styles/components/header.scss is not a component file"
        );
        assert!(resolver.resolve_path("core/lib/feed/addon/routes/index.js").is_err());
    }
}
