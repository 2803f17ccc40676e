//! Path taxonomy for the monorepo layout.
//!
//! `classify` splits a repository-relative path into the fields the resolver
//! works from: platform, engine, path remainder, names, extension and test
//! kind. Parsing is positional over `/`-separated segments of the directory
//! portion. Candidate lists downstream are assembled from these exact strings,
//! so nothing here normalizes paths, and malformed input degrades to empty
//! fields instead of failing.

use serde::{Serialize, Serializer};
use std::fmt;

/// Directory name of the shared testing library; its position marks test files.
pub const TESTING_LIBRARY_DIR: &str = "voyager-testing";

const COMPONENTS_MARKER: &str = "components";
const COMPONENTS_DIR: &str = "components/";
const SHARED_PREFIX: &str = "shared";

pub(crate) const EXT_SUFFIX: &str = "-ext";
pub(crate) const COMMON_SUFFIX: &str = "-common";
pub(crate) const GLOBAL_SUFFIX: &str = "-global";
const TEST_SUFFIX: &str = "-test";

/// Top-level build target a file lives under.
///
/// Variant order doubles as display priority, so maps keyed by
/// `PlatformKind` iterate `lib`, `engine-lib`, `core`, `extended`, then any
/// other top-level directory.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PlatformKind {
    Lib,
    EngineLib,
    Core,
    Extended,
    Other(String),
}

impl PlatformKind {
    /// Platforms the resolver probes, in probe order.
    pub const PROBED: [PlatformKind; 4] = [
        PlatformKind::Lib,
        PlatformKind::EngineLib,
        PlatformKind::Core,
        PlatformKind::Extended,
    ];

    pub fn from_segment(segment: &str) -> Self {
        match segment {
            "lib" => PlatformKind::Lib,
            "engine-lib" => PlatformKind::EngineLib,
            "core" => PlatformKind::Core,
            "extended" => PlatformKind::Extended,
            other => PlatformKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            PlatformKind::Lib => "lib",
            PlatformKind::EngineLib => "engine-lib",
            PlatformKind::Core => "core",
            PlatformKind::Extended => "extended",
            PlatformKind::Other(name) => name.as_str(),
        }
    }

    /// Sort weight for components with equal names: `lib`/`engine-lib` first,
    /// then `core`, then `extended`.
    pub fn priority(&self) -> u8 {
        match self {
            PlatformKind::Lib | PlatformKind::EngineLib => 0,
            PlatformKind::Core => 1,
            PlatformKind::Extended => 2,
            PlatformKind::Other(_) => 3,
        }
    }

    /// `lib` and `engine-lib` put the engine one segment earlier than the
    /// other platforms.
    pub fn is_lib_like(&self) -> bool {
        matches!(self, PlatformKind::Lib | PlatformKind::EngineLib)
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PlatformKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Unit,
    Integration,
    Acceptance,
}

impl TestKind {
    pub const ALL: [TestKind; 3] = [TestKind::Unit, TestKind::Integration, TestKind::Acceptance];

    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "unit" => Some(TestKind::Unit),
            "integration" => Some(TestKind::Integration),
            "acceptance" => Some(TestKind::Acceptance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TestKind::Unit => "unit",
            TestKind::Integration => "integration",
            TestKind::Acceptance => "acceptance",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the extra `shared*` level of a compound engine sits on disk.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SharedNesting {
    /// Directly after the engine directory: `core/lib/shared/shared-ui/addon/...`.
    Directory(String),
    /// First namespace under `components/`: `core/lib/growth/addon/components/shared/...`.
    Namespace(String),
}

/// Build unit a file belongs to, with `-ext`/`-common` already stripped.
///
/// Displays as the compound `root/shared` form when the path carries a shared
/// nesting level. Code that needs a directory name goes through
/// [`Engine::directory`] rather than the display string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Engine {
    root: String,
    shared: Option<SharedNesting>,
}

impl Engine {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            shared: None,
        }
    }

    pub fn with_shared(root: impl Into<String>, shared: SharedNesting) -> Self {
        Self {
            root: root.into(),
            shared: Some(shared),
        }
    }

    /// Canonical engine name without the shared level.
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn shared(&self) -> Option<&SharedNesting> {
        self.shared.as_ref()
    }

    /// The part after the first `/` of the compound name, or `""`.
    pub fn remainder(&self) -> &str {
        match &self.shared {
            Some(SharedNesting::Directory(segment)) | Some(SharedNesting::Namespace(segment)) => {
                segment.as_str()
            }
            None => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    pub fn is_shared(&self) -> bool {
        self.root == "shared" || self.root == "shared-ext"
    }

    /// On-disk directory spelling with `suffix` attached to the root segment.
    ///
    /// A directory nesting keeps its extra level (`shared-ext/shared-ui`); a
    /// namespace nesting lives under `components/`, so only the root is a
    /// directory here.
    pub fn directory(&self, suffix: &str) -> String {
        match &self.shared {
            Some(SharedNesting::Directory(segment)) => {
                format!("{}{suffix}/{segment}", self.root)
            }
            Some(SharedNesting::Namespace(_)) | None => format!("{}{suffix}", self.root),
        }
    }

    /// Directory spelling of the engine on `platform`; `extended` engines
    /// carry `-ext`.
    pub fn platform_directory(&self, platform: &PlatformKind) -> String {
        if *platform == PlatformKind::Extended {
            self.directory(EXT_SUFFIX)
        } else {
            self.directory("")
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shared.is_some() {
            write!(f, "{}/{}", self.root, self.remainder())
        } else {
            f.write_str(&self.root)
        }
    }
}

impl Serialize for Engine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Classification of one repository-relative path.
///
/// Every field is derived from `relative_filepath` once, in [`classify`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SourceFile {
    pub relative_filepath: String,
    pub platform: PlatformKind,
    pub engine: Engine,
    pub path_remainder: String,
    pub name: String,
    pub component_name: String,
    pub ext: String,
    pub is_component: bool,
    pub is_test: bool,
    pub test_kind: Option<TestKind>,
}

impl SourceFile {
    pub fn is_scss(&self) -> bool {
        self.ext == "scss"
    }

    pub fn is_shared_engine(&self) -> bool {
        self.engine.is_shared()
    }

    /// Whether this path may open a component: component files that are
    /// neither style sheets nor tests.
    pub fn is_seedable(&self) -> bool {
        self.is_component && !self.is_scss() && !self.is_test
    }

    /// Short label for a file within its platform: `engine/remainder/ext`,
    /// or `tests/<kind>` for test files.
    pub fn specialized_name(&self) -> String {
        if self.is_test {
            let kind = self.test_kind.map(|kind| kind.as_str()).unwrap_or("");
            return join_segments(["tests", kind]);
        }
        let engine = self.engine.to_string();
        join_segments([engine.as_str(), self.path_remainder.as_str(), self.ext.as_str()])
    }
}

/// Classify a repository-relative path. Never fails.
pub fn classify(relative_filepath: &str) -> SourceFile {
    let dir = dirname(relative_filepath);
    let segments: Vec<&str> = dir.split('/').collect();
    let segment = |idx: usize| segments.get(idx).copied().unwrap_or("");

    let platform = PlatformKind::from_segment(segment(0));

    let mut base_parts = basename(relative_filepath).split('.');
    let name = base_parts.next().unwrap_or("").to_string();
    let ext = base_parts.next().unwrap_or("").to_string();

    let is_component = relative_filepath.contains(COMPONENTS_MARKER);
    let path_remainder = if is_component {
        remainder_after_components(dir).to_string()
    } else {
        String::new()
    };

    let (engine_segment, next_segment) = if platform.is_lib_like() {
        (segment(1), segment(2))
    } else {
        (segment(2), segment(3))
    };
    let engine = parse_engine(engine_segment, next_segment, &path_remainder);

    let is_test = segment(2) == TESTING_LIBRARY_DIR;
    let test_kind = if is_test {
        TestKind::from_segment(segment(4))
    } else {
        None
    };

    let component_name = component_name(&name).to_string();

    SourceFile {
        relative_filepath: relative_filepath.to_string(),
        platform,
        engine,
        path_remainder,
        name,
        component_name,
        ext,
        is_component,
        is_test,
        test_kind,
    }
}

/// Strip `-test`, then `-ext`: `foo-ext-test` → `foo`.
pub fn component_name(name: &str) -> &str {
    let without_test = name.strip_suffix(TEST_SUFFIX).unwrap_or(name);
    without_test.strip_suffix(EXT_SUFFIX).unwrap_or(without_test)
}

/// Path of `file_path` relative to the workspace `root`, without a leading `/`.
pub fn relative_filepath(root: &str, file_path: &str) -> String {
    let relative = file_path.strip_prefix(root).unwrap_or(file_path);
    relative.strip_prefix('/').unwrap_or(relative).to_string()
}

/// Keep only files that may open a component.
pub fn filter_seedable(files: Vec<SourceFile>) -> Vec<SourceFile> {
    files.into_iter().filter(SourceFile::is_seedable).collect()
}

fn parse_engine(engine_segment: &str, next_segment: &str, path_remainder: &str) -> Engine {
    let root = engine_segment
        .strip_suffix(EXT_SUFFIX)
        .unwrap_or(engine_segment);
    let root = root.strip_suffix(COMMON_SUFFIX).unwrap_or(root);

    if next_segment.starts_with(SHARED_PREFIX) {
        return Engine::with_shared(root, SharedNesting::Directory(next_segment.to_string()));
    }

    let namespace = path_remainder.split('/').next().unwrap_or("");
    if namespace.starts_with(SHARED_PREFIX) {
        return Engine::with_shared(root, SharedNesting::Namespace(namespace.to_string()));
    }

    Engine::new(root)
}

fn remainder_after_components(dir: &str) -> &str {
    dir.rsplit_once(COMPONENTS_DIR)
        .map(|(_, rest)| rest)
        .unwrap_or("")
}

fn dirname(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => ".",
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Join with `/`, skipping empty segments.
pub(crate) fn join_segments<'a, I>(segments: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
