use crate::taxonomy::{Engine, PlatformKind, SourceFile};
use serde::Serialize;
use std::collections::BTreeMap;

/// Files of one component that live under a single platform.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Platform {
    pub name: PlatformKind,
    pub files: Vec<SourceFile>,
}

impl Platform {
    pub fn new(name: PlatformKind) -> Self {
        Self {
            name,
            files: Vec::new(),
        }
    }

    pub fn contains(&self, relative_filepath: &str) -> bool {
        self.files
            .iter()
            .any(|file| file.relative_filepath == relative_filepath)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Component {
    pub name: String,
    pub engine: Engine,
    pub path_remainder: String,
    /// Platform of the file the component was opened from. Only used to
    /// order components with equal names.
    pub platform: PlatformKind,
    pub platforms: BTreeMap<PlatformKind, Platform>,
}

impl Component {
    /// Component descriptor for a classified file. No files are attached yet.
    pub fn from_file(file: &SourceFile) -> Self {
        Self {
            name: file.component_name.clone(),
            engine: file.engine.clone(),
            path_remainder: file.path_remainder.clone(),
            platform: file.platform.clone(),
            platforms: BTreeMap::new(),
        }
    }

    /// Identity within a `ComponentSet`: name, engine and path remainder.
    /// The platform is deliberately left out so every platform's files merge
    /// into one component.
    pub fn id(&self) -> String {
        format!("{}{}{}", self.name, self.engine, self.path_remainder)
    }

    /// Label such as `header (feed::update/header)`.
    pub fn callable_name(&self) -> String {
        let mut label = format!("{} ({}::", self.name, self.engine);
        if !self.path_remainder.is_empty() {
            label.push_str(&self.path_remainder);
            label.push('/');
        }
        label.push_str(&self.name);
        label.push(')');
        label
    }

    /// Append a file under its own platform, creating the platform entry on
    /// first use. Returns `false` when the file is already attached.
    pub fn add_file(&mut self, file: SourceFile) -> bool {
        let platform = self
            .platforms
            .entry(file.platform.clone())
            .or_insert_with_key(|name| Platform::new(name.clone()));
        if platform.contains(&file.relative_filepath) {
            return false;
        }
        platform.files.push(file);
        true
    }

    /// Attach a resolver result, platform by platform.
    pub fn attach(&mut self, resolved: BTreeMap<PlatformKind, Vec<SourceFile>>) {
        for (_, files) in resolved {
            for file in files {
                self.add_file(file);
            }
        }
    }

    pub fn platform(&self, name: &PlatformKind) -> Option<&Platform> {
        self.platforms.get(name)
    }

    /// Every attached file, in platform priority order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.platforms.values().flat_map(|platform| platform.files.iter())
    }
}
