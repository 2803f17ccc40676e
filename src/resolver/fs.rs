use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Read-only filesystem access the resolver probes through.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Names of the direct children of `path`, sorted.
    fn list_dir(&self, path: &Path) -> Result<Vec<String>>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        (**self).list_dir(path)
    }
}

/// The real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiskFs;

impl FileSystem for DiskFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in
            fs::read_dir(path).with_context(|| format!("listing {}", path.display()))?
        {
            let entry = entry.with_context(|| format!("reading entry in {}", path.display()))?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}
