//! Working tree access
//!
//! Lists, reads, stats and rewrites the files under the repository root.
//! Paths handed in and out are `/`-separated and relative to the root.

use crate::areas::filesystem::{FileStat, FileSystem};
use crate::artifacts::index::entry_mode::FileMode;
use crate::errors::Result;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Workspace {
    path: Box<Path>,
    fs: Arc<dyn FileSystem>,
    /// Names never descended into (metadata directories)
    excluded: Vec<String>,
}

impl Workspace {
    pub fn new(path: Box<Path>, fs: Arc<dyn FileSystem>, excluded: Vec<String>) -> Self {
        Workspace { path, fs, excluded }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    /// Every eligible file below the root
    pub fn list_files(&self) -> Result<Vec<String>> {
        self.list_files_under(&self.path)
    }

    /// Every eligible file below `dir`, which must lie inside the root
    pub fn list_files_under(&self, dir: &Path) -> Result<Vec<String>> {
        Ok(self
            .fs
            .walk_files(dir, &self.excluded)?
            .iter()
            .filter_map(|file| self.relative_path(file))
            .collect())
    }

    /// Normalize a user-supplied path to the `/`-separated root-relative form
    ///
    /// `./a/../b.txt` becomes `b.txt`; absolute paths inside the root are
    /// made relative. Returns `None` for paths that escape the root.
    pub fn normalize(&self, path: &str) -> Option<String> {
        let path = Path::new(path);
        let path = if path.is_absolute() {
            path.strip_prefix(&self.path).ok()?
        } else {
            path
        };

        let mut parts: Vec<String> = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                Component::ParentDir => {
                    parts.pop()?;
                }
                _ => {}
            }
        }

        Some(parts.join("/"))
    }

    pub fn exists(&self, path: &str) -> bool {
        self.fs.exists(&self.absolute(path))
    }

    pub fn is_dir(&self, path: &str) -> bool {
        self.fs.is_dir(&self.absolute(path))
    }

    pub fn read_file(&self, path: &str) -> Result<Bytes> {
        Ok(Bytes::from(self.fs.read(&self.absolute(path))?))
    }

    pub fn stat_file(&self, path: &str) -> Result<FileStat> {
        Ok(self.fs.stat(&self.absolute(path))?)
    }

    /// Write a file, creating parent directories and applying the mode
    pub fn write_file(&self, path: &str, data: &[u8], mode: FileMode) -> Result<()> {
        let file_path = self.absolute(path);
        if let Some(parent) = file_path.parent() {
            self.fs.create_dir_all(parent)?;
        }

        self.fs.write(&file_path, data)?;
        self.fs.set_executable(&file_path, mode.is_executable())?;

        Ok(())
    }

    /// Delete a file and any parent directories it leaves empty
    pub fn remove_file(&self, path: &str) -> Result<()> {
        let file_path = self.absolute(path);
        self.fs.remove_file(&file_path)?;

        let mut parent = file_path.parent();
        while let Some(dir) = parent {
            if dir == self.path.as_ref() || !dir.starts_with(&self.path) {
                break;
            }
            self.fs.remove_empty_dir(dir)?;
            if self.fs.exists(dir) {
                break;
            }
            parent = dir.parent();
        }

        Ok(())
    }

    fn absolute(&self, path: &str) -> PathBuf {
        self.path.join(path)
    }

    fn relative_path(&self, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(&self.path).ok()?;
        let parts = relative
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>();

        Some(parts.join("/"))
    }
}
