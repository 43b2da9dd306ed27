//! Filesystem capability
//!
//! Every component that touches disk goes through [`FileSystem`], which is
//! handed to the repository at construction. [`DiskFileSystem`] is the
//! implementation backed by the host filesystem.

use is_executable::IsExecutable;
use std::io;
use std::os::unix::fs::{MetadataExt, PermissionsExt};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Stat fields recorded in index entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileStat {
    /// Status change time, whole seconds
    pub ctime: i64,
    /// Modification time, whole seconds
    pub mtime: i64,
    pub dev: u64,
    pub ino: u64,
    /// `0o100755` when any execute bit is set, `0o100644` otherwise
    pub mode: u32,
    pub uid: u32,
    pub gid: u32,
    pub size: u64,
}

pub trait FileSystem: std::fmt::Debug {
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replace the whole file, creating it if needed
    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove a directory only if it is empty
    fn remove_empty_dir(&self, path: &Path) -> io::Result<()>;

    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    fn set_executable(&self, path: &Path, executable: bool) -> io::Result<()>;

    /// Every regular file below `root`, sorted by name per directory.
    ///
    /// Entries whose name is in `excluded` are skipped before descending.
    fn walk_files(&self, root: &Path, excluded: &[String]) -> io::Result<Vec<PathBuf>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        std::fs::write(path, data)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_empty_dir(&self, path: &Path) -> io::Result<()> {
        if std::fs::read_dir(path)?.next().is_none() {
            std::fs::remove_dir(path)?;
        }

        Ok(())
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = std::fs::metadata(path)?;
        let mode = if path.is_executable() {
            0o100755
        } else {
            0o100644
        };

        Ok(FileStat {
            ctime: metadata.ctime(),
            mtime: metadata.mtime(),
            dev: metadata.dev(),
            ino: metadata.ino(),
            mode,
            uid: metadata.uid(),
            gid: metadata.gid(),
            size: metadata.size(),
        })
    }

    fn set_executable(&self, path: &Path, executable: bool) -> io::Result<()> {
        let mode = if executable { 0o755 } else { 0o644 };
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
    }

    fn walk_files(&self, root: &Path, excluded: &[String]) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !excluded
                        .iter()
                        .any(|name| entry.file_name().to_string_lossy() == name.as_str())
            });

        for entry in walker {
            let entry = entry.map_err(io::Error::other)?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        dir.child("b.txt").write_str("b").unwrap();
        dir.child("a/z.txt").write_str("z").unwrap();
        dir.child("a/c.txt").write_str("c").unwrap();
        dir.child(".nbgit/HEAD").write_str("ref").unwrap();
        dir.child(".git/config").write_str("cfg").unwrap();
        dir
    }

    #[rstest]
    fn walk_skips_excluded_dirs_and_sorts(dir: TempDir) {
        let files = DiskFileSystem
            .walk_files(dir.path(), &[".git".to_string(), ".nbgit".to_string()])
            .unwrap();

        let relative = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        assert_eq!(relative, vec!["a/c.txt", "a/z.txt", "b.txt"]);
    }

    #[rstest]
    fn stat_normalizes_execute_bit(dir: TempDir) {
        let path = dir.child("b.txt");
        assert_eq!(DiskFileSystem.stat(path.path()).unwrap().mode, 0o100644);

        DiskFileSystem.set_executable(path.path(), true).unwrap();
        let stat = DiskFileSystem.stat(path.path()).unwrap();

        assert_eq!(stat.mode, 0o100755);
        assert_eq!(stat.size, 1);
    }

    #[rstest]
    fn removes_only_empty_dirs(dir: TempDir) {
        DiskFileSystem.remove_empty_dir(&dir.path().join("a")).unwrap();
        assert!(dir.path().join("a").exists());

        DiskFileSystem.remove_file(&dir.path().join("a/z.txt")).unwrap();
        DiskFileSystem.remove_file(&dir.path().join("a/c.txt")).unwrap();
        DiskFileSystem.remove_empty_dir(&dir.path().join("a")).unwrap();
        assert!(!dir.path().join("a").exists());
    }
}
