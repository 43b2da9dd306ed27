//! Tree object
//!
//! A tree is a flat snapshot of every staged file: one entry per path,
//! with the full relative path stored in place of a nested directory
//! structure. Entries keep the order they were built in.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <path>\0<raw-digest>`

use crate::artifacts::core::hash_algorithm::HashAlgorithm;
use crate::artifacts::index::entry_mode::FileMode;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{RepositoryError, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub path: String,
    pub oid: ObjectId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Tree { entries }
    }

    /// Build a tree from staged entries, one tree entry per index entry
    pub fn build<'e>(entries: impl IntoIterator<Item = &'e IndexEntry>) -> Self {
        Tree {
            entries: entries
                .into_iter()
                .map(|entry| TreeEntry::new(entry.mode(), entry.path.clone(), entry.oid.clone()))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TreeEntry> {
        self.entries
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut tree_bytes = Vec::new();

        for entry in &self.entries {
            write!(tree_bytes, "{} {}\0", entry.mode.as_str(), entry.path)?;
            entry.oid.write_raw_to(&mut tree_bytes)?;
        }

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(mut reader: impl BufRead, algorithm: HashAlgorithm) -> Result<Self> {
        let mut entries = Vec::new();

        loop {
            let mut mode = Vec::new();
            if reader.read_until(b' ', &mut mode)? == 0 {
                break;
            }
            if mode.pop() != Some(b' ') {
                return Err(RepositoryError::CorruptObject(
                    "tree entry is missing its mode separator".to_string(),
                ));
            }

            let mut path = Vec::new();
            reader.read_until(b'\0', &mut path)?;
            if path.pop() != Some(b'\0') {
                return Err(RepositoryError::CorruptObject(
                    "tree entry is missing its path terminator".to_string(),
                ));
            }

            let mode = FileMode::try_from(String::from_utf8_lossy(&mode).as_ref())?;
            let path = String::from_utf8(path).map_err(|_| {
                RepositoryError::CorruptObject("tree entry path is not UTF-8".to_string())
            })?;
            let oid = ObjectId::read_raw_from(&mut reader, algorithm).map_err(|_| {
                RepositoryError::CorruptObject(format!("tree entry '{path}' is truncated"))
            })?;

            entries.push(TreeEntry::new(mode, path, oid));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn oid_of(content: &str, algorithm: HashAlgorithm) -> ObjectId {
        ObjectId::from_raw(&algorithm.raw(content.as_bytes()))
    }

    #[test]
    fn empty_tree_matches_reference_id() {
        let tree = Tree::default();

        assert_eq!(
            tree.object_id(HashAlgorithm::Sha1).unwrap().as_ref(),
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        );
    }

    #[test]
    fn serializes_flat_entries_with_full_paths() {
        let oid = oid_of("x", HashAlgorithm::Sha1);
        let tree = Tree::new(vec![TreeEntry::new(
            FileMode::Executable,
            "bin/run.sh".to_string(),
            oid.clone(),
        )]);

        let body = tree.serialize().unwrap();

        assert!(body.starts_with(b"100755 bin/run.sh\0"));
        assert_eq!(body.len(), "100755 bin/run.sh\0".len() + 20);
        assert_eq!(&body[body.len() - 20..], oid.to_raw().unwrap().as_slice());
    }

    #[test]
    fn rejects_truncated_digest() {
        let body = b"100644 a.txt\0\x01\x02".to_vec();

        assert!(Tree::deserialize(Cursor::new(body), HashAlgorithm::Sha1).is_err());
    }

    proptest! {
        #[test]
        fn round_trips_entries(
            paths in proptest::collection::vec("[a-z]{1,8}(/[a-z]{1,8}){0,2}", 0..8),
            executable in proptest::collection::vec(any::<bool>(), 8),
            sha256 in any::<bool>(),
        ) {
            let algorithm = if sha256 { HashAlgorithm::Sha256 } else { HashAlgorithm::Sha1 };
            let entries = paths
                .iter()
                .enumerate()
                .map(|(i, path)| {
                    let mode = if executable[i] { FileMode::Executable } else { FileMode::Regular };
                    TreeEntry::new(mode, path.clone(), oid_of(path, algorithm))
                })
                .collect::<Vec<_>>();
            let tree = Tree::new(entries.clone());

            let body = tree.serialize().unwrap();
            let parsed = Tree::deserialize(Cursor::new(body.to_vec()), algorithm).unwrap();

            prop_assert_eq!(parsed.into_entries(), entries);
        }
    }
}
