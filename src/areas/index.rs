//! Index (staging area)
//!
//! The index tracks which file contents go into the next commit.
//!
//! ## Index File Format
//!
//! The index file contains:
//! - Header: Signature, version, and entry count
//! - Entries: staged files with metadata, in the order they were staged
//! - Checksum: digest of everything before it (not verified on load)
//!
//! Re-staging a path moves its entry to the end of the list.

use crate::areas::filesystem::FileSystem;
use crate::artifacts::core::hash_algorithm::HashAlgorithm;
use crate::artifacts::index::HEADER_SIZE;
use crate::artifacts::index::checksum::Checksum;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::index::index_header::IndexHeader;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::Result;
use bytes::Bytes;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Staging area backed by the index file
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `<metadata>/index`)
    path: Box<Path>,
    fs: Arc<dyn FileSystem>,
    algorithm: HashAlgorithm,
    /// Staged entries in insertion order
    entries: Vec<IndexEntry>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>, fs: Arc<dyn FileSystem>, algorithm: HashAlgorithm) -> Self {
        Index {
            path,
            fs,
            algorithm,
            entries: Vec::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.fs.exists(&self.path)
    }

    /// Load the index from disk
    ///
    /// A missing file leaves the index empty.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries = if self.exists() {
            Self::parse(&self.fs.read(&self.path)?, self.algorithm)?
        } else {
            Vec::new()
        };
        self.changed = false;

        Ok(())
    }

    /// Decode an index file body
    ///
    /// Anything without the `DIRC` signature decodes to an empty list. The
    /// trailing checksum is ignored.
    pub fn parse(bytes: &[u8], algorithm: HashAlgorithm) -> Result<Vec<IndexEntry>> {
        if bytes.len() < HEADER_SIZE {
            return Ok(Vec::new());
        }

        let mut reader = Cursor::new(bytes);
        let header = IndexHeader::deserialize(&mut reader, algorithm)?;
        if !header.has_signature() {
            return Ok(Vec::new());
        }

        (0..header.entries_count)
            .map(|_| IndexEntry::deserialize(&mut reader, algorithm))
            .collect()
    }

    /// Encode entries as an index file, trailer included
    pub fn build(entries: &[IndexEntry], algorithm: HashAlgorithm) -> Result<Bytes> {
        let mut writer = Checksum::new(algorithm);

        let header = IndexHeader::for_entries(entries.len() as u32);
        writer.write(&header.serialize()?);

        for entry in entries {
            writer.write(&entry.serialize()?);
        }

        Ok(writer.write_checksum())
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry_by_path(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.path == path)
    }

    /// Stage an entry, replacing any entry with the same path
    pub fn add(&mut self, entry: IndexEntry) {
        self.remove(&entry.path);
        self.entries.push(entry);
        self.changed = true;
    }

    pub fn remove(&mut self, path: &str) {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.path != path);
        self.changed |= self.entries.len() != before;
    }

    /// Drop entries rejected by `keep`, returning the dropped paths
    pub fn prune(&mut self, keep: impl Fn(&IndexEntry) -> bool) -> Vec<String> {
        let (kept, dropped): (Vec<_>, Vec<_>) = self.entries.drain(..).partition(|e| keep(e));
        self.entries = kept;
        self.changed |= !dropped.is_empty();

        dropped.into_iter().map(|entry| entry.path).collect()
    }

    /// Replace the whole staging area
    pub fn replace_all(&mut self, entries: Vec<IndexEntry>) {
        self.entries = entries;
        self.changed = true;
    }

    /// Rewrite the index file if anything changed since loading
    pub fn write_updates(&mut self) -> Result<()> {
        if !self.changed {
            return Ok(());
        }

        let bytes = Self::build(&self.entries, self.algorithm)?;
        self.fs.write(&self.path, &bytes)?;
        self.changed = false;

        tracing::debug!(entries = self.entries.len(), path = %self.path.display(), "index written");

        Ok(())
    }
}
