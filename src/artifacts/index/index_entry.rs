//! Index entry representation
//!
//! Each entry in the index represents a staged file with:
//! - File path, relative to the repository root
//! - Content hash (object ID)
//! - Stat metadata, each field wrapped to 32 bits
//!
//! ## Entry Format
//!
//! ```text
//! ctime(4) 0(4) mtime(4) 0(4) dev(4) ino(4) mode(4) uid(4) gid(4) size(4)
//! raw-digest(digest_len) flags(2) path NUL padding
//! ```
//!
//! Padding zero bytes align each entry to 8 bytes.

use crate::areas::filesystem::FileStat;
use crate::artifacts::core::hash_algorithm::HashAlgorithm;
use crate::artifacts::index::entry_mode::FileMode;
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{RepositoryError, Result};
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::cmp::min;
use std::io::{BufRead, Read, Write};

/// Largest path length representable in the flags field
const MAX_PATH_SIZE: usize = 0xFFF;

/// Block size for entry alignment (8 bytes)
pub const ENTRY_BLOCK: usize = 8;

/// Bytes before the digest: ten 32-bit stat words
const STAT_SIZE: usize = 40;

/// Fixed part of an entry: stat words, digest and flags
pub const fn entry_fixed_size(algorithm: HashAlgorithm) -> usize {
    STAT_SIZE + algorithm.digest_len() + 2
}

/// Zero bytes appended after the path terminator
pub const fn entry_padding(fixed_size: usize, path_len: usize) -> usize {
    (ENTRY_BLOCK - (fixed_size + path_len + 1) % ENTRY_BLOCK) % ENTRY_BLOCK
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// `/`-separated path relative to the repository root
    pub path: String,
    pub oid: ObjectId,
    pub metadata: EntryMetadata,
}

impl IndexEntry {
    pub fn mode(&self) -> FileMode {
        self.metadata.mode
    }

    /// Flags field: the path length, capped at 0xFFF
    pub fn flags(&self) -> u16 {
        min(self.path.len(), MAX_PATH_SIZE) as u16
    }

    /// Whether a fresh stat and hash describe the same staged content
    pub fn stat_match(&self, oid: &ObjectId, other: &EntryMetadata) -> bool {
        &self.oid == oid
            && self.metadata.mode == other.mode
            && self.metadata.size == other.size
            && self.metadata.mtime == other.mtime
    }
}

/// Stat snapshot stored in an index entry
///
/// Seconds are truncated from the filesystem's finer resolution and every
/// numeric field is wrapped to 32 bits, exactly as it is stored on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryMetadata {
    pub ctime: u32,
    pub mtime: u32,
    pub dev: u32,
    pub ino: u32,
    pub mode: FileMode,
    pub uid: u32,
    pub gid: u32,
    pub size: u32,
}

impl EntryMetadata {
    /// Metadata with every stat field zeroed, as recorded after a branch switch
    pub fn zeroed(mode: FileMode) -> Self {
        EntryMetadata {
            mode,
            ..Default::default()
        }
    }
}

impl From<FileStat> for EntryMetadata {
    fn from(stat: FileStat) -> Self {
        EntryMetadata {
            ctime: stat.ctime as u32,
            mtime: stat.mtime as u32,
            dev: stat.dev as u32,
            ino: stat.ino as u32,
            mode: FileMode::from(stat.mode),
            uid: stat.uid,
            gid: stat.gid,
            size: stat.size as u32,
        }
    }
}

impl Packable for IndexEntry {
    fn serialize(&self) -> Result<Bytes> {
        let mut entry_bytes = Vec::new();
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.ctime)?;
        entry_bytes.write_u32::<NetworkEndian>(0)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.mtime)?;
        entry_bytes.write_u32::<NetworkEndian>(0)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.dev)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.ino)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.mode.as_u32())?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.uid)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.gid)?;
        entry_bytes.write_u32::<NetworkEndian>(self.metadata.size)?;
        self.oid.write_raw_to(&mut entry_bytes)?;
        entry_bytes.write_u16::<NetworkEndian>(self.flags())?;
        entry_bytes.write_all(self.path.as_bytes())?;

        // There must be at least one null byte at the end
        entry_bytes.push(0);
        while entry_bytes.len() % ENTRY_BLOCK != 0 {
            entry_bytes.push(0);
        }

        Ok(Bytes::from(entry_bytes))
    }
}

impl Unpackable for IndexEntry {
    fn deserialize(mut reader: impl BufRead, algorithm: HashAlgorithm) -> Result<Self> {
        let truncated = |_| RepositoryError::CorruptObject("index entry is truncated".to_string());

        let ctime = reader.read_u32::<NetworkEndian>().map_err(truncated)?;
        let _ctime_nsec = reader.read_u32::<NetworkEndian>().map_err(truncated)?;
        let mtime = reader.read_u32::<NetworkEndian>().map_err(truncated)?;
        let _mtime_nsec = reader.read_u32::<NetworkEndian>().map_err(truncated)?;
        let dev = reader.read_u32::<NetworkEndian>().map_err(truncated)?;
        let ino = reader.read_u32::<NetworkEndian>().map_err(truncated)?;
        let mode = FileMode::from(reader.read_u32::<NetworkEndian>().map_err(truncated)?);
        let uid = reader.read_u32::<NetworkEndian>().map_err(truncated)?;
        let gid = reader.read_u32::<NetworkEndian>().map_err(truncated)?;
        let size = reader.read_u32::<NetworkEndian>().map_err(truncated)?;
        let oid = ObjectId::read_raw_from(&mut reader, algorithm)?;
        let _flags = reader.read_u16::<NetworkEndian>().map_err(truncated)?;

        // Extract the entry path, which is null-terminated
        let mut path = Vec::new();
        reader.read_until(0, &mut path)?;
        if path.pop() != Some(0) {
            return Err(RepositoryError::CorruptObject(
                "missing null terminator in index entry path".to_string(),
            ));
        }

        let mut padding = vec![0; entry_padding(entry_fixed_size(algorithm), path.len())];
        reader.read_exact(&mut padding).map_err(truncated)?;

        let path = String::from_utf8(path).map_err(|_| {
            RepositoryError::CorruptObject("index entry path is not UTF-8".to_string())
        })?;

        Ok(IndexEntry {
            path,
            oid,
            metadata: EntryMetadata {
                ctime,
                mtime,
                dev,
                ino,
                mode,
                uid,
                gid,
                size,
            },
        })
    }
}
