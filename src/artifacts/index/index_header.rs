use crate::artifacts::core::hash_algorithm::HashAlgorithm;
use crate::artifacts::index::{HEADER_SIZE, SIGNATURE, VERSION};
use crate::artifacts::objects::object::{Packable, Unpackable};
use crate::errors::{RepositoryError, Result};
use byteorder::{NetworkEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Read, Write};

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexHeader {
    pub(crate) marker: [u8; 4],
    pub(crate) version: u32,
    pub(crate) entries_count: u32,
}

impl IndexHeader {
    pub(crate) fn for_entries(entries_count: u32) -> Self {
        IndexHeader {
            marker: *SIGNATURE,
            version: VERSION,
            entries_count,
        }
    }

    pub(crate) fn has_signature(&self) -> bool {
        &self.marker == SIGNATURE
    }
}

impl Packable for IndexHeader {
    fn serialize(&self) -> Result<Bytes> {
        let mut bytes = Vec::with_capacity(HEADER_SIZE);
        bytes.write_all(&self.marker)?;
        bytes.write_u32::<NetworkEndian>(self.version)?;
        bytes.write_u32::<NetworkEndian>(self.entries_count)?;

        Ok(Bytes::from(bytes))
    }
}

impl Unpackable for IndexHeader {
    fn deserialize(mut reader: impl BufRead, _algorithm: HashAlgorithm) -> Result<Self> {
        let truncated = |_| RepositoryError::CorruptObject("index header is truncated".to_string());

        let mut marker = [0; 4];
        reader.read_exact(&mut marker).map_err(truncated)?;
        let version = reader.read_u32::<NetworkEndian>().map_err(truncated)?;
        let entries_count = reader.read_u32::<NetworkEndian>().map_err(truncated)?;

        Ok(IndexHeader {
            marker,
            version,
            entries_count,
        })
    }
}
