//! Object database
//!
//! Content-addressed storage for blobs, trees and commits. Each object is
//! stored zlib-compressed at `objects/<xx>/<rest-of-hash>` and is never
//! rewritten once present.

use crate::areas::filesystem::FileSystem;
use crate::artifacts::core::hash_algorithm::HashAlgorithm;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{RepositoryError, Result};
use bytes::Bytes;
use fake::rand;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Database {
    /// Path to the objects directory
    path: Box<Path>,
    fs: Arc<dyn FileSystem>,
    algorithm: HashAlgorithm,
}

impl Database {
    pub fn new(path: Box<Path>, fs: Arc<dyn FileSystem>, algorithm: HashAlgorithm) -> Self {
        Database {
            path,
            fs,
            algorithm,
        }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn contains(&self, object_id: &ObjectId) -> bool {
        self.fs.exists(&self.object_path(object_id))
    }

    /// Persist `body` as an object of the given kind and return its id
    ///
    /// Nothing is written when an object with the same id is already stored.
    pub fn write(&self, kind: ObjectType, body: &[u8]) -> Result<ObjectId> {
        let mut content = kind.header(body.len()).into_bytes();
        content.extend_from_slice(body);

        let object_id = ObjectId::from_raw(&self.algorithm.raw(&content));
        let object_path = self.object_path(&object_id);

        if self.fs.exists(&object_path) {
            tracing::debug!(oid = %object_id, %kind, "object already stored");
            return Ok(object_id);
        }

        self.write_object(&object_path, &content)?;
        tracing::debug!(oid = %object_id, %kind, size = body.len(), "object written");

        Ok(object_id)
    }

    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        self.write(object.object_type(), &object.serialize()?)
    }

    /// Decompressed object content, header included
    pub fn read(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.object_path(object_id);
        if !self.fs.exists(&object_path) {
            return Err(RepositoryError::ObjectNotFound(object_id.to_string()));
        }

        Self::decompress(&self.fs.read(&object_path)?)
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> Result<Blob> {
        let reader = self.parse_object_as_bytes(object_id, ObjectType::Blob)?;
        Blob::deserialize(reader, self.algorithm)
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> Result<Tree> {
        let reader = self.parse_object_as_bytes(object_id, ObjectType::Tree)?;
        Tree::deserialize(reader, self.algorithm)
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Commit> {
        let reader = self.parse_object_as_bytes(object_id, ObjectType::Commit)?;
        Commit::deserialize(reader, self.algorithm)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
        expected: ObjectType,
    ) -> Result<Cursor<Bytes>> {
        let mut reader = Cursor::new(self.read(object_id)?);

        let object_type = ObjectType::parse_object_type(&mut reader)?;
        if object_type != expected {
            return Err(RepositoryError::CorruptObject(format!(
                "expected {expected} {object_id}, found {object_type}"
            )));
        }

        Ok(reader)
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    fn write_object(&self, object_path: &Path, content: &[u8]) -> Result<()> {
        let object_dir = object_path.parent().ok_or_else(|| {
            RepositoryError::CorruptObject(format!("invalid object path {}", object_path.display()))
        })?;
        self.fs.create_dir_all(object_dir)?;

        let temp_object_path = object_dir.join(Self::generate_temp_name());
        self.fs.write(&temp_object_path, &Self::compress(content)?)?;
        // rename the temp file into place to make the write atomic
        self.fs.rename(&temp_object_path, object_path)?;

        Ok(())
    }

    fn compress(data: &[u8]) -> Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data)?;

        Ok(encoder.finish()?.into())
    }

    fn decompress(data: &[u8]) -> Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .map_err(|err| RepositoryError::CorruptObject(format!("zlib stream: {err}")))?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}
