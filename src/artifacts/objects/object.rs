use crate::artifacts::core::hash_algorithm::HashAlgorithm;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::Result;
use bytes::Bytes;
use std::io::BufRead;

pub trait Packable {
    /// Encoded body, without any object header
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Decode a body whose embedded digests are `algorithm.digest_len()` bytes wide
    fn deserialize(reader: impl BufRead, algorithm: HashAlgorithm) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    /// Body prefixed with the `"{kind} {len}\0"` header
    fn framed(&self) -> Result<Bytes> {
        let body = self.serialize()?;
        let mut content = self.object_type().header(body.len()).into_bytes();
        content.extend_from_slice(&body);

        Ok(Bytes::from(content))
    }

    fn object_id(&self, algorithm: HashAlgorithm) -> Result<ObjectId> {
        Ok(ObjectId::from_raw(&algorithm.raw(&self.framed()?)))
    }
}
