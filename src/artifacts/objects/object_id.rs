//! Object identifier
//!
//! Object IDs are lowercase hex digests whose length depends on the
//! configured [`HashAlgorithm`]: 40 characters for SHA-1 and the custom
//! algorithm, 64 for SHA-256.
//!
//! ## Storage
//!
//! Objects are stored in `<metadata>/objects/<first-2-chars>/<remaining-chars>`

use crate::artifacts::core::hash_algorithm::{HashAlgorithm, to_hex};
use crate::errors::{RepositoryError, Result};
use std::io;
use std::path::PathBuf;

/// Length of the abbreviated form shown to users
const SHORT_OID_LENGTH: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a hex object ID for the given algorithm
    ///
    /// # Returns
    ///
    /// Validated ObjectId, or `CorruptObject` on a wrong length or a non-hex character
    pub fn try_parse(id: impl Into<String>, algorithm: HashAlgorithm) -> Result<Self> {
        let id = id.into();

        if !Self::is_valid(&id, algorithm) {
            return Err(RepositoryError::CorruptObject(format!(
                "invalid {algorithm} object id '{id}'"
            )));
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Check whether `id` is a well-formed hex digest for `algorithm`
    pub fn is_valid(id: &str, algorithm: HashAlgorithm) -> bool {
        id.len() == algorithm.hex_len() && id.chars().all(|c| c.is_ascii_hexdigit())
    }

    pub fn from_raw(bytes: &[u8]) -> Self {
        Self(to_hex(bytes))
    }

    /// Raw digest bytes (half the hex length)
    pub fn to_raw(&self) -> Result<Vec<u8>> {
        (0..self.0.len())
            .step_by(2)
            .map(|i| {
                u8::from_str_radix(&self.0[i..i + 2], 16).map_err(|_| {
                    RepositoryError::CorruptObject(format!("invalid hex digit in '{}'", self.0))
                })
            })
            .collect()
    }

    /// Write the object ID in binary form
    ///
    /// Used by the tree and index codecs, which store digests raw.
    pub fn write_raw_to<W: io::Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_raw()?)?;

        Ok(())
    }

    /// Read `algorithm.digest_len()` raw bytes and convert them to hex
    pub fn read_raw_from<R: io::Read + ?Sized>(
        reader: &mut R,
        algorithm: HashAlgorithm,
    ) -> Result<Self> {
        let mut raw = vec![0; algorithm.digest_len()];
        reader.read_exact(&mut raw)?;

        Ok(Self::from_raw(&raw))
    }

    /// Relative storage path, split as `XX/YYYY...`
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2.min(self.0.len()));
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0.chars().take(SHORT_OID_LENGTH).collect()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const EMPTY_BLOB: &str = "e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";

    #[test]
    fn splits_into_fanout_path() {
        let oid = ObjectId::try_parse(EMPTY_BLOB, HashAlgorithm::Sha1).unwrap();

        assert_eq!(
            oid.to_path(),
            PathBuf::from("e6").join("9de29bb2d1d6434b8b29ae775ad8c2e48c5391")
        );
        assert_eq!(oid.to_short_oid(), "e69de29");
    }

    #[rstest]
    #[case(EMPTY_BLOB, HashAlgorithm::Sha256)]
    #[case("e69de29", HashAlgorithm::Sha1)]
    #[case("zz9de29bb2d1d6434b8b29ae775ad8c2e48c5391", HashAlgorithm::Sha1)]
    fn rejects_malformed_ids(#[case] id: &str, #[case] algorithm: HashAlgorithm) {
        assert!(ObjectId::try_parse(id, algorithm).is_err());
    }

    #[test]
    fn converts_between_raw_and_hex() {
        let oid = ObjectId::try_parse(EMPTY_BLOB, HashAlgorithm::Sha1).unwrap();
        let mut raw = Vec::new();
        oid.write_raw_to(&mut raw).unwrap();

        assert_eq!(raw.len(), 20);
        let parsed =
            ObjectId::read_raw_from(&mut std::io::Cursor::new(raw), HashAlgorithm::Sha1).unwrap();
        assert_eq!(parsed, oid);
    }
}
