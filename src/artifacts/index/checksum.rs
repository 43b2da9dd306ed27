use crate::artifacts::core::hash_algorithm::{HashAlgorithm, Hasher};
use bytes::Bytes;

/// Buffer that digests everything written to it
///
/// The digest is appended as a trailer when the buffer is finished.
pub struct Checksum {
    buffer: Vec<u8>,
    digest: Hasher,
}

impl Checksum {
    pub(crate) fn new(algorithm: HashAlgorithm) -> Self {
        Checksum {
            buffer: Vec::new(),
            digest: Hasher::new(algorithm),
        }
    }

    pub(crate) fn write(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
        self.digest.update(data);
    }

    pub(crate) fn write_checksum(mut self) -> Bytes {
        let checksum = self.digest.finalize();
        self.buffer.extend_from_slice(&checksum);

        Bytes::from(self.buffer)
    }
}
