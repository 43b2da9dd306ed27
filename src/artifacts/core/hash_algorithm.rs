use sha1::Digest;

/// Digest length of the `custom` algorithm, kept equal to SHA-1's.
const CUSTOM_DIGEST_LEN: usize = 20;

/// Content hash algorithms understood by the object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-1, 20 bytes. Matches the reference tool's default object format.
    #[default]
    Sha1,
    /// SHA-256, 32 bytes.
    Sha256,
    /// SHA-256 truncated to 20 bytes.
    Custom,
}

impl HashAlgorithm {
    pub const fn digest_len(&self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Custom => CUSTOM_DIGEST_LEN,
        }
    }

    pub const fn hex_len(&self) -> usize {
        self.digest_len() * 2
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Custom => "custom",
        }
    }

    /// Look up an algorithm by its configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Some(Self::Sha1),
            "sha256" | "sha-256" => Some(Self::Sha256),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Raw digest of `data`, always exactly `digest_len()` bytes.
    pub fn raw(&self, data: &[u8]) -> Vec<u8> {
        let mut hasher = Hasher::new(*self);
        hasher.update(data);
        hasher.finalize()
    }

    /// Lowercase hex digest of `data`, always exactly `hex_len()` characters.
    pub fn hex(&self, data: &[u8]) -> String {
        to_hex(&self.raw(data))
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

enum HasherInner {
    Sha1(sha1::Sha1),
    Sha256(sha2::Sha256),
}

/// Streaming digest over one of the supported algorithms.
pub struct Hasher {
    algorithm: HashAlgorithm,
    inner: HasherInner,
}

impl Hasher {
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let inner = match algorithm {
            HashAlgorithm::Sha1 => HasherInner::Sha1(sha1::Sha1::new()),
            HashAlgorithm::Sha256 | HashAlgorithm::Custom => {
                HasherInner::Sha256(sha2::Sha256::new())
            }
        };

        Hasher { algorithm, inner }
    }

    pub fn update(&mut self, data: &[u8]) {
        match &mut self.inner {
            HasherInner::Sha1(h) => h.update(data),
            HasherInner::Sha256(h) => h.update(data),
        }
    }

    pub fn finalize(self) -> Vec<u8> {
        let mut digest = match self.inner {
            HasherInner::Sha1(h) => h.finalize().to_vec(),
            HasherInner::Sha256(h) => h.finalize().to_vec(),
        };
        digest.truncate(self.algorithm.digest_len());

        digest
    }
}

pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(HashAlgorithm::Sha1, "a9993e364706816aba3e25717850c26c9cd0d89d")]
    #[case(
        HashAlgorithm::Sha256,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    )]
    #[case(HashAlgorithm::Custom, "ba7816bf8f01cfea414140de5dae2223b00361a3")]
    fn hashes_known_vectors(#[case] algorithm: HashAlgorithm, #[case] expected: &str) {
        assert_eq!(algorithm.hex(b"abc"), expected);
    }

    #[rstest]
    #[case(HashAlgorithm::Sha1, 20)]
    #[case(HashAlgorithm::Sha256, 32)]
    #[case(HashAlgorithm::Custom, 20)]
    fn digests_have_fixed_length(#[case] algorithm: HashAlgorithm, #[case] len: usize) {
        assert_eq!(algorithm.raw(b"").len(), len);
        assert_eq!(algorithm.hex(b"some bytes").len(), len * 2);
        assert_eq!(algorithm.hex_len(), len * 2);
    }

    #[test]
    fn streaming_matches_one_shot() {
        let mut hasher = Hasher::new(HashAlgorithm::Sha256);
        hasher.update(b"ab");
        hasher.update(b"c");

        assert_eq!(hasher.finalize(), HashAlgorithm::Sha256.raw(b"abc"));
    }

    #[test]
    fn names_round_trip() {
        for algorithm in [
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Custom,
        ] {
            assert_eq!(HashAlgorithm::from_name(algorithm.name()), Some(algorithm));
        }
        assert_eq!(HashAlgorithm::from_name("md5"), None);
    }
}
