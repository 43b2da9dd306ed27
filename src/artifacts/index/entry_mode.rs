use crate::errors::RepositoryError;

/// Mask of the three execute permission bits
const EXECUTE_BITS: u32 = 0o111;

/// Normalized file mode recorded in trees and the index
///
/// Any execute bit maps to `100755`; everything else is `100644`.
#[derive(Debug, Clone, Copy, Eq, Ord, Default, PartialEq, PartialOrd, Hash)]
pub enum FileMode {
    #[default]
    Regular,
    Executable,
}

impl FileMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileMode::Regular => "100644",
            FileMode::Executable => "100755",
        }
    }

    pub fn as_u32(&self) -> u32 {
        match self {
            FileMode::Regular => 0o100644,
            FileMode::Executable => 0o100755,
        }
    }

    pub fn is_executable(&self) -> bool {
        matches!(self, FileMode::Executable)
    }
}

impl From<u32> for FileMode {
    fn from(mode: u32) -> Self {
        if mode & EXECUTE_BITS == 0 {
            FileMode::Regular
        } else {
            FileMode::Executable
        }
    }
}

impl TryFrom<&str> for FileMode {
    type Error = RepositoryError;

    /// Parse an octal mode string such as `100644`, normalizing it
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        u32::from_str_radix(value, 8)
            .map(FileMode::from)
            .map_err(|_| RepositoryError::CorruptObject(format!("invalid file mode '{value}'")))
    }
}

impl std::fmt::Display for FileMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
