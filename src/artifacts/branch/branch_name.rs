use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::{RepositoryError, Result};
use regex::Regex;
use std::sync::LazyLock;

static INVALID_BRANCH_NAME: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(INVALID_BRANCH_NAME_REGEX).ok());

/// Branch name that is safe to join onto `refs/heads`
///
/// Empty names, absolute paths and components that are `..` or start
/// with `.` are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: &str) -> Result<Self> {
        let invalid = name.is_empty()
            || INVALID_BRANCH_NAME
                .as_ref()
                .is_none_or(|regex| regex.is_match(name));

        if invalid {
            return Err(RepositoryError::InvalidBranchName(name.to_string()));
        }

        Ok(Self(name.to_string()))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("main")]
    #[case("feature/x")]
    #[case("release-1.2")]
    fn accepts_plain_and_nested_names(#[case] name: &str) {
        assert_eq!(BranchName::try_parse(name).unwrap().as_ref(), name);
    }

    #[rstest]
    #[case("")]
    #[case("..")]
    #[case("../../HEAD")]
    #[case("feature/../x")]
    #[case("/tmp/evil")]
    #[case(".hidden")]
    #[case("a/.b")]
    #[case("a/")]
    #[case("a//b")]
    #[case("x.lock")]
    #[case("with space")]
    #[case("a\\b")]
    fn rejects_names_that_escape_or_break_refs(#[case] name: &str) {
        assert!(matches!(
            BranchName::try_parse(name),
            Err(RepositoryError::InvalidBranchName(rejected)) if rejected == name
        ));
    }
}
