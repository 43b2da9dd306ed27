use crate::artifacts::core::hash_algorithm::HashAlgorithm;

pub const DEFAULT_SYSTEM_NAME: &str = "nbgit";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_AUTHOR_NAME: &str = "nbgit";
pub const DEFAULT_AUTHOR_EMAIL: &str = "nbgit@localhost";

/// Directory name always skipped by the working-tree walker, besides the metadata dir.
pub const FOREIGN_REPOSITORY_DIR: &str = ".git";

const AUTHOR_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Settings injected into a [`Repository`](crate::areas::repository::Repository) at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub system_name: String,
    pub repository_dir_name: String,
    pub hash_algorithm: HashAlgorithm,
    pub author_name: String,
    pub author_email: String,
    pub default_branch: String,
    /// Fixed commit timestamp; the wall clock is used when absent.
    pub author_date: Option<chrono::DateTime<chrono::FixedOffset>>,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        RepositoryConfig {
            system_name: DEFAULT_SYSTEM_NAME.to_string(),
            repository_dir_name: format!(".{DEFAULT_SYSTEM_NAME}"),
            hash_algorithm: HashAlgorithm::default(),
            author_name: DEFAULT_AUTHOR_NAME.to_string(),
            author_email: DEFAULT_AUTHOR_EMAIL.to_string(),
            default_branch: DEFAULT_BRANCH.to_string(),
            author_date: None,
        }
    }
}

impl RepositoryConfig {
    /// Build the configuration from `NBGIT_*` environment variables.
    ///
    /// Unset or empty variables keep their defaults; an unknown hash
    /// algorithm name falls back to SHA-1.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let system_name = var("NBGIT_SYSTEM_NAME").unwrap_or(defaults.system_name);
        let repository_dir_name =
            var("NBGIT_DIR").unwrap_or_else(|| format!(".{system_name}"));
        let hash_algorithm = var("NBGIT_HASH_ALGORITHM")
            .and_then(|name| HashAlgorithm::from_name(&name))
            .unwrap_or_default();
        let author_date = var("NBGIT_AUTHOR_DATE").and_then(|date| {
            chrono::DateTime::parse_from_str(&date, AUTHOR_DATE_FORMAT)
                .or_else(|_| chrono::DateTime::parse_from_rfc2822(&date))
                .ok()
        });

        RepositoryConfig {
            system_name,
            repository_dir_name,
            hash_algorithm,
            author_name: var("NBGIT_AUTHOR_NAME").unwrap_or(defaults.author_name),
            author_email: var("NBGIT_AUTHOR_EMAIL").unwrap_or(defaults.author_email),
            default_branch: var("NBGIT_DEFAULT_BRANCH").unwrap_or(defaults.default_branch),
            author_date,
        }
    }

    /// Capitalized system name, as used in the init banner.
    pub fn display_name(&self) -> String {
        let mut chars = self.system_name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Names skipped when walking the working tree.
    pub fn excluded_names(&self) -> Vec<String> {
        vec![
            FOREIGN_REPOSITORY_DIR.to_string(),
            self.repository_dir_name.clone(),
        ]
    }
}
