//! Commit object
//!
//! A commit points at a tree, at most one parent commit, and records who
//! made it and why.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-hash>
//! parent <parent-hash>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::core::hash_algorithm::HashAlgorithm;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{RepositoryError, Result};
use bytes::Bytes;
use regex::Regex;
use std::io::{BufRead, Read};
use std::sync::LazyLock;

/// `name <email> timestamp ±HHMM`
static AUTHOR_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(.*) <(.*)> (\d+) ([+-]\d{4})$").ok());

/// Date layout used by `log`, e.g. `Wed Oct 15 09:03:12 2025 +0900`
const LOG_DATE_FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Author or committer identity with the moment and offset it was recorded at
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    /// Author stamped with the current wall-clock time and local UTC offset
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.timestamp
    }

    /// `Name <email>`
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// `Name <email> timestamp ±HHMM`, as stored in the commit body
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Timestamp rendered in the offset it was recorded with
    pub fn readable_timestamp(&self) -> String {
        self.timestamp.format(LOG_DATE_FORMAT).to_string()
    }

    /// Parse `name <email> timestamp ±HHMM`; anything else yields `None`
    pub fn parse(value: &str) -> Option<Self> {
        let captures = AUTHOR_REGEX.as_ref()?.captures(value)?;

        let seconds = captures[3].parse::<i64>().ok()?;
        let offset = parse_offset(&captures[4])?;
        let timestamp = chrono::DateTime::from_timestamp(seconds, 0)?.with_timezone(&offset);

        Some(Author {
            name: captures[1].to_string(),
            email: captures[2].to_string(),
            timestamp,
        })
    }
}

fn parse_offset(value: &str) -> Option<chrono::FixedOffset> {
    let sign = if value.starts_with('-') { -1 } else { 1 };
    let hours = value.get(1..3)?.parse::<i32>().ok()?;
    let minutes = value.get(3..5)?.parse::<i32>().ok()?;

    chrono::FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    tree_oid: ObjectId,
    /// Absent for root commits
    parent: Option<ObjectId>,
    /// `None` when the stored author line is missing or malformed
    author: Option<Author>,
    committer: Option<Author>,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            tree_oid,
            parent,
            author: Some(author.clone()),
            committer: Some(author),
            message,
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        let mut lines = vec![format!("tree {}", self.tree_oid)];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {parent}"));
        }
        if let Some(author) = &self.author {
            lines.push(format!("author {}", author.display()));
        }
        if let Some(committer) = &self.committer {
            lines.push(format!("committer {}", committer.display()));
        }

        let content = format!("{}\n\n{}\n", lines.join("\n"), self.message);

        Ok(Bytes::from(content))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead, algorithm: HashAlgorithm) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content).map_err(|_| {
            RepositoryError::CorruptObject("commit body is not UTF-8".to_string())
        })?;

        let (headers, message) = content.split_once("\n\n").unwrap_or((&content, ""));
        let message = message.strip_suffix('\n').unwrap_or(message).to_string();

        let mut tree_oid = None;
        let mut parent = None;
        let mut author = None;
        let mut committer = None;

        for line in headers.lines() {
            match line.split_once(' ') {
                Some(("tree", oid)) => tree_oid = Some(ObjectId::try_parse(oid, algorithm)?),
                Some(("parent", oid)) => parent = Some(ObjectId::try_parse(oid, algorithm)?),
                Some(("author", value)) => author = Author::parse(value),
                Some(("committer", value)) => committer = Author::parse(value),
                _ => {}
            }
        }

        let tree_oid = tree_oid.ok_or_else(|| {
            RepositoryError::CorruptObject("commit is missing its tree line".to_string())
        })?;

        Ok(Commit {
            tree_oid,
            parent,
            author,
            committer,
            message,
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::io::Cursor;

    #[fixture]
    fn author() -> Author {
        let timestamp = chrono::DateTime::parse_from_str(
            "2023-01-01 12:00:00 +0900",
            "%Y-%m-%d %H:%M:%S %z",
        )
        .unwrap();
        Author::new_with_timestamp("Ada".to_string(), "ada@example.com".to_string(), timestamp)
    }

    fn oid(seed: &str) -> ObjectId {
        ObjectId::from_raw(&HashAlgorithm::Sha1.raw(seed.as_bytes()))
    }

    #[rstest]
    fn renders_body_layout(author: Author) {
        let commit = Commit::new(Some(oid("p")), oid("t"), author, "first".to_string());

        let body = String::from_utf8(commit.serialize().unwrap().to_vec()).unwrap();

        assert_eq!(
            body,
            format!(
                "tree {}\nparent {}\nauthor Ada <ada@example.com> 1672542000 +0900\ncommitter Ada <ada@example.com> 1672542000 +0900\n\nfirst\n",
                oid("t"),
                oid("p")
            )
        );
    }

    #[rstest]
    #[case(None, "single line")]
    #[case(Some("parent"), "subject\n\nbody with\n\nblank lines")]
    fn round_trips_fields(
        author: Author,
        #[case] parent_seed: Option<&str>,
        #[case] message: &str,
    ) {
        let commit = Commit::new(parent_seed.map(oid), oid("tree"), author, message.to_string());

        let body = commit.serialize().unwrap();
        let parsed = Commit::deserialize(Cursor::new(body.to_vec()), HashAlgorithm::Sha1).unwrap();

        assert_eq!(parsed, commit);
        assert_eq!(parsed.message(), message);
    }

    #[test]
    fn malformed_author_yields_empty_author() {
        let body = format!("tree {}\nauthor nobody\n\nmsg\n", oid("t"));

        let parsed = Commit::deserialize(Cursor::new(body.into_bytes()), HashAlgorithm::Sha1)
            .unwrap();

        assert_eq!(parsed.author(), None);
        assert_eq!(parsed.message(), "msg");
    }

    #[rstest]
    fn log_date_keeps_recorded_offset(author: Author) {
        assert_eq!(author.readable_timestamp(), "Sun Jan 01 12:00:00 2023 +0900");
    }

    #[test]
    fn parses_negative_offsets() {
        let author = Author::parse("Bob <bob@example.com> 0 -0130").unwrap();

        assert_eq!(author.timestamp().offset().local_minus_utc(), -5400);
        assert_eq!(author.display(), "Bob <bob@example.com> 0 -0130");
    }
}
