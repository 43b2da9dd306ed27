use crate::artifacts::diff::line_diff::{LineDiffCounts, line_count, line_diff_counts};
use crate::artifacts::diff::rename::{FileSnapshot, RENAME_THRESHOLD, Rename, detect_renames};
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashMap, HashSet};

/// What a commit changed relative to its parent snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    /// Distinct paths touched
    pub files_changed: usize,
    pub counts: LineDiffCounts,
    pub renamed: Vec<Rename>,
    pub created: Vec<FileSnapshot>,
    pub deleted: Vec<FileSnapshot>,
}

impl ChangeSummary {
    /// Summary of a root commit: every staged file is created
    pub fn root(staged: Vec<FileSnapshot>) -> Self {
        let insertions = staged.iter().map(|file| line_count(&file.text)).sum();
        let files_changed = staged
            .iter()
            .map(|file| file.path.as_str())
            .collect::<HashSet<_>>()
            .len();

        ChangeSummary {
            files_changed,
            counts: LineDiffCounts {
                insertions,
                deletions: 0,
            },
            created: staged,
            ..Default::default()
        }
    }

    /// Summary of a commit whose parent held `parent`
    ///
    /// Paths only in the parent are deletions and paths only in the staged
    /// snapshot are creations, until rename detection pairs them. Paths in
    /// both with a different hash or mode contribute their line diff.
    pub fn between(parent: Vec<FileSnapshot>, staged: Vec<FileSnapshot>) -> Self {
        let parent_by_path = parent
            .iter()
            .map(|file| (file.path.as_str(), file))
            .collect::<HashMap<_, _>>();
        let staged_paths = staged
            .iter()
            .map(|file| file.path.as_str())
            .collect::<HashSet<_>>();

        let deleted = parent
            .iter()
            .filter(|file| !staged_paths.contains(file.path.as_str()))
            .cloned()
            .collect();
        let created = staged
            .iter()
            .filter(|file| !parent_by_path.contains_key(file.path.as_str()))
            .cloned()
            .collect();

        let detection = detect_renames(deleted, created, RENAME_THRESHOLD);

        let mut counts = LineDiffCounts::default();
        let mut changed = HashSet::new();

        for rename in &detection.renamed {
            changed.insert(rename.new_path.clone());
        }
        for file in &detection.deleted {
            counts.deletions += line_count(&file.text);
            changed.insert(file.path.clone());
        }
        for file in &detection.created {
            counts.insertions += line_count(&file.text);
            changed.insert(file.path.clone());
        }

        for file in &staged {
            let Some(previous) = parent_by_path.get(file.path.as_str()) else {
                continue;
            };
            if previous.oid == file.oid && previous.mode == file.mode {
                continue;
            }

            counts += line_diff_counts(&previous.text, &file.text);
            changed.insert(file.path.clone());
        }

        ChangeSummary {
            files_changed: changed.len(),
            counts,
            renamed: detection.renamed,
            created: detection.created,
            deleted: detection.deleted,
        }
    }

    /// Report printed after a successful commit, one line per row
    pub fn render(&self, branch: &str, is_root: bool, oid: &ObjectId, message: &str) -> String {
        let root_marker = if is_root { " (root-commit)" } else { "" };
        let mut out = format!("[{branch}{root_marker} {}] {message}\n", oid.to_short_oid());

        let plural = if self.files_changed > 1 { "s" } else { "" };
        let mut changes = format!(" {} file{plural} changed", self.files_changed);

        let LineDiffCounts {
            insertions,
            deletions,
        } = self.counts;
        if is_root && insertions == 0 && deletions == 0 {
            changes.push_str(", 0 insertions(+), 0 deletions(-)");
        } else {
            if insertions > 0 {
                let plural = if insertions == 1 { "" } else { "s" };
                changes.push_str(&format!(", {insertions} insertion{plural}(+)"));
            }
            if deletions > 0 {
                let plural = if deletions == 1 { "" } else { "s" };
                changes.push_str(&format!(", {deletions} deletion{plural}(-)"));
            }
        }
        out.push_str(&changes);
        out.push('\n');

        for rename in &self.renamed {
            out.push_str(&format!(
                " rename {} => {} ({}%)\n",
                rename.old_path, rename.new_path, rename.similarity
            ));
        }
        for file in &self.created {
            out.push_str(&format!(" create mode {} {}\n", file.mode, file.path));
        }
        for file in &self.deleted {
            out.push_str(&format!(" delete mode {} {}\n", file.mode, file.path));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::core::hash_algorithm::HashAlgorithm;
    use crate::artifacts::index::entry_mode::FileMode;
    use pretty_assertions::assert_eq;

    fn file(path: &str, text: &str) -> FileSnapshot {
        let oid = ObjectId::from_raw(&HashAlgorithm::Sha1.raw(text.as_bytes()));
        FileSnapshot::new(path.to_string(), oid, FileMode::Regular, text.to_string())
    }

    fn commit_oid() -> ObjectId {
        ObjectId::try_parse("1234567890abcdef1234567890abcdef12345678", HashAlgorithm::Sha1)
            .unwrap()
    }

    #[test]
    fn root_commit_counts_every_line_as_inserted() {
        let summary = ChangeSummary::root(vec![file("a.txt", "x")]);

        assert_eq!(
            summary.render("main", true, &commit_oid(), "c1"),
            "[main (root-commit) 1234567] c1\n 1 file changed, 1 insertion(+)\n create mode 100644 a.txt\n"
        );
    }

    #[test]
    fn empty_root_commit_shows_zero_counts() {
        let summary = ChangeSummary::root(vec![file("empty", "")]);

        assert_eq!(
            summary.render("main", true, &commit_oid(), "c1"),
            "[main (root-commit) 1234567] c1\n 1 file changed, 0 insertions(+), 0 deletions(-)\n create mode 100644 empty\n"
        );
    }

    #[test]
    fn modified_file_contributes_its_line_diff() {
        let summary = ChangeSummary::between(
            vec![file("a.txt", "one\ntwo\n")],
            vec![file("a.txt", "one\nthree\nfour\n")],
        );

        assert_eq!(summary.files_changed, 1);
        assert_eq!(
            summary.counts,
            LineDiffCounts {
                insertions: 2,
                deletions: 1
            }
        );
        assert_eq!(
            summary.render("dev", false, &commit_oid(), "edit"),
            "[dev 1234567] edit\n 1 file changed, 2 insertions(+), 1 deletion(-)\n"
        );
    }

    #[test]
    fn moved_file_is_reported_as_rename_without_line_counts() {
        let summary = ChangeSummary::between(
            vec![file("old.txt", "same\n"), file("keep.txt", "k")],
            vec![file("keep.txt", "k"), file("new.txt", "same\n")],
        );

        assert_eq!(
            summary.render("main", false, &commit_oid(), "move"),
            "[main 1234567] move\n 1 file changed\n rename old.txt => new.txt (100%)\n"
        );
    }

    #[test]
    fn unpaired_files_are_created_and_deleted() {
        let summary = ChangeSummary::between(
            vec![file("gone.txt", "a\nb")],
            vec![file("fresh.txt", "c")],
        );

        assert_eq!(
            summary.render("main", false, &commit_oid(), "swap"),
            "[main 1234567] swap\n 2 files changed, 1 insertion(+), 2 deletions(-)\n create mode 100644 fresh.txt\n delete mode 100644 gone.txt\n"
        );
    }
}
