//! Rename detection
//!
//! Pairs deleted files with created files in two greedy passes:
//!
//! 1. Exact: the first unclaimed created file with the same hash and mode.
//! 2. Best match: the highest-scoring created file with the same mode, kept
//!    only if its similarity reaches the threshold. The first candidate wins
//!    ties.
//!
//! Deleted files are visited in order, so earlier deletions claim first.

use crate::artifacts::diff::line_diff::similarity;
use crate::artifacts::index::entry_mode::FileMode;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// Default minimum similarity for a best-match rename
pub const RENAME_THRESHOLD: u8 = 90;

/// A file on one side of a change, with its stored text
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct FileSnapshot {
    pub path: String,
    pub oid: ObjectId,
    pub mode: FileMode,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Rename {
    pub old_path: String,
    pub new_path: String,
    pub similarity: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameDetection {
    pub renamed: Vec<Rename>,
    /// Deleted files left unpaired, in input order
    pub deleted: Vec<FileSnapshot>,
    /// Created files left unpaired, in input order
    pub created: Vec<FileSnapshot>,
}

pub fn detect_renames(
    deleted: Vec<FileSnapshot>,
    created: Vec<FileSnapshot>,
    threshold: u8,
) -> RenameDetection {
    let mut deleted_claimed = vec![false; deleted.len()];
    let mut created_claimed = vec![false; created.len()];
    let mut renamed = Vec::new();

    for (i, old) in deleted.iter().enumerate() {
        let exact = created
            .iter()
            .enumerate()
            .find(|(j, new)| !created_claimed[*j] && new.oid == old.oid && new.mode == old.mode);

        if let Some((j, new)) = exact {
            renamed.push(Rename::new(old.path.clone(), new.path.clone(), 100));
            deleted_claimed[i] = true;
            created_claimed[j] = true;
        }
    }

    for (i, old) in deleted.iter().enumerate() {
        if deleted_claimed[i] {
            continue;
        }

        let mut best: Option<(usize, u8)> = None;
        for (j, new) in created.iter().enumerate() {
            if created_claimed[j] || new.mode != old.mode {
                continue;
            }

            let score = similarity(&old.text, &new.text);
            if score > best.map_or(0, |(_, best_score)| best_score) {
                best = Some((j, score));
            }
        }

        if let Some((j, score)) = best
            && score >= threshold
        {
            renamed.push(Rename::new(old.path.clone(), created[j].path.clone(), score));
            deleted_claimed[i] = true;
            created_claimed[j] = true;
        }
    }

    RenameDetection {
        renamed,
        deleted: unclaimed(deleted, &deleted_claimed),
        created: unclaimed(created, &created_claimed),
    }
}

fn unclaimed(files: Vec<FileSnapshot>, claimed: &[bool]) -> Vec<FileSnapshot> {
    files
        .into_iter()
        .zip(claimed)
        .filter(|(_, claimed)| !**claimed)
        .map(|(file, _)| file)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::core::hash_algorithm::HashAlgorithm;
    use pretty_assertions::assert_eq;

    fn file(path: &str, text: &str, mode: FileMode) -> FileSnapshot {
        let oid = ObjectId::from_raw(&HashAlgorithm::Sha1.raw(text.as_bytes()));
        FileSnapshot::new(path.to_string(), oid, mode, text.to_string())
    }

    fn paths(files: &[FileSnapshot]) -> Vec<&str> {
        files.iter().map(|file| file.path.as_str()).collect()
    }

    #[test]
    fn identical_content_and_mode_is_an_exact_rename() {
        let detection = detect_renames(
            vec![file("a.txt", "same\n", FileMode::Regular)],
            vec![file("b.txt", "same\n", FileMode::Regular)],
            RENAME_THRESHOLD,
        );

        assert_eq!(
            detection.renamed,
            vec![Rename::new("a.txt".into(), "b.txt".into(), 100)]
        );
        assert!(detection.deleted.is_empty());
        assert!(detection.created.is_empty());
    }

    #[test]
    fn mode_mismatch_prevents_pairing() {
        let detection = detect_renames(
            vec![file("a.sh", "echo\n", FileMode::Regular)],
            vec![file("b.sh", "echo\n", FileMode::Executable)],
            RENAME_THRESHOLD,
        );

        assert!(detection.renamed.is_empty());
        assert_eq!(paths(&detection.deleted), vec!["a.sh"]);
        assert_eq!(paths(&detection.created), vec!["b.sh"]);
    }

    #[test]
    fn similar_content_above_threshold_is_renamed_at_its_score() {
        let old = "line\n".repeat(30) + "old\n";
        let new = "line\n".repeat(30) + "new\n";
        let score = similarity(&old, &new);
        assert!(score >= RENAME_THRESHOLD);

        let detection = detect_renames(
            vec![file("old.txt", &old, FileMode::Regular)],
            vec![file("new.txt", &new, FileMode::Regular)],
            RENAME_THRESHOLD,
        );

        assert_eq!(
            detection.renamed,
            vec![Rename::new("old.txt".into(), "new.txt".into(), score)]
        );
    }

    #[test]
    fn dissimilar_content_stays_delete_and_create() {
        let detection = detect_renames(
            vec![file("a.txt", "alpha\n", FileMode::Regular)],
            vec![file("b.txt", "omega\n", FileMode::Regular)],
            RENAME_THRESHOLD,
        );

        assert!(detection.renamed.is_empty());
        assert_eq!(paths(&detection.deleted), vec!["a.txt"]);
        assert_eq!(paths(&detection.created), vec!["b.txt"]);
    }

    #[test]
    fn earlier_deletion_claims_the_shared_match() {
        let detection = detect_renames(
            vec![
                file("first.txt", "shared\n", FileMode::Regular),
                file("second.txt", "shared\n", FileMode::Regular),
            ],
            vec![file("copy.txt", "shared\n", FileMode::Regular)],
            RENAME_THRESHOLD,
        );

        assert_eq!(
            detection.renamed,
            vec![Rename::new("first.txt".into(), "copy.txt".into(), 100)]
        );
        assert_eq!(paths(&detection.deleted), vec!["second.txt"]);
    }

    #[test]
    fn exact_pass_runs_before_best_match() {
        let text = "line\n".repeat(30);
        let near = text.clone() + "extra\n";
        let detection = detect_renames(
            vec![
                file("near.txt", &near, FileMode::Regular),
                file("exact.txt", &text, FileMode::Regular),
            ],
            vec![file("moved.txt", &text, FileMode::Regular)],
            RENAME_THRESHOLD,
        );

        assert_eq!(
            detection.renamed,
            vec![Rename::new("exact.txt".into(), "moved.txt".into(), 100)]
        );
        assert_eq!(paths(&detection.deleted), vec!["near.txt"]);
    }
}
