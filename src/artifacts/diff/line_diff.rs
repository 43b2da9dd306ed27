//! Line-level text comparison
//!
//! Counting and scoring both run a line diff over the two texts and walk
//! its change runs.

use similar::{ChangeTag, TextDiff};
use std::ops::AddAssign;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineDiffCounts {
    pub insertions: usize,
    pub deletions: usize,
}

impl AddAssign for LineDiffCounts {
    fn add_assign(&mut self, other: Self) {
        self.insertions += other.insertions;
        self.deletions += other.deletions;
    }
}

/// Number of lines added and removed going from `old` to `new`
pub fn line_diff_counts(old: &str, new: &str) -> LineDiffCounts {
    TextDiff::from_lines(old, new)
        .iter_all_changes()
        .fold(LineDiffCounts::default(), |mut counts, change| {
            match change.tag() {
                ChangeTag::Insert => counts.insertions += 1,
                ChangeTag::Delete => counts.deletions += 1,
                ChangeTag::Equal => {}
            }
            counts
        })
}

/// Share of unchanged bytes across the whole diff, as a rounded percentage
///
/// Two empty texts are identical (100); an empty text is nothing like a
/// non-empty one (0).
pub fn similarity(old: &str, new: &str) -> u8 {
    match (old.is_empty(), new.is_empty()) {
        (true, true) => return 100,
        (true, false) | (false, true) => return 0,
        (false, false) => {}
    }

    let (same, total) = TextDiff::from_lines(old, new).iter_all_changes().fold(
        (0usize, 0usize),
        |(same, total), change| {
            let len = change.value().len();
            match change.tag() {
                ChangeTag::Equal => (same + len, total + len),
                ChangeTag::Insert | ChangeTag::Delete => (same, total + len),
            }
        },
    );

    if total == 0 {
        return 100;
    }

    (same as f64 / total as f64 * 100.0).round() as u8
}

/// Lines in a created or deleted file: `\n`-separated pieces, 0 when empty
pub fn line_count(text: &str) -> usize {
    if text.is_empty() {
        0
    } else {
        text.split('\n').count()
    }
}
