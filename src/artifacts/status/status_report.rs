use crate::errors::nothing_to_commit_message;

/// Paths grouped by how they differ across head, index and working tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    pub branch: String,
    /// No commit on the branch yet
    pub is_root: bool,
    /// In the index, not in the head tree
    pub staged_added: Vec<String>,
    /// In both, with a different hash
    pub staged_modified: Vec<String>,
    /// In the head tree, not in the index
    pub staged_deleted: Vec<String>,
    /// Working file hash differs from its index entry
    pub unstaged_modified: Vec<String>,
    /// Working file with no index entry
    pub untracked: Vec<String>,
}

impl StatusReport {
    pub fn has_staged_changes(&self) -> bool {
        !(self.staged_added.is_empty()
            && self.staged_modified.is_empty()
            && self.staged_deleted.is_empty())
    }

    pub fn is_clean(&self) -> bool {
        !self.has_staged_changes() && self.unstaged_modified.is_empty() && self.untracked.is_empty()
    }

    /// Long-format status text, without a trailing newline
    pub fn render(&self, system_name: &str) -> String {
        if self.is_clean() {
            return nothing_to_commit_message(&self.branch, self.is_root);
        }

        let mut out = format!("On branch {}\n", self.branch);

        if self.has_staged_changes() {
            out.push_str(&format!(
                "\nChanges to be committed:\n  (use \"{system_name} restore --staged <file>...\" to unstage)\n"
            ));
            for path in &self.staged_added {
                out.push_str(&format!("\tnew file:   {path}\n"));
            }
            for path in &self.staged_modified {
                out.push_str(&format!("\tmodified:   {path}\n"));
            }
            for path in &self.staged_deleted {
                out.push_str(&format!("\tdeleted:    {path}\n"));
            }
        }

        if !self.unstaged_modified.is_empty() {
            out.push_str(&format!(
                "\nChanges not staged for commit:\n  (use \"{system_name} add <file>...\" to update what will be committed)\n  (use \"{system_name} restore <file>...\" to discard changes in working directory)\n"
            ));
            for path in &self.unstaged_modified {
                out.push_str(&format!("\tmodified:   {path}\n"));
            }
        }

        if !self.untracked.is_empty() {
            out.push_str(&format!(
                "\nUntracked files:\n  (use \"{system_name} add <file>...\" to include in what will be committed)\n"
            ));
            for path in &self.untracked {
                out.push_str(&format!("\t{path}\n"));
            }
        }

        out.trim().to_string()
    }
}
