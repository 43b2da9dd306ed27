use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;

/// A commit as listed by `log`, with the branch names decorating it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub oid: ObjectId,
    pub commit: Commit,
    /// Branch HEAD points at, set only on the first entry
    pub head_branch: Option<String>,
    /// Branches pointing at this commit, sorted
    pub branches: Vec<String>,
}

impl LogEntry {
    /// ` (HEAD -> main, dev)`, ` (dev)` or nothing
    pub fn decoration(&self) -> String {
        match &self.head_branch {
            Some(head_branch) => {
                let mut names = vec![format!("HEAD -> {head_branch}")];
                names.extend(
                    self.branches
                        .iter()
                        .filter(|branch| *branch != head_branch)
                        .cloned(),
                );
                format!(" ({})", names.join(", "))
            }
            None if self.branches.is_empty() => String::new(),
            None => format!(" ({})", self.branches.join(", ")),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!("commit {}{}\n", self.oid, self.decoration());

        if let Some(author) = self.commit.author() {
            if !author.name().is_empty() && !author.email().is_empty() {
                out.push_str(&format!("Author: {}\n", author.display_name()));
            }
            out.push_str(&format!("Date:   {}\n", author.readable_timestamp()));
        }
        out.push('\n');

        let message = self.commit.message();
        if !message.trim().is_empty() {
            for line in message.split('\n') {
                out.push_str(&format!("    {line}\n"));
            }
        }

        out
    }
}
