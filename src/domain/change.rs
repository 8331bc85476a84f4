/// Indentation applied to every path listed under "Detailed changes".
pub const FILE_INDENT: &str = "      ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCategory {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl ChangeCategory {
    /// Display order of the categories in a commit message.
    pub const ALL: [ChangeCategory; 4] = [
        ChangeCategory::Added,
        ChangeCategory::Modified,
        ChangeCategory::Deleted,
        ChangeCategory::Renamed,
    ];

    /// Letter understood by `git diff --diff-filter`.
    pub fn diff_filter(&self) -> &'static str {
        match self {
            ChangeCategory::Added => "A",
            ChangeCategory::Modified => "M",
            ChangeCategory::Deleted => "D",
            ChangeCategory::Renamed => "R",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChangeCategory::Added => "Added",
            ChangeCategory::Modified => "Modified",
            ChangeCategory::Deleted => "Deleted",
            ChangeCategory::Renamed => "Renamed",
        }
    }
}

/// Staged paths grouped by how they changed. Counts are always the length of
/// the matching list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    added: Vec<String>,
    modified: Vec<String>,
    deleted: Vec<String>,
    renamed: Vec<String>,
}

impl ChangeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_files(mut self, category: ChangeCategory, files: Vec<String>) -> Self {
        *self.files_mut(category) = files;
        self
    }

    pub fn files(&self, category: ChangeCategory) -> &[String] {
        match category {
            ChangeCategory::Added => &self.added,
            ChangeCategory::Modified => &self.modified,
            ChangeCategory::Deleted => &self.deleted,
            ChangeCategory::Renamed => &self.renamed,
        }
    }

    pub fn count(&self, category: ChangeCategory) -> usize {
        self.files(category).len()
    }

    pub fn total(&self) -> usize {
        ChangeCategory::ALL
            .iter()
            .map(|category| self.count(*category))
            .sum()
    }

    fn files_mut(&mut self, category: ChangeCategory) -> &mut Vec<String> {
        match category {
            ChangeCategory::Added => &mut self.added,
            ChangeCategory::Modified => &mut self.modified,
            ChangeCategory::Deleted => &mut self.deleted,
            ChangeCategory::Renamed => &mut self.renamed,
        }
    }
}

/// Staged diff text with every line indented by a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSummary(String);

impl DiffSummary {
    pub fn from_raw(raw: &str) -> Self {
        let indented = raw
            .lines()
            .map(|line| format!("\t{line}"))
            .collect::<Vec<_>>()
            .join("\n");
        Self(indented)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
