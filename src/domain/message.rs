use crate::domain::change::{ChangeCategory, ChangeSet};

const DETAILS_HEADER: &str = "Detailed changes:";

/// Compose the final commit message.
///
/// A non-empty `user_message` wins outright. Otherwise the generated summary
/// is followed by one titled block per non-empty category, in
/// added/modified/deleted/renamed order.
pub fn build_message(user_message: &str, stats: &ChangeSet, generated_summary: &str) -> String {
    if !user_message.is_empty() {
        return user_message.to_string();
    }

    let mut message = format!("{generated_summary}\n\n{DETAILS_HEADER}");
    for category in ChangeCategory::ALL {
        let count = stats.count(category);
        if count > 0 {
            message.push_str(&format!(
                "\n\n{} ({count}):\n{}",
                category.title(),
                stats.files(category).join("\n")
            ));
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| format!("      {name}")).collect()
    }

    #[test]
    fn composes_single_added_file() {
        let stats = ChangeSet::empty().with_files(ChangeCategory::Added, files(&["a.txt"]));
        let message = build_message("", &stats, "Fix bug");
        assert_eq!(
            message,
            "Fix bug\n\nDetailed changes:\n\nAdded (1):\n      a.txt"
        );
    }

    #[test]
    fn literal_message_is_used_verbatim() {
        let stats = ChangeSet::empty()
            .with_files(ChangeCategory::Modified, files(&["src/lib.rs"]))
            .with_files(ChangeCategory::Renamed, files(&["new.rs"]));
        let literal = "chore: bump deps\n\nwith trailing spaces  ";
        assert_eq!(build_message(literal, &stats, "ignored"), literal);
    }

    #[test]
    fn orders_blocks_and_skips_empty_categories() {
        let stats = ChangeSet::empty()
            .with_files(ChangeCategory::Renamed, files(&["moved.rs"]))
            .with_files(ChangeCategory::Added, files(&["a.rs", "b.rs"]))
            .with_files(ChangeCategory::Deleted, files(&["gone.rs"]));

        let message = build_message("", &stats, "Refactor");

        assert!(!message.contains("Modified ("));
        let added = message.find("Added (2):").unwrap();
        let deleted = message.find("Deleted (1):").unwrap();
        let renamed = message.find("Renamed (1):").unwrap();
        assert!(added < deleted && deleted < renamed);
        assert!(message.contains("Added (2):\n      a.rs\n      b.rs"));
    }

    #[test]
    fn every_zero_nonzero_combination_has_matching_blocks() {
        for mask in 0u8..16 {
            let mut stats = ChangeSet::empty();
            for (bit, category) in ChangeCategory::ALL.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    stats = stats.with_files(*category, files(&["f"]));
                }
            }

            let message = build_message("", &stats, "Summary");

            for (bit, category) in ChangeCategory::ALL.iter().enumerate() {
                let header = format!("{} (1):", category.title());
                assert_eq!(message.contains(&header), mask & (1 << bit) != 0);
            }
        }
    }

    #[test]
    fn empty_change_set_keeps_details_header() {
        let message = build_message("", &ChangeSet::empty(), "Summary");
        assert_eq!(message, "Summary\n\nDetailed changes:");
    }

    #[test]
    fn is_deterministic() {
        let stats = ChangeSet::empty().with_files(ChangeCategory::Modified, files(&["x", "y"]));
        assert_eq!(
            build_message("", &stats, "Update"),
            build_message("", &stats, "Update")
        );
    }
}
