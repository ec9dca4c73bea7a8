//! Decides how the commits of a tag range are fetched.
use crate::analyzer::range::TagRange;

/// How the commits for a release are retrieved from the forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPlan {
    /// Compare two tags directly.
    Between { base: String, compare: String },
    /// Initial release: resolve the tag's commit date, then list every
    /// commit up to it. Commit listing filters by date, not by ref.
    UntilTag { tag: String },
}

pub fn resolve_window(range: &TagRange) -> FetchPlan {
    match &range.base {
        Some(base) => FetchPlan::Between {
            base: base.name.clone(),
            compare: range.compare.name.clone(),
        },
        None => FetchPlan::UntilTag {
            tag: range.compare.name.clone(),
        },
    }
}
