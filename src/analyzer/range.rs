//! Selection of the tag pair bounding the commits of a release.
use crate::{NoteError, Result, forge::request::Tag};

/// Tags bounding a release: commits after `base` up to `compare`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRange {
    /// Tag being released.
    pub compare: Tag,
    /// Previous release tag, absent for the initial release.
    pub base: Option<Tag>,
}

/// Select the release range from tags ordered newest first.
///
/// Without a requested tag the two newest tags are used. With one, the
/// requested tag is compared against the tag immediately older than it.
pub fn select_range(tags: &[Tag], requested: Option<&str>) -> Result<TagRange> {
    match requested {
        Some(name) => range_for_tag(tags, name),
        None => latest_range(tags),
    }
}

fn latest_range(tags: &[Tag]) -> Result<TagRange> {
    let compare = tags.first().cloned().ok_or_else(|| {
        NoteError::not_found("Could not find latest tag. No tags in repository")
    })?;

    Ok(TagRange {
        compare,
        base: tags.get(1).cloned(),
    })
}

fn range_for_tag(tags: &[Tag], name: &str) -> Result<TagRange> {
    let index = tags
        .iter()
        .position(|tag| tag.name == name)
        .ok_or_else(|| {
            NoteError::not_found(format!("Could not find {name} in tag list"))
        })?;

    Ok(TagRange {
        compare: tags[index].clone(),
        base: tags.get(index + 1).cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags() -> Vec<Tag> {
        ["4th", "3rd", "2nd", "1st"]
            .iter()
            .enumerate()
            .map(|(i, name)| Tag::new(*name, format!("sha{i}")))
            .collect()
    }

    fn names(range: &TagRange) -> (&str, Option<&str>) {
        (
            range.compare.name.as_str(),
            range.base.as_ref().map(|t| t.name.as_str()),
        )
    }

    #[test]
    fn selects_latest_two_tags_without_request() {
        let range = select_range(&tags(), None).unwrap();
        assert_eq!(names(&range), ("4th", Some("3rd")));
    }

    #[test]
    fn single_tag_has_no_base() {
        let range = select_range(&[Tag::new("1st", "sha")], None).unwrap();
        assert_eq!(names(&range), ("1st", None));
    }

    #[test]
    fn empty_tag_list_is_not_found() {
        let err = select_range(&[], None).unwrap_err();
        assert!(matches!(err, NoteError::NotFound(_)));
    }

    #[test]
    fn selects_requested_tag_and_next_older() {
        let range = select_range(&tags(), Some("3rd")).unwrap();
        assert_eq!(names(&range), ("3rd", Some("2nd")));
    }

    #[test]
    fn requested_newest_tag_matches_default() {
        let range = select_range(&tags(), Some("4th")).unwrap();
        assert_eq!(names(&range), ("4th", Some("3rd")));
    }

    #[test]
    fn requested_oldest_tag_is_initial_release() {
        let range = select_range(&tags(), Some("1st")).unwrap();
        assert_eq!(names(&range), ("1st", None));
    }

    #[test]
    fn unknown_tag_mentions_name() {
        let err = select_range(&tags(), Some("v0.0.0")).unwrap_err();
        assert!(matches!(err, NoteError::NotFound(_)));
        assert_eq!(err.to_string(), "Could not find v0.0.0 in tag list");
    }

    #[test]
    fn requested_tag_on_empty_list_is_not_found() {
        let err = select_range(&[], Some("v1.0.0")).unwrap_err();
        assert!(err.to_string().contains("v1.0.0"));
    }
}
