//! Commit classification into configured release-note groups.
use git_conventional::Commit as ConventionalCommit;
use log::*;
use regex::Regex;
use serde::Serialize;
use std::{fmt, sync::Arc};

use crate::forge::request::RawCommit;

type TypeFn = dyn Fn(&str) -> String + Send + Sync;

/// Strategy for extracting the lowercase type token from a commit message.
#[derive(Clone, Default)]
pub enum TypeExtractor {
    /// Text before the first `:` of the first line.
    #[default]
    Prefix,
    /// Conventional commit type, ignoring scope and breaking marker. Falls
    /// back to [`TypeExtractor::Prefix`] for messages that do not parse.
    Conventional,
    /// The `type` named group (or first capture group) of a pattern matched
    /// against the first line.
    Pattern(Regex),
    /// Caller supplied extraction function.
    Custom(Arc<TypeFn>),
}

impl fmt::Debug for TypeExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExtractor::Prefix => write!(f, "Prefix"),
            TypeExtractor::Conventional => write!(f, "Conventional"),
            TypeExtractor::Pattern(re) => write!(f, "Pattern({})", re.as_str()),
            TypeExtractor::Custom(_) => write!(f, "Custom"),
        }
    }
}

impl TypeExtractor {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        TypeExtractor::Custom(Arc::new(f))
    }

    /// Extract the lowercase type token from a commit message.
    pub fn type_of(&self, message: &str) -> String {
        let first_line = title(message);

        match self {
            TypeExtractor::Prefix => prefix_type(first_line),
            TypeExtractor::Conventional => {
                match ConventionalCommit::parse(message.trim_end()) {
                    Ok(cc) => cc.type_().to_string().to_lowercase(),
                    Err(_) => prefix_type(first_line),
                }
            }
            TypeExtractor::Pattern(re) => re
                .captures(first_line)
                .and_then(|caps| caps.name("type").or_else(|| caps.get(1)))
                .map(|m| m.as_str().trim().to_lowercase())
                .unwrap_or_default(),
            TypeExtractor::Custom(f) => f(message).to_lowercase(),
        }
    }
}

fn prefix_type(line: &str) -> String {
    line.split(':')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}

/// First line of a commit message.
pub fn title(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

/// A named group and the commit types it collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRule {
    pub name: String,
    pub types: Vec<String>,
}

impl GroupRule {
    pub fn new(name: impl Into<String>, types: &[&str]) -> Self {
        Self {
            name: name.into(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn claims(&self, commit_type: &str) -> bool {
        let commit_type = commit_type.to_lowercase();
        self.types.iter().any(|t| t.to_lowercase() == commit_type)
    }
}

/// Ordered group rules plus the type extractor. Declaration order decides
/// both which group wins a contested type and the order of note sections.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    groups: Vec<GroupRule>,
    extractor: TypeExtractor,
}

impl Default for ClassificationRule {
    fn default() -> Self {
        Self::new(default_groups(), TypeExtractor::default())
    }
}

/// Features, Bug Fixes, Enhancement, Documentation.
pub fn default_groups() -> Vec<GroupRule> {
    vec![
        GroupRule::new("Features", &["feat"]),
        GroupRule::new("Bug Fixes", &["fix"]),
        GroupRule::new("Enhancement", &["refactor", "perf"]),
        GroupRule::new("Documentation", &["docs"]),
    ]
}

impl ClassificationRule {
    pub fn new(groups: Vec<GroupRule>, extractor: TypeExtractor) -> Self {
        Self { groups, extractor }
    }

    pub fn type_of(&self, message: &str) -> String {
        self.extractor.type_of(message)
    }

    /// First declared group claiming the commit type.
    pub fn group_for(&self, commit_type: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|g| g.claims(commit_type))
            .map(|g| g.name.as_str())
    }

    /// Group names in declaration order.
    pub fn group_order(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name.clone()).collect()
    }
}

/// Commit accepted into a release-note group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedCommit {
    pub group: String,
    pub sha: String,
    pub message: String,
    pub author: String,
}

/// Classify a commit, returning `None` when no group claims its type.
pub fn classify(
    commit: &RawCommit,
    rule: &ClassificationRule,
) -> Option<ClassifiedCommit> {
    let commit_type = rule.type_of(&commit.message);

    rule.group_for(&commit_type).map(|group| ClassifiedCommit {
        group: group.to_string(),
        sha: commit.sha.clone(),
        message: commit.message.clone(),
        author: commit.author_name.clone(),
    })
}

/// Classify every commit in order, logging which ones ship and which are
/// omitted.
pub fn classify_all(
    commits: &[RawCommit],
    rule: &ClassificationRule,
) -> Vec<ClassifiedCommit> {
    commits
        .iter()
        .filter_map(|commit| {
            let classified = classify(commit, rule);
            match classified {
                Some(_) => info!("shipped: {}", title(&commit.message)),
                None => info!("omitted: {}", title(&commit.message)),
            }
            classified
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(sha: &str, message: &str) -> RawCommit {
        RawCommit {
            sha: sha.to_string(),
            message: message.to_string(),
            author_name: "Jane Doe".to_string(),
        }
    }

    #[test]
    fn default_type_is_lowercased_prefix() {
        let extractor = TypeExtractor::Prefix;
        assert_eq!(extractor.type_of("Feat: add thing"), "feat");
        assert_eq!(extractor.type_of("fix : spaced"), "fix");
        assert_eq!(extractor.type_of("no colon here"), "no colon here");
        assert_eq!(extractor.type_of("docs: a\nbody: with colon"), "docs");
    }

    #[test]
    fn conventional_type_ignores_scope() {
        let extractor = TypeExtractor::Conventional;
        assert_eq!(extractor.type_of("feat(api): add endpoint"), "feat");
        assert_eq!(extractor.type_of("fix!: breaking fix"), "fix");
        assert_eq!(extractor.type_of("Update readme"), "update readme");
    }

    #[test]
    fn pattern_type_uses_named_group() {
        let re = Regex::new(r"^\[(?<type>\w+)\]").unwrap();
        let extractor = TypeExtractor::Pattern(re);
        assert_eq!(extractor.type_of("[FEAT] add thing"), "feat");
        assert_eq!(extractor.type_of("feat: no brackets"), "");
    }

    #[test]
    fn custom_type_function_is_used() {
        let extractor = TypeExtractor::custom(|m: &str| {
            m.split_whitespace().next().unwrap_or_default().to_string()
        });
        assert_eq!(extractor.type_of("Perf tune cache"), "perf");
    }

    #[test]
    fn group_types_match_non_ascii_case_insensitively() {
        let rule = ClassificationRule::new(
            vec![GroupRule::new("Fonctionnalités", &["FÉAT"])],
            TypeExtractor::Prefix,
        );

        let classified = classify(&commit("abc", "Féat: ajout"), &rule);
        assert_eq!(classified.unwrap().group, "Fonctionnalités");
        assert_eq!(rule.group_for("ÉTÉ"), None);
        assert_eq!(rule.group_for("FéAT"), Some("Fonctionnalités"));
    }

    #[test]
    fn classifies_into_configured_group() {
        let rule = ClassificationRule::default();
        let classified =
            classify(&commit("91dccdfasdfasdf", "feat: a new feature"), &rule)
                .unwrap();

        assert_eq!(classified.group, "Features");
        assert_eq!(classified.sha, "91dccdfasdfasdf");
        assert_eq!(classified.message, "feat: a new feature");
        assert_eq!(classified.author, "Jane Doe");
    }

    #[test]
    fn type_match_is_case_insensitive() {
        let rule = ClassificationRule::new(
            vec![GroupRule::new("Features", &["FEAT"])],
            TypeExtractor::Prefix,
        );
        let classified = classify(&commit("abc", "feat: x"), &rule).unwrap();
        assert_eq!(classified.group, "Features");
    }

    #[test]
    fn unmatched_type_is_excluded() {
        let rule = ClassificationRule::default();
        assert!(
            classify(&commit("abc", "chore: apply code review"), &rule)
                .is_none()
        );
    }

    #[test]
    fn first_declared_group_wins() {
        let rule = ClassificationRule::new(
            vec![
                GroupRule::new("Features", &["perf"]),
                GroupRule::new("Enhancement", &["perf"]),
            ],
            TypeExtractor::Prefix,
        );
        let classified =
            classify(&commit("abc", "perf: improve"), &rule).unwrap();
        assert_eq!(classified.group, "Features");
    }

    #[test]
    fn classification_is_deterministic() {
        let rule = ClassificationRule::default();
        for message in [
            "feat: a",
            "fix: b",
            "perf: c",
            "chore: d",
            "",
            "refactor(core): e",
        ] {
            let c = commit("abc1234", message);
            assert_eq!(classify(&c, &rule), classify(&c, &rule));
        }
    }

    #[test]
    fn classify_all_keeps_arrival_order() {
        let rule = ClassificationRule::default();
        let commits = vec![
            commit("1", "fix: one"),
            commit("2", "chore: two"),
            commit("3", "feat: three"),
            commit("4", "fix: four"),
        ];

        let classified = classify_all(&commits, &rule);
        let shas: Vec<&str> =
            classified.iter().map(|c| c.sha.as_str()).collect();
        assert_eq!(shas, vec!["1", "3", "4"]);
    }

    #[test]
    fn group_order_follows_declaration() {
        assert_eq!(
            ClassificationRule::default().group_order(),
            vec!["Features", "Bug Fixes", "Enhancement", "Documentation"]
        );
    }
}
