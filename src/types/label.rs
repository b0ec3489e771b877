//! Scope labels and label sets.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Label classifying why/when a dependency applies (e.g. `compile`, `test`).
///
/// Labels are compared literally: no case folding, and no notion that one
/// label implies another. The empty label is an ordinary, distinct label;
/// root dependencies are commonly declared with it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeLabel(String);

impl ScopeLabel {
    /// Create a label from anything string-like.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the empty label.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ScopeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Hash/Ord delegate to the inner string, so str-keyed lookups are sound.
impl std::borrow::Borrow<str> for ScopeLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ScopeLabel {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ScopeLabel {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A set of scope labels with explicit "no constraint" sentinels.
///
/// The sentinels exist so that "empty set" (matches nothing) and "no
/// constraint" (matches everything / names nothing) stay distinct states
/// rather than being conflated in a nullable collection.
///
/// | Variant          | `contains` | Typical use                         |
/// |------------------|------------|-------------------------------------|
/// | `Unconstrained`  | always     | inclusion side: accept any scope    |
/// | `ExcludeNothing` | never      | exclusion side: ban no scope        |
/// | `Specific(s)`    | membership | either side: exactly these labels   |
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeSet {
    /// Matches every label.
    Unconstrained,
    /// Matches no label.
    ExcludeNothing,
    /// Matches exactly the named labels. An empty set matches nothing.
    Specific(BTreeSet<ScopeLabel>),
}

impl ScopeSet {
    /// Build a specific set from anything yielding string-likes.
    pub fn of<I, T>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ScopeLabel>,
    {
        Self::Specific(labels.into_iter().map(Into::into).collect())
    }

    /// Whether this set matches the given label.
    pub fn contains(&self, label: &ScopeLabel) -> bool {
        match self {
            Self::Unconstrained => true,
            Self::ExcludeNothing => false,
            Self::Specific(labels) => labels.contains(label),
        }
    }

}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconstrained => write!(f, "*"),
            Self::ExcludeNothing => write!(f, "-"),
            Self::Specific(labels) => {
                write!(f, "{{")?;
                for (i, label) in labels.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{label}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_compare_literally() {
        assert_ne!(ScopeLabel::from("compile"), ScopeLabel::from("Compile"));
        assert_ne!(ScopeLabel::from("compile"), ScopeLabel::from("compile "));
    }

    #[test]
    fn test_empty_label_is_distinct() {
        let empty = ScopeLabel::from("");
        assert!(empty.is_empty());
        assert_ne!(empty, ScopeLabel::from("compile"));

        let set = ScopeSet::of(["", "compile"]);
        assert!(set.contains(&empty));
    }

    #[test]
    fn test_unconstrained_matches_everything() {
        let set = ScopeSet::Unconstrained;
        assert!(set.contains(&ScopeLabel::from("compile")));
        assert!(set.contains(&ScopeLabel::from("")));
        assert!(set.contains(&ScopeLabel::from("anything")));
    }

    #[test]
    fn test_exclude_nothing_matches_nothing() {
        let set = ScopeSet::ExcludeNothing;
        assert!(!set.contains(&ScopeLabel::from("compile")));
        assert!(!set.contains(&ScopeLabel::from("")));
    }

    #[test]
    fn test_empty_specific_set_matches_nothing() {
        let set = ScopeSet::of(Vec::<&str>::new());
        assert!(!set.contains(&ScopeLabel::from("compile")));
        // Distinct state from the sentinels.
        assert_ne!(set, ScopeSet::Unconstrained);
        assert_ne!(set, ScopeSet::ExcludeNothing);
    }

    #[test]
    fn test_specific_set_membership() {
        let set = ScopeSet::of(["compile", "runtime"]);
        assert!(set.contains(&ScopeLabel::from("compile")));
        assert!(set.contains(&ScopeLabel::from("runtime")));
        assert!(!set.contains(&ScopeLabel::from("test")));
    }

    #[test]
    fn test_display() {
        assert_eq!(ScopeSet::Unconstrained.to_string(), "*");
        assert_eq!(ScopeSet::ExcludeNothing.to_string(), "-");
        assert_eq!(
            ScopeSet::of(["runtime", "compile"]).to_string(),
            "{compile, runtime}"
        );
    }
}
