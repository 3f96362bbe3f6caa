//! Scenario file definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use vg_core::VgError;

pub const LATEST_VERSION: u32 = 1;

/// A stem id plus the operations to replay against it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    #[serde(default)]
    pub name: String,
    pub stem: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Create {
        id: String,
        parents: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect_error: Option<ErrorKind>,
    },
    Connect {
        child: String,
        parent: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect_error: Option<ErrorKind>,
    },
    Remove {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect_error: Option<ErrorKind>,
    },
    Exists {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect: Option<bool>,
    },
    Children {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect_error: Option<ErrorKind>,
    },
    Parents {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect: Option<Vec<String>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expect_error: Option<ErrorKind>,
    },
}

impl Step {
    /// The error this step is declared to fail with, if any.
    pub fn expected_error(&self) -> Option<ErrorKind> {
        match self {
            Step::Create { expect_error, .. }
            | Step::Connect { expect_error, .. }
            | Step::Remove { expect_error, .. }
            | Step::Children { expect_error, .. }
            | Step::Parents { expect_error, .. } => *expect_error,
            Step::Exists { .. } => None,
        }
    }

    /// Every virus id the step mentions.
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Step::Create { id, parents, .. } => std::iter::once(id.as_str())
                .chain(parents.iter().map(String::as_str))
                .collect(),
            Step::Connect { child, parent, .. } => vec![child.as_str(), parent.as_str()],
            Step::Remove { id, .. }
            | Step::Exists { id, .. }
            | Step::Children { id, .. }
            | Step::Parents { id, .. } => vec![id.as_str()],
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Create { id, parents, .. } => write!(f, "create {} <- [{}]", id, parents.join(", ")),
            Step::Connect { child, parent, .. } => write!(f, "connect {} <- {}", child, parent),
            Step::Remove { id, .. } => write!(f, "remove {}", id),
            Step::Exists { id, .. } => write!(f, "exists {}", id),
            Step::Children { id, .. } => write!(f, "children {}", id),
            Step::Parents { id, .. } => write!(f, "parents {}", id),
        }
    }
}

/// Serializable name for each genealogy failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AlreadyExists,
    NotFound,
    CannotRemoveStem,
    StemParent,
    NoParents,
    Invariant,
}

impl ErrorKind {
    pub fn of(err: &VgError) -> Self {
        match err {
            VgError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            VgError::NotFound { .. } => ErrorKind::NotFound,
            VgError::CannotRemoveStem { .. } => ErrorKind::CannotRemoveStem,
            VgError::StemParent { .. } => ErrorKind::StemParent,
            VgError::NoParents { .. } => ErrorKind::NoParents,
            VgError::Invariant { .. } => ErrorKind::Invariant,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::NotFound => "not_found",
            ErrorKind::CannotRemoveStem => "cannot_remove_stem",
            ErrorKind::StemParent => "stem_parent",
            ErrorKind::NoParents => "no_parents",
            ErrorKind::Invariant => "invariant",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_parse_from_tagged_yaml() {
        let yaml = r#"
- op: create
  id: C
  parents: [A, B]
- op: remove
  id: A
  expect_error: cannot_remove_stem
- op: parents
  id: C
  expect: [A, B]
"#;
        let steps: Vec<Step> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            steps[0],
            Step::Create {
                id: "C".into(),
                parents: vec!["A".into(), "B".into()],
                expect_error: None,
            }
        );
        assert_eq!(steps[1].expected_error(), Some(ErrorKind::CannotRemoveStem));
        assert_eq!(steps[2].ids(), vec!["C"]);
    }

    #[test]
    fn error_kinds_follow_vg_errors() {
        assert_eq!(ErrorKind::of(&VgError::not_found(&"x")), ErrorKind::NotFound);
        assert_eq!(
            ErrorKind::of(&VgError::stem_parent(&"x")),
            ErrorKind::StemParent
        );
        assert_eq!(ErrorKind::NoParents.to_string(), "no_parents");
    }

    #[test]
    fn step_display() {
        let step = Step::Create {
            id: "D".into(),
            parents: vec!["A".into(), "C".into()],
            expect_error: None,
        };
        assert_eq!(step.to_string(), "create D <- [A, C]");
    }
}
