use std::{collections::HashMap, fmt::Display, str::FromStr};

use crate::model::ParseError;

/// Gerrit Change-Id, `I` followed by hex digits.
///
/// The case is kept as written: cycle detection compares the canonical form
/// reported by the server against the ids found in commit messages verbatim.
#[derive(Clone, Hash, Debug, PartialEq, Eq)]
pub struct ChangeId(String);

impl ChangeId {
    pub fn new(s: impl Into<String>) -> Self {
        ChangeId(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(s: &str) -> bool {
        let mut chars = s.chars();
        matches!(chars.next(), Some('I' | 'i'))
            && s.len() > 1
            && chars.all(|c| c.is_ascii_hexdigit())
    }
}

impl FromStr for ChangeId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if ChangeId::is_valid(s) {
            Ok(ChangeId::new(s))
        } else {
            Err(ParseError::InvalidChangeId(s.to_string()))
        }
    }
}

impl Display for ChangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChangeId {
    fn from(s: &str) -> Self {
        ChangeId::new(s)
    }
}

/// A `Depends-On` edge still waiting in the frontier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyReference {
    pub host: String,
    pub change_id: ChangeId,
    /// Only ever set on caller-provided seeds.
    pub revision: Option<String>,
}

impl DependencyReference {
    pub fn new(host: impl Into<String>, change_id: impl Into<ChangeId>) -> Self {
        DependencyReference {
            host: host.into(),
            change_id: change_id.into(),
            revision: None,
        }
    }

    pub fn pinned(
        host: impl Into<String>,
        change_id: impl Into<ChangeId>,
        revision: impl Into<String>,
    ) -> Self {
        DependencyReference {
            revision: Some(revision.into()),
            ..Self::new(host, change_id)
        }
    }
}

impl Display for DependencyReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.revision {
            Some(revision) => write!(f, "{}@{} ({})", self.change_id, self.host, revision),
            None => write!(f, "{}@{}", self.change_id, self.host),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionInfo {
    pub git_ref: String,
    pub commit_message: String,
}

/// Change metadata as reported by the review server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    pub change_id: ChangeId,
    pub project: String,
    pub branch: String,
    pub current_revision: String,
    pub revisions: HashMap<String, RevisionInfo>,
}

impl ChangeRecord {
    pub fn revision(&self, revision: &str) -> Option<&RevisionInfo> {
        self.revisions.get(revision)
    }
}
