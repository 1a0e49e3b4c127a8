use serde::Serialize;

/// A change that has to be checked out together with the root change.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct ResolvedDependency {
    pub host: String,
    pub project: String,
    pub branch: String,
    pub refspec: String,
}

/// A project already checked out on the local filesystem.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct LocalChange {
    pub project: String,
    pub branch: String,
    pub path: String,
}
