use thiserror::Error;

use crate::{
    fetch::DependencyResolver,
    gerrit::GerritClient,
    model::{
        change::{ChangeId, DependencyReference},
        hosts::HostAllowList,
        resolved::{LocalChange, ResolvedDependency},
        zuul, ParseError,
    },
};

mod builder;

pub use builder::CrossDepsBuilder;

pub struct CrossDeps {
    client: GerritClient,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Failed to resolve even the root change {change_id} on {host}")]
    RootUnresolved { host: String, change_id: ChangeId },
}

impl CrossDeps {
    pub fn builder() -> CrossDepsBuilder {
        CrossDepsBuilder::default()
    }

    pub fn allowed_hosts(&self) -> &HostAllowList {
        self.client.hosts()
    }

    /// Resolves every seed and the changes they transitively depend on.
    /// An empty result is not an error at this level.
    pub fn resolve(&self, seeds: Vec<DependencyReference>) -> Vec<ResolvedDependency> {
        DependencyResolver::new(&self.client, self.client.hosts()).resolve(seeds)
    }

    /// Resolves a single change, failing when not even the change itself could
    /// be resolved.
    pub fn resolve_root(
        &self,
        root: DependencyReference,
    ) -> Result<Vec<ResolvedDependency>, ResolveError> {
        let error = ResolveError::RootUnresolved {
            host: root.host.clone(),
            change_id: root.change_id.clone(),
        };
        non_empty(self.resolve(vec![root]), error)
    }

    /// Converts a `project:branch:refspec^...` list produced by the gating system.
    pub fn gated_changes(
        host: &str,
        changes: &str,
    ) -> Result<Vec<ResolvedDependency>, ParseError> {
        zuul::parse_gated_changes(host, changes)
    }

    /// Converts a `project:branch:path^...` list of local checkouts.
    pub fn local_changes(changes: &str) -> Result<Vec<LocalChange>, ParseError> {
        zuul::parse_local_changes(changes)
    }
}

fn non_empty(
    resolved: Vec<ResolvedDependency>,
    error: ResolveError,
) -> Result<Vec<ResolvedDependency>, ResolveError> {
    if resolved.is_empty() {
        Err(error)
    } else {
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn empty_result_is_root_failure() {
        let error = ResolveError::RootUnresolved {
            host: "review.openstack.org".to_string(),
            change_id: ChangeId::new("Ibad"),
        };
        assert_eq!(non_empty(vec![], error.clone()), Err(error));
    }

    #[test]
    fn non_empty_result() {
        let resolved = vec![ResolvedDependency {
            host: "review.openstack.org".to_string(),
            project: "openstack/tripleo-quickstart".to_string(),
            branch: "master".to_string(),
            refspec: "refs/changes/03/372503/2".to_string(),
        }];
        let error = ResolveError::RootUnresolved {
            host: "review.openstack.org".to_string(),
            change_id: ChangeId::new("I387b6bfd"),
        };
        assert_eq!(non_empty(resolved.clone(), error), Ok(resolved));
    }

    #[test]
    fn convert_without_client() {
        assert_eq!(
            CrossDeps::gated_changes("review.gerrithub.io", "org/repo:main:refs/changes/01/1/1")
                .unwrap(),
            vec![ResolvedDependency {
                host: "review.gerrithub.io".to_string(),
                project: "org/repo".to_string(),
                branch: "main".to_string(),
                refspec: "refs/changes/01/1/1".to_string(),
            }]
        );
        assert_eq!(
            CrossDeps::local_changes("org/repo:main:/src/repo").unwrap(),
            vec![LocalChange {
                project: "org/repo".to_string(),
                branch: "main".to_string(),
                path: "/src/repo".to_string(),
            }]
        );
    }

    #[test]
    fn root_outside_allowed_hosts() {
        let crossdeps = CrossDeps::builder()
            .allowed_hosts(["review.gerrithub.io"])
            .try_build()
            .unwrap();
        let error = crossdeps
            .resolve_root(DependencyReference::new("review.openstack.org", "Iabc"))
            .expect_err("host is not allowed");
        assert_eq!(
            error.to_string(),
            "Failed to resolve even the root change Iabc on review.openstack.org"
        );
    }
}
