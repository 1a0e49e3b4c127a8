use std::collections::HashSet;

use log::{debug, warn};

use crate::{
    model::{
        change::{ChangeId, DependencyReference},
        hosts::HostAllowList,
        resolved::ResolvedDependency,
    },
    resolver::ChangeFetcher,
    trailer::TrailerParser,
};

/// Walks `Depends-On` chains across review servers.
///
/// Only one change per project is kept. A change whose project is already
/// present is dropped together with everything it depends on.
pub struct DependencyResolver<'a, F> {
    fetcher: F,
    parser: TrailerParser<'a>,
}

impl<'a, F> DependencyResolver<'a, F>
where
    F: ChangeFetcher,
{
    pub fn new(fetcher: F, hosts: &'a HostAllowList) -> Self {
        DependencyResolver {
            fetcher,
            parser: TrailerParser::new(hosts),
        }
    }

    /// Resolves the seeds and everything they transitively depend on.
    ///
    /// The frontier is a stack: the last seed and the most recently discovered
    /// trailer are processed first. Anomalies are logged and never abort the
    /// walk, so an unresolvable root yields an empty list.
    pub fn resolve(&self, seeds: Vec<DependencyReference>) -> Vec<ResolvedDependency> {
        let mut frontier = seeds;
        let mut visited: HashSet<ChangeId> = HashSet::new();
        let mut resolved: Vec<ResolvedDependency> = Vec::new();

        while let Some(DependencyReference {
            host,
            change_id,
            revision,
        }) = frontier.pop()
        {
            if visited.contains(&change_id) {
                debug!("Skipping {} on {}, already visited", change_id, host);
                continue;
            }

            // A failed fetch is not recorded as visited so another path may retry it.
            let change = match self.fetcher.fetch(&host, &change_id) {
                Ok(change) => change,
                Err(error) => {
                    warn!(
                        "Failed to fetch change details for {} from {}: {}",
                        change_id, host, error
                    );
                    continue;
                }
            };
            visited.insert(change.change_id.clone());

            let revision = revision.unwrap_or_else(|| change.current_revision.clone());
            let Some(revision_info) = change.revision(&revision) else {
                warn!(
                    "Could not find revision {} for change {} on {}",
                    revision, change_id, host
                );
                continue;
            };

            if resolved.iter().any(|d| d.project == change.project) {
                warn!(
                    "Skipping {} on {} because project \"{}\" is already a dependency",
                    change_id, host, change.project
                );
                continue;
            }

            debug!(
                "Resolved {} on {} to {} {}",
                change_id, host, change.project, revision_info.git_ref
            );
            resolved.push(ResolvedDependency {
                host: host.clone(),
                project: change.project.clone(),
                branch: change.branch.clone(),
                refspec: revision_info.git_ref.clone(),
            });

            frontier.extend(self.parser.parse(&host, &revision_info.commit_message));
        }

        resolved
    }
}
