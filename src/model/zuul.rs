//! Convertors for change lists already flattened by the gating system.
//!
//! The format is a `^`-separated list of `project:branch:<location>` groups,
//! where the location is a refspec for gated changes and a filesystem path for
//! local checkouts. Nothing here talks to a review server.

use crate::model::{
    resolved::{LocalChange, ResolvedDependency},
    ParseError,
};

const CHANGE_SEPARATOR: char = '^';
const FIELD_SEPARATOR: char = ':';

fn split_changes<'a>(
    changes: &'a str,
    location: &'static str,
) -> impl Iterator<Item = Result<(&'a str, &'a str, &'a str), ParseError>> {
    let changes = changes.trim();
    changes
        .split(CHANGE_SEPARATOR)
        .filter(move |_| !changes.is_empty())
        .map(move |item| {
            let mut fields = item.splitn(3, FIELD_SEPARATOR);
            match (fields.next(), fields.next(), fields.next()) {
                (Some(project), Some(branch), Some(rest)) => Ok((project, branch, rest)),
                _ => Err(ParseError::MalformedChange(item.to_string(), location)),
            }
        })
}

/// Gated changes, every entry tagged with the review server they came from.
pub fn parse_gated_changes(
    host: &str,
    changes: &str,
) -> Result<Vec<ResolvedDependency>, ParseError> {
    split_changes(changes, "refspec")
        .map(|fields| {
            fields.map(|(project, branch, refspec)| ResolvedDependency {
                host: host.to_string(),
                project: project.to_string(),
                branch: branch.to_string(),
                refspec: refspec.to_string(),
            })
        })
        .collect()
}

pub fn parse_local_changes(changes: &str) -> Result<Vec<LocalChange>, ParseError> {
    split_changes(changes, "path")
        .map(|fields| {
            fields.map(|(project, branch, path)| LocalChange {
                project: project.to_string(),
                branch: branch.to_string(),
                path: path.to_string(),
            })
        })
        .collect()
}
