use std::collections::HashMap;

use serde::Deserialize;

use crate::model::change::{ChangeId, ChangeRecord, RevisionInfo};

/// Gerrit prefixes every JSON response with this line to defeat XSSI.
const XSSI_PREFIX: &str = ")]}'";

#[derive(Debug, Deserialize)]
struct ChangeInfo {
    change_id: String,
    project: String,
    branch: String,
    current_revision: String,
    #[serde(default)]
    revisions: HashMap<String, RevisionPayload>,
}

#[derive(Debug, Deserialize)]
struct RevisionPayload {
    #[serde(rename = "ref")]
    git_ref: String,
    commit: CommitPayload,
}

#[derive(Debug, Deserialize)]
struct CommitPayload {
    message: String,
}

impl From<ChangeInfo> for ChangeRecord {
    fn from(info: ChangeInfo) -> Self {
        ChangeRecord {
            change_id: ChangeId::new(info.change_id),
            project: info.project,
            branch: info.branch,
            current_revision: info.current_revision,
            revisions: info
                .revisions
                .into_iter()
                .map(|(id, revision)| {
                    (
                        id,
                        RevisionInfo {
                            git_ref: revision.git_ref,
                            commit_message: revision.commit.message,
                        },
                    )
                })
                .collect(),
        }
    }
}

/// Decodes the body of a `GET /changes/{id}?o=ALL_REVISIONS&o=ALL_COMMITS`
/// response.
pub fn decode_change(body: &str) -> Result<ChangeRecord, serde_json::Error> {
    let json = body.strip_prefix(XSSI_PREFIX).unwrap_or(body);
    serde_json::from_str::<ChangeInfo>(json).map(ChangeRecord::from)
}
