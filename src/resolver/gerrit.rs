use crate::{
    gerrit::GerritClient,
    model::change::{ChangeId, ChangeRecord},
};

use super::ChangeFetcher;

impl ChangeFetcher for GerritClient {
    fn fetch(&self, host: &str, change_id: &ChangeId) -> anyhow::Result<ChangeRecord> {
        let change = self.get_change(host, change_id)?;
        Ok(change)
    }
}
