mod gerrit;

use crate::model::change::{ChangeId, ChangeRecord};

pub trait ChangeFetcher {
    fn fetch(&self, host: &str, change_id: &ChangeId) -> anyhow::Result<ChangeRecord>;
}

impl<T> ChangeFetcher for &T
where
    T: ChangeFetcher + ?Sized,
{
    fn fetch(&self, host: &str, change_id: &ChangeId) -> anyhow::Result<ChangeRecord> {
        T::fetch(self, host, change_id)
    }
}
