use std::{error::Error, time::Duration};

use crate::{
    config::CrossDepsConfig,
    gerrit::{GerritClient, DEFAULT_TIMEOUT},
    model::hosts::HostAllowList,
    CrossDeps,
};

#[derive(Default)]
pub struct CrossDepsBuilder {
    allowed_hosts: Option<HostAllowList>,
    timeout: Option<Duration>,
}

impl CrossDepsBuilder {
    /// Starts from loaded configuration; explicit setters still override it.
    pub fn from_config(config: CrossDepsConfig) -> Self {
        CrossDepsBuilder {
            allowed_hosts: Some(config.allowed_hosts),
            timeout: Some(config.timeout),
        }
    }

    /// Review servers that may be queried, in shorthand matching order.
    ///
    /// Defaults to review.openstack.org, review.gerrithub.io and
    /// review.rdoproject.org.
    pub fn allowed_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_hosts = Some(HostAllowList::new(hosts));
        self
    }

    /// Timeout of a single request to a review server.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn try_build(self) -> Result<CrossDeps, Box<dyn Error>> {
        let Self {
            allowed_hosts,
            timeout,
        } = self;

        let allowed_hosts = allowed_hosts.unwrap_or_default();
        if allowed_hosts.is_empty() {
            return Err("The allowed hosts list is empty".into());
        }

        let client = GerritClient::new(allowed_hosts, timeout.unwrap_or(DEFAULT_TIMEOUT))?;

        Ok(CrossDeps { client })
    }
}
