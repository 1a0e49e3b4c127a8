mod payload;

use std::time::Duration;

use log::{debug, trace};
use reqwest::{blocking::Client, StatusCode};
use thiserror::Error;

use crate::model::{
    change::{ChangeId, ChangeRecord},
    hosts::HostAllowList,
};

pub use payload::decode_change;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum GerritError {
    #[error("Host {host} is not in the allowed hosts list")]
    HostNotAllowed { host: String },
    #[error("HTTP error while fetching {url}: {source}")]
    Http { url: String, source: reqwest::Error },
    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: StatusCode,
    },
    #[error("Error while decoding change details from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

/// Blocking client for the Gerrit REST API, limited to the allowed hosts.
pub struct GerritClient {
    http: Client,
    hosts: HostAllowList,
}

impl GerritClient {
    pub fn new(hosts: HostAllowList, timeout: Duration) -> Result<GerritClient, reqwest::Error> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(GerritClient { http, hosts })
    }

    pub fn hosts(&self) -> &HostAllowList {
        &self.hosts
    }

    pub fn change_url(host: &str, change_id: &ChangeId) -> String {
        format!("https://{host}/changes/{change_id}?o=ALL_REVISIONS&o=ALL_COMMITS")
    }

    pub fn get_change(
        &self,
        host: &str,
        change_id: &ChangeId,
    ) -> Result<ChangeRecord, GerritError> {
        if !self.hosts.contains(host) {
            return Err(GerritError::HostNotAllowed {
                host: host.to_string(),
            });
        }

        let url = Self::change_url(host, change_id);
        debug!("Fetching change details from {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|source| GerritError::Http {
                url: url.clone(),
                source,
            })?;

        check_status(&url, response.status())?;

        let body = response.text().map_err(|source| GerritError::Http {
            url: url.clone(),
            source,
        })?;
        trace!("Received {} bytes from {}", body.len(), url);

        decode_change(&body).map_err(|source| GerritError::Decode { url, source })
    }
}

fn check_status(url: &str, status: StatusCode) -> Result<(), GerritError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(GerritError::Status {
            url: url.to_string(),
            status,
        })
    }
}
