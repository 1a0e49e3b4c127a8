use std::{collections::HashMap, path::Path, time::Duration};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::{gerrit::DEFAULT_TIMEOUT, model::hosts::HostAllowList};

const DEFAULT_CONFIG_FILE: &str = ".crossdeps.toml";

pub struct CrossDepsConfig {
    pub allowed_hosts: HostAllowList,
    pub timeout: Duration,
}

impl CrossDepsConfig {
    /// Loads `$HOME/.crossdeps.toml` (or `file` when given) and `CROSSDEPS_*`
    /// environment variables, the latter taking precedence.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let file = match file {
            Some(file) => Some(FileSource::Required(file.to_path_buf())),
            None => home::home_dir()
                .map(|home| home.join(DEFAULT_CONFIG_FILE))
                .map(FileSource::Optional),
        };
        let raw_config = RawConfig::load(file.as_ref(), None)?;

        Ok(raw_config.into())
    }
}

impl From<RawConfig> for CrossDepsConfig {
    fn from(raw_config: RawConfig) -> Self {
        CrossDepsConfig {
            allowed_hosts: raw_config
                .hosts
                .allowed
                .map(HostAllowList::new)
                .unwrap_or_default(),
            timeout: raw_config
                .http
                .timeout
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
        }
    }
}

enum FileSource<P> {
    Required(P),
    Optional(P),
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct RawConfig {
    #[serde(default)]
    hosts: HostsConfig,
    #[serde(default)]
    http: HttpConfig,
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct HostsConfig {
    allowed: Option<Vec<String>>,
}

#[derive(Default, Debug, Deserialize, PartialEq, Eq)]
struct HttpConfig {
    timeout: Option<u64>,
}

impl RawConfig {
    fn load<P: AsRef<Path>>(
        file: Option<&FileSource<P>>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            let (path, required) = match file {
                FileSource::Required(path) => (path.as_ref(), true),
                FileSource::Optional(path) => (path.as_ref(), false),
            };
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }
        builder
            .add_source(
                Environment::with_prefix("CROSSDEPS")
                    .separator("_")
                    .list_separator(",")
                    .with_list_parse_key("hosts.allowed")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}
