use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Resolves cross-repository Depends-On chains between Gerrit changes.
#[derive(Debug, Parser)]
#[clap(version)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub cmd: Command,
    /// Location of the configuration file [default: $HOME/.crossdeps.toml]
    #[clap(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Review server that may be queried, replaces the configured list.
    /// Can be repeated; shorthands match the first host containing them.
    #[clap(short, long = "allowed-host", global = true)]
    pub allowed_hosts: Vec<String>,
    /// Timeout of a single request, in seconds
    #[clap(short, long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolves the changes a Gerrit change transitively depends on
    Resolve {
        /// Review server hosting the change, e.g. review.openstack.org
        host: String,
        /// Change-Id of the change, starting with I
        change_id: String,
        /// Revision (patchset commit) to resolve, the current one if omitted
        revision: Option<String>,
        /// Fail when not even the change itself can be resolved
        #[clap(long)]
        require_root: bool,
    },
    /// Converts a `project:branch:refspec^...` list of gated changes
    Gated {
        /// Review server the gated changes belong to
        host: String,
        changes: String,
    },
    /// Converts a `project:branch:path^...` list of local checkouts
    Local { changes: String },
}
