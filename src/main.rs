use std::{error::Error, time::Duration};

use clap::Parser;
use env_logger::Target;

use crossdeps::{
    cli::{
        args::{CliArgs, Command},
        command_handlers::{do_gated, do_local, do_resolve},
    },
    config::CrossDepsConfig,
    CrossDepsBuilder,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(Target::Stderr)
        .init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli_args: CliArgs = CliArgs::parse();

    let mut out = std::io::stdout().lock();
    match cli_args.cmd {
        Command::Gated { host, changes } => do_gated(&host, &changes, &mut out),
        Command::Local { changes } => do_local(&changes, &mut out),
        Command::Resolve {
            host,
            change_id,
            revision,
            require_root,
        } => {
            let config = CrossDepsConfig::load(cli_args.config.as_deref())?;
            let mut builder = CrossDepsBuilder::from_config(config);
            if !cli_args.allowed_hosts.is_empty() {
                builder = builder.allowed_hosts(cli_args.allowed_hosts);
            }
            if let Some(timeout) = cli_args.timeout {
                builder = builder.timeout(Duration::from_secs(timeout));
            }
            let crossdeps = builder.try_build()?;

            do_resolve(
                &crossdeps,
                &host,
                &change_id,
                revision,
                require_root,
                &mut out,
            )
        }
    }
}
