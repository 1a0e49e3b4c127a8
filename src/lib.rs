pub mod cli;
pub mod config;
pub mod fetch;
pub mod gerrit;
pub mod model;
pub mod resolver;
pub mod trailer;

mod api;

pub use api::{CrossDeps, CrossDepsBuilder, ResolveError};
