mod bootstrap;
mod cli;
mod commands;

pub(crate) use bootstrap::init_tracing;
pub(crate) use commands::{run, CliError};
