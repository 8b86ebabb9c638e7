use std::ffi::OsString;
use std::path::Path;

use bs_api::HostConfig;
use clap::Parser;

mod agent;
mod author;
mod cli_args;
mod error_map;
mod logging;
mod media;
mod models;
mod output;
mod state_store;

pub(crate) use cli_args::{
    AgentArgs, AgentCommand, AuthorArgs, AuthorCommand, ChooseArgs, Cli, MediaArgs, MediaCommand,
    MediaKindArg, Mode, SaveArgs, StartArgs, StateArgs, TransitionArgs,
};
pub use error_map::CliError;
pub(crate) use error_map::{
    emit_error, map_cli_draft_invalid, map_cli_draft_read, map_cli_scenario_invalid,
    map_cli_scenario_read, map_cli_scenario_write, map_cli_serialize, map_cli_state_invalid,
    map_cli_state_read, map_cli_state_write,
};
pub(crate) use models::{ProgressStateV1, ViewEvent, PROGRESS_STATE_SCHEMA};
pub(crate) use output::{emit_media, emit_save, emit_view};
pub(crate) use state_store::{
    load_draft, load_progress_state, load_scenario, save_progress_state, save_scenario_file,
};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn load_config(path: Option<&str>) -> Result<HostConfig, CliError> {
    match path {
        Some(path) => Ok(HostConfig::load(Path::new(path))?),
        None => Ok(HostConfig::default()),
    }
}

fn run(cli: Cli) -> Result<i32, CliError> {
    let config = load_config(cli.config.as_deref())?;
    logging::init_logging(cli.verbose, &config.log_filter);

    match cli.command {
        Mode::Agent(args) => agent::run_agent(args, &config),
        Mode::Author(args) => author::run_author(args, &config),
        Mode::Media(args) => media::run_media(args),
    }
}
