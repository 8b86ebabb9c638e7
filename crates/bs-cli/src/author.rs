use std::path::Path;

use bs_api::{HostConfig, ScenarioHost, ScenarioHostOptions};
use bs_authoring::empty_scenario;
use bs_core::Settings;

use crate::{
    emit_save, load_draft, load_scenario, save_scenario_file, AuthorArgs, AuthorCommand, CliError,
    SaveArgs,
};

pub(super) fn run_author(args: AuthorArgs, config: &HostConfig) -> Result<i32, CliError> {
    match args.command {
        AuthorCommand::Save(args) => run_save(args, config),
    }
}

pub(super) fn run_save(args: SaveArgs, config: &HostConfig) -> Result<i32, CliError> {
    let path = Path::new(&args.scenario);
    let current = if path.exists() {
        load_scenario(path, &config.limits())?
    } else {
        empty_scenario(Settings::default())
    };
    let draft = load_draft(Path::new(&args.draft))?;

    let host = ScenarioHost::new(ScenarioHostOptions {
        scenario_id: args.scenario.clone(),
        scenario: current,
        progress_store: None,
        event_sink: None,
        limits: Some(config.limits()),
    });
    let outcome = host.save_scenario(&draft);
    if outcome.success {
        save_scenario_file(path, &host.scenario())?;
    }
    emit_save(&outcome)
}
