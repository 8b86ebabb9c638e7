use bs_api::{EngineEvent, SaveOutcome, ViewState};
use bs_core::ResolvedMedia;

use crate::{map_cli_serialize, CliError, ViewEvent};

pub(crate) fn view_event(view: &ViewState) -> ViewEvent {
    if view.completed {
        ViewEvent::Completed
    } else {
        ViewEvent::Active
    }
}

pub(crate) fn emit_view(
    view: &ViewState,
    events: &[EngineEvent],
    state_out: Option<&str>,
) -> Result<(), CliError> {
    let view_json = serde_json::to_string(view).map_err(map_cli_serialize)?;
    let event_lines = events
        .iter()
        .map(serde_json::to_string)
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_cli_serialize)?;

    println!("RESULT:OK");
    match view_event(view) {
        ViewEvent::Active => println!("EVENT:ACTIVE"),
        ViewEvent::Completed => println!("EVENT:COMPLETED"),
    }
    println!("VIEW_JSON:{}", view_json);
    for line in event_lines {
        println!("EMIT_JSON:{}", line);
    }
    println!("STATE_OUT:{}", state_out.unwrap_or("NONE"));
    Ok(())
}

pub(crate) fn emit_save(outcome: &SaveOutcome) -> Result<i32, CliError> {
    let outcome_json = serde_json::to_string(outcome).map_err(map_cli_serialize)?;
    if outcome.success {
        println!("RESULT:OK");
    } else {
        println!("RESULT:REJECTED");
    }
    println!("SAVE_JSON:{}", outcome_json);
    Ok(if outcome.success { 0 } else { 1 })
}

pub(crate) fn emit_media(media: &ResolvedMedia) -> Result<i32, CliError> {
    let media_json = serde_json::to_string(media).map_err(map_cli_serialize)?;
    println!("RESULT:OK");
    println!("MEDIA_JSON:{}", media_json);
    Ok(0)
}
