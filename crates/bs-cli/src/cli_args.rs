use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "bs-cli")]
#[command(about = "Branching scenario agent CLI")]
pub(crate) struct Cli {
    /// TOML host config.
    #[arg(long = "config", global = true)]
    pub(crate) config: Option<String>,
    #[arg(long = "verbose", short = 'v', global = true)]
    pub(crate) verbose: bool,
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Agent(AgentArgs),
    Author(AuthorArgs),
    Media(MediaArgs),
}

#[derive(Debug, Args)]
pub(crate) struct AgentArgs {
    #[command(subcommand)]
    pub(crate) command: AgentCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AgentCommand {
    Start(StartArgs),
    Choose(ChooseArgs),
    Undo(TransitionArgs),
    Reset(TransitionArgs),
    State(StateArgs),
}

#[derive(Debug, Args)]
pub(crate) struct StartArgs {
    #[arg(long = "scenario")]
    pub(crate) scenario: String,
    #[arg(long = "learner", default_value = "agent")]
    pub(crate) learner: String,
    #[arg(long = "state-out")]
    pub(crate) state_out: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct ChooseArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
    #[arg(long = "choice")]
    pub(crate) choice: usize,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
}

#[derive(Debug, Args)]
pub(crate) struct TransitionArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
    #[arg(long = "state-out")]
    pub(crate) state_out: String,
}

#[derive(Debug, Args)]
pub(crate) struct StateArgs {
    #[arg(long = "state-in")]
    pub(crate) state_in: String,
}

#[derive(Debug, Args)]
pub(crate) struct AuthorArgs {
    #[command(subcommand)]
    pub(crate) command: AuthorCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum AuthorCommand {
    Save(SaveArgs),
}

#[derive(Debug, Args)]
pub(crate) struct SaveArgs {
    /// Scenario file to update; created when missing.
    #[arg(long = "scenario")]
    pub(crate) scenario: String,
    #[arg(long = "draft")]
    pub(crate) draft: String,
}

#[derive(Debug, Args)]
pub(crate) struct MediaArgs {
    #[command(subcommand)]
    pub(crate) command: MediaCommand,
}

#[derive(Debug, Subcommand)]
pub(crate) enum MediaCommand {
    Resolve(ResolveArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum MediaKindArg {
    Image,
    Audio,
    Video,
    None,
}

#[derive(Debug, Args)]
pub(crate) struct ResolveArgs {
    #[arg(long = "kind", value_enum)]
    pub(crate) kind: MediaKindArg,
    #[arg(long = "url")]
    pub(crate) url: String,
    #[arg(long = "transcript")]
    pub(crate) transcript: Option<String>,
}
