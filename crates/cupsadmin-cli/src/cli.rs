//! Argument parsing and command dispatch.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use cupsadmin_telemetry::{
    DEFAULT_LOG_LEVEL, GlobalContextGuard, LogFormat, LoggingConfig, init_logging,
};
use tracing::debug;

use crate::commands::conf::{handle_copy, handle_export, handle_fields, handle_get, handle_render};
use crate::commands::server::{handle_server_demo, handle_server_set, handle_server_show};
use crate::context::{CliResult, resolve_preferences_path};

/// Parses process arguments, executes the requested command, and returns the exit code.
#[must_use]
pub fn run() -> i32 {
    run_from(std::env::args_os())
}

/// Same as [`run`] with explicit arguments; the first item is the program name.
#[must_use]
pub fn run_from<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return err.exit_code();
        }
    };

    let logging = LoggingConfig {
        level: &cli.log_level,
        format: cli.log_format.into(),
        ..LoggingConfig::default()
    };
    if let Err(err) = init_logging(&logging) {
        debug!(error = %err, "tracing subscriber already installed");
    }
    let _context = GlobalContextGuard::new(cli.command.label());

    match dispatch(cli) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            err.exit_code()
        }
    }
}

fn dispatch(cli: Cli) -> CliResult<()> {
    match cli.command {
        Command::Render(args) => handle_render(&args),
        Command::Export(args) => handle_export(&args),
        Command::Copy(args) => handle_copy(&args),
        Command::Fields(args) => handle_fields(&args),
        Command::Get(args) => handle_get(&args),
        Command::Server(server) => {
            let prefs = resolve_preferences_path(cli.prefs)?;
            match server {
                ServerCommand::Show(args) => handle_server_show(&prefs, &args),
                ServerCommand::Set(args) => handle_server_set(&prefs, &args),
                ServerCommand::Demo(args) => handle_server_demo(&prefs, &args),
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "cupsadmin",
    version,
    about = "Edit a cupsd.conf document and manage print-server connection preferences"
)]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "CUPSADMIN_PREFS",
        value_name = "PATH",
        help = "Preference file (defaults to <config dir>/cupsadmin/preferences.json)"
    )]
    prefs: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        env = "CUPSADMIN_LOG",
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log filter directive; RUST_LOG takes precedence"
    )]
    log_level: String,
    #[arg(long, global = true, value_enum, default_value_t = LogFormatArg::Pretty)]
    log_format: LogFormatArg,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Print the cupsd.conf built from the stock document plus edits.
    Render(RenderArgs),
    /// Write cupsd.conf into a directory.
    Export(ExportArgs),
    /// Copy the rendered cupsd.conf to the system clipboard.
    Copy(EditArgs),
    /// List every editable field with its current value.
    Fields(FieldsArgs),
    /// Print the value of one field.
    Get(GetArgs),
    /// Manage stored print-server connection settings.
    #[command(subcommand)]
    Server(ServerCommand),
}

impl Command {
    const fn label(&self) -> &'static str {
        match self {
            Self::Render(_) => "render",
            Self::Export(_) => "export",
            Self::Copy(_) => "copy",
            Self::Fields(_) => "fields",
            Self::Get(_) => "get",
            Self::Server(ServerCommand::Show(_)) => "server.show",
            Self::Server(ServerCommand::Set(_)) => "server.set",
            Self::Server(ServerCommand::Demo(_)) => "server.demo",
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum ServerCommand {
    /// Show stored connection settings and status.
    Show(ServerShowArgs),
    /// Update stored connection settings.
    Set(ServerSetArgs),
    /// Switch demo mode on or off.
    Demo(DemoArgs),
}

// Edits applied on top of the stock document, in order.
#[derive(Args, Default, Debug)]
pub(crate) struct EditArgs {
    #[arg(
        long = "set",
        value_name = "KEY=VALUE",
        help = "Apply an edit; repeat to apply several (see `fields` for keys)"
    )]
    pub(crate) assignments: Vec<String>,
}

#[derive(Args, Default, Debug)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub(crate) edits: EditArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) output: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    #[command(flatten)]
    pub(crate) edits: EditArgs,
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub(crate) dir: PathBuf,
}

#[derive(Args, Default, Debug)]
pub(crate) struct FieldsArgs {
    #[command(flatten)]
    pub(crate) edits: EditArgs,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) output: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct GetArgs {
    /// Field key, for example `location.root.order`.
    pub(crate) key: String,
    #[command(flatten)]
    pub(crate) edits: EditArgs,
}

#[derive(Args, Default, Debug)]
pub(crate) struct ServerShowArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) output: OutputFormat,
}

#[derive(Args, Default, Debug)]
pub(crate) struct ServerSetArgs {
    #[arg(long, value_name = "HOST")]
    pub(crate) address: Option<String>,
    #[arg(long)]
    pub(crate) port: Option<String>,
    #[arg(long)]
    pub(crate) username: Option<String>,
    #[arg(long)]
    pub(crate) password: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    #[arg(value_enum)]
    pub(crate) state: Toggle,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub(crate) const fn enabled(self) -> bool {
        matches!(self, Self::On)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => Self::Pretty,
            LogFormatArg::Json => Self::Json,
        }
    }
}
