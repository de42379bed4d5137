mod commands;
mod helpers;

use clap::Parser;
use hydroini_core::domain::{IniError, IniErrorCategory};
use std::path::PathBuf;

pub fn run_from_env() -> i32 {
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error.diagnostic_line());
            eprintln!("{}", error.fatal_exit_line());
            error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("hydroini".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();

    match Cli::try_parse_from(&full_args) {
        Ok(cli) => {
            helpers::init_logging(&cli.global.log_level);
            dispatch_parsed(cli.command, &cli.global)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "hydroini",
    version,
    about = "Read, check and rewrite INI model input files"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Args)]
pub(crate) struct GlobalArgs {
    /// JSON profile with reader and writer settings
    #[arg(long, global = true)]
    profile: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Skip `#` comment lines inside sections instead of rejecting them
    #[arg(long, global = true)]
    ignore_comment_lines: bool,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Parse a file and print it as JSON
    Parse(commands::ParseArgs),
    /// Parse files or directory trees and report format errors
    Check(commands::CheckArgs),
    /// Rewrite a file in the canonical column layout
    Format(commands::FormatArgs),
    /// Print a property value
    Get(commands::GetArgs),
}

fn dispatch_parsed(command: CliCommand, global: &GlobalArgs) -> Result<i32, CliError> {
    let profile = helpers::load_profile(global)?;
    match command {
        CliCommand::Parse(args) => commands::run_parse_command(args, &profile),
        CliCommand::Check(args) => commands::run_check_command(args, &profile),
        CliCommand::Format(args) => commands::run_format_command(args, &profile),
        CliCommand::Get(args) => commands::run_get_command(args, &profile),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Ini(#[from] IniError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn category(&self) -> IniErrorCategory {
        match self {
            Self::Usage(_) => IniErrorCategory::InputValidationError,
            Self::Ini(error) => error.category(),
            Self::Internal(_) => IniErrorCategory::InternalError,
        }
    }

    fn placeholder(&self) -> &'static str {
        match self {
            Self::Usage(_) => "INPUT.CLI_USAGE",
            Self::Ini(error) => error.placeholder(),
            Self::Internal(_) => "SYS.CLI",
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }

    pub fn fatal_exit_line(&self) -> String {
        match self {
            Self::Ini(error) => error.fatal_exit_line(),
            _ => format!("FATAL EXIT CODE: {}", self.exit_code()),
        }
    }

    pub fn diagnostic_line(&self) -> String {
        match self {
            Self::Internal(error) => format!("ERROR: [{}] {error:#}", self.placeholder()),
            _ => format!("ERROR: [{}] {}", self.placeholder(), self.to_string().trim_end()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, run};
    use hydroini_core::domain::{FormatErrorKind, IniError};

    #[test]
    fn usage_errors_map_to_input_exit_code() {
        let error = run(["frobnicate"]).expect_err("unknown command should fail");
        assert!(matches!(error, CliError::Usage(_)));
        assert_eq!(error.exit_code(), 2);
        assert!(error.diagnostic_line().starts_with("ERROR: [INPUT.CLI_USAGE]"));
        assert_eq!(error.fatal_exit_line(), "FATAL EXIT CODE: 2");
    }

    #[test]
    fn help_is_not_an_error() {
        assert_eq!(run(["--help"]).expect("help should succeed"), 0);
    }

    #[test]
    fn ini_errors_keep_their_placeholder() {
        let error = CliError::from(IniError::format(
            FormatErrorKind::MalformedProperty,
            9,
            "model.mdu",
        ));
        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.INI_PROPERTY] invalid key/value line on line 9 of file 'model.mdu'"
        );
    }

    #[test]
    fn internal_errors_exit_with_system_code() {
        let error = CliError::from(anyhow::anyhow!("serializer failed"));
        assert_eq!(error.exit_code(), 5);
        assert_eq!(error.diagnostic_line(), "ERROR: [SYS.CLI] serializer failed");
        assert_eq!(error.fatal_exit_line(), "FATAL EXIT CODE: 5");
    }
}
