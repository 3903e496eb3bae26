use crate::checks::{run_identifier_check, run_identifier_validate, run_intake_check};
use crate::checks::{IdentifierCheckArgs, IdentifierValidateArgs, IntakeCheckArgs};
use crate::demo::{run_demo, DemoArgs};
use crate::server;
use brokerage_intake::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Brokerage Contract Intake",
    about = "Validate and accept brokerage contract intake forms",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Check NIP, PESEL, REGON and KRS numbers
    Identifiers {
        #[command(subcommand)]
        command: IdentifierCommand,
    },
    /// Validate intake form drafts stored as JSON
    Intake {
        #[command(subcommand)]
        command: IntakeCommand,
    },
    /// Walk through validation, progress and submission with sample clients
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum IdentifierCommand {
    /// Validate a single identifier
    Validate(IdentifierValidateArgs),
    /// Validate every row of a `kind,value[,reference]` CSV file
    Check(IdentifierCheckArgs),
}

#[derive(Subcommand, Debug)]
enum IntakeCommand {
    /// Print the issues of a draft or its validated record
    Check(IntakeCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Identifiers {
            command: IdentifierCommand::Validate(args),
        } => run_identifier_validate(args),
        Command::Identifiers {
            command: IdentifierCommand::Check(args),
        } => run_identifier_check(args),
        Command::Intake {
            command: IntakeCommand::Check(args),
        } => run_intake_check(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_defaults_to_serve() {
        let cli = Cli::try_parse_from(["brokerage-intake-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn identifier_validate_parses_kind() {
        let cli = Cli::try_parse_from([
            "brokerage-intake-api",
            "identifiers",
            "validate",
            "--kind",
            "pesel",
            "44051401359",
        ])
        .expect("parses");
        assert!(matches!(
            cli.command,
            Some(Command::Identifiers {
                command: IdentifierCommand::Validate(_)
            })
        ));
    }
}
