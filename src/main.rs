use bitlet::areas::repository::Repository;
use bitlet::artifacts::core::PagerWriter;
use bitlet::errors::{self, BitletError};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "BITLET_LOG";
/// Set to disable paging of history output
const NO_PAGER_ENV: &str = "NO_PAGER";

#[derive(Parser)]
#[command(
    name = "bitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control system",
    long_about = "A small, local, single-user version-control system modeled on Git. \
    It tracks the files directly inside the repository directory in commits, \
    with branches, checkouts and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates a .bitlet directory in the current directory, \
        with a root commit on the master branch."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command snapshots the staged changes on top of HEAD \
        and advances the current branch."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(name = "rm", about = "Unstage a file, or stop tracking it")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "checkout <branch> switches to a branch. \
        checkout -- <file> restores a file from HEAD. \
        checkout <commit> -- <file> restores a file from the given commit."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit id when a file is given")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        files: Vec<String>,
    },
    #[command(name = "branch", about = "Create a branch pointing at HEAD")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Check out a commit and move the current branch to it")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

impl Commands {
    fn is_paged(&self) -> bool {
        matches!(self, Commands::Log | Commands::GlobalLog)
    }
}

fn main() -> ExitCode {
    init_tracing();

    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    let command = match parse_command() {
        Ok(command) => command,
        Err(error) => return report(error),
    };

    let result = if command.is_paged() && use_pager() {
        run_paged(command)
    } else {
        run(command, Box::new(std::io::stdout()))
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => report(error),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Operand mistakes are reported like any other usage error; clap keeps
/// `--help`, `--version` and unknown commands
fn parse_command() -> errors::Result<Commands> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => match error.kind() {
            ErrorKind::MissingRequiredArgument
            | ErrorKind::UnknownArgument
            | ErrorKind::TooManyValues
            | ErrorKind::WrongNumberOfValues => {
                return Err(BitletError::usage("Incorrect operands."));
            }
            _ => error.exit(),
        },
    };

    cli.command
        .ok_or_else(|| BitletError::usage("Please enter a command."))
}

fn use_pager() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os(NO_PAGER_ENV).is_none()
}

fn run_paged(command: Commands) -> errors::Result<()> {
    let pager = Pager::new();
    let writer = PagerWriter::new(pager.clone());

    run(command, Box::new(writer))?;
    minus::page_all(pager)
        .map_err(|error| BitletError::Internal(anyhow::anyhow!("pager failed: {error}")))?;

    Ok(())
}

fn run(command: Commands, writer: Box<dyn Write>) -> errors::Result<()> {
    let pwd = std::env::current_dir()?;

    let repository = match command {
        Commands::Init => Repository::new(&pwd, writer)?,
        _ => Repository::open(&pwd, writer)?,
    };

    match command {
        Commands::Init => repository.init()?,
        Commands::Add { file } => repository.add(&file)?,
        Commands::Commit { message } => {
            repository.commit(message.as_deref().unwrap_or_default())?;
        }
        Commands::Rm { file } => repository.rm(&file)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => {
            repository.find(&message)?;
        }
        Commands::Status => {
            repository.status()?;
        }
        Commands::Checkout { target, files } => match (target, files.as_slice()) {
            (Some(branch), []) => repository.checkout_branch(&branch)?,
            (revision, [file]) => repository.checkout_file(revision.as_deref(), file)?,
            _ => return Err(BitletError::usage("Incorrect operands.")),
        },
        Commands::Branch { name } => repository.branch(&name)?,
        Commands::RmBranch { name } => repository.rm_branch(&name)?,
        Commands::Reset { commit } => {
            repository.reset(&commit)?;
        }
        Commands::Merge { branch } => {
            repository.merge(&branch)?;
        }
    }

    repository.writer().flush()?;

    Ok(())
}

/// Domain errors are printed on stdout and still exit successfully
fn report(error: BitletError) -> ExitCode {
    if error.is_domain_error() {
        println!("{error}");
        ExitCode::SUCCESS
    } else {
        eprintln!("fatal: {error:#}");
        ExitCode::FAILURE
    }
}
