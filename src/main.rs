use anyhow::Result;
use clap::{Parser, Subcommand};
use git_info::areas::history::JsonHistory;
use git_info::areas::repository::Repository;
use git_info::commands::porcelain::log::LogOptions;
use git_info::config::Config;
use git_info::errors::GitInfoError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code for a refresh that found nothing new
const NO_CHANGE_EXIT_CODE: u8 = 2;

#[derive(Parser)]
#[command(
    name = "git-info",
    version = "0.1.0",
    about = "Read the HEAD commit of a git directory",
    long_about = "Reads HEAD of a .git directory without invoking git: resolves the ref, \
    inflates the commit object and reports its hash, branch, date, title, description \
    and latest release tag. Refreshes can be recorded to a JSON history file.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(long, global = true, env = "GIT_INFO_CONFIG", help = "Path to a TOML config file")]
    config: Option<PathBuf>,

    #[arg(long, global = true, env = "GIT_INFO_DIR", help = "Path to the .git directory")]
    git_dir: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        env = "GIT_INFO_TIMEZONE",
        help = "Timezone override as ±HHMM; empty uses the author's timezone"
    )]
    timezone: Option<String>,

    #[arg(long, global = true, env = "GIT_INFO_HISTORY", help = "Path to the history file")]
    history: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "refresh",
        about = "Record the current HEAD commit",
        long_about = "Reads HEAD and appends it to the history file. \
        Exits with status 2 if HEAD has not changed since the last recorded refresh."
    )]
    Refresh,
    #[command(
        name = "show",
        about = "Print the current HEAD commit without recording it"
    )]
    Show,
    #[command(name = "log", about = "List recorded refreshes, newest first")]
    Log {
        #[arg(long, help = "Show one record per line")]
        oneline: bool,
        #[arg(short = 'n', long, help = "Limit the number of records")]
        max_count: Option<usize>,
    },
    #[command(name = "rev-parse", about = "Print the commit HEAD resolves to and its branch")]
    RevParse,
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "Prints the decoded payload of an object in the repository. \
        It requires the SHA of the object to be specified."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<GitInfoError>() {
            Some(GitInfoError::NoChange(hash)) => {
                eprintln!("Already up to date at {}", hash);
                ExitCode::from(NO_CHANGE_EXIT_CODE)
            }
            _ => {
                eprintln!("error: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?.with_overrides(
        cli.git_dir,
        cli.timezone,
        cli.history,
    )?;
    let repository = Repository::from_config(&config, Box::new(std::io::stdout()));

    match cli.command {
        Commands::Refresh => {
            let mut history = JsonHistory::new(config.history_path.clone().into_boxed_path());
            repository.record_refresh(&mut history, &config.timezone)?
        }
        Commands::Show => repository.show(&config.timezone)?,
        Commands::Log { oneline, max_count } => {
            let history = JsonHistory::new(config.history_path.clone().into_boxed_path());
            repository.log(&history, &LogOptions { oneline, max_count })?
        }
        Commands::RevParse => repository.rev_parse()?,
        Commands::CatFile { sha } => repository.cat_file(&sha)?,
    }

    Ok(())
}
