use anyhow::Result;
use clap::{Parser, Subcommand};
use nbgit::areas::filesystem::DiskFileSystem;
use nbgit::areas::repository::Repository;
use nbgit::artifacts::core::config::RepositoryConfig;
use nbgit::errors::RepositoryError;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nbgit",
    version = "0.1.0",
    about = "A miniature version-control engine",
    long_about = "A small git-like version-control tool. It stores content-addressed objects, \
    a binary staging area, flat trees and commits, and branches checked out through HEAD.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command creates the metadata directory in the current directory, \
        or reinitializes an existing one."
    )]
    Init {
        #[arg(index = 1, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "This command stages files for the next commit. \
        Use '.' to stage every file in the working tree."
    )]
    Add {
        #[arg(index = 1, help = "The paths to stage")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Record the staged snapshot",
        long_about = "This command creates a new commit on the current branch with the specified message."
    )]
    Commit {
        #[arg(short, long, default_value = "", help = "The commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show the working tree status")]
    Status,
    #[command(name = "log", about = "Show the current branch's history")]
    Log,
    #[command(
        name = "branch",
        about = "List, create, or delete branches",
        long_about = "With no arguments, lists branches. With a name, creates a branch at the current commit. \
        With '-d <name>', deletes a branch."
    )]
    Branch {
        #[arg(index = 1, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    #[command(name = "switch", about = "Switch to another branch")]
    Switch {
        #[arg(index = 1, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    #[command(
        name = "clone",
        about = "Copy a repository into a new directory",
        long_about = "This command copies the metadata directory and working files of a local repository."
    )]
    CloneRepository {
        #[arg(index = 1, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let pwd = std::env::current_dir()?.canonicalize()?;
    let repository = Repository::new(
        &pwd,
        RepositoryConfig::from_env(),
        Arc::new(DiskFileSystem),
        Box::new(std::io::stdout()),
    );

    let outcome = match &cli.command {
        Commands::Init { args } => repository.init(args),
        Commands::Add { paths } => repository.add(paths),
        Commands::Commit { message } => repository.commit(message).map(|_| ()),
        Commands::Status => repository.status().map(|_| ()),
        Commands::Log => repository.log().map(|_| ()),
        Commands::Branch { args } => repository.branch(args),
        Commands::Switch { args } => repository.switch(args),
        Commands::CloneRepository { args } => repository.clone_repository(args),
    };

    if let Err(err) = outcome {
        exit_with(err);
    }

    Ok(())
}

fn exit_with(err: RepositoryError) -> ! {
    tracing::debug!(?err, "command failed");
    eprintln!("{err}");
    std::process::exit(err.exit_code());
}
