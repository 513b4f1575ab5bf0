use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use is_terminal::IsTerminal;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::objects::commit::{Author, timestamp_from_env};
use twig::artifacts::objects::object::{Object, ObjectBox};
use twig::artifacts::objects::object_id::ObjectId;
use twig::artifacts::objects::object_type::ObjectType;
use twig::commands::porcelain::checkout::CheckoutOutcome;
use twig::commands::porcelain::commit::CommitOutcome;
use twig::commands::porcelain::init::COMMIT_MESSAGE_FILE;
use twig::config::RepositoryConfig;

const LOG_ENV: &str = "TWIG_LOG";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A tiny content-addressed version control system",
    long_about = "twig stores snapshots of a working directory as hashed objects, \
    links them into a linear commit history and moves between them with branches and tags.",
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
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "hash-object",
        about = "Store a file as a blob and print its id"
    )]
    HashObject {
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command prints the raw content of an object. \
        With --type, the object must be of that type."
    )]
    CatFile {
        #[arg(index = 1, help = "The object id to print")]
        oid: String,
        #[arg(short = 't', long = "type", help = "Expected object type (blob, tree, commit)")]
        expected_type: Option<String>,
    },
    #[command(
        name = "write-tree",
        about = "Store the working tree and print the root tree id"
    )]
    WriteTree,
    #[command(
        name = "restore-tree",
        about = "Overwrite the working tree with the content of a tree"
    )]
    RestoreTree {
        #[arg(index = 1)]
        oid: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command records the working tree as a new commit on the current branch. \
        Lines starting with '#' are dropped from the message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show commit history")]
    Log {
        #[arg(index = 1, help = "Commit id, branch or tag to start from (defaults to HEAD)")]
        revision: Option<String>,
    },
    #[command(
        name = "checkout",
        about = "Switch to a branch, tag or commit",
        long_about = "This command overwrites the working tree with the target commit. \
        Uncommitted changes are lost."
    )]
    Checkout {
        #[arg(short = 'b', help = "Create a new branch at HEAD and switch to it")]
        new_branch: bool,
        #[arg(index = 1)]
        target: String,
    },
    #[command(name = "tag", about = "List tags, or create one with -a")]
    Tag {
        #[arg(short = 'a', help = "Name of the tag to create at HEAD")]
        name: Option<String>,
    },
    #[command(name = "branch", about = "List branches")]
    Branch,
    #[command(name = "status", about = "Show the current branch and whether the working tree is clean")]
    Status,
}

fn main() -> Result<()> {
    init_tracing();
    colored::control::set_override(std::io::stdout().is_terminal());

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => path,
                None => std::env::current_dir()?,
            };
            let repository = Repository::new(RepositoryConfig::load(&path)?)?;

            repository.init()?;
            writeln!(
                stdout,
                "Initialized empty twig repository in {}",
                repository.config().metadata_dir().display()
            )?;
        }
        Commands::HashObject { file } => {
            let repository = open_repository()?;
            let data = std::fs::read(&file)
                .with_context(|| format!("Unable to read {}", file.display()))?;

            writeln!(stdout, "{}", repository.hash_object(&data, ObjectType::Blob)?)?;
        }
        Commands::CatFile { oid, expected_type } => {
            let repository = open_repository()?;
            let oid = ObjectId::try_parse(&oid)?;
            let expected_type = expected_type
                .map(|name| ObjectType::try_from(name.as_str()).map_err(anyhow::Error::msg))
                .transpose()?;

            match repository.read_object(&oid, expected_type)? {
                ObjectBox::Blob(blob) => stdout.write_all(blob.data())?,
                object => write!(stdout, "{}", object.display())?,
            }
        }
        Commands::WriteTree => {
            let repository = open_repository()?;

            writeln!(stdout, "{}", repository.write_tree()?)?;
        }
        Commands::RestoreTree { oid } => {
            let repository = open_repository()?;

            repository.restore_tree(&ObjectId::try_parse(&oid)?)?;
        }
        Commands::Commit { message } => {
            let repository = open_repository()?;
            let message_path = repository.config().metadata_dir().join(COMMIT_MESSAGE_FILE);
            std::fs::write(&message_path, &message)
                .with_context(|| format!("Unable to write {}", message_path.display()))?;

            let author = Author::load_from_env()?;
            let time = timestamp_from_env()?;

            match repository.commit(&message, author, time)? {
                CommitOutcome::Created {
                    oid,
                    branch,
                    is_root,
                    short_message,
                } => {
                    let root = if is_root { " (root-commit)" } else { "" };
                    writeln!(stdout, "[{branch}{root} {}] {short_message}", oid.to_short_oid())?;
                }
                CommitOutcome::NothingToCommit => {
                    writeln!(stdout, "nothing to commit, working tree clean")?;
                }
            }
        }
        Commands::Log { revision } => {
            let repository = open_repository()?;
            let mut commits = repository.log(revision.as_deref())?.peekable();

            if commits.peek().is_none() {
                writeln!(stdout, "no commits yet")?;
            }

            while let Some(entry) = commits.next() {
                let (oid, commit) = entry?;
                writeln!(stdout, "{}", format!("commit {oid}").yellow())?;
                writeln!(stdout, "{}", commit.display())?;

                if commits.peek().is_some() {
                    writeln!(stdout)?;
                }
            }
        }
        Commands::Checkout { new_branch, target } => {
            let repository = open_repository()?;

            if new_branch {
                let branch = repository.branch_out(&target)?;
                writeln!(stdout, "Switched to a new branch '{branch}'")?;
            } else {
                match repository.checkout(&target)? {
                    CheckoutOutcome::Branch { name, .. } => {
                        writeln!(stdout, "Switched to branch '{name}'")?;
                    }
                    CheckoutOutcome::Detached { oid } => {
                        writeln!(stdout, "HEAD is now at {}", oid.to_short_oid())?;
                    }
                }
            }
        }
        Commands::Tag { name } => {
            let repository = open_repository()?;

            match name {
                Some(name) => {
                    let (tag, oid) = repository.create_tag(&name)?;
                    writeln!(stdout, "Tagged {} as '{tag}'", oid.to_short_oid())?;
                }
                None => {
                    for tag in repository.list_tags()? {
                        writeln!(stdout, "{tag}")?;
                    }
                }
            }
        }
        Commands::Branch => {
            let repository = open_repository()?;
            let current = repository.current_branch()?;

            for branch in repository.list_branches()? {
                if Some(&branch) == current.as_ref() {
                    writeln!(stdout, "* {}", branch.to_string().green())?;
                } else {
                    writeln!(stdout, "  {branch}")?;
                }
            }
        }
        Commands::Status => {
            let repository = open_repository()?;

            writeln!(stdout, "{}", repository.status()?)?;
        }
    }

    Ok(())
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;

    Ok(Repository::open(RepositoryConfig::load(pwd)?)?)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
