//! lvc CLI - Command line interface for the lvc object store
//!
//! Only `init`, `writeblob` and `readblob` touch the repository. The other
//! version-control commands are reserved names that report they are not
//! implemented yet.

use anyhow::Context;
use clap::{Parser, Subcommand};
use lvc::{ObjectId, ObjectStore, StoreConfig};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lvc")]
#[command(about = "Little Version Control")]
#[command(version)]
struct Cli {
    /// Path to the repository directory
    #[arg(short, long, default_value = lvc::DEFAULT_ROOT)]
    root: PathBuf,

    /// Output format for status reports (json or text)
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// zlib compression level for new objects
    #[arg(long, default_value_t = lvc::config::DEFAULT_COMPRESSION_LEVEL,
          value_parser = clap::value_parser!(u32).range(0..=9))]
    compression_level: u32,

    /// fsync each object before publishing it
    #[arg(long)]
    fsync: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new repository
    #[command(alias = "i")]
    Init,

    /// Store a file as a blob and print its id
    #[command(name = "writeblob")]
    WriteBlob {
        /// File to store
        filename: PathBuf,
    },

    /// Print a stored blob, or write it to a file
    #[command(name = "readblob")]
    ReadBlob {
        /// Object id
        id: String,
        /// Write the content here instead of stdout
        outfile: Option<PathBuf>,
    },

    // === Reserved, not implemented ===
    /// Manage branches (not implemented)
    #[command(alias = "b")]
    Branch,

    /// Record a commit (not implemented)
    #[command(aliases = ["com", "checkin"])]
    Commit,

    /// Show or edit configuration (not implemented)
    #[command(alias = "con")]
    Config,

    /// Show commit history (not implemented)
    #[command(aliases = ["h", "log"])]
    History,

    /// Show working tree status (not implemented)
    #[command(alias = "s")]
    Status,
}

#[derive(Serialize)]
struct InitReport {
    status: &'static str,
    root: String,
    created: bool,
}

#[derive(Serialize)]
struct WriteReport {
    status: &'static str,
    id: ObjectId,
}

#[derive(Serialize)]
struct ReadReport<'a> {
    status: &'static str,
    id: &'a str,
    path: String,
    size: usize,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout may carry raw blob content.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("LVC_LOG")
                .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Little Version Control v{}", lvc::VERSION);
        return Ok(());
    };

    let config = StoreConfig::builder()
        .compression_level(cli.compression_level)
        .fsync(cli.fsync)
        .build();
    let store = ObjectStore::with_config(&cli.root, config);

    match command {
        Commands::Init => {
            let created = !store.is_initialized();
            if created && has_other_entries(&cli.root) {
                eprintln!(
                    "note: {} is not empty; creating the repository anyway",
                    parent_dir(&cli.root).display()
                );
            }
            ObjectStore::init(&cli.root)?;
            let root = cli.root.display().to_string();
            let text = if created {
                format!("Initialized empty lvc repository in {}", root)
            } else {
                format!("lvc repository already exists in {}", root)
            };
            output(
                cli.format,
                &text,
                &InitReport {
                    status: "ok",
                    root,
                    created,
                },
            )?;
        }

        Commands::WriteBlob { filename } => {
            let id = store.write_blob_file(&filename)?;
            output(cli.format, &id.to_hex(), &WriteReport { status: "ok", id })?;
        }

        Commands::ReadBlob { id, outfile } => match outfile {
            Some(path) => {
                let size = store.read_blob_to(&id, &path)?;
                output(
                    cli.format,
                    &format!("Wrote {} bytes to {}", size, path.display()),
                    &ReadReport {
                        status: "ok",
                        id: &id,
                        path: path.display().to_string(),
                        size,
                    },
                )?;
            }
            None => {
                let payload = store.read_blob(&id)?;
                let mut stdout = std::io::stdout().lock();
                stdout
                    .write_all(&payload)
                    .and_then(|_| stdout.flush())
                    .context("failed to write blob to stdout")?;
            }
        },

        Commands::Branch => not_implemented("branch"),
        Commands::Commit => not_implemented("commit"),
        Commands::Config => not_implemented("config"),
        Commands::History => not_implemented("history"),
        Commands::Status => not_implemented("status"),
    }

    Ok(())
}

/// Directory the repository root lives in
fn parent_dir(root: &Path) -> &Path {
    match root.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Whether the directory holding `root` contains anything besides `root`
fn has_other_entries(root: &Path) -> bool {
    let name = root.file_name();
    std::fs::read_dir(parent_dir(root))
        .map(|entries| {
            entries
                .flatten()
                .any(|entry| Some(entry.file_name().as_os_str()) != name)
        })
        .unwrap_or(false)
}

fn not_implemented(name: &str) {
    eprintln!("{}: not yet implemented", name);
}

fn output(format: OutputFormat, text: &str, value: &impl Serialize) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => println!("{}", text),
    }
    Ok(())
}
