//! fix-locales
//!
//! Maintenance tool for the translation files under `locales/`.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use potluck_i18n::files::{check_file, fill_file, nest_file, read_locale};

#[derive(Parser)]
#[command(name = "fix-locales", about = "Repair and check potluck translation files")]
struct Cli {
    /// Report changes without writing files
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Turn flat "a.b.c" keys into nested objects
    Nest {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List keys missing from each file compared to the base language
    Check {
        #[arg(long)]
        base: PathBuf,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Copy missing keys from the base language into each file
    Fill {
        #[arg(long)]
        base: PathBuf,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if cli.dry_run {
        tracing::info!("Dry run, no files will be written");
    }

    match cli.command {
        Command::Nest { files } => {
            for path in &files {
                nest_file(path, cli.dry_run).with_context(|| format!("nesting {}", path.display()))?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { base, files } => {
            let base = read_locale(&base).with_context(|| format!("reading base {}", base.display()))?;
            let mut complete = true;
            for path in &files {
                let report = check_file(&base, path).with_context(|| format!("checking {}", path.display()))?;
                for key in &report.missing {
                    println!("{}: missing {}", path.display(), key);
                }
                for key in &report.extra {
                    println!("{}: extra {}", path.display(), key);
                }
                if !report.is_complete() {
                    tracing::warn!("{} is missing {} key(s)", path.display(), report.missing.len());
                    complete = false;
                }
            }
            Ok(if complete { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Command::Fill { base, files } => {
            let base = read_locale(&base).with_context(|| format!("reading base {}", base.display()))?;
            for path in &files {
                let filled = fill_file(&base, path, cli.dry_run).with_context(|| format!("filling {}", path.display()))?;
                for key in &filled {
                    println!("{}: filled {}", path.display(), key);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
