//! Interactive shell over an in-memory file system.
//!
//! Usage:
//!   vfs-tree                     # interactive session with prompts
//!   vfs-tree --no-prompt < cmds  # run piped commands, transcript only

use std::io::{self, BufWriter};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use vfs_tree::{DEFAULT_SENTINEL, FileSystemStore, Shell, ShellConfig};

/// In-memory file system shell
#[derive(Parser, Debug)]
#[command(name = "vfs-tree")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Do not print prompts or the content entry hint
    #[arg(long)]
    no_prompt: bool,

    /// Line that ends nwfiletxt/appendtxt input
    #[arg(long, default_value = DEFAULT_SENTINEL)]
    sentinel: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the session, logs go to stderr
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let config = if args.no_prompt {
        ShellConfig::quiet()
    } else {
        ShellConfig::default()
    }
    .with_sentinel(args.sentinel);

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    let mut shell = Shell::new(FileSystemStore::new(), stdin, stdout, config);
    shell.run()
}
