use std::{
    fs,
    io::{self, Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::Parser;
use colloquy_config::{SortingConfig, SortingConfigSource};
use colloquy_core::{
    SortingRegistry,
    thread::{assemble_tree, thread_depth},
};
use colloquy_model::Comment;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "colloquy-sort", about = "Order a comment thread")]
struct Cli {
    /// JSON array of comments; `-` reads standard input
    #[arg(long, default_value = "-")]
    input: PathBuf,
    /// Sorting config (TOML or JSON). Falls back to the environment and
    /// default file locations.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Sorter alias; the configured default when omitted
    #[arg(long)]
    sorter: Option<String>,
    /// Sort the comments as one flat list instead of a reply tree
    #[arg(long)]
    flat: bool,
    /// Emit the sorted tree in display order with depths
    #[arg(long, conflicts_with = "flat")]
    flatten: bool,
    /// Refuse reply chains deeper than this before building the tree
    #[arg(long, default_value = "512")]
    max_depth: NonZeroUsize,
    /// Print configured aliases and exit
    #[arg(long)]
    list: bool,
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let (config, source) = match &cli.config {
        Some(path) => (
            SortingConfig::load_from_file(path)?,
            SortingConfigSource::File(path.clone()),
        ),
        None => SortingConfig::load_from_env()?,
    };
    info!(source = ?source, "loaded sorting configuration");

    let registry: SortingRegistry<Comment> = config
        .build_registry()
        .context("invalid sorting configuration")?;

    if cli.list {
        let mut stdout = io::stdout().lock();
        for alias in registry.aliases() {
            let marker = if alias == registry.default_alias() { "*" } else { " " };
            writeln!(stdout, "{marker} {alias}")?;
        }
        return Ok(());
    }

    let comments = read_comments(&cli.input)?;
    let alias = cli.sorter.as_deref();
    info!(
        comments = comments.len(),
        sorter = alias.unwrap_or(registry.default_alias()),
        "sorting thread"
    );

    if cli.flat {
        let sorted = registry.sort_flat(alias, comments)?;
        return write_json(&sorted, cli.pretty);
    }

    let depth = thread_depth(&comments);
    if depth > cli.max_depth.get() {
        bail!(
            "thread is {depth} replies deep, more than --max-depth {}",
            cli.max_depth
        );
    }

    let tree = registry.sort_tree(alias, assemble_tree(comments))?;
    if cli.flatten {
        write_json(&tree.flatten(), cli.pretty)
    } else {
        write_json(&tree, cli.pretty)
    }
}

fn read_comments(input: &Path) -> Result<Vec<Comment>> {
    let raw = if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read comments from stdin")?;
        buf
    } else {
        fs::read_to_string(input)
            .with_context(|| format!("failed to read {}", input.display()))?
    };

    serde_json::from_str(&raw).context("comments must be a JSON array")
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}
