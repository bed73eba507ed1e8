use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use scribe::{document_stats, EditSession, PluginOutcome, PluginRegistry};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// A headless line editor: load a document, run plugins, save the result
#[derive(Parser, Debug)]
#[command(name = "scribe")]
#[command(about = "A line-oriented text processor with undo-aware plugins", long_about = None)]
#[command(version)]
struct Args {
    /// File to load. Use "-" or omit to read stdin.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Apply a named plugin to the document (repeatable, applied in order)
    #[arg(long, value_name = "NAME")]
    plugin: Vec<String>,

    /// List available plugins and exit
    #[arg(long)]
    list_plugins: bool,

    /// Print document statistics instead of the document
    #[arg(long)]
    stats: bool,

    /// Emit statistics as JSON
    #[arg(long, requires = "stats")]
    json: bool,

    /// Write the resulting document to PATH instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to a log file for diagnostics (default: stderr, filtered by RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_tracing(log_file: Option<&Path>) -> AnyhowResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("scribe=warn"))
        .unwrap_or_default();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact();
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            builder.with_writer(Arc::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// Reads the document from a file or stdin, normalizing Windows line
/// endings; the model is `\n` separated.
fn read_document(file: Option<&Path>) -> AnyhowResult<String> {
    let raw = match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        _ => io::read_to_string(io::stdin()).context("failed to read stdin")?,
    };
    Ok(raw.replace("\r\n", "\n"))
}

/// Writes the document exactly as saved: lines joined by `\n`, no trailing
/// separator added.
fn write_document(session: &EditSession, output: Option<&Path>) -> AnyhowResult<()> {
    let contents = session.contents();
    match output {
        Some(path) => std::fs::write(path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            io::stdout()
                .lock()
                .write_all(contents.as_bytes())
                .context("failed to write to stdout")?;
        }
    }
    Ok(())
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let registry = PluginRegistry::with_builtins();
    if args.list_plugins {
        for plugin in registry.iter() {
            println!("{:12} {}", plugin.name(), plugin.description());
        }
        return Ok(());
    }

    let text = read_document(args.file.as_deref())?;
    let mut session = EditSession::from_text(&text);
    tracing::info!("loaded {} lines", session.buffer().line_count());

    for name in &args.plugin {
        let plugin = registry
            .get(name)
            .with_context(|| format!("unknown plugin '{}' (try --list-plugins)", name))?;
        tracing::info!("running plugin '{}'", name);
        match session.run_plugin(plugin)? {
            // Reports go to stderr so stdout stays the document.
            PluginOutcome::Report(report) => eprintln!("{report}"),
            PluginOutcome::Done => {}
        }
    }

    if args.stats {
        let stats = document_stats(session.buffer());
        if args.json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!(
                "Line count: {}\nWord count: {}\nLetter count: {}",
                stats.lines, stats.words, stats.letters
            );
        }
        // With --stats the document itself is only written on request.
        if args.output.is_some() {
            write_document(&session, args.output.as_deref())?;
        }
        return Ok(());
    }

    write_document(&session, args.output.as_deref())?;
    Ok(())
}
