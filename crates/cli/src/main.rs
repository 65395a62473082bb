//! mailcomb entrypoint.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use mailcomb_engine::{AttributeReport, RenderOpts};
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "mailcomb", version, about = "Compile MJML to responsive email HTML")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile an MJML file (the default subcommand).
    Compile(CompileArgs),
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Input MJML file.
    input: PathBuf,
    /// Write the HTML here instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,
    /// Strict mode: invalid attributes fail the compile.
    #[arg(short = 's', long = "strict")]
    strict: bool,
    /// Emit debug attributes and print attribute reports as JSON lines.
    #[arg(long)]
    debug: bool,
    /// Memoize parsed trees in the process-wide AST cache.
    #[arg(long)]
    cache: bool,
    /// Cache entry TTL (`30s`, `5m`, `2h`, or bare seconds).
    #[arg(long = "cache-ttl", value_parser = parse_duration)]
    cache_ttl: Option<Duration>,
    /// Cache sweep interval (same formats as --cache-ttl).
    #[arg(long = "cache-cleanup-interval", value_parser = parse_duration)]
    cache_cleanup_interval: Option<Duration>,
}

/// Parses `30s` / `5m` / `2h` / bare-seconds duration flags.
fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let (number, scale) = match value.as_bytes().last() {
        Some(b's') => (&value[..value.len() - 1], 1),
        Some(b'm') => (&value[..value.len() - 1], 60),
        Some(b'h') => (&value[..value.len() - 1], 3600),
        _ => (value, 1),
    };
    let seconds: u64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration: {value:?}"))?;
    Ok(Duration::from_secs(seconds * scale))
}

/// `mailcomb input.mjml` works without naming the subcommand; anything
/// that is not a known subcommand or a global flag gets routed through
/// `compile`.
fn with_default_subcommand(mut args: Vec<OsString>) -> Vec<OsString> {
    const KNOWN: &[&str] = &["compile", "help", "-h", "--help", "-V", "--version"];
    if let Some(first) = args.get(1) {
        let first = first.to_string_lossy();
        if !KNOWN.contains(&first.as_ref()) {
            args.insert(1, OsString::from("compile"));
        }
    }
    args
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse_from(with_default_subcommand(std::env::args_os().collect()));
    let Command::Compile(args) = cli.command;
    if let Err(err) = run(&args) {
        eprintln!("mailcomb: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: &CompileArgs) -> Result<()> {
    let source = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    info!(target: "cli", input = %args.input.display(), bytes = source.len(), "compile");

    let reports: Arc<Mutex<Vec<AttributeReport>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&reports);
    let opts = RenderOpts {
        debug_tags: args.debug,
        invalid_attribute_reporter: Some(Arc::new(move |report| {
            sink.lock().expect("report sink poisoned").push(report);
        })),
        ..Default::default()
    };

    let html = if args.cache {
        let cache = mailcomb_core::global_cache();
        if let Some(ttl) = args.cache_ttl {
            cache.set_ttl_once(ttl);
        }
        if let Some(interval) = args.cache_cleanup_interval {
            cache.set_cleanup_interval_once(interval);
        }
        let tree = cache.parse(&source)?;
        debug!(target: "cli", entries = cache.len(), "ast cache consulted");
        mailcomb_engine::render_tree(&tree, opts)?
    } else {
        mailcomb_engine::render(&source, opts)?
    };

    let reports = reports.lock().expect("report sink poisoned");
    if args.debug {
        for report in reports.iter() {
            eprintln!(
                "{}",
                serde_json::to_string(report).expect("report serializes")
            );
        }
    }
    if args.strict && !reports.is_empty() {
        bail!("{} invalid attribute(s), failing due to --strict", reports.len());
    }

    match &args.output {
        Some(path) => std::fs::write(path, &html)
            .with_context(|| format!("writing {}", path.display()))?,
        None => print!("{html}"),
    }
    Ok(())
}
