use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "mode2anim", version)]
struct Cli {
    /// Log per-file progress and encoder details.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a single GIF.
    Convert(ConvertArgs),
    /// Convert every GIF in a directory.
    Batch(BatchArgs),
    /// Print the palette header of an existing artifact as JSON.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input GIF.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory the artifact is written to.
    #[arg(long, default_value = "mode2")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory containing `*.gif` sources.
    #[arg(long, default_value = "gifs")]
    in_dir: PathBuf,

    /// Directory artifacts are written to.
    #[arg(long, default_value = "mode2")]
    out_dir: PathBuf,

    /// Convert files in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Print the batch report as JSON on stdout.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Artifact to read.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    match mode2anim::convert_file(&args.in_path, &args.out_dir)? {
        mode2anim::ConvertOutcome::Written { path, stats } => eprintln!(
            "wrote {} ({} frames, {} static + {} dynamic colours)",
            path.display(),
            stats.frame_count,
            stats.static_cycles,
            stats.dynamic_cycles
        ),
        mode2anim::ConvertOutcome::Skipped { path } => {
            eprintln!("skipped {} (already exists)", path.display())
        }
    }
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let opts = mode2anim::BatchOpts {
        parallel: args.parallel,
        threads: args.threads,
    };
    let report = mode2anim::convert_dir(&args.in_dir, &args.out_dir, &opts)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for outcome in &report.written {
            eprintln!("wrote {}", outcome.path().display());
        }
        for outcome in &report.skipped {
            eprintln!("skipped {}", outcome.path().display());
        }
    }
    for failed in &report.failed {
        eprintln!("mode2anim: {}: {}", failed.source.display(), failed.error);
    }

    if !report.is_success() {
        anyhow::bail!("{} of the source files failed to convert", report.failed.len());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let info = mode2anim::inspect_artifact_file(&args.in_path)?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
