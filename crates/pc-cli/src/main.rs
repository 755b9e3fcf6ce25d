//! prompt-compactor CLI - rule-based prompt compression over JSON datasets

use anyhow::Context;
use clap::{Parser, Subcommand};
use pc_batch::{
    load_compressed, mean_compression_rate, write_json_atomic, BatchProcessor, DatasetSource,
    FewShotBuilder, JsonFileSource,
};
use pc_core::{AggressivenessLevel, CompactorConfig};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "prompt-compactor")]
#[command(author, version, about = "Rule-based prompt compression", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Quiet mode (warnings only, no summary table)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress every question in a JSON array at one or all levels
    Compress {
        /// Input JSON file (array of {question, answer})
        input: PathBuf,
        /// Output prefix; files are written as {prefix}_{level}.json
        output_prefix: Option<String>,
        /// light, medium or aggressive; all three when omitted
        level: Option<AggressivenessLevel>,
        /// Apply the legacy phrase rewrites before filtering
        #[arg(long)]
        rewrite: bool,
        /// Records per checkpointed chunk
        #[arg(long)]
        checkpoint_every: Option<usize>,
        /// Worker threads (defaults to one per core)
        #[arg(long)]
        workers: Option<usize>,
        /// TOML config file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Build few-shot prompts from a question/answer dataset
    Fewshot {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, default_value_t = 5)]
        shots: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Only use the first N records
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Mean compression rate of a compressed output file
    Stats { file: PathBuf },

    /// Per-method accuracy of an evaluation results file
    Report { file: PathBuf },
}

struct CompressArgs {
    input: PathBuf,
    output_prefix: Option<String>,
    level: Option<AggressivenessLevel>,
    rewrite: bool,
    checkpoint_every: Option<usize>,
    workers: Option<usize>,
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for target in ["prompt_compactor", "pc_batch", "pc_eval"] {
        filter = filter.add_directive(format!("{target}={default_level}").parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Compress {
            input,
            output_prefix,
            level,
            rewrite,
            checkpoint_every,
            workers,
            config,
        } => cmd_compress(
            CompressArgs { input, output_prefix, level, rewrite, checkpoint_every, workers, config },
            cli.quiet,
        ),
        Commands::Fewshot { input, output, shots, seed, limit } => {
            cmd_fewshot(&input, &output, shots, seed, limit, cli.quiet)
        }
        Commands::Stats { file } => cmd_stats(&file),
        Commands::Report { file } => cmd_report(&file),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn build_config(args: CompressArgs) -> anyhow::Result<CompactorConfig> {
    let mut config = match &args.config {
        Some(path) => CompactorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CompactorConfig::default(),
    };
    config.io.input = args.input;
    if let Some(prefix) = args.output_prefix {
        config.io.output_prefix = prefix;
    }
    if let Some(level) = args.level {
        config.compression.levels = vec![level];
    }
    if args.rewrite {
        config.compression.rewrite = true;
    }
    if let Some(every) = args.checkpoint_every {
        config.batch.checkpoint_every = every;
    }
    if args.workers.is_some() {
        config.batch.workers = args.workers;
    }
    Ok(config)
}

fn cmd_compress(args: CompressArgs, quiet: bool) -> anyhow::Result<()> {
    let config = build_config(args)?;
    let input = config.io.input.clone();
    let processor = BatchProcessor::new(config).context("Invalid configuration")?;
    let summaries = processor
        .run()
        .with_context(|| format!("Compression of {} failed", input.display()))?;

    if !quiet {
        println!("{:<12} {:>9} {:>8} {:>10} {:>10} {:>9}", "level", "processed", "skipped", "original", "compressed", "reduction");
        for s in &summaries {
            println!(
                "{:<12} {:>9} {:>8} {:>10} {:>10} {:>8.1}%",
                s.level.as_str(),
                s.processed,
                s.skipped,
                s.stats.original_tokens,
                s.stats.compressed_tokens,
                s.reduction_pct()
            );
        }
        for s in &summaries {
            println!("Wrote {}", processor.config().output_path(s.level).display());
        }
    }
    Ok(())
}

fn cmd_fewshot(
    input: &Path,
    output: &Path,
    shots: usize,
    seed: u64,
    limit: Option<usize>,
    quiet: bool,
) -> anyhow::Result<()> {
    let mut source = JsonFileSource::new(input);
    if let Some(limit) = limit {
        source = source.with_limit(limit);
    }
    let records = source
        .load()
        .with_context(|| format!("Failed to load dataset {}", source.name()))?;
    let prompts = FewShotBuilder::new(shots, seed).build(&records);
    write_json_atomic(output, &prompts)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(output = %output.display(), prompts = prompts.len(), shots, seed, "Few-shot prompts written");
    if !quiet {
        println!("Wrote {} prompts to {}", prompts.len(), output.display());
    }
    Ok(())
}

fn cmd_stats(file: &Path) -> anyhow::Result<()> {
    let records = load_compressed(file)
        .with_context(|| format!("Failed to read compressed file {}", file.display()))?;
    match mean_compression_rate(&records) {
        Some(rate) => println!("Average compression rate: {rate:.4} over {} records", records.len()),
        None => println!("No records with tokens in {}", file.display()),
    }
    Ok(())
}

fn cmd_report(file: &Path) -> anyhow::Result<()> {
    let entries = pc_eval::load_entries(file)
        .with_context(|| format!("Failed to read evaluation file {}", file.display()))?;
    let summary = pc_eval::summarize(&entries);
    println!(
        "{:<12} {:>9} {:>7} {:>8} {:>6} {:>9} {:>11} {:>12}",
        "method", "attempted", "scored", "excluded", "errors", "accuracy", "mean_tokens", "mean_latency"
    );
    for m in &summary {
        println!(
            "{:<12} {:>9} {:>7} {:>8} {:>6} {:>8.1}% {:>11.1} {:>11.2}s",
            m.method,
            m.attempted,
            m.scored,
            m.excluded,
            m.errors,
            m.accuracy * 100.0,
            m.mean_tokens,
            m.mean_latency_secs
        );
    }
    Ok(())
}
