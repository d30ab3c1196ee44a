// Command-line front end for pagedelta.
//
// Thin wrapper over the library: reads snapshot files, runs diff/apply,
// and persists the FileDiff wire shape as JSON. The library itself knows
// nothing about files or JSON.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::apply::apply;
use crate::diff::{DiffOptions, FileDiff, diff_with_options};
use crate::expand::expand_diff;
use crate::page::DEFAULT_PAGE_SIZE;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Page-aligned binary snapshot delta encoder/decoder.
#[derive(Parser, Debug)]
#[command(
    name = "pagedelta",
    version,
    about = "Page-aligned binary snapshot deltas",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compute the delta between two snapshot files.
    Diff(DiffArgs),
    /// Rebuild a target snapshot from a baseline and a delta.
    Apply(ApplyArgs),
    /// Print a per-page summary of a delta file.
    Info(InfoArgs),
}

#[derive(Args, Debug)]
struct DiffArgs {
    /// Baseline snapshot file.
    #[arg(value_hint = ValueHint::FilePath)]
    baseline: PathBuf,

    /// Target snapshot file.
    #[arg(value_hint = ValueHint::FilePath)]
    target: PathBuf,

    /// Output delta file (default: stdout). Identical inputs write `null`.
    #[arg(long, short = 'o', value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Page size in bytes; both file lengths must be exact multiples.
    #[arg(long = "page-size", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Mismatched-byte count that triggers whole-page replacement
    /// (default: half the page size).
    #[arg(long = "entire-page-threshold")]
    entire_page_threshold: Option<usize>,
}

#[derive(Args, Debug)]
struct ApplyArgs {
    /// Baseline snapshot file.
    #[arg(value_hint = ValueHint::FilePath)]
    baseline: PathBuf,

    /// Delta file produced by `pagedelta diff`.
    #[arg(value_hint = ValueHint::FilePath)]
    delta: PathBuf,

    /// Output file for the rebuilt target (default: stdout).
    #[arg(long, short = 'o', value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// Delta file produced by `pagedelta diff`.
    #[arg(value_hint = ValueHint::FilePath)]
    delta: PathBuf,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<Vec<u8>, i32> {
    std::fs::read(path).map_err(|e| {
        eprintln!("pagedelta: {}: {e}", path.display());
        1
    })
}

fn read_delta(path: &Path) -> Result<Option<FileDiff>, i32> {
    let bytes = read_file(path)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        eprintln!("pagedelta: {}: invalid delta: {e}", path.display());
        1
    })
}

/// Write `bytes` to `path`, or to stdout when no path is given. Existing
/// files are only overwritten with --force.
fn write_output(path: Option<&Path>, bytes: &[u8], force: bool) -> i32 {
    match path {
        Some(path) => {
            if path.exists() && !force {
                eprintln!(
                    "pagedelta: output file exists, use -f to overwrite: {}",
                    path.display()
                );
                return 1;
            }
            if let Err(e) = std::fs::write(path, bytes) {
                eprintln!("pagedelta: {}: {e}", path.display());
                return 1;
            }
            0
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if let Err(e) = out.write_all(bytes) {
                eprintln!("pagedelta: write: {e}");
                return 1;
            }
            0
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_diff(cli: &Cli, args: &DiffArgs) -> i32 {
    let baseline = match read_file(&args.baseline) {
        Ok(b) => b,
        Err(code) => return code,
    };
    let target = match read_file(&args.target) {
        Ok(b) => b,
        Err(code) => return code,
    };

    let opts = DiffOptions {
        page_size: args.page_size,
        entire_page_threshold: args
            .entire_page_threshold
            .unwrap_or(args.page_size / 2),
    };

    let delta = match diff_with_options(&baseline, &target, &opts) {
        Ok(delta) => delta,
        Err(e) => {
            eprintln!("pagedelta: diff: {e}");
            return 1;
        }
    };

    if cli.verbose > 0 && !cli.quiet {
        match &delta {
            Some(d) => eprintln!(
                "pagedelta: diff: {} of {} pages changed",
                d.changes().len(),
                d.page_count()
            ),
            None => eprintln!("pagedelta: diff: files are identical"),
        }
    }

    let mut json = match serde_json::to_vec(&delta) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("pagedelta: diff: serialize: {e}");
            return 1;
        }
    };
    json.push(b'\n');
    write_output(args.output.as_deref(), &json, cli.force)
}

fn cmd_apply(cli: &Cli, args: &ApplyArgs) -> i32 {
    let baseline = match read_file(&args.baseline) {
        Ok(b) => b,
        Err(code) => return code,
    };
    let delta = match read_delta(&args.delta) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let target = match &delta {
        // No-diff sentinel: the baseline already is the target.
        None => baseline,
        Some(d) => match apply(&baseline, d) {
            Ok(target) => target,
            Err(e) => {
                eprintln!("pagedelta: apply: {e}");
                return 1;
            }
        },
    };

    if cli.verbose > 0 && !cli.quiet {
        eprintln!("pagedelta: apply: rebuilt {} bytes", target.len());
    }
    write_output(args.output.as_deref(), &target, cli.force)
}

fn cmd_info(cli: &Cli, args: &InfoArgs) -> i32 {
    let delta = match read_delta(&args.delta) {
        Ok(d) => d,
        Err(code) => return code,
    };
    let expanded = match expand_diff(delta.as_ref()) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("pagedelta: info: {e}");
            return 1;
        }
    };

    match expanded {
        None => println!("no changes"),
        Some(expanded) => {
            println!(
                "page size {}, {} pages, {} changed",
                expanded.page_size,
                expanded.page_count,
                expanded.changes.len()
            );
            for page in &expanded.changes {
                let bytes: usize = page.commits.iter().map(|c| c.data.len()).sum();
                println!(
                    "  page {}: {} commit(s), {} byte(s)",
                    page.page_index,
                    page.commits.len(),
                    bytes
                );
                if cli.verbose > 0 {
                    for commit in &page.commits {
                        println!("    @{}: {}", commit.offset, commit.data_hex);
                    }
                }
            }
        }
    }
    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let exit_code = match &cli.command {
        Cmd::Diff(args) => cmd_diff(&cli, args),
        Cmd::Apply(args) => cmd_apply(&cli, args),
        Cmd::Info(args) => cmd_info(&cli, args),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
