//! Thin CLI wiring around [`tscore::engine::run_one`]: parses a left/right
//! root pair and a handful of policy flags, runs one base-pair through the
//! pipeline, and prints its plan. No attempt at a full flag grammar —
//! that is a separate collaborator's problem.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use logging_sink::{emit_all, ConsoleSink};
use model::{CompareVariant, SymlinkPolicy};
use resolve::SyncVariant;
use tscore::config::{BasePairConfig, FilterSpec};

/// Compares and resolves one left/right directory pair.
#[derive(Debug, Parser)]
#[command(name = "twinsync", version, about)]
struct Args {
    /// Left root directory.
    left: PathBuf,
    /// Right root directory.
    right: PathBuf,
    /// Which synchronization policy resolves directions.
    #[arg(long, value_enum, default_value_t = Variant::Mirror)]
    variant: Variant,
    /// Compare by content instead of by timestamp and size.
    #[arg(long)]
    by_content: bool,
    /// How symlinks are traversed and compared.
    #[arg(long, value_enum, default_value_t = Symlinks::Direct)]
    symlinks: Symlinks,
    /// Mtime tolerance, in seconds, before two timestamps count as different.
    #[arg(long, default_value_t = 2)]
    tolerance_secs: i64,
    /// Skip the directory lock on both roots.
    #[arg(long)]
    no_lock: bool,
    /// Glob patterns to include (if any given, only matches are traversed).
    #[arg(long = "include")]
    includes: Vec<String>,
    /// Glob patterns to exclude.
    #[arg(long = "exclude")]
    excludes: Vec<String>,
    /// Increase diagnostic detail; repeatable.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only report warnings and errors.
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Variant {
    Mirror,
    Update,
    TwoWay,
}

impl From<Variant> for SyncVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Mirror => Self::Mirror,
            Variant::Update => Self::Update,
            Variant::TwoWay => Self::TwoWay,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Symlinks {
    Direct,
    Follow,
    Exclude,
}

impl From<Symlinks> for SymlinkPolicy {
    fn from(symlinks: Symlinks) -> Self {
        match symlinks {
            Symlinks::Direct => Self::Direct,
            Symlinks::Follow => Self::Follow,
            Symlinks::Exclude => Self::Exclude,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let verbosity = if args.quiet {
        logging::Verbosity::Quiet
    } else {
        logging::Verbosity::from_level(args.verbose)
    };
    logging::init(verbosity);

    let config = BasePairConfig {
        id: 0,
        left_path: args.left,
        right_path: args.right,
        filter: FilterSpec { includes: args.includes, excludes: args.excludes },
        soft_filter: filters::SoftFilter::accept_all(),
        variant: if args.by_content { CompareVariant::Content } else { CompareVariant::TimestampAndSize },
        sync_variant: args.variant.into(),
        symlink_policy: args.symlinks.into(),
        tolerance_secs: args.tolerance_secs,
        ignored_time_shifts_minutes: Vec::new(),
        use_lock: !args.no_lock,
    };

    let sink = ConsoleSink::auto();
    match tscore::engine::run_one(&config) {
        Ok(report) => {
            emit_all(&sink, &report.messages);
            println!(
                "{} item(s) on the left, {} on the right, {} to sync, {} unresolved conflict(s)",
                report.comparison_stats.files_on_left + report.comparison_stats.folders_on_left,
                report.comparison_stats.files_on_right + report.comparison_stats.folders_on_right,
                report.stream.len(),
                report.unresolved_conflict_count,
            );
            for conflict in &report.conflicts {
                println!("conflict: {} ({})", conflict.name, conflict.description);
            }
            if report.unresolved_conflict_count > 0 {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(error) => {
            eprintln!("twinsync: {error}");
            ExitCode::FAILURE
        }
    }
}
