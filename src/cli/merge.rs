use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::merge::failed::merge_failed_runs;

#[derive(Parser, Debug)]
#[command(name = "merge-failed")]
#[command(version)]
#[command(
    about = "Merge summary TSV files from samples failing alignment into the overall run report"
)]
pub struct MergeArgs {
    /// A TSV file containing all completed samples (appended to in place)
    pub run_summary: PathBuf,

    /// A TSV file containing all failed runs
    pub failed_run_tsv: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute the merge
///
/// # Errors
///
/// Returns an error if either table cannot be read or the run summary cannot
/// be appended to.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: MergeArgs) -> anyhow::Result<()> {
    let merged = merge_failed_runs(&args.run_summary, &args.failed_run_tsv).with_context(|| {
        format!(
            "Failed to merge {} into {}",
            args.failed_run_tsv.display(),
            args.run_summary.display()
        )
    })?;

    if args.verbose {
        eprintln!("Merged {merged} failed run(s)");
    }

    Ok(())
}
