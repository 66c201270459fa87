use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::cli::OutputFormat;
use crate::core::report::{format_percent, Selection};
use crate::core::types::{Thresholds, DEFAULT_MIN_MEDIAN};
use crate::output::tsv::{truncate_failed_assembly, write_selection};
use crate::parsing::covstats::parse_covstats_file;
use crate::selection::engine::{ReferenceSelector, SampleReads};
use crate::selection::SelectionError;

#[derive(Parser, Debug)]
#[command(name = "select-reference")]
#[command(version)]
#[command(
    about = "Find the accession with the best BBMap coverage for each virus species (reference tag)"
)]
#[command(
    long_about = "Reads a BBMap covstats table and keeps every reference whose median fold coverage and covered percent reach the thresholds, one per reference tag.\n\nSelected references are appended to <basename>_refs.tsv. If none pass, the reference with the highest covered percent and the read distribution over tags are written to <basename>_failed_assembly.tsv instead."
)]
pub struct SelectArgs {
    /// BBMap covstats output file (plain or gzipped)
    #[arg(long = "bbmap_covstats", visible_alias = "bbmap-covstats", value_name = "FILE")]
    pub bbmap_covstats: PathBuf,

    /// Number of raw reads, used in reports for align-failed samples
    #[arg(long = "raw_reads", visible_alias = "raw-reads")]
    pub raw_reads: u64,

    /// Number of trimmed reads, used in reports for align-failed samples
    #[arg(long = "trimmed_reads", visible_alias = "trimmed-reads")]
    pub trimmed_reads: u64,

    /// Sample basename
    #[arg(short = 'b', long = "basename", value_name = "BASENAME")]
    pub basename: String,

    /// Minimum median fold coverage for a reference to be considered
    #[arg(
        short = 'm',
        long = "min-median",
        default_value_t = DEFAULT_MIN_MEDIAN,
        allow_negative_numbers = true
    )]
    pub min_median: i64,

    /// Minimum covered percent for a reference to be considered
    #[arg(
        short = 'p',
        long = "min-percent",
        default_value = "70",
        allow_negative_numbers = true
    )]
    pub min_percent: i64,

    /// Directory to write output files to (default: current directory)
    #[arg(long)]
    pub outdir: Option<PathBuf>,

    /// Print a summary of the decision to stdout
    #[arg(long, value_enum)]
    pub summary: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl SelectArgs {
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Percent thresholds are small integers
    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.min_median, self.min_percent as f64)
    }
}

/// Execute reference selection for one sample
///
/// # Errors
///
/// Returns an error if the covstats table cannot be read or parsed, if no
/// reference passes and the raw read count is zero, or if the output file
/// cannot be written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SelectArgs) -> anyhow::Result<()> {
    let records = parse_covstats_file(&args.bbmap_covstats).with_context(|| {
        format!(
            "Failed to read covstats table {}",
            args.bbmap_covstats.display()
        )
    })?;
    info!(
        "Loaded {} references from {}",
        records.len(),
        args.bbmap_covstats.display()
    );

    let selector = ReferenceSelector::new(args.thresholds());
    let sample = SampleReads::new(&args.basename, args.raw_reads, args.trimmed_reads);
    let selection = match selector.select(&records, &sample) {
        Ok(selection) => selection,
        Err(e @ SelectionError::ZeroRawReads) => {
            // The failed-assembly table is emptied even though no record can be written
            let path = truncate_failed_assembly(&args.basename, args.outdir.as_deref())
                .context("Failed to truncate failed assembly output")?;
            info!("Truncated {}", path.display());
            return Err(anyhow::Error::new(e)
                .context(format!("Reference selection failed for {}", args.basename)));
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Reference selection failed for {}", args.basename)));
        }
    };

    let path = write_selection(&selection, &args.basename, args.outdir.as_deref())
        .context("Failed to write selection output")?;
    info!("Wrote {}", path.display());

    match args.summary {
        Some(OutputFormat::Text) => print_text_summary(&selection),
        Some(OutputFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&selection)?);
        }
        None => {}
    }

    Ok(())
}

fn print_text_summary(selection: &Selection) {
    match selection {
        Selection::Selected { references } => {
            println!("Selected {} reference(s):", references.len());
            for r in references {
                println!("   {} ({}) {}", r.accession, r.tag, r.description);
            }
        }
        Selection::Failed { record } => {
            println!("No reference passed for {}", record.sample_name);
            println!("   Best covered: {}", record.best.ref_best_cov);
            println!(
                "   Covered percent: {}  Median coverage: {}",
                record.best.covered_percent, record.best.median_coverage
            );
            println!("   Reads distribution: {}", record.reads_distribution);
            println!(
                "   Reads: {} raw, {} trimmed ({}% removed)",
                record.raw_reads,
                record.trimmed_reads,
                format_percent(record.pct_reads_trimmed)
            );
        }
    }
}
