//! Command-line interfaces for the `select-reference` and `merge-failed` binaries.
//!
//! ## Usage
//!
//! ```text
//! # Pick references for a sample (pipeline-style flags)
//! select-reference -bbmap_covstats S1_covstats.tsv -raw_reads 120000 \
//!     -trimmed_reads 118500 -b S1 -m 3 -p 70
//!
//! # Same, with a JSON summary of the decision on stdout
//! select-reference --bbmap-covstats S1_covstats.tsv --raw-reads 120000 \
//!     --trimmed-reads 118500 -b S1 --summary json
//!
//! # Add failed samples to the run summary
//! merge-failed run_summary.tsv failed_assemblies.tsv
//! ```

use std::ffi::OsString;

use tracing_subscriber::EnvFilter;

pub mod merge;
pub mod select;

/// Long flags that pipelines pass with a single dash (`-raw_reads 100`)
pub const LEGACY_LONG_FLAGS: [&str; 3] = ["bbmap_covstats", "raw_reads", "trimmed_reads"];

/// Format for the optional decision summary on stdout
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Rewrite single-dash long flags (`-raw_reads`, `-raw_reads=5`) to their
/// double-dash form so clap does not read them as bundled short flags.
pub fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(s) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = s.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split('=').next().unwrap_or(rest);
            if LEGACY_LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{s}"))
            } else {
                arg
            }
        })
        .collect()
}

/// Initialize logging based on the verbosity flag. Logs go to stderr.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("ref_selector=debug,info")
    } else {
        EnvFilter::new("ref_selector=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
