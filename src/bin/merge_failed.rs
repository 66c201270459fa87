use clap::Parser;

use ref_selector::cli::{self, merge::MergeArgs};

fn main() -> anyhow::Result<()> {
    let args = MergeArgs::parse();

    cli::init_logging(args.verbose);

    cli::merge::run(args)
}
