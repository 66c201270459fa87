use clap::Parser;

use ref_selector::cli::{self, select::SelectArgs};

fn main() -> anyhow::Result<()> {
    let args = SelectArgs::parse_from(cli::normalize_legacy_args(std::env::args_os()));

    cli::init_logging(args.verbose);

    cli::select::run(args)
}
