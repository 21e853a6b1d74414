use clap::Parser;
use rawtiff::{cli, logger};

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = cli::ConvertImgsArgs::parse();
    let summary = cli::run_batch(args)?;

    if !summary.all_succeeded() {
        std::process::exit(1);
    }

    Ok(())
}
