use anyhow::Context;
use clap::Parser;
use rawtiff::{cli, logger};

fn main() -> anyhow::Result<()> {
    logger::init();

    let args = cli::ConvertImgArgs::parse();
    let input = args.input.clone();
    cli::run_single(args).with_context(|| format!("failed to convert {}", input.display()))?;

    Ok(())
}
