use clap::Parser;
use log::info;
use simple_logger::init_with_level;

use gbconvert::cli::{run, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_with_level(args.level)?;
    info!("Starting gbconvert with args: {}", args);

    run(&args)
}
