use std::env;
use std::io;

use anyhow::Context;
use one_brc::{Config, FileSource};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <measurements.txt>", args[0]);
        std::process::exit(1);
    }

    let source = FileSource::new(&args[1]);
    let config = Config::default();
    one_brc::run(&source, &config, io::stdout().lock())
        .with_context(|| format!("failed to aggregate {}", args[1]))?;
    Ok(())
}
