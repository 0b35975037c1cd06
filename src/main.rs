use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use categorical_bayes::{logging::init_logging, Delimiter, Session, TrainConfig};

#[derive(Debug, Parser)]
#[command(name = "categorical-bayes", version, about = "Categorical naive Bayes classifier")]
struct Args {
    /// Training file; the first non-empty line is the header
    #[arg(long, env = "BAYES_TRAIN")]
    train: PathBuf,

    /// Test file with the same columns as the training file
    #[arg(long, env = "BAYES_TEST")]
    test: PathBuf,

    /// Where to write the per-row predictions
    #[arg(long, env = "BAYES_OUTPUT")]
    output: PathBuf,

    /// Zero-based column of the class label
    #[arg(long, env = "BAYES_TARGET")]
    target: usize,

    /// Field separator: "space" or "comma"
    #[arg(long, env = "BAYES_DELIMITER", default_value = "space")]
    delimiter: Delimiter,

    /// Drop rows that repeat an earlier training row exactly
    #[arg(long)]
    drop_duplicates: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, env = "BAYES_LOG", default_value = "info")]
    log_level: String,
}

fn run(args: &Args) -> Result<()> {
    let config = TrainConfig::new(args.delimiter, args.target).keep_duplicates(!args.drop_duplicates);

    let mut session = Session::new();
    session
        .train(&args.train, config)
        .with_context(|| format!("training on {}", args.train.display()))?;
    session
        .classify(&args.test, args.delimiter)
        .with_context(|| format!("classifying {}", args.test.display()))?;
    let accuracy = session
        .evaluate(&args.output)
        .with_context(|| format!("writing report to {}", args.output.display()))?;

    println!("{}", accuracy);
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(&args.log_level);

    if let Err(err) = run(&args) {
        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
}
