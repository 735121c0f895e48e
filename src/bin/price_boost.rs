//! Command-line front end for training, scoring and inspecting pricing models.
//!
//! Examples:
//! - `price-boost train --data prices.csv --out pricing_model.prcm --trees 200`
//! - `price-boost predict --model pricing_model.prcm --record "house,2,3,1500,1800,DBT"`
//! - `price-boost inspect --model pricing_model.prcm`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use price_boost::model::{pipeline, TrainConfig, TreeParams};
use price_boost::{persist, Verbosity};

const DEFAULT_ARTIFACT: &str = "pricing_model.prcm";

#[derive(Debug, Parser)]
#[command(name = "price-boost", version, about = "Gradient-boosted price model")]
struct Cli {
    /// Increase log output (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Train on a CSV file and save the model.
    Train {
        #[arg(long)]
        data: PathBuf,
        #[arg(long, default_value = DEFAULT_ARTIFACT)]
        out: PathBuf,
        #[arg(long, default_value_t = 100)]
        trees: u32,
        #[arg(long, default_value_t = 0.3)]
        learning_rate: f32,
        #[arg(long, default_value_t = 6)]
        max_depth: u32,
        /// 0 = all cores.
        #[arg(long, default_value_t = 0)]
        threads: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Score one comma-separated record (label optional).
    Predict {
        #[arg(long, default_value = DEFAULT_ARTIFACT)]
        model: PathBuf,
        #[arg(long)]
        record: String,
    },
    /// Print the model as JSON.
    Inspect {
        #[arg(long, default_value = DEFAULT_ARTIFACT)]
        model: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Train {
            data,
            out,
            trees,
            learning_rate,
            max_depth,
            threads,
            seed,
        } => {
            let verbosity = match cli.verbose {
                0 => Verbosity::Warning,
                1 => Verbosity::Info,
                _ => Verbosity::Debug,
            };
            let config = TrainConfig::builder()
                .n_trees(trees)
                .learning_rate(learning_rate)
                .tree(TreeParams::depth_wise(max_depth))
                .n_threads(threads)
                .seed(seed)
                .verbosity(verbosity)
                .build()
                .context("invalid training options")?;

            let artifact = pipeline::train_and_save_with(&data, &out, &config)
                .with_context(|| format!("training on {} failed", data.display()))?;
            println!(
                "trained {} trees on {} rows (rmse {:.4}), saved to {}",
                artifact.meta().n_trees,
                artifact.meta().n_train_rows,
                artifact.meta().train_rmse,
                out.display()
            );
        }
        Command::Predict { model, record } => {
            let artifact = pipeline::load(&model)
                .with_context(|| format!("could not load {}", model.display()))?;
            let record = pipeline::parse_record(&record).context("malformed record")?;
            println!("{}", pipeline::predict(&artifact, &record));
        }
        Command::Inspect { model } => {
            let artifact = pipeline::load(&model)
                .with_context(|| format!("could not load {}", model.display()))?;
            println!("{}", persist::to_json_string(&artifact)?);
        }
    }

    Ok(())
}
