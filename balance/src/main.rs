//! # Balance CLI
//!
//! Trains a REINFORCE policy on the cart-pole task from the command line.
//! Settings come from an optional JSON config file; individual flags override
//! the file. Use `-v` / `-vv` for per-episode and trace output.

use anyhow::Result;
use balance::{ConfigOverrides, TrainConfig};
use clap::Parser;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "balance", version, about = "Train a REINFORCE policy to balance a pole on a cart")]
struct Args {
    /// JSON training configuration
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    episodes: Option<usize>,
    #[arg(long)]
    hidden_width: Option<usize>,
    #[arg(long)]
    learning_rate: Option<f32>,
    #[arg(long)]
    discount: Option<f32>,
    #[arg(long)]
    seed: Option<u64>,
    /// Step cap per episode
    #[arg(long)]
    max_steps: Option<usize>,
    /// Log a progress line every N episodes
    #[arg(long)]
    log_every: Option<usize>,
    /// Write the trained network parameters to this file as JSON
    #[arg(long)]
    dump_params: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            hidden_width: self.hidden_width,
            learning_rate: self.learning_rate,
            discount: self.discount,
            seed: self.seed,
            episodes: self.episodes,
            max_steps: self.max_steps,
            log_every: self.log_every,
        }
    }

    fn train_config(&self) -> Result<TrainConfig> {
        let mut config = match &self.config {
            Some(path) => TrainConfig::load(path)?,
            None => TrainConfig::default(),
        };
        config.apply_overrides(&self.overrides());
        Ok(config)
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_max_level(args.log_level()).init();

    let config = args.train_config()?;
    balance::app::run(&config, args.dump_params.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("balance-cli-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "discount": 0.95, "hidden_width": 32 }"#).unwrap();

        let args = Args::try_parse_from([
            "balance",
            "--config",
            path.to_str().unwrap(),
            "--discount",
            "0.9",
        ])
        .unwrap();
        let config = args.train_config().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.discount, 0.9);
        assert_eq!(config.hidden_width, 32);
        assert_eq!(config.episodes, TrainConfig::default().episodes);
    }

    #[test]
    fn no_flags_means_defaults() {
        let args = Args::try_parse_from(["balance"]).unwrap();
        assert_eq!(args.train_config().unwrap(), TrainConfig::default());
        assert_eq!(args.log_level(), Level::INFO);
    }
}
