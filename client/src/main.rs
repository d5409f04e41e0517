mod config;
mod offline;
mod terminal;

use std::path::PathBuf;

use clap::Parser;
use tictactoe_common::games::SessionRng;
use tictactoe_common::{log, logger};

use config::{CONFIG_FILE, get_config_manager};
use offline::{run_interactive, run_self_play};

#[derive(Parser)]
#[command(name = "tictactoe")]
struct Args {
    /// YAML config; defaults are used when the file is missing.
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Play this many bot-only games and print the tally.
    #[arg(long)]
    self_play: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = get_config_manager(&args.config).get_config()?;

    let prefix = if args.use_log_prefix {
        Some("TicTacToe".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, config.log_level);

    let seed = args.seed.unwrap_or_else(|| SessionRng::from_random().seed());
    log!("Using seed {}", seed);

    match args.self_play {
        Some(games) => {
            let tally = run_self_play(&config, games, seed).await?;
            println!("{}", tally.summary(&config.symbols()));
        }
        None => run_interactive(&config, seed).await?,
    }

    Ok(())
}
