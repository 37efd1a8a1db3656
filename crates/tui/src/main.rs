mod app;
mod particles;
mod renderer;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use heartscroll_core::{Deck, DeckConfig};

fn parse_args() -> Result<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    let mut config = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a file path")?;
                config = Some(PathBuf::from(path));
            }
            other => bail!("unknown argument {other:?}\nUsage: heartscroll [--config <deck.json>]"),
        }
    }
    Ok(config)
}

fn main() -> Result<()> {
    // Logs go to stderr; redirect it (`2>heartscroll.log`) when RUST_LOG is set.
    env_logger::init();

    let config = match parse_args()? {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            DeckConfig::from_json(&json).with_context(|| format!("loading {}", path.display()))?
        }
        None => DeckConfig::default(),
    };
    let seed = config.seed;
    let deck = Deck::new(config, 0)?;

    let mut app = app::App::new(deck, seed, 80, 24);
    renderer::run_tui(&mut app)
}
