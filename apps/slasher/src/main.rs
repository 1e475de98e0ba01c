// WGF
// copyright zipxing@hotmail.com 2022～2025

mod entities;
mod intro;

use clap::Parser;
use intro::{intro_scene, Slasher};
use log::info;
use std::{error::Error, path::PathBuf};
use wgf::{asset::AssetsConfig, game::GameWindow, log::init_log};

#[derive(Parser, Debug)]
#[command(name = "slasher", about = "Slash the walking enemy with a greatsword")]
struct Args {
    /// Adds debug messages to log output
    #[arg(long)]
    debug: bool,

    /// TOML file with window settings
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Directory holding sprites, sounds and fonts
    #[arg(long, value_name = "DIR", default_value = "assets")]
    assets: PathBuf,

    /// Log file, the terminal is busy drawing the game
    #[arg(long, value_name = "FILE", default_value = "log/slasher.log")]
    log_file: String,
}

fn make_game(args: &Args) -> Result<GameWindow<Slasher>, Box<dyn Error>> {
    let mut game = GameWindow::new("Slasher", Slasher::default());
    if let Some(path) = &args.settings {
        game.ctx.settings.load_toml(path)?;
    }
    let dir = args.assets.clone();
    game.ctx.assets.config = AssetsConfig {
        images_directory: Some(dir.join("sprites")),
        sounds_directory: Some(dir.join("sounds")),
        fonts_directory: Some(dir.join("fonts")),
        ..AssetsConfig::with_directory(dir)
    };
    game.init()?;
    game.ctx.assets.load_all();

    let size = game.ctx.settings.get().size;
    game.tree.add(intro_scene(size), true);
    Ok(game)
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = if args.debug {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    init_log(level, Some(&args.log_file))?;

    info!("Running the game");
    let mut game = make_game(&args)?;
    game.run()?;
    Ok(())
}
