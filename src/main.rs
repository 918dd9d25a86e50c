use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tileshift::game::{Engine, GameConfig, GameState, LossPolicy, Status};
use tileshift::GameError;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play 2048 in the terminal", long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid side length
    #[arg(long)]
    size: Option<usize>,

    /// Probability that a spawned tile is a 4
    #[arg(long)]
    four_probability: Option<f64>,

    /// Tile value that wins the game
    #[arg(long)]
    win_tile: Option<u32>,

    /// When the game is lost
    #[arg(long, value_enum)]
    loss_policy: Option<LossPolicy>,

    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut cfg = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(v) = self.size { cfg.size = v; }
        if let Some(v) = self.four_probability { cfg.four_probability = v; }
        if let Some(v) = self.win_tile { cfg.win_tile = v; }
        if let Some(v) = self.loss_policy { cfg.loss_policy = v; }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn print_state(state: &GameState) {
    println!("\n{}", state.grid());
    println!("score: {}  moves: {}", state.score(), state.moves());
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.game_config()?;
    let mut engine = match args.seed {
        Some(seed) => Engine::seeded(config, seed)?,
        None => Engine::new(config)?,
    };

    println!("Move with w/a/s/d or up/down/left/right. 'new' restarts, 'quit' exits.");
    let mut state = engine.new_game()?;
    print_state(&state);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 { break; }
        let input = line.trim();
        match input {
            "" => continue,
            "quit" | "q" => break,
            "new" | "n" => {
                state = engine.new_game()?;
                print_state(&state);
                continue;
            }
            _ => {}
        }
        if state.status().is_terminal() {
            println!("Game over. Type 'new' to play again.");
            continue;
        }
        match engine.play_input(&state, input) {
            Ok(result) => {
                if !result.moved {
                    println!("Nothing moves that way.");
                    continue;
                }
                state = result.state;
                print_state(&state);
                match result.status {
                    Status::Won => {
                        let tile = engine.config().win_tile;
                        println!("You reached {tile}! Type 'new' to play again.");
                    }
                    Status::Lost => println!("No moves left. Final score {}.", state.score()),
                    Status::InProgress => {}
                }
            }
            Err(e @ GameError::InvalidDirection(_)) => println!("{e}"),
            Err(e) => return Err(e.into()),
        }
    }
    println!("Thanks for playing!");
    Ok(())
}
