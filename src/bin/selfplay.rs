use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tileshift::game::{GameConfig, LossPolicy};
use tileshift::selfplay::{generate_games_with, summarize, SelfPlayParams};

#[derive(Parser, Debug)]
#[command(
    name = "tileshift-selfplay",
    about = "Play many independent random games in parallel and report statistics"
)]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value_t = 10_000)]
    max_moves: usize,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// JSON game config; --size/--four-probability/--loss-policy override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    size: Option<usize>,
    #[arg(long)]
    four_probability: Option<f64>,
    #[arg(long, value_enum)]
    loss_policy: Option<LossPolicy>,
    /// Directory for games.jsonl and summary.json; summary goes to stdout when omitted
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let mut config = match &a.config {
        Some(p) => GameConfig::from_json_file(p)?,
        None => GameConfig::default(),
    };
    if let Some(v) = a.size { config.size = v; }
    if let Some(v) = a.four_probability { config.four_probability = v; }
    if let Some(v) = a.loss_policy { config.loss_policy = v; }
    config.validate()?;

    let params = SelfPlayParams { games: a.games, max_moves: a.max_moves, seed: a.seed, config };
    eprintln!(
        "Playing {} games (size={}, threads={})",
        a.games, params.config.size, a.threads
    );

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}]")?);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(a.threads.max(1)).build()?;
    let games = pool.install(|| generate_games_with(&params, |_| pb.inc(1)))?;
    pb.finish_and_clear();

    let summary = summarize(&games);
    match a.out {
        Some(dir) => {
            create_dir_all(&dir)?;
            let mut w = BufWriter::new(File::create(dir.join("games.jsonl"))?);
            for g in &games {
                writeln!(w, "{}", serde_json::to_string(g)?)?;
            }
            w.flush()?;
            std::fs::write(dir.join("summary.json"), serde_json::to_string_pretty(&summary)?)?;
            eprintln!("Wrote {} games to {}", games.len(), dir.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    eprintln!(
        "won={} lost={} stuck={} mean_score={:.1} max_score={}",
        summary.won, summary.lost, summary.stuck, summary.mean_score, summary.max_score
    );
    Ok(())
}
