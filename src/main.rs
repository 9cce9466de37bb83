use anyhow::{Context, Result};
use clap::Parser;
use song_recommender::{EngineHandle, Recommendation, RecommenderConfig, SimilarityEngine};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Width of the score bar chart in characters
const BAR_WIDTH: usize = 40;

#[derive(Parser, Debug)]
#[command(
    name = "song-recommender",
    version,
    about = "Find songs with similar audio features"
)]
struct CliArgs {
    /// CSV dataset with song titles and audio features
    dataset: PathBuf,

    /// JSON config file (column mapping, size cap, seed, default count)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Recommend songs similar to this title and exit
    #[arg(long)]
    song: Option<String>,

    /// Number of recommendations per query
    #[arg(short = 'n', long = "count")]
    count: Option<usize>,

    /// Maximum catalog size; larger datasets are sampled down
    #[arg(long)]
    max_rows: Option<usize>,

    /// Seed for the size-cap sample
    #[arg(long)]
    seed: Option<u64>,

    /// Print every song title in sorted order and exit
    #[arg(long)]
    list: bool,

    /// Print recommendations as JSON
    #[arg(long)]
    json: bool,

    /// Print catalog size and fitted feature scaling
    #[arg(long)]
    stats: bool,
}

impl CliArgs {
    /// File config as the base, explicit flags on top
    fn resolve_config(&self) -> Result<RecommenderConfig> {
        let mut config = match &self.config {
            Some(path) => RecommenderConfig::from_path(path)?,
            None => RecommenderConfig::default(),
        };

        if let Some(count) = self.count {
            config.default_count = count;
        }
        if let Some(max_rows) = self.max_rows {
            config.max_rows = max_rows;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        config.validate()?;
        Ok(config)
    }
}

fn build_engine(config: &RecommenderConfig, dataset: &Path) -> Result<SimilarityEngine> {
    let start = Instant::now();
    let catalog = config
        .loader()
        .load_path(dataset)
        .with_context(|| format!("Failed to load catalog from {}", dataset.display()))?;
    let engine = SimilarityEngine::build(catalog);
    info!("Engine built in {:.2}s", start.elapsed().as_secs_f64());
    Ok(engine)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    let config = args.resolve_config()?;
    let handle = EngineHandle::new(build_engine(&config, &args.dataset)?);

    if args.stats {
        print_stats(&handle.snapshot());
    }

    if args.list {
        let engine = handle.snapshot();
        for title in engine.catalog().all_song_titles() {
            println!("{}", title);
        }
        return Ok(());
    }

    match &args.song {
        Some(song) => {
            let recs = handle.recommend(song, config.default_count);
            print_recommendations(song, &recs, args.json)?;
        }
        None => run_interactive(&handle, &config, &args)?,
    }

    Ok(())
}

fn run_interactive(
    handle: &EngineHandle,
    config: &RecommenderConfig,
    args: &CliArgs,
) -> Result<()> {
    println!("=== Song Recommender ===");
    println!(
        "{} songs loaded. Type a song title, :list, :reload or :quit.\n",
        handle.snapshot().len()
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("song> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;
        let query = line.trim();

        match query {
            "" => continue,
            ":quit" | ":q" => break,
            ":list" => {
                for title in handle.snapshot().catalog().all_song_titles() {
                    println!("  {}", title);
                }
            }
            ":reload" => match build_engine(config, &args.dataset) {
                Ok(engine) => {
                    handle.replace(engine);
                    println!("✓ Reloaded {} songs\n", handle.snapshot().len());
                }
                // Keep serving the current engine
                Err(e) => eprintln!("✗ Reload failed: {:#}\n", e),
            },
            title => {
                let recs = handle.recommend(title, config.default_count);
                print_recommendations(title, &recs, args.json)?;
            }
        }
    }

    Ok(())
}

fn print_recommendations(query: &str, recs: &[Recommendation], json: bool) -> Result<()> {
    if json {
        if recs.is_empty() {
            warn!("Song not found in dataset: {}", query);
        }
        println!("{}", serde_json::to_string_pretty(recs)?);
        return Ok(());
    }

    if recs.is_empty() {
        println!("⚠ Song not found in dataset. Try another one.\n");
        return Ok(());
    }

    println!("Because you liked \"{}\", you might also enjoy:\n", query);
    for (rank, rec) in recs.iter().enumerate() {
        println!("  {}. {} by {}", rank + 1, rec.song, rec.artist);
        println!("     Similarity score: {}", rec.score);
    }

    println!("\n  Top {} similar songs", recs.len());
    let label_width = recs
        .iter()
        .map(|r| r.song.chars().count())
        .max()
        .unwrap_or(0);
    for rec in recs {
        println!(
            "  {:<width$} │{} {:.3}",
            rec.song,
            score_bar(rec.score),
            rec.score,
            width = label_width
        );
    }
    println!();

    Ok(())
}

/// Horizontal bar proportional to a score in [0, 1]; negative scores draw nothing
fn score_bar(score: f64) -> String {
    let filled = (score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(filled)
}

fn print_stats(engine: &SimilarityEngine) {
    println!("=== Catalog Statistics ===");
    println!("Songs:                {}", engine.len());

    let scaler = engine.scaler();
    for (i, name) in song_recommender::catalog::FEATURE_NAMES.iter().enumerate() {
        println!(
            "{:<13} mean {:>10.4}   std {:>10.4}",
            name,
            scaler.mean()[i],
            scaler.std()[i]
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bar_bounds() {
        assert_eq!(score_bar(1.0).chars().count(), BAR_WIDTH);
        assert_eq!(score_bar(0.5).chars().count(), BAR_WIDTH / 2);
        assert_eq!(score_bar(-0.7), "");
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = CliArgs::parse_from([
            "song-recommender",
            "tracks.csv",
            "-n",
            "3",
            "--seed",
            "9",
        ]);
        let config = args.resolve_config().unwrap();

        assert_eq!(config.default_count, 3);
        assert_eq!(config.seed, 9);
        assert_eq!(config.max_rows, 20_000);
    }

    #[test]
    fn test_zero_count_rejected() {
        let args = CliArgs::parse_from(["song-recommender", "tracks.csv", "-n", "0"]);
        assert!(args.resolve_config().is_err());
    }
}
