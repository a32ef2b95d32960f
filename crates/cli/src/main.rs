use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::GameDataset;
use server::{GameRecommendation, GameRecommender, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// GameRecs - Video Game Review Explorer
#[derive(Parser)]
#[command(name = "game-recs")]
#[command(about = "Review statistics and content-based game recommendations", long_about = None)]
struct Cli {
    /// Path to the merged review CSV
    #[arg(short, long, env = "GAME_RECS_DATA_FILE", default_value = "data/merged_data.csv")]
    data_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, env = "GAME_RECS_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, env = "GAME_RECS_PORT", default_value = "8000")]
        port: u16,
    },

    /// Get games similar to a title
    Recommend {
        /// Exact title of the game (case-sensitive)
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(short, long, default_value = "5")]
        n: usize,
    },

    /// Search for games by title
    Search {
        /// Text to look for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// Print the aggregate review statistics
    Stats,

    /// Run benchmark to test recommendation latency
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the dataset once; everything below shares it read-only
    let start = Instant::now();
    let dataset = Arc::new(
        GameDataset::load_from_file(&cli.data_file)
            .with_context(|| format!("Failed to load {}", cli.data_file.display()))?,
    );
    info!("Loaded {} reviews in {:?}", dataset.len(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Serve { host, port } => {
            server::serve(&ServerConfig::new(host, port), dataset).await?
        }
        Commands::Recommend { title, n } => handle_recommend(dataset, &title, n)?,
        Commands::Search { title } => handle_search(&dataset, &title),
        Commands::Stats => handle_stats(&dataset),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(dataset, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(dataset: Arc<GameDataset>, title: &str, n: usize) -> Result<()> {
    let recommender = GameRecommender::new(dataset.clone());

    let query = recommender
        .lookup(title)
        .and_then(|id| dataset.get_game(id))
        .ok_or_else(|| anyhow!("Game title not found: {}", title))?;
    println!(
        "{} {} ({}, {}) [{}] - Score: {:.1}",
        "Games like".bold().blue(),
        query.title.bold(),
        query.platform,
        query.release_year,
        query.genre_label(),
        query.score
    );

    let recommendations = recommender.recommend(title, n)?;
    print_recommendations(&recommendations);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(dataset: &GameDataset, title: &str) {
    let hits = dataset.search_titles(title);
    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if hits.is_empty() {
        println!("  (no matches)");
        return;
    }

    // Display top 20 results
    for id in hits.iter().take(20) {
        if let Some(game) = dataset.get_game(*id) {
            println!(
                "{}: {} ({}, {}) [{}] score {:.1}",
                id,
                game.title,
                game.platform,
                game.release_year,
                game.genre_label(),
                game.score
            );
        }
    }
    if hits.len() > 20 {
        println!("  ... and {} more", hits.len() - 20);
    }
}

/// Handle the 'stats' command
fn handle_stats(dataset: &GameDataset) {
    println!("{}", "Reviews by year:".bold().blue());
    for row in dataset.reviews_by_year() {
        println!("  {}: {}", row.release_year, row.count);
    }

    println!("{}", "Reviews by month (2014 onwards):".bold().blue());
    for row in dataset.reviews_by_month() {
        println!("  {:>2}: {}", row.0, row.1);
    }

    println!("{}", "Genre popularity:".bold().blue());
    for row in dataset.genre_popularity() {
        println!(
            "{}{}: {} games, average score {:.2}",
            "• ".green(),
            row.genre,
            row.num_games,
            row.average_score
        );
    }

    println!("{}", "Platform distribution:".bold().blue());
    println!("  year    PC  Nin   PS  Xbox  Mob  Sega  Other");
    for row in dataset.platform_distribution() {
        println!(
            "  {}  {:>4} {:>4} {:>4} {:>5} {:>4} {:>5} {:>6}",
            row.release_year,
            row.pc,
            row.nintendo,
            row.playstation,
            row.xbox,
            row.mobile,
            row.sega,
            row.other
        );
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    dataset: Arc<GameDataset>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if dataset.is_empty() {
        return Err(anyhow!("Cannot benchmark an empty dataset"));
    }
    let recommender = GameRecommender::new(dataset.clone());

    // Pick random query titles from the dataset
    let titles: Vec<String> = (0..requests)
        .map(|_| {
            let id = rand::random::<u64>() as usize % dataset.len();
            dataset.games()[id].title.clone()
        })
        .collect();

    // Run requests in waves of `concurrent` blocking tasks
    let wall_clock = Instant::now();
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    for wave in titles.chunks(concurrent.max(1)) {
        let mut handles = vec![];
        for title in wave {
            let recommender = recommender.clone();
            let title = title.clone();
            handles.push(tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                recommender.recommend(&title, 5)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            }));
        }
        for handle in handles {
            timings.push(handle.await??);
        }
    }
    let total_time = wall_clock.elapsed();

    if timings.is_empty() {
        println!("No requests made");
        return Ok(());
    }

    let summed: Duration = timings.iter().sum();
    let avg_latency = summed / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = timings.len() as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(recommendations: &[GameRecommendation]) {
    print!("{}", "Recommended games:\n".bold().blue());
    if recommendations.is_empty() {
        println!("  (none)");
    }
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) - genre: {} - score: {}",
            (i + 1).to_string().green(),
            rec.title,
            rec.platform,
            rec.genre,
            rec.score
        );
    }
}
