use anyhow::{Context, Result, anyhow, ensure};
use catalog::{Catalog, MovieRecord};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{EngineStatus, SimilarityEngine};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::warn;

/// movie-recs - content-based movie recommendations
#[derive(Parser)]
#[command(name = "movie-recs")]
#[command(about = "Movie recommendations from genre, director and keyword similarity", long_about = None)]
struct Cli {
    /// Path to the movie catalog CSV
    #[arg(short, long, default_value = "movies.csv", global = true)]
    data: PathBuf,

    /// Print raw JSON instead of a formatted listing
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every movie in the catalog
    Movies,

    /// Movies most similar to a given title
    Recommend {
        /// Exact title to start from
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        num: i64,
    },

    /// Best-rated movies matching preference filters
    Preferences {
        /// Comma-separated genre fragments, all of which must match
        #[arg(long, default_value = "")]
        genres: String,

        /// Director name fragment
        #[arg(long, default_value = "")]
        director: String,

        /// Comma-separated keyword fragments, all of which must match
        #[arg(long, default_value = "")]
        keywords: String,

        /// Number of recommendations to return
        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        num: i64,
    },

    /// Search titles (case-insensitive substring match)
    Search {
        /// Text to look for in titles
        #[arg(long)]
        query: String,
    },

    /// Run concurrent queries against one shared engine
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Reject bad input before paying for the build
    match &cli.command {
        Commands::Recommend { title, .. } => {
            ensure!(!title.is_empty(), "Title parameter is required");
        }
        Commands::Search { query } => {
            ensure!(!query.is_empty(), "Query parameter is required");
        }
        _ => {}
    }

    let start = Instant::now();
    let engine = Arc::new(SimilarityEngine::build(Catalog::load(&cli.data)));
    if engine.status() == EngineStatus::Empty {
        warn!("No movies loaded from {}", cli.data.display());
    }
    eprintln!(
        "{} Engine built over {} movies in {:?}",
        "✓".green(),
        engine.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Movies => print_movies("All movies", engine.get_all_movies().iter(), cli.json)?,
        Commands::Recommend { title, num } => {
            if !engine.contains_title(&title) {
                warn!("Title {:?} is not in the catalog", title);
            }
            let recs = engine.get_recommendations(&title, num);
            print_movies(&format!("Movies like '{}'", title), recs, cli.json)?
        }
        Commands::Preferences {
            genres,
            director,
            keywords,
            num,
        } => {
            let recs = engine.get_recommendations_by_preferences(&genres, &director, &keywords, num);
            print_movies("Recommended for your preferences", recs, cli.json)?
        }
        Commands::Search { query } => {
            let hits = engine.search_movies(&query);
            print_movies(&format!("Search results for '{}'", query), hits, cli.json)?
        }
        Commands::Benchmark {
            requests,
            concurrent,
        } => {
            let runtime = tokio::runtime::Runtime::new().context("Failed to start runtime")?;
            runtime.block_on(handle_benchmark(engine, requests, concurrent))?
        }
    }

    Ok(())
}

/// Print records either as JSON or as a numbered, coloured listing
fn print_movies<'a>(
    header: &str,
    movies: impl IntoIterator<Item = &'a MovieRecord>,
    json: bool,
) -> Result<()> {
    let movies: Vec<&MovieRecord> = movies.into_iter().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&movies)?);
        return Ok(());
    }

    println!("{}", format!("{}:", header).bold().blue());
    if movies.is_empty() {
        println!("  (none)");
    }
    for (rank, movie) in movies.iter().enumerate() {
        let rating = movie
            .rating()
            .map(|r| format!("{:.1}", r))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{}. {} [{}] dir. {} - Rating: {}",
            (rank + 1).to_string().green(),
            movie.title().bold(),
            movie.genres(),
            movie.director(),
            rating
        );
    }
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    engine: Arc<SimilarityEngine>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    ensure!(requests > 0, "At least one request is needed");
    let movies = engine.get_all_movies();
    if movies.is_empty() {
        return Err(anyhow!("Cannot benchmark an empty catalog"));
    }

    // Pick random titles to query
    let titles: Vec<String> = (0..requests)
        .map(|_| {
            let row = rand::random::<u32>() as usize % movies.len();
            movies[row].title().to_string()
        })
        .collect();

    let limit = Arc::new(Semaphore::new(concurrent.max(1)));
    let wall_clock = Instant::now();

    // Each query runs on the blocking pool; the semaphore caps concurrency
    let mut handles = vec![];
    for title in titles {
        let engine = engine.clone();
        let limit = limit.clone();
        let handle = tokio::spawn(async move {
            let _permit = limit.acquire_owned().await?;
            let elapsed = tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                let recs = engine.get_recommendations(&title, 10);
                std::hint::black_box(recs.len());
                start.elapsed()
            })
            .await?;
            Ok::<_, anyhow::Error>(elapsed)
        });
        handles.push(handle);
    }

    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let total_time = wall_clock.elapsed();

    timings.sort();
    let avg_latency = timings.iter().sum::<Duration>() / (timings.len() as u32);
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}
