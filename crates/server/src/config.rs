use clap::Parser;
use std::path::PathBuf;

/// Server configuration, from flags or environment variables
#[derive(Debug, Clone, Parser)]
#[command(name = "movie-recs-server")]
#[command(about = "HTTP API for content-based movie recommendations", long_about = None)]
pub struct Config {
    /// Path to the movie catalog CSV
    #[arg(long, env = "MOVIE_RECS_DATA", default_value = "movies.csv")]
    pub data: PathBuf,

    /// Address to bind
    #[arg(long, env = "MOVIE_RECS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "MOVIE_RECS_PORT", default_value_t = 5000)]
    pub port: u16,
}

impl Config {
    /// `host:port` for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
