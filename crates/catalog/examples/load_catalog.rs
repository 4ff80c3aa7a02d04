use catalog::Catalog;
use std::path::PathBuf;
use std::time::Instant;

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("movies.csv"));

    println!("Loading catalog from {}...\n", path.display());

    let start = Instant::now();
    let catalog = Catalog::load(&path);
    let elapsed = start.elapsed();

    println!("=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    if let Some(first) = catalog.movies().first() {
        println!("First row: {}", first.title());
    }
}
