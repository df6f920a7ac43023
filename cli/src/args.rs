use std::path::PathBuf;

use clap::Parser;

use crate::render::OutputFormat;

/// Command-line flags. Every setting is optional and overrides the config
/// file when given.
#[derive(Debug, Parser)]
#[command(
    name = "costar",
    version,
    about = "Degrees of separation over an actor collaboration graph"
)]
pub struct Cli {
    /// Config file (default: ./costar.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Actor file: `id|name` per line
    #[arg(long, value_name = "FILE")]
    pub actors: Option<PathBuf>,
    /// Movie file: `id|title` per line
    #[arg(long, value_name = "FILE")]
    pub movies: Option<PathBuf>,
    /// Cast file: `movie_id|actor_id` per line
    #[arg(long, value_name = "FILE")]
    pub movie_actors: Option<PathBuf>,
    /// Initial center of the universe
    #[arg(long)]
    pub center: Option<String>,
    /// Field separator used by all three input files
    #[arg(long)]
    pub delimiter: Option<char>,
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}
