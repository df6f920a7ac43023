use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::args::Cli;
use crate::render::OutputFormat;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "costar.toml";

/// Runtime settings: defaults, then the TOML file, then command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub actors: PathBuf,
    pub movies: PathBuf,
    pub movie_actors: PathBuf,
    pub center: String,
    pub delimiter: char,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            actors: PathBuf::from("inputs/actors.txt"),
            movies: PathBuf::from("inputs/movies.txt"),
            movie_actors: PathBuf::from("inputs/movie-actors.txt"),
            center: "Kevin Bacon".to_string(),
            delimiter: '|',
            format: OutputFormat::Text,
        }
    }
}

impl Config {
    /// Resolve the effective configuration for this run.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_flags(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn apply_flags(&mut self, cli: &Cli) {
        if let Some(p) = &cli.actors {
            self.actors = p.clone();
        }
        if let Some(p) = &cli.movies {
            self.movies = p.clone();
        }
        if let Some(p) = &cli.movie_actors {
            self.movie_actors = p.clone();
        }
        if let Some(c) = &cli.center {
            self.center = c.clone();
        }
        if let Some(d) = cli.delimiter {
            self.delimiter = d;
        }
        if let Some(f) = cli.format {
            self.format = f;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.center.trim().is_empty() {
            bail!("center must not be empty");
        }
        if self.delimiter.is_alphanumeric() || self.delimiter.is_whitespace() {
            bail!(
                "delimiter '{}' would split names; use a punctuation character",
                self.delimiter
            );
        }
        Ok(())
    }
}
