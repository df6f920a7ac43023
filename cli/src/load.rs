use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use costar_core::{build_graph, CollabGraph};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}:{line}: expected two fields separated by '{delimiter}'", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        delimiter: char,
    },
}

/// The three input tables, keyed by their ids.
#[derive(Debug, Default)]
pub struct Dataset {
    /// actor id -> name
    pub actors: BTreeMap<String, String>,
    /// movie id -> title
    pub movies: BTreeMap<String, String>,
    /// movie id -> actor ids
    pub casts: BTreeMap<String, BTreeSet<String>>,
}

impl Dataset {
    /// Read all three files named by `config`.
    pub fn load(config: &Config) -> Result<Self> {
        let start = Instant::now();
        let d = config.delimiter;

        let actors = read_table(&config.actors, d)?.into_iter().collect();
        let movies = read_table(&config.movies, d)?.into_iter().collect();

        let mut casts: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (movie_id, actor_id) in read_table(&config.movie_actors, d)? {
            casts.entry(movie_id).or_default().insert(actor_id);
        }

        let dataset = Self {
            actors,
            movies,
            casts,
        };
        info!(
            actors = dataset.actors.len(),
            movies = dataset.movies.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "inputs loaded"
        );
        Ok(dataset)
    }

    /// Resolve ids to names and build the collaboration graph.
    ///
    /// Cast entries naming an unknown actor are skipped. Cast lists for movie
    /// ids missing from the movie table are ignored.
    pub fn into_graph(self) -> CollabGraph {
        let Dataset {
            actors,
            movies,
            mut casts,
        } = self;

        let mut unknown_actors = 0usize;
        let mut groups: Vec<(String, Vec<String>)> = Vec::with_capacity(movies.len());
        for (movie_id, title) in movies {
            let cast = casts.remove(&movie_id).unwrap_or_default();
            let names = cast
                .iter()
                .filter_map(|actor_id| match actors.get(actor_id) {
                    Some(name) => Some(name.clone()),
                    None => {
                        unknown_actors += 1;
                        debug!(%movie_id, %actor_id, "cast entry for unknown actor");
                        None
                    }
                })
                .collect();
            groups.push((title, names));
        }

        if unknown_actors > 0 {
            warn!(count = unknown_actors, "skipped cast entries with unknown actor ids");
        }
        if !casts.is_empty() {
            warn!(count = casts.len(), "ignored casts for unknown movie ids");
        }

        build_graph(actors.into_values(), groups)
    }
}

/// Read `key<delim>value` lines from a file.
pub fn read_table(path: &Path, delimiter: char) -> Result<Vec<(String, String)>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let rows = parse_table(BufReader::new(file), path, delimiter)?;
    debug!(path = %path.display(), rows = rows.len(), "table read");
    Ok(rows)
}

/// Parse `key<delim>value` lines. Blank lines are skipped; fields past the
/// second are ignored; surrounding whitespace is trimmed.
pub fn parse_table<R: BufRead>(reader: R, path: &Path, delimiter: char) -> Result<Vec<(String, String)>> {
    let mut rows = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(delimiter).map(str::trim);
        let (Some(key), Some(value)) = (fields.next(), fields.next()) else {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                line: i + 1,
                delimiter,
            }
            .into());
        };
        rows.push((key.to_string(), value.to_string()));
    }
    Ok(rows)
}
