use std::io::{self, Write};

use clap::ValueEnum;
use costar_core::{CenterSummary, Hop, RankEnd, Ranking};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// One JSON document per answer
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum End {
    Best,
    Worst,
}

impl From<RankEnd> for End {
    fn from(end: RankEnd) -> Self {
        match end {
            RankEnd::Best => End::Best,
            RankEnd::Worst => End::Worst,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub actor: String,
    pub movies: Vec<String>,
    pub costar: String,
}

impl From<Hop> for Step {
    fn from(hop: Hop) -> Self {
        Step {
            actor: hop.actor,
            movies: hop.movies.into_iter().collect(),
            costar: hop.costar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry<S> {
    pub actor: String,
    pub score: S,
}

/// Everything the command loop can say, independent of output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Answer {
    Center {
        center: String,
        connected: usize,
        total: usize,
    },
    Path {
        target: String,
        center: String,
        steps: Vec<Step>,
    },
    SamePerson {
        name: String,
    },
    NoPath {
        target: String,
        center: String,
    },
    Unreachable {
        center: String,
        actors: Vec<String>,
    },
    Separation {
        center: String,
        /// None when nobody is connected to the center
        average: Option<f64>,
    },
    Centers {
        end: End,
        entries: Vec<Entry<f64>>,
    },
    Degree {
        end: End,
        entries: Vec<Entry<usize>>,
    },
    Error {
        message: String,
    },
    Goodbye,
}

impl From<CenterSummary> for Answer {
    fn from(s: CenterSummary) -> Self {
        Answer::Center {
            center: s.center,
            connected: s.connected,
            total: s.total,
        }
    }
}

pub fn entries<S>(ranking: Ranking<String, S>) -> (End, Vec<Entry<S>>) {
    let entries = ranking
        .entries
        .into_iter()
        .map(|r| Entry {
            actor: r.vertex,
            score: r.score,
        })
        .collect();
    (ranking.end.into(), entries)
}

pub const COMMANDS: &str = "\
Commands:
c <#>: list top (positive number) or bottom (negative) <#> centers of the universe, sorted by average separation
d <#>: list top (positive number) or bottom (negative) <#> actors sorted by degree
i: list actors with infinite separation from the current center
p <name>: find path from <name> to current center of the universe
s: show the average separation between current center and all actors connected to them
u <name>: make <name> the center of the universe
q: quit game";

pub fn write_answer<W: Write>(out: &mut W, format: OutputFormat, answer: &Answer) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, answer)?;
            writeln!(out)
        }
        OutputFormat::Text => write_text(out, answer),
    }
}

fn write_text<W: Write>(out: &mut W, answer: &Answer) -> io::Result<()> {
    match answer {
        Answer::Center {
            center,
            connected,
            total,
        } => writeln!(
            out,
            "{center} is now the center of the acting universe, connected to {connected}/{total} actors."
        ),
        Answer::Path { target, steps, .. } => {
            writeln!(out, "{target}'s number is {}", steps.len())?;
            for step in steps {
                writeln!(
                    out,
                    "{} appeared in [{}] with {}",
                    step.actor,
                    step.movies.join(", "),
                    step.costar
                )?;
            }
            Ok(())
        }
        Answer::SamePerson { .. } => writeln!(out, "They're the same person!"),
        Answer::NoPath { target, center } => {
            writeln!(out, "The separation between {center} and {target} is infinite.")
        }
        Answer::Unreachable { center, actors } => {
            writeln!(out, "The actors with infinite separation from {center}:")?;
            for actor in actors {
                writeln!(out, "{actor}")?;
            }
            Ok(())
        }
        Answer::Separation { center, average } => match average {
            Some(avg) => writeln!(out, "Average separation with center {center}: {avg}"),
            None => writeln!(
                out,
                "Average separation with center {center} is undefined: no one is connected."
            ),
        },
        Answer::Centers { end, entries } => {
            match end {
                End::Best => writeln!(out, "Best possible Bacons (with smallest average separation):")?,
                End::Worst => writeln!(out, "Worst possible Bacons (with largest average separation):")?,
            }
            for e in entries {
                writeln!(out, "{}  {}", e.actor, e.score)?;
            }
            Ok(())
        }
        Answer::Degree { end, entries } => {
            match end {
                End::Best => writeln!(out, "Best possible Bacons (with largest degree):")?,
                End::Worst => writeln!(out, "Worst possible Bacons (with smallest degree):")?,
            }
            for e in entries {
                writeln!(out, "{}    {}", e.actor, e.score)?;
            }
            Ok(())
        }
        Answer::Error { message } => writeln!(out, "{message}"),
        Answer::Goodbye => writeln!(out, "\nGame over. Thank you for playing!"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(answer: &Answer) -> String {
        let mut buf = Vec::new();
        write_answer(&mut buf, OutputFormat::Text, answer).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_path() {
        let answer = Answer::Path {
            target: "Meg Ryan".to_string(),
            center: "Kevin Bacon".to_string(),
            steps: vec![
                Step {
                    actor: "Meg Ryan".to_string(),
                    movies: vec!["Sleepless in Seattle".to_string(), "You've Got Mail".to_string()],
                    costar: "Tom Hanks".to_string(),
                },
                Step {
                    actor: "Tom Hanks".to_string(),
                    movies: vec!["Apollo 13".to_string()],
                    costar: "Kevin Bacon".to_string(),
                },
            ],
        };
        assert_eq!(
            text(&answer),
            "Meg Ryan's number is 2\n\
             Meg Ryan appeared in [Sleepless in Seattle, You've Got Mail] with Tom Hanks\n\
             Tom Hanks appeared in [Apollo 13] with Kevin Bacon\n"
        );
    }

    #[test]
    fn test_text_undefined_separation() {
        let answer = Answer::Separation {
            center: "Loner".to_string(),
            average: None,
        };
        assert!(text(&answer).contains("undefined"));
    }

    #[test]
    fn test_text_degree_worst() {
        let answer = Answer::Degree {
            end: End::Worst,
            entries: vec![Entry {
                actor: "Loner".to_string(),
                score: 0,
            }],
        };
        assert_eq!(
            text(&answer),
            "Worst possible Bacons (with smallest degree):\nLoner    0\n"
        );
    }

    #[test]
    fn test_json_tagged() {
        let mut buf = Vec::new();
        let answer = Answer::Separation {
            center: "Kevin Bacon".to_string(),
            average: Some(1.5),
        };
        write_answer(&mut buf, OutputFormat::Json, &answer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["kind"], "separation");
        assert_eq!(value["average"], 1.5);
        assert_eq!(value["center"], "Kevin Bacon");
    }

    #[test]
    fn test_json_ranking_end() {
        let mut buf = Vec::new();
        let answer = Answer::Centers {
            end: End::Best,
            entries: vec![Entry {
                actor: "Tom Hanks".to_string(),
                score: 1.0,
            }],
        };
        write_answer(&mut buf, OutputFormat::Json, &answer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["end"], "best");
        assert_eq!(value["entries"][0]["actor"], "Tom Hanks");
    }
}
