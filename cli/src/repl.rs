use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use costar_core::{PathOutcome, QueryError, Session};
use tracing::debug;

use crate::command::Command;
use crate::render::{self, write_answer, Answer, OutputFormat};

/// Read commands until `q` or end of input, answering each in turn.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    out: &mut W,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Text {
        writeln!(out, "{}", render::COMMANDS)?;
    }
    write_answer(out, format, &session.summary().into())?;

    let mut lines = input.lines();
    loop {
        if format == OutputFormat::Text {
            writeln!(out, "\nKevin Bacon game >")?;
        }
        out.flush()?;

        let Some(line) = lines.next() else {
            debug!("end of input");
            break;
        };
        let line = line.context("reading command")?;

        let answer = match line.parse::<Command>() {
            Ok(Command::Quit) => {
                write_answer(out, format, &Answer::Goodbye)?;
                break;
            }
            Ok(command) => answer(session, command),
            Err(e) => Answer::Error {
                message: e.to_string(),
            },
        };
        write_answer(out, format, &answer)?;
    }

    out.flush()?;
    Ok(())
}

/// Execute one command against the session.
pub fn answer(session: &mut Session, command: Command) -> Answer {
    debug!(?command, center = session.center(), "command");
    let result = match command {
        Command::Path(name) => path(session, name),
        Command::Universe(name) => session.set_center(&name).map(Answer::from),
        Command::Infinite => Ok(Answer::Unreachable {
            center: session.center().to_string(),
            actors: session.unreachable(),
        }),
        Command::Separation => Ok(Answer::Separation {
            center: session.center().to_string(),
            average: session.average_separation(),
        }),
        Command::Centers(n) => session.rank_centers(n).map(|ranking| {
            let (end, entries) = render::entries(ranking);
            Answer::Centers { end, entries }
        }),
        Command::Degree(n) => session.rank_degree(n).map(|ranking| {
            let (end, entries) = render::entries(ranking);
            Answer::Degree { end, entries }
        }),
        Command::Quit => Ok(Answer::Goodbye),
    };

    result.unwrap_or_else(|e| Answer::Error {
        message: describe(&e),
    })
}

fn path(session: &Session, name: String) -> Result<Answer, QueryError> {
    if name == session.center() {
        return Ok(Answer::SamePerson { name });
    }
    let center = session.center().to_string();
    Ok(match session.shortest_path(&name)? {
        PathOutcome::Found(hops) => Answer::Path {
            target: name,
            center,
            steps: hops.into_iter().map(Into::into).collect(),
        },
        PathOutcome::Unreachable => Answer::NoPath {
            target: name,
            center,
        },
    })
}

fn describe(e: &QueryError) -> String {
    match e {
        QueryError::UnknownVertex(_) => "Name not found. Please try again.".to_string(),
        QueryError::ZeroWindow => "Invalid numeric input. Please check commands.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use costar_core::build_graph;

    use super::*;
    use crate::render::End;

    fn strings(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn make_session() -> Session {
        let graph = build_graph(
            strings(&["Kevin Bacon", "Tom Hanks", "Meg Ryan", "Nobody Special"]),
            vec![
                ("Apollo 13".to_string(), strings(&["Kevin Bacon", "Tom Hanks"])),
                ("Sleepless in Seattle".to_string(), strings(&["Tom Hanks", "Meg Ryan"])),
            ],
        );
        Session::new(graph, "Kevin Bacon").unwrap()
    }

    fn transcript(input: &str, format: OutputFormat) -> String {
        let mut session = make_session();
        let mut out = Vec::new();
        run(&mut session, Cursor::new(input), &mut out, format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_answer_path() {
        let mut session = make_session();
        let Answer::Path { steps, .. } = answer(&mut session, Command::Path("Meg Ryan".into())) else {
            panic!("expected a path");
        };
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].movies, vec!["Apollo 13".to_string()]);
    }

    #[test]
    fn test_answer_path_outcomes() {
        let mut session = make_session();
        assert_eq!(
            answer(&mut session, Command::Path("Kevin Bacon".into())),
            Answer::SamePerson {
                name: "Kevin Bacon".into()
            }
        );
        assert_eq!(
            answer(&mut session, Command::Path("Nobody Special".into())),
            Answer::NoPath {
                target: "Nobody Special".into(),
                center: "Kevin Bacon".into(),
            }
        );
        assert_eq!(
            answer(&mut session, Command::Path("Who".into())),
            Answer::Error {
                message: "Name not found. Please try again.".into()
            }
        );
    }

    #[test]
    fn test_answer_universe_then_separation() {
        let mut session = make_session();
        assert_eq!(
            answer(&mut session, Command::Universe("Tom Hanks".into())),
            Answer::Center {
                center: "Tom Hanks".into(),
                connected: 2,
                total: 4,
            }
        );
        assert_eq!(
            answer(&mut session, Command::Separation),
            Answer::Separation {
                center: "Tom Hanks".into(),
                average: Some(1.0),
            }
        );
    }

    #[test]
    fn test_answer_rankings() {
        let mut session = make_session();
        let Answer::Degree { end, entries } = answer(&mut session, Command::Degree(1)) else {
            panic!("expected degree ranking");
        };
        assert_eq!(end, End::Best);
        assert_eq!(entries[0].actor, "Tom Hanks");

        let Answer::Centers { end, entries } = answer(&mut session, Command::Centers(-1)) else {
            panic!("expected center ranking");
        };
        assert_eq!(end, End::Worst);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].score, 1.5);
    }

    #[test]
    fn test_run_text_transcript() {
        let out = transcript("s\ni\nbogus\nq\ns\n", OutputFormat::Text);
        assert!(out.starts_with("Commands:"));
        assert!(out.contains("Kevin Bacon is now the center of the acting universe, connected to 2/4 actors."));
        assert!(out.contains("Average separation with center Kevin Bacon: 1.5"));
        assert!(out.contains("The actors with infinite separation from Kevin Bacon:\nNobody Special\n"));
        assert!(out.contains("Invalid feature. Please check commands."));
        assert!(out.ends_with("Game over. Thank you for playing!\n"));
        // nothing is answered after q
        assert_eq!(out.matches("Average separation").count(), 1);
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let out = transcript("u Meg Ryan\n", OutputFormat::Text);
        assert!(out.contains("Meg Ryan is now the center"));
        assert!(!out.contains("Game over"));
    }

    #[test]
    fn test_run_json_lines() {
        let out = transcript("p Meg Ryan\nc 0\n", OutputFormat::Json);
        let kinds: Vec<String> = out
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["kind"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(kinds, vec!["center", "path", "error"]);
    }
}
