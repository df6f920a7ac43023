use std::str::FromStr;

use thiserror::Error;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `c <n>`: best (n > 0) or worst (n < 0) centers by average separation
    Centers(i64),
    /// `d <n>`: best (n > 0) or worst (n < 0) actors by degree
    Degree(i64),
    /// `i`: actors with infinite separation
    Infinite,
    /// `p <name>`: path from name to the center
    Path(String),
    /// `s`: average separation from the center
    Separation,
    /// `u <name>`: new center
    Universe(String),
    /// `q`
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid feature. Please check commands.")]
    UnknownCommand,
    #[error("Invalid numeric input. Please check commands.")]
    InvalidNumber,
    #[error("Please give a name after the command.")]
    MissingName,
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut terms = line.split_whitespace();
        let mode = terms.next().ok_or(ParseError::UnknownCommand)?;
        let rest: Vec<&str> = terms.collect();

        match mode {
            "c" => window(&rest).map(Command::Centers),
            "d" => window(&rest).map(Command::Degree),
            "p" => name(&rest).map(Command::Path),
            "u" => name(&rest).map(Command::Universe),
            "i" | "s" | "q" if !rest.is_empty() => Err(ParseError::UnknownCommand),
            "i" => Ok(Command::Infinite),
            "s" => Ok(Command::Separation),
            "q" => Ok(Command::Quit),
            _ => Err(ParseError::UnknownCommand),
        }
    }
}

/// Exactly one non-zero integer.
fn window(rest: &[&str]) -> Result<i64, ParseError> {
    match rest {
        [n] => match n.parse::<i64>() {
            Ok(0) | Err(_) => Err(ParseError::InvalidNumber),
            Ok(n) => Ok(n),
        },
        _ => Err(ParseError::InvalidNumber),
    }
}

/// The rest of the line, single-spaced.
fn name(rest: &[&str]) -> Result<String, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingName);
    }
    Ok(rest.join(" "))
}
