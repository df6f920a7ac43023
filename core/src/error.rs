use std::fmt;

use thiserror::Error;

/// Which end of an edge insertion referred to an unknown vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

/// Structural errors from graph mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("edge {0} vertex is not in the graph")]
    MissingVertex(Endpoint),
}

/// Errors from session-level queries. Unreachable targets and undefined
/// averages are results, not errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("'{0}' is not in the graph")]
    UnknownVertex(String),

    #[error("ranking window must be non-zero")]
    ZeroWindow,
}
