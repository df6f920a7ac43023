//! costar-core: In-memory collaboration graph and separation analytics.
//!
//! A pure Rust library that stores a generic labeled graph, builds BFS
//! shortest-path trees rooted at a chosen center, and derives separation
//! statistics and rankings from them. No file or console I/O; loading and
//! the interactive front end live in `costar-cli`.

mod analytics;
mod collab;
mod error;
mod graph;
mod session;
mod traversal;

pub use analytics::{
    average_separation, get_path, missing_vertices, random_walk, random_walks,
    rank_by_average_separation, rank_by_degree, sum_of_paths, vertices_by_frequency,
    vertices_by_in_degree, window, RankEnd, Ranked, Ranking,
};
pub use collab::{build_graph, CollabGraph, Movies};
pub use error::{Endpoint, GraphError, QueryError};
pub use graph::{Edge, Graph, VertexId};
pub use session::{CenterSummary, Hop, PathOutcome, Session};
pub use traversal::{bfs, tree_depths};
