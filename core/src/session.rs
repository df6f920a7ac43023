//! Query context over one collaboration graph and its current center.
//!
//! The path tree is derived state: it is rebuilt whenever the center changes
//! and read by every other query.

use tracing::{debug, info};

use crate::analytics::{self, Ranking};
use crate::collab::{CollabGraph, Movies};
use crate::error::QueryError;
use crate::traversal::bfs;

/// One hop of a separation path: `actor` appeared in `movies` with `costar`,
/// who is one step closer to the center.
#[derive(Debug, Clone, PartialEq)]
pub struct Hop {
    pub actor: String,
    pub costar: String,
    pub movies: Movies,
}

/// Result of a path query. Unreachable is an ordinary outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome {
    /// Hops from the target toward the center. Empty when the target is the
    /// center.
    Found(Vec<Hop>),
    /// The target exists but has no path to the center.
    Unreachable,
}

impl PathOutcome {
    /// Separation number: hops to the center, None when unreachable.
    pub fn separation(&self) -> Option<usize> {
        match self {
            PathOutcome::Found(hops) => Some(hops.len()),
            PathOutcome::Unreachable => None,
        }
    }
}

/// Size of the center's component relative to the whole graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CenterSummary {
    pub center: String,
    /// Actors with a finite separation, excluding the center itself.
    pub connected: usize,
    pub total: usize,
}

/// A collaboration graph with a current center and its path tree.
pub struct Session {
    graph: CollabGraph,
    center: String,
    tree: CollabGraph,
}

impl Session {
    /// Start a session centered on `center`, which must be in the graph.
    pub fn new(graph: CollabGraph, center: &str) -> Result<Self, QueryError> {
        if !graph.has_vertex(center) {
            return Err(QueryError::UnknownVertex(center.to_string()));
        }
        let tree = bfs(&graph, center);
        Ok(Self {
            graph,
            center: center.to_string(),
            tree,
        })
    }

    pub fn graph(&self) -> &CollabGraph {
        &self.graph
    }

    pub fn tree(&self) -> &CollabGraph {
        &self.tree
    }

    pub fn center(&self) -> &str {
        &self.center
    }

    pub fn summary(&self) -> CenterSummary {
        CenterSummary {
            center: self.center.clone(),
            connected: self.tree.num_vertices().saturating_sub(1),
            total: self.graph.num_vertices(),
        }
    }

    /// Move the center and rebuild the path tree. An unknown name leaves the
    /// session unchanged.
    pub fn set_center(&mut self, center: &str) -> Result<CenterSummary, QueryError> {
        if !self.graph.has_vertex(center) {
            return Err(QueryError::UnknownVertex(center.to_string()));
        }
        if center != self.center {
            self.tree = bfs(&self.graph, center);
            self.center = center.to_string();
            debug!(center, reached = self.tree.num_vertices(), "center moved");
        }
        Ok(self.summary())
    }

    /// Path from `target` to the center, with the movies linking each hop.
    pub fn shortest_path(&self, target: &str) -> Result<PathOutcome, QueryError> {
        if !self.graph.has_vertex(target) {
            return Err(QueryError::UnknownVertex(target.to_string()));
        }
        let Some(mut path) = analytics::get_path(&self.tree, target) else {
            return Ok(PathOutcome::Unreachable);
        };

        // get_path is root-first; hops read from the target inward
        path.reverse();
        let hops = path
            .windows(2)
            .map(|pair| Hop {
                movies: self
                    .tree
                    .label(pair[0].as_str(), pair[1].as_str())
                    .cloned()
                    .unwrap_or_default(),
                actor: pair[0].clone(),
                costar: pair[1].clone(),
            })
            .collect();
        Ok(PathOutcome::Found(hops))
    }

    /// Actors with no path to the center, sorted by name.
    pub fn unreachable(&self) -> Vec<String> {
        let mut missing: Vec<String> = analytics::missing_vertices(&self.graph, &self.tree)
            .into_iter()
            .collect();
        missing.sort();
        missing
    }

    /// Average separation from the center; None if nobody is connected.
    pub fn average_separation(&self) -> Option<f64> {
        analytics::average_separation(&self.tree, self.center.as_str())
    }

    /// Rank the actors connected to the current center (center included) by
    /// their own average separation. One tree build per candidate.
    pub fn rank_centers(&self, n: i64) -> Result<Ranking<String, f64>, QueryError> {
        info!(
            candidates = self.tree.num_vertices(),
            "ranking centers by average separation"
        );
        analytics::rank_by_average_separation(&self.graph, self.tree.vertices(), n)
    }

    /// Rank every actor by number of distinct costars.
    pub fn rank_degree(&self, n: i64) -> Result<Ranking<String, usize>, QueryError> {
        analytics::rank_by_degree(&self.graph, n)
    }
}
