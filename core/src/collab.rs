//! Actor collaboration graphs: actors are vertices, and two actors share an
//! edge labeled with every movie they both appear in.

use std::collections::BTreeSet;

use tracing::debug;

use crate::graph::{Graph, VertexId};

/// Titles of the movies two actors share. Ordered so labels print stably.
pub type Movies = BTreeSet<String>;

pub type CollabGraph = Graph<String, Movies>;

/// Build the collaboration graph.
///
/// Every actor becomes a vertex, including actors with no movies. For each
/// movie, every pair of distinct cast members gets an edge; a pair that
/// already shares an edge has the title added to its label. Cast members not
/// listed in `actors` are inserted on first sight.
///
/// Movies are processed in the order given; edge insertion order (and so
/// neighbor order during traversal) follows from it.
pub fn build_graph<A, M, C>(actors: A, movies: M) -> CollabGraph
where
    A: IntoIterator<Item = String>,
    M: IntoIterator<Item = (String, C)>,
    C: IntoIterator<Item = String>,
{
    let mut graph = CollabGraph::new();
    for actor in actors {
        graph.insert_vertex(actor);
    }

    let mut movie_count = 0usize;
    for (title, cast) in movies {
        movie_count += 1;

        let mut ids: Vec<VertexId> = cast.into_iter().map(|a| graph.insert_vertex(a)).collect();
        ids.sort_unstable();
        ids.dedup();

        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                add_shared_movie(&mut graph, a, b, &title);
            }
        }
    }

    debug!(
        actors = graph.num_vertices(),
        movies = movie_count,
        edges = graph.num_edges() / 2,
        "collaboration graph built"
    );
    graph
}

fn add_shared_movie(graph: &mut CollabGraph, a: VertexId, b: VertexId, title: &str) {
    if let Some(movies) = graph.label_between_mut(a, b) {
        movies.insert(title.to_string());
    } else {
        graph.link_undirected(a, b, Movies::from([title.to_string()]));
    }
}
