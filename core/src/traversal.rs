use std::borrow::Borrow;
use std::collections::VecDeque;
use std::hash::Hash;

use tracing::debug;

use crate::graph::{Graph, VertexId};

/// Build the BFS path tree rooted at `source`.
///
/// Every discovered vertex gets exactly one outgoing tree edge, pointing at
/// the vertex it was discovered from and carrying a clone of the graph's
/// `(child, parent)` label. The root has no outgoing edge. Vertices outside
/// the source's component are absent from the tree.
///
/// Returns an empty graph if `source` is not in `graph`.
///
/// Neighbors are visited in the graph's adjacency order, so the tree shape is
/// a deterministic function of insertion order. Each vertex is enqueued at
/// most once: O(V + E).
pub fn bfs<V, E, Q>(graph: &Graph<V, E>, source: &Q) -> Graph<V, E>
where
    V: Eq + Hash + Clone + Borrow<Q>,
    E: Clone,
    Q: Hash + Eq + ?Sized,
{
    let Some(start) = graph.id_of(source) else {
        debug!("bfs: source not in graph, returning empty tree");
        return Graph::new();
    };

    // discovered[graph_id] = id of the same vertex in the tree
    let mut discovered: Vec<Option<VertexId>> = vec![None; graph.num_vertices()];
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    let mut tree = Graph::with_capacity(graph.num_vertices(), graph.num_vertices());

    discovered[start] = Some(tree.insert_vertex(graph.vertex(start).clone()));
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        let Some(parent) = discovered[current] else {
            continue;
        };

        for edge in graph.out_edges(current) {
            let next = edge.target;
            if discovered[next].is_some() {
                continue;
            }

            let child = tree.insert_vertex(graph.vertex(next).clone());
            discovered[next] = Some(child);
            queue.push_back(next);

            // Prefer the (child, parent) label; a purely directed graph only has
            // the edge we just walked.
            let label = graph
                .label_between(next, current)
                .unwrap_or_else(|| graph.slot_label(edge.slot));
            tree.link_directed(child, parent, label.clone());
        }
    }

    debug!(
        reached = tree.num_vertices(),
        total = graph.num_vertices(),
        "bfs: path tree built"
    );
    tree
}

/// Distance of every tree vertex from the root, indexed by tree vertex id.
///
/// Walks parent pointers with memoization, so each vertex is resolved once.
/// Vertices that never reach an out-degree-0 vertex stay `None`.
pub fn tree_depths<V, E>(tree: &Graph<V, E>) -> Vec<Option<u32>>
where
    V: Eq + Hash + Clone,
{
    let n = tree.num_vertices();
    let mut depth: Vec<Option<u32>> = vec![None; n];
    let mut chain: Vec<VertexId> = Vec::new();

    for id in 0..n {
        let mut current = id;
        chain.clear();
        let base = loop {
            if let Some(d) = depth[current] {
                break Some(d);
            }
            match tree.out_edges(current).first() {
                None => break Some(0),
                Some(_) if chain.len() > n => break None,
                Some(edge) => {
                    chain.push(current);
                    current = edge.target;
                }
            }
        };

        let Some(base) = base else { continue };
        depth[current] = Some(base);
        for (offset, &v) in chain.iter().rev().enumerate() {
            depth[v] = Some(base + offset as u32 + 1);
        }
    }

    depth
}
