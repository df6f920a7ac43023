use std::borrow::Borrow;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use rand::Rng;

use crate::error::QueryError;
use crate::graph::{Graph, VertexId};
use crate::traversal::bfs;

/// Which end of a ranking a window was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankEnd {
    /// Positive window: best entries first.
    Best,
    /// Negative window: worst entries first.
    Worst,
}

/// One ranked vertex with the statistic it was ranked by.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<V, S> {
    pub vertex: V,
    pub score: S,
}

/// A window of `|n|` entries from one end of a full ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking<V, S> {
    pub end: RankEnd,
    pub entries: Vec<Ranked<V, S>>,
}

/// Vertices from `v` up to the root, returned root-first with `v` last.
///
/// Follows each vertex's single outgoing tree edge until a vertex with
/// out-degree 0. Returns None if `v` is not in the tree (infinite
/// separation), or if the parent chain never terminates.
pub fn get_path<V, E, Q>(tree: &Graph<V, E>, v: &Q) -> Option<Vec<V>>
where
    V: Eq + Hash + Clone + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    let mut current = tree.id_of(v)?;
    let mut path = vec![tree.vertex(current).clone()];

    while let Some(edge) = tree.out_edges(current).first() {
        if path.len() > tree.num_vertices() {
            return None;
        }
        current = edge.target;
        path.push(tree.vertex(current).clone());
    }

    path.reverse();
    Some(path)
}

/// Vertices of `graph` absent from `subgraph`.
pub fn missing_vertices<V, E>(graph: &Graph<V, E>, subgraph: &Graph<V, E>) -> HashSet<V>
where
    V: Eq + Hash + Clone,
{
    graph
        .vertices()
        .filter(|v| !subgraph.has_vertex(*v))
        .cloned()
        .collect()
}

/// Sum of depths over the subtree rooted at `vertex`, where `vertex` itself
/// sits at `depth_so_far`. Children are in-neighbors (tree edges point
/// child to parent).
///
/// Iterative, so arbitrarily deep trees are fine. Returns 0 for a vertex not
/// in the tree.
pub fn sum_of_paths<V, E, Q>(tree: &Graph<V, E>, vertex: &Q, depth_so_far: u64) -> u64
where
    V: Eq + Hash + Clone + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    let Some(root) = tree.id_of(vertex) else {
        return 0;
    };

    let mut sum = 0;
    let mut stack: Vec<(VertexId, u64)> = vec![(root, depth_so_far)];
    while let Some((current, depth)) = stack.pop() {
        sum += depth;
        stack.extend(tree.in_edges(current).iter().map(|e| (e.target, depth + 1)));
    }
    sum
}

/// Mean separation of every non-root tree vertex from `root`.
///
/// None when the tree has fewer than two vertices: a lone root has no one to
/// be separated from.
pub fn average_separation<V, E, Q>(tree: &Graph<V, E>, root: &Q) -> Option<f64>
where
    V: Eq + Hash + Clone + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    let others = tree.num_vertices().checked_sub(1).filter(|&n| n > 0)?;
    if !tree.has_vertex(root) {
        return None;
    }
    Some(sum_of_paths(tree, root, 0) as f64 / others as f64)
}

/// All vertices, highest in-degree first. Ties keep insertion order.
pub fn vertices_by_in_degree<V, E>(graph: &Graph<V, E>) -> Vec<V>
where
    V: Eq + Hash + Clone,
{
    let mut ids: Vec<VertexId> = (0..graph.num_vertices()).collect();
    ids.sort_by_key(|&id| Reverse(graph.in_edges(id).len()));
    ids.into_iter().map(|id| graph.vertex(id).clone()).collect()
}

/// All vertices, highest frequency first. Vertices missing from `freqs`
/// count as 0. Ties keep insertion order.
pub fn vertices_by_frequency<V, E>(graph: &Graph<V, E>, freqs: &HashMap<V, u32>) -> Vec<V>
where
    V: Eq + Hash + Clone,
{
    let mut vs: Vec<V> = graph.vertices().cloned().collect();
    vs.sort_by_key(|v| Reverse(freqs.get(v).copied().unwrap_or(0)));
    vs
}

/// Random walk from `start`, continuing while a uniform draw is below
/// `keep_on` and the current vertex has somewhere to go.
///
/// None if `start` is not in the graph or `keep_on` is outside (0, 1).
pub fn random_walk<V, E, Q, R>(graph: &Graph<V, E>, start: &Q, keep_on: f64, rng: &mut R) -> Option<Vec<V>>
where
    V: Eq + Hash + Clone + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    R: Rng,
{
    if !(keep_on > 0.0 && keep_on < 1.0) {
        return None;
    }
    let mut current = graph.id_of(start)?;
    let mut path = vec![graph.vertex(current).clone()];

    while rng.gen::<f64>() < keep_on {
        let edges = graph.out_edges(current);
        if edges.is_empty() {
            break;
        }
        current = edges[rng.gen_range(0..edges.len())].target;
        path.push(graph.vertex(current).clone());
    }

    Some(path)
}

/// Visit counts from `num_walks` random walks, each starting at a uniformly
/// chosen vertex. Only steps are counted, not starting points.
///
/// None if `keep_on` is outside (0, 1).
pub fn random_walks<V, E, R>(
    graph: &Graph<V, E>,
    keep_on: f64,
    num_walks: usize,
    rng: &mut R,
) -> Option<HashMap<V, u32>>
where
    V: Eq + Hash + Clone,
    R: Rng,
{
    if !(keep_on > 0.0 && keep_on < 1.0) {
        return None;
    }

    let mut counts = vec![0u32; graph.num_vertices()];
    if graph.num_vertices() > 0 {
        for _ in 0..num_walks {
            let mut current = rng.gen_range(0..graph.num_vertices());
            while rng.gen::<f64>() < keep_on {
                let edges = graph.out_edges(current);
                if edges.is_empty() {
                    break;
                }
                current = edges[rng.gen_range(0..edges.len())].target;
                counts[current] += 1;
            }
        }
    }

    Some(
        counts
            .into_iter()
            .enumerate()
            .map(|(id, c)| (graph.vertex(id).clone(), c))
            .collect(),
    )
}

/// Take `|n|` entries from a best-first ranking: the head for positive `n`,
/// the tail (worst first) for negative `n`.
///
/// The cutoff is strict, so a group tied at the boundary may be split.
pub fn window<T>(mut best_first: Vec<T>, n: i64) -> Result<(RankEnd, Vec<T>), QueryError> {
    if n == 0 {
        return Err(QueryError::ZeroWindow);
    }
    let take = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
    let end = if n > 0 {
        RankEnd::Best
    } else {
        best_first.reverse();
        RankEnd::Worst
    };
    best_first.truncate(take);
    Ok((end, best_first))
}

/// Rank vertices by degree: `n > 0` gives the `n` best connected, `n < 0`
/// the `|n|` least connected (least first).
pub fn rank_by_degree<V, E>(graph: &Graph<V, E>, n: i64) -> Result<Ranking<V, usize>, QueryError>
where
    V: Eq + Hash + Clone,
{
    let ranked: Vec<Ranked<V, usize>> = vertices_by_in_degree(graph)
        .into_iter()
        .map(|v| {
            let score = graph.in_degree(&v);
            Ranked { vertex: v, score }
        })
        .collect();
    let (end, entries) = window(ranked, n)?;
    Ok(Ranking { end, entries })
}

/// Rank `candidates` as centers by the average separation of their own path
/// tree: `n > 0` gives the `n` smallest averages, `n < 0` the `|n|` largest
/// (largest first).
///
/// Builds one tree per candidate. Candidates with no reachable neighbor have
/// no average and are left out. Equal averages keep candidate order.
pub fn rank_by_average_separation<'a, V, E, I>(
    graph: &Graph<V, E>,
    candidates: I,
    n: i64,
) -> Result<Ranking<V, f64>, QueryError>
where
    V: Eq + Hash + Clone + 'a,
    E: Clone,
    I: IntoIterator<Item = &'a V>,
{
    if n == 0 {
        return Err(QueryError::ZeroWindow);
    }

    let mut ranked: Vec<Ranked<V, f64>> = candidates
        .into_iter()
        .filter_map(|center| {
            let tree = bfs(graph, center);
            average_separation(&tree, center).map(|score| Ranked {
                vertex: center.clone(),
                score,
            })
        })
        .collect();
    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));

    let (end, entries) = window(ranked, n)?;
    Ok(Ranking { end, entries })
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// A-B (movie1), B-C (movie2), plus isolated D.
    fn make_scenario() -> Graph<&'static str, &'static str> {
        let mut g = Graph::new();
        for v in ["A", "B", "C", "D"] {
            g.insert_vertex(v);
        }
        g.insert_undirected("A", "B", "movie1").unwrap();
        g.insert_undirected("B", "C", "movie2").unwrap();
        g
    }

    fn make_chain(n: u32) -> Graph<u32, ()> {
        let mut g = Graph::new();
        for i in 0..n {
            g.insert_vertex(i);
        }
        for i in 1..n {
            g.insert_undirected(&(i - 1), &i, ()).unwrap();
        }
        g
    }

    fn make_star(leaves: u32) -> Graph<u32, ()> {
        let mut g = Graph::new();
        g.insert_vertex(0u32);
        for i in 1..=leaves {
            g.insert_vertex(i);
            g.insert_undirected(&0, &i, ()).unwrap();
        }
        g
    }

    // --- Path tests ---

    #[test]
    fn test_path_scenario() {
        let g = make_scenario();
        let tree = bfs(&g, "A");
        assert_eq!(get_path(&tree, "C"), Some(vec!["A", "B", "C"]));
        assert_eq!(get_path(&tree, "B"), Some(vec!["A", "B"]));
    }

    #[test]
    fn test_path_root_is_singleton() {
        let g = make_scenario();
        let tree = bfs(&g, "B");
        assert_eq!(get_path(&tree, "B"), Some(vec!["B"]));
    }

    #[test]
    fn test_path_unreachable() {
        let g = make_scenario();
        let tree = bfs(&g, "A");
        assert_eq!(get_path(&tree, "D"), None);
        assert_eq!(get_path(&tree, "nobody"), None);
    }

    #[test]
    fn test_path_long_chain() {
        let g = make_chain(500);
        let tree = bfs(&g, &0);
        let path = get_path(&tree, &499).unwrap();
        assert_eq!(path.len(), 500);
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&499));
    }

    // --- Missing vertices ---

    #[test]
    fn test_missing_scenario() {
        let g = make_scenario();
        let tree = bfs(&g, "A");
        assert_eq!(missing_vertices(&g, &tree), HashSet::from(["D"]));

        let from_d = bfs(&g, "D");
        assert_eq!(missing_vertices(&g, &from_d), HashSet::from(["A", "B", "C"]));
    }

    #[test]
    fn test_missing_partitions_graph() {
        let g = make_scenario();
        for source in ["A", "B", "C", "D"] {
            let tree = bfs(&g, source);
            let missing = missing_vertices(&g, &tree);
            let reached: HashSet<_> = tree.vertices().copied().collect();
            assert!(missing.is_disjoint(&reached));
            let union: HashSet<_> = missing.union(&reached).copied().collect();
            let all: HashSet<_> = g.vertices().copied().collect();
            assert_eq!(union, all);
        }
    }

    // --- Separation ---

    #[test]
    fn test_average_separation_scenario() {
        let g = make_scenario();
        let tree = bfs(&g, "A");
        assert_eq!(sum_of_paths(&tree, "A", 0), 3);
        assert_eq!(average_separation(&tree, "A"), Some(1.5));
    }

    #[test]
    fn test_average_separation_isolated_is_undefined() {
        let g = make_scenario();
        let tree = bfs(&g, "D");
        assert_eq!(tree.num_vertices(), 1);
        assert_eq!(average_separation(&tree, "D"), None);
    }

    #[test]
    fn test_average_separation_empty_tree() {
        let g = make_scenario();
        let tree = bfs(&g, "nobody");
        assert_eq!(average_separation(&tree, "nobody"), None);
    }

    #[test]
    fn test_sum_of_paths_offset() {
        let g = make_star(4);
        let tree = bfs(&g, &0);
        // root at depth 2, four leaves at depth 3
        assert_eq!(sum_of_paths(&tree, &0, 2), 2 + 4 * 3);
        assert_eq!(sum_of_paths(&tree, &1, 5), 5);
        assert_eq!(sum_of_paths(&tree, &77, 0), 0);
    }

    #[test]
    fn test_sum_of_paths_deep_chain() {
        let n = 100_000u32;
        let g = make_chain(n);
        let tree = bfs(&g, &0);
        let expected = (n as u64 - 1) * n as u64 / 2;
        assert_eq!(sum_of_paths(&tree, &0, 0), expected);
    }

    #[test]
    fn test_average_separation_relabel_invariant() {
        let g = make_chain(6);
        let mut relabeled: Graph<String, ()> = Graph::new();
        for i in (0..6u32).rev() {
            relabeled.insert_vertex(format!("v{}", i * 7));
        }
        for i in 1..6u32 {
            let a = format!("v{}", (i - 1) * 7);
            let b = format!("v{}", i * 7);
            relabeled.insert_undirected(a.as_str(), b.as_str(), ()).unwrap();
        }
        for i in 0..6u32 {
            let original = average_separation(&bfs(&g, &i), &i);
            let name = format!("v{}", i * 7);
            let renamed = average_separation(&bfs(&relabeled, name.as_str()), name.as_str());
            assert_eq!(original, renamed);
        }
    }

    // --- Degree ranking ---

    #[test]
    fn test_in_degree_order_scenario() {
        let g = make_scenario();
        assert_eq!(vertices_by_in_degree(&g), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_rank_by_degree_windows() {
        let g = make_scenario();
        let best = rank_by_degree(&g, 2).unwrap();
        assert_eq!(best.end, RankEnd::Best);
        let best: Vec<_> = best.entries.iter().map(|r| (r.vertex, r.score)).collect();
        assert_eq!(best, vec![("B", 2), ("A", 1)]);

        let worst = rank_by_degree(&g, -2).unwrap();
        assert_eq!(worst.end, RankEnd::Worst);
        let worst: Vec<_> = worst.entries.iter().map(|r| (r.vertex, r.score)).collect();
        assert_eq!(worst, vec![("D", 0), ("C", 1)]);
    }

    #[test]
    fn test_rank_window_larger_than_graph() {
        let g = make_scenario();
        assert_eq!(rank_by_degree(&g, 50).unwrap().entries.len(), 4);
        assert_eq!(rank_by_degree(&g, i64::MIN).unwrap().entries.len(), 4);
    }

    #[test]
    fn test_rank_zero_window() {
        let g = make_scenario();
        assert_eq!(rank_by_degree(&g, 0), Err(QueryError::ZeroWindow));
        let all: Vec<_> = g.vertices().collect();
        assert_eq!(
            rank_by_average_separation(&g, all, 0),
            Err(QueryError::ZeroWindow)
        );
    }

    // --- Separation ranking ---

    #[test]
    fn test_rank_by_average_separation_chain() {
        // 0-1-2-3-4: center 2 is best (1.5), endpoints worst (2.5)
        let g = make_chain(5);
        let best = rank_by_average_separation(&g, g.vertices(), 1).unwrap();
        assert_eq!(best.entries, vec![Ranked { vertex: 2, score: 1.5 }]);

        let worst = rank_by_average_separation(&g, g.vertices(), -2).unwrap();
        let worst: Vec<_> = worst.entries.iter().map(|r| (r.vertex, r.score)).collect();
        assert_eq!(worst, vec![(4, 2.5), (0, 2.5)]);
    }

    #[test]
    fn test_rank_by_average_separation_skips_isolated() {
        let g = make_scenario();
        let ranking = rank_by_average_separation(&g, g.vertices(), 10).unwrap();
        let names: Vec<_> = ranking.entries.iter().map(|r| r.vertex).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    // --- Random walks ---

    #[test]
    fn test_random_walk_bad_args() {
        let g = make_scenario();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_walk(&g, "A", 0.0, &mut rng), None);
        assert_eq!(random_walk(&g, "A", 1.0, &mut rng), None);
        assert_eq!(random_walk(&g, "nobody", 0.5, &mut rng), None);
        assert_eq!(random_walks(&g, 1.5, 10, &mut rng), None);
    }

    #[test]
    fn test_random_walk_follows_edges() {
        let g = make_chain(20);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let walk = random_walk(&g, &10, 0.9, &mut rng).unwrap();
            assert_eq!(walk[0], 10);
            for pair in walk.windows(2) {
                assert!(g.has_edge(&pair[0], &pair[1]));
            }
        }
    }

    #[test]
    fn test_random_walk_stuck_at_isolated() {
        let g = make_scenario();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(random_walk(&g, "D", 0.99, &mut rng), Some(vec!["D"]));
    }

    #[test]
    fn test_random_walks_frequency_ranking() {
        let g = make_star(20);
        let mut rng = StdRng::seed_from_u64(5);
        let freqs = random_walks(&g, 0.8, 2_000, &mut rng).unwrap();
        assert_eq!(freqs.len(), 21);
        // Every step out of a leaf lands on the hub
        let ranked = vertices_by_frequency(&g, &freqs);
        assert_eq!(ranked[0], 0);
        assert!(freqs[&0] > 0);
    }

    #[test]
    fn test_vertices_by_frequency_missing_counts_zero() {
        let g = make_scenario();
        let freqs = HashMap::from([("C", 5), ("A", 5), ("B", 1)]);
        assert_eq!(vertices_by_frequency(&g, &freqs), vec!["A", "C", "B", "D"]);
    }
}
