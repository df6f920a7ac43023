use costar_core::{build_graph, CollabGraph};
use std::time::Instant;

/// A generated dataset: every actor, plus (title, cast) per movie.
struct Casting {
    actors: Vec<String>,
    movies: Vec<(String, Vec<String>)>,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let actor_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: costar-bench [mode] [actor_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  ensemble    Uniformly random casts (baseline)");
        println!("  starsystem  Casts favor already-busy actors (hub-and-spoke)");
        println!("  smallworld  Local troupes with occasional guest stars");
        println!("  troupes     Isolated troupes joined by a thin chain of cameos");
        println!();
        println!("Default actor_count: 200000");
        return;
    }

    println!("costar-bench");
    println!("============");
    println!();

    let generators: Vec<(&str, fn(u64) -> Casting)> = match mode {
        "ensemble" => vec![("Ensemble (uniform casts)", gen_ensemble)],
        "starsystem" => vec![("Star system (preferential casting)", gen_star_system)],
        "smallworld" => vec![("Small-world (troupes + guests)", gen_small_world)],
        "troupes" => vec![("Troupes (cameo chain)", gen_troupes)],
        "all" => vec![
            ("Ensemble (uniform casts)", gen_ensemble as fn(u64) -> Casting),
            ("Star system (preferential casting)", gen_star_system),
            ("Small-world (troupes + guests)", gen_small_world),
            ("Troupes (cameo chain)", gen_troupes),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, actor_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Casting, actor_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} actors", actor_count);

    let t = Instant::now();
    let casting = generator(actor_count);
    let movie_count = casting.movies.len();
    let gen_time = t.elapsed();

    let t = Instant::now();
    let graph = build_graph(casting.actors, casting.movies);
    let build_time = t.elapsed();
    println!(
        "Generated {} movies in {:.2}s, built in {:.2}s: {} actors, {} costar pairs, ~{:.0}MB",
        movie_count,
        gen_time.as_secs_f64(),
        build_time.as_secs_f64(),
        graph.num_vertices(),
        graph.num_edges() / 2,
        graph.memory_usage() as f64 / 1_048_576.0
    );
    if graph.num_vertices() == 0 {
        println!();
        return;
    }

    let center = graph.vertex(0).clone();
    println!();
    println!("{:>14} {:>12} {:>10}", "step", "result", "time");
    println!("{:->14} {:->12} {:->10}", "", "", "");

    let t = Instant::now();
    let tree = costar_core::bfs(&graph, center.as_str());
    report("path tree", tree.num_vertices().to_string(), t);

    let t = Instant::now();
    let avg = costar_core::average_separation(&tree, center.as_str());
    report(
        "avg sep",
        avg.map_or_else(|| "undefined".to_string(), |a| format!("{:.3}", a)),
        t,
    );

    let t = Instant::now();
    let missing = costar_core::missing_vertices(&graph, &tree);
    report("unreachable", missing.len().to_string(), t);

    let far = graph.vertex(graph.num_vertices() - 1).clone();
    let t = Instant::now();
    let path = costar_core::get_path(&tree, far.as_str());
    report(
        "far path",
        path.map_or_else(|| "none".to_string(), |p| format!("{} hops", p.len() - 1)),
        t,
    );

    let t = Instant::now();
    let top = costar_core::rank_by_degree(&graph, 5);
    report(
        "top degree",
        top.ok()
            .and_then(|r| r.entries.first().map(|e| e.score.to_string()))
            .unwrap_or_default(),
        t,
    );

    // One BFS per candidate: sample instead of ranking the whole component
    let sample = 16;
    let t = Instant::now();
    let best = costar_core::rank_by_average_separation(&graph, tree.vertices().take(sample), 1);
    report(
        "best of 16",
        best.ok()
            .and_then(|r| r.entries.first().map(|e| format!("{:.3}", e.score)))
            .unwrap_or_else(|| "undefined".to_string()),
        t,
    );

    tree_depth_histogram(&tree);
    println!();
}

fn report(step: &str, result: String, started: Instant) {
    println!(
        "{:>14} {:>12} {:>8.1}ms",
        step,
        result,
        started.elapsed().as_secs_f64() * 1000.0
    );
}

fn tree_depth_histogram(tree: &CollabGraph) {
    let mut counts: Vec<usize> = Vec::new();
    for depth in costar_core::tree_depths(tree).into_iter().flatten() {
        let depth = depth as usize;
        if counts.len() <= depth {
            counts.resize(depth + 1, 0);
        }
        counts[depth] += 1;
    }
    let line: Vec<String> = counts
        .iter()
        .enumerate()
        .map(|(d, c)| format!("{}:{}", d, c))
        .collect();
    println!("{:>14} {}", "separations", line.join(" "));
}

// ---------------------------------------------------------------------------
// Generators: O(actors + cast slots), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn actor(i: u64) -> String {
    format!("a_{}", i)
}

fn actors(n: u64) -> Vec<String> {
    (0..n).map(actor).collect()
}

/// Cast size between 2 and 12.
fn cast_size(rng: &mut FastRng) -> u64 {
    2 + rng.next(11)
}

/// Ensemble: every movie draws its cast uniformly from all actors.
///
/// Baseline topology with no structure; separations stay small.
fn gen_ensemble(actor_count: u64) -> Casting {
    let mut rng = FastRng::new(54321);
    let movie_count = actor_count / 3;

    let movies = (0..movie_count)
        .map(|m| {
            let cast = (0..cast_size(&mut rng))
                .map(|_| actor(rng.next(actor_count)))
                .collect();
            (format!("Movie {}", m), cast)
        })
        .collect();

    Casting {
        actors: actors(actor_count),
        movies,
    }
}

/// Star system: preferential attachment via a casting ledger (O(slots)).
///
/// Every cast slot is appended to the ledger; drawing from it favors actors
/// proportionally to how often they already worked. Produces a few hubs
/// with very high degree.
fn gen_star_system(actor_count: u64) -> Casting {
    let mut rng = FastRng::new(12345);
    let mut ledger: Vec<u64> = Vec::with_capacity(actor_count as usize * 4);
    let mut movies = Vec::new();

    // Seed: one movie with the first few actors
    let seed = 5u64.min(actor_count);
    ledger.extend(0..seed);
    movies.push(("Movie 0".to_string(), (0..seed).map(actor).collect()));

    // Each newcomer debuts alongside veterans drawn from the ledger
    for newcomer in seed..actor_count {
        let mut cast = vec![newcomer];
        for _ in 0..cast_size(&mut rng) - 1 {
            cast.push(ledger[rng.next(ledger.len() as u64) as usize]);
        }
        ledger.extend(cast.iter().copied());
        movies.push((
            format!("Movie {}", movies.len()),
            cast.into_iter().map(actor).collect(),
        ));
    }

    Casting {
        actors: actors(actor_count),
        movies,
    }
}

/// Small-world: each movie casts neighbors on a ring of actors, with a small
/// chance of each slot going to a guest from anywhere.
///
/// High clustering with short separations, like Watts-Strogatz.
fn gen_small_world(actor_count: u64) -> Casting {
    let span = 10u64;
    let guest_p = 0.05f64;
    let mut rng = FastRng::new(67890);

    let movies = (0..actor_count)
        .map(|lead| {
            let cast = (0..cast_size(&mut rng))
                .map(|_| {
                    if rng.next_f64() < guest_p {
                        actor(rng.next(actor_count))
                    } else {
                        actor((lead + rng.next(span)) % actor_count)
                    }
                })
                .collect();
            (format!("Movie {}", lead), cast)
        })
        .collect();

    Casting {
        actors: actors(actor_count),
        movies,
    }
}

/// Troupes: fixed companies that only work together, linked in a chain by
/// one cameo per neighboring pair. Every tenth troupe never does a cameo,
/// so part of the graph is unreachable. Deep separations, long paths.
fn gen_troupes(actor_count: u64) -> Casting {
    let troupe_size = 20u64;
    let mut rng = FastRng::new(99999);
    let troupes = (actor_count / troupe_size).max(1);
    let mut movies = Vec::new();

    for t in 0..troupes {
        let base = t * troupe_size;
        let members: Vec<u64> = (base..(base + troupe_size).min(actor_count)).collect();
        if members.is_empty() {
            break;
        }

        for m in 0..3 {
            let cast = (0..cast_size(&mut rng))
                .map(|_| actor(members[rng.next(members.len() as u64) as usize]))
                .collect();
            movies.push((format!("Troupe {} Show {}", t, m), cast));
        }

        if t > 0 && t % 10 != 0 {
            let prev = base - troupe_size;
            movies.push((
                format!("Cameo {}", t),
                vec![actor(prev + rng.next(troupe_size)), actor(members[0])],
            ));
        }
    }

    Casting {
        actors: actors(actor_count),
        movies,
    }
}
