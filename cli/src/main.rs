//! costar: interactive degrees-of-separation queries.
//!
//! Loads the actor, movie and cast tables, builds the collaboration graph via
//! costar-core, and answers commands from stdin until `q` or end of input.

mod args;
mod command;
mod config;
mod load;
mod render;
mod repl;

use std::io;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use costar_core::Session;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::args::Cli;
use crate::config::Config;
use crate::load::Dataset;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "costar_cli=info,costar_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(&cli)?;

    let start = Instant::now();
    let graph = Dataset::load(&config)?.into_graph();
    info!(
        actors = graph.num_vertices(),
        edges = graph.num_edges() / 2,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "graph ready"
    );

    let mut session = Session::new(graph, &config.center)
        .with_context(|| format!("starting center '{}'", config.center))?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&mut session, stdin.lock(), &mut stdout.lock(), config.format)
}
