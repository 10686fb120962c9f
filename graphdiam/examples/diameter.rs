//! Computes the diameter of an undirected graph stored as whitespace
//! delimited edge lists across sharded input files.

use std::path::PathBuf;
use std::time::Instant;

use serde_json::json;
use structopt::StructOpt;

use graphdiam::reorder::Layout;
use graphdiam::{diameter, graphio, Error, Scanner, SummaryStats};

/// Reads edge-list files, one `a b` edge per line.
///
/// Vertices are relabeled with the chosen layout before an all-sources
/// BFS computes the longest shortest path.
#[derive(Debug, StructOpt)]
#[structopt(name = "diameter", about = "Compute the diameter of a graph.")]
struct Opt {
    /// Edge-list files; names may be any whitespace-free token.
    #[structopt(long, required = true)]
    edges: Vec<PathBuf>,

    /// Worker threads. Defaults to the number of logical CPUs.
    #[structopt(long)]
    threads: Option<usize>,

    /// Vertex layout: bfs, degree or identity.
    #[structopt(long, default_value = "bfs")]
    layout: Layout,

    /// Also compute every vertex's eccentricity and report their spread.
    #[structopt(long)]
    eccentricities: bool,
}

fn main() -> Result<(), Error> {
    let opt = Opt::from_args();

    if let Some(threads) = opt.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .expect("rayon global pool is configured once");
    }

    let load_graph_start = Instant::now();
    let scanner = Scanner::new(opt.edges);
    let builder = graphio::read_edges(&scanner)?;
    let (graph, symbols) = builder.build_with(&opt.layout);
    println!(
        "{}",
        json!({
            "load_graph_duration":
                format!("{:.0?}", Instant::now().duration_since(load_graph_start)),
            "layout": format!("{:?}", opt.layout),
        })
    );

    let max_degree = graph.vertices().map(|v| graph.degree(v)).max().unwrap_or(0);
    println!(
        "{}",
        json!({
            "nvertices": graph.nvertices(),
            "nedges": graph.nedges(),
            "max_degree": max_degree,
        })
    );

    let diameter_start = Instant::now();
    let diameter = diameter::diameter(&graph);
    println!(
        "{}",
        json!({
            "diameter": diameter,
            "nthreads": rayon::current_num_threads(),
            "diameter_duration": format!("{:.0?}", Instant::now().duration_since(diameter_start)),
        })
    );

    if opt.eccentricities {
        let eccentricities_start = Instant::now();
        let eccs = diameter::eccentricities(&graph);
        let peripheral = eccs
            .iter()
            .position(|&e| e == diameter)
            .and_then(|v| symbols.name(v as u32))
            .map(|name| name.to_string());
        println!(
            "{}",
            json!({
                "eccentricities": SummaryStats::from(eccs.iter().map(|&e| f64::from(e)))
                    .map(|stats| stats.to_map()),
                "peripheral_vertex": peripheral,
                "eccentricities_duration":
                    format!("{:.0?}", Instant::now().duration_since(eccentricities_start)),
            })
        );
    }

    Ok(())
}
