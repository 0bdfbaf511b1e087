//! Peelgraph CLI: load an edge list and report shortest paths, edge
//! betweenness, tie analysis, or a multi-round peeling run.
//!
//! Reports go to stdout; logs go to stderr (filter with `RUST_LOG`).

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use peelgraph::algo::{
    average_neighborhood_overlap, dijkstra, edge_betweenness, ranked_edges,
    triadic_closure_violations,
};
use peelgraph::{
    EdgeListLoader, GraphMetrics, LoadedGraph, PeelConfig, PeelSession, RoundReport, SweepMode,
    VertexId,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "peelgraph", version, about = "Edge betweenness and community peeling")]
struct Cli {
    /// JSON config file; flags override its values
    #[arg(long, global = true, env = "PEELGRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for random edge weights
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Random weights are drawn from [0, max-weight)
    #[arg(long, global = true)]
    max_weight: Option<u64>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Sweep {
    AllPairs,
    UpperTriangle,
}

impl From<Sweep> for SweepMode {
    fn from(sweep: Sweep) -> Self {
        match sweep {
            Sweep::AllPairs => SweepMode::AllPairs,
            Sweep::UpperTriangle => SweepMode::UpperTriangle,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Repeatedly remove the highest-betweenness edge
    Peel {
        /// Edge list file
        file: PathBuf,

        /// Number of rounds
        #[arg(long)]
        rounds: Option<usize>,

        /// Strong-tie weight threshold
        #[arg(long)]
        threshold: Option<u64>,

        /// Vertex pairs visited by each betweenness pass
        #[arg(long)]
        sweep: Option<Sweep>,
    },
    /// Shortest weighted path between two vertices
    Path {
        file: PathBuf,
        source: VertexId,
        target: VertexId,
    },
    /// Edges ranked by betweenness after one pass
    Betweenness {
        file: PathBuf,

        /// Show only the top N edges
        #[arg(long, default_value_t = 10)]
        top: usize,

        #[arg(long)]
        sweep: Option<Sweep>,
    },
    /// Strong ties, triadic closure violations and neighborhood overlap
    Analyze {
        file: PathBuf,

        #[arg(long)]
        threshold: Option<u64>,
    },
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = build_config(&cli).and_then(|mut config| match &cli.command {
        Commands::Peel {
            file,
            rounds,
            threshold,
            sweep,
        } => {
            if let Some(rounds) = rounds {
                config.rounds = *rounds;
            }
            if let Some(threshold) = threshold {
                config.strong_tie_threshold = *threshold;
            }
            if let Some(sweep) = sweep {
                config.sweep = (*sweep).into();
            }
            run_peel(file, config, &cli.format)
        }
        Commands::Path {
            file,
            source,
            target,
        } => run_path(file, &config, *source, *target, &cli.format),
        Commands::Betweenness { file, top, sweep } => {
            if let Some(sweep) = sweep {
                config.sweep = (*sweep).into();
            }
            run_betweenness(file, &config, *top, &cli.format)
        }
        Commands::Analyze { file, threshold } => {
            if let Some(threshold) = threshold {
                config.strong_tie_threshold = *threshold;
            }
            run_analyze(file, &config, &cli.format)
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> Result<PeelConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => PeelConfig::from_file(path)?,
        None => PeelConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(max_weight) = cli.max_weight {
        config.max_weight = max_weight;
    }
    config.validate()?;
    Ok(config)
}

fn load(file: &Path, config: &PeelConfig) -> Result<LoadedGraph, Box<dyn std::error::Error>> {
    Ok(EdgeListLoader::from_config(config).load_path(file)?)
}

fn run_peel(file: &Path, config: PeelConfig, format: &OutputFormat) -> CliResult {
    let loaded = load(file, &config)?;
    let mut session = PeelSession::new(loaded.graph, config);

    match format {
        OutputFormat::Json => {
            let report = session.run()?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Csv => {
            println!("round,source,target,betweenness,edges,violations,average_overlap");
            let initial = session.metrics()?;
            println!(
                "0,,,,{},{},{}",
                initial.edge_count,
                initial.violation_count(),
                initial.average_overlap
            );
            session.run_with(|r| {
                println!(
                    "{},{},{},{},{},{},{}",
                    r.round,
                    r.removed.source,
                    r.removed.target,
                    r.removed.betweenness,
                    r.metrics.edge_count,
                    r.metrics.violation_count(),
                    r.metrics.average_overlap
                );
            })?;
        }
        OutputFormat::Table => {
            print_metrics("Initial graph", &session.metrics()?);
            let report = session.run_with(print_round)?;

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Round", "Removed edge", "Betweenness", "Edges", "Violations", "Avg overlap"]);
            for r in &report.rounds {
                table.add_row(vec![
                    r.round.to_string(),
                    format!("{} -> {}", r.removed.source, r.removed.target),
                    r.removed.betweenness.to_string(),
                    r.metrics.edge_count.to_string(),
                    r.metrics.violation_count().to_string(),
                    format!("{:.4}", r.metrics.average_overlap),
                ]);
            }
            println!("{}", table);
            println!("{} round(s)", report.rounds.len());
        }
    }

    Ok(())
}

fn run_path(
    file: &Path,
    config: &PeelConfig,
    source: VertexId,
    target: VertexId,
    format: &OutputFormat,
) -> CliResult {
    let loaded = load(file, config)?;
    let result = dijkstra(&loaded.graph, source, target)?;

    match (format, result) {
        (OutputFormat::Json, result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        (_, None) => println!("No path from {} to {}", source, target),
        (OutputFormat::Csv, Some(path)) => {
            println!("step,vertex");
            for (step, vertex) in path.path.iter().enumerate() {
                println!("{},{}", step, vertex);
            }
        }
        (OutputFormat::Table, Some(path)) => {
            let hops: Vec<String> = path.path.iter().map(|v| v.to_string()).collect();
            println!("Path: {}", hops.join(" -> "));
            println!("Cost: {}", path.cost);
            println!("Hops: {}", path.path.len() - 1);
        }
    }

    Ok(())
}

fn run_betweenness(file: &Path, config: &PeelConfig, top: usize, format: &OutputFormat) -> CliResult {
    let mut graph = load(file, config)?.graph;
    let pass = edge_betweenness(&mut graph, config.sweep)?;
    let ranked: Vec<_> = ranked_edges(&graph)?.into_iter().take(top).collect();

    match format {
        OutputFormat::Json => {
            let out = serde_json::json!({ "pass": pass, "edges": ranked });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Csv => {
            println!("source,target,betweenness");
            for e in &ranked {
                println!("{},{},{}", e.source, e.target, e.betweenness);
            }
        }
        OutputFormat::Table => {
            if ranked.is_empty() {
                println!("(no edges)");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Source", "Target", "Betweenness"]);
            for e in &ranked {
                table.add_row(vec![e.source.to_string(), e.target.to_string(), e.betweenness.to_string()]);
            }
            println!("{}", table);
            println!("{} pair(s) visited, {} path(s) counted", pass.pairs, pass.paths);
        }
    }

    Ok(())
}

fn run_analyze(file: &Path, config: &PeelConfig, format: &OutputFormat) -> CliResult {
    let graph = load(file, config)?.graph;
    let violations = triadic_closure_violations(&graph, config.strong_tie_threshold)?;
    let average_overlap = average_neighborhood_overlap(&graph)?;

    match format {
        OutputFormat::Json => {
            let metrics = GraphMetrics {
                vertex_count: graph.size(),
                edge_count: graph.edge_count(),
                violations,
                average_overlap,
            };
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        OutputFormat::Csv => {
            println!("vertex,tie_a,tie_b");
            for v in &violations {
                println!("{},{},{}", v.vertex, v.pair.0, v.pair.1);
            }
        }
        OutputFormat::Table => {
            println!("Vertices:          {}", graph.size());
            println!("Edges:             {}", graph.edge_count());
            println!("Average overlap:   {:.4}", average_overlap);
            println!("Violations:        {}", violations.len());
            if !violations.is_empty() {
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["Vertex", "Strong tie", "Strong tie"]);
                for v in &violations {
                    table.add_row(vec![v.vertex.to_string(), v.pair.0.to_string(), v.pair.1.to_string()]);
                }
                println!("{}", table);
            }
        }
    }

    Ok(())
}

fn print_metrics(title: &str, metrics: &GraphMetrics) {
    println!("=== {} ===", title);
    println!("  Edges:           {}", metrics.edge_count);
    println!("  Violations:      {}", metrics.violation_count());
    println!("  Average overlap: {:.4}", metrics.average_overlap);
}

fn print_round(report: &RoundReport) {
    println!(
        "Round {}: removed {} -> {} (betweenness {})",
        report.round, report.removed.source, report.removed.target, report.removed.betweenness
    );
}
