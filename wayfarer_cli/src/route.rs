use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tracing::info;
use wayfarer_routing::{
    ch::{
        ch_graph::CHGraph,
        path_unpacker::{CHPathUnpacker, PathUnpacker, UnpackedPath},
    },
    landmarks::{landmark_approximator::LandmarkApproximator, lm_preparation::LMPreparation},
    routing::{
        approximation::Approximation,
        beeline_approximator::{BeelineApproximator, BeelineOptions},
        bidirectional_astar::BidirectionalAStar,
        search_options::SearchOptions,
        search_result::{SearchDebugInfo, SearchOutcome, SearchStats},
        weight_approximator::ZeroApproximator,
    },
    types::NodeId,
};

use crate::network::JsonNetwork;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Heuristic {
    None,
    Beeline,
    Landmarks,
}

#[derive(Args)]
pub struct RouteArgs {
    /// JSON network with nodes, edges, shortcuts and turn costs
    #[arg(short, long)]
    graph: PathBuf,

    #[arg(long)]
    from: NodeId,

    #[arg(long)]
    to: NodeId,

    /// JSON search options, missing fields use the defaults
    #[arg(short, long)]
    options: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Heuristic::Beeline)]
    heuristic: Heuristic,

    /// Number of landmarks for `--heuristic landmarks`
    #[arg(long, default_value_t = 8)]
    landmarks: usize,

    /// Highest speed for `--heuristic beeline`, weights are expected in seconds
    #[arg(long, default_value_t = BeelineOptions::default().max_speed_kmh)]
    max_speed_kmh: f64,

    /// Expand the shortcuts of the found path
    #[arg(short, long)]
    unpack: bool,
}

#[derive(Serialize)]
struct RouteOutput {
    algorithm: String,
    outcome: SearchOutcome,
    stats: SearchStats,
    duration_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<UnpackedPath>,
    #[serde(skip_serializing_if = "Option::is_none")]
    debug: Option<SearchDebugInfo>,
}

fn search(
    graph: &CHGraph,
    approximation: Approximation<'_, CHGraph>,
    options: SearchOptions,
    args: &RouteArgs,
) -> anyhow::Result<RouteOutput> {
    info!(
        from = args.from,
        to = args.to,
        approximation = approximation.name(),
        "Routing"
    );

    let mut algorithm = BidirectionalAStar::with_approximator(graph, approximation, options);
    let result = algorithm.calc_path(args.from, args.to)?;

    let path = match (args.unpack, result.skeleton()) {
        (true, Some(skeleton)) => Some(
            CHPathUnpacker::new(graph, algorithm.options().traversal_mode).unpack(skeleton)?,
        ),
        _ => None,
    };

    Ok(RouteOutput {
        algorithm: algorithm.algorithm_name(),
        duration_ms: result.duration.as_secs_f64() * 1000.0,
        outcome: result.outcome,
        stats: result.stats,
        path,
        debug: result.debug,
    })
}

fn read_options(path: Option<&PathBuf>) -> anyhow::Result<SearchOptions> {
    let Some(path) = path else {
        return Ok(SearchOptions::default());
    };

    let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
    let options = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid options in {}", path.display()))?;

    Ok(options)
}

pub fn run(args: RouteArgs, include_debug_info: bool) -> anyhow::Result<()> {
    let graph = JsonNetwork::from_file(&args.graph)?.build()?;

    let mut options = read_options(args.options.as_ref())?;
    options.include_debug_info |= include_debug_info;

    let lm_data = match args.heuristic {
        Heuristic::Landmarks => Some(LMPreparation::new(&graph).create_landmarks(args.landmarks)),
        _ => None,
    };

    let approximation = match (args.heuristic, lm_data.as_ref()) {
        (Heuristic::Landmarks, Some(lm_data)) => {
            Approximation::Landmarks(LandmarkApproximator::new(lm_data))
        }
        (Heuristic::Beeline, _) => {
            let beeline_options = BeelineOptions {
                max_speed_kmh: args.max_speed_kmh,
                ..Default::default()
            };
            Approximation::Beeline(BeelineApproximator::new(&graph, &beeline_options))
        }
        _ => Approximation::Zero(ZeroApproximator),
    };

    let output = search(&graph, approximation, options, &args)?;

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
