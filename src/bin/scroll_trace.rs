use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use indexmap::IndexSet;
use scrolly::api::{DispatchOutcome, ScrollyConfig, ScrollyEngine};
use scrolly::core::{ScrollViewport, StageDescriptor, StageRegion, TriggerValue};
use scrolly::error::ScrollyResult;
use scrolly::extensions::Visualization;
use scrolly::render::{MemoryPanel, PanelSurface};
use serde::{Deserialize, Serialize};
use tracing::info;

const USAGE: &str = "usage: scroll_trace --input <path> [--output <path>]";

#[derive(Debug, Deserialize)]
struct TraceInput {
    #[serde(default)]
    config: ScrollyConfig,
    stages: Vec<StageDescriptor>,
    #[serde(default)]
    frames: Vec<ScrollFrame>,
}

#[derive(Debug, Deserialize)]
struct ScrollFrame {
    viewport_height: f64,
    regions: Vec<StageRegion>,
}

#[derive(Debug, Serialize)]
struct TraceOutput {
    steps: Vec<TraceStep>,
}

#[derive(Debug, Serialize)]
struct TraceStep {
    frame: usize,
    outcome: DispatchOutcome,
    current_visualization: Option<String>,
    current_trigger_value: Option<TriggerValue>,
    visible_panels: Vec<String>,
}

/// Chart stand-in that logs every update it receives.
#[derive(Debug)]
struct TraceChart {
    id: String,
}

impl Visualization for TraceChart {
    fn update(&mut self, value: Option<TriggerValue>) -> ScrollyResult<()> {
        info!(visualization = %self.id, ?value, "chart update");
        Ok(())
    }
}

struct CliArgs {
    input: PathBuf,
    output: Option<PathBuf>,
}

fn main() {
    let _ = scrolly::telemetry::init_tracing_with_filter("warn");
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let input: TraceInput =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;

    let visualization_ids: IndexSet<String> = input
        .stages
        .iter()
        .filter_map(|stage| stage.visualization.clone())
        .filter(|id| !id.is_empty())
        .collect();

    let mut engine = ScrollyEngine::from_descriptors(input.stages, input.config)
        .map_err(|err| format!("invalid story: {err}"))?;

    let mut panels = Vec::with_capacity(visualization_ids.len());
    for id in &visualization_ids {
        let panel = Rc::new(RefCell::new(MemoryPanel::default()));
        engine
            .register(id.clone(), TraceChart { id: id.clone() }, panel.clone())
            .map_err(|err| format!("failed to register `{id}`: {err}"))?;
        panels.push((id.clone(), panel));
    }

    engine.start();

    let mut steps = Vec::new();
    for (frame_index, frame) in input.frames.iter().enumerate() {
        let outcomes = engine.scroll(ScrollViewport::new(frame.viewport_height), &frame.regions);
        for outcome in outcomes {
            let state = engine.state();
            steps.push(TraceStep {
                frame: frame_index,
                outcome,
                current_visualization: state.current_visualization().map(str::to_owned),
                current_trigger_value: state.current_trigger_value(),
                visible_panels: panels
                    .iter()
                    .filter(|(_, panel)| panel.state().is_visible())
                    .map(|(id, _)| id.clone())
                    .collect(),
            });
        }
    }
    engine.stop();

    let payload = serde_json::to_string_pretty(&TraceOutput { steps })
        .map_err(|err| format!("failed to serialize json: {err}"))?;
    match args.output {
        Some(path) => {
            fs::write(&path, payload).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
        }
        None => {
            println!("{payload}");
            Ok(())
        }
    }
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| USAGE.to_owned())?,
        output,
    })
}
