use std::path::PathBuf;

use catalog::{CorruptionSense, WORLD_NAME};
use clap::{Parser, ValueEnum};
use globe::{EventKind, GlobeConfig, GlobeOrchestrator};
use runtime::FrameClock;
use scene::{RegionSet, Slot, ViewMode};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless happiness-globe session runner")]
struct Args {
    /// Dataset JSON (array of country records)
    #[arg(long)]
    dataset: PathBuf,

    /// Boundary geometry (GeoJSON FeatureCollection or TopoJSON topology)
    #[arg(long)]
    geometry: Option<PathBuf>,

    /// Country to select at startup; the world aggregate unless comparing
    #[arg(long, conflicts_with = "compare")]
    select: Option<String>,

    /// Two countries to compare head to head
    #[arg(long, num_args = 2, value_names = ["A", "B"])]
    compare: Option<Vec<String>>,

    /// Close the detail panel at this many seconds into the session
    #[arg(long)]
    close_at: Option<f64>,

    /// JSON object mapping country names to ISO alpha-2 flag codes
    #[arg(long)]
    flag_codes: Option<PathBuf>,

    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Session length in seconds
    #[arg(long, default_value_t = 8.0)]
    seconds: f64,

    #[arg(long, value_enum, default_value_t = Sense::Higher)]
    corruption_sense: Sense,

    /// Print a JSON summary instead of the event log
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Sense {
    Higher,
    Lower,
}

impl From<Sense> for CorruptionSense {
    fn from(s: Sense) -> Self {
        match s {
            Sense::Higher => CorruptionSense::HigherIsBetter,
            Sense::Lower => CorruptionSense::LowerIsBetter,
        }
    }
}

#[derive(Serialize)]
struct SessionSummary {
    frames: u64,
    phase: String,
    selected: Option<String>,
    panel: Option<String>,
    camera: [f64; 3],
    auto_rotating: bool,
    interactive: bool,
    events: usize,
    notes: Option<[String; 2]>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let args = Args::parse();
    let mut clock = FrameClock::from_fps(args.fps)
        .ok_or_else(|| format!("--fps must be positive, got {}", args.fps))?;

    let dataset = formats::load_dataset(&args.dataset).map_err(|e| e.to_string())?;
    info!(records = dataset.len(), "dataset loaded");

    let flag_codes = match &args.flag_codes {
        Some(path) => formats::load_flag_codes(path).map_err(|e| e.to_string())?,
        None => Default::default(),
    };
    let initial_selection = match (&args.select, &args.compare) {
        (Some(name), _) => Some(name.clone()),
        (None, None) => Some(WORLD_NAME.to_string()),
        (None, Some(_)) => None,
    };
    let config = GlobeConfig {
        corruption_sense: args.corruption_sense.into(),
        initial_selection,
        flag_codes,
    };
    let mut globe = GlobeOrchestrator::new(dataset, config);

    match &args.geometry {
        Some(path) => globe.load_regions(formats::load_regions(path).map(|decoded| {
            if decoded.skipped > 0 {
                info!(skipped = decoded.skipped, "features without usable geometry");
            }
            RegionSet::new(decoded.regions)
        })),
        None => globe.load_regions(Err::<RegionSet, _>("no geometry source given")),
    }

    if let Some(pair) = &args.compare {
        if let [a, b] = pair.as_slice() {
            globe.set_mode(ViewMode::Compare);
            globe.assign_slot(Slot::A, a);
            globe.assign_slot(Slot::B, b);
        }
    }

    let total = clock.frames_in(args.seconds);
    let close_frame = args.close_at.map(|s| clock.frames_in(s).max(1));

    let mut emitted = 0usize;
    for _ in 0..total {
        let frame = clock.tick();
        if close_frame == Some(frame.index) {
            globe.close_panel();
        }
        globe.update(frame);
        for event in globe.drain_events() {
            emitted += 1;
            if !args.json {
                println!("[{:>5}] {}", event.frame_index, describe(&event.payload));
            }
        }
    }

    let insights = globe.comparison_insights();
    if args.json {
        let pose = globe.camera_pose();
        let summary = SessionSummary {
            frames: total,
            phase: format!("{:?}", globe.phase()),
            selected: globe.selection().target().map(str::to_string),
            panel: globe.panel().map(|p| p.name.clone()),
            camera: [pose.lat, pose.lng, pose.altitude],
            auto_rotating: globe.is_auto_rotating(),
            interactive: globe.is_interactive(),
            events: emitted,
            notes: insights.as_ref().map(|i| i.notes()),
        };
        let text = serde_json::to_string_pretty(&summary).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    if let Some(insights) = insights {
        for note in insights.notes() {
            println!("{note}");
        }
    }
    let pose = globe.camera_pose();
    println!(
        "final: phase={:?} camera=(lat {:.3}, lng {:.3}, alt {:.3})",
        globe.phase(),
        pose.lat,
        pose.lng,
        pose.altitude
    );
    Ok(())
}

fn describe(kind: &EventKind) -> String {
    match kind {
        EventKind::SelectionChanged { mode, target } => format!(
            "selection {mode:?} -> {}",
            target.as_deref().unwrap_or("none")
        ),
        EventKind::PhaseChanged { from, to } => format!("phase {from:?} -> {to:?}"),
        EventKind::OverlayShown { name } => format!("overlay shown: {name}"),
        EventKind::CameraFocus { name, target } => format!(
            "camera focus {} at (lat {:.3}, lng {:.3})",
            name.as_deref().unwrap_or("-"),
            target.lat,
            target.lng
        ),
        EventKind::PanelOpened { name, has_data } => {
            if *has_data {
                format!("panel opened: {name}")
            } else {
                format!("panel opened: {name} (no data)")
            }
        }
        other => format!("{other:?}"),
    }
}
