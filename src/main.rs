//! ALICE Starfield: desktop viewer.
//!
//! Loads an item list (or generates a seeded demo set), lays it out as a
//! star field and opens an eframe window around it.

mod app;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, ValueEnum};

use alice_starfield::dataset::{demo_items, load_items};
use alice_starfield::layout::{ClusterPlacement, LayoutConfig};
use alice_starfield::{CategoryRegistry, Item, StarfieldConfig};

use app::StarfieldApp;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Placement {
    Golden,
    Angular,
}

impl From<Placement> for ClusterPlacement {
    fn from(p: Placement) -> Self {
        match p {
            Placement::Golden => ClusterPlacement::GoldenSpiral,
            Placement::Angular => ClusterPlacement::Angular,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "alice-starfield", version, about = "Explore categorized content as a star field")]
struct Args {
    /// JSON array of items; a demo dataset is generated when omitted
    #[arg(long)]
    items: Option<PathBuf>,

    /// JSON array of categories (`id`, `name`, `color`); built-ins when omitted
    #[arg(long)]
    categories: Option<PathBuf>,

    /// JSON configuration file (partial files are fine)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layout seed
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Cluster placement policy
    #[arg(long, value_enum)]
    placement: Option<Placement>,

    /// Lay out inside a bounded 1000×1000 canvas instead of open space
    #[arg(long)]
    canvas: bool,

    /// Demo dataset size
    #[arg(long, default_value_t = 140)]
    demo_count: usize,
}

fn load_config(args: &Args) -> StarfieldConfig {
    let mut config = match &args.config {
        Some(path) => StarfieldConfig::from_json_file(path).unwrap_or_else(|e| {
            log::warn!("{e}; using default configuration");
            StarfieldConfig::default()
        }),
        None => StarfieldConfig::default(),
    };
    if args.canvas {
        let placement = config.layout.placement;
        config = config.with_layout(LayoutConfig::canvas().with_placement(placement));
    }
    if let Some(p) = args.placement {
        config.layout.placement = p.into();
    }
    config
}

fn load_registry(args: &Args) -> CategoryRegistry {
    match &args.categories {
        Some(path) => CategoryRegistry::from_json_file(path).unwrap_or_else(|e| {
            log::warn!("{e}; using built-in categories");
            CategoryRegistry::default()
        }),
        None => CategoryRegistry::default(),
    }
}

fn load_dataset(args: &Args, registry: &CategoryRegistry) -> Vec<Item> {
    match &args.items {
        Some(path) => match load_items(path) {
            Ok(items) => items,
            Err(e) => {
                log::warn!("{e}; falling back to demo dataset");
                demo_items(registry, args.demo_count, registry.len(), args.seed)
            }
        },
        None => demo_items(registry, args.demo_count, registry.len(), args.seed),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(&args);
    let registry = load_registry(&args);
    let items = load_dataset(&args, &registry);
    log::info!(
        "starting with {} items, seed {}, {:?} placement",
        items.len(),
        args.seed,
        config.layout.placement
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("ALICE Starfield"),
        ..Default::default()
    };

    let seed = args.seed;
    eframe::run_native(
        "ALICE Starfield",
        options,
        Box::new(move |_cc| Ok(Box::new(StarfieldApp::new(config, registry, items, seed)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("failed to start the viewer window")
}
