// main.rs
//
// Build a point-cloud cube from three grayscale views and write it as STL.
//
// Usage: pointcube [--config sculpture.toml] [--front a.png] [--side b.png] [--top c.png]
//                  [--seed N] [--output sculpture.stl] [--ascii]

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use pointcube::{
    Assembler, Scene, SculptureConfig,
    assembler::{FRONT, SIDE, TOP},
    build_sculpture, io,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pointcube", version, about = "Turn three grayscale views into a point-cloud cube")]
struct Args {
    /// TOML file describing the faces; defaults to input-images/{front,side,top}_.png
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the front view image
    #[arg(long)]
    front: Option<PathBuf>,

    /// Override the side view image
    #[arg(long)]
    side: Option<PathBuf>,

    /// Override the top view image
    #[arg(long)]
    top: Option<PathBuf>,

    /// Seed for the depth jitter
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the sculpture
    #[arg(short, long, default_value = "sculpture.stl")]
    output: PathBuf,

    /// Write ASCII instead of binary STL
    #[arg(long)]
    ascii: bool,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SculptureConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => SculptureConfig::default(),
    };

    for (name, image) in [(FRONT, &args.front), (SIDE, &args.side), (TOP, &args.top)] {
        if let Some(image) = image {
            let face = config
                .face_mut(name)
                .with_context(|| format!("--{name} given but no '{name}' face is configured"))?;
            face.image = image.clone();
        }
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut assembler = Assembler::new(Scene::new(), rng);
    let report = build_sculpture(&config, &mut assembler).context("failed to build sculpture")?;
    for face in &report.faces {
        info!(face = %face.name, primitives = face.primitives, "face built");
    }

    let scene = assembler.into_service();
    io::write_stl_file(&scene.to_mesh(), &args.output, "pointcube", args.ascii)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), objects = scene.len(), "wrote sculpture");

    Ok(())
}
