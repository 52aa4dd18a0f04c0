//! Build the gallery scene, play its scripted tour and save the result as
//! a PNG.

use std::{fs, path::PathBuf, time::Duration};

use anyhow::{Context as _, Result};
use clap::Parser;
use morphic::{World, preferences::Preferences};
use morphic_demos::gallery;
use tracing::{Level, info};

/// CLI flags for the gallery demo.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Where to write the final frame.
    #[clap(short, long, default_value = "gallery.png")]
    out: PathBuf,

    /// Milliseconds between frames.
    #[clap(long, default_value_t = 16)]
    frame_ms: u64,

    /// JSON preferences file.
    #[clap(short, long)]
    prefs: Option<PathBuf>,

    /// Print the morph tree after the tour.
    #[clap(short, long)]
    dump: bool,

    /// More logging; repeat for more.
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Run the gallery demo.
pub fn main() -> Result<()> {
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let prefs = match &args.prefs {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Preferences::from_json(&text)?
        }
        None => Preferences::default(),
    };
    let mut world = World::with_preferences(gallery::SIZE, prefs)?;
    let g = gallery::build(&mut world)?;
    let cycles = gallery::tour(&mut world, &g, Duration::from_millis(args.frame_ms.max(1)))?;
    info!(cycles, "tour complete");

    if args.dump {
        println!("{}", world.dump()?);
    }
    world
        .canvas()
        .image()
        .save(&args.out)
        .with_context(|| format!("writing {}", args.out.display()))?;
    info!(width = gallery::SIZE.x, height = gallery::SIZE.y, out = %args.out.display(), "saved");
    Ok(())
}
