use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use serde::Deserialize;

use platstep_core::{Keys, Physical, Grounded, Scene};

/// Steps a recorded scene and prints the character trace as CSV.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Replay document: `{ "scene": ..., "frames": [{ "keys": 8, "elapsed": 25 }] }`
    path: PathBuf,

    /// Elapsed milliseconds for frames that do not carry their own.
    #[arg(long, default_value_t = 25.0)]
    elapsed: f32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Deserialize)]
struct Replay {
    #[serde(default)]
    scene: Scene,
    frames: Vec<Frame>,
}

#[derive(Deserialize)]
struct Frame {
    /// Bits of `Keys`: up 1, down 2, left 4, right 8.
    #[serde(default)]
    keys: u8,
    elapsed: Option<f32>,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = env_logger::Env::default().default_filter_or(level.to_string());
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let raw = fs::read_to_string(&args.path)
        .with_context(|| format!("failed to read {}", args.path.display()))?;
    let replay: Replay = serde_json::from_str(&raw).context("malformed replay document")?;
    let mut scene = replay.scene;
    scene.params.validate().context("invalid params")?;

    log::info!(
        "replaying {} frames against {} blocks",
        replay.frames.len(),
        scene.blocks.len()
    );

    println!("frame,x,y,vx,vy,landing,contacts");
    for (frame, f) in replay.frames.iter().enumerate() {
        let keys = Keys::from_bits_truncate(f.keys);
        let elapsed = f.elapsed.unwrap_or(args.elapsed);
        let events = scene
            .advance(keys, elapsed)
            .with_context(|| format!("frame {frame}"))?;

        let body = scene.character.body();
        println!(
            "{},{},{},{},{},{},{}",
            frame,
            body.position.x,
            body.position.y,
            body.velocity.x,
            body.velocity.y,
            scene.character.is_landing() as u8,
            events.contacts.bits()
        );
    }
    Ok(())
}
