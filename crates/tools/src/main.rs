use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foundation::math::Vec2;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tools::{
    ToolError, build_radiant, layout_json, load_config, load_events, pick_after_frames, summarize,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Inspect a Prime Radiant history file")]
struct Args {
    /// Radiant config JSON (missing keys take defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count events, qualifying events and severities
    Summary { history: PathBuf },

    /// Print marker positions as JSON
    Layout { history: PathBuf },

    /// Hover at a normalized device coordinate and print the tooltip
    Pick {
        history: PathBuf,

        /// NDC x in [-1, 1]
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        /// NDC y in [-1, 1], +1 at the top
        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        /// Animation frames to run before picking
        #[arg(long, default_value_t = 0)]
        frames: u64,

        #[arg(long, default_value_t = 800.0)]
        width: f64,

        #[arg(long, default_value_t = 600.0)]
        height: f64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ToolError> {
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Summary { history } => {
            let events = load_events(&history)?;
            let s = summarize(&events);
            println!("events:     {}", s.total);
            println!("qualifying: {}", s.qualifying);
            println!("high:       {}", s.high);
            println!("medium:     {}", s.medium);
            println!("low:        {}", s.low);
        }
        Command::Layout { history } => {
            let events = load_events(&history)?;
            let radiant = build_radiant(config, &events, 800.0, 600.0);
            println!("{}", layout_json(&radiant)?);
        }
        Command::Pick {
            history,
            x,
            y,
            frames,
            width,
            height,
        } => {
            let events = load_events(&history)?;
            let mut radiant = build_radiant(config, &events, width, height);
            info!(markers = radiant.event_count(), frames, "picking");
            let picked = pick_after_frames(&mut radiant, Vec2::new(x, y), frames);
            for event in radiant.drain_events() {
                debug!(
                    frame = event.frame_index,
                    kind = event.kind.as_str(),
                    message = %event.message,
                    "radiant event"
                );
            }
            match picked {
                Some(tooltip) => {
                    for line in tooltip.lines() {
                        println!("{line}");
                    }
                }
                None => println!("no hit"),
            }
        }
    }
    Ok(())
}
