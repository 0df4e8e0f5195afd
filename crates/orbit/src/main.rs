use clap::{Parser, Subcommand};
use orbit::dial::{RotarySelector, SnapTick};
use orbit::geometry::{self, Point};
use orbit::list::{ItemPitch, ScrollState};
use orbit::motion::TickMode;
use orbit::settings::DialSettings;
use orbit::Item;
use std::time::Duration;

/// Ticks after which a snap is reported as stalled.
const MAX_TICKS: usize = 10_000;

#[derive(Parser, Debug)]
#[command(name = "orbit", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Print the pointer angle around a center, in degrees.
    #[command(allow_negative_numbers = true)]
    Angle {
        x: f64,
        y: f64,
        #[arg(long, default_value_t = 0.0)]
        cx: f64,
        #[arg(long, default_value_t = 0.0)]
        cy: f64,
    },
    /// Simulate snapping a dial entry onto the reference position.
    Snap {
        /// Number of dial entries
        #[arg(short = 'n', long)]
        entries: usize,
        /// Entry to select
        #[arg(short, long)]
        index: usize,
        /// Frame rate of the simulated host
        #[arg(long, default_value_t = 60.0)]
        fps: f64,
        /// Apply the decay once per frame instead of per elapsed time
        #[arg(long)]
        fixed: bool,
    },
    /// Print the row under a scroll offset.
    #[command(allow_negative_numbers = true)]
    Index {
        #[arg(long)]
        offset: f64,
        /// Rendered row height
        #[arg(long)]
        height: f64,
        #[arg(long, default_value_t = orbit::list::DEFAULT_GAP)]
        gap: f64,
        /// Number of rows
        #[arg(short = 'n', long)]
        count: usize,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Angle { x, y, cx, cy } => {
            let angle = geometry::angle_of(Point::new(x, y), Point::new(cx, cy));
            println!("{angle:.3}");
            Ok(())
        }
        Commands::Snap {
            entries,
            index,
            fps,
            fixed,
        } => simulate_snap(entries, index, fps, fixed),
        Commands::Index {
            offset,
            height,
            gap,
            count,
        } => {
            let pitch = ItemPitch::new(height, gap)
                .ok_or_else(|| anyhow::anyhow!("row height must be positive, got {height}"))?;
            match (ScrollState { offset, pitch, count }).index() {
                Some(index) => println!("{index}"),
                None => println!("empty list"),
            }
            Ok(())
        }
    }
}

fn frame_duration(fps: f64) -> anyhow::Result<Duration> {
    if !(fps.is_finite() && fps > 0.0) {
        anyhow::bail!("--fps must be positive, got {fps}");
    }
    Ok(Duration::try_from_secs_f64(1.0 / fps)?)
}

fn simulate_snap(entries: usize, index: usize, fps: f64, fixed: bool) -> anyhow::Result<()> {
    let settings = DialSettings {
        tick: if fixed {
            TickMode::Fixed
        } else {
            TickMode::Elapsed
        },
        ..DialSettings::default()
    };
    let labels = (0..entries).map(|i| format!("entry {i}"));
    let mut dial: RotarySelector<()> = RotarySelector::new(Item::entries(labels), &settings)?;

    if !dial.select(index, || ()) {
        anyhow::bail!("entry {index} does not exist on a dial of {entries}");
    }

    let frame = frame_duration(fps)?;
    for tick in 1..=MAX_TICKS {
        match dial.tick(Some(frame)) {
            SnapTick::Moving(rotation) => println!("{tick:>4}  {rotation:>9.3}"),
            SnapTick::Converged { index, rotation } => {
                println!("{tick:>4}  {rotation:>9.3}  converged on entry {index}");
                let active = dial.active_item().map(|i| i.label.to_string());
                println!("active: {}", active.unwrap_or_else(|| "none".to_string()));
                return Ok(());
            }
            SnapTick::Idle => break,
        }
    }
    anyhow::bail!("snap did not converge within {MAX_TICKS} ticks")
}
