mod beat;
mod colors;
mod conf;
mod monitor;
mod overlay;
mod pulse;
mod scheduler;
mod scroll;
mod snapshot;
mod surface;
mod timing;

use crate::conf::Settings;
use crate::monitor::Monitor;
use crate::pulse::PulseProfile;
use crate::scheduler::{FrameLoop, Pacing};
use crate::surface::PixmapSurface;
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ecg-trace")]
#[command(about = "Render a scrolling heartbeat trace")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the trace for a number of frames and save the last one as PNG
    Render {
        /// Heartbeats per minute
        #[arg(long)]
        bpm: Option<f64>,

        /// Seconds of trace visible across the surface
        #[arg(long)]
        window: Option<f64>,

        /// Surface width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Surface height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Target frame rate
        #[arg(long)]
        fps: Option<u32>,

        /// Number of frames to render (0 = until interrupted, needs --realtime)
        #[arg(long, default_value = "300")]
        frames: u64,

        /// Pace frames against the wall clock instead of simulated time
        #[arg(long)]
        realtime: bool,

        /// Hide the diagnostic overlay
        #[arg(long)]
        no_overlay: bool,

        /// Hide the marker on the newest sample
        #[arg(long)]
        no_cursor: bool,

        /// PNG file for the last frame (default: timestamped file in the data directory)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also write every frame as a numbered PNG into this directory
        #[arg(long)]
        dump_dir: Option<PathBuf>,

        /// Summary format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the samples of one synthesized heartbeat pulse
    Pulse {
        /// Pulse width in samples
        #[arg(long, default_value = "100")]
        samples: usize,

        /// Surface height the pulse levels are scaled to
        #[arg(long, default_value = "600")]
        height: u32,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the configuration file location
    Path,
    /// Show the effective settings as TOML
    Show,
    /// Write the default settings to the configuration file
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

/// Largest pulse the `pulse` command will synthesize
const MAX_PULSE_SAMPLES: usize = 1 << 20;

struct RenderArgs {
    frames: u64,
    realtime: bool,
    output: Option<PathBuf>,
    dump_dir: Option<PathBuf>,
    format: OutputFormat,
}

fn render(settings: Settings, args: RenderArgs) -> Result<()> {
    if args.frames == 0 && !args.realtime {
        bail!("--frames 0 renders forever and needs --realtime");
    }

    let surface =
        PixmapSurface::new(settings.width, settings.height)?.with_background(colors::black());

    let start = Instant::now();
    let mut monitor = Monitor::bootstrap(
        Some(surface),
        settings.timing(),
        settings.monitor_options(),
        start,
    )?;

    let pacing = if args.realtime {
        Pacing::Realtime
    } else {
        Pacing::Simulated
    };
    let mut frame_loop = FrameLoop::new(settings.frames_per_second, pacing);
    if args.frames > 0 {
        frame_loop = frame_loop.with_frame_limit(args.frames);
    }

    log::info!(
        "Rendering {}x{} at {} bpm, {}s window, {:?} per frame ({:?})",
        settings.width,
        settings.height,
        settings.beats_per_minute,
        settings.visible_window_seconds,
        frame_loop.frame_interval(),
        pacing
    );

    let mut beats = 0u64;
    let mut was_draining = false;
    let frames = frame_loop.run(&mut monitor, start, |monitor, frame| {
        let draining = monitor.buffer().beat().is_draining();
        if was_draining && !draining {
            beats += 1;
        }
        was_draining = draining;

        if let Some(dir) = &args.dump_dir {
            snapshot::save_png(monitor.surface(), &dir.join(snapshot::frame_file_name(frame)))?;
        }
        Ok(())
    })?;

    let output = match args.output {
        Some(path) => path,
        None => snapshot::get_snapshot_path()?,
    };
    snapshot::save_png(monitor.surface(), &output)?;
    log::info!(
        "Saved frame #{} to {}",
        monitor.frames(),
        output.display()
    );

    match args.format {
        OutputFormat::Text => {
            println!("Frames: {}", frames);
            println!("Completed beats: {}", beats);
            println!("Output: {}", output.display());
        }
        OutputFormat::Json => {
            let json = serde_json::json!({
                "frames": frames,
                "completed_beats": beats,
                "beats_per_minute": settings.beats_per_minute,
                "visible_window_seconds": settings.visible_window_seconds,
                "width": settings.width,
                "height": settings.height,
                "output": output,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

fn print_pulse(samples: usize, height: u32, format: OutputFormat) -> Result<()> {
    if samples > MAX_PULSE_SAMPLES {
        bail!(
            "--samples {} is too large (at most {})",
            samples,
            MAX_PULSE_SAMPLES
        );
    }

    let profile = PulseProfile::NOMINAL.for_height(height as f32);
    let pulse = pulse::synthesize(samples, &profile);

    match format {
        OutputFormat::Text => {
            for value in pulse {
                println!("{}", value);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&pulse)?);
        }
    }

    Ok(())
}

fn config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => match conf::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine config directory"),
        },
        ConfigAction::Show => {
            print!("{}", Settings::load().to_toml()?);
        }
        ConfigAction::Init { force } => {
            if let Some(path) = conf::config_path().filter(|path| path.exists()) {
                if !force {
                    bail!(
                        "Config file already exists at {} (use --force to overwrite)",
                        path.display()
                    );
                }
            }
            let path = Settings::default().save()?;
            println!("Wrote default settings to {}", path.display());
        }
    }

    Ok(())
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            bpm,
            window,
            width,
            height,
            fps,
            frames,
            realtime,
            no_overlay,
            no_cursor,
            output,
            dump_dir,
            format,
        } => {
            let mut settings = Settings::load();
            if let Some(bpm) = bpm {
                settings.beats_per_minute = bpm;
            }
            if let Some(window) = window {
                settings.visible_window_seconds = window;
            }
            if let Some(width) = width {
                settings.width = width;
            }
            if let Some(height) = height {
                settings.height = height;
            }
            if let Some(fps) = fps {
                settings.frames_per_second = fps;
            }
            settings.show_overlay &= !no_overlay;
            settings.show_cursor &= !no_cursor;

            render(
                settings,
                RenderArgs {
                    frames,
                    realtime,
                    output,
                    dump_dir,
                    format,
                },
            )
        }

        Commands::Pulse {
            samples,
            height,
            format,
        } => print_pulse(samples, height, format),

        Commands::Config { action } => config(action),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}
