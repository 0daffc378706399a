use anyhow::{Context, Result};
use clap::Parser;
use handscriber::capture::{FileSaveConfig, FileSink};
use handscriber::config::{Config, KeybindingsConfig};
use handscriber::input::DrawingMachine;
use handscriber::session::{DisplaySink, NullDisplay, PngSequenceSink, Recording, Session};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "handscriber")]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("HANDSCRIBER_GIT_HASH"), ")"),
    about = "Hand-gesture drawing canvas layered over a live video feed"
)]
struct Cli {
    /// Drive the drawing pipeline from a recorded session (JSON lines)
    #[arg(long, value_name = "FILE")]
    replay: Option<PathBuf>,

    /// Frame width in pixels
    #[arg(long, default_value_t = 640, value_parser = clap::value_parser!(u32).range(1..=8192))]
    width: u32,

    /// Frame height in pixels
    #[arg(long, default_value_t = 480, value_parser = clap::value_parser!(u32).range(1..=8192))]
    height: u32,

    /// Write the final composited frame to this PNG file
    #[arg(long, value_name = "PNG")]
    output: Option<PathBuf>,

    /// Write every composited frame into this directory
    #[arg(long, value_name = "DIR")]
    frames_dir: Option<PathBuf>,

    /// Directory for thumbs-up saves (overrides capture.save_directory)
    #[arg(long, value_name = "DIR")]
    save_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.config/handscriber/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(replay_path) = cli.replay.as_deref() else {
        print_usage();
        return Ok(());
    };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let action_map = config
        .keybindings
        .build_action_map()
        .map_err(anyhow::Error::msg)
        .context("Invalid keybindings in config")?;

    let recording = Recording::load(replay_path)
        .with_context(|| format!("Failed to load recording {}", replay_path.display()))?;

    let mut save_config = FileSaveConfig::from(&config.capture);
    if let Some(dir) = cli.save_dir.clone() {
        save_config.save_directory = dir;
    }

    log_controls(&config.keybindings);
    log::info!(
        "Replaying {} frames at {}x{}",
        recording.len(),
        cli.width,
        cli.height
    );

    let mut machine = DrawingMachine::from_config(&config, action_map);
    let (mut frames, mut estimator, mut events) = recording.into_sources(cli.width, cli.height);
    let mut persistence = FileSink::new(save_config);
    let mut display: Box<dyn DisplaySink> = match cli.frames_dir.as_deref() {
        Some(dir) => Box::new(PngSequenceSink::new(dir)?),
        None => Box::new(NullDisplay),
    };

    let summary = Session {
        frames: &mut frames,
        estimator: &mut estimator,
        display: display.as_mut(),
        persistence: &mut persistence,
        events: &mut events,
        mirror_input: config.ui.mirror_input,
    }
    .run(&mut machine)?;

    if let Some(output) = cli.output.as_deref() {
        let image = summary
            .last_image
            .as_ref()
            .context("Recording contained no frames; nothing to write")?;
        let file = File::create(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        let mut writer = BufWriter::new(file);
        image.write_png(&mut writer)?;
        writer.flush()?;
        log::info!("Final frame written to {}", output.display());
    }

    println!(
        "Processed {} frames, saved {} drawing(s)",
        summary.frames,
        summary.saved.len()
    );
    for path in &summary.saved {
        println!("  {}", path.display());
    }
    if summary.failed_saves > 0 {
        println!("  {} save(s) failed, see log", summary.failed_saves);
    }

    Ok(())
}

fn log_controls(keys: &KeybindingsConfig) {
    let show = |bindings: &[String]| bindings.join(" or ");
    log::info!("Controls:");
    log::info!("  - Draw: point with the index finger");
    log::info!("  - Erase: open palm");
    log::info!("  - Save: thumbs up");
    log::info!(
        "  - Colors: {} (red), {} (green), {} (blue), {} (black), {} (white)",
        show(&keys.set_color_red),
        show(&keys.set_color_green),
        show(&keys.set_color_blue),
        show(&keys.set_color_black),
        show(&keys.set_color_white)
    );
    log::info!("  - Random color: {}", show(&keys.toggle_random_color));
    log::info!("  - Eraser: {}", show(&keys.toggle_eraser));
    log::info!("  - Toggle drawing: {}", show(&keys.toggle_draw_mode));
    log::info!("  - Increase brush: {}", show(&keys.increase_brush));
    log::info!("  - Decrease brush: {}", show(&keys.decrease_brush));
    log::info!("  - Undo: {}", show(&keys.undo));
    log::info!("  - Redo: {}", show(&keys.redo));
    log::info!("  - Clear canvas: {}", show(&keys.clear_canvas));
    log::info!("  - Exit: {}", show(&keys.exit));
}

fn print_usage() {
    println!("handscriber: Hand-gesture drawing canvas layered over a live video feed");
    println!();
    println!("Usage:");
    println!("  handscriber --replay <FILE>   Replay a recorded session (JSON lines)");
    println!("  handscriber --help            Show all options");
    println!();
    println!("Recording format, one frame per line:");
    println!("  {{\"hand\": [[x, y, z], ... 21 points], \"keys\": [\"r\", \"Ctrl+Z\"]}}");
    println!("  \"hand\" may be null for frames without a hand.");
    println!();
    println!("Gestures:");
    println!("  index finger  draw");
    println!("  open palm     erase");
    println!("  thumbs up     save the canvas as PNG");
}
