// What you SEE:
// • The cover image fills the window.
// • Hover: a soft circle grows under the cursor and shows the hidden image;
//   moving around permanently uncovers it.
// • Hold Left Mouse: "touch" mode, a fixed-size reveal follows the drag.
// • Resizing the window starts over. ESC quits.

mod animation;
mod assets;
mod canvas;
mod color;
mod config;
mod controller;
mod cover;
mod draw;
mod error;
mod input;
mod mask;
mod preview;
mod types;

use assets::AssetStore;
use clap::Parser;
use color::GammaLut;
use config::Config;
use controller::RevealController;
use cover::CoverLayer;
use draw::{Drawer, compose_frame};
use error::Error;
use input::InputTracker;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use types::FrameBuffer;

#[derive(Parser, Debug)]
#[command(name = "magic-reveal")]
#[command(about = "Scratch-off style reveal of a hidden image under a cover image")]
#[command(version)]
struct Cli {
    /// Config file path (defaults to the platform config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Cover image (overrides config)
    #[arg(long)]
    cover: Option<PathBuf>,

    /// Hidden image (overrides config)
    #[arg(long)]
    hidden: Option<PathBuf>,

    /// Initial window width (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Initial window height (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Write the revealed layer to this PNG on exit
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Error> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("magic_reveal=debug")
    } else {
        EnvFilter::new("magic_reveal=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(cover) = cli.cover {
        config.assets.cover = cover;
    }
    if let Some(hidden) = cli.hidden {
        config.assets.hidden = hidden;
    }
    if let Some(width) = cli.width {
        config.window.width = width;
    }
    if let Some(height) = cli.height {
        config.window.height = height;
    }
    config.validate()?;
    info!(?config, "Loaded configuration");

    run(&config, cli.snapshot.as_deref())
}

fn run(config: &Config, snapshot: Option<&Path>) -> Result<(), Error> {
    /* --- Window ---
       Visual: a dark window opens; the cover appears as soon as it decodes. */
    let mut drawer = Drawer::new(&config.window.title, config.window.width, config.window.height)?;
    drawer.set_target_fps(config.window.target_fps);
    let (mut w, mut h) = drawer.size();

    /* --- Assets (background decode) --- */
    let mut assets = AssetStore::load(&config.assets.cover, &config.assets.hidden);
    let mut cover = CoverLayer::default();

    /* --- The effect --- */
    let mut controller = RevealController::new(config.reveal.settings(), w as u32, h as u32);
    let mut tracker = InputTracker::new();
    let lut = GammaLut::new();
    let mut screen = FrameBuffer::new(w, h);

    let start = Instant::now();
    let mut last_fps_time = start;
    let mut frames_this_second: u32 = 0;

    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let now_ms = now.duration_since(start).as_secs_f64() * 1000.0;

        // 1) Pick up images that finished decoding.
        if let Some(img) = assets.cover.poll() {
            cover.set_source(img, w as u32, h as u32);
        }
        if let Some(img) = assets.hidden.poll() {
            controller.set_hidden_image(img);
        }

        // 2) Window resized: everything revealed so far is dropped.
        let size = drawer.size();
        if size != (w, h) {
            (w, h) = size;
            info!(width = w, height = h, "window resized; clearing reveals");
            controller.resize_canvas(w as u32, h as u32);
            cover.refit(w as u32, h as u32);
            screen = FrameBuffer::new(w, h);
        }

        // 3) Input -> reveal events.
        for event in tracker.sample(drawer.mouse_pos(), drawer.left_mouse_down()) {
            controller.handle(event, now_ms);
        }

        // 4) One animation frame.
        if let Some(frame) = controller.tick(now_ms) {
            if frame.finished {
                debug!(radius = frame.radius, "radius animation settled");
            }
        }

        // 5) Compose and present.
        compose_frame(&mut screen, cover.fitted(), &controller, &lut);
        drawer.present(&screen)?;

        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            debug!(
                fps = format_args!("{:.1}", frames_this_second as f32 / secs),
                radius = controller.radius(),
                hovering = controller.pointer().inside,
                touching = controller.pointer().touching,
                paints = controller.paint_count(),
                loading = assets.hidden.is_pending(),
                preview = ?controller.preview().custom_properties(),
                "frame stats"
            );
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    if let Some(path) = snapshot {
        write_snapshot(&controller, path)?;
    }
    Ok(())
}

/// Save the permanent reveal layer as a PNG (transparent where nothing was revealed).
fn write_snapshot(controller: &RevealController, path: &Path) -> Result<(), Error> {
    let Some(layer) = controller.reveal_layer() else {
        info!("hidden image never loaded; no snapshot written");
        return Ok(());
    };
    if !controller.canvas().has_any() {
        info!("nothing revealed yet; snapshot will be fully transparent");
    }
    layer
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| Error::Snapshot(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), "snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::RevealSettings;
    use crate::types::Point;
    use image::{Rgba, RgbaImage};

    #[test]
    fn snapshot_contains_revealed_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reveal.png");

        let mut c = RevealController::new(RevealSettings::default(), 64, 64);
        c.set_hidden_image(RgbaImage::from_pixel(64, 64, Rgba([9, 8, 7, 255])));
        c.on_touch_start(Point::new(10.0, 10.0));
        write_snapshot(&c, &path).unwrap();

        let saved = image::open(&path).unwrap().to_rgba8();
        assert_eq!(saved.dimensions(), (64, 64));
        assert_eq!(*saved.get_pixel(10, 10), Rgba([9, 8, 7, 255]));
    }

    #[test]
    fn snapshot_is_skipped_without_hidden_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reveal.png");
        let c = RevealController::new(RevealSettings::default(), 8, 8);
        write_snapshot(&c, &path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn cli_overrides_parse() {
        let cli = Cli::parse_from(["magic-reveal", "--hidden", "h.png", "--width", "320", "-v"]);
        assert_eq!(cli.hidden, Some(PathBuf::from("h.png")));
        assert_eq!(cli.width, Some(320));
        assert!(cli.verbose);
        assert!(cli.snapshot.is_none());
    }
}
