use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::draw::{Layout, render};
use grid_snake::input::{MOVEMENT_KEYS, key_name};
use grid_snake::store::{JsonFileStore, MemoryStore, ScoreStore};
use grid_snake::ticker::Ticker;
use grid_snake::{Game, GameConfig, Session};
use pixels::{Pixels, SurfaceTexture};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

#[derive(Parser)]
#[command(name = "grid-snake")]
#[command(version, about = "Classic snake on a square grid")]
struct Cli {
    /// Cells per side of the board
    #[arg(long)]
    tiles: Option<u16>,

    /// Pixels per cell
    #[arg(long)]
    cell_px: Option<u32>,

    /// Milliseconds between moves
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Score file (defaults to the user data directory)
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Keep scores in memory only
    #[arg(long, conflicts_with = "scores")]
    no_persist: bool,

    /// Seed for snake and food placement
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> GameConfig {
        let defaults = GameConfig::default();
        GameConfig {
            tiles: self.tiles.unwrap_or(defaults.tiles),
            cell_px: self.cell_px.unwrap_or(defaults.cell_px),
            tick_ms: self.tick_ms.unwrap_or(defaults.tick_ms),
            ..defaults
        }
    }

    fn open_store(&self) -> Result<Box<dyn ScoreStore>> {
        if self.no_persist {
            return Ok(Box::new(MemoryStore::new()));
        }
        let path = match &self.scores {
            Some(path) => path.clone(),
            None => JsonFileStore::default_path()?,
        };
        let store = JsonFileStore::open(path)?;
        info!(path = %store.path().display(), "using score file");
        Ok(Box::new(store))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    config.validate().context("invalid game settings")?;

    let game = match cli.seed {
        Some(seed) => Game::with_seed(&config, seed)?,
        None => Game::new(&config)?,
    };
    let mut session = Session::new(game, cli.open_store()?);
    let layout = Layout::new(&config);

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let window = WindowBuilder::new()
        .with_title("Snake")
        .with_inner_size(LogicalSize::new(layout.width(), layout.height()))
        .with_resizable(false)
        .build(&event_loop)
        .context("creating window")?;

    let mut pixels = {
        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
        Pixels::new(layout.width(), layout.height(), surface_texture)
            .context("creating pixel surface")?
    };

    let mut ticker = Ticker::new(config.tick(), Instant::now());

    event_loop.run(move |event, _, control_flow| {
        if let Event::RedrawRequested(_) = event {
            render(pixels.frame_mut(), &layout, &session);
            if let Err(err) = pixels.render() {
                error!("render failed: {err}");
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape)
                || input.close_requested()
                || input.destroyed()
            {
                *control_flow = ControlFlow::Exit;
                return;
            }

            for code in MOVEMENT_KEYS {
                if !input.key_pressed(code) {
                    continue;
                }
                if let Some(name) = key_name(code) {
                    if session.handle_key(name) {
                        // First move comes one full period after the key.
                        ticker.restart(Instant::now());
                    }
                }
            }

            let now = Instant::now();
            if ticker.poll(now) {
                session.tick();
            }

            window.request_redraw();
            *control_flow = ControlFlow::WaitUntil(now + ticker.remaining(now));
        }
    });
}
