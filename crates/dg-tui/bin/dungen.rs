//! Procedural dungeon viewer
//!
//! Generates a map and displays it in the terminal.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use dg_core::{GenConfig, MapGenerator, MapRng, SpawnShape};
use dg_tui::{App, Theme};

/// Procedural dungeon generator and viewer
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about = "Generate and browse dungeon maps", long_about = None)]
struct Args {
    /// Generation seed (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<u64>,

    /// JSON configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Total rooms to spawn
    #[arg(long = "rooms")]
    rooms: Option<usize>,

    /// Main rooms to select (at least 3)
    #[arg(long = "select")]
    select: Option<usize>,

    /// Smoothing level 1-9 (9 disables smoothing)
    #[arg(long = "smooth")]
    smooth: Option<u32>,

    /// Spawn region shape: oval or rectangle
    #[arg(long = "shape")]
    shape: Option<String>,

    /// Force the light-background color theme
    #[arg(long = "light")]
    light: bool,
}

fn build_config(args: &Args) -> Result<GenConfig, String> {
    let mut config = match &args.config {
        Some(path) => GenConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => GenConfig::default(),
    };

    if let Some(rooms) = args.rooms {
        config.generate_rooms = rooms;
    }
    if let Some(select) = args.select {
        config.select_rooms = select;
    }
    if let Some(smooth) = args.smooth {
        config.smooth_level = smooth;
    }
    if let Some(shape) = &args.shape {
        config.spawn_shape = match shape.to_lowercase().as_str() {
            "oval" => SpawnShape::Oval,
            "rectangle" | "rect" => SpawnShape::Rectangle,
            other => return Err(format!("unknown shape '{other}'")),
        };
    }

    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let config = build_config(&args).map_err(io::Error::other)?;
    let generator = MapGenerator::new(config).map_err(io::Error::other)?;
    let seed = args.seed.unwrap_or_else(|| MapRng::from_entropy().seed());
    let theme = if args.light {
        Theme::light()
    } else {
        Theme::detect()
    };

    let mut app = App::new(generator, seed, theme).map_err(io::Error::other)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(100))? {
            let event = event::read()?;
            app.handle_event(event).map_err(io::Error::other)?;
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
