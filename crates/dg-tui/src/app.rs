//! Application state and map rendering

use crossterm::event::Event;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use strum::Display;

use dg_core::{Cell, GeneratedMap, GenerationError, MapGenerator, TileKind};

use crate::input::{Command, ScrollDir, key_to_command};
use crate::theme::Theme;

/// Which layer of the map is being inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ViewLayer {
    /// Normalized cells: rooms and hallways.
    #[default]
    Cells,
    /// Resolved tile layers: walls, roofs, shadows, cliffs.
    Tiles,
    /// Collision view: the blocking layer over the floors.
    Blocking,
}

impl ViewLayer {
    pub fn next(self) -> Self {
        match self {
            Self::Cells => Self::Tiles,
            Self::Tiles => Self::Blocking,
            Self::Blocking => Self::Cells,
        }
    }
}

/// Viewer state: the current map, seed, scroll offset and view layer.
pub struct App {
    generator: MapGenerator,
    map: GeneratedMap,
    seed: u64,
    view: ViewLayer,
    scroll: (i32, i32),
    theme: Theme,
    quit: bool,
}

impl App {
    pub fn new(generator: MapGenerator, seed: u64, theme: Theme) -> Result<Self, GenerationError> {
        let map = generator.generate_seeded(seed)?;
        Ok(Self {
            generator,
            map,
            seed,
            view: ViewLayer::default(),
            scroll: (0, 0),
            theme,
            quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn map(&self) -> &GeneratedMap {
        &self.map
    }

    fn regenerate(&mut self, seed: u64) -> Result<(), GenerationError> {
        self.map = self.generator.generate_seeded(seed)?;
        self.seed = seed;
        self.scroll = (0, 0);
        Ok(())
    }

    /// Apply one input event.
    pub fn handle_event(&mut self, event: Event) -> Result<(), GenerationError> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        let Some(command) = key_to_command(key) else {
            return Ok(());
        };

        match command {
            Command::Scroll(dir) => self.scroll_by(dir, 1),
            Command::Page(dir) => self.scroll_by(dir, 10),
            Command::Reseed => self.regenerate(self.seed.wrapping_add(1))?,
            Command::Regenerate => self.regenerate(self.seed)?,
            Command::CycleLayer => self.view = self.view.next(),
            Command::Quit => self.quit = true,
        }
        Ok(())
    }

    fn scroll_by(&mut self, dir: ScrollDir, step: i32) {
        match dir {
            ScrollDir::West => self.scroll.0 -= step,
            ScrollDir::East => self.scroll.0 += step,
            ScrollDir::North => self.scroll.1 -= step,
            ScrollDir::South => self.scroll.1 += step,
        }
        let w = self.map.grid.width() as i32;
        let h = self.map.grid.height() as i32;
        self.scroll.0 = self.scroll.0.clamp(0, (w - 1).max(0));
        self.scroll.1 = self.scroll.1.clamp(0, (h - 1).max(0));
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(frame.area());

        frame.render_widget(
            MapView {
                map: &self.map,
                view: self.view,
                scroll: self.scroll,
                theme: &self.theme,
            },
            chunks[0],
        );
        frame.render_widget(self.status_line(), chunks[1]);
    }

    fn status_line(&self) -> Paragraph<'_> {
        let line = Line::from(vec![
            Span::styled(format!(" seed {} ", self.seed), self.theme.accent()),
            Span::styled(format!("[{}] ", self.view), self.theme.text()),
            Span::styled(
                "hjkl/arrows scroll  t layer  r reseed  g regen  q quit",
                self.theme.dim(),
            ),
        ]);
        Paragraph::new(line)
    }
}

impl Theme {
    fn text(&self) -> Style {
        Style::default().fg(self.text)
    }

    fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    fn accent(&self) -> Style {
        Style::default().fg(self.accent).bold()
    }
}

/// Widget that draws one layer of the map into the frame, scrolled.
struct MapView<'a> {
    map: &'a GeneratedMap,
    view: ViewLayer,
    scroll: (i32, i32),
    theme: &'a Theme,
}

impl MapView<'_> {
    /// Glyph and color for a grid-local cell in the current view.
    fn cell_display(&self, x: i32, y: i32) -> (char, Style) {
        match self.view {
            ViewLayer::Cells => self.cells_display(x, y),
            ViewLayer::Tiles => self.tiles_display(x, y),
            ViewLayer::Blocking => self.blocking_display(x, y),
        }
    }

    fn cells_display(&self, x: i32, y: i32) -> (char, Style) {
        match self.map.grid.get(x, y) {
            Cell::MainRoom => ('.', Style::default().fg(self.theme.map_floor)),
            Cell::Hallway => ('#', Style::default().fg(self.theme.map_hallway)),
            _ => (' ', Style::default().fg(self.theme.map_void)),
        }
    }

    /// One character per cell, densest layer first: a wall tile hides
    /// the roof piece behind it, a floor hides a shadow under it.
    fn tiles_display(&self, x: i32, y: i32) -> (char, Style) {
        let pos = (x, y);
        let layers = &self.map.layers;

        if let Some(tile) = layers.wall.get(&pos) {
            return (wall_glyph(*tile), Style::default().fg(self.theme.map_wall));
        }
        if let Some(tile) = layers.wall_top.get(&pos) {
            return (roof_glyph(*tile), Style::default().fg(self.theme.map_roof));
        }
        if layers.floor.contains_key(&pos) {
            return ('.', Style::default().fg(self.theme.map_floor));
        }
        if layers.cliff.contains_key(&pos) {
            return ('▒', Style::default().fg(self.theme.map_cliff));
        }
        if layers.shadow.contains_key(&pos) {
            return ('░', Style::default().fg(self.theme.map_shadow));
        }
        (' ', Style::default().fg(self.theme.map_void))
    }

    fn blocking_display(&self, x: i32, y: i32) -> (char, Style) {
        let pos = (x, y);
        if self.map.layers.blocking.contains_key(&pos) {
            ('█', Style::default().fg(self.theme.map_blocking))
        } else if self.map.layers.floor.contains_key(&pos) {
            ('.', Style::default().fg(self.theme.map_floor))
        } else {
            (' ', Style::default().fg(self.theme.map_void))
        }
    }
}

impl Widget for MapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            "dungen {}x{}",
            self.map.grid.width(),
            self.map.grid.height()
        );
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let grid_h = self.map.grid.height() as i32;
        for row in 0..inner.height as i32 {
            for col in 0..inner.width as i32 {
                // Grid y grows upward; terminal rows grow downward.
                let gx = col + self.scroll.0;
                let gy = grid_h - 1 - row - self.scroll.1;
                let (ch, style) = self.cell_display(gx, gy);
                if let Some(cell) =
                    buf.cell_mut(Position::new(inner.x + col as u16, inner.y + row as u16))
                {
                    cell.set_char(ch);
                    cell.set_style(style);
                }
            }
        }
    }
}

/// Box-drawing glyph for a wall-layer tile.
fn wall_glyph(tile: TileKind) -> char {
    match tile {
        TileKind::WallTop | TileKind::WallBottom => '─',
        TileKind::WallLeft | TileKind::WallRight => '│',
        TileKind::WallTopLeft => '┌',
        TileKind::WallTopRight => '┐',
        TileKind::WallBottomLeft => '└',
        TileKind::WallBottomRight => '┘',
        TileKind::WallTopCenter | TileKind::WallT => '┬',
        _ => '#',
    }
}

/// Glyph for a roof piece in the wall-top layer.
fn roof_glyph(_tile: TileKind) -> char {
    '▀'
}
