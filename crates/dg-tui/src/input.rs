//! Input handling - convert key events to viewer commands

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Scroll direction on the map view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDir {
    North,
    South,
    East,
    West,
}

/// Viewer commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Scroll(ScrollDir),
    Page(ScrollDir),
    /// Regenerate with a fresh random seed.
    Reseed,
    /// Re-run the pipeline with the current seed.
    Regenerate,
    CycleLayer,
    Quit,
}

/// Convert a key event to a viewer command.
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        // Vi keys and arrows
        KeyCode::Char('h') | KeyCode::Left => Some(Command::Scroll(ScrollDir::West)),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::Scroll(ScrollDir::South)),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::Scroll(ScrollDir::North)),
        KeyCode::Char('l') | KeyCode::Right => Some(Command::Scroll(ScrollDir::East)),

        // Capital Vi keys for paging
        KeyCode::Char('H') => Some(Command::Page(ScrollDir::West)),
        KeyCode::Char('J') => Some(Command::Page(ScrollDir::South)),
        KeyCode::Char('K') => Some(Command::Page(ScrollDir::North)),
        KeyCode::Char('L') => Some(Command::Page(ScrollDir::East)),

        KeyCode::Char('r') => Some(Command::Reseed),
        KeyCode::Char('g') => Some(Command::Regenerate),
        KeyCode::Char('t') | KeyCode::Tab => Some(Command::CycleLayer),
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),

        _ => None,
    }
}
