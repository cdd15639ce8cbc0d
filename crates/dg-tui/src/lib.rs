//! dg-tui: Terminal map viewer using ratatui
//!
//! Renders generated maps in the terminal with scrolling and layer
//! inspection. All generation logic lives in dg-core; this crate only
//! draws.

pub mod app;
pub mod input;
pub mod theme;

pub use app::{App, ViewLayer};
pub use input::Command;
pub use theme::Theme;
