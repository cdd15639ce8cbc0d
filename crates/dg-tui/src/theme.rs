//! Terminal color theme system
//!
//! Adaptive color palettes for dark and light terminal backgrounds.
//! Auto-detects via the COLORFGBG env var, with a DG_LIGHT_BG=1
//! override.

use ratatui::style::Color;

/// Color theme for the viewer. UI code goes through these fields
/// instead of hardcoded Color:: values.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Secondary/hint text (status bar, key help)
    pub text_dim: Color,
    /// Default border color
    pub border: Color,
    /// Section headers, highlighted values
    pub accent: Color,

    // Map layers
    pub map_floor: Color,
    pub map_hallway: Color,
    pub map_wall: Color,
    pub map_roof: Color,
    pub map_shadow: Color,
    pub map_cliff: Color,
    pub map_void: Color,
    pub map_blocking: Color,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            accent: Color::Cyan,
            map_floor: Color::White,
            map_hallway: Color::Yellow,
            map_wall: Color::Gray,
            map_roof: Color::DarkGray,
            map_shadow: Color::DarkGray,
            map_cliff: Color::Red,
            map_void: Color::Black,
            map_blocking: Color::LightRed,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            accent: Color::Blue,
            map_floor: Color::Black,
            map_hallway: Color::Yellow,
            map_wall: Color::DarkGray,
            map_roof: Color::Gray,
            map_shadow: Color::Gray,
            map_cliff: Color::Red,
            map_void: Color::White,
            map_blocking: Color::Red,
        }
    }

    /// Auto-detect terminal background and return the matching theme.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    fn is_light_background() -> bool {
        // Explicit override via environment variable
        if let Ok(val) = std::env::var("DG_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is set by many terminals (xterm, rxvt, iTerm2).
        // Format: "fg;bg" with color indices 0-15; light backgrounds
        // have bg index >= 7 (excluding 8, bright black).
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_theme_text_is_white() {
        let theme = Theme::dark();
        assert_eq!(theme.text, Color::White);
        assert_eq!(theme.map_floor, Color::White);
    }

    #[test]
    fn light_theme_text_is_black() {
        let theme = Theme::light();
        assert_eq!(theme.text, Color::Black);
        assert_eq!(theme.map_floor, Color::Black);
    }
}
