//! Theme definitions for iocview
//!
//! Five built-in themes. One theme instance, applied to the file list
//! and the indicator panel alike.

use crate::config::ThemeName;
use crate::report::Level;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,
    pub accent_dim: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Indicator level colors
    pub level_high: Color,
    pub level_medium: Color,
    pub level_low_medium: Color,
    pub level_low: Color,

    // Internal flag for transparent mode
    is_transparent: bool,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Gruvbox => Self::gruvbox(),
            ThemeName::Nord => Self::nord(),
            ThemeName::Dracula => Self::dracula(),
            ThemeName::Hacker => Self::hacker(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Gruvbox dark theme (default)
    pub fn gruvbox() -> Self {
        Self {
            bg: Color::Rgb(40, 40, 40),
            fg: Color::Rgb(235, 219, 178),
            fg_dim: Color::Rgb(146, 131, 116),
            accent: Color::Rgb(254, 128, 25),
            accent_dim: Color::Rgb(214, 93, 14),
            success: Color::Rgb(184, 187, 38),
            warning: Color::Rgb(250, 189, 47),
            error: Color::Rgb(251, 73, 52),
            border: Color::Rgb(80, 73, 69),
            border_focused: Color::Rgb(168, 153, 132),
            selection_bg: Color::Rgb(80, 73, 69),
            selection_fg: Color::Rgb(235, 219, 178),
            level_high: Color::Rgb(251, 73, 52),
            level_medium: Color::Rgb(250, 189, 47),
            level_low_medium: Color::Rgb(131, 165, 152),
            level_low: Color::Rgb(184, 187, 38),
            is_transparent: false,
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(236, 239, 244),
            fg_dim: Color::Rgb(76, 86, 106),
            accent: Color::Rgb(136, 192, 208),
            accent_dim: Color::Rgb(94, 129, 172),
            success: Color::Rgb(163, 190, 140),
            warning: Color::Rgb(235, 203, 139),
            error: Color::Rgb(191, 97, 106),
            border: Color::Rgb(59, 66, 82),
            border_focused: Color::Rgb(136, 192, 208),
            selection_bg: Color::Rgb(76, 86, 106),
            selection_fg: Color::Rgb(236, 239, 244),
            level_high: Color::Rgb(191, 97, 106),
            level_medium: Color::Rgb(208, 135, 112), // aurora orange
            level_low_medium: Color::Rgb(235, 203, 139),
            level_low: Color::Rgb(163, 190, 140),
            is_transparent: false,
        }
    }

    /// Dracula theme
    pub fn dracula() -> Self {
        Self {
            bg: Color::Rgb(40, 42, 54),
            fg: Color::Rgb(248, 248, 242),
            fg_dim: Color::Rgb(98, 114, 164),      // comment
            accent: Color::Rgb(189, 147, 249),     // purple
            accent_dim: Color::Rgb(139, 233, 253), // cyan
            success: Color::Rgb(80, 250, 123),     // green
            warning: Color::Rgb(241, 250, 140),    // yellow
            error: Color::Rgb(255, 85, 85),        // red
            border: Color::Rgb(68, 71, 90),        // current line
            border_focused: Color::Rgb(189, 147, 249),
            selection_bg: Color::Rgb(68, 71, 90),
            selection_fg: Color::Rgb(248, 248, 242),
            level_high: Color::Rgb(255, 85, 85),
            level_medium: Color::Rgb(255, 184, 108), // orange
            level_low_medium: Color::Rgb(241, 250, 140),
            level_low: Color::Rgb(80, 250, 123),
            is_transparent: false,
        }
    }

    /// Hacker theme (black + green)
    pub fn hacker() -> Self {
        Self {
            bg: Color::Rgb(0, 0, 0),
            fg: Color::Rgb(0, 255, 0),
            fg_dim: Color::Rgb(0, 140, 0),
            accent: Color::Rgb(0, 255, 65),
            accent_dim: Color::Rgb(0, 200, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(80, 255, 0),
            error: Color::Rgb(255, 0, 0),
            border: Color::Rgb(0, 60, 0),
            border_focused: Color::Rgb(0, 255, 0),
            selection_bg: Color::Rgb(0, 50, 0),
            selection_fg: Color::Rgb(0, 255, 0),
            level_high: Color::Rgb(255, 0, 0),
            level_medium: Color::Rgb(255, 160, 0),
            level_low_medium: Color::Rgb(200, 255, 0),
            level_low: Color::Rgb(0, 200, 255),
            is_transparent: false,
        }
    }

    /// Transparent theme (uses terminal colors)
    pub fn transparent() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            fg_dim: Color::Gray,
            accent: Color::Cyan,
            accent_dim: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection_bg: Color::Reset,
            selection_fg: Color::White,
            level_high: Color::Red,
            level_medium: Color::LightRed,
            level_low_medium: Color::Yellow,
            level_low: Color::Green,
            is_transparent: true,
        }
    }

    // === STYLE HELPERS ===

    fn with_bg(&self, style: Style) -> Style {
        if self.is_transparent {
            style
        } else {
            style.bg(self.bg)
        }
    }

    pub fn text(&self) -> Style {
        self.with_bg(Style::default().fg(self.fg))
    }

    pub fn text_dim(&self) -> Style {
        self.with_bg(Style::default().fg(self.fg_dim))
    }

    pub fn title(&self) -> Style {
        self.with_bg(Style::default().fg(self.accent).add_modifier(Modifier::BOLD))
    }

    pub fn selected(&self) -> Style {
        let style = Style::default()
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD);
        if self.is_transparent {
            style.add_modifier(Modifier::REVERSED)
        } else {
            style.bg(self.selection_bg)
        }
    }

    pub fn border(&self) -> Style {
        self.with_bg(Style::default().fg(self.border))
    }

    pub fn border_focused(&self) -> Style {
        self.with_bg(Style::default().fg(self.border_focused))
    }

    pub fn success(&self) -> Style {
        self.with_bg(Style::default().fg(self.success))
    }

    pub fn warning(&self) -> Style {
        self.with_bg(Style::default().fg(self.warning))
    }

    pub fn error(&self) -> Style {
        self.with_bg(Style::default().fg(self.error))
    }

    pub fn block_style(&self) -> Style {
        self.with_bg(Style::default())
    }

    /// Level badge style. Unknown levels render as plain text.
    pub fn level(&self, level: &Level) -> Style {
        let color = match level {
            Level::High => self.level_high,
            Level::Medium => self.level_medium,
            Level::LowMedium => self.level_low_medium,
            Level::Low => self.level_low,
            Level::Other(_) => return self.text(),
        };
        self.with_bg(Style::default().fg(color).add_modifier(Modifier::BOLD))
    }

    /// Style of a panel button. A focused disabled button keeps the focus
    /// mark but stays dim.
    pub fn button(&self, focused: bool, disabled: bool) -> Style {
        match (focused, disabled) {
            (true, true) => Style::default()
                .fg(self.fg_dim)
                .add_modifier(Modifier::REVERSED),
            (true, false) => self.selected(),
            (false, true) => self.with_bg(Style::default().fg(self.border)),
            (false, false) => self.with_bg(Style::default().fg(self.accent_dim)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_name() {
        let gruvbox = Theme::from_name(ThemeName::Gruvbox);
        assert_eq!(gruvbox.bg, Color::Rgb(40, 40, 40));
        assert!(!gruvbox.is_transparent);

        let nord = Theme::from_name(ThemeName::Nord);
        assert_eq!(nord.bg, Color::Rgb(46, 52, 64));

        let transparent = Theme::from_name(ThemeName::Transparent);
        assert!(transparent.is_transparent);
        assert_eq!(transparent.text().bg, None);
    }

    #[test]
    fn test_level_styles() {
        let theme = Theme::gruvbox();
        assert_eq!(theme.level(&Level::High).fg, Some(theme.level_high));
        assert_eq!(theme.level(&Level::LowMedium).fg, Some(theme.level_low_medium));
        assert_eq!(theme.level(&Level::Other("Critical".into())), theme.text());
    }

    #[test]
    fn test_focused_disabled_button_is_distinct() {
        for theme in [Theme::gruvbox(), Theme::transparent()] {
            let focused = theme.button(true, false);
            let focused_disabled = theme.button(true, true);
            assert_ne!(focused_disabled, focused);
            assert_ne!(focused_disabled, theme.button(false, true));
            assert_eq!(focused_disabled.fg, Some(theme.fg_dim));
        }
    }
}
