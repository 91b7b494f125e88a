//! Widget styling configuration.
//!
//! Every color the UI draws comes from [`SearchStyles`], so `--no-color`
//! and `NO_COLOR` switch the whole screen to the terminal's default style.

use crate::state::SearchStatus;
use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    /// Colors on, regardless of environment.
    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== SearchStyles =====

/// Styles for every part of the search screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStyles {
    /// Border of the widget that has keyboard focus.
    pub focused_border: Style,
    /// Border of unfocused widgets.
    pub border: Style,
    /// Cursor cell in a focused text field.
    pub cursor: Style,
    /// Title bar.
    pub header: Style,
    /// Results table column headers.
    pub table_header: Style,
    /// Limit warning line.
    pub warning: Style,
    /// "No result found" / "Failed to fetch data".
    pub error: Style,
    /// "Loading..." and "Start searching".
    pub muted: Style,
    /// Button of the page being shown.
    pub current_page: Style,
    /// Other page buttons.
    pub page_button: Style,
    /// Key names in the help overlay and status bar.
    pub key: Style,
    /// Section headers in the help overlay.
    pub section: Style,
}

impl SearchStyles {
    /// Styles following `config`.
    ///
    /// With colors disabled only text modifiers remain, so focus and the
    /// current page are still distinguishable.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                focused_border: Style::default().fg(Color::Cyan),
                border: Style::default().fg(Color::DarkGray),
                cursor: Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
                header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                table_header: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                warning: Style::default().fg(Color::Yellow),
                error: Style::default().fg(Color::Red),
                muted: Style::default().fg(Color::Gray),
                current_page: Style::default()
                    .bg(Color::Cyan)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
                page_button: Style::default().fg(Color::Cyan),
                key: Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                section: Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            }
        } else {
            let bold = Style::default().add_modifier(Modifier::BOLD);
            Self {
                focused_border: bold,
                border: Style::default(),
                cursor: Style::default().add_modifier(Modifier::REVERSED),
                header: bold,
                table_header: bold,
                warning: Style::default(),
                error: Style::default(),
                muted: Style::default(),
                current_page: Style::default().add_modifier(Modifier::REVERSED),
                page_button: Style::default(),
                key: bold,
                section: Style::default().add_modifier(Modifier::UNDERLINED),
            }
        }
    }

    /// Border style for a widget with or without focus.
    pub fn border_for(&self, focused: bool) -> Style {
        if focused {
            self.focused_border
        } else {
            self.border
        }
    }

    /// Style of the table body message for `status`.
    pub fn body_for(&self, status: SearchStatus) -> Style {
        match status {
            SearchStatus::Error(_) => self.error,
            SearchStatus::Idle | SearchStatus::Loading | SearchStatus::Loaded => self.muted,
        }
    }
}

impl Default for SearchStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}

// ===== Tests =====
