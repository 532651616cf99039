//! Color theme definitions

use ratatui::style::{Color, Modifier, Style};

use crate::models::ReadyStatus;

/// Application color theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Resource status colors
    pub ready: Color,
    pub reconciling: Color,
    pub not_ready: Color,
    pub suspended: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,

    // Tab colors
    pub tab_active: Color,
    pub tab_inactive: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            fg_dim: Color::DarkGray,

            accent: Color::Cyan,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            ready: Color::Green,
            reconciling: Color::Yellow,
            not_ready: Color::Red,
            suspended: Color::Magenta,

            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection: Color::Blue,

            tab_active: Color::Cyan,
            tab_inactive: Color::DarkGray,
        }
    }
}

impl Theme {
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::default(),
        }
    }

    /// Light theme variant
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            fg_dim: Color::DarkGray,
            accent: Color::Blue,
            border: Color::Gray,
            border_focused: Color::Blue,
            selection: Color::LightBlue,
            tab_active: Color::Blue,
            tab_inactive: Color::Gray,
            ..Self::default()
        }
    }

    // Style helpers
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn selected(&self) -> Style {
        Style::default().bg(self.selection).fg(self.fg)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.tab_active)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.tab_inactive)
    }

    pub fn status_style(&self, status: ReadyStatus) -> Style {
        let color = match status {
            ReadyStatus::Ready => self.ready,
            ReadyStatus::Reconciling => self.reconciling,
            ReadyStatus::NotReady => self.not_ready,
            ReadyStatus::Suspended => self.suspended,
            ReadyStatus::Unknown => self.fg_dim,
        };
        Style::default().fg(color)
    }
}
