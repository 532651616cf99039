//! Screen layout management

use ratatui::layout::{Constraint, Layout, Rect};

/// Standard application layout areas
pub struct AppLayout {
    pub tabs: Rect,
    pub content: Rect,
    pub status: Rect,
}

impl AppLayout {
    /// Create layout from terminal area
    pub fn new(area: Rect) -> Self {
        let [tabs, content, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .areas(area);

        Self {
            tabs,
            content,
            status,
        }
    }
}

/// Tab-content layout with an optional filter bar on top.
pub struct FilterLayout {
    pub filter: Rect,
    pub content: Rect,
}

impl FilterLayout {
    /// When the filter bar is hidden its area collapses to zero height
    /// and the content takes the whole region.
    pub fn new(area: Rect, filter_visible: bool) -> Self {
        let filter_height = if filter_visible { 3 } else { 0 };
        let [filter, content] =
            Layout::vertical([Constraint::Length(filter_height), Constraint::Min(5)]).areas(area);

        Self { filter, content }
    }
}

/// Dialog/popup centered layout
pub struct DialogLayout {
    pub dialog: Rect,
}

impl DialogLayout {
    /// Create centered dialog with fixed dimensions
    pub fn centered(area: Rect, width: u16, height: u16) -> Self {
        let width = width.min(area.width);
        let height = height.min(area.height);
        let x = area.x + (area.width - width) / 2;
        let y = area.y + (area.height - height) / 2;

        Self {
            dialog: Rect::new(x, y, width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_bar_collapses_when_hidden() {
        let area = Rect::new(0, 0, 80, 24);
        let shown = FilterLayout::new(area, true);
        assert_eq!(shown.filter.height, 3);
        assert_eq!(shown.content.height, 21);

        let hidden = FilterLayout::new(area, false);
        assert_eq!(hidden.filter.height, 0);
        assert_eq!(hidden.content.height, 24);
    }

    #[test]
    fn dialog_clamps_to_small_areas() {
        let area = Rect::new(0, 0, 40, 10);
        let layout = DialogLayout::centered(area, 60, 20);
        assert_eq!(layout.dialog.width, 40);
        assert_eq!(layout.dialog.height, 10);
    }
}
