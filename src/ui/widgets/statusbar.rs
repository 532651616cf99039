//! Status bar widget

use ratatui::{
    style::Style,
    text::{Line, Span},
};

/// One status bar segment: an optional label and a styled value.
pub struct StatusItem {
    label: Option<String>,
    value: String,
    style: Style,
}

impl StatusItem {
    pub fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: (!label.is_empty()).then(|| label.to_string()),
            value: value.into(),
            style: Style::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

/// Join status items into one line, separators styled dim so the values
/// stand out.
pub fn build_status_line(items: Vec<StatusItem>, separator_style: Style) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];

    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", separator_style));
        }
        if let Some(label) = item.label {
            spans.push(Span::raw(format!("{}: ", label)));
        }
        spans.push(Span::styled(item.value, item.style));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_optional_and_separators_go_between() {
        let line = build_status_line(
            vec![
                StatusItem::new("", "● Connected"),
                StatusItem::new("Sources", "12"),
            ],
            Style::default(),
        );
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " ● Connected │ Sources: 12");
    }
}
