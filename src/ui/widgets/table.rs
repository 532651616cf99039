//! Sortable data table widget
//!
//! Hosts the sort engine: owns the sort selection and row selection,
//! derives the ordered field list and re-sorts on every refresh, and
//! renders header cells with the active-column indicator.

use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::sort::{ordered_fields, sort_rows, Field, RowAccess, SortState};
use crate::ui::theme::Theme;

pub struct DataTable<R> {
    fields: Vec<Field<R>>,
    pub sort: SortState,
    pub state: TableState,
}

impl<R: RowAccess + Clone> DataTable<R> {
    pub fn new(fields: Vec<Field<R>>) -> Self {
        let sort = SortState::new(&fields);
        let mut state = TableState::default();
        state.select(Some(0));
        Self {
            fields,
            sort,
            state,
        }
    }

    pub fn fields(&self) -> &[Field<R>] {
        &self.fields
    }

    /// Header activation, routed through the sort state transition.
    pub fn activate_column(&mut self, field_index: usize) {
        self.sort.activate(field_index);
    }

    pub fn next_sort_column(&mut self) {
        self.sort.activate_next(self.fields.len());
    }

    pub fn prev_sort_column(&mut self) {
        self.sort.activate_prev(self.fields.len());
    }

    /// Re-activate the active column, flipping the sort direction.
    pub fn toggle_sort_direction(&mut self) {
        self.sort.activate(self.sort.field_index);
    }

    /// Rows that match the filter query, in sort order. Recomputed from
    /// scratch on every call; the input is untouched.
    pub fn visible_rows(&self, rows: &[R], query: &str) -> Vec<R> {
        let (ordered, use_secondary) = ordered_fields(&self.fields, self.sort.field_index);
        if query.is_empty() {
            return sort_rows(rows, self.sort.reverse, &ordered, use_secondary);
        }

        let query = query.to_lowercase();
        let matched: Vec<R> = rows
            .iter()
            .filter(|row| self.matches(row, &query))
            .cloned()
            .collect();
        sort_rows(&matched, self.sort.reverse, &ordered, use_secondary)
    }

    fn matches(&self, row: &R, query: &str) -> bool {
        self.fields
            .iter()
            .filter(|field| field.searchable)
            .any(|field| field.display(row).to_lowercase().contains(query))
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Move the selection by `delta`; `i32::MIN`/`i32::MAX` jump to the
    /// first/last row.
    pub fn navigate(&mut self, delta: i32, row_count: usize) {
        if row_count == 0 {
            return;
        }
        let current = self.state.selected().unwrap_or(0);
        let index = if delta == i32::MIN {
            0
        } else if delta == i32::MAX {
            row_count - 1
        } else {
            (current as i32 + delta).clamp(0, row_count as i32 - 1) as usize
        };
        self.state.select(Some(index));
    }

    /// Render `rows` (already filtered and sorted via [`visible_rows`]).
    ///
    /// An empty row set takes the dedicated empty-state path instead of an
    /// empty table body. `footer` is an externally supplied line (result
    /// counts, key hints) passed through unmodified.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        rows: &[R],
        theme: &Theme,
        title: &str,
        empty_text: &str,
        footer: Option<Line>,
    ) {
        // The active column is identified by label equality with the
        // primary field; labels are unique within a field set.
        let active_label = self.fields[self.sort.field_index].label;

        let header_cells = self.fields.iter().map(|field| {
            if field.label == active_label {
                let arrow = if self.sort.reverse { " ▼" } else { " ▲" };
                Cell::from(Line::from(vec![
                    Span::styled(field.label, theme.accent().add_modifier(Modifier::BOLD)),
                    Span::styled(arrow, theme.accent()),
                ]))
            } else {
                Cell::from(field.label).style(theme.accent().add_modifier(Modifier::BOLD))
            }
        });
        let header = Row::new(header_cells).height(1);

        let widths: Vec<_> = self.fields.iter().map(|field| field.width).collect();

        let (table_area, footer_area) = if footer.is_some() && area.height > 2 {
            (
                Rect::new(area.x, area.y, area.width, area.height - 1),
                Some(Rect::new(area.x, area.y + area.height - 1, area.width, 1)),
            )
        } else {
            (area, None)
        };

        if rows.is_empty() {
            let table: Table = Table::new(Vec::<Row>::new(), widths).header(header).block(
                Block::default()
                    .borders(Borders::NONE)
                    .title(Span::styled(title.to_string(), theme.accent())),
            );
            frame.render_widget(table, table_area);

            if table_area.height > 2 {
                let empty_area = Rect::new(
                    table_area.x,
                    table_area.y + 2,
                    table_area.width,
                    table_area.height - 2,
                );
                let empty = Paragraph::new(empty_text.to_string())
                    .style(theme.dim())
                    .centered();
                frame.render_widget(empty, empty_area);
            }
        } else {
            let body: Vec<Row> = rows
                .iter()
                .map(|row| {
                    Row::new(
                        self.fields
                            .iter()
                            .map(|field| Cell::from(field.display(row)))
                            .collect::<Vec<_>>(),
                    )
                })
                .collect();

            let table = Table::new(body, widths)
                .header(header)
                .block(
                    Block::default()
                        .borders(Borders::NONE)
                        .title(Span::styled(title.to_string(), theme.accent())),
                )
                .row_highlight_style(theme.selected())
                .highlight_symbol("▶ ");

            frame.render_stateful_widget(table, table_area, &mut self.state);
        }

        if let (Some(line), Some(footer_area)) = (footer, footer_area) {
            frame.render_widget(Paragraph::new(line), footer_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{FieldValue, SortKey};

    #[derive(Debug, Clone, PartialEq)]
    struct Repo {
        name: &'static str,
        stars: i64,
    }

    impl RowAccess for Repo {
        fn attr(&self, key: &str) -> Option<String> {
            match key {
                "name" => Some(self.name.to_string()),
                _ => None,
            }
        }
    }

    fn fields() -> Vec<Field<Repo>> {
        vec![
            Field::new("Name", FieldValue::Attr("name"))
                .default_sort()
                .secondary_sort()
                .searchable(),
            Field::new("Stars", FieldValue::Derived(|r: &Repo| r.stars.to_string()))
                .with_sort_value(|r| SortKey::Int(r.stars)),
        ]
    }

    fn rows() -> Vec<Repo> {
        vec![
            Repo { name: "beta", stars: 2 },
            Repo { name: "alpha", stars: 2 },
            Repo { name: "gamma", stars: 1 },
        ]
    }

    #[test]
    fn visible_rows_follow_default_sort() {
        let table = DataTable::new(fields());
        let names: Vec<_> = table
            .visible_rows(&rows(), "")
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn activating_second_column_sorts_by_it_with_name_tiebreak() {
        let mut table = DataTable::new(fields());
        table.activate_column(1);
        let names: Vec<_> = table
            .visible_rows(&rows(), "")
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["gamma", "alpha", "beta"]);

        // Reversed stars, name tiebreak still ascending.
        table.toggle_sort_direction();
        let names: Vec<_> = table
            .visible_rows(&rows(), "")
            .iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn filter_matches_searchable_fields_only() {
        let table = DataTable::new(fields());
        // "2" appears in the Stars column, but Stars is not searchable.
        assert!(table.visible_rows(&rows(), "2").is_empty());

        let named = table.visible_rows(&rows(), "ALPH");
        assert_eq!(named.len(), 1);
        assert_eq!(named[0].name, "alpha");
    }

    #[test]
    fn zero_rows_render_the_empty_state_text() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut table = DataTable::new(fields());
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();

        terminal
            .draw(|frame| {
                let area = frame.area();
                table.render(frame, area, &[], &theme, " Repos ", "No repositories", None);
            })
            .unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        // Header still shows, the body is the designated empty text.
        assert!(content.contains("Name"));
        assert!(content.contains("Stars"));
        assert!(content.contains("No repositories"));
        assert!(!content.contains("alpha"));
    }

    #[test]
    fn navigation_clamps_to_row_range() {
        let mut table = DataTable::new(fields());
        table.navigate(10, 3);
        assert_eq!(table.selected(), Some(2));
        table.navigate(i32::MIN, 3);
        assert_eq!(table.selected(), Some(0));
        table.navigate(i32::MAX, 3);
        assert_eq!(table.selected(), Some(2));
        table.navigate(-1, 0);
        assert_eq!(table.selected(), Some(2));
    }
}
