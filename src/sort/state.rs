//! Sort column selection state

use super::field::Field;

/// Which column drives the sort and in which direction.
///
/// Owned by the hosting table widget; mutated only through
/// [`SortState::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    /// Index of the primary sort column in the table's field list.
    pub field_index: usize,
    /// Direction flag for the primary column only.
    pub reverse: bool,
}

impl SortState {
    /// Initial state: the first field flagged default-sort, or the first
    /// field when none is flagged.
    pub fn new<R>(fields: &[Field<R>]) -> Self {
        let field_index = fields
            .iter()
            .position(|field| field.default_sort)
            .unwrap_or(0);
        Self {
            field_index,
            reverse: false,
        }
    }

    /// Header activation. Re-activating the current column flips the
    /// direction; activating any other column selects it and resets the
    /// direction to ascending.
    pub fn activate(&mut self, field_index: usize) {
        if field_index == self.field_index {
            self.reverse = !self.reverse;
        } else {
            self.field_index = field_index;
            self.reverse = false;
        }
    }

    /// Activate the next column to the right, wrapping around.
    pub fn activate_next(&mut self, field_count: usize) {
        if field_count > 0 {
            self.activate((self.field_index + 1) % field_count);
        }
    }

    /// Activate the next column to the left, wrapping around.
    pub fn activate_prev(&mut self, field_count: usize) {
        if field_count > 0 {
            self.activate((self.field_index + field_count - 1) % field_count);
        }
    }
}

/// Arrange `fields` as `[primary, secondary?, rest in original order]` for
/// the sort engine, and report whether a genuine secondary column exists.
///
/// The secondary column is the first field flagged secondary-sort; it only
/// participates when it is not already the primary.
pub fn ordered_fields<R>(fields: &[Field<R>], primary: usize) -> (Vec<&Field<R>>, bool) {
    if fields.is_empty() {
        return (Vec::new(), false);
    }

    let secondary = fields.iter().position(|field| field.secondary_sort);
    let use_secondary = secondary.is_some_and(|index| index != primary);

    let mut ordered = Vec::with_capacity(fields.len());
    ordered.push(&fields[primary]);
    if use_secondary {
        if let Some(index) = secondary {
            ordered.push(&fields[index]);
        }
    }
    for (index, field) in fields.iter().enumerate() {
        if index == primary || (use_secondary && Some(index) == secondary) {
            continue;
        }
        ordered.push(field);
    }

    (ordered, use_secondary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::field::FieldValue;

    struct Unit;

    fn field(label: &'static str) -> Field<Unit> {
        Field::new(label, FieldValue::Attr(label))
    }

    fn labels(fields: &[&Field<Unit>]) -> Vec<&'static str> {
        fields.iter().map(|field| field.label).collect()
    }

    #[test]
    fn default_sort_flag_selects_initial_column() {
        let fields = [field("A"), field("B").default_sort(), field("C")];
        assert_eq!(SortState::new(&fields).field_index, 1);
    }

    #[test]
    fn no_default_flag_falls_back_to_first_column() {
        let fields = [field("A"), field("B"), field("C")];
        assert_eq!(SortState::new(&fields).field_index, 0);
    }

    #[test]
    fn first_of_several_default_flags_wins() {
        let fields = [
            field("A"),
            field("B").default_sort(),
            field("C").default_sort(),
        ];
        assert_eq!(SortState::new(&fields).field_index, 1);
    }

    #[test]
    fn activating_current_column_toggles_direction() {
        let fields = [field("A"), field("B")];
        let mut state = SortState::new(&fields);
        assert!(!state.reverse);

        state.activate(0);
        assert_eq!(state.field_index, 0);
        assert!(state.reverse);

        state.activate(0);
        assert!(!state.reverse);
    }

    #[test]
    fn activating_other_column_resets_direction() {
        let fields = [field("A"), field("B")];
        let mut state = SortState::new(&fields);
        state.activate(0);
        assert!(state.reverse);

        state.activate(1);
        assert_eq!(state.field_index, 1);
        assert!(!state.reverse);
    }

    #[test]
    fn ordered_fields_moves_primary_and_secondary_to_front() {
        let fields = [
            field("A"),
            field("B").secondary_sort(),
            field("C"),
            field("D"),
        ];
        let (ordered, use_secondary) = ordered_fields(&fields, 2);
        assert!(use_secondary);
        assert_eq!(labels(&ordered), ["C", "B", "A", "D"]);
    }

    #[test]
    fn secondary_equal_to_primary_is_not_used() {
        let fields = [field("A"), field("B").secondary_sort(), field("C")];
        let (ordered, use_secondary) = ordered_fields(&fields, 1);
        assert!(!use_secondary);
        assert_eq!(labels(&ordered), ["B", "A", "C"]);
    }

    #[test]
    fn no_secondary_flag_keeps_rest_in_original_order() {
        let fields = [field("A"), field("B"), field("C")];
        let (ordered, use_secondary) = ordered_fields(&fields, 1);
        assert!(!use_secondary);
        assert_eq!(labels(&ordered), ["B", "A", "C"]);
    }

    #[test]
    fn first_of_several_secondary_flags_wins() {
        let fields = [
            field("A").secondary_sort(),
            field("B"),
            field("C").secondary_sort(),
        ];
        let (ordered, use_secondary) = ordered_fields(&fields, 1);
        assert!(use_secondary);
        assert_eq!(labels(&ordered), ["B", "A", "C"]);
    }

    #[test]
    fn empty_field_list_yields_empty_ordering() {
        let fields: [Field<Unit>; 0] = [];
        let (ordered, use_secondary) = ordered_fields(&fields, 0);
        assert!(ordered.is_empty());
        assert!(!use_secondary);
    }

    #[test]
    fn cycling_wraps_and_routes_through_activate() {
        let fields = [field("A"), field("B"), field("C")];
        let mut state = SortState::new(&fields);

        state.activate_next(fields.len());
        assert_eq!((state.field_index, state.reverse), (1, false));

        state.activate_prev(fields.len());
        assert_eq!((state.field_index, state.reverse), (0, false));

        state.activate_prev(fields.len());
        assert_eq!((state.field_index, state.reverse), (2, false));

        // A single-column table cycles onto itself, which toggles.
        let mut single = SortState::new(&fields[..1]);
        single.activate_next(1);
        assert!(single.reverse);
    }
}
