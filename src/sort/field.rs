//! Column field descriptors

use ratatui::layout::Constraint;
use std::cmp::Ordering;

/// Row-side access used by attribute-lookup fields.
///
/// Rows stay opaque to the sort engine; every read goes through a field
/// descriptor, which either asks the row for a named attribute or derives
/// a value with a function.
pub trait RowAccess {
    /// Look up a display attribute by key. `None` means the row has no
    /// value for this attribute.
    fn attr(&self, key: &str) -> Option<String>;
}

/// Comparison key produced for one row and one field.
///
/// `Missing` is the uniform low sentinel: rows without a value for the key
/// sort first in ascending order. Keys of different kinds order by kind
/// rank; field sets are expected to produce one kind per column, the rank
/// only guarantees a total order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Missing,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Text(_) => 3,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How a field produces its display value: a named attribute on the row,
/// or a derivation function.
pub enum FieldValue<R> {
    Attr(&'static str),
    Derived(fn(&R) -> String),
}

// Manual impls: the derived ones would bound `R`, but no variant owns an `R`.
impl<R> Clone for FieldValue<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldValue<R> {}

/// Describes one table column and, implicitly, one potential sort key.
///
/// Labels double as column identity: they must be unique within a field
/// set, the active sort column is found by label equality.
pub struct Field<R> {
    pub label: &'static str,
    pub value: FieldValue<R>,
    /// Comparison key override; when absent the display value is compared
    /// as text.
    pub sort_value: Option<fn(&R) -> SortKey>,
    /// Initial primary sort column. If several fields are flagged, the
    /// first one wins.
    pub default_sort: bool,
    /// Tiebreaker column, applied ascending whenever it is not already
    /// the primary. First flagged field wins here too.
    pub secondary_sort: bool,
    /// Matched by the filter bar.
    pub searchable: bool,
    pub width: Constraint,
}

impl<R> Field<R> {
    pub fn new(label: &'static str, value: FieldValue<R>) -> Self {
        Self {
            label,
            value,
            sort_value: None,
            default_sort: false,
            secondary_sort: false,
            searchable: false,
            width: Constraint::Fill(1),
        }
    }

    pub fn with_sort_value(mut self, sort_value: fn(&R) -> SortKey) -> Self {
        self.sort_value = Some(sort_value);
        self
    }

    pub fn default_sort(mut self) -> Self {
        self.default_sort = true;
        self
    }

    pub fn secondary_sort(mut self) -> Self {
        self.secondary_sort = true;
        self
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn with_width(mut self, width: Constraint) -> Self {
        self.width = width;
        self
    }
}

impl<R: RowAccess> Field<R> {
    /// Cell text for one row.
    pub fn display(&self, row: &R) -> String {
        match self.value {
            FieldValue::Attr(key) => row.attr(key).unwrap_or_default(),
            FieldValue::Derived(derive) => derive(row),
        }
    }

    /// Comparison key for one row: `sort_value` when present, otherwise
    /// the display value.
    pub fn sort_key(&self, row: &R) -> SortKey {
        if let Some(sort_value) = self.sort_value {
            return sort_value(row);
        }
        match self.value {
            FieldValue::Attr(key) => row.attr(key).map_or(SortKey::Missing, SortKey::Text),
            FieldValue::Derived(derive) => SortKey::Text(derive(row)),
        }
    }
}

impl<R> Clone for Field<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Field<R> {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(Option<String>);

    impl RowAccess for Pair {
        fn attr(&self, key: &str) -> Option<String> {
            match key {
                "value" => self.0.clone(),
                _ => None,
            }
        }
    }

    #[test]
    fn missing_orders_below_every_value() {
        assert!(SortKey::Missing < SortKey::Bool(false));
        assert!(SortKey::Missing < SortKey::Int(i64::MIN));
        assert!(SortKey::Missing < SortKey::Text(String::new()));
        assert_eq!(SortKey::Missing.cmp(&SortKey::Missing), Ordering::Equal);
    }

    #[test]
    fn keys_compare_within_kind() {
        assert!(SortKey::Int(1) < SortKey::Int(2));
        assert!(SortKey::Text("a".into()) < SortKey::Text("b".into()));
        assert!(SortKey::Bool(false) < SortKey::Bool(true));
    }

    #[test]
    fn attr_field_falls_back_to_missing() {
        let field: Field<Pair> = Field::new("Value", FieldValue::Attr("value"));
        assert_eq!(field.sort_key(&Pair(None)), SortKey::Missing);
        assert_eq!(
            field.sort_key(&Pair(Some("x".into()))),
            SortKey::Text("x".into())
        );
        assert_eq!(field.display(&Pair(None)), "");
    }

    #[test]
    fn sort_value_overrides_display_value() {
        let field: Field<Pair> = Field::new("Value", FieldValue::Attr("value"))
            .with_sort_value(|row| SortKey::Int(row.0.as_deref().map_or(0, |s| s.len() as i64)));
        assert_eq!(field.sort_key(&Pair(Some("abc".into()))), SortKey::Int(3));
        assert_eq!(field.display(&Pair(Some("abc".into()))), "abc");
    }
}
