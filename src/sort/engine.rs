//! Stable multi-key row ordering

use std::cmp::Ordering;

use super::field::{Field, RowAccess};

/// Direction for the field at `index` in the ordered field list.
///
/// The primary field follows `reverse_sort`. A genuine secondary field
/// (index 1 when `use_secondary_sort`) is always ascending, so ties on the
/// primary key break the same way whichever direction the primary is
/// sorted in. Every later field follows the primary's direction; those
/// only ever act as tiebreakers.
fn descending(index: usize, reverse_sort: bool, use_secondary_sort: bool) -> bool {
    reverse_sort && !(use_secondary_sort && index == 1)
}

/// Order `rows` by the pre-arranged `[primary, secondary?, rest..]` field
/// list. The input is left untouched; a new ordered vector is returned.
///
/// The sort is stable: rows equal on every key keep their original
/// relative order.
pub fn sort_rows<R>(
    rows: &[R],
    reverse_sort: bool,
    ordered_fields: &[&Field<R>],
    use_secondary_sort: bool,
) -> Vec<R>
where
    R: RowAccess + Clone,
{
    let mut ordered = rows.to_vec();
    ordered.sort_by(|a, b| {
        for (index, field) in ordered_fields.iter().enumerate() {
            let mut cmp = field.sort_key(a).cmp(&field.sort_key(b));
            if descending(index, reverse_sort, use_secondary_sort) {
                cmp = cmp.reverse();
            }
            if cmp != Ordering::Equal {
                return cmp;
            }
        }
        Ordering::Equal
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::field::{FieldValue, SortKey};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        name: &'static str,
        value: i64,
        tag: Option<&'static str>,
    }

    impl Item {
        fn new(name: &'static str, value: i64) -> Self {
            Self { name, value, tag: None }
        }

        fn with_tag(mut self, tag: &'static str) -> Self {
            self.tag = Some(tag);
            self
        }
    }

    impl RowAccess for Item {
        fn attr(&self, key: &str) -> Option<String> {
            match key {
                "name" => Some(self.name.to_string()),
                "tag" => self.tag.map(str::to_string),
                _ => None,
            }
        }
    }

    fn value_field() -> Field<Item> {
        Field::new("Value", FieldValue::Derived(|item: &Item| item.value.to_string()))
            .with_sort_value(|item| SortKey::Int(item.value))
    }

    fn name_field() -> Field<Item> {
        Field::new("Name", FieldValue::Attr("name"))
    }

    fn tag_field() -> Field<Item> {
        Field::new("Tag", FieldValue::Attr("tag"))
    }

    fn names(rows: &[Item]) -> Vec<&'static str> {
        rows.iter().map(|item| item.name).collect()
    }

    #[test]
    fn orders_by_primary_then_secondary() {
        // Ties on the value column break by ascending name, independent
        // of the primary direction.
        let rows = vec![Item::new("b", 2), Item::new("a", 2), Item::new("c", 1)];
        let value = value_field();
        let name = name_field();
        let fields = [&value, &name];

        let sorted = sort_rows(&rows, false, &fields, true);
        assert_eq!(names(&sorted), ["c", "a", "b"]);

        let reversed = sort_rows(&rows, true, &fields, true);
        assert_eq!(names(&reversed), ["a", "b", "c"]);
    }

    #[test]
    fn secondary_stays_ascending_when_primary_reversed() {
        let rows = vec![Item::new("z", 5), Item::new("a", 5)];
        let value = value_field();
        let name = name_field();
        let fields = [&value, &name];

        for reverse in [false, true] {
            let sorted = sort_rows(&rows, reverse, &fields, true);
            assert_eq!(names(&sorted), ["a", "z"], "reverse={reverse}");
        }
    }

    #[test]
    fn without_secondary_all_fields_follow_primary_direction() {
        let rows = vec![Item::new("a", 1), Item::new("b", 1)];
        let value = value_field();
        let name = name_field();
        let fields = [&value, &name];

        let sorted = sort_rows(&rows, true, &fields, false);
        assert_eq!(names(&sorted), ["b", "a"]);
    }

    #[test]
    fn reversing_keeps_rows_tied_on_primary_in_place() {
        // b and a tie on the primary and on every later key, so their
        // relative order must survive a direction flip.
        let rows = vec![
            Item::new("b", 2).with_tag("same"),
            Item::new("a", 2).with_tag("same"),
            Item::new("c", 1).with_tag("same"),
        ];
        let value = value_field();
        let tag = tag_field();
        let fields = [&value, &tag];

        let sorted = sort_rows(&rows, false, &fields, false);
        assert_eq!(names(&sorted), ["c", "b", "a"]);

        let reversed = sort_rows(&rows, true, &fields, false);
        assert_eq!(names(&reversed), ["b", "a", "c"]);
    }

    #[test]
    fn equal_rows_keep_original_order() {
        let rows = vec![
            Item::new("first", 1),
            Item::new("second", 1),
            Item::new("third", 1),
        ];
        let value = value_field();
        let fields = [&value];

        for reverse in [false, true] {
            let sorted = sort_rows(&rows, reverse, &fields, false);
            assert_eq!(names(&sorted), ["first", "second", "third"]);
        }
    }

    #[test]
    fn missing_values_sort_first_ascending() {
        let rows = vec![
            Item::new("tagged", 1).with_tag("x"),
            Item::new("untagged", 1),
        ];
        let tag = tag_field();
        let fields = [&tag];

        let sorted = sort_rows(&rows, false, &fields, false);
        assert_eq!(names(&sorted), ["untagged", "tagged"]);

        let reversed = sort_rows(&rows, true, &fields, false);
        assert_eq!(names(&reversed), ["tagged", "untagged"]);
    }

    #[test]
    fn later_fields_break_remaining_ties() {
        let rows = vec![
            Item::new("b", 1).with_tag("same"),
            Item::new("a", 1).with_tag("same"),
        ];
        let value = value_field();
        let tag = tag_field();
        let name = name_field();
        let fields = [&value, &tag, &name];

        let sorted = sort_rows(&rows, false, &fields, true);
        assert_eq!(names(&sorted), ["a", "b"]);
    }

    #[test]
    fn deterministic_and_input_untouched() {
        let rows = vec![Item::new("b", 2), Item::new("a", 3), Item::new("c", 1)];
        let value = value_field();
        let fields = [&value];

        let first = sort_rows(&rows, false, &fields, false);
        let second = sort_rows(&rows, false, &fields, false);
        assert_eq!(first, second);
        assert_eq!(names(&rows), ["b", "a", "c"]);
    }

    #[test]
    fn empty_rows_produce_empty_output() {
        let rows: Vec<Item> = Vec::new();
        let value = value_field();
        let fields = [&value];
        assert!(sort_rows(&rows, true, &fields, false).is_empty());
    }
}
