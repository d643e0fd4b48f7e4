//! Row filtering: global search over visible columns AND one predicate per
//! column filter entry.
//!
//! Malformed filter input (a date that does not parse, a number that is not a
//! number) disables that single predicate. Row values that are missing or do
//! not parse fail the predicate.

use super::cell::format_cell;
use chrono::NaiveDate;
use contracts::shared::data_table::{
    parse_date_input, parse_integer_input, ColumnDecl, ColumnVisibility, DateOp, FilterEntry, IntOp,
    Row, ValueKind,
};
use std::collections::{BTreeMap, BTreeSet};

/// Predicate compiled from a [`FilterEntry`], inputs already parsed
#[derive(Debug)]
enum Predicate<'a> {
    Contains {
        key: &'a str,
        needle: String,
    },
    OneOf {
        key: &'a str,
        selected: &'a BTreeSet<String>,
    },
    DateRange {
        key: &'a str,
        from: NaiveDate,
        to: NaiveDate,
    },
    DateBefore {
        key: &'a str,
        bound: NaiveDate,
    },
    DateAfter {
        key: &'a str,
        bound: NaiveDate,
    },
    Number {
        key: &'a str,
        op: IntOp,
        value: f64,
    },
}

impl Predicate<'_> {
    fn test(&self, row: &Row) -> bool {
        match self {
            Predicate::Contains { key, needle } => row
                .text(key)
                .is_some_and(|t| t.to_lowercase().contains(needle.as_str())),
            Predicate::OneOf { key, selected } => {
                row.text(key).is_some_and(|t| selected.contains(&t))
            }
            Predicate::DateRange { key, from, to } => {
                row_date(row, key).is_some_and(|d| *from <= d && d <= *to)
            }
            Predicate::DateBefore { key, bound } => row_date(row, key).is_some_and(|d| d < *bound),
            Predicate::DateAfter { key, bound } => row_date(row, key).is_some_and(|d| d > *bound),
            Predicate::Number { key, op, value } => {
                row.number(key).is_some_and(|n| op.test(n, *value))
            }
        }
    }
}

fn row_date(row: &Row, key: &str) -> Option<NaiveDate> {
    row.text(key).and_then(|t| parse_date_input(&t).ok())
}

/// Turns one entry into a predicate; `None` when the entry filters nothing.
fn compile<'a>(key: &'a str, entry: &'a FilterEntry) -> Option<Predicate<'a>> {
    if !entry.is_active() {
        return None;
    }
    let parsed = match entry {
        FilterEntry::Text { contains } => Ok(Predicate::Contains {
            key,
            needle: contains.trim().to_lowercase(),
        }),
        FilterEntry::Dropdown { selected } => Ok(Predicate::OneOf { key, selected }),
        FilterEntry::Date { op, value, value2 } => {
            parse_date_input(value).and_then(|bound| match op {
                DateOp::Range => parse_date_input(value2.as_deref().unwrap_or_default())
                    .map(|to| Predicate::DateRange { key, from: bound, to }),
                DateOp::Before => Ok(Predicate::DateBefore { key, bound }),
                DateOp::After => Ok(Predicate::DateAfter { key, bound }),
            })
        }
        FilterEntry::Integer { op, value } => {
            parse_integer_input(value).map(|value| Predicate::Number { key, op: *op, value })
        }
    };

    match parsed {
        Ok(predicate) => Some(predicate),
        Err(e) => {
            log::warn!("filter on '{}' ignored: {}", key, e);
            None
        }
    }
}

/// Global search: some visible column contains `search` (case-insensitive).
/// Empty search matches everything.
///
/// Both the stored value and the text shown in the cell are searched, so a
/// date is found as `2024-03-15` and as `15.03.2024`.
pub fn matches_search(row: &Row, visible: &[&ColumnDecl], search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let contains = |text: &str| text.to_lowercase().contains(&needle);
    visible.iter().any(|col| {
        row.text(&col.key).is_some_and(|raw| {
            contains(&raw) || (col.kind == ValueKind::Date && contains(&format_cell(row, col)))
        })
    })
}

/// Evaluates a single column filter against a row.
pub fn matches_filter(row: &Row, key: &str, entry: &FilterEntry) -> bool {
    compile(key, entry).map_or(true, |p| p.test(row))
}

/// Rows passing the global search and every column filter, in input order.
///
/// Filters are looked up for declared columns only and apply whether or not
/// the column is currently shown.
pub fn apply<'r>(
    rows: &'r [Row],
    columns: &[ColumnDecl],
    visibility: &ColumnVisibility,
    search: &str,
    filters: &BTreeMap<String, FilterEntry>,
) -> Vec<&'r Row> {
    let visible = visibility.visible_columns(columns);
    let predicates: Vec<Predicate<'_>> = columns
        .iter()
        .filter_map(|col| {
            filters
                .get(&col.key)
                .and_then(|entry| compile(&col.key, entry))
        })
        .collect();

    let out: Vec<&Row> = rows
        .iter()
        .filter(|row| matches_search(row, &visible, search))
        .filter(|row| predicates.iter().all(|p| p.test(row)))
        .collect();

    log::debug!(
        "filter: {} -> {} rows ({} column predicates)",
        rows.len(),
        out.len(),
        predicates.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::data_table::FilterKind;

    fn columns() -> Vec<ColumnDecl> {
        vec![
            ColumnDecl::new("name", "Имя").filterable(),
            ColumnDecl::new("role", "Роль").filter_type(FilterKind::Dropdown),
            ColumnDecl::new("age", "Возраст").kind(ValueKind::Integer).filterable(),
            ColumnDecl::new("joined", "Дата").kind(ValueKind::Date).filterable(),
        ]
    }

    fn rows() -> Vec<Row> {
        vec![
            Row::new().with("name", "Anna").with("role", "Admin").with("age", 34).with("joined", "2020-01-01"),
            Row::new().with("name", "Boris").with("role", "User").with("age", 25).with("joined", "2020-06-15"),
            Row::new().with("name", "Clara").with("role", "Guest").with("age", 41).with("joined", "2021-01-01"),
            Row::new().with("name", "Dmitry").with("role", "User").with("age", "n/a").with("joined", "2021-01-02"),
            Row::new().with("name", "Elena").with("role", "Admin"),
        ]
    }

    fn names(rows: &[&Row]) -> Vec<String> {
        rows.iter().filter_map(|r| r.text("name")).collect()
    }

    fn run(filters: &BTreeMap<String, FilterEntry>, search: &str) -> Vec<String> {
        let cols = columns();
        let data = rows();
        let vis = ColumnVisibility::new(&cols, &[]);
        names(&apply(&data, &cols, &vis, search, filters))
    }

    #[test]
    fn test_nothing_active_is_identity() {
        assert_eq!(run(&BTreeMap::new(), ""), vec!["Anna", "Boris", "Clara", "Dmitry", "Elena"]);
    }

    #[test]
    fn test_search_is_case_insensitive_and_trimmed() {
        assert_eq!(run(&BTreeMap::new(), "  ADMIN "), vec!["Anna", "Elena"]);
    }

    #[test]
    fn test_search_finds_date_as_displayed() {
        // "15.03.2024" is how 2024-03-15 is rendered in the cell
        let cols = vec![
            ColumnDecl::new("name", "Имя"),
            ColumnDecl::new("joined", "Дата").kind(ValueKind::Date),
        ];
        let data = vec![
            Row::new().with("name", "Anna").with("joined", "2024-03-15"),
            Row::new().with("name", "Boris").with("joined", "2023-01-02"),
        ];
        let vis = ColumnVisibility::new(&cols, &[]);
        assert_eq!(names(&apply(&data, &cols, &vis, "15.03.2024", &BTreeMap::new())), vec!["Anna"]);
        assert_eq!(names(&apply(&data, &cols, &vis, "2024-03", &BTreeMap::new())), vec!["Anna"]);
        assert_eq!(names(&apply(&data, &cols, &vis, "02.2023", &BTreeMap::new())), Vec::<String>::new());
        assert_eq!(names(&apply(&data, &cols, &vis, "01.2023", &BTreeMap::new())), vec!["Boris"]);
    }

    #[test]
    fn test_search_only_looks_at_visible_columns() {
        let cols = columns();
        let data = rows();
        let vis = ColumnVisibility::new(&cols, &["role"]);
        let out = apply(&data, &cols, &vis, "admin", &BTreeMap::new());
        assert!(out.is_empty());
    }

    #[test]
    fn test_column_filter_ignores_visibility() {
        let cols = columns();
        let data = rows();
        let vis = ColumnVisibility::new(&cols, &["role"]);
        let mut filters = BTreeMap::new();
        filters.insert("role".to_string(), FilterEntry::dropdown(["Guest"]));
        assert_eq!(names(&apply(&data, &cols, &vis, "", &filters)), vec!["Clara"]);
    }

    #[test]
    fn test_text_filter() {
        let mut filters = BTreeMap::new();
        filters.insert("name".to_string(), FilterEntry::text("R"));
        assert_eq!(run(&filters, ""), vec!["Boris", "Clara", "Dmitry"]);
    }

    #[test]
    fn test_dropdown_filter() {
        let mut filters = BTreeMap::new();
        filters.insert("role".to_string(), FilterEntry::dropdown(["Admin", "User"]));
        assert_eq!(run(&filters, ""), vec!["Anna", "Boris", "Dmitry", "Elena"]);

        filters.insert("role".to_string(), FilterEntry::dropdown(Vec::<String>::new()));
        assert_eq!(run(&filters, "").len(), 5);
    }

    #[test]
    fn test_integer_filter_excludes_unparseable_rows() {
        let mut filters = BTreeMap::new();
        filters.insert("age".to_string(), FilterEntry::integer(IntOp::Gt, "30"));
        assert_eq!(run(&filters, ""), vec!["Anna", "Clara"]);

        filters.insert("age".to_string(), FilterEntry::integer(IntOp::Eq, "25"));
        assert_eq!(run(&filters, ""), vec!["Boris"]);
    }

    #[test]
    fn test_malformed_input_is_noop() {
        let mut filters = BTreeMap::new();
        filters.insert("age".to_string(), FilterEntry::integer(IntOp::Gt, "thirty"));
        filters.insert("joined".to_string(), FilterEntry::date(DateOp::Before, "soon"));
        assert_eq!(run(&filters, "").len(), 5);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let mut filters = BTreeMap::new();
        filters.insert(
            "joined".to_string(),
            FilterEntry::date_range("2020-01-01", "2021-01-01"),
        );
        assert_eq!(run(&filters, ""), vec!["Anna", "Boris", "Clara"]);
    }

    #[test]
    fn test_date_before_after_are_strict() {
        let mut filters = BTreeMap::new();
        filters.insert("joined".to_string(), FilterEntry::date(DateOp::Before, "2020-06-15"));
        assert_eq!(run(&filters, ""), vec!["Anna"]);

        filters.insert("joined".to_string(), FilterEntry::date(DateOp::After, "2021-01-01"));
        assert_eq!(run(&filters, ""), vec!["Dmitry"]);
    }

    #[test]
    fn test_incomplete_range_is_noop() {
        let mut filters = BTreeMap::new();
        filters.insert(
            "joined".to_string(),
            FilterEntry::Date {
                op: DateOp::Range,
                value: "2020-01-01".to_string(),
                value2: None,
            },
        );
        assert_eq!(run(&filters, "").len(), 5);
    }

    #[test]
    fn test_filters_on_undeclared_columns_are_ignored() {
        let mut filters = BTreeMap::new();
        filters.insert("salary".to_string(), FilterEntry::integer(IntOp::Gt, "1"));
        assert_eq!(run(&filters, "").len(), 5);
    }

    #[test]
    fn test_matches_filter_single() {
        let row = Row::new().with("age", 31);
        assert!(matches_filter(&row, "age", &FilterEntry::integer(IntOp::Gt, "30")));
        assert!(!matches_filter(&row, "age", &FilterEntry::integer(IntOp::Lt, "30")));
        assert!(matches_filter(&row, "age", &FilterEntry::integer(IntOp::Lt, "")));
    }
}
