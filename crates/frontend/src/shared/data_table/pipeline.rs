use super::sticky::{column_geometry, sticky_column_count, ColumnGeometry};
use super::{filter, paginate, sort};
use contracts::shared::data_table::{ColumnDecl, ColumnVisibility, Row, TableConfig, ViewState};

/// Rows of the current page and the counts around them
#[derive(Debug, Clone, PartialEq)]
pub struct RowPage {
    pub rows: Vec<Row>,
    /// Rows left after filtering, across all pages
    pub total: usize,
    pub page_count: usize,
}

/// Everything the table renders for one view state
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedView {
    /// Rows of the current page
    pub rows: Vec<Row>,
    pub total: usize,
    pub page_count: usize,
    /// Geometry of the displayed columns, in display order
    pub columns: Vec<ColumnGeometry>,
}

/// filter → sort → paginate.
pub fn derive_rows(rows: &[Row], columns: &[ColumnDecl], view: &ViewState) -> RowPage {
    let filtered = filter::apply(rows, columns, &view.visibility, &view.search, &view.filters);
    let ordered = sort::apply(filtered, view.sort.as_ref());
    let total = ordered.len();
    let page_rows: Vec<Row> = paginate::apply(&ordered, view.page_size, view.page)
        .into_iter()
        .cloned()
        .collect();

    RowPage {
        rows: page_rows,
        total,
        page_count: paginate::page_count(total, view.page_size),
    }
}

/// Geometry of the visible columns; depends on visibility only.
pub fn column_layout(
    columns: &[ColumnDecl],
    visibility: &ColumnVisibility,
    fallback_width: f64,
) -> Vec<ColumnGeometry> {
    let displayed = visibility.visible_columns(columns);
    column_geometry(&displayed, sticky_column_count(&displayed), fallback_width)
}

/// [`derive_rows`] plus [`column_layout`].
///
/// A pure function of its inputs; re-run it whenever the view state changes.
/// The table component memoizes the two halves separately.
pub fn derive(
    rows: &[Row],
    columns: &[ColumnDecl],
    view: &ViewState,
    config: &TableConfig,
) -> DerivedView {
    let page = derive_rows(rows, columns, view);
    DerivedView {
        rows: page.rows,
        total: page.total,
        page_count: page.page_count,
        columns: column_layout(columns, &view.visibility, config.sticky_fallback_width),
    }
}


#[cfg(test)]
mod properties {
    use super::*;
    use crate::shared::data_table::{filter, paginate, sort, sticky};
    use contracts::shared::data_table::{FilterEntry, IntOp, SortState, ValueKind};
    use proptest::prelude::*;

    fn columns() -> Vec<ColumnDecl> {
        vec![
            ColumnDecl::new("idx", "#"),
            ColumnDecl::new("name", "Имя").filterable(),
            ColumnDecl::new("age", "Возраст").kind(ValueKind::Integer).filterable(),
        ]
    }

    fn build_rows(cells: Vec<(Option<i64>, String)>) -> Vec<Row> {
        cells.into_iter()
            .enumerate()
            .map(|(i, (age, name))| {
                let row = Row::new().with("idx", i).with("name", name);
                match age {
                    Some(a) => row.with("age", a),
                    None => row,
                }
            })
            .collect()
    }

    fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
        prop::collection::vec((prop::option::of(0i64..100), "[a-cA-C]{0,2}"), 0..40)
            .prop_map(build_rows)
    }

    fn sort_by(key: &str, desc: bool) -> SortState {
        if desc {
            SortState::desc(key)
        } else {
            SortState::asc(key)
        }
    }

    proptest! {
        #[test]
        fn prop_inactive_view_returns_rows_unchanged(data in rows_strategy()) {
            let cols = columns();
            let view = ViewState::new(&cols, &[], 100);
            let derived = derive(&data, &cols, &view, &TableConfig::default());
            prop_assert_eq!(derived.total, data.len());
            prop_assert_eq!(derived.rows, data);
        }

        #[test]
        fn prop_column_filters_commute(data in rows_strategy(), bound in 0i64..100, needle in "[a-c]") {
            let age = FilterEntry::integer(IntOp::Gt, bound.to_string());
            let name = FilterEntry::text(needle);
            let age_first: Vec<&Row> = data
                .iter()
                .filter(|r| filter::matches_filter(r, "age", &age))
                .filter(|r| filter::matches_filter(r, "name", &name))
                .collect();
            let name_first: Vec<&Row> = data
                .iter()
                .filter(|r| filter::matches_filter(r, "name", &name))
                .filter(|r| filter::matches_filter(r, "age", &age))
                .collect();
            prop_assert_eq!(&age_first, &name_first);

            let cols = columns();
            let mut view = ViewState::new(&cols, &[], 100);
            view.set_filter("age", age);
            view.set_filter("name", name);
            let combined = filter::apply(&data, &cols, &view.visibility, "", &view.filters);
            prop_assert_eq!(combined, age_first);
        }

        #[test]
        fn prop_sort_keeps_input_order_of_ties(data in rows_strategy(), desc in any::<bool>()) {
            let out = sort::apply(data.iter().collect(), Some(&sort_by("name", desc)));
            prop_assert_eq!(out.len(), data.len());
            for pair in out.windows(2) {
                if pair[0].text("name") == pair[1].text("name") {
                    prop_assert!(pair[0].number("idx") < pair[1].number("idx"));
                }
            }
        }

        #[test]
        fn prop_missing_values_sort_last(data in rows_strategy(), desc in any::<bool>()) {
            let out = sort::apply(data.iter().collect(), Some(&sort_by("age", desc)));
            let first_missing = out.iter().position(|r| r.get("age").is_none()).unwrap_or(out.len());
            prop_assert!(out[first_missing..].iter().all(|r| r.get("age").is_none()));
        }

        #[test]
        fn prop_pages_cover_every_row_once(len in 0usize..60, page_size in 1usize..15) {
            let items: Vec<usize> = (0..len).collect();
            let pages = paginate::page_count(len, page_size);
            let joined: Vec<usize> = (1..=pages)
                .flat_map(|p| paginate::apply(&items, page_size, p))
                .collect();
            prop_assert_eq!(joined, items.clone());
            prop_assert!(paginate::apply(&items, page_size, pages + 1).is_empty());
        }

        #[test]
        fn prop_sticky_offsets_never_decrease(
            widths in prop::collection::vec(prop::option::of(1.0f64..400.0), 1..10),
            pinned in 0usize..10,
        ) {
            let cols: Vec<ColumnDecl> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let mut col = ColumnDecl::new(format!("c{i}"), format!("C{i}"));
                    if let Some(w) = w {
                        col = col.width_px(*w);
                    }
                    if i < pinned {
                        col = col.sticky();
                    }
                    col
                })
                .collect();
            let displayed: Vec<&ColumnDecl> = cols.iter().collect();
            let count = sticky::sticky_column_count(&displayed);
            prop_assert_eq!(count, pinned.min(cols.len()));

            let lefts: Vec<f64> = sticky::column_geometry(&displayed, count, sticky::STICKY_FALLBACK_WIDTH)
                .iter()
                .filter_map(|g| g.sticky_left)
                .collect();
            prop_assert_eq!(lefts.len(), count);
            for (i, pair) in lefts.windows(2).enumerate() {
                let step = pair[1] - pair[0];
                prop_assert!(step > 0.0);
                prop_assert!((step - sticky::resolved_width(displayed[i], sticky::STICKY_FALLBACK_WIDTH)).abs() < 1e-9);
            }
            if let Some(first) = lefts.first() {
                prop_assert_eq!(*first, 0.0);
            }
        }
    }
}
