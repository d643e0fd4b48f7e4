//! Per-column filter inputs of the filter row.

use crate::shared::components::multi_select_filter::selection::{distinct_values, retain_known};
use crate::shared::components::multi_select_filter::MultiSelectFilter;
use contracts::shared::data_table::{
    ColumnDecl, DateOp, FilterEntry, FilterKind, IntOp, Row, ViewState,
};
use leptos::prelude::*;
use std::collections::BTreeSet;

/// Current text of a search-kind filter
pub fn text_part(entry: Option<&FilterEntry>) -> String {
    match entry {
        Some(FilterEntry::Text { contains }) => contains.clone(),
        _ => String::new(),
    }
}

/// Current selection of a dropdown filter
pub fn dropdown_part(entry: Option<&FilterEntry>) -> BTreeSet<String> {
    match entry {
        Some(FilterEntry::Dropdown { selected }) => selected.clone(),
        _ => BTreeSet::new(),
    }
}

/// Operator and both bounds of a date filter; empty strings when unset
pub fn date_parts(entry: Option<&FilterEntry>) -> (DateOp, String, String) {
    match entry {
        Some(FilterEntry::Date { op, value, value2 }) => {
            (*op, value.clone(), value2.clone().unwrap_or_default())
        }
        _ => (DateOp::default(), String::new(), String::new()),
    }
}

pub fn int_parts(entry: Option<&FilterEntry>) -> (IntOp, String) {
    match entry {
        Some(FilterEntry::Integer { op, value }) => (*op, value.clone()),
        _ => (IntOp::default(), String::new()),
    }
}

/// Entry after the user edited one part of a date filter.
///
/// `value2` is kept only for ranges.
pub fn build_date_entry(op: DateOp, value: String, value2: String) -> FilterEntry {
    FilterEntry::Date {
        op,
        value,
        value2: match op {
            DateOp::Range => Some(value2),
            DateOp::Before | DateOp::After => None,
        },
    }
}

/// Options of a dropdown column: declared ones, or the distinct row values
pub fn dropdown_options(column: &ColumnDecl, rows: &[Row]) -> Vec<String> {
    match &column.options {
        Some(options) => options.clone(),
        None => distinct_values(rows.iter().map(|r| r.text(&column.key))),
    }
}

/// Dropdown entry narrowed to `options`; `None` when nothing had to go
pub fn prune_dropdown(entry: Option<&FilterEntry>, options: &[String]) -> Option<FilterEntry> {
    let selected = dropdown_part(entry);
    let kept = retain_known(&selected, options);
    (kept.len() != selected.len()).then_some(FilterEntry::Dropdown { selected: kept })
}

/// `<th>` of the filter row for one column
#[component]
pub fn ColumnFilterCell(
    column: ColumnDecl,
    state: RwSignal<ViewState>,
    #[prop(into)] rows: Signal<Vec<Row>>,
    #[prop(optional, into)] style: String,
    /// Pinned column: the cell gets the sticky modifier class
    #[prop(optional)] sticky: bool,
    #[prop(default = 4.0)] gap: f64,
) -> impl IntoView {
    let content = if column.filterable {
        let key = StoredValue::new(column.key.clone());
        let entry = move || state.with(|s| s.filters.get(&key.get_value()).cloned());
        let set = move |next: FilterEntry| state.update(|s| s.set_filter(key.get_value(), next));

        match column.effective_filter_kind() {
            FilterKind::Search => view! {
                <input
                    type="text"
                    class="data-table__filter-input"
                    placeholder="Фильтр..."
                    prop:value=move || text_part(entry().as_ref())
                    on:input=move |ev| set(FilterEntry::text(event_target_value(&ev)))
                />
            }
            .into_any(),

            FilterKind::Dropdown => {
                let column_for_options = column.clone();
                let options = Signal::derive(move || {
                    rows.with(|data| dropdown_options(&column_for_options, data))
                });
                let selected = Signal::derive(move || dropdown_part(entry().as_ref()));

                // rows changed: drop selected values the menu no longer offers
                Effect::new(move |_| {
                    let pruned = options.with(|opts| untrack(|| prune_dropdown(entry().as_ref(), opts)));
                    if let Some(next) = pruned {
                        log::debug!("dropdown filter '{}': stale values dropped", key.get_value());
                        set(next);
                    }
                });
                let on_change = Callback::new(move |next: BTreeSet<String>| {
                    set(FilterEntry::Dropdown { selected: next });
                });
                view! {
                    <MultiSelectFilter options=options selected=selected on_change=on_change gap=gap />
                }
                .into_any()
            }

            FilterKind::Date => {
                let parts = move || date_parts(entry().as_ref());
                view! {
                    <div class="data-table__filter-date">
                        <select
                            class="data-table__filter-op"
                            prop:value=move || parts().0.as_str()
                            on:change=move |ev| {
                                let op = DateOp::from_value(&event_target_value(&ev)).unwrap_or_default();
                                let (_, from, to) = parts();
                                set(build_date_entry(op, from, to));
                            }
                        >
                            {[DateOp::Range, DateOp::Before, DateOp::After]
                                .into_iter()
                                .map(|op| view! { <option value=op.as_str()>{op.label()}</option> })
                                .collect_view()}
                        </select>
                        <input
                            type="date"
                            class="data-table__filter-input"
                            prop:value=move || parts().1
                            on:input=move |ev| {
                                let (op, _, to) = parts();
                                set(build_date_entry(op, event_target_value(&ev), to));
                            }
                        />
                        <Show when=move || parts().0 == DateOp::Range>
                            <input
                                type="date"
                                class="data-table__filter-input"
                                prop:value=move || parts().2
                                on:input=move |ev| {
                                    let (op, from, _) = parts();
                                    set(build_date_entry(op, from, event_target_value(&ev)));
                                }
                            />
                        </Show>
                    </div>
                }
                .into_any()
            }

            FilterKind::Integer => {
                let parts = move || int_parts(entry().as_ref());
                view! {
                    <div class="data-table__filter-int">
                        <select
                            class="data-table__filter-op"
                            prop:value=move || parts().0.symbol()
                            on:change=move |ev| {
                                let op = IntOp::from_symbol(&event_target_value(&ev)).unwrap_or_default();
                                set(FilterEntry::integer(op, parts().1));
                            }
                        >
                            {[IntOp::Eq, IntOp::Lt, IntOp::Gt]
                                .into_iter()
                                .map(|op| view! { <option value=op.symbol()>{op.symbol()}</option> })
                                .collect_view()}
                        </select>
                        <input
                            type="number"
                            class="data-table__filter-input"
                            prop:value=move || parts().1
                            on:input=move |ev| set(FilterEntry::integer(parts().0, event_target_value(&ev)))
                        />
                    </div>
                }
                .into_any()
            }
        }
    } else {
        view! { <></> }.into_any()
    };

    view! {
        <th
            class="data-table__filter-cell"
            class:data-table__header-cell--sticky=sticky
            style=style
        >
            {content}
        </th>
    }
}
