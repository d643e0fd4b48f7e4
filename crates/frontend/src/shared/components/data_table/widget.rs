//! DataTable - таблица с поиском, фильтрами по колонкам, сортировкой,
//! пагинацией, выбором видимых колонок и закреплёнными колонками.
//!
//! Состояние (`ViewState`) живёт в `RwSignal`, который пишет только этот
//! компонент. Строки страницы (`derive_rows`) и геометрия колонок
//! (`column_layout`) пересчитываются из него отдельными мемо.

use super::filter_cell::ColumnFilterCell;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::data_table::state::create_state;
use crate::shared::data_table::cell::{column_by_key, format_cell};
use crate::shared::data_table::{column_layout, derive_rows, ColumnGeometry};
use crate::shared::icons::icon;
use crate::shared::list_utils::highlight_matches;
use contracts::shared::data_table::{validate_columns, ColumnDecl, Row, TableConfig, ValueKind};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn DataTable(
    /// Объявления колонок в порядке отображения
    columns: Vec<ColumnDecl>,

    /// Исходные строки
    #[prop(into)]
    rows: Signal<Vec<Row>>,

    /// Ключи колонок, скрытых по умолчанию
    #[prop(optional)]
    default_hidden: Vec<String>,

    /// Настройки таблицы (размер страницы, отступы); по умолчанию встроенные
    #[prop(optional)]
    config: Option<TableConfig>,

    /// id элемента `<table>`
    #[prop(optional, into)]
    table_id: String,
) -> impl IntoView {
    if let Err(e) = validate_columns(&columns) {
        log::error!("data table '{}': {}", table_id, e);
    }

    let config = config.unwrap_or_default();
    let hidden: Vec<&str> = default_hidden.iter().map(String::as_str).collect();
    let state = create_state(&columns, &hidden, &config);
    let columns = StoredValue::new(columns);
    let fallback_width = config.sticky_fallback_width;
    let highlight_min_len = config.search_highlight_min_len;
    let popover_gap = config.popover_gap;
    let page_size_options = config.page_size_options.clone();

    // Header and filter rows depend on visibility only, so typing into a
    // filter input does not rebuild them.
    let visibility = Memo::new(move |_| state.with(|s| s.visibility.clone()));
    let geometry: Memo<Vec<ColumnGeometry>> = Memo::new(move |_| {
        visibility.with(|v| columns.with_value(|cols| column_layout(cols, v, fallback_width)))
    });

    let derived = Memo::new(move |_| {
        rows.with(|data| state.with(|s| columns.with_value(|cols| derive_rows(data, cols, s))))
    });

    // page past the end after rows shrank or filters changed
    Effect::new(move |_| {
        let page_count = derived.with(|d| d.page_count);
        let page = state.with_untracked(|s| s.page);
        if page > page_count || page == 0 {
            log::debug!("data table: page {} clamped to {}", page, page_count);
            state.update(|s| s.set_page(page.clamp(1, page_count)));
        }
    });

    let search_query = RwSignal::new(String::new());
    Effect::new(move || {
        let v = search_query.get();
        untrack(move || {
            if state.with(|s| s.search != v) {
                state.update(|s| s.set_search(v));
            }
        });
    });

    let show_column_picker = RwSignal::new(false);
    let active_filters_count = Signal::derive(move || state.with(|s| s.active_filter_count()));

    let clear_filters = move |_| {
        search_query.set(String::new());
        state.update(|s| s.clear_filters());
    };

    let on_sort = Callback::new(move |key: String| state.update(|s| s.toggle_sort(&key)));

    let filter_chips = move || {
        state.with(|s| {
            columns.with_value(|cols| {
                s.filters
                    .iter()
                    .filter(|(_, entry)| entry.is_active())
                    .filter_map(|(key, entry)| {
                        column_by_key(cols, key)
                            .map(|col| (key.clone(), entry.display_text(&col.header)))
                    })
                    .collect::<Vec<_>>()
            })
        })
    };

    view! {
        <div class="data-table">
            <div class="data-table__toolbar">
                <Flex gap=FlexGap::Small align=FlexAlign::Center>
                    <div class="data-table__search">
                        {icon("search")}
                        <Input value=search_query placeholder="Поиск..." />
                    </div>

                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| show_column_picker.update(|v| *v = !*v)
                    >
                        {icon("columns")}
                        {move || {
                            visibility.with(|v| format!(" Колонки ({}/{})", v.visible_count(), v.keys().len()))
                        }}
                    </Button>

                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=clear_filters
                        disabled=Signal::derive(move || active_filters_count.get() == 0)
                    >
                        {icon("x")}
                        " Сбросить фильтры"
                    </Button>

                    {move || {
                        let count = active_filters_count.get();
                        if count > 0 {
                            view! {
                                <span class="badge badge--primary">{icon("filter")}{count}</span>
                            }.into_any()
                        } else {
                            view! { <></> }.into_any()
                        }
                    }}
                </Flex>

                <div class="data-table__chips">
                    <For
                        each=filter_chips
                        key=|(key, text)| (key.clone(), text.clone())
                        children=move |(key, text)| {
                            view! {
                                <span class="filter-tag">
                                    {text}
                                    <span
                                        class="filter-tag__remove"
                                        on:click=move |_| state.update(|s| s.clear_filter(&key))
                                    >
                                        {icon("x")}
                                    </span>
                                </span>
                            }
                        }
                    />
                </div>

                <Show when=move || show_column_picker.get()>
                    <div class="data-table__column-picker">
                        <Flex gap=FlexGap::Small>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| state.update(|s| s.visibility.select_all())
                            >
                                "Все"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| state.update(|s| s.visibility.select_none())
                            >
                                "Ничего"
                            </Button>
                        </Flex>
                        {columns.with_value(|cols| {
                            cols.iter()
                                .map(|col| {
                                    let key_checked = col.key.clone();
                                    let key_toggle = col.key.clone();
                                    view! {
                                        <label class="data-table__column-option">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || visibility.with(|v| v.is_visible(&key_checked))
                                                on:change=move |_| state.update(|s| s.visibility.toggle(&key_toggle))
                                            />
                                            {col.header.clone()}
                                        </label>
                                    }
                                })
                                .collect_view()
                        })}
                    </div>
                </Show>
            </div>

            <div class="data-table__scroll">
                <table id=table_id class="data-table__table">
                    <thead>
                        <tr>
                            <For
                                each=move || geometry.get()
                                key=|g| (g.key.clone(), g.cell_style())
                                children=move |g: ColumnGeometry| {
                                    let label = columns
                                        .with_value(|cols| column_by_key(cols, &g.key).map(|c| c.header.clone()))
                                        .unwrap_or_default();
                                    view! {
                                        <SortableHeaderCell
                                            label=label
                                            sort_key=g.key.clone()
                                            current_sort=Signal::derive(move || state.with(|s| s.sort.clone()))
                                            style=g.cell_style()
                                            sticky=g.is_sticky()
                                            on_sort=on_sort
                                        />
                                    }
                                }
                            />
                        </tr>
                        <tr class="data-table__filter-row">
                            <For
                                each=move || geometry.get()
                                key=|g| (g.key.clone(), g.cell_style())
                                children=move |g: ColumnGeometry| {
                                    match columns.with_value(|cols| column_by_key(cols, &g.key).cloned()) {
                                        Some(col) => view! {
                                            <ColumnFilterCell
                                                column=col
                                                state=state
                                                rows=rows
                                                style=g.cell_style()
                                                sticky=g.is_sticky()
                                                gap=popover_gap
                                            />
                                        }.into_any(),
                                        None => view! { <th></th> }.into_any(),
                                    }
                                }
                            />
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let search = state.with(|s| s.search.clone());
                            let layout = geometry.get();
                            derived.with(|d| {
                                if d.rows.is_empty() {
                                    let span = layout.len().max(1);
                                    return view! {
                                        <tr>
                                            <td class="data-table__empty" colspan=span>"Нет данных"</td>
                                        </tr>
                                    }.into_any();
                                }
                                columns.with_value(|cols| {
                                    d.rows
                                        .iter()
                                        .map(|row| {
                                            let cells = layout
                                                .iter()
                                                .map(|g| render_cell(row, g, cols, &search, highlight_min_len))
                                                .collect_view();
                                            view! { <tr class="data-table__row">{cells}</tr> }
                                        })
                                        .collect_view()
                                        .into_any()
                                })
                            })
                        }}
                    </tbody>
                </table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || state.with(|s| s.page))
                total_pages=Signal::derive(move || derived.with(|d| d.page_count))
                total_count=Signal::derive(move || derived.with(|d| d.total))
                page_size=Signal::derive(move || state.with(|s| s.page_size))
                on_page_change=Callback::new(move |page: usize| state.update(|s| s.set_page(page)))
                on_page_size_change=Callback::new(move |size: usize| state.update(|s| s.set_page_size(size)))
                page_size_options=page_size_options
            />
        </div>
    }
}

fn render_cell(
    row: &Row,
    geometry: &ColumnGeometry,
    columns: &[ColumnDecl],
    search: &str,
    highlight_min_len: usize,
) -> AnyView {
    let style = geometry.cell_style();
    let is_sticky = geometry.is_sticky();
    let Some(column) = column_by_key(columns, &geometry.key) else {
        return view! { <td style=style></td> }.into_any();
    };
    let text = format_cell(row, column);

    match column.kind {
        // trusted markup supplied by the caller
        ValueKind::Markup => view! {
            <td
                class="data-table__cell"
                class:data-table__cell--sticky=is_sticky
                style=style
                inner_html=text
            ></td>
        }
        .into_any(),
        ValueKind::String | ValueKind::Date | ValueKind::Integer => view! {
            <td class="data-table__cell" class:data-table__cell--sticky=is_sticky style=style>
                {highlight_matches(&text, search, highlight_min_len)}
            </td>
        }
        .into_any(),
    }
}
