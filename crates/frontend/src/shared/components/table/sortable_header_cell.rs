//! Компонент сортируемой ячейки заголовка таблицы
//!
//! # Пример
//!
//! ```rust,ignore
//! <SortableHeaderCell
//!     label="Возраст"
//!     sort_key="age"
//!     current_sort=Signal::derive(move || state.with(|s| s.sort.clone()))
//!     style="position: sticky; left: 0px;".to_string()
//!     sticky=true
//!     on_sort=Callback::new(move |key: String| state.update(|s| s.toggle_sort(&key)))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use contracts::shared::data_table::SortState;
use leptos::prelude::*;

/// Ячейка заголовка: текст + индикатор сортировки (▲▼⇅).
/// Клик переключает сортировку asc → desc → без сортировки.
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Ключ колонки
    #[prop(into)]
    sort_key: String,

    /// Текущая сортировка из state
    #[prop(into)]
    current_sort: Signal<Option<SortState>>,

    /// Inline style ячейки (ширина, перенос, sticky)
    #[prop(optional, into)]
    style: String,

    /// Закреплённая колонка
    #[prop(optional)]
    sticky: bool,

    /// Callback при клике на заголовок
    on_sort: Callback<String>,
) -> impl IntoView {
    let key_for_click = sort_key.clone();
    let key_for_indicator = sort_key.clone();
    let key_for_class = sort_key;

    view! {
        <th
            class="data-table__header-cell"
            class:data-table__header-cell--sticky=sticky
            style=style
        >
            <div
                class="table__sortable-header"
                on:click=move |_| on_sort.run(key_for_click.clone())
            >
                {label}
                <span class=move || current_sort.with(|s| get_sort_class(s.as_ref(), &key_for_class))>
                    {move || current_sort.with(|s| get_sort_indicator(s.as_ref(), &key_for_indicator))}
                </span>
            </div>
        </th>
    }
}
