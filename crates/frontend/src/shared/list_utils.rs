/// Утилиты для таблиц: подсветка поиска, индикатор сортировки
use contracts::shared::data_table::SortState;
use leptos::prelude::*;

/// Byte ranges of case-insensitive occurrences of `needle` in `text`.
///
/// Ranges always fall on char boundaries of `text`, even when lower-casing
/// changes the length of a character.
pub fn match_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = needle.trim().to_lowercase().chars().collect();
    if needle.is_empty() {
        return Vec::new();
    }

    // lowered chars with the byte offset of the original char they came from
    let lowered: Vec<(usize, char)> = text
        .char_indices()
        .flat_map(|(idx, ch)| ch.to_lowercase().map(move |lc| (idx, lc)))
        .collect();

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= lowered.len() {
        let window = &lowered[i..i + needle.len()];
        if window.iter().map(|(_, c)| *c).eq(needle.iter().copied()) {
            let start = window[0].0;
            let mut end = lowered
                .get(i + needle.len())
                .map_or(text.len(), |(idx, _)| *idx);
            if end <= start {
                end = start + text[start..].chars().next().map_or(0, char::len_utf8);
            }
            ranges.push((start, end));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str, min_len: usize) -> AnyView {
    if filter.trim().chars().count() < min_len.max(1) {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;
    for (start, end) in ranges {
        if start > last_pos {
            parts.push(view! { <span>{text[last_pos..start].to_string()}</span> }.into_any());
        }
        parts.push(
            view! { <mark class="data-table__match">{text[start..end].to_string()}</mark> }
                .into_any(),
        );
        last_pos = end;
    }
    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(sort: Option<&SortState>, key: &str) -> &'static str {
    match sort {
        Some(s) if s.key == key => s.direction.indicator(),
        _ => " ⇅",
    }
}

/// CSS класс индикатора сортировки
pub fn get_sort_class(sort: Option<&SortState>, key: &str) -> &'static str {
    match sort {
        Some(s) if s.key == key => "sort-icon active",
        _ => "sort-icon",
    }
}
