use super::column::ColumnDecl;
use super::filter::FilterEntry;
use super::sort::SortState;
use super::visibility::ColumnVisibility;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User-controlled display parameters of one table.
///
/// Owned by the presentation layer; the pipeline only reads it. Mutators
/// that change the result set send the user back to the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub visibility: ColumnVisibility,
    pub search: String,
    /// Filter entry per column key
    pub filters: BTreeMap<String, FilterEntry>,
    pub sort: Option<SortState>,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl ViewState {
    pub fn new(columns: &[ColumnDecl], default_hidden: &[&str], page_size: usize) -> Self {
        Self {
            visibility: ColumnVisibility::new(columns, default_hidden),
            search: String::new(),
            filters: BTreeMap::new(),
            sort: None,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_filter(&mut self, key: impl Into<String>, entry: FilterEntry) {
        self.filters.insert(key.into(), entry);
        self.page = 1;
    }

    pub fn clear_filter(&mut self, key: &str) {
        if self.filters.remove(key).is_some() {
            self.page = 1;
        }
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.search.clear();
        self.page = 1;
    }

    /// Header click on `key`, see [`SortState::cycle`]
    pub fn toggle_sort(&mut self, key: &str) {
        self.sort = SortState::cycle(self.sort.as_ref(), key);
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Changing the page size always returns to page 1
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Search plus column filters that currently have a value
    pub fn active_filter_count(&self) -> usize {
        let search = usize::from(!self.search.trim().is_empty());
        search + self.filters.values().filter(|f| f.is_active()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data_table::filter::IntOp;
    use crate::shared::data_table::sort::SortDirection;

    fn state() -> ViewState {
        let columns = vec![ColumnDecl::new("name", "Имя"), ColumnDecl::new("age", "Возраст")];
        ViewState::new(&columns, &[], 10)
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut st = state();
        st.set_page(4);
        st.set_page_size(25);
        assert_eq!(st.page, 1);
        assert_eq!(st.page_size, 25);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let mut st = state();
        st.set_page_size(0);
        assert_eq!(st.page_size, 1);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut st = state();
        st.set_page(3);
        st.set_filter("age", FilterEntry::integer(IntOp::Gt, "30"));
        assert_eq!(st.page, 1);

        st.set_page(2);
        st.set_search("ann");
        assert_eq!(st.page, 1);
    }

    #[test]
    fn test_active_filter_count() {
        let mut st = state();
        assert_eq!(st.active_filter_count(), 0);
        st.set_search("ann");
        st.set_filter("age", FilterEntry::integer(IntOp::Gt, "30"));
        st.set_filter("name", FilterEntry::text(""));
        assert_eq!(st.active_filter_count(), 2);
        st.clear_filters();
        assert_eq!(st.active_filter_count(), 0);
    }

    #[test]
    fn test_toggle_sort() {
        let mut st = state();
        st.toggle_sort("age");
        assert_eq!(st.sort.as_ref().map(|s| s.direction), Some(SortDirection::Asc));
        st.toggle_sort("age");
        assert_eq!(st.sort.as_ref().map(|s| s.direction), Some(SortDirection::Desc));
        st.toggle_sort("age");
        assert!(st.sort.is_none());
    }
}
