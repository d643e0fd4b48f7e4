use contracts::shared::data_table::{ColumnDecl, TableConfig, ViewState};
use leptos::prelude::*;

/// View state of one table instance; the component is its only writer.
pub fn create_state(
    columns: &[ColumnDecl],
    default_hidden: &[&str],
    config: &TableConfig,
) -> RwSignal<ViewState> {
    RwSignal::new(ViewState::new(
        columns,
        default_hidden,
        config.default_page_size,
    ))
}
