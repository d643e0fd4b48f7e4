//! Shared model of the tabular data view: column declarations, rows,
//! per-column filter entries, sort state, view state and table configuration.
//!
//! Everything here is plain data (serde-serializable); the transformation
//! pipeline that consumes it lives in the frontend crate.

pub mod column;
pub mod config;
pub mod filter;
pub mod row;
pub mod sort;
pub mod view_state;
pub mod visibility;

pub use column::{validate_columns, ColumnDecl, ColumnError, ColumnWidth, FilterKind, ValueKind, WrapPolicy};
pub use config::{load_config, TableConfig};
pub use filter::{parse_date_input, parse_integer_input, DateOp, FilterEntry, FilterInputError, IntOp};
pub use row::Row;
pub use sort::{SortDirection, SortState};
pub use view_state::ViewState;
pub use visibility::ColumnVisibility;
