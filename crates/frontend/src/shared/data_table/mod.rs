//! Data transformation pipeline of the table:
//! filter → sort → paginate, plus sticky-column geometry.
//!
//! All stages are pure functions of (rows, columns, view state).

pub mod cell;
pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod sort;
pub mod state;
pub mod sticky;

pub use pipeline::{column_layout, derive, derive_rows, DerivedView, RowPage};
pub use sticky::ColumnGeometry;
