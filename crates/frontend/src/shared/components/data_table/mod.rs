pub mod filter_cell;
pub mod widget;

pub use widget::DataTable;
