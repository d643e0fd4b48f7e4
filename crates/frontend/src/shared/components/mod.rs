pub mod data_table;
pub mod multi_select_filter;
pub mod pagination_controls;
pub mod table;
