//! Geometry of displayed columns: declared width, wrap policy and the
//! `left` offset of pinned columns.
//!
//! Offsets are the sum of the widths of the displayed columns before the
//! pinned one. Percentage and missing widths cannot be known without
//! measuring the DOM, so they count as a fixed fallback width. This only
//! affects the offset, not the rendered width of the column.

use contracts::shared::data_table::{ColumnDecl, ColumnWidth, WrapPolicy};

/// Fallback used when the table configuration does not override it
pub const STICKY_FALLBACK_WIDTH: f64 = 120.0;

/// Rendering descriptor of one displayed column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGeometry {
    pub key: String,
    pub width: Option<ColumnWidth>,
    pub wrap: WrapPolicy,
    /// `left` in px when the column is pinned
    pub sticky_left: Option<f64>,
}

impl ColumnGeometry {
    pub fn is_sticky(&self) -> bool {
        self.sticky_left.is_some()
    }

    /// Inline style shared by the header and body cells of the column
    pub fn cell_style(&self) -> String {
        let mut style = String::new();
        if let Some(width) = &self.width {
            let css = width.to_css();
            style.push_str(&format!("width: {css}; min-width: {css};"));
        }
        style.push_str(self.wrap.to_css());
        if let Some(left) = self.sticky_left {
            style.push_str(&format!(
                "position: sticky; left: {left}px; z-index: 2; background: var(--color-background, #fff);"
            ));
        }
        style
    }
}

/// Width counted for offset purposes
pub fn resolved_width(column: &ColumnDecl, fallback: f64) -> f64 {
    match column.width {
        Some(ColumnWidth::Px(px)) => px,
        Some(ColumnWidth::Percent(_)) | None => fallback,
    }
}

/// `left` of the displayed column at `index`
pub fn left_offset(displayed: &[&ColumnDecl], index: usize, fallback: f64) -> f64 {
    displayed
        .iter()
        .take(index)
        .map(|c| resolved_width(c, fallback))
        .sum()
}

/// Number of leading displayed columns flagged sticky
pub fn sticky_column_count(displayed: &[&ColumnDecl]) -> usize {
    displayed.iter().take_while(|c| c.sticky).count()
}

/// Geometry for every displayed column; only the first `sticky_count` get an offset.
pub fn column_geometry(
    displayed: &[&ColumnDecl],
    sticky_count: usize,
    fallback: f64,
) -> Vec<ColumnGeometry> {
    displayed
        .iter()
        .enumerate()
        .map(|(idx, col)| ColumnGeometry {
            key: col.key.clone(),
            width: col.width,
            wrap: col.wrap,
            sticky_left: (idx < sticky_count).then(|| left_offset(displayed, idx, fallback)),
        })
        .collect()
}
