use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Declared column width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnWidth {
    /// Fixed width in pixels
    Px(f64),
    /// Width relative to the table (0..=100)
    Percent(f64),
}

impl ColumnWidth {
    /// CSS length, e.g. "120px" or "15%"
    pub fn to_css(&self) -> String {
        match self {
            ColumnWidth::Px(px) => format!("{}px", px),
            ColumnWidth::Percent(pct) => format!("{}%", pct),
        }
    }
}

/// How cell text wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapPolicy {
    #[default]
    Normal,
    NoWrap,
    BreakWord,
}

impl WrapPolicy {
    /// CSS declarations applied to header and body cells
    pub fn to_css(&self) -> &'static str {
        match self {
            WrapPolicy::Normal => "white-space: normal;",
            WrapPolicy::NoWrap => "white-space: nowrap;",
            WrapPolicy::BreakWord => "white-space: normal; overflow-wrap: break-word; word-break: break-word;",
        }
    }
}

/// Kind of value stored in the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    #[default]
    String,
    Date,
    Integer,
    /// Pre-rendered HTML, shown as-is
    Markup,
}

/// Filter input rendered in the filter row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Search,
    Dropdown,
    Date,
    Integer,
}

/// Static description of one column of the table.
///
/// The key addresses a field of [`super::Row`]; declaration order is the
/// default display order and the order used for sticky offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDecl {
    pub key: String,
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<ColumnWidth>,
    #[serde(default)]
    pub wrap: WrapPolicy,
    #[serde(default)]
    pub kind: ValueKind,
    #[serde(default)]
    pub filterable: bool,
    /// Explicit filter input; overrides the one derived from `kind`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_type: Option<FilterKind>,
    /// Fixed option list for dropdown filters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default)]
    pub sticky: bool,
}

impl ColumnDecl {
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            width: None,
            wrap: WrapPolicy::Normal,
            kind: ValueKind::String,
            filterable: false,
            filter_type: None,
            options: None,
            sticky: false,
        }
    }

    pub fn width_px(mut self, px: f64) -> Self {
        self.width = Some(ColumnWidth::Px(px));
        self
    }

    pub fn width_percent(mut self, pct: f64) -> Self {
        self.width = Some(ColumnWidth::Percent(pct));
        self
    }

    pub fn wrap(mut self, wrap: WrapPolicy) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn filter_type(mut self, filter_type: FilterKind) -> Self {
        self.filterable = true;
        self.filter_type = Some(filter_type);
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn sticky(mut self) -> Self {
        self.sticky = true;
        self
    }

    /// Filter input for this column: explicit `filter_type` first,
    /// then derived from the value kind.
    pub fn effective_filter_kind(&self) -> FilterKind {
        if let Some(kind) = self.filter_type {
            return kind;
        }
        match self.kind {
            ValueKind::Date => FilterKind::Date,
            ValueKind::Integer => FilterKind::Integer,
            ValueKind::String | ValueKind::Markup => FilterKind::Search,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColumnError {
    #[error("column #{0} has an empty key")]
    EmptyKey(usize),
    #[error("duplicate column key '{0}'")]
    DuplicateKey(String),
}

/// Checks that every column has a non-empty key and that keys are unique.
pub fn validate_columns(columns: &[ColumnDecl]) -> Result<(), ColumnError> {
    let mut seen = HashSet::with_capacity(columns.len());
    for (idx, col) in columns.iter().enumerate() {
        if col.key.is_empty() {
            return Err(ColumnError::EmptyKey(idx));
        }
        if !seen.insert(col.key.as_str()) {
            return Err(ColumnError::DuplicateKey(col.key.clone()));
        }
    }
    Ok(())
}
