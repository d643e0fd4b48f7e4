use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Operator of a date filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOp {
    /// value <= date <= value2
    #[default]
    Range,
    /// date < value
    Before,
    /// date > value
    After,
}

impl DateOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateOp::Range => "range",
            DateOp::Before => "before",
            DateOp::After => "after",
        }
    }

    pub fn from_value(s: &str) -> Option<Self> {
        match s {
            "range" => Some(DateOp::Range),
            "before" => Some(DateOp::Before),
            "after" => Some(DateOp::After),
            _ => None,
        }
    }

    /// Display label for UI
    pub fn label(&self) -> &'static str {
        match self {
            DateOp::Range => "период",
            DateOp::Before => "до",
            DateOp::After => "после",
        }
    }
}

/// Operator of an integer filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IntOp {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">")]
    Gt,
}

impl IntOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            IntOp::Eq => "=",
            IntOp::Lt => "<",
            IntOp::Gt => ">",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "=" => Some(IntOp::Eq),
            "<" => Some(IntOp::Lt),
            ">" => Some(IntOp::Gt),
            _ => None,
        }
    }

    /// `field <op> value`
    pub fn test(&self, field: f64, value: f64) -> bool {
        match self {
            IntOp::Eq => field == value,
            IntOp::Lt => field < value,
            IntOp::Gt => field > value,
        }
    }
}

/// Active filter configuration of one column, tagged by filter kind.
///
/// Values are kept exactly as typed by the user; they are parsed when the
/// filter is evaluated. An entry whose value is empty filters nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterEntry {
    /// Case-insensitive substring
    Text { contains: String },
    /// Multi-select: field must be one of `selected`
    Dropdown { selected: BTreeSet<String> },
    Date {
        op: DateOp,
        #[serde(default)]
        value: String,
        /// Upper bound, used by [`DateOp::Range`] only
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value2: Option<String>,
    },
    Integer {
        op: IntOp,
        #[serde(default)]
        value: String,
    },
}

impl FilterEntry {
    pub fn text(contains: impl Into<String>) -> Self {
        FilterEntry::Text {
            contains: contains.into(),
        }
    }

    pub fn dropdown<I, S>(selected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FilterEntry::Dropdown {
            selected: selected.into_iter().map(Into::into).collect(),
        }
    }

    pub fn date_range(from: impl Into<String>, to: impl Into<String>) -> Self {
        FilterEntry::Date {
            op: DateOp::Range,
            value: from.into(),
            value2: Some(to.into()),
        }
    }

    pub fn date(op: DateOp, value: impl Into<String>) -> Self {
        FilterEntry::Date {
            op,
            value: value.into(),
            value2: None,
        }
    }

    pub fn integer(op: IntOp, value: impl Into<String>) -> Self {
        FilterEntry::Integer {
            op,
            value: value.into(),
        }
    }

    /// Whether the entry has every value its operator needs.
    ///
    /// Says nothing about whether those values parse; malformed input is
    /// handled at evaluation time.
    pub fn is_active(&self) -> bool {
        match self {
            FilterEntry::Text { contains } => !contains.trim().is_empty(),
            FilterEntry::Dropdown { selected } => !selected.is_empty(),
            FilterEntry::Date { op, value, value2 } => {
                let has_from = !value.trim().is_empty();
                match op {
                    DateOp::Range => {
                        has_from && value2.as_deref().is_some_and(|v| !v.trim().is_empty())
                    }
                    DateOp::Before | DateOp::After => has_from,
                }
            }
            FilterEntry::Integer { value, .. } => !value.trim().is_empty(),
        }
    }

    /// Short human-readable label for filter chips
    pub fn display_text(&self, header: &str) -> String {
        match self {
            FilterEntry::Text { contains } => format!("{} содержит \"{}\"", header, contains.trim()),
            FilterEntry::Dropdown { selected } => {
                let values: Vec<&str> = selected.iter().map(String::as_str).collect();
                if values.len() <= 3 {
                    format!("{}: {}", header, values.join(", "))
                } else {
                    format!("{}: {} значений", header, values.len())
                }
            }
            FilterEntry::Date { op, value, value2 } => match op {
                DateOp::Range => format!(
                    "{}: {} — {}",
                    header,
                    value,
                    value2.as_deref().unwrap_or("")
                ),
                DateOp::Before => format!("{} до {}", header, value),
                DateOp::After => format!("{} после {}", header, value),
            },
            FilterEntry::Integer { op, value } => {
                format!("{} {} {}", header, op.symbol(), value.trim())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterInputError {
    #[error("'{0}' is not a date")]
    InvalidDate(String),
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
}

/// Parses a date typed into a filter or stored in a row.
///
/// Accepts `YYYY-MM-DD`, an ISO datetime (the date part is used) and `DD.MM.YYYY`.
pub fn parse_date_input(input: &str) -> Result<NaiveDate, FilterInputError> {
    let trimmed = input.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%d.%m.%Y"))
        .map_err(|_| FilterInputError::InvalidDate(input.to_string()))
}

/// Parses the number typed into an integer filter.
pub fn parse_integer_input(input: &str) -> Result<f64, FilterInputError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| FilterInputError::InvalidNumber(input.to_string()))
}
