use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Asc => " ▲",
            SortDirection::Desc => " ▼",
        }
    }
}

/// The single active sort of the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Next sort after a click on the header of `key`:
    /// another column → asc, asc → desc, desc → no sort.
    pub fn cycle(current: Option<&SortState>, key: &str) -> Option<SortState> {
        match current {
            Some(s) if s.key == key => match s.direction {
                SortDirection::Asc => Some(SortState::desc(key)),
                SortDirection::Desc => None,
            },
            _ => Some(SortState::asc(key)),
        }
    }
}
