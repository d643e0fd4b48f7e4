use super::column::ColumnDecl;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Set of shown columns.
///
/// Always a subset of the declared keys; iteration follows declaration
/// order, never the order in which columns were toggled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredVisibility")]
pub struct ColumnVisibility {
    declared: Vec<String>,
    visible: BTreeSet<String>,
}

/// Wire shape; undeclared visible keys are dropped on the way in
#[derive(Deserialize)]
struct StoredVisibility {
    declared: Vec<String>,
    #[serde(default)]
    visible: BTreeSet<String>,
}

impl From<StoredVisibility> for ColumnVisibility {
    fn from(stored: StoredVisibility) -> Self {
        let visible = stored
            .visible
            .into_iter()
            .filter(|k| stored.declared.contains(k))
            .collect();
        Self {
            declared: stored.declared,
            visible,
        }
    }
}

impl ColumnVisibility {
    /// All declared columns except `default_hidden`
    pub fn new(columns: &[ColumnDecl], default_hidden: &[&str]) -> Self {
        let declared: Vec<String> = columns.iter().map(|c| c.key.clone()).collect();
        let visible = declared
            .iter()
            .filter(|k| !default_hidden.contains(&k.as_str()))
            .cloned()
            .collect();
        Self { declared, visible }
    }

    /// Flips membership of `key`; unknown keys are ignored
    pub fn toggle(&mut self, key: &str) {
        if !self.declared.iter().any(|k| k == key) {
            return;
        }
        if !self.visible.remove(key) {
            self.visible.insert(key.to_string());
        }
    }

    pub fn select_all(&mut self) {
        self.visible = self.declared.iter().cloned().collect();
    }

    pub fn select_none(&mut self) {
        self.visible.clear();
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.contains(key)
    }

    pub fn is_all_visible(&self) -> bool {
        self.visible.len() == self.declared.len()
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Visible keys in declaration order
    pub fn keys(&self) -> Vec<&str> {
        self.declared
            .iter()
            .filter(|k| self.visible.contains(k.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Visible declarations in declaration order
    pub fn visible_columns<'a>(&self, columns: &'a [ColumnDecl]) -> Vec<&'a ColumnDecl> {
        columns
            .iter()
            .filter(|c| self.visible.contains(&c.key))
            .collect()
    }
}
