//! Snapshot of the data-row ids attached to a project.

use std::collections::HashSet;

/// Read-only set of valid data-row ids for one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataRowSet {
    ids: HashSet<String>,
}

impl DataRowSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, data_row_id: &str) -> bool {
        self.ids.contains(data_row_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for DataRowSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter
                .into_iter()
                .map(Into::into)
                .filter(|id: &String| !id.trim().is_empty())
                .collect(),
        }
    }
}
