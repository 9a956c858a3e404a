use indexmap::IndexMap;
use thiserror::Error;

use crate::config::ColumnSelectConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColumnSelectError {
    #[error("selected option {index} does not exist, there are {count} options")]
    UnknownOption { index: usize, count: usize },
}

/// State of the multi-select used to append columns to the formula.
#[derive(Debug, Clone, Default)]
pub struct ColumnSelect {
    /// value to label
    options: IndexMap<String, String>,
    /// option indices, kept sorted
    selected: Vec<usize>,
}

impl ColumnSelect {
    pub fn new(config: &ColumnSelectConfig) -> Self {
        Self {
            options: config.options.clone(),
            selected: vec![],
        }
    }

    pub fn options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options
            .iter()
            .map(|(value, label)| (value.as_str(), label.as_str()))
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.binary_search(&index).is_ok()
    }

    pub fn toggle(&mut self, index: usize) {
        match self.selected.binary_search(&index) {
            Ok(position) => {
                self.selected.remove(position);
            }
            Err(position) => self.selected.insert(position, index),
        }
    }

    pub fn set_selection(&mut self, mut indices: Vec<usize>) {
        indices.sort_unstable();
        indices.dedup();
        self.selected = indices;
    }

    /// Values of the selected options, in option order.
    pub fn selected_values(&self) -> Result<Vec<&str>, ColumnSelectError> {
        self.selected
            .iter()
            .map(|&index| {
                self.options
                    .get_index(index)
                    .map(|(value, _label)| value.as_str())
                    .ok_or(ColumnSelectError::UnknownOption {
                        index,
                        count: self.options.len(),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select() -> ColumnSelect {
        ColumnSelect::new(&ColumnSelectConfig::from_values(["a", "b", "c"]))
    }

    #[test]
    fn selected_values_follow_option_order() {
        let mut select = select();
        select.toggle(2);
        select.toggle(0);

        assert_eq!(select.selected_values(), Ok(vec!["a", "c"]));
    }

    #[test]
    fn toggling_twice_deselects() {
        let mut select = select();
        select.toggle(1);
        select.toggle(1);

        assert!(!select.is_selected(1));
        assert_eq!(select.selected_values(), Ok(vec![]));
    }

    #[test]
    fn unknown_index_is_an_error() {
        let mut select = select();
        select.set_selection(vec![1, 5, 1]);

        assert_eq!(
            select.selected_values(),
            Err(ColumnSelectError::UnknownOption { index: 5, count: 3 })
        );
    }
}
