use indexmap::IndexMap;
use thiserror::Error;

use crate::preview::{FormulaValidator, SharedValidator};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tokens bound by [`FormulaEditorConfig::with_standard_buttons`], label and token are the same.
pub const STANDARD_TOKENS: [&str; 7] = ["+", "-", "*", "/", "(", ")", "sqrt("];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no formula field configured")]
    MissingFormulaField,
}

/// Everything the host application provides to mount a formula editor.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormulaEditorConfig {
    pub field: Option<FormulaField>,

    /// calculator buttons, label to inserted token, in display order
    pub buttons: IndexMap<String, String>,

    pub column_select: Option<ColumnSelectConfig>,

    /// produces the preview, the pending-backend validator when absent
    #[cfg_attr(feature = "serde", serde(skip))]
    pub validator: Option<SharedValidator>,
}

/// The formula text field and the vocabulary attached to it.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormulaField {
    /// comma separated column names
    pub columns: Option<String>,
    /// comma separated function names
    pub functions: Option<String>,

    pub initial_text: String,
}

impl FormulaField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = Some(columns.into());
        self
    }

    pub fn functions(mut self, functions: impl Into<String>) -> Self {
        self.functions = Some(functions.into());
        self
    }

    pub fn initial_text(mut self, text: impl Into<String>) -> Self {
        self.initial_text = text.into();
        self
    }
}

/// A multi-select listing column names that can be appended to the formula in bulk.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnSelectConfig {
    /// option value to displayed label
    pub options: IndexMap<String, String>,
}

impl ColumnSelectConfig {
    /// Options whose label is the value itself.
    pub fn from_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = values
            .into_iter()
            .map(|value| {
                let value = value.into();
                (value.clone(), value)
            })
            .collect();

        Self { options }
    }
}

impl FormulaEditorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: FormulaField) -> Self {
        self.field = Some(field);
        self
    }

    /// Bind a calculator button, binding a label again replaces its token.
    pub fn with_button(mut self, label: impl Into<String>, token: impl Into<String>) -> Self {
        self.buttons.insert(label.into(), token.into());
        self
    }

    /// Bind the arithmetic operators, parentheses and `sqrt(`.
    pub fn with_standard_buttons(self) -> Self {
        STANDARD_TOKENS
            .iter()
            .fold(self, |config, token| config.with_button(*token, *token))
    }

    pub fn with_column_select(mut self, column_select: ColumnSelectConfig) -> Self {
        self.column_select = Some(column_select);
        self
    }

    pub fn with_validator(mut self, validator: impl FormulaValidator + 'static) -> Self {
        self.validator = Some(SharedValidator::new(validator));
        self
    }

    pub(crate) fn validate(&self) -> Result<&FormulaField, ConfigError> {
        self.field.as_ref().ok_or(ConfigError::MissingFormulaField)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::PendingBackendValidator;

    #[test]
    fn rebinding_a_button_replaces_it() {
        let config = FormulaEditorConfig::new()
            .with_button("plus", "+")
            .with_button("minus", "-")
            .with_button("plus", " + ");

        assert_eq!(config.buttons.len(), 2);
        assert_eq!(config.buttons.get_index(0), Some((&"plus".to_string(), &" + ".to_string())));
    }

    #[test]
    fn standard_buttons_keep_their_order() {
        let config = FormulaEditorConfig::new().with_standard_buttons();

        let labels: Vec<&str> = config.buttons.keys().map(String::as_str).collect();
        assert_eq!(labels, STANDARD_TOKENS);
    }

    #[test]
    fn missing_field_is_a_config_error() {
        let config = FormulaEditorConfig::new().with_standard_buttons();

        assert_eq!(config.validate(), Err(ConfigError::MissingFormulaField));
    }

    #[test]
    fn cloned_config_shares_its_validator() {
        let config = FormulaEditorConfig::new().with_validator(PendingBackendValidator);

        let cloned = config.clone();

        assert_eq!(cloned.validator, config.validator);
        assert_ne!(
            FormulaEditorConfig::new().with_validator(PendingBackendValidator),
            config
        );
    }

    #[test]
    fn column_select_labels_default_to_values() {
        let select = ColumnSelectConfig::from_values(["price", "qty"]);

        assert_eq!(select.options.get("qty").map(String::as_str), Some("qty"));
    }
}
