use std::fmt;
use std::sync::Arc;

use log::error;
use thiserror::Error;

pub const EMPTY_FORMULA_MESSAGE: &str = "Enter a formula to see the preview";
pub const PENDING_BACKEND_MESSAGE: &str = "Validating... (Full calculation requires backend)";
pub const INVALID_FORMULA_MESSAGE: &str = "Invalid formula";

/// The status line shown beneath the formula field. Never the result of a real evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Empty,
    Pending,
    Invalid,
    /// A message supplied by a custom validator.
    Message(String),
}

impl Preview {
    pub fn text(&self) -> &str {
        match self {
            Preview::Empty => EMPTY_FORMULA_MESSAGE,
            Preview::Pending => PENDING_BACKEND_MESSAGE,
            Preview::Invalid => INVALID_FORMULA_MESSAGE,
            Preview::Message(message) => message,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PreviewError {
    #[error("formula rejected: {0}")]
    Rejected(String),
}

/// Produces the preview for a non-empty formula.
pub trait FormulaValidator {
    fn validate(&self, formula: &str) -> Result<Preview, PreviewError>;
}

/// Reports every formula as pending, the calculation itself happens on a backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct PendingBackendValidator;

impl FormulaValidator for PendingBackendValidator {
    fn validate(&self, _formula: &str) -> Result<Preview, PreviewError> {
        Ok(Preview::Pending)
    }
}

/// A validator that can be cloned along with the configuration carrying it.
#[derive(Clone)]
pub struct SharedValidator(Arc<dyn FormulaValidator>);

impl SharedValidator {
    pub fn new(validator: impl FormulaValidator + 'static) -> Self {
        Self(Arc::new(validator))
    }

    pub(crate) fn into_inner(self) -> Arc<dyn FormulaValidator> {
        self.0
    }
}

impl fmt::Debug for SharedValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedValidator(..)")
    }
}

/// Two shared validators are equal when they are the same instance.
impl PartialEq for SharedValidator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Compute the preview for `formula`; a validator failure is logged and shown as invalid.
pub fn compute_preview(formula: &str, validator: &dyn FormulaValidator) -> Preview {
    let formula = formula.trim();
    if formula.is_empty() {
        return Preview::Empty;
    }

    match validator.validate(formula) {
        Ok(preview) => preview,
        Err(e) => {
            error!("Preview error: {}", e);
            Preview::Invalid
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct RejectingValidator;

    impl FormulaValidator for RejectingValidator {
        fn validate(&self, formula: &str) -> Result<Preview, PreviewError> {
            Err(PreviewError::Rejected(formula.to_string()))
        }
    }

    #[rstest]
    #[case("", EMPTY_FORMULA_MESSAGE)]
    #[case("   ", EMPTY_FORMULA_MESSAGE)]
    #[case("\t\n", EMPTY_FORMULA_MESSAGE)]
    #[case("a", PENDING_BACKEND_MESSAGE)]
    #[case(" col1 + col2 ", PENDING_BACKEND_MESSAGE)]
    #[case("((", PENDING_BACKEND_MESSAGE)]
    fn default_preview(#[case] formula: &str, #[case] expected: &str) {
        let preview = compute_preview(formula, &PendingBackendValidator);

        assert_eq!(preview.text(), expected);
    }

    #[test]
    fn validator_failure_shows_invalid_formula() {
        let preview = compute_preview("a +", &RejectingValidator);

        assert_eq!(preview, Preview::Invalid);
        assert_eq!(preview.text(), INVALID_FORMULA_MESSAGE);
    }

    #[test]
    fn blank_formula_skips_the_validator() {
        assert_eq!(compute_preview("  ", &RejectingValidator), Preview::Empty);
    }
}
