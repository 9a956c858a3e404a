use log::{debug, info, warn};

use crate::config::{ConfigError, FormulaEditorConfig};
use crate::state::FormulaEditorState;

/// Owns the formula editor for the hosting application and makes sure it is set up only once.
#[derive(Default)]
pub struct FormulaEditorHost {
    state: Option<FormulaEditorState>,
}

impl FormulaEditorHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mounted(&self) -> bool {
        self.state.is_some()
    }

    /// Set up the editor from `config`.
    ///
    /// Mounting an already mounted host does nothing and returns the existing state, `config` is
    /// ignored in that case.
    pub fn mount(
        &mut self,
        config: &FormulaEditorConfig,
    ) -> Result<&mut FormulaEditorState, ConfigError> {
        let state = match self.state.take() {
            Some(state) => {
                debug!("formula editor already mounted");
                state
            }
            None => {
                let state = FormulaEditorState::new(config).inspect_err(|e| {
                    warn!("formula editor not mounted: {}", e);
                })?;
                info!("formula editor mounted");
                state
            }
        };

        Ok(self.state.insert(state))
    }

    /// Tear the editor down, returning its final state.
    pub fn unmount(&mut self) -> Option<FormulaEditorState> {
        let state = self.state.take();
        if state.is_some() {
            info!("formula editor unmounted");
        }
        state
    }

    pub fn state(&self) -> Option<&FormulaEditorState> {
        self.state.as_ref()
    }

    pub fn state_mut(&mut self) -> Option<&mut FormulaEditorState> {
        self.state.as_mut()
    }
}
