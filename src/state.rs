use std::sync::Arc;

use indexmap::IndexMap;
use log::{debug, error, info, trace};

use crate::column_select::ColumnSelect;
use crate::config::{ConfigError, FormulaEditorConfig};
use crate::editing::{self, Caret, Edit};
use crate::preview::{self, FormulaValidator, PendingBackendValidator, Preview, SharedValidator};
use crate::vocabulary::Vocabulary;
use crate::Action;

/// Everything a mounted formula editor owns.
///
/// The handlers here are the editor's behaviour, [`crate::FormulaEditor`] only translates egui
/// input into calls to them and renders the result.
pub struct FormulaEditorState {
    vocabulary: Vocabulary,

    text: String,
    caret: Caret,

    suggestions: Vec<String>,
    suggestions_visible: bool,

    preview: Preview,
    validator: Arc<dyn FormulaValidator>,

    buttons: IndexMap<String, String>,
    column_select: Option<ColumnSelect>,

    // consumed by the widget on the next frame
    pub(crate) focus_requested: bool,
    pub(crate) pending_caret: Option<Caret>,

    actions: Vec<Action>,
}

impl FormulaEditorState {
    pub fn new(config: &FormulaEditorConfig) -> Result<Self, ConfigError> {
        let field = config.validate()?;

        let vocabulary =
            Vocabulary::from_comma_lists(field.columns.as_deref(), field.functions.as_deref());
        info!("Available columns: {:?}", vocabulary.columns());
        debug!("Available functions: {:?}", vocabulary.functions());

        let text = field.initial_text.clone();
        let caret = Caret::at_end_of(&text);

        let mut state = Self {
            vocabulary,
            text,
            caret,
            suggestions: vec![],
            suggestions_visible: false,
            preview: Preview::Empty,
            validator: config
                .validator
                .clone()
                .map(SharedValidator::into_inner)
                .unwrap_or_else(|| Arc::new(PendingBackendValidator)),
            buttons: config.buttons.clone(),
            column_select: config.column_select.as_ref().map(ColumnSelect::new),
            focus_requested: false,
            pending_caret: None,
            actions: vec![],
        };

        state.refresh_preview();
        state.actions.clear();

        Ok(state)
    }

    /// Replace the validator used for the preview and recompute it.
    pub fn set_validator(&mut self, validator: Box<dyn FormulaValidator>) {
        self.validator = Arc::from(validator);
        self.refresh_preview();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn caret(&self) -> Caret {
        self.caret
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions_visible
    }

    pub fn buttons(&self) -> impl Iterator<Item = (&str, &str)> {
        self.buttons
            .iter()
            .map(|(label, token)| (label.as_str(), token.as_str()))
    }

    pub fn column_select(&self) -> Option<&ColumnSelect> {
        self.column_select.as_ref()
    }

    pub fn column_select_mut(&mut self) -> Option<&mut ColumnSelect> {
        self.column_select.as_mut()
    }

    /// Actions recorded since the last call.
    pub fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    /// The caret moved without the text changing, e.g. a click or arrow key in the field.
    pub fn set_caret(&mut self, caret: Caret) {
        self.caret = caret;
    }

    fn apply(&mut self, edit: Edit) {
        self.text = edit.text;
        self.caret = edit.caret;
        self.pending_caret = Some(edit.caret);
        self.focus_requested = true;
    }

    /// Handle a click on the calculator button with the given label.
    ///
    /// Returns `false` if no button has that label.
    pub fn press_button(&mut self, label: &str) -> bool {
        let Some(token) = self.buttons.get(label).cloned() else {
            debug!("no calculator button labelled {:?}", label);
            return false;
        };

        self.insert_token(&token);
        true
    }

    /// Replace the selection with `token`.
    pub fn insert_token(&mut self, token: &str) {
        let edit = editing::insert_token(&self.text, self.caret, token);
        self.apply(edit);
        self.actions.push(Action::TokenInserted(token.to_string()));

        self.refresh_preview();
    }

    /// The user edited the field, `text` and `caret` are the field's new contents.
    pub fn input_changed(&mut self, text: String, caret: Caret) {
        self.text = text;
        self.caret = caret;

        self.refresh_preview();
        self.update_suggestions();
    }

    fn update_suggestions(&mut self) {
        let last_word = editing::last_word(&self.text, self.caret.start);

        let matches = if last_word.is_empty() {
            vec![]
        } else {
            self.vocabulary.matches(last_word)
        };
        trace!("last word: {:?}, matches: {:?}", last_word, matches);

        if matches.is_empty() {
            self.suggestions.clear();
            self.hide_suggestions();
        } else {
            self.suggestions = matches;
            self.suggestions_visible = true;
            self.actions
                .push(Action::SuggestionsShown(self.suggestions.len()));
        }
    }

    fn hide_suggestions(&mut self) {
        if self.suggestions_visible {
            self.suggestions_visible = false;
            self.actions.push(Action::SuggestionsHidden);
        }
    }

    /// Handle a click on a suggestion item, the word before the caret is replaced by it.
    pub fn accept_suggestion(&mut self, suggestion: &str) {
        let edit = editing::accept_suggestion(&self.text, self.caret.start, suggestion);
        self.apply(edit);
        self.actions
            .push(Action::SuggestionAccepted(suggestion.to_string()));

        self.hide_suggestions();
        self.refresh_preview();
    }

    /// A click landed outside the field and the suggestion panel.
    pub fn dismiss_suggestions(&mut self) {
        self.hide_suggestions();
    }

    /// Handle a change of the column select, appending the selected columns to the formula.
    ///
    /// Failures are logged, the formula is left as it was.
    pub fn columns_selected(&mut self) {
        let Some(column_select) = self.column_select.as_ref() else {
            return;
        };

        let values = match column_select.selected_values() {
            Ok(values) => values,
            Err(e) => {
                error!("Error in column selection: {}", e);
                return;
            }
        };
        let appended = values.join(" + ");
        let edit = editing::append_terms(&self.text, &values);
        self.apply(edit);
        self.actions.push(Action::ColumnsAppended(appended));

        self.refresh_preview();
    }

    /// Recompute the preview from the current text.
    pub fn refresh_preview(&mut self) {
        let preview = preview::compute_preview(&self.text, self.validator.as_ref());
        if preview != self.preview {
            self.preview = preview;
            self.actions
                .push(Action::PreviewChanged(self.preview.text().to_string()));
        }
    }
}
