use egui::text::CCursor;
use egui::text_edit::TextEditState;
use egui::text_selection::CCursorRange;
use egui::{Id, Pos2, Rect, Response, Ui};

pub use column_select::{ColumnSelect, ColumnSelectError};
pub use config::{
    ColumnSelectConfig, ConfigError, FormulaEditorConfig, FormulaField, STANDARD_TOKENS,
};
pub use editing::Caret;
pub use host::FormulaEditorHost;
pub use preview::{
    FormulaValidator, PendingBackendValidator, Preview, PreviewError, SharedValidator,
};
pub use state::FormulaEditorState;
pub use vocabulary::Vocabulary;

pub mod column_select;
pub mod config;
pub mod editing;
pub mod host;
pub mod preview;
pub mod state;
pub mod vocabulary;

pub struct FormulaEditor {
    id: Id,
    desired_width: Option<f32>,
    hint_text: Option<String>,
}

impl FormulaEditor {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            desired_width: None,
            hint_text: None,
        }
    }

    pub fn desired_width(mut self, width: f32) -> Self {
        self.desired_width = Some(width);
        self
    }

    pub fn hint_text(mut self, hint_text: impl Into<String>) -> Self {
        self.hint_text = Some(hint_text.into());
        self
    }

    /// The id of the formula text field, e.g. to request focus for it.
    pub fn field_id(&self) -> Id {
        self.id.with("field")
    }

    pub fn show(&self, ui: &mut Ui, state: &mut FormulaEditorState) -> (Response, Vec<Action>) {
        let field_id = self.field_id();

        let response = ui
            .vertical(|ui| {
                //
                // calculator buttons
                //
                let mut pressed = None;
                ui.horizontal_wrapped(|ui| {
                    for (label, _token) in state.buttons() {
                        if ui.button(label).clicked() {
                            pressed = Some(label.to_string());
                        }
                    }
                });
                if let Some(label) = pressed {
                    state.press_button(&label);
                }

                //
                // column select
                //
                let mut toggled = None;
                if let Some(column_select) = state.column_select() {
                    ui.horizontal_wrapped(|ui| {
                        for (index, (_value, label)) in column_select.options().enumerate() {
                            let selected = column_select.is_selected(index);
                            if ui.add(egui::Button::selectable(selected, label)).clicked() {
                                toggled = Some(index);
                            }
                        }
                    });
                }
                if let Some(index) = toggled {
                    if let Some(column_select) = state.column_select_mut() {
                        column_select.toggle(index);
                    }
                    state.columns_selected();
                }

                //
                // formula field
                //
                if let Some(caret) = state.pending_caret.take() {
                    let mut text_edit_state =
                        TextEditState::load(ui.ctx(), field_id).unwrap_or_default();
                    text_edit_state.cursor.set_char_range(Some(CCursorRange::two(
                        CCursor::new(caret.start),
                        CCursor::new(caret.end),
                    )));
                    text_edit_state.store(ui.ctx(), field_id);
                }

                let mut text = state.text().to_string();
                let mut text_edit = egui::TextEdit::singleline(&mut text).id(field_id);
                if let Some(width) = self.desired_width {
                    text_edit = text_edit.desired_width(width);
                }
                if let Some(hint_text) = &self.hint_text {
                    text_edit = text_edit.hint_text(hint_text.as_str());
                }
                let output = text_edit.show(ui);

                let caret = output
                    .cursor_range
                    .map(|range| Caret::between(range.primary.index, range.secondary.index));
                if output.response.changed() {
                    let caret = caret.unwrap_or_else(|| Caret::at_end_of(&text));
                    state.input_changed(text, caret);
                } else if let Some(caret) = caret {
                    state.set_caret(caret);
                }

                if std::mem::take(&mut state.focus_requested) {
                    output.response.request_focus();
                }

                let field_rect = output.response.rect;

                //
                // suggestions
                //
                let mut panel_rect = None;
                if state.suggestions_visible() {
                    let (origin, width) = suggestion_panel_placement(field_rect);

                    let panel = egui::Area::new(self.id.with("suggestions"))
                        .order(egui::Order::Foreground)
                        .fixed_pos(origin)
                        .show(ui.ctx(), |ui| {
                            ui.set_width(width);
                            egui::Frame::popup(ui.style())
                                .show(ui, |ui| {
                                    ui.set_width(ui.available_width());

                                    let mut accepted = None;
                                    for suggestion in state.suggestions() {
                                        let item =
                                            egui::Button::selectable(false, suggestion.as_str());
                                        if ui.add(item).clicked() {
                                            accepted = Some(suggestion.clone());
                                        }
                                    }
                                    accepted
                                })
                                .inner
                        });

                    panel_rect = Some(panel.response.rect);
                    if let Some(suggestion) = panel.inner {
                        state.accept_suggestion(&suggestion);
                    }
                }

                let clicked_at = ui.input(|input| {
                    if input.pointer.any_click() {
                        input.pointer.interact_pos()
                    } else {
                        None
                    }
                });
                if let Some(position) = clicked_at {
                    if is_outside(position, field_rect, panel_rect) {
                        state.dismiss_suggestions();
                    }
                }

                //
                // preview
                //
                ui.label(state.preview().text());
            })
            .response;

        (response, state.take_actions())
    }
}

/// Top-left corner and width of the suggestion panel: directly below the field, as wide as it.
pub fn suggestion_panel_placement(field_rect: Rect) -> (Pos2, f32) {
    let origin = Pos2::new(field_rect.left(), field_rect.top() + field_rect.height());

    (origin, field_rect.width())
}

/// true if `position` is in neither the field nor the (visible) suggestion panel.
pub fn is_outside(position: Pos2, field_rect: Rect, panel_rect: Option<Rect>) -> bool {
    !field_rect.contains(position)
        && !panel_rect.is_some_and(|panel_rect| panel_rect.contains(position))
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    TokenInserted(String),
    /// the panel shows this many suggestions
    SuggestionsShown(usize),
    SuggestionsHidden,
    SuggestionAccepted(String),
    /// the chunk appended, without the leading `" + "`
    ColumnsAppended(String),
    /// the new preview text
    PreviewChanged(String),
}
