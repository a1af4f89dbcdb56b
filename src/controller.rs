// File: ./src/controller.rs
use crate::model::TodoId;
use crate::storage::Persistence;
use crate::store::TodoList;
use crate::view::{self, Renderer, UiState, View};
use tracing::debug;

/// One discrete user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    OpenAddForm,
    CancelAdd,
    SubmitAdd(String),
    BeginEdit(TodoId),
    CancelEdit,
    SubmitEdit(String),
    Toggle(TodoId),
    Delete(TodoId),
    DragStart(usize),
    DragEnter(usize),
    DragLeave,
    Drop(usize),
    DragEnd,
}

/// Forwards gestures to the model and keeps the form and drag state that
/// belongs to the presentation, not the list.
#[derive(Debug, Default)]
pub struct Controller {
    ui: UiState,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn view<S: Persistence, R: Renderer>(
        &self,
        list: &TodoList<S, R>,
        empty_message: &str,
    ) -> View {
        view::render(list.items(), &self.ui, empty_message)
    }

    /// Applies `gesture`. Returns true when the screen needs redrawing.
    pub fn handle<S: Persistence, R: Renderer>(
        &mut self,
        list: &mut TodoList<S, R>,
        gesture: Gesture,
    ) -> bool {
        debug!("Gesture: {:?}", gesture);
        match gesture {
            Gesture::OpenAddForm => {
                self.ui.add_form_open = true;
                true
            }
            Gesture::CancelAdd => {
                let was_open = self.ui.add_form_open;
                self.ui.add_form_open = false;
                was_open
            }
            Gesture::SubmitAdd(text) => {
                if list.add(&text).is_some() {
                    self.ui.add_form_open = false;
                    true
                } else {
                    false
                }
            }
            Gesture::BeginEdit(id) => {
                if list.get(id).is_none() {
                    return false;
                }
                self.ui.editing = Some(id);
                true
            }
            Gesture::CancelEdit => self.ui.editing.take().is_some(),
            Gesture::SubmitEdit(text) => {
                let Some(id) = self.ui.editing else {
                    return false;
                };
                if list.edit(id, &text) {
                    self.ui.editing = None;
                    true
                } else {
                    false
                }
            }
            Gesture::Toggle(id) => list.toggle_complete(id),
            Gesture::Delete(id) => {
                let deleted = list.delete(id);
                if deleted && self.ui.editing == Some(id) {
                    self.ui.editing = None;
                }
                deleted
            }
            Gesture::DragStart(index) => {
                if index >= list.len() {
                    return false;
                }
                self.ui.drag_source = Some(index);
                self.ui.drag_over = None;
                true
            }
            Gesture::DragEnter(index) => {
                if self.ui.drag_source.is_none() || self.ui.drag_over == Some(index) {
                    return false;
                }
                self.ui.drag_over = Some(index);
                true
            }
            Gesture::DragLeave => self.ui.drag_over.take().is_some(),
            Gesture::Drop(index) => {
                let Some(source) = self.clear_drag() else {
                    debug!("Drop on {} without a drag source", index);
                    return false;
                };
                list.reorder(source, index);
                true
            }
            Gesture::DragEnd => self.clear_drag().is_some(),
        }
    }

    fn clear_drag(&mut self) -> Option<usize> {
        self.ui.drag_over = None;
        self.ui.drag_source.take()
    }
}
