// File: ./src/view.rs
// Declarative view description: model state in, rows out.
use crate::model::{TodoId, TodoItem};

pub const DEFAULT_EMPTY_MESSAGE: &str = "Nothing to do!";

/// Receives the full list after every successful mutation.
pub trait Renderer {
    fn render(&mut self, items: &[TodoItem]);
}

impl<F: FnMut(&[TodoItem])> Renderer for F {
    fn render(&mut self, items: &[TodoItem]) {
        self(items)
    }
}

/// Discards renders; for front ends that draw on their own schedule.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _items: &[TodoItem]) {}
}

/// Transient UI state that decorates the rows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct UiState {
    pub add_form_open: bool,
    pub editing: Option<TodoId>,
    pub drag_source: Option<usize>,
    pub drag_over: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub index: usize,
    pub id: TodoId,
    pub content: String,
    pub completed: bool,
    pub editing: bool,
    pub dragging: bool,
    pub drag_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Empty { message: String },
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub list: ListView,
    pub add_form_open: bool,
    pub edit_form_open: bool,
}

pub fn render(items: &[TodoItem], ui: &UiState, empty_message: &str) -> View {
    let list = if items.is_empty() {
        ListView::Empty {
            message: empty_message.to_string(),
        }
    } else {
        ListView::Rows(
            items
                .iter()
                .enumerate()
                .map(|(index, t)| RowView {
                    index,
                    id: t.id,
                    content: t.content.clone(),
                    completed: t.completed,
                    editing: ui.editing == Some(t.id),
                    dragging: ui.drag_source == Some(index),
                    drag_over: ui.drag_over == Some(index) && ui.drag_source != Some(index),
                })
                .collect(),
        )
    };

    View {
        list,
        add_form_open: ui.add_form_open,
        edit_form_open: ui.editing.is_some(),
    }
}

impl ListView {
    pub fn rows(&self) -> &[RowView] {
        match self {
            ListView::Empty { .. } => &[],
            ListView::Rows(rows) => rows,
        }
    }
}
