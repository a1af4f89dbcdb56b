// File: ./src/store.rs
use crate::model::{TodoId, TodoItem, normalize_content};
use crate::storage::Persistence;
use crate::view::Renderer;
use std::collections::HashSet;
use tracing::{debug, warn};

/// The ordered list plus the collaborators it reports to.
///
/// Every successful mutation saves through `storage` and then hands the new
/// state to `renderer`. Rejected mutations (blank text, unknown id, bad
/// index) change nothing and trigger neither.
pub struct TodoList<S: Persistence, R: Renderer> {
    items: Vec<TodoItem>,
    storage: S,
    renderer: R,
}

impl<S: Persistence, R: Renderer> TodoList<S, R> {
    /// Loads the stored list once and renders it.
    pub fn load(storage: S, renderer: R) -> Self {
        let items = storage.load();
        debug!("Loaded {} items", items.len());
        let mut list = Self {
            items,
            storage,
            renderer,
        };
        list.renderer.render(&list.items);
        list
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|t| t.id == id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Re-renders without touching the list, e.g. after a form opened.
    pub fn refresh(&mut self) {
        self.renderer.render(&self.items);
    }

    pub fn add(&mut self, content: &str) -> Option<TodoId> {
        let taken: HashSet<TodoId> = self.items.iter().map(|t| t.id).collect();
        let Some(item) = TodoItem::new(TodoId::fresh(&taken), content) else {
            debug!("Ignoring blank item");
            return None;
        };
        let id = item.id;
        self.items.push(item);
        self.commit();
        Some(id)
    }

    pub fn edit(&mut self, id: TodoId, content: &str) -> bool {
        let Some(content) = normalize_content(content) else {
            debug!("Ignoring blank edit for {}", id);
            return false;
        };
        let Some(item) = self.items.iter_mut().find(|t| t.id == id) else {
            debug!("Edit target {} not found", id);
            return false;
        };
        item.content = content;
        self.commit();
        true
    }

    pub fn toggle_complete(&mut self, id: TodoId) -> bool {
        let Some(item) = self.items.iter_mut().find(|t| t.id == id) else {
            debug!("Toggle target {} not found", id);
            return false;
        };
        item.completed = !item.completed;
        self.commit();
        true
    }

    pub fn delete(&mut self, id: TodoId) -> bool {
        let Some(index) = self.position(id) else {
            debug!("Delete target {} not found", id);
            return false;
        };
        self.items.remove(index);
        self.commit();
        true
    }

    /// Moves the item at `from` so it lands before the item currently at `to`.
    /// `to == len()` drops it after the last item.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let Some(target) = reorder_target(self.items.len(), from, to) else {
            debug!("Ignoring reorder {} -> {}", from, to);
            return false;
        };
        let item = self.items.remove(from);
        self.items.insert(target, item);
        self.commit();
        true
    }

    fn commit(&mut self) {
        if let Err(e) = self.storage.save(&self.items) {
            warn!("Could not persist list, keeping it in memory only: {}", e);
        }
        self.renderer.render(&self.items);
    }
}

/// Post-removal insert index for a move, or `None` when nothing would move.
fn reorder_target(len: usize, from: usize, to: usize) -> Option<usize> {
    if from == to || from >= len {
        return None;
    }
    let adjusted = if from < to { to - 1 } else { to };
    // After removal there are len - 1 items; inserting at len - 1 appends.
    let target = adjusted.min(len - 1);
    if target == from {
        return None;
    }
    Some(target)
}
