// File: ./src/tui/mod.rs
pub mod state;
pub mod view;

use crate::config::Config;
use crate::controller::{Controller, Gesture};
use crate::logging;
use crate::model::{TodoId, TodoItem};
use crate::storage::Persistence;
use crate::store::TodoList;
use crate::tui::state::{AppState, InputMode};
use crate::view::Renderer;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};
use tracing::info;

/// Keeps the one-line summary shown in the title bar current.
#[derive(Debug, Default)]
pub struct StatusRenderer {
    pub summary: String,
}

impl Renderer for StatusRenderer {
    fn render(&mut self, items: &[TodoItem]) {
        let done = items.iter().filter(|t| t.completed).count();
        self.summary = format!("{} items, {} done", items.len(), done);
    }
}

/// Everything one terminal session needs, wired together.
pub struct App<S: Persistence> {
    pub list: TodoList<S, StatusRenderer>,
    pub controller: Controller,
    pub state: AppState,
    pub empty_message: String,
}

impl<S: Persistence> App<S> {
    pub fn new(storage: S, empty_message: &str) -> Self {
        Self {
            list: TodoList::load(storage, StatusRenderer::default()),
            controller: Controller::new(),
            state: AppState::new(),
            empty_message: empty_message.to_string(),
        }
    }

    fn selected_id(&self) -> Option<TodoId> {
        self.state
            .selected(self.list.len())
            .map(|i| self.list.items()[i].id)
    }

    fn dispatch(&mut self, gesture: Gesture) -> bool {
        let changed = self.controller.handle(&mut self.list, gesture);
        self.state.clamp_selection(self.list.len());
        changed
    }

    /// Returns false when the user asked to quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }
        match self.state.mode {
            InputMode::Creating | InputMode::Editing => self.on_input_key(key),
            InputMode::Normal if self.state.carrying => self.on_carry_key(key),
            InputMode::Normal => return self.on_normal_key(key),
        }
        true
    }

    fn on_input_key(&mut self, key: KeyEvent) {
        let creating = self.state.mode == InputMode::Creating;
        match key.code {
            KeyCode::Enter => {
                let text = self.state.input_buffer.clone();
                let gesture = if creating {
                    Gesture::SubmitAdd(text)
                } else {
                    Gesture::SubmitEdit(text)
                };
                if self.dispatch(gesture) {
                    if creating {
                        self.state
                            .list_state
                            .select(Some(self.list.len().saturating_sub(1)));
                        self.state.message = "Added.".to_string();
                    } else {
                        self.state.message = "Saved.".to_string();
                    }
                    self.state.mode = InputMode::Normal;
                    self.state.reset_input();
                }
            }
            KeyCode::Esc => {
                self.dispatch(if creating {
                    Gesture::CancelAdd
                } else {
                    Gesture::CancelEdit
                });
                self.state.mode = InputMode::Normal;
                self.state.reset_input();
            }
            KeyCode::Left => self.state.move_cursor_left(),
            KeyCode::Right => self.state.move_cursor_right(),
            KeyCode::Backspace => self.state.delete_char(),
            KeyCode::Char(c) => self.state.enter_char(c),
            _ => {}
        }
    }

    fn on_carry_key(&mut self, key: KeyEvent) {
        let len = self.list.len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.jump_forward(1, len);
                self.hover_selected();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.jump_backward(1, len);
                self.hover_selected();
            }
            KeyCode::Enter | KeyCode::Char('m') => {
                let source = self.controller.ui().drag_source;
                if let (Some(source), Some(target)) = (source, self.state.selected(len)) {
                    // Land on the row under the cursor, not before it.
                    let drop_at = if target > source { target + 1 } else { target };
                    self.dispatch(Gesture::Drop(drop_at));
                    self.state.list_state.select(Some(target));
                    self.state.message = "Moved.".to_string();
                } else {
                    self.dispatch(Gesture::DragEnd);
                }
                self.state.carrying = false;
            }
            KeyCode::Esc => {
                self.dispatch(Gesture::DragEnd);
                self.state.carrying = false;
                self.state.message = "Move cancelled.".to_string();
            }
            _ => {}
        }
    }

    fn on_normal_key(&mut self, key: KeyEvent) -> bool {
        let len = self.list.len();
        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char('a') => {
                self.dispatch(Gesture::OpenAddForm);
                self.state.mode = InputMode::Creating;
                self.state.reset_input();
            }
            KeyCode::Char('e') => {
                if let Some(id) = self.selected_id()
                    && self.dispatch(Gesture::BeginEdit(id))
                    && let Some(item) = self.list.get(id)
                {
                    let content = item.content.clone();
                    self.state.set_input(&content);
                    self.state.mode = InputMode::Editing;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Gesture::Toggle(id));
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.selected_id() {
                    self.dispatch(Gesture::Delete(id));
                    self.state.message = "Deleted.".to_string();
                }
            }
            KeyCode::Char('m') => {
                if let Some(index) = self.state.selected(len)
                    && self.dispatch(Gesture::DragStart(index))
                {
                    self.state.carrying = true;
                    self.state.message = "Moving...".to_string();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.state.next(len),
            KeyCode::Up | KeyCode::Char('k') => self.state.previous(len),
            KeyCode::PageDown => self.state.jump_forward(10, len),
            KeyCode::PageUp => self.state.jump_backward(10, len),
            _ => {}
        }
        true
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        let len = self.list.len();
        let hit = self.state.row_at(mouse.column, mouse.row, len);
        match mouse.kind {
            MouseEventKind::ScrollDown => self.state.next(len),
            MouseEventKind::ScrollUp => self.state.previous(len),
            MouseEventKind::Down(MouseButton::Left) => {
                if self.state.mode != InputMode::Normal || self.state.carrying {
                    return;
                }
                if let Some(index) = hit.filter(|&i| i < len) {
                    self.state.list_state.select(Some(index));
                    self.dispatch(Gesture::DragStart(index));
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => match hit {
                Some(index) if index < len => {
                    self.dispatch(Gesture::DragEnter(index));
                }
                _ => {
                    self.dispatch(Gesture::DragLeave);
                }
            },
            MouseEventKind::Up(MouseButton::Left) => {
                if self.state.carrying {
                    return;
                }
                match (self.controller.ui().drag_source, hit) {
                    (Some(source), Some(index)) if index != source => {
                        self.dispatch(Gesture::Drop(index));
                        let landed = if source < index { index - 1 } else { index };
                        self.state
                            .list_state
                            .select(Some(landed.min(len.saturating_sub(1))));
                        self.state.message = "Moved.".to_string();
                    }
                    _ => {
                        self.dispatch(Gesture::DragEnd);
                    }
                }
            }
            _ => {}
        }
    }

    fn hover_selected(&mut self) {
        if let Some(index) = self.state.selected(self.list.len()) {
            self.dispatch(Gesture::DragEnter(index));
        }
    }
}

pub fn run() -> Result<()> {
    let config = Config::load()?;
    let data_dir = config.data_dir()?;
    let log_path = logging::init(&data_dir, &config.log_level)?;
    info!("Logging to {}", log_path.display());

    let storage = config.storage()?;
    info!("Using stored list at {}", storage.path().display());
    let mut app = App::new(storage, &config.empty_message);

    enable_raw_mode()?;
    let mut terminal = restore_on_error(setup_terminal, restore_terminal)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// Best-effort undo of raw mode, alternate screen and mouse capture.
fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Runs `setup`; if it fails, `restore` runs before the error is returned.
fn restore_on_error<T>(setup: impl FnOnce() -> Result<T>, restore: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| restore())
}

fn event_loop<S: Persistence>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        let screen = app.controller.view(&app.list, &app.empty_message);
        let summary = app.list.renderer().summary.clone();
        terminal.draw(|f| view::draw(f, &mut app.state, &screen, &summary))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) => {
                    if !app.on_key(key) {
                        info!("Quit requested");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;
    use std::cell::Cell;

    fn press(app: &mut App<&MemoryStorage>, code: KeyCode) -> bool {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App<&MemoryStorage>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn mouse(app: &mut App<&MemoryStorage>, kind: MouseEventKind, row: u16) {
        app.on_mouse(MouseEvent {
            kind,
            column: 5,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    fn contents(app: &App<&MemoryStorage>) -> Vec<String> {
        app.list.items().iter().map(|t| t.content.clone()).collect()
    }

    #[test]
    fn add_form_stays_open_on_blank_input() {
        let storage = MemoryStorage::default();
        let mut app = App::new(&storage, "empty");
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.mode, InputMode::Creating);
        assert!(app.list.is_empty());

        app.state.reset_input();
        type_text(&mut app, "Buy milk");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.mode, InputMode::Normal);
        assert_eq!(contents(&app), vec!["Buy milk"]);
        assert_eq!(app.list.renderer().summary, "1 items, 0 done");
    }

    #[test]
    fn keyboard_move_lands_under_cursor() {
        let storage = MemoryStorage::default();
        let mut app = App::new(&storage, "empty");
        for name in ["A", "B", "C"] {
            press(&mut app, KeyCode::Char('a'));
            type_text(&mut app, name);
            press(&mut app, KeyCode::Enter);
        }
        app.state.list_state.select(Some(0));
        press(&mut app, KeyCode::Char('m'));
        assert!(app.state.carrying);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Enter);
        assert!(!app.state.carrying);
        assert_eq!(contents(&app), vec!["B", "C", "A"]);
        assert_eq!(app.state.list_state.selected(), Some(2));
    }

    #[test]
    fn edit_prefills_and_q_quits() {
        let storage = MemoryStorage::default();
        let mut app = App::new(&storage, "empty");
        press(&mut app, KeyCode::Char('a'));
        type_text(&mut app, "draft");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.state.mode, InputMode::Editing);
        assert_eq!(app.state.input_buffer, "draft");
        type_text(&mut app, "ed");
        press(&mut app, KeyCode::Enter);
        assert_eq!(contents(&app), vec!["drafted"]);
        assert!(!press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn mouse_drag_drops_before_row_or_after_last() {
        let storage = MemoryStorage::default();
        let mut app = App::new(&storage, "empty");
        for name in ["A", "B", "C"] {
            press(&mut app, KeyCode::Char('a'));
            type_text(&mut app, name);
            press(&mut app, KeyCode::Enter);
        }
        app.state.list_area = Rect::new(0, 0, 40, 10);

        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 1);
        mouse(&mut app, MouseEventKind::Drag(MouseButton::Left), 3);
        assert_eq!(app.controller.ui().drag_over, Some(2));
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 3);
        assert_eq!(contents(&app), vec!["B", "A", "C"]);
        assert_eq!(app.state.list_state.selected(), Some(1));
        assert!(app.controller.ui().drag_source.is_none());

        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 1);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 8);
        assert_eq!(contents(&app), vec!["A", "C", "B"]);
        assert_eq!(app.state.list_state.selected(), Some(2));
    }

    #[test]
    fn mouse_release_on_source_row_keeps_order() {
        let storage = MemoryStorage::default();
        let mut app = App::new(&storage, "empty");
        for name in ["A", "B"] {
            press(&mut app, KeyCode::Char('a'));
            type_text(&mut app, name);
            press(&mut app, KeyCode::Enter);
        }
        app.state.list_area = Rect::new(0, 0, 40, 10);

        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 2);
        mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 2);
        assert_eq!(contents(&app), vec!["A", "B"]);
        assert!(app.controller.ui().drag_source.is_none());
    }

    #[test]
    fn failed_terminal_setup_restores_first() {
        let restored = Cell::new(false);
        let result: Result<()> = restore_on_error(
            || Err(anyhow::anyhow!("no tty")),
            || restored.set(true),
        );
        assert!(result.is_err());
        assert!(restored.get());

        let restored = Cell::new(false);
        let result = restore_on_error(|| Ok(7), || restored.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }
}
