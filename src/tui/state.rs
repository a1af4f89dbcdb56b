use ratatui::layout::Rect;
use ratatui::widgets::ListState;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum InputMode {
    Normal,
    Creating,
    Editing,
}

pub struct AppState {
    pub list_state: ListState,
    pub list_area: Rect,
    pub message: String,
    pub mode: InputMode,
    pub input_buffer: String,
    pub cursor_position: usize,
    /// Keyboard drag in progress (picked up with `m`).
    pub carrying: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let mut l_state = ListState::default();
        l_state.select(Some(0));
        Self {
            list_state: l_state,
            list_area: Rect::default(),
            message: "a: Add | e: Edit | m: Move".to_string(),
            mode: InputMode::Normal,
            input_buffer: String::new(),
            cursor_position: 0,
            carrying: false,
        }
    }

    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.input_buffer.insert(index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let from_left_to_current_index = current_index - 1;
            let before_char_to_delete = self.input_buffer.chars().take(from_left_to_current_index);
            let after_char_to_delete = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before_char_to_delete.chain(after_char_to_delete).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    /// Prefills the buffer (edit form) with the cursor at the end.
    pub fn set_input(&mut self, text: &str) {
        self.input_buffer = text.to_string();
        self.cursor_position = self.input_buffer.chars().count();
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }
    fn byte_index(&self) -> usize {
        self.input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len())
    }

    pub fn selected(&self, len: usize) -> Option<usize> {
        self.list_state.selected().filter(|&i| i < len)
    }

    /// Keeps the selection inside a list of `len` rows.
    pub fn clamp_selection(&mut self, len: usize) {
        let sel = self.list_state.selected().unwrap_or(0);
        if len == 0 {
            self.list_state.select(Some(0));
        } else if sel >= len {
            self.list_state.select(Some(len - 1));
        }
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }
    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }
    pub fn jump_forward(&mut self, step: usize, len: usize) {
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let new_index = (current + step).min(len - 1);
        self.list_state.select(Some(new_index));
    }
    pub fn jump_backward(&mut self, step: usize, len: usize) {
        if len == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0);
        let new_index = current.saturating_sub(step);
        self.list_state.select(Some(new_index));
    }

    /// Maps a terminal row to a list position. Rows below the last item map
    /// to `len`, i.e. "after the last item".
    pub fn row_at(&self, column: u16, row: u16, len: usize) -> Option<usize> {
        let inner_top = self.list_area.y + 1;
        let inner_bottom = self.list_area.y + self.list_area.height.saturating_sub(1);
        let inner_left = self.list_area.x;
        let inner_right = self.list_area.x + self.list_area.width;
        if row < inner_top || row >= inner_bottom || column < inner_left || column >= inner_right {
            return None;
        }
        let index = (row - inner_top) as usize + self.list_state.offset();
        Some(index.min(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_editing_handles_multibyte_text() {
        let mut state = AppState::new();
        for c in "買い物".chars() {
            state.enter_char(c);
        }
        state.move_cursor_left();
        state.enter_char('x');
        assert_eq!(state.input_buffer, "買いx物");
        state.delete_char();
        assert_eq!(state.input_buffer, "買い物");
    }

    #[test]
    fn navigation_wraps_and_jumps_clamp() {
        let mut state = AppState::new();
        state.previous(3);
        assert_eq!(state.list_state.selected(), Some(2));
        state.next(3);
        assert_eq!(state.list_state.selected(), Some(0));
        state.jump_forward(10, 3);
        assert_eq!(state.list_state.selected(), Some(2));
        state.clamp_selection(1);
        assert_eq!(state.list_state.selected(), Some(0));
    }

    #[test]
    fn rows_below_the_list_mean_after_last() {
        let mut state = AppState::new();
        state.list_area = Rect::new(0, 0, 40, 10);
        assert_eq!(state.row_at(5, 0, 3), None);
        assert_eq!(state.row_at(5, 1, 3), Some(0));
        assert_eq!(state.row_at(5, 3, 3), Some(2));
        assert_eq!(state.row_at(5, 7, 3), Some(3));
        assert_eq!(state.row_at(5, 9, 3), None);
    }
}
