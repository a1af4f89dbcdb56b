use crate::tui::state::{AppState, InputMode};
use crate::view::{ListView, View};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut AppState, view: &View, summary: &str) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());
    state.list_area = v_chunks[0];

    let title = format!(" Todo ({}) ", summary);
    let border_style = if state.carrying {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    // --- Task List ---
    match &view.list {
        ListView::Empty { message } => {
            let empty = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(empty, v_chunks[0]);
        }
        ListView::Rows(rows) => {
            let items: Vec<ListItem> = rows
                .iter()
                .map(|row| {
                    let mut style = if row.completed {
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default().fg(Color::White)
                    };
                    if row.dragging {
                        style = style.fg(Color::Yellow).add_modifier(Modifier::DIM);
                    }
                    if row.editing {
                        style = style.fg(Color::Magenta);
                    }
                    let handle = if row.drag_over { "▶ " } else { "≡ " };
                    let checkbox = if row.completed { "[x] " } else { "[ ] " };
                    ListItem::new(Line::from(vec![
                        Span::styled(handle, Style::default().fg(Color::DarkGray)),
                        Span::raw(checkbox),
                        Span::styled(row.content.clone(), style),
                    ]))
                })
                .collect();

            let list = List::new(items).block(block).highlight_style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .bg(Color::DarkGray),
            );
            f.render_stateful_widget(list, v_chunks[0], &mut state.list_state);
        }
    }

    // --- Footer / Input ---
    let footer_area = v_chunks[1];
    match state.mode {
        InputMode::Creating | InputMode::Editing => {
            let (title, color) = match state.mode {
                InputMode::Editing => (" Edit Todo ", Color::Magenta),
                _ => (" Add Todo ", Color::Yellow),
            };
            let prefix = "> ";
            let input = Paragraph::new(format!("{}{}", prefix, state.input_buffer))
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(input, footer_area);
            let typed: String = state
                .input_buffer
                .chars()
                .take(state.cursor_position)
                .collect();
            let cursor_x = footer_area.x
                + 1
                + prefix.chars().count() as u16
                + Line::from(typed.as_str()).width() as u16;
            let cursor_y = footer_area.y + 1;
            f.set_cursor_position((cursor_x, cursor_y));
        }
        InputMode::Normal => {
            let f_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(footer_area);
            let status = Paragraph::new(state.message.clone())
                .style(Style::default().fg(Color::Cyan))
                .block(
                    Block::default()
                        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                        .title(" Status "),
                );
            let help_text = if state.carrying {
                "j/k: Target | m/Enter: Drop | Esc: Cancel"
            } else {
                "a:Add | e:Edit | Space:Done | d:Del | m:Move | q:Quit"
            };
            let help = Paragraph::new(help_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );
            f.render_widget(status, f_chunks[0]);
            f.render_widget(help, f_chunks[1]);
        }
    }
}
