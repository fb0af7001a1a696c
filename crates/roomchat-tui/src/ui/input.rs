//! Input line
//!
//! Displays a line editor with cursor.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::input::LineEditor;

const PROMPT_WIDTH: u16 = 3; // border + "> "
const INPUT_LINE_OFFSET_Y: u16 = 1; // inside top border
const RIGHT_PADDING: u16 = 1; // inside right border

/// Render one line editor in a bordered box. Only the focused editor gets the
/// terminal cursor.
pub fn render(frame: &mut Frame, editor: &LineEditor, title: &str, area: Rect, focused: bool) {
    let border = if focused { Color::Magenta } else { Color::DarkGray };
    let block =
        Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)).title(title);

    let paragraph = Paragraph::new(format!("> {}", editor.text()))
        .style(Style::default().fg(Color::White))
        .block(block);

    frame.render_widget(paragraph, area);

    if !focused {
        return;
    }

    let available_width = area.width.saturating_sub(PROMPT_WIDTH + RIGHT_PADDING);
    let cursor_offset = (editor.cursor() as u16).min(available_width);

    let cursor_x = area.x.saturating_add(PROMPT_WIDTH).saturating_add(cursor_offset);
    let cursor_y = area.y.saturating_add(INPUT_LINE_OFFSET_Y);
    let max_x = area.x.saturating_add(area.width).saturating_sub(RIGHT_PADDING);
    let cursor_x = cursor_x.min(max_x);

    frame.set_cursor_position((cursor_x, cursor_y));
}
