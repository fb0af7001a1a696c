//! Join form
//!
//! Username and room id fields, centered.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use roomchat_client::Connector;

use super::input;
use crate::{App, app::Field};

const FORM_WIDTH: u16 = 44;
const FORM_HEIGHT: u16 = 9;
const FIELD_HEIGHT: u16 = 3;
const HINT: &str = "Create or join a room by entering its ID.";

/// Render the join form.
pub fn render<C: Connector>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let form = centered(area, FORM_WIDTH, FORM_HEIGHT);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Join a Chat Room ")
        .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD));
    let inner = block.inner(form);
    frame.render_widget(block, form);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(1),
        ])
        .split(inner);

    let [username_area, room_area, hint_area] = chunks.as_ref() else {
        return;
    };

    let focus = app.focus();
    input::render(frame, app.username(), " Username ", *username_area, focus == Field::Username);
    input::render(frame, app.room(), " Room ID ", *room_area, focus == Field::Room);

    let hint = Paragraph::new(Line::from(HINT).centered()).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, *hint_area);
}

/// Rect of at most `width` x `height` centered in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
