//! Chat area
//!
//! Room header and the message log, newest at the bottom.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};
use roomchat_client::{Connector, Message};

use crate::App;

const BORDER_SIZE: u16 = 2;

/// Render the chat area.
pub fn render<C: Connector>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let identity = app.chat_identity();
    let room = identity.map_or("-", |identity| identity.room_id.as_str());
    let me = identity.map(|identity| identity.username.as_str());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Room: {room} | You: {} ", me.unwrap_or("-")))
        .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD));

    let items: Vec<ListItem> =
        app.controller().messages().iter().map(|message| line(message, me)).collect();

    let visible_height = area.height.saturating_sub(BORDER_SIZE) as usize;
    let skip = items.len().saturating_sub(visible_height);
    let visible_items: Vec<_> = items.into_iter().skip(skip).collect();

    let list = List::new(visible_items).block(block);

    frame.render_widget(list, area);
}

/// One log entry. System notices are dimmed; our own lines are highlighted.
fn line<'a>(message: &'a Message, me: Option<&str>) -> ListItem<'a> {
    match message {
        Message::System(notice) => ListItem::new(
            Line::from(Span::styled(
                notice.text.as_str(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
            .centered(),
        ),
        Message::Chat(chat) => {
            let (name_style, text_style) = if me.is_some_and(|me| chat.is_from(me)) {
                (
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::White),
                )
            } else {
                (
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::Gray),
                )
            };

            ListItem::new(Line::from(vec![
                Span::styled(chat.username.as_str(), name_style),
                Span::raw(": "),
                Span::styled(chat.message.as_str(), text_style),
            ]))
        },
    }
}
