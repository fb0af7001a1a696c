//! Status bar
//!
//! Displays connection status and either the latest notice or key hints.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use roomchat_client::{Connector, SessionState};

use crate::{
    App,
    app::{LEAVE_COMMAND, Screen},
};

/// Render the status bar.
pub fn render<C: Connector>(frame: &mut Frame, app: &App<C>, area: Rect) {
    let controller = app.controller();

    let connection_status = match controller.state() {
        SessionState::Idle => Span::styled("Disconnected", Style::default().fg(Color::Red)),
        SessionState::Connecting(_) => {
            Span::styled("Connecting...", Style::default().fg(Color::Yellow))
        },
        SessionState::Joined(_) => Span::styled(
            "Connected",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
    };

    let detail = app.status_message().map_or_else(
        || match app.screen() {
            Screen::Join => " | Tab: switch field | Enter: join | Esc: quit".to_string(),
            Screen::Chat => format!(" | Enter: send | {LEAVE_COMMAND} or Ctrl-L: leave | Esc: quit"),
        },
        |status| format!(" | {status}"),
    );

    let status_line = Line::from(vec![
        Span::raw(" "),
        connection_status,
        Span::styled(format!(" ({})", controller.config().endpoint), Style::default().fg(Color::Gray)),
        Span::raw(detail),
    ]);

    let paragraph =
        Paragraph::new(status_line).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(paragraph, area);
}
