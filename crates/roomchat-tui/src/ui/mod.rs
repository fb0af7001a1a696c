//! UI rendering
//!
//! Rendering functions that convert App state into terminal output using
//! ratatui widgets. All functions are pure (no I/O), taking state and
//! returning widget trees.

mod chat;
mod input;
mod join;
mod status;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};
use roomchat_client::Connector;

use crate::{App, app::Screen};

/// Render the entire UI.
pub fn render<C: Connector>(frame: &mut Frame, app: &App<C>) {
    const MAIN_AREA_MIN_HEIGHT: u16 = 3;
    const INPUT_HEIGHT: u16 = 3;
    const STATUS_HEIGHT: u16 = 1;

    match app.screen() {
        Screen::Join => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(MAIN_AREA_MIN_HEIGHT), Constraint::Length(STATUS_HEIGHT)])
                .split(frame.area());

            let [form_area, status_area] = chunks.as_ref() else {
                return;
            };

            join::render(frame, app, *form_area);
            status::render(frame, app, *status_area);
        },
        Screen::Chat => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(MAIN_AREA_MIN_HEIGHT),
                    Constraint::Length(INPUT_HEIGHT),
                    Constraint::Length(STATUS_HEIGHT),
                ])
                .split(frame.area());

            let [chat_area, input_area, status_area] = chunks.as_ref() else {
                return;
            };

            chat::render(frame, app, *chat_area);
            input::render(frame, app.message(), " Message ", *input_area, true);
            status::render(frame, app, *status_area);
        },
    }
}
