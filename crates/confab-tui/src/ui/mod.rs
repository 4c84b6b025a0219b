//! UI composition: layout and widget modules.

pub mod input;
pub mod modal;
pub mod status_bar;
pub mod theme;
pub mod transcript;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::Line,
    widgets::{Paragraph, Widget},
    Frame,
};
use status_bar::StatusBar;
use theme::{Palette, Styles};
use transcript::TranscriptPane;

/// Draw the full screen for one frame.
pub fn draw(app: &App, frame: &mut Frame<'_>) {
    let area = frame.area();
    frame
        .buffer_mut()
        .set_style(area, Style::default().bg(Palette::BG));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    StatusBar::new(
        app.session(),
        app.server_name(),
        app.tick(),
        app.notification(),
    )
    .render(chunks[0], frame.buffer_mut());

    TranscriptPane::new(app.session(), app.tick(), app.scroll())
        .render(chunks[1], frame.buffer_mut());

    Paragraph::new(Line::from("\u{2500}".repeat(chunks[2].width as usize)))
        .style(Styles::dim())
        .render(chunks[2], frame.buffer_mut());

    app.input().widget().render(chunks[3], frame.buffer_mut());

    if let Some(modal) = app.modal() {
        modal.render(area, frame.buffer_mut());
    }
}
