//! Status bar: server name, message counter, search indicator, notices.

use crate::ui::theme::{Styles, Symbols};
use confab_client::Session;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// One-line status bar across the top of the screen.
pub struct StatusBar<'a> {
    session: &'a Session,
    server_name: &'a str,
    tick: usize,
    notification: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        session: &'a Session,
        server_name: &'a str,
        tick: usize,
        notification: Option<&'a str>,
    ) -> Self {
        Self {
            session,
            server_name,
            tick,
            notification,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 {
            return;
        }

        let mut spans = vec![
            Span::styled(" confab ", Styles::bold()),
            Span::styled(self.server_name, Styles::dim()),
            Span::raw("  "),
            Span::styled(
                format!("{} messages", self.session.history_length()),
                Styles::default(),
            ),
        ];

        if self.session.is_searching() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                Symbols::SPINNER[self.tick % Symbols::SPINNER.len()],
                Styles::warning(),
            ));
            spans.push(Span::styled(" searching", Styles::warning()));
        }

        if let Some(notice) = self.notification {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(notice, Styles::success()));
        } else if !self.session.is_searching() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                "^L clear  ^N new  ^E export  ^1-3 samples  Esc quit",
                Styles::dim(),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confab_client::ChatResponse;

    fn render_to_string(bar: StatusBar<'_>) -> String {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..area.width)
            .map(|x| buf[(x, 0)].symbol().to_string())
            .collect()
    }

    #[test]
    fn test_counter_and_hints() {
        let session = Session::new();
        let rendered = render_to_string(StatusBar::new(&session, "localhost:5000", 0, None));

        assert!(rendered.contains("confab"));
        assert!(rendered.contains("localhost:5000"));
        assert!(rendered.contains("0 messages"));
        assert!(rendered.contains("^L clear"));
    }

    #[test]
    fn test_searching_indicator_replaces_hints() {
        let mut session = Session::new();
        session.begin_send("question").unwrap();
        let rendered = render_to_string(StatusBar::new(&session, "localhost", 1, None));

        assert!(rendered.contains("searching"));
        assert!(!rendered.contains("^L clear"));
    }

    #[test]
    fn test_counter_tracks_server_history() {
        let mut session = Session::new();
        let pending = session.begin_send("question").unwrap();
        session.finish_send(&pending.token, Ok(ChatResponse::reply("answer", 2)));

        let rendered = render_to_string(StatusBar::new(&session, "localhost", 0, None));
        assert!(rendered.contains("2 messages"));
    }

    #[test]
    fn test_notification_shown() {
        let session = Session::new();
        let rendered = render_to_string(StatusBar::new(
            &session,
            "localhost",
            0,
            Some("Conversation history cleared!"),
        ));
        assert!(rendered.contains("Conversation history cleared!"));
    }
}
