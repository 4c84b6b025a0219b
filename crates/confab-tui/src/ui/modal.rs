//! Modal overlays: clear-history confirmation and error alerts.

use crate::ui::theme::{Palette, Styles};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

/// A modal dialog that blocks input until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Ask before clearing the conversation history.
    ConfirmClear,
    /// Blocking error notice with a message.
    Alert(String),
}

impl Modal {
    fn title(&self) -> &str {
        match self {
            Modal::ConfirmClear => " Clear history ",
            Modal::Alert(_) => " Error ",
        }
    }

    fn body(&self) -> Vec<Line<'_>> {
        match self {
            Modal::ConfirmClear => vec![
                Line::from("Clear the conversation history?"),
                Line::default(),
                Line::from(vec![
                    Span::styled("[Enter]", Styles::active()),
                    Span::raw(" clear   "),
                    Span::styled("[Esc]", Styles::active()),
                    Span::raw(" keep"),
                ]),
            ],
            Modal::Alert(message) => vec![
                Line::from(Span::styled(message.as_str(), Styles::error())),
                Line::default(),
                Line::from(vec![
                    Span::styled("[Esc]", Styles::active()),
                    Span::raw(" dismiss"),
                ]),
            ],
        }
    }
}

impl Widget for &Modal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let body = self.body();
        let width = area.width.clamp(20, 60).min(area.width);
        let height = (body.len() as u16 + 2).min(area.height);
        let popup = centered_rect(area, width, height);

        Clear.render(popup, buf);
        let block = Block::default()
            .title(self.title())
            .borders(Borders::ALL)
            .border_style(match self {
                Modal::ConfirmClear => Styles::active(),
                Modal::Alert(_) => Styles::error(),
            })
            .style(ratatui::style::Style::default().bg(Palette::BG));
        Paragraph::new(body).block(block).render(popup, buf);
    }
}

/// Center a `width` x `height` rectangle within `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(modal: &Modal, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        modal.render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_confirm_clear_contents() {
        let area = Rect::new(0, 0, 70, 12);
        let rendered = render_to_string(&Modal::ConfirmClear, area);
        assert!(rendered.contains("Clear the conversation history?"));
        assert!(rendered.contains("[Enter]"));
        assert!(rendered.contains("[Esc]"));
    }

    #[test]
    fn test_alert_shows_message() {
        let area = Rect::new(0, 0, 70, 12);
        let modal = Modal::Alert("Error clearing history: connection refused".into());
        let rendered = render_to_string(&modal, area);
        assert!(rendered.contains("Error clearing history"));
    }

    #[test]
    fn test_centered_rect_fits_area() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = centered_rect(area, 40, 6);
        assert_eq!(popup.width, 40);
        assert_eq!(popup.height, 6);
        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
    }
}
