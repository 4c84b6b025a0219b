//! Transcript pane: the scrollable conversation thread.
//!
//! Renders messages with a role symbol, markup-styled text wrapped to the
//! pane width, up to three citation lines, and an HH:MM time label. An
//! in-flight request shows as an animated typing indicator.

use crate::ui::theme::{Styles, Symbols};
use confab_client::{format_markup, Entry, MarkupSpan, MarkupStyle, Message, Role, Session};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Indent for continuation and metadata lines, matching the role symbol.
const INDENT: &str = "  ";

/// Scrollable transcript widget.
pub struct TranscriptPane<'a> {
    session: &'a Session,
    tick: usize,
    scroll: usize,
}

impl<'a> TranscriptPane<'a> {
    /// Create a transcript pane.
    ///
    /// `scroll` counts display lines up from the bottom; zero keeps the
    /// newest entry visible (the thread follows new messages).
    pub fn new(session: &'a Session, tick: usize, scroll: usize) -> Self {
        Self {
            session,
            tick,
            scroll,
        }
    }

    /// Build every display line at the given width.
    fn build_lines(&self, width: usize) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for (i, entry) in self.session.entries().iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            match entry {
                Entry::Message(message) => lines.extend(message_lines(message, width)),
                Entry::Loading { .. } => lines.push(typing_line(self.tick)),
            }
        }

        lines
    }
}

impl Widget for TranscriptPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 1 || area.height < 1 {
            return;
        }

        let lines = self.build_lines(area.width as usize);
        let height = area.height as usize;

        let visible: Vec<Line<'static>> = if lines.len() > height {
            let max_scroll = lines.len() - height;
            let start = max_scroll - self.scroll.min(max_scroll);
            lines.into_iter().skip(start).take(height).collect()
        } else {
            lines
        };

        Paragraph::new(visible).render(area, buf);
    }
}

/// Render one message into display lines.
fn message_lines(message: &Message, width: usize) -> Vec<Line<'static>> {
    let (symbol, accent) = match message.role {
        Role::User => (Symbols::USER, Styles::user()),
        Role::Assistant => (Symbols::ASSISTANT, Styles::assistant()),
    };

    let text_width = width.saturating_sub(INDENT.len()).max(1);
    let mut lines = Vec::new();
    let mut first = true;

    for markup_line in format_markup(&message.text) {
        for wrapped in wrap_markup_line(&markup_line, text_width) {
            let mut spans = if first {
                first = false;
                vec![Span::styled(symbol, accent)]
            } else {
                vec![Span::raw(INDENT)]
            };
            spans.extend(
                wrapped
                    .into_iter()
                    .map(|s| Span::styled(s.text, span_style(s.style))),
            );
            lines.push(Line::from(spans));
        }
    }

    if !message.citations.is_empty() {
        let header = if message.used_search {
            "Sources used:"
        } else {
            "Sources:"
        };
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(header, Styles::dim()),
        ]));
        for citation in &message.citations {
            lines.push(Line::from(vec![
                Span::raw(INDENT),
                Span::styled(Symbols::SOURCE, Styles::dim()),
                Span::styled(citation.label.clone(), Styles::link()),
                Span::raw(" "),
                Span::styled(format!("({})", citation.link), Styles::dim()),
            ]));
        }
    }

    lines.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled(message.time_str(), Styles::dim()),
    ]));

    lines
}

/// The animated typing-indicator line for a loading placeholder.
fn typing_line(tick: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(Symbols::ASSISTANT, Styles::assistant()),
        Span::styled(Symbols::TYPING[tick % Symbols::TYPING.len()], Styles::dim()),
    ])
}

fn span_style(style: MarkupStyle) -> Style {
    match style {
        MarkupStyle::Plain => Styles::default(),
        MarkupStyle::Bold => Styles::bold(),
        MarkupStyle::Italic => Styles::italic(),
    }
}

/// Greedy word-wrap over styled spans.
///
/// Word boundaries never split a style run incorrectly: each output span
/// keeps its input style. Words longer than the width are hard-split.
fn wrap_markup_line(spans: &[MarkupSpan], width: usize) -> Vec<Vec<MarkupSpan>> {
    if width == 0 {
        return vec![spans.to_vec()];
    }

    let mut lines: Vec<Vec<MarkupSpan>> = Vec::new();
    let mut current: Vec<MarkupSpan> = Vec::new();
    let mut current_width = 0usize;

    for span in spans {
        for token in tokens(&span.text) {
            let is_space = token.chars().all(char::is_whitespace);
            let token_width = token.width();

            if current_width + token_width > width && current_width > 0 {
                trim_trailing_space(&mut current);
                lines.push(std::mem::take(&mut current));
                current_width = 0;
                // Whitespace at a break point disappears into the break
                if is_space {
                    continue;
                }
            }

            if token_width > width {
                for piece in hard_split(token, width) {
                    if current_width > 0 {
                        trim_trailing_space(&mut current);
                        lines.push(std::mem::take(&mut current));
                        current_width = 0;
                    }
                    current_width = piece.width();
                    push_span(&mut current, piece, span.style);
                }
            } else {
                current_width += token_width;
                push_span(&mut current, token.to_string(), span.style);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split text into alternating word and whitespace tokens.
fn tokens(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (i, ch) in text.char_indices() {
        let is_space = ch.is_whitespace();
        if let Some(prev) = in_space {
            if prev != is_space {
                out.push(&text[start..i]);
                start = i;
            }
        }
        in_space = Some(is_space);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Split an over-long word into width-sized pieces.
fn hard_split(token: &str, width: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0usize;

    for ch in token.chars() {
        let ch_width = ch.to_string().width();
        if piece_width + ch_width > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push(ch);
        piece_width += ch_width;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Drop whitespace left at the end of a line being flushed at a break.
fn trim_trailing_space(line: &mut Vec<MarkupSpan>) {
    while let Some(last) = line.last_mut() {
        let kept = last.text.trim_end().len();
        if kept == 0 {
            line.pop();
        } else {
            last.text.truncate(kept);
            break;
        }
    }
}

fn push_span(line: &mut Vec<MarkupSpan>, text: String, style: MarkupStyle) {
    // Merge adjacent same-style runs to keep span counts small
    if let Some(last) = line.last_mut() {
        if last.style == style {
            last.text.push_str(&text);
            return;
        }
    }
    line.push(MarkupSpan { text, style });
}
