//! Lightweight message markup.
//!
//! Assistant replies may carry a tiny markdown subset: literal newlines,
//! `**bold**`, and `*italic*`. [`format_markup`] resolves it into styled
//! spans in a fixed order (newline, then bold, then italic). The transform
//! must be applied exactly once per message; re-formatting already-styled
//! text is not supported.

/// Emphasis applied to a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupStyle {
    /// No emphasis.
    Plain,
    /// Strong emphasis (`**text**`).
    Bold,
    /// Emphasis (`*text*`).
    Italic,
}

/// A run of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSpan {
    /// Span text, without marker characters.
    pub text: String,
    /// Style for the whole span.
    pub style: MarkupStyle,
}

impl MarkupSpan {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: MarkupStyle::Plain,
        }
    }

    fn styled(text: impl Into<String>, style: MarkupStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Format message text into lines of styled spans.
///
/// Each element of the outer vector is one display line. Unterminated
/// markers are rendered literally.
pub fn format_markup(text: &str) -> Vec<Vec<MarkupSpan>> {
    text.split('\n').map(format_line).collect()
}

/// Resolve `**bold**` and `*italic*` markers within a single line.
///
/// At each marker position a bold pair is tried before an italic pair,
/// matching the fixed transform order. The nearest closing marker wins.
fn format_line(line: &str) -> Vec<MarkupSpan> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    loop {
        let Some(star) = rest.find('*') else {
            plain.push_str(rest);
            break;
        };

        plain.push_str(&rest[..star]);
        let at_marker = &rest[star..];

        if let Some(inner) = at_marker.strip_prefix("**") {
            if let Some(end) = inner.find("**") {
                flush_plain(&mut spans, &mut plain);
                push_styled(&mut spans, &inner[..end], MarkupStyle::Bold);
                rest = &inner[end + 2..];
                continue;
            }
        }

        if let Some(inner) = at_marker.strip_prefix('*') {
            if let Some(end) = inner.find('*') {
                flush_plain(&mut spans, &mut plain);
                push_styled(&mut spans, &inner[..end], MarkupStyle::Italic);
                rest = &inner[end + 1..];
                continue;
            }
        }

        // Lone marker with no closing pair: keep it literal.
        plain.push('*');
        rest = &at_marker[1..];
    }

    flush_plain(&mut spans, &mut plain);
    spans
}

fn flush_plain(spans: &mut Vec<MarkupSpan>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(MarkupSpan::plain(std::mem::take(plain)));
    }
}

fn push_styled(spans: &mut Vec<MarkupSpan>, text: &str, style: MarkupStyle) {
    if !text.is_empty() {
        spans.push(MarkupSpan::styled(text, style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(spans: &[MarkupSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_plain_text_single_line() {
        let lines = format_markup("hello world");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0], vec![MarkupSpan::plain("hello world")]);
    }

    #[test]
    fn test_newline_then_bold_then_italic() {
        // The fixed-order transform: "a\n**b**\n*c*" yields three lines
        // with b bold and c italic.
        let lines = format_markup("a\n**b**\n*c*");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], vec![MarkupSpan::plain("a")]);
        assert_eq!(
            lines[1],
            vec![MarkupSpan::styled("b", MarkupStyle::Bold)]
        );
        assert_eq!(
            lines[2],
            vec![MarkupSpan::styled("c", MarkupStyle::Italic)]
        );
    }

    #[test]
    fn test_mixed_styles_in_one_line() {
        let lines = format_markup("see **the docs** and *examples* too");
        assert_eq!(
            lines[0],
            vec![
                MarkupSpan::plain("see "),
                MarkupSpan::styled("the docs", MarkupStyle::Bold),
                MarkupSpan::plain(" and "),
                MarkupSpan::styled("examples", MarkupStyle::Italic),
                MarkupSpan::plain(" too"),
            ]
        );
    }

    #[test]
    fn test_unterminated_markers_stay_literal() {
        let lines = format_markup("price is *about right");
        assert_eq!(line_text(&lines[0]), "price is *about right");
        assert!(lines[0].iter().all(|s| s.style == MarkupStyle::Plain));
    }

    #[test]
    fn test_bold_takes_precedence_over_italic() {
        let lines = format_markup("**b**");
        assert_eq!(
            lines[0],
            vec![MarkupSpan::styled("b", MarkupStyle::Bold)]
        );
    }

    #[test]
    fn test_empty_lines_preserved() {
        let lines = format_markup("first\n\nthird");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn test_empty_input() {
        let lines = format_markup("");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }
}
