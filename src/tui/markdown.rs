//! Markdown → ratatui `Text` renderer for the documentation page.
//!
//! Covers what the docs are written in: headings, paragraphs, emphasis,
//! inline code, lists and fenced blocks. A fence's info string is
//! `<lang> <caption>`; the caption goes into the block's top border. Blocks
//! fenced as ```` ```bits ```` get signal colouring: standalone `1`s lit,
//! `0`s dimmed, digits inside labels such as `S1` left alone.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};

use crate::core::logic::Bit;
use crate::tui::components::bit_row::bit_style;

/// Fence language that switches on bit colouring.
pub const BITS_LANG: &str = "bits";

/// Parse markdown content into styled `Text` using BinSim's color scheme.
///
/// Returns owned text (`'static`) so callers aren't constrained by input lifetime.
pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut w = Writer::new(base_fg);
    for event in Parser::new_ext(content, Options::empty()) {
        w.handle(event);
    }
    w.text
}

// ── Writer ──────────────────────────────────────────────────────────────────

struct Writer {
    text: Text<'static>,
    base_fg: Color,
    /// Inline style stack (bold, italic, heading text, etc.). Styles compose
    /// via `patch` so nested bold+italic works.
    styles: Vec<Style>,
    /// Prefix for every pushed line (the `│ ` border inside a fenced block).
    line_prefix: Option<Span<'static>>,
    /// List nesting: None = unordered, Some(n) = ordered at index n.
    list_indices: Vec<Option<u64>>,
    /// Fenced code block currently open, if any.
    code: Option<CodeStyle>,
    /// Whether the next block element should be preceded by a blank line.
    needs_newline: bool,
}

impl Writer {
    fn new(base_fg: Color) -> Self {
        Self {
            text: Text::default(),
            base_fg,
            styles: vec![],
            line_prefix: None,
            list_indices: vec![],
            code: None,
            needs_newline: false,
        }
    }

    // ── Style helpers ───────────────────────────────────────────────────

    /// Current effective style: top of stack, or base foreground color.
    fn style(&self) -> Style {
        self.styles
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    /// Push a style that composes with the current one (inherits parent modifiers).
    fn push_style(&mut self, overlay: Style) {
        self.styles.push(self.style().patch(overlay));
    }

    fn pop_style(&mut self) {
        self.styles.pop();
    }

    // ── Line/span helpers ───────────────────────────────────────────────

    fn push_line(&mut self, mut line: Line<'static>) {
        if let Some(prefix) = &self.line_prefix {
            line.spans.insert(0, prefix.clone());
        }
        self.text.lines.push(line);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if let Some(line) = self.text.lines.last_mut() {
            line.push_span(span);
        } else {
            self.push_line(Line::from(vec![span]));
        }
    }

    fn blank_line_if_needed(&mut self) {
        if self.needs_newline {
            self.push_line(Line::default());
            self.needs_newline = false;
        }
    }

    // ── Event dispatch ──────────────────────────────────────────────────

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(t) => self.text(t),
            Event::Code(c) => self.inline_code(c),
            Event::SoftBreak => self.push_span(Span::raw(" ")),
            Event::HardBreak => self.push_line(Line::default()),
            _ => {}
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        match tag {
            // ── Block elements ──────────────────────────────────────────
            Tag::Paragraph => {
                self.blank_line_if_needed();
                self.push_line(Line::default());
            }
            Tag::Heading { level, .. } => {
                self.blank_line_if_needed();
                let hs = heading_style(self.base_fg, level);
                let depth = heading_depth(level) as usize;
                self.push_line(Line::from(Span::styled(
                    format!("{} ", "#".repeat(depth)),
                    hs,
                )));
                // Heading text inherits the heading style, not just the `##`.
                self.push_style(hs);
            }
            Tag::CodeBlock(kind) => {
                if !self.text.lines.is_empty() {
                    self.push_line(Line::default());
                }
                let info = match &kind {
                    CodeBlockKind::Fenced(l) => l.as_ref(),
                    CodeBlockKind::Indented => "",
                };
                let (lang, caption) = info.split_once(' ').unwrap_or((info, ""));
                let border = Style::default().fg(Color::DarkGray);
                let mut top = vec![Span::styled("╭──", border)];
                if !caption.trim().is_empty() {
                    top.push(Span::styled(
                        format!(" {} ", caption.trim()),
                        border.add_modifier(Modifier::BOLD),
                    ));
                    top.push(Span::styled("──", border));
                }
                self.push_line(Line::from(top));
                self.line_prefix = Some(Span::styled("│ ", border));
                self.code = Some(if lang == BITS_LANG {
                    CodeStyle::Bits
                } else {
                    CodeStyle::Plain
                });
            }
            Tag::List(start) => {
                if self.list_indices.is_empty() {
                    self.blank_line_if_needed();
                }
                self.list_indices.push(start);
            }
            Tag::Item => {
                self.push_line(Line::default());
                let depth = self.list_indices.len().saturating_sub(1);
                let indent = "  ".repeat(depth);
                if let Some(idx) = self.list_indices.last_mut() {
                    let marker = match idx {
                        None => format!("{indent}- "),
                        Some(n) => {
                            let s = format!("{indent}{}. ", n);
                            *n += 1;
                            s
                        }
                    };
                    self.push_span(Span::styled(
                        marker,
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }

            // ── Inline elements ─────────────────────────────────────────
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            _ => {}
        }
    }

    fn close(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.needs_newline = true,
            TagEnd::Heading(_) => {
                self.pop_style();
                self.needs_newline = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.line_prefix = None;
                self.push_line(Line::from(Span::styled(
                    "╰──",
                    Style::default().fg(Color::DarkGray),
                )));
                self.needs_newline = true;
            }
            TagEnd::List(_) => {
                self.list_indices.pop();
                self.needs_newline = true;
            }
            TagEnd::Item => {}
            TagEnd::Emphasis | TagEnd::Strong => self.pop_style(),
            _ => {}
        }
    }

    // ── Content handlers ────────────────────────────────────────────────

    fn text(&mut self, cow: CowStr<'_>) {
        // ratatui draws a tab as zero width
        let text = cow.replace('\t', "    ");
        match self.code {
            Some(style) => {
                for line in text.lines() {
                    let line = match style {
                        CodeStyle::Bits => bits_line(line),
                        CodeStyle::Plain => Line::styled(line.to_owned(), CODE_FG),
                    };
                    self.push_line(line);
                }
            }
            None => {
                let style = self.style();
                self.push_span(Span::styled(text, style));
            }
        }
    }

    fn inline_code(&mut self, cow: CowStr<'_>) {
        self.push_span(Span::styled(cow.to_string(), CODE_FG.bg(Color::DarkGray)));
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum CodeStyle {
    Plain,
    Bits,
}

const CODE_FG: Style = Style::new().fg(Color::White);

/// Split a line into runs, colouring standalone `0`/`1` digits as signal
/// levels. A digit right after a letter is part of a label (`S1`, `Y0`).
fn bits_line(line: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut in_label = false;
    for c in line.chars() {
        match Bit::try_from(c) {
            Ok(bit) if !in_label => {
                if !run.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut run), CODE_FG));
                }
                spans.push(Span::styled(c.to_string(), bit_style(bit)));
            }
            _ => {
                in_label = c.is_alphanumeric() && (in_label || c.is_alphabetic());
                run.push(c);
            }
        }
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, CODE_FG));
    }
    Line::from(spans)
}

fn heading_style(base_fg: Color, level: HeadingLevel) -> Style {
    match level {
        HeadingLevel::H1 => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        HeadingLevel::H2 => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD),
        _ => Style::default()
            .fg(base_fg)
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_text_inherits_heading_style() {
        let text = render("## Hello", Color::Blue);
        // Line 0 should contain "## " and "Hello", both with bold + blue
        let line = &text.lines[0];
        assert!(line.spans.len() >= 2, "expected >= 2 spans, got {:?}", line);
        let prefix_style = line.spans[0].style;
        let text_style = line.spans[1].style;
        // Both should have BOLD and blue foreground
        assert!(prefix_style.add_modifier.contains(Modifier::BOLD));
        assert!(text_style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(text_style.fg, Some(Color::Blue));
    }

    #[test]
    fn bold_text_is_bold() {
        let text = render("Some **bold** text", Color::Blue);
        let line = &text.lines[0];
        // Find the "bold" span
        let bold_span = line.spans.iter().find(|s| s.content == "bold").unwrap();
        assert!(bold_span.style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn inline_code_styled() {
        let text = render("Use `foo()` here", Color::Blue);
        let line = &text.lines[0];
        let code_span = line.spans.iter().find(|s| s.content == "foo()").unwrap();
        assert_eq!(code_span.style.fg, Some(Color::White));
        assert_eq!(code_span.style.bg, Some(Color::DarkGray));
    }

    #[test]
    fn code_block_has_border_structure() {
        let text = render("```\nline1\nline2\n```", Color::Blue);
        let all_content: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect();
        // Top border
        assert!(all_content[0].starts_with('╭'), "expected top border, got {:?}", all_content[0]);
        // Content lines with left border
        assert!(all_content[1].starts_with("│ "), "expected │ prefix, got {:?}", all_content[1]);
        assert!(all_content[1].contains("line1"));
        assert!(all_content[2].starts_with("│ "), "expected │ prefix, got {:?}", all_content[2]);
        assert!(all_content[2].contains("line2"));
        // Bottom border
        let last = all_content.last().unwrap();
        assert!(last.starts_with('╰'), "expected bottom border, got {:?}", last);
    }

    #[test]
    fn bits_block_colours_digits() {
        let text = render("```bits Half Adder\nA B\n0 1\n```", Color::Blue);
        let top: String = text.lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(top, "╭── Half Adder ──");
        let row = &text.lines[2];
        let one = row.spans.iter().find(|s| s.content == "1").unwrap();
        assert_eq!(one.style.fg, Some(Color::Green));
        let zero = row.spans.iter().find(|s| s.content == "0").unwrap();
        assert_eq!(zero.style.fg, Some(Color::DarkGray));
    }

    #[test]
    fn bits_line_keeps_separators() {
        let line = bits_line("10 | 1");
        let joined: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(joined, "10 | 1");
        assert_eq!(line.spans.len(), 4);
    }

    #[test]
    fn bits_line_skips_label_digits() {
        let line = bits_line("S1  S0 | I0");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].style, CODE_FG);
    }

    #[test]
    fn fence_without_caption_has_bare_border() {
        let text = render("```bits
1
```", Color::Blue);
        let top: String = text.lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(top, "╭──");
    }

    #[test]
    fn plain_text_uses_base_color() {
        let text = render("hello", Color::Green);
        let line = &text.lines[0];
        let span = &line.spans[0];
        assert_eq!(span.style.fg, Some(Color::Green));
    }

    #[test]
    fn tabs_expanded_to_spaces() {
        let text = render("```\n\tindented\n```", Color::Blue);
        let has_spaces = text.lines.iter().any(|l| {
            l.spans.iter().any(|s| s.content.starts_with("    "))
        });
        assert!(has_spaces, "tabs should be expanded to 4 spaces");
        let has_tabs = text.lines.iter().any(|l| {
            l.spans.iter().any(|s| s.content.contains('\t'))
        });
        assert!(!has_tabs, "no raw tabs should remain");
    }
}
