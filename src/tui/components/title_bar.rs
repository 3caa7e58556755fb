//! # TitleBar Component
//!
//! Top status bar: application name, current page and the latest status
//! message from the reducer (e.g. `"8x1 MUX"`, `"0011 + 0001 = 0100"`).
//!
//! Purely presentational. It receives all data as props:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.view.label(), &app.status_message, app.ripple.policy);
//! title_bar.render(frame, title_area);
//! ```
//!
//! When the status message only repeats the page name it is left out, so the
//! bar reads `"BinSim | Multiplexer"` rather than `"BinSim | Multiplexer | Multiplexer"`.

use crate::core::logic::InputPolicy;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct TitleBar {
    /// Current page label (e.g. "Full Adder")
    pub view_label: String,
    /// Status message (e.g. "Resized circuit", "4-to-2 ENCODER")
    pub status_message: String,
    /// Operand policy, shown only when strict
    pub policy: InputPolicy,
}

impl TitleBar {
    pub fn new(view_label: &str, status_message: &str, policy: InputPolicy) -> Self {
        Self {
            view_label: view_label.to_string(),
            status_message: status_message.to_string(),
            policy,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("BinSim | {}", self.view_label);
        if !self.status_message.is_empty() && self.status_message != self.view_label {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.policy == InputPolicy::Strict {
            text.push_str(" | strict");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new("Multiplexer", "8x1 MUX", InputPolicy::Permissive);
        let text = rendered(&mut title_bar);
        assert!(text.starts_with("BinSim | Multiplexer | 8x1 MUX"));
        assert!(!text.contains("strict"));
    }

    #[test]
    fn test_title_bar_skips_repeated_label() {
        let mut title_bar = TitleBar::new("Decoder", "Decoder", InputPolicy::Permissive);
        assert_eq!(title_bar.text(), "BinSim | Decoder");
        title_bar.status_message.clear();
        assert!(!rendered(&mut title_bar).contains("| |"));
    }

    #[test]
    fn test_title_bar_shows_strict_policy() {
        let title_bar = TitleBar::new("Ripple Carry", "", InputPolicy::Strict);
        assert_eq!(title_bar.text(), "BinSim | Ripple Carry | strict");
    }
}
