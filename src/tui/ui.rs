//! Top-level frame layout.
//!
//! ```text
//! BinSim | Multiplexer | 8x1 MUX                  ← title bar (1 row)
//! ┌──────────────┬──────────────────────────────┐
//! │ ARITHMETIC   │                              │
//! │ 1 Half Adder │        current page          │
//! │ ...          │                              │
//! └──────────────┴──────────────────────────────┘
//! ←/→ focus  Space toggle  ...                   ← key hints (1 row)
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::state::{App, View};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{SIDEBAR_WIDTH, Sidebar, TitleBar};
use crate::tui::views::draw_view;

/// Key hints for the footer.
pub fn help_text(view: View) -> &'static str {
    match view {
        View::RippleCarry => {
            "type 0/1  ↑/↓ field  Enter add  Ctrl+R random  Tab page  Esc quit"
        }
        View::Docs => "↑/↓ PgUp/PgDn scroll  1-8 page  Tab page  Esc quit",
        View::HalfAdder | View::FullAdder => {
            "←/→ focus  Space toggle  1-8 page  Tab page  Esc quit"
        }
        View::Mux | View::Demux | View::Decoder | View::Encoder => {
            "←/→ focus  Space toggle  [/] size  1-8 page  Tab page  Esc quit"
        }
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, body_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [sidebar_area, main_area] = Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)])
        .spacing(1)
        .areas(body_area);

    TitleBar::new(app.view.label(), &app.status_message, app.ripple.policy)
        .render(frame, title_area);
    Sidebar::new(app.view).render(frame, sidebar_area);
    draw_view(frame, main_area, app, tui);

    frame.render_widget(
        Span::styled(help_text(app.view), Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App) -> Vec<String> {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new(app);
        terminal.draw(|f| draw_ui(f, app, &mut tui)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_frame_has_title_sidebar_and_help() {
        let app = test_app();
        let rows = screen(&app);
        assert!(rows[0].starts_with("BinSim | Half Adder | Welcome to BinSim!"));
        assert!(rows.iter().any(|r| r.contains("1 Half Adder")));
        assert!(rows[29].contains("Space toggle"));
        assert!(!rows[29].contains("[/] size"));
    }

    #[test]
    fn test_help_text_per_view() {
        assert!(help_text(View::Mux).contains("[/] size"));
        assert!(help_text(View::RippleCarry).contains("Ctrl+R"));
        assert!(help_text(View::Docs).contains("scroll"));
    }

    #[test]
    fn test_page_drawn_beside_sidebar() {
        let mut app = test_app();
        app.view = View::Encoder;
        let rows = screen(&app);
        let schematic = rows.iter().find(|r| r.contains("Schematic")).unwrap();
        let column = schematic.find("Schematic").unwrap();
        assert!(column > SIDEBAR_WIDTH as usize);
    }
}
