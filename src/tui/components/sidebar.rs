//! # Sidebar Component
//!
//! Page navigation, grouped the same way as the circuits themselves
//! (arithmetic, data flow, converters). The number in front of each entry
//! is its jump key.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};

use crate::core::state::View;
use crate::tui::component::Component;

pub const SIDEBAR_WIDTH: u16 = 22;

pub struct Sidebar {
    pub current: View,
}

impl Sidebar {
    pub fn new(current: View) -> Self {
        Self { current }
    }

    /// List entries with group headings; returns the items and the index of
    /// the current page among them.
    fn items(&self) -> (Vec<ListItem<'static>>, usize) {
        let mut items = Vec::new();
        let mut selected = 0;
        let mut group = "";
        for (i, view) in View::ALL.iter().enumerate() {
            if view.group() != group {
                group = view.group();
                if !items.is_empty() {
                    items.push(ListItem::new(Line::default()));
                }
                items.push(ListItem::new(Line::from(Span::styled(
                    group.to_uppercase(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
                ))));
            }
            if *view == self.current {
                selected = items.len();
            }
            items.push(ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(view.label()),
            ])));
        }
        (items, selected)
    }
}

impl Component for Sidebar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let (items, selected) = self.items();
        let block = Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
        let mut state = ListState::default().with_selected(Some(selected));
        frame.render_stateful_widget(list, area, &mut state);
    }
}
