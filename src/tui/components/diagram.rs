//! # Diagram Component
//!
//! Box-drawing schematics for each circuit. The adders are drawn by hand;
//! the routing and converter blocks are generated from their line labels so
//! every supported size gets a matching picture.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;

const HALF_ADDER: &str = "\
 A ──●──────────┐
     │          XOR ───── Sum
 B ──┼──●───────┘
     │  │
     └──┴────── AND ───── Carry";

const FULL_ADDER: &str = "\
        ┌─────┐  s1   ┌─────┐
  A ────┤     ├───────┤     ├────────── Sum
  B ────┤ HA  │ Cin ──┤ HA  │
        └──┬──┘       └──┬──┘
           │ c1          │ c2
           └───▶ OR ◀────┘
                 └──────────────────── Cout";

/// Longest line list drawn in full; longer lists keep their ends only.
const MAX_DRAWN_LINES: usize = 8;

pub fn half_adder() -> String {
    HALF_ADDER.to_string()
}

pub fn full_adder() -> String {
    FULL_ADDER.to_string()
}

/// Chain of `width` full adders, carry flowing right to left.
pub fn ripple_carry(width: usize) -> String {
    let stages: Vec<Option<usize>> = elide((0..width.max(1)).rev().collect());
    let mut chain = String::from(" Cout ◀─");
    let mut sums = String::from("        ");
    for stage in &stages {
        match stage {
            Some(i) => {
                let cell = format!(" [FA{i}] ");
                chain.push_str(&cell);
                chain.push_str("◀─");
                let label = format!("S{i}");
                sums.push_str(&format!("{:^w$}  ", label, w = cell.chars().count()));
            }
            None => {
                chain.push_str(" ··· ◀─");
                sums.push_str("       ");
            }
        }
    }
    chain.push_str(" 0");
    format!("{}\n{}", chain, sums.trim_end())
}

pub fn mux(select_bits: usize) -> String {
    let width = 1 << select_bits;
    block(
        &format!("{width}x1 MUX"),
        &labels("I", width),
        &["Y".to_string()],
        &(0..select_bits).rev().map(|i| format!("S{i}")).collect::<Vec<_>>(),
    )
}

pub fn demux(select_bits: usize) -> String {
    let width = 1 << select_bits;
    block(
        &format!("1x{width} DEMUX"),
        &["D".to_string()],
        &labels("Y", width),
        &(0..select_bits).rev().map(|i| format!("S{i}")).collect::<Vec<_>>(),
    )
}

pub fn decoder(address_bits: usize) -> String {
    let width = 1 << address_bits;
    let mut inputs = labels("A", address_bits);
    inputs.push("E".to_string());
    block(
        &format!("{address_bits}-to-{width} DECODER"),
        &inputs,
        &labels("Y", width),
        &[],
    )
}

pub fn encoder(address_bits: usize) -> String {
    let width = 1 << address_bits;
    block(
        &format!("{width}-to-{address_bits} ENCODER"),
        &labels("Y", width),
        &labels("A", address_bits),
        &[],
    )
}

fn labels(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}{i}")).collect()
}

/// Keep the first three and last two entries of a long list; `None` marks the gap.
fn elide<T>(items: Vec<T>) -> Vec<Option<T>> {
    if items.len() <= MAX_DRAWN_LINES {
        return items.into_iter().map(Some).collect();
    }
    let len = items.len();
    let mut out = Vec::with_capacity(6);
    for (i, item) in items.into_iter().enumerate() {
        if i < 3 || i >= len - 2 {
            out.push(Some(item));
        } else if i == 3 {
            out.push(None);
        }
    }
    out
}

/// A labelled box with input wires on the left, outputs on the right and
/// control lines hanging off the bottom.
fn block(title: &str, left: &[String], right: &[String], bottom: &[String]) -> String {
    let left = elide(left.to_vec());
    let right = elide(right.to_vec());

    let lw = left.iter().flatten().map(|l| l.len()).max().unwrap_or(0);
    let controls = bottom.join("  ");
    let inner = (title.len() + 4).max(controls.len() + 4).max(11);
    let rows = left.len().max(right.len()).max(1);
    let title_row = (rows - 1) / 2;
    let margin = " ".repeat(lw + 4);

    let mut lines = Vec::with_capacity(rows + 4);
    lines.push(format!("{margin}┌{}┐", "─".repeat(inner)));
    for row in 0..rows {
        let wire_in = match left.get(row) {
            Some(Some(label)) => format!("{label:>lw$} ───┤"),
            Some(None) => format!("{:>lw$}    ┆", "··"),
            None => format!("{margin}│"),
        };
        let body = if row == title_row {
            format!("{title:^inner$}")
        } else {
            " ".repeat(inner)
        };
        let wire_out = match right.get(row) {
            Some(Some(label)) => format!("├─── {label}"),
            Some(None) => "┆ ··".to_string(),
            None => "│".to_string(),
        };
        lines.push(format!("{wire_in}{body}{wire_out}"));
    }
    lines.push(format!("{margin}└{}┘", "─".repeat(inner)));

    if !bottom.is_empty() {
        let offset = lw + 5 + (inner - controls.len()) / 2;
        let mut pins = " ".repeat(offset);
        for (i, label) in bottom.iter().enumerate() {
            if i > 0 {
                pins.push_str("  ");
            }
            pins.push_str(&format!("{:^w$}", "│", w = label.len()));
        }
        lines.push(pins.trim_end().to_string());
        lines.push(format!("{}{}", " ".repeat(offset), controls));
    }
    lines.join("\n")
}

/// Bordered schematic panel.
pub struct Diagram {
    pub art: String,
}

impl Diagram {
    pub fn new(art: String) -> Self {
        Self { art }
    }

    pub fn height(&self) -> u16 {
        self.art.lines().count() as u16 + 2
    }
}

impl Component for Diagram {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Schematic ");
        let paragraph = Paragraph::new(self.art.as_str())
            .style(Style::default().fg(Color::Green))
            .block(block);
        frame.render_widget(paragraph, area);
    }
}
