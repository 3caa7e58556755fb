//! # Application State
//!
//! Everything the workbench remembers between key presses: which view is
//! open, which switch has focus, and the input lines of every circuit.
//! Outputs are never stored; they are recomputed from the inputs through
//! the logic core each time they are read.
//!
//! ```text
//! App
//! ├── view: View                 // current circuit page
//! ├── focus: usize               // focused toggle line in the view
//! ├── half / full                // adder inputs
//! ├── ripple: RippleInputs       // operand strings + last result
//! ├── mux / demux                // data + select lines, size
//! ├── decoder / encoder          // address / input lines, size
//! ├── status_message: String     // title bar text
//! └── error: Option<String>      // inline error for the current view
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::config::ResolvedConfig;
use crate::core::logic::{
    self, Bit, FullAdderResult, HalfAdderResult, InputPolicy, LogicError, RippleCarryResult,
};

/// Supported mux/demux select widths (2:1 up to 16:1).
pub const MUX_SELECT_BITS: std::ops::RangeInclusive<usize> = 1..=4;
/// Supported decoder address widths (2-to-4 up to 4-to-16).
pub const DECODER_ADDRESS_BITS: std::ops::RangeInclusive<usize> = 2..=4;
/// Supported encoder address widths (4-to-2 and 8-to-3).
pub const ENCODER_ADDRESS_BITS: std::ops::RangeInclusive<usize> = 2..=3;
/// Operand width limit for the ripple-carry page.
pub const DEFAULT_MAX_WIDTH: usize = 16;

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    HalfAdder,
    FullAdder,
    RippleCarry,
    Mux,
    Demux,
    Decoder,
    Encoder,
    Docs,
}

impl View {
    pub const ALL: [View; 8] = [
        View::HalfAdder,
        View::FullAdder,
        View::RippleCarry,
        View::Mux,
        View::Demux,
        View::Decoder,
        View::Encoder,
        View::Docs,
    ];

    pub fn label(self) -> &'static str {
        match self {
            View::HalfAdder => "Half Adder",
            View::FullAdder => "Full Adder",
            View::RippleCarry => "Ripple Carry",
            View::Mux => "Multiplexer",
            View::Demux => "Demultiplexer",
            View::Decoder => "Decoder",
            View::Encoder => "Encoder",
            View::Docs => "Documentation",
        }
    }

    /// Sidebar group heading.
    pub fn group(self) -> &'static str {
        match self {
            View::HalfAdder | View::FullAdder | View::RippleCarry => "Arithmetic",
            View::Mux | View::Demux => "Data Flow",
            View::Decoder | View::Encoder => "Converters",
            View::Docs => "Reference",
        }
    }

    pub fn index(self) -> usize {
        View::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn prev(self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }

    /// Parse a config/env value such as `"ripple-carry"` or `"mux"`.
    pub fn parse(name: &str) -> Option<View> {
        View::from_str(name.trim(), true).ok()
    }
}

// ============================================================================
// Toggle lines
// ============================================================================

/// An input wire the user can flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    HalfA,
    HalfB,
    FullA,
    FullB,
    FullCin,
    MuxData(usize),
    MuxSelect(usize),
    DemuxData,
    DemuxSelect(usize),
    DecoderEnable,
    DecoderAddress(usize),
    EncoderInput(usize),
}

impl Line {
    pub fn label(self) -> String {
        match self {
            Line::HalfA | Line::FullA => "A".into(),
            Line::HalfB | Line::FullB => "B".into(),
            Line::FullCin => "Cin".into(),
            Line::MuxData(i) => format!("I{i}"),
            Line::MuxSelect(i) | Line::DemuxSelect(i) => format!("S{i}"),
            Line::DemuxData => "D".into(),
            Line::DecoderEnable => "E".into(),
            Line::DecoderAddress(i) => format!("A{i}"),
            Line::EncoderInput(i) => format!("Y{i}"),
        }
    }
}

// ============================================================================
// Circuit inputs
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HalfAdderInputs {
    pub a: Bit,
    pub b: Bit,
}

impl HalfAdderInputs {
    pub fn output(&self) -> HalfAdderResult {
        logic::half_adder(self.a, self.b)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullAdderInputs {
    pub a: Bit,
    pub b: Bit,
    pub cin: Bit,
}

impl FullAdderInputs {
    pub fn output(&self) -> FullAdderResult {
        logic::full_adder(self.a, self.b, self.cin)
    }
}

#[derive(Debug, Clone)]
pub struct RippleInputs {
    pub a: String,
    pub b: String,
    pub policy: InputPolicy,
    pub max_width: usize,
    /// Last successful evaluation; `None` after a rejected operand.
    pub result: Option<RippleCarryResult>,
}

impl RippleInputs {
    pub fn new(a: &str, b: &str, policy: InputPolicy, max_width: usize) -> Self {
        let mut inputs = Self {
            a: a.to_string(),
            b: b.to_string(),
            policy,
            max_width,
            result: None,
        };
        // A bad configured default leaves the page without a result until
        // the operands are edited.
        if let Err(e) = inputs.evaluate() {
            log::warn!("Default operands rejected: {}", e);
        }
        inputs
    }

    /// Recompute `result` from the current operands.
    pub fn evaluate(&mut self) -> Result<(), LogicError> {
        self.result = None;
        for operand in [&self.a, &self.b] {
            let clean = logic::parse_operand(operand, self.policy)?;
            if clean.len() > self.max_width {
                return Err(LogicError::OperandTooWide {
                    width: clean.len(),
                    operand: clean,
                    limit: self.max_width,
                });
            }
        }
        let result = logic::ripple_carry_adder_with(&self.a, &self.b, self.policy)?;
        self.result = Some(result);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxInputs {
    pub select_bits: usize,
    pub data: Vec<Bit>,
    pub selects: Vec<Bit>,
}

impl MuxInputs {
    pub fn new(select_bits: usize) -> Self {
        Self {
            select_bits,
            data: vec![Bit::Zero; 1 << select_bits],
            selects: vec![Bit::Zero; select_bits],
        }
    }

    pub fn width(&self) -> usize {
        self.data.len()
    }

    pub fn index(&self) -> usize {
        logic::select_index(&self.selects).unwrap_or(0)
    }

    pub fn output(&self) -> Bit {
        logic::mux(&self.data, &self.selects)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemuxInputs {
    pub select_bits: usize,
    pub data: Bit,
    pub selects: Vec<Bit>,
}

impl DemuxInputs {
    pub fn new(select_bits: usize) -> Self {
        Self {
            select_bits,
            data: Bit::Zero,
            selects: vec![Bit::Zero; select_bits],
        }
    }

    pub fn width(&self) -> usize {
        1 << self.select_bits
    }

    pub fn index(&self) -> usize {
        logic::select_index(&self.selects).unwrap_or(0)
    }

    pub fn outputs(&self) -> Vec<Bit> {
        logic::demux(self.data, &self.selects, self.width())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderInputs {
    pub address_bits: usize,
    pub enable: Bit,
    pub address: Vec<Bit>,
}

impl DecoderInputs {
    pub fn new(address_bits: usize) -> Self {
        Self {
            address_bits,
            enable: Bit::One,
            address: vec![Bit::Zero; address_bits],
        }
    }

    pub fn index(&self) -> usize {
        logic::select_index(&self.address).unwrap_or(0)
    }

    pub fn outputs(&self) -> Vec<Bit> {
        logic::decoder(&self.address, self.enable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderInputs {
    pub address_bits: usize,
    /// The single asserted input line, if any.
    pub active: Option<usize>,
}

impl EncoderInputs {
    pub fn new(address_bits: usize) -> Self {
        Self {
            address_bits,
            active: None,
        }
    }

    pub fn width(&self) -> usize {
        1 << self.address_bits
    }

    pub fn lines(&self) -> Vec<Bit> {
        (0..self.width())
            .map(|i| Bit::from(self.active == Some(i)))
            .collect()
    }

    /// Encoded address, LSB first.
    pub fn address(&self) -> Vec<Bit> {
        logic::encoder(&self.lines())
    }

    pub fn valid(&self) -> Bit {
        logic::encoder_valid(&self.lines())
    }
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub view: View,
    pub focus: usize,
    pub half: HalfAdderInputs,
    pub full: FullAdderInputs,
    pub ripple: RippleInputs,
    pub mux: MuxInputs,
    pub demux: DemuxInputs,
    pub decoder: DecoderInputs,
    pub encoder: EncoderInputs,
    pub status_message: String,
    pub error: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self {
            view: View::default(),
            focus: 0,
            half: HalfAdderInputs::default(),
            full: FullAdderInputs::default(),
            ripple: RippleInputs::new("1011", "0110", InputPolicy::default(), DEFAULT_MAX_WIDTH),
            mux: MuxInputs::new(2),
            demux: DemuxInputs::new(2),
            decoder: DecoderInputs::new(2),
            encoder: EncoderInputs::new(2),
            status_message: String::from("Welcome to BinSim!"),
            error: None,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new();
        app.view = config.view;
        app.ripple = RippleInputs::new(
            &config.ripple_a,
            &config.ripple_b,
            config.input_policy,
            config.max_width,
        );
        app.mux = MuxInputs::new(config.mux_select_bits);
        app.demux = DemuxInputs::new(config.demux_select_bits);
        app.decoder = DecoderInputs::new(config.decoder_address_bits);
        app.encoder = EncoderInputs::new(config.encoder_address_bits);
        app
    }

    /// Toggle lines of the current view, in focus order.
    pub fn lines(&self) -> Vec<Line> {
        match self.view {
            View::HalfAdder => vec![Line::HalfA, Line::HalfB],
            View::FullAdder => vec![Line::FullA, Line::FullB, Line::FullCin],
            View::Mux => (0..self.mux.width())
                .map(Line::MuxData)
                .chain((0..self.mux.select_bits).rev().map(Line::MuxSelect))
                .collect(),
            View::Demux => std::iter::once(Line::DemuxData)
                .chain((0..self.demux.select_bits).rev().map(Line::DemuxSelect))
                .collect(),
            View::Decoder => std::iter::once(Line::DecoderEnable)
                .chain((0..self.decoder.address_bits).rev().map(Line::DecoderAddress))
                .collect(),
            View::Encoder => (0..self.encoder.width()).map(Line::EncoderInput).collect(),
            View::RippleCarry | View::Docs => Vec::new(),
        }
    }

    pub fn focused_line(&self) -> Option<Line> {
        self.lines().get(self.focus).copied()
    }

    /// Current value on an input line.
    pub fn line_value(&self, line: Line) -> Bit {
        match line {
            Line::HalfA => self.half.a,
            Line::HalfB => self.half.b,
            Line::FullA => self.full.a,
            Line::FullB => self.full.b,
            Line::FullCin => self.full.cin,
            Line::MuxData(i) => self.mux.data.get(i).copied().unwrap_or_default(),
            Line::MuxSelect(i) => self.mux.selects.get(i).copied().unwrap_or_default(),
            Line::DemuxData => self.demux.data,
            Line::DemuxSelect(i) => self.demux.selects.get(i).copied().unwrap_or_default(),
            Line::DecoderEnable => self.decoder.enable,
            Line::DecoderAddress(i) => self.decoder.address.get(i).copied().unwrap_or_default(),
            Line::EncoderInput(i) => Bit::from(self.encoder.active == Some(i)),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to BinSim!");
        assert_eq!(app.view, View::HalfAdder);
        assert!(app.error.is_none());
        let result = app.ripple.result.as_ref().unwrap();
        assert_eq!(result.result_bits, "10001");
    }

    #[test]
    fn test_view_cycle_wraps() {
        assert_eq!(View::HalfAdder.prev(), View::Docs);
        assert_eq!(View::Docs.next(), View::HalfAdder);
        assert_eq!(View::Mux.next(), View::Demux);
    }

    #[test]
    fn test_view_parse() {
        assert_eq!(View::parse("ripple-carry"), Some(View::RippleCarry));
        assert_eq!(View::parse(" MUX "), Some(View::Mux));
        assert_eq!(View::parse("alu"), None);
    }

    #[test]
    fn test_mux_lines_list_data_then_selects_msb_first() {
        let mut app = test_app();
        app.view = View::Mux;
        app.mux = MuxInputs::new(1);
        assert_eq!(
            app.lines(),
            vec![Line::MuxData(0), Line::MuxData(1), Line::MuxSelect(0)]
        );
    }

    #[test]
    fn test_ripple_rejects_wide_operands() {
        let mut ripple = RippleInputs::new("1", "1", InputPolicy::Permissive, 4);
        ripple.a = "10101".into();
        assert_eq!(
            ripple.evaluate(),
            Err(LogicError::OperandTooWide {
                operand: "10101".into(),
                width: 5,
                limit: 4,
            })
        );
        assert!(ripple.result.is_none());
    }

    #[test]
    fn test_ripple_strict_policy_error_message() {
        let mut ripple = RippleInputs::new("1", "1", InputPolicy::Strict, 16);
        ripple.b = "12".into();
        let err = ripple.evaluate().unwrap_err();
        assert!(matches!(
            err,
            LogicError::InvalidBinaryInput {
                position: 1,
                found: '2',
                ..
            }
        ));
        assert!(err.to_string().contains("'2' at position 1"));
    }

    #[test]
    fn test_encoder_inputs_one_hot() {
        let mut enc = EncoderInputs::new(2);
        assert_eq!(enc.valid(), Bit::Zero);
        enc.active = Some(3);
        assert_eq!(enc.address(), vec![Bit::One, Bit::One]);
        assert_eq!(enc.valid(), Bit::One);
    }
}
