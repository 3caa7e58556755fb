//! # Logic Core
//!
//! Pure combinational-logic primitives. Every function here is stateless:
//! same inputs, same outputs, no I/O.
//!
//! ```text
//!   half_adder ──► full_adder ──► ripple_carry_adder     (arithmetic)
//!   select_index ──► mux / demux                         (routing)
//!   decoder ◄──── inverse ────► encoder                  (conversion)
//! ```
//!
//! Bit vectors are `&[Bit]` with index 0 as the least significant bit.
//! The one exception is the ripple-carry operand strings, which are written
//! the way humans write binary numbers (MSB first).

pub mod arithmetic;
pub mod conversion;
pub mod routing;
pub mod truth_table;

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

use serde::{Serialize, Serializer};

pub use arithmetic::{
    AdderStep, FullAdderResult, HalfAdderResult, InputPolicy, RippleCarryResult, full_adder,
    half_adder, parse_binary, parse_operand, ripple_carry_adder, ripple_carry_adder_with,
};
pub use conversion::{decoder, encoder, encoder_checked, encoder_valid};
pub use routing::{demux, mux, select_index, selects_for};
pub use truth_table::{TruthRow, TruthTable};

/// Widest address the decoder accepts (2^16 output lines).
pub const MAX_ADDRESS_BITS: usize = 16;

// ============================================================================
// Bit
// ============================================================================

/// A single binary digit. The only two values a wire can carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bit {
    #[default]
    Zero,
    One,
}

impl Bit {
    pub fn is_set(self) -> bool {
        self == Bit::One
    }

    /// Flip the bit (what a toggle switch does).
    pub fn toggle(self) -> Self {
        !self
    }

    /// Bits of `value`, LSB first, exactly `width` long.
    pub fn vec_from_value(value: usize, width: usize) -> Vec<Bit> {
        (0..width)
            .map(|i| Bit::from(i < usize::BITS as usize && (value >> i) & 1 == 1))
            .collect()
    }

    /// Render an LSB-first vector the way it is written on paper (MSB first).
    pub fn vec_to_string(bits: &[Bit]) -> String {
        bits.iter().rev().map(|b| b.as_char()).collect()
    }

    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_set()
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        match bit {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl TryFrom<char> for Bit {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            other => Err(other),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(if self.is_set() { "1" } else { "0" })
    }
}

// Serialized as the integer 0/1 so JSON output reads like a truth table.
impl Serialize for Bit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*self))
    }
}

impl Not for Bit {
    type Output = Bit;

    fn not(self) -> Bit {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl BitAnd for Bit {
    type Output = Bit;

    fn bitand(self, rhs: Bit) -> Bit {
        Bit::from(self.is_set() && rhs.is_set())
    }
}

impl BitOr for Bit {
    type Output = Bit;

    fn bitor(self, rhs: Bit) -> Bit {
        Bit::from(self.is_set() || rhs.is_set())
    }
}

impl BitXor for Bit {
    type Output = Bit;

    fn bitxor(self, rhs: Bit) -> Bit {
        Bit::from(self != rhs)
    }
}

// ============================================================================
// Error Type
// ============================================================================

/// Conditions the logic core reports instead of silently tolerating.
///
/// Only the opt-in strict entry points and the ripple-carry width check
/// produce these; the default functions are total over their input domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicError {
    /// A ripple-carry operand contained something other than '0' or '1'.
    InvalidBinaryInput {
        input: String,
        /// Character index (not byte offset) of the first offending char.
        position: usize,
        found: char,
    },
    /// An operand that is wider than the adder after cleaning.
    OperandTooWide {
        operand: String,
        width: usize,
        limit: usize,
    },
    /// An encoder input was not one-hot.
    NotOneHot { asserted: usize },
}

impl fmt::Display for LogicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicError::InvalidBinaryInput {
                input,
                position,
                found,
            } => write!(
                f,
                "invalid binary input {input:?}: {found:?} at position {position} (only 0 and 1 allowed)"
            ),
            LogicError::OperandTooWide {
                operand,
                width,
                limit,
            } => write!(f, "operand {operand:?} is {width} bits wide (limit {limit})"),
            LogicError::NotOneHot { asserted: 0 } => {
                write!(f, "encoder input is not one-hot: no line asserted")
            }
            LogicError::NotOneHot { asserted } => write!(
                f,
                "encoder input is not one-hot: {asserted} lines asserted"
            ),
        }
    }
}

impl std::error::Error for LogicError {}
