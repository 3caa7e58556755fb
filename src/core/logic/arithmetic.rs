//! # Arithmetic Circuits
//!
//! Half adder, full adder and the N-bit ripple-carry adder built from them.

use serde::{Deserialize, Serialize};

use super::{Bit, LogicError};

// ── Half adder ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HalfAdderResult {
    pub sum: Bit,
    pub carry: Bit,
}

/// SUM = A XOR B, CARRY = A AND B.
pub fn half_adder(a: Bit, b: Bit) -> HalfAdderResult {
    HalfAdderResult {
        sum: a ^ b,
        carry: a & b,
    }
}

// ── Full adder ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FullAdderResult {
    pub sum: Bit,
    pub carry: Bit,
}

/// Two half adders in series. The carry-out is set if either stage carried,
/// i.e. `COUT = (A AND B) OR (CIN AND (A XOR B))`.
pub fn full_adder(a: Bit, b: Bit, cin: Bit) -> FullAdderResult {
    let first = half_adder(a, b);
    let second = half_adder(first.sum, cin);
    FullAdderResult {
        sum: second.sum,
        carry: first.carry | second.carry,
    }
}

// ── Ripple-carry adder ──────────────────────────────────────────────────────

/// How operand strings with characters other than '0'/'1' are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputPolicy {
    /// Silently drop anything that is not '0' or '1'. Forgiving, but
    /// "1 0 1" and "1a01" both become "101".
    #[default]
    Permissive,
    /// Reject the operand with `LogicError::InvalidBinaryInput`.
    Strict,
}

impl InputPolicy {
    pub fn label(self) -> &'static str {
        match self {
            InputPolicy::Permissive => "permissive",
            InputPolicy::Strict => "strict",
        }
    }
}

/// One full-adder stage of a ripple-carry evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdderStep {
    /// Bit position, 0 = LSB.
    pub index: usize,
    pub a: Bit,
    pub b: Bit,
    pub carry_in: Bit,
    pub sum: Bit,
    pub carry_out: Bit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RippleCarryResult {
    /// MSB-first sum, with a leading '1' when the final stage carried out.
    pub result_bits: String,
    /// Stages in evaluation order (LSB first).
    pub steps: Vec<AdderStep>,
    pub overflow: bool,
}

impl RippleCarryResult {
    /// Operand width W (number of full-adder stages).
    pub fn width(&self) -> usize {
        self.steps.len()
    }

    /// Carry-in seen by each stage, LSB first.
    pub fn carry_chain(&self) -> Vec<Bit> {
        self.steps.iter().map(|s| s.carry_in).collect()
    }

    /// The sum as an integer; `None` past 128 bits.
    pub fn value(&self) -> Option<u128> {
        parse_binary(&self.result_bits)
    }
}

/// Parse an MSB-first binary string. Empty parses as 0.
pub fn parse_binary(bits: &str) -> Option<u128> {
    bits.chars().try_fold(0u128, |acc, c| {
        let bit = Bit::try_from(c).ok()?;
        acc.checked_mul(2)?.checked_add(u128::from(u8::from(bit)))
    })
}

/// Clean an operand according to `policy`, returning only '0'/'1' chars.
pub fn parse_operand(raw: &str, policy: InputPolicy) -> Result<String, LogicError> {
    match policy {
        InputPolicy::Permissive => Ok(raw.chars().filter(|c| matches!(c, '0' | '1')).collect()),
        InputPolicy::Strict => {
            if let Some((position, found)) =
                raw.chars().enumerate().find(|(_, c)| !matches!(c, '0' | '1'))
            {
                return Err(LogicError::InvalidBinaryInput {
                    input: raw.to_string(),
                    position,
                    found,
                });
            }
            Ok(raw.to_string())
        }
    }
}

/// Add two MSB-first binary strings with the permissive policy.
///
/// Never fails: invalid characters are stripped, the shorter operand is
/// zero-extended, and two empty operands sum to "0".
pub fn ripple_carry_adder(bin_a: &str, bin_b: &str) -> RippleCarryResult {
    let a = parse_operand(bin_a, InputPolicy::Permissive).unwrap_or_default();
    let b = parse_operand(bin_b, InputPolicy::Permissive).unwrap_or_default();
    ripple(&a, &b)
}

/// Add two MSB-first binary strings under an explicit input policy.
pub fn ripple_carry_adder_with(
    bin_a: &str,
    bin_b: &str,
    policy: InputPolicy,
) -> Result<RippleCarryResult, LogicError> {
    let a = parse_operand(bin_a, policy)?;
    let b = parse_operand(bin_b, policy)?;
    Ok(ripple(&a, &b))
}

/// Chain full adders LSB → MSB over two clean operands.
fn ripple(clean_a: &str, clean_b: &str) -> RippleCarryResult {
    let width = clean_a.len().max(clean_b.len());
    if width == 0 {
        return RippleCarryResult {
            result_bits: "0".to_string(),
            steps: Vec::new(),
            overflow: false,
        };
    }

    let a = lsb_first(clean_a, width);
    let b = lsb_first(clean_b, width);

    let mut steps = Vec::with_capacity(width);
    let mut carry = Bit::Zero;
    for (index, (&bit_a, &bit_b)) in a.iter().zip(&b).enumerate() {
        let stage = full_adder(bit_a, bit_b, carry);
        steps.push(AdderStep {
            index,
            a: bit_a,
            b: bit_b,
            carry_in: carry,
            sum: stage.sum,
            carry_out: stage.carry,
        });
        carry = stage.carry;
    }

    let overflow = carry.is_set();
    let mut result_bits = String::with_capacity(width + 1);
    if overflow {
        result_bits.push('1');
    }
    result_bits.extend(steps.iter().rev().map(|s| s.sum.as_char()));

    RippleCarryResult {
        result_bits,
        steps,
        overflow,
    }
}

/// Zero-extend a clean MSB-first operand to `width` and flip it to LSB-first.
fn lsb_first(clean: &str, width: usize) -> Vec<Bit> {
    let mut bits: Vec<Bit> = clean
        .chars()
        .rev()
        .map(|c| Bit::from(c == '1'))
        .collect();
    bits.resize(width, Bit::Zero);
    bits
}
