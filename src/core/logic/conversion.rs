//! # Code Converters
//!
//! Decoder (binary address → one-hot lines) and encoder (one-hot lines →
//! binary address). Addresses are LSB-first, like select lines.

use super::{Bit, LogicError, MAX_ADDRESS_BITS, routing::select_index};

/// Number of address bits needed to name `lines` input lines.
fn address_width(lines: usize) -> usize {
    match lines {
        0 | 1 => 0,
        n => n.next_power_of_two().trailing_zeros() as usize,
    }
}

/// n-to-2^n decoder with an active-high enable.
///
/// Disabled: every output is 0. Enabled: exactly the addressed output is 1.
/// An address wider than [`MAX_ADDRESS_BITS`] yields no outputs.
pub fn decoder(address: &[Bit], enable: Bit) -> Vec<Bit> {
    if address.len() > MAX_ADDRESS_BITS {
        return Vec::new();
    }

    let mut outputs = vec![Bit::Zero; 1 << address.len()];
    if enable.is_set()
        && let Some(slot) = select_index(address).and_then(|i| outputs.get_mut(i))
    {
        *slot = Bit::One;
    }
    outputs
}

/// 2^n-to-n encoder built from OR gates.
///
/// Address bit `k` is the OR of every input line whose index has bit `k` set
/// (for 4-to-2: `A0 = Y1 | Y3`, `A1 = Y2 | Y3`). With several lines asserted
/// the result is the bitwise OR of their addresses, not a priority pick; use
/// [`encoder_checked`] to reject such input instead.
pub fn encoder(inputs: &[Bit]) -> Vec<Bit> {
    (0..address_width(inputs.len()))
        .map(|k| {
            inputs
                .iter()
                .enumerate()
                .filter(|(line, _)| (line >> k) & 1 == 1)
                .fold(Bit::Zero, |acc, (_, &bit)| acc | bit)
        })
        .collect()
}

/// [`encoder`] with the one-hot precondition enforced.
pub fn encoder_checked(inputs: &[Bit]) -> Result<Vec<Bit>, LogicError> {
    let asserted = inputs.iter().filter(|b| b.is_set()).count();
    if asserted != 1 {
        return Err(LogicError::NotOneHot { asserted });
    }
    Ok(encoder(inputs))
}

/// The "valid" output of an encoder chip: 1 if any line is asserted, which is
/// the only way to tell "line 0" from "nothing".
pub fn encoder_valid(inputs: &[Bit]) -> Bit {
    inputs.iter().fold(Bit::Zero, |acc, &bit| acc | bit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::logic::routing::selects_for;
    use Bit::{One, Zero};
    use proptest::prelude::*;

    #[test]
    fn test_decoder_disabled_is_all_zero() {
        assert_eq!(decoder(&[One, One], Zero), vec![Zero; 4]);
    }

    #[test]
    fn test_decoder_enabled_is_one_hot() {
        assert_eq!(decoder(&[Zero, One], One), vec![Zero, Zero, One, Zero]);
        assert_eq!(decoder(&[], One), vec![One]);
    }

    #[test]
    fn test_decoder_too_wide_yields_nothing() {
        assert_eq!(decoder(&vec![Zero; MAX_ADDRESS_BITS], One).len(), 1 << 16);
        assert!(decoder(&vec![Zero; MAX_ADDRESS_BITS + 1], One).is_empty());
        // Wide enough to overflow an allocation if it were attempted.
        assert!(decoder(&vec![One; 48], One).is_empty());
        assert!(decoder(&vec![Zero; usize::BITS as usize], One).is_empty());
    }

    #[test]
    fn test_encoder_4_to_2_gates() {
        assert_eq!(encoder(&[Zero, Zero, Zero, One]), vec![One, One]);
        assert_eq!(encoder(&[Zero, One, Zero, Zero]), vec![One, Zero]);
        assert_eq!(encoder(&[Zero, Zero, One, Zero]), vec![Zero, One]);
        assert_eq!(encoder(&[One, Zero, Zero, Zero]), vec![Zero, Zero]);
    }

    #[test]
    fn test_encoder_8_to_3_gates() {
        let mut lines = vec![Zero; 8];
        lines[5] = One;
        assert_eq!(encoder(&lines), vec![One, Zero, One]);
    }

    #[test]
    fn test_encoder_multi_hot_is_or_combination() {
        // Lines 1 and 2 asserted: 01 | 10 = 11, not a priority pick of 2.
        assert_eq!(encoder(&[Zero, One, One, Zero]), vec![One, One]);
    }

    #[test]
    fn test_encoder_non_power_of_two_width() {
        // 5 lines need 3 address bits.
        assert_eq!(encoder(&[Zero, Zero, Zero, Zero, One]), vec![Zero, Zero, One]);
        assert!(encoder(&[One]).is_empty());
        assert!(encoder(&[]).is_empty());
    }

    #[test]
    fn test_encoder_checked_rejects_non_one_hot() {
        assert_eq!(
            encoder_checked(&[Zero, One, One, Zero]),
            Err(LogicError::NotOneHot { asserted: 2 })
        );
        assert_eq!(
            encoder_checked(&[Zero; 4]),
            Err(LogicError::NotOneHot { asserted: 0 })
        );
        assert_eq!(encoder_checked(&[Zero, Zero, One, Zero]), Ok(vec![Zero, One]));
    }

    #[test]
    fn test_encoder_valid_bit() {
        assert_eq!(encoder_valid(&[Zero; 4]), Zero);
        assert_eq!(encoder_valid(&[One, Zero, Zero, Zero]), One);
    }

    proptest! {
        #[test]
        fn prop_decoder_output_is_one_hot(address_bits in 0usize..=4, raw in 0usize..16) {
            let index = raw % (1 << address_bits);
            let outputs = decoder(&selects_for(index, address_bits), One);
            prop_assert_eq!(outputs.len(), 1 << address_bits);
            prop_assert_eq!(outputs.iter().filter(|b| b.is_set()).count(), 1);
            prop_assert_eq!(outputs[index], One);
        }

        #[test]
        fn prop_encoder_inverts_decoder(address_bits in 1usize..=4, raw in 0usize..16) {
            let index = raw % (1 << address_bits);
            let address = selects_for(index, address_bits);
            let encoded = encoder_checked(&decoder(&address, One)).unwrap();
            prop_assert_eq!(select_index(&encoded), Some(index));
            prop_assert_eq!(encoded, address);
        }
    }
}
