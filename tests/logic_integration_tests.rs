use binsim::Circuit;
use binsim::core::action::{Action, Effect, update};
use binsim::core::logic::truth_table::{decoder_table, encoder_table, full_adder_table};
use binsim::core::logic::{
    Bit, InputPolicy, decoder, demux, encoder, encoder_checked, full_adder, half_adder, mux,
    ripple_carry_adder, ripple_carry_adder_with,
};
use binsim::core::state::{App, View};
use proptest::prelude::*;

use Bit::{One, Zero};

// ============================================================================
// Helper Functions
// ============================================================================

/// LSB-first bits of `value`.
fn bits(value: usize, width: usize) -> Vec<Bit> {
    Bit::vec_from_value(value, width)
}

fn to_binary(value: u64, width: usize) -> String {
    format!("{:0width$b}", value, width = width)
}

// ============================================================================
// Adders
// ============================================================================

#[test]
fn test_ripple_carry_worked_example() {
    let result = ripple_carry_adder("1011", "0110");
    assert_eq!(result.result_bits, "10001");
    assert!(result.overflow);
    assert_eq!(result.carry_chain(), vec![Zero, Zero, One, One]);

    let stages: Vec<(Bit, Bit, Bit, Bit, Bit)> = result
        .steps
        .iter()
        .map(|s| (s.a, s.b, s.carry_in, s.sum, s.carry_out))
        .collect();
    assert_eq!(
        stages,
        vec![
            (One, Zero, Zero, One, Zero),
            (One, One, Zero, Zero, One),
            (Zero, One, One, Zero, One),
            (One, Zero, One, Zero, One),
        ]
    );
    assert_eq!(result.value(), Some(17));
}

#[test]
fn test_ripple_carry_pads_and_handles_empty() {
    assert_eq!(ripple_carry_adder("1", "0111").result_bits, "1000");
    let empty = ripple_carry_adder("", "");
    assert_eq!(empty.result_bits, "0");
    assert!(!empty.overflow);
}

#[test]
fn test_input_policy_end_to_end() {
    let permissive = ripple_carry_adder_with("1_0 1", "1", InputPolicy::Permissive).unwrap();
    assert_eq!(permissive.result_bits, "110");
    assert!(ripple_carry_adder_with("1_0 1", "1", InputPolicy::Strict).is_err());
}

#[test]
fn test_full_adder_table_matches_function() {
    for row in full_adder_table().rows {
        let (cin, a, b) = (row.inputs[0], row.inputs[1], row.inputs[2]);
        let r = full_adder(a, b, cin);
        assert_eq!(row.outputs, vec![r.sum, r.carry]);
    }
}

// ============================================================================
// Routing and conversion
// ============================================================================

#[test]
fn test_decoder_feeds_encoder() {
    for address_bits in 2..=3 {
        for index in 0..(1 << address_bits) {
            let address = bits(index, address_bits);
            let one_hot = decoder(&address, One);
            assert_eq!(encoder(&one_hot), address);
            assert_eq!(encoder_checked(&one_hot).unwrap(), address);
        }
    }
}

#[test]
fn test_generated_tables_are_complete() {
    assert_eq!(decoder_table(3).rows.len(), 1 + 8);
    assert_eq!(encoder_table(3).rows.len(), 8);
    let rendered = Circuit::HalfAdder.truth_table(None).unwrap().render_plain();
    assert!(rendered.starts_with("A  B | Sum  Carry"));
}

// ============================================================================
// Reducer
// ============================================================================

#[test]
fn test_reducer_session_across_views() {
    let mut app = App::new();
    assert_eq!(update(&mut app, Action::Navigate(View::Mux)), Effect::None);
    update(&mut app, Action::Grow);
    assert_eq!(app.mux.width(), 8);
    assert_eq!(app.status_message, "8x1 MUX");

    update(&mut app, Action::Navigate(View::RippleCarry));
    update(
        &mut app,
        Action::SetOperands {
            a: "0011".into(),
            b: "0001".into(),
        },
    );
    assert_eq!(app.status_message, "0011 + 0001 = 0100");
    assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_ripple_carry_matches_integer_addition(a in 0u64..(1 << 16), b in 0u64..(1 << 16)) {
        let result = ripple_carry_adder(&to_binary(a, 16), &to_binary(b, 16));
        prop_assert_eq!(result.value(), Some(u128::from(a + b)));
        prop_assert_eq!(result.overflow, a + b >= (1 << 16));
        prop_assert_eq!(result.width(), 16);
    }

    #[test]
    fn prop_half_adder_counts_ones(a in any::<bool>(), b in any::<bool>()) {
        let r = half_adder(Bit::from(a), Bit::from(b));
        let total = u8::from(a) + u8::from(b);
        prop_assert_eq!(u8::from(r.sum) + 2 * u8::from(r.carry), total);
    }

    #[test]
    fn prop_demux_then_mux_recovers_input(select_bits in 1usize..=4, index in 0usize..16, d in any::<bool>()) {
        let width = 1 << select_bits;
        let index = index % width;
        let selects = bits(index, select_bits);
        let outputs = demux(Bit::from(d), &selects, width);
        prop_assert_eq!(mux(&outputs, &selects), Bit::from(d));
        prop_assert_eq!(outputs.iter().filter(|b| b.is_set()).count(), usize::from(d));
    }
}
