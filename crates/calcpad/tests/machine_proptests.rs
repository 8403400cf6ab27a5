//! Property-based tests for the expression state machine

use calcpad::prelude::*;
use proptest::prelude::*;

// ===== Strategy definitions =====

/// Generate any valid digit (0-9)
fn digit_strategy() -> impl Strategy<Value = u8> {
    0u8..=9u8
}

/// Generate any operator
fn operator_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        Just(Operation::Add),
        Just(Operation::Subtract),
        Just(Operation::Multiply),
        Just(Operation::Divide),
        Just(Operation::Modulo),
    ]
}

/// Generate any input event
fn event_strategy() -> impl Strategy<Value = InputEvent> {
    prop_oneof![
        4 => digit_strategy().prop_map(InputEvent::Digit),
        1 => Just(InputEvent::Decimal),
        2 => operator_strategy().prop_map(InputEvent::Operator),
        1 => Just(InputEvent::Compute),
        1 => Just(InputEvent::DeleteLast),
        1 => Just(InputEvent::Clear),
    ]
}

/// Generate an integer numeral without a leading zero
fn operand_strategy() -> impl Strategy<Value = String> {
    "[1-9][0-9]{0,8}"
}

fn type_numeral(state: &mut CalculatorState, numeral: &str) {
    for c in numeral.chars() {
        state.append_digit_or_decimal(c).unwrap();
    }
}

/// Evaluates with two passes: `* / %` left to right, then `+ -` left to right
fn reference_eval(operands: &[f64], operators: &[Operation]) -> f64 {
    let mut terms = vec![operands[0]];
    let mut additive = Vec::new();
    for (op, value) in operators.iter().zip(&operands[1..]) {
        if op.precedence() == 2 {
            let last = terms.last_mut().unwrap();
            *last = op.apply(*last, *value);
        } else {
            additive.push(*op);
            terms.push(*value);
        }
    }
    additive
        .iter()
        .zip(&terms[1..])
        .fold(terms[0], |acc, (op, value)| op.apply(acc, *value))
}

// ===== Operand entry properties =====

proptest! {
    /// Typing digits from a cleared state yields exactly those digits
    #[test]
    fn prop_digit_accumulation(numeral in operand_strategy()) {
        let mut state = CalculatorState::new();
        type_numeral(&mut state, &numeral);
        prop_assert_eq!(state.current_input(), numeral.as_str());
    }

    /// Any number of decimal points leaves exactly one
    #[test]
    fn prop_decimal_idempotence(numeral in operand_strategy(), dots in 1usize..6) {
        let mut state = CalculatorState::new();
        type_numeral(&mut state, &numeral);
        for _ in 0..dots {
            state.append_digit_or_decimal('.').unwrap();
        }
        prop_assert_eq!(state.current_input().matches('.').count(), 1);
        prop_assert_eq!(state.current_input(), format!("{numeral}."));
    }

    /// Deleting n characters leaves the prefix, floored at the placeholder
    #[test]
    fn prop_delete_last_floor(numeral in operand_strategy(), n in 0usize..12) {
        let mut state = CalculatorState::new();
        type_numeral(&mut state, &numeral);
        for _ in 0..n {
            state.delete_last();
        }
        let expected = if n >= numeral.len() {
            "0".to_string()
        } else {
            numeral[..numeral.len() - n].to_string()
        };
        prop_assert_eq!(state.current_input(), expected.as_str());
    }
}

// ===== Evaluation properties =====

proptest! {
    /// Computing a typed expression matches the two-pass reference evaluation
    #[test]
    fn prop_precedence_matches_reference(
        first in 1u32..1000,
        rest in prop::collection::vec((operator_strategy(), 1u32..1000), 1..6),
    ) {
        let mut state = CalculatorState::new();
        type_numeral(&mut state, &first.to_string());
        for (op, operand) in &rest {
            state.choose_operator(*op);
            type_numeral(&mut state, &operand.to_string());
        }

        let outcome = state.compute();

        let mut operands = vec![f64::from(first)];
        operands.extend(rest.iter().map(|(_, v)| f64::from(*v)));
        let operators: Vec<Operation> = rest.iter().map(|(op, _)| *op).collect();
        let expected = reference_eval(&operands, &operators);

        prop_assert_eq!(outcome, ComputeOutcome::Computed(expected));
        let shown: f64 = state.current_input().parse().unwrap();
        prop_assert_eq!(shown, expected);
        prop_assert_eq!(state.expression_history(), "");
    }

    /// Computing twice in a row never changes a successful result
    #[test]
    fn prop_compute_is_idempotent_after_success(
        a in 1u32..1000,
        op in operator_strategy(),
        b in 1u32..1000,
    ) {
        let mut state = CalculatorState::new();
        type_numeral(&mut state, &a.to_string());
        state.choose_operator(op);
        type_numeral(&mut state, &b.to_string());
        state.compute();
        let first = state.current_input().to_string();
        state.compute();
        prop_assert_eq!(state.current_input(), first.as_str());
    }
}

// ===== Invariant properties =====

proptest! {
    /// Invariants hold after any sequence of events
    #[test]
    fn prop_invariants_hold(events in prop::collection::vec(event_strategy(), 0..40)) {
        let mut state = CalculatorState::new();
        for event in events {
            let display = dispatch(&mut state, event);

            prop_assert!(state.current_input().matches('.').count() <= 1);

            if state.has_error() {
                prop_assert_eq!(state.current_input(), "Error");
                prop_assert_eq!(display, DisplayOutput::new("Error", ""));
                prop_assert_eq!(state.phase(), Phase::Error);
            }

            let history = state.expression_history();
            if !history.is_empty() {
                let mut tail = history.rsplit(' ');
                prop_assert_eq!(tail.next(), Some(""));
                let symbol = tail.next().unwrap_or_default();
                prop_assert!(Operation::from_symbol(symbol).is_some(), "history {:?}", history);
            }
        }
    }

    /// Clear always restores the initial state
    #[test]
    fn prop_clear_resets(events in prop::collection::vec(event_strategy(), 0..40)) {
        let mut state = CalculatorState::new();
        for event in events {
            dispatch(&mut state, event);
        }
        state.clear();
        prop_assert_eq!(state, CalculatorState::new());
    }
}
