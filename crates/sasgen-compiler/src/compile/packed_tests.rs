use proptest::prelude::*;
use sasgen_core::{Fact, Operator, TaskModel};

use crate::compile::{PackedOperator, WordMask, compile_packed_goal, masks_hold};
use crate::test_utils::{arb_task, scenario_task, search_program};
use crate::{Error, Layout, LayoutConfig, WidthPolicy};

fn two_bit_words() -> LayoutConfig {
    LayoutConfig {
        word_bits: 2,
        policy: WidthPolicy::Packed,
    }
}

#[test]
fn scenario_precondition_and_effect() {
    let program = search_program(&scenario_task());
    let op = &program.operators[0];

    assert_eq!(op.name, "switch");
    assert_eq!(
        op.preconditions.get(&0),
        Some(&WordMask {
            mask: 0b1,
            value: 0b0
        })
    );
    assert_eq!(
        op.effects.get(&0),
        Some(&WordMask {
            mask: !0b111,
            value: 0b101
        })
    );
    assert_eq!(op.guard, None);
}

#[test]
fn scenario_successor_reaches_goal() {
    let program = search_program(&scenario_task());
    let op = &program.operators[0];

    assert_eq!(program.initial_state, vec![0b000]);
    assert!(op.is_applicable(&program.initial_state));

    let next = op.apply(&program.initial_state);
    assert_eq!(next, vec![0b101]);
    assert!(masks_hold(&program.goal, &next));
    assert!(!op.is_applicable(&next));
}

#[test]
fn facts_on_one_word_merge() {
    let task = scenario_task();
    let layout = Layout::for_task(&task, LayoutConfig::packed()).unwrap();
    let op = Operator::new("both")
        .with_precondition((0, 1))
        .with_precondition((1, 3))
        .with_effect((1, 0));

    let compiled = PackedOperator::compile(&task, &layout, &op).unwrap();

    assert_eq!(compiled.preconditions.len(), 1);
    assert_eq!(
        compiled.preconditions[&0],
        WordMask {
            mask: 0b111,
            value: 0b111
        }
    );
    // Clearing var1 and writing 0 leaves only var0's bit.
    assert_eq!(compiled.apply(&[0b111]), vec![0b001]);
}

#[test]
fn goal_words_in_first_touch_order() {
    let layout = Layout::allocate(&[4, 4], two_bit_words()).unwrap();
    let goal = compile_packed_goal(&[Fact::new(1, 1), Fact::new(0, 3)], &layout).unwrap();

    let words: Vec<_> = goal.iter().map(|(&w, &m)| (w, m.mask, m.value)).collect();
    assert_eq!(words, vec![(1, 0b11, 0b01), (0, 0b11, 0b11)]);
}

#[test]
fn untouched_words_are_copied() {
    let task = scenario_task();
    let layout = Layout::allocate(&[4, 4], two_bit_words()).unwrap();
    let op = Operator::new("second").with_effect((1, 2));

    let compiled = PackedOperator::compile(&task, &layout, &op).unwrap();

    assert!(!compiled.effects.contains_key(&0));
    assert_eq!(compiled.apply(&[0b11, 0b01]), vec![0b11, 0b10]);
}

#[test]
fn empty_goal() {
    let layout = Layout::allocate(&[2], LayoutConfig::packed()).unwrap();
    let err = compile_packed_goal(&[], &layout).unwrap_err();

    assert!(matches!(err, Error::EmptyGoal));
}

#[test]
fn fact_outside_layout() {
    let layout = Layout::allocate(&[2, 4], LayoutConfig::packed()).unwrap();

    for fact in [Fact::new(1, 4), Fact::new(2, 0)] {
        let err = compile_packed_goal(&[fact], &layout).unwrap_err();
        assert!(matches!(err, Error::FactOutOfBounds { fact: f } if f == fact));
    }
}

#[test]
fn goal_accepts_exactly_matching_states() {
    let layout = Layout::allocate(&[2, 3], LayoutConfig::packed()).unwrap();
    let goal = compile_packed_goal(&[Fact::new(0, 1), Fact::new(1, 0)], &layout).unwrap();

    for a in 0..2 {
        for b in 0..3 {
            let words = layout.encode(&[a, b]).unwrap();
            assert_eq!(masks_hold(&goal, &words), a == 1 && b == 0, "state ({a}, {b})");
        }
    }
}

proptest! {
    #[test]
    fn effects_leave_untouched_words_and_fields_alone(task in arb_task(), noise in any::<u64>()) {
        let program = search_program(&task);
        let layout = Layout::for_task(&task, LayoutConfig::packed()).unwrap();
        let words: Vec<u64> = program.initial_state.iter().map(|w| w ^ noise).collect();

        for (i, op) in program.operators.iter().enumerate() {
            let next = op.apply(&words);
            for w in 0..words.len() {
                if !op.effects.contains_key(&w) {
                    prop_assert_eq!(next[w], words[w]);
                }
            }

            let written: Vec<usize> = task.operator(i).effect_facts().map(|f| f.var).collect();
            for (var, slot) in layout.slots().iter().enumerate() {
                if !written.contains(&var) {
                    prop_assert_eq!(slot.extract(&next), slot.extract(&words));
                }
            }
        }
    }
}
