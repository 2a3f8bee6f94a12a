use proptest::prelude::*;
use sasgen_core::{Fact, Operator, Task, TaskModel, Variable};

use crate::test_utils::{RelaxedGraph, arb_task, relaxed_program, scenario_task, search_program};
use crate::{Layout, LayoutConfig};

#[test]
fn search_program_counts() {
    let program = search_program(&scenario_task());

    assert_eq!(program.word_count, 1);
    assert_eq!(program.operators.len(), 1);
    assert_eq!(program.initial_state, vec![0]);
}

#[test]
fn relaxed_program_counts() {
    let program = relaxed_program(&scenario_task());

    assert_eq!(program.word_count, 1);
    assert_eq!(program.fact_count, 6);
    assert_eq!(program.conversions[1].offset, 2);
    assert!(program.is_goal_fact(1));
    assert!(!program.is_goal_fact(4));
}

#[test]
fn conversion_marks_layer_zero() {
    let program = relaxed_program(&scenario_task());
    let graph = RelaxedGraph::new(&program, &[0b101]);

    assert_eq!(graph.state, vec![0b010010]);
    assert_eq!(graph.fact_membership, vec![-1, 0, -1, -1, 0, -1]);
}

#[test]
#[should_panic(expected = "value 3 outside domain of size 3")]
fn conversion_rejects_value_outside_domain() {
    let task = Task::builder()
        .variable(Variable::new("x", 3))
        .initial_state([0])
        .goal([Fact::new(0, 2)])
        .build()
        .unwrap();
    let program = relaxed_program(&task);
    let mut one_hot = vec![0; program.word_count];

    // Two packed bits can hold 3, which names no value.
    program.conversions[0].apply(&[0b11], &mut one_hot);
}

#[test]
fn scenario_layers() {
    let program = relaxed_program(&scenario_task());
    let mut graph = RelaxedGraph::new(&program, &[0b000]);

    assert!(graph.next_layer(0));
    assert_eq!(graph.state, vec![0b010111]);
    assert_eq!(graph.action_membership, vec![0]);
    assert_eq!(graph.fact_membership, vec![0, 1, 0, -1, 1, -1]);
    assert_eq!(graph.achieving_action, vec![-1, 0, -1, -1, 0, -1]);
    assert_eq!(graph.goal_layers, vec![vec![1]]);

    assert!(!graph.next_layer(1));
    assert_eq!(graph.goal_layers, vec![vec![1], vec![]]);
}

#[test]
fn first_achiever_wins() {
    let task = Task::builder()
        .variable(Variable::new("x", 2))
        .initial_state([0])
        .goal([Fact::new(0, 1)])
        .operator(Operator::new("first").with_effect((0, 1)))
        .operator(Operator::new("second").with_effect((0, 1)))
        .build()
        .unwrap();
    let program = relaxed_program(&task);
    let mut graph = RelaxedGraph::new(&program, &[0]);

    graph.next_layer(0);

    assert_eq!(graph.action_membership, vec![0, 0]);
    assert_eq!(graph.achieving_action[1], 0);
    assert_eq!(graph.goal_layers, vec![vec![1]]);
}

proptest! {
    #[test]
    fn memberships_never_change_once_set(task in arb_task()) {
        let program = relaxed_program(&task);
        let packed = Layout::for_task(&task, LayoutConfig::packed()).unwrap();
        let initial = packed.encode(task.initial_state()).unwrap();
        let mut graph = RelaxedGraph::new(&program, &initial);

        for layer in 0..=task.num_operators() as i32 {
            let facts = graph.fact_membership.clone();
            let actions = graph.action_membership.clone();
            let state = graph.state.clone();

            let admitted = graph.next_layer(layer);

            for (before, after) in facts.iter().zip(&graph.fact_membership) {
                if *before != -1 {
                    prop_assert_eq!(before, after);
                }
            }
            for (before, after) in actions.iter().zip(&graph.action_membership) {
                if *before != -1 {
                    prop_assert_eq!(before, after);
                }
            }
            for (before, after) in state.iter().zip(&graph.state) {
                prop_assert_eq!(before & !after, 0);
            }
            if !admitted {
                break;
            }
        }

        for (fact, &layer) in graph.fact_membership.iter().enumerate() {
            prop_assert_eq!(graph.achieving_action[fact] != -1, layer > 0);
        }
    }
}
