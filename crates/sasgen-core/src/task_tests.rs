use crate::{Fact, Operator, Task, TaskBuilder, TaskError, TaskModel, Variable};

fn two_vars() -> TaskBuilder {
    Task::builder()
        .variable(Variable::new("a", 2))
        .variable(Variable::new("b", 3))
        .initial_state([0, 0])
        .goal([Fact::new(0, 1)])
}

#[test]
fn builds_valid_task() {
    let task = two_vars()
        .operator(Operator::new("op").with_precondition((0, 0)).with_effect((0, 1)))
        .build()
        .unwrap();

    assert_eq!(task.num_variables(), 2);
    assert_eq!(task.num_operators(), 1);
    assert_eq!(task.domain_size(1), 3);
    assert_eq!(task.operator(0).name, "op");
}

#[test]
fn goal_is_required() {
    let err = two_vars().goal([]).build().unwrap_err();
    assert!(matches!(err, TaskError::NoGoal));
}

#[test]
fn initial_state_must_cover_every_variable() {
    let err = two_vars().initial_state([0]).build().unwrap_err();
    assert!(matches!(
        err,
        TaskError::InitialState {
            found: 1,
            expected: 2
        }
    ));
}

#[test]
fn initial_value_out_of_bounds() {
    let err = two_vars().initial_state([0, 3]).build().unwrap_err();
    assert!(matches!(err, TaskError::ValueOutOfBounds { var: 1, value: 3, .. }));
}

#[test]
fn empty_domain_is_rejected() {
    let err = two_vars()
        .variable(Variable::new("c", 0))
        .initial_state([0, 0, 0])
        .build()
        .unwrap_err();
    assert!(matches!(err, TaskError::EmptyDomain { var: 2 }));
}

#[test]
fn operator_facts_are_checked() {
    let err = two_vars()
        .operator(Operator::new("bad").with_effect((5, 0)))
        .build()
        .unwrap_err();
    assert!(matches!(err, TaskError::VariableOutOfBounds { var: 5, .. }));
}

#[test]
fn mutex_facts_are_deduplicated_in_order() {
    let task = two_vars()
        .mutex_group([Fact::new(0, 1), Fact::new(1, 2), Fact::new(1, 0)])
        .mutex_group([Fact::new(0, 1), Fact::new(1, 2)])
        .build()
        .unwrap();

    assert_eq!(
        task.mutex_facts(Fact::new(0, 1)),
        &[Fact::new(1, 2), Fact::new(1, 0)]
    );
    // Same-variable pairs are implied, not stored.
    assert_eq!(task.mutex_facts(Fact::new(1, 2)), &[Fact::new(0, 1)]);
    assert!(task.are_mutex(Fact::new(1, 2), Fact::new(1, 0)));
    assert!(!task.are_mutex(Fact::new(1, 2), Fact::new(1, 2)));
}

#[test]
#[should_panic(expected = "operator 4 not found")]
fn missing_operator_panics() {
    let task = two_vars().build().unwrap();
    task.operator(4);
}
