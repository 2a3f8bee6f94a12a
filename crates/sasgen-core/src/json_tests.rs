use crate::{Fact, Task, TaskError, TaskModel};

#[test]
fn sized_and_named_domains() {
    let json = r#"{
        "variables": [
            { "name": "door", "values": ["open", "closed"] },
            { "name": "room", "values": 4 }
        ],
        "initial_state": [1, 0],
        "goal": [{ "var": 0, "value": 0 }]
    }"#;

    let task = Task::from_json(json).unwrap();

    assert_eq!(task.domain_sizes(), vec![2, 4]);
    assert_eq!(task.fact_name(Fact::new(0, 1)), "closed");
    assert_eq!(task.num_operators(), 0);
}

#[test]
fn operators_with_plain_and_conditional_effects() {
    let json = r#"{
        "variables": [
            { "name": "a", "values": 2 },
            { "name": "b", "values": 2 }
        ],
        "mutex_groups": [[{ "var": 0, "value": 1 }, { "var": 1, "value": 1 }]],
        "initial_state": [0, 0],
        "goal": [{ "var": 0, "value": 1 }],
        "operators": [
            {
                "name": "flip",
                "preconditions": [{ "var": 0, "value": 0 }],
                "effects": [
                    { "var": 0, "value": 1 },
                    { "fact": { "var": 1, "value": 0 }, "conditions": [{ "var": 1, "value": 1 }] }
                ],
                "cost": 2
            }
        ]
    }"#;

    let task = Task::from_json(json).unwrap();
    let op = task.operator(0);

    assert_eq!(op.name, "flip");
    assert_eq!(op.cost, 2);
    assert!(!op.effects[0].is_conditional());
    assert_eq!(op.effects[1].conditions, vec![Fact::new(1, 1)]);
    assert_eq!(task.mutex_facts(Fact::new(0, 1)), &[Fact::new(1, 1)]);
}

#[test]
fn validation_applies_to_json() {
    let json = r#"{
        "variables": [{ "name": "a", "values": 2 }],
        "initial_state": [0],
        "goal": [{ "var": 0, "value": 2 }]
    }"#;

    let err = Task::from_json(json).unwrap_err();
    assert!(matches!(err, TaskError::ValueOutOfBounds { value: 2, .. }));
}

#[test]
fn unknown_fields_are_rejected() {
    let json = r#"{
        "variables": [],
        "initial_state": [],
        "goal": [],
        "extra": true
    }"#;

    let err = Task::from_json(json).unwrap_err();
    assert!(matches!(err, TaskError::Json(_)));
}

#[test]
fn sized_domain_does_not_materialize_names() {
    let json = r#"{
        "variables": [{ "name": "wide", "values": 100000000000000 }],
        "initial_state": [0],
        "goal": [{ "var": 0, "value": 1 }]
    }"#;

    let task = Task::from_json(json).unwrap();

    assert_eq!(task.domain_size(0), 100_000_000_000_000);
    assert_eq!(task.fact_name(Fact::new(0, 99_999_999_999_999)), "value99999999999999");
}
