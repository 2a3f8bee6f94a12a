use std::fs;
use std::path::{Path, PathBuf};

use indoc::indoc;

/// One binary variable, one operator `switch`, goal `var0=1`.
pub const SAS_TASK: &str = indoc! {"
    begin_version
    3
    end_version
    begin_metric
    0
    end_metric
    1
    begin_variable
    var0
    -1
    2
    Atom on(a)
    NegatedAtom on(a)
    end_variable
    0
    begin_state
    0
    end_state
    begin_goal
    1
    0 1
    end_goal
    1
    begin_operator
    switch
    0
    1
    0 0 0 1
    1
    end_operator
    0
"};

/// Domains `[2, 4]` with initial state `door=closed, room=value2`.
pub const JSON_TASK: &str = r#"{
    "variables": [
        { "name": "door", "values": ["open", "closed"] },
        { "name": "room", "values": 4 }
    ],
    "initial_state": [1, 2],
    "goal": [{ "var": 0, "value": 0 }],
    "operators": [
        {
            "name": "open door",
            "preconditions": [{ "var": 0, "value": 1 }],
            "effects": [{ "var": 0, "value": 0 }]
        }
    ]
}"#;

pub fn write_task(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}
