//! JSON task descriptions.
//!
//! A hand-writable alternative to the translator's `.sas` output. Facts are
//! objects `{"var": 0, "value": 1}`; a variable's domain is either a size or a
//! list of value names.

use serde::Deserialize;

use crate::{Effect, Fact, Operator, Task, TaskError, Variable};

impl Task {
    /// Parse and validate a task from its JSON description.
    pub fn from_json(json: &str) -> Result<Self, TaskError> {
        let raw: RawTask = serde_json::from_str(json)?;
        raw.into_task()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTask {
    variables: Vec<RawVariable>,
    #[serde(default)]
    use_metric: bool,
    #[serde(default)]
    mutex_groups: Vec<Vec<Fact>>,
    initial_state: Vec<usize>,
    goal: Vec<Fact>,
    #[serde(default)]
    operators: Vec<RawOperator>,
    #[serde(default)]
    axioms: Vec<RawOperator>,
}

#[derive(Debug, Deserialize)]
struct RawVariable {
    name: String,
    values: RawDomain,
    #[serde(default = "no_axiom_layer")]
    axiom_layer: i32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDomain {
    Size(usize),
    Names(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct RawOperator {
    name: String,
    #[serde(default)]
    preconditions: Vec<Fact>,
    #[serde(default)]
    effects: Vec<RawEffect>,
    #[serde(default = "unit_cost")]
    cost: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEffect {
    Plain(Fact),
    Conditional { fact: Fact, conditions: Vec<Fact> },
}

fn no_axiom_layer() -> i32 {
    -1
}

fn unit_cost() -> u32 {
    1
}

impl RawTask {
    fn into_task(self) -> Result<Task, TaskError> {
        let mut builder = Task::builder()
            .use_metric(self.use_metric)
            .initial_state(self.initial_state)
            .goal(self.goal);

        for raw in self.variables {
            let mut variable = match raw.values {
                RawDomain::Size(size) => Variable::new(raw.name, size),
                RawDomain::Names(names) => Variable::with_values(raw.name, names),
            };
            variable.axiom_layer = raw.axiom_layer;
            builder = builder.variable(variable);
        }
        for group in self.mutex_groups {
            builder = builder.mutex_group(group);
        }
        for op in self.operators {
            builder = builder.operator(op.into());
        }
        for axiom in self.axioms {
            builder = builder.axiom(axiom.into());
        }

        builder.build()
    }
}

impl From<RawOperator> for Operator {
    fn from(raw: RawOperator) -> Self {
        Self {
            name: raw.name,
            preconditions: raw.preconditions,
            effects: raw.effects.into_iter().map(Effect::from).collect(),
            cost: raw.cost,
        }
    }
}

impl From<RawEffect> for Effect {
    fn from(raw: RawEffect) -> Self {
        match raw {
            RawEffect::Plain(fact) => Effect::new(fact),
            RawEffect::Conditional { fact, conditions } => Effect { fact, conditions },
        }
    }
}
