//! Validated task storage and its builder.

use std::borrow::Cow;

use indexmap::{IndexMap, IndexSet};

use crate::{Fact, Operator, TaskError, TaskModel, Variable};

/// A validated grounded task.
///
/// Construct through [`TaskBuilder`], [`Task::from_sas`](crate::sas) or
/// [`Task::from_json`].
#[derive(Clone, Debug)]
pub struct Task {
    variables: Vec<Variable>,
    use_metric: bool,
    mutex_groups: Vec<Vec<Fact>>,
    /// Fact -> facts on other variables sharing a mutex group with it.
    /// Facts in no group are absent.
    mutexes: IndexMap<Fact, Vec<Fact>>,
    initial_state: Vec<usize>,
    goal: Vec<Fact>,
    operators: Vec<Operator>,
    axioms: Vec<Operator>,
}

impl Task {
    pub fn builder() -> TaskBuilder {
        TaskBuilder::new()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, var: usize) -> &Variable {
        self.ensure_variable(var)
    }

    pub fn use_metric(&self) -> bool {
        self.use_metric
    }

    pub fn mutex_groups(&self) -> &[Vec<Fact>] {
        &self.mutex_groups
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// Axiom rules. Kept for inspection; code generation does not evaluate them.
    pub fn axioms(&self) -> &[Operator] {
        &self.axioms
    }

    pub fn fact_name(&self, fact: Fact) -> Cow<'_, str> {
        self.ensure_variable(fact.var).value_name(fact.value)
    }
}

impl TaskModel for Task {
    fn num_variables(&self) -> usize {
        self.variables.len()
    }

    fn domain_size(&self, var: usize) -> usize {
        self.ensure_variable(var).domain_size()
    }

    fn num_operators(&self) -> usize {
        self.operators.len()
    }

    fn operator(&self, index: usize) -> &Operator {
        self.ensure_operator(index)
    }

    fn goal(&self) -> &[Fact] {
        &self.goal
    }

    fn initial_state(&self) -> &[usize] {
        &self.initial_state
    }

    fn mutex_facts(&self, fact: Fact) -> &[Fact] {
        self.mutexes.get(&fact).map(Vec::as_slice).unwrap_or(&[])
    }

    fn num_axioms(&self) -> usize {
        self.axioms.len()
    }
}

/// Builder for [`Task`]. Validation happens once, in [`TaskBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct TaskBuilder {
    variables: Vec<Variable>,
    use_metric: bool,
    mutex_groups: Vec<Vec<Fact>>,
    initial_state: Vec<usize>,
    goal: Vec<Fact>,
    operators: Vec<Operator>,
    axioms: Vec<Operator>,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn use_metric(mut self, value: bool) -> Self {
        self.use_metric = value;
        self
    }

    pub fn mutex_group(mut self, facts: impl IntoIterator<Item = Fact>) -> Self {
        self.mutex_groups.push(facts.into_iter().collect());
        self
    }

    pub fn initial_state(mut self, values: impl IntoIterator<Item = usize>) -> Self {
        self.initial_state = values.into_iter().collect();
        self
    }

    pub fn goal(mut self, facts: impl IntoIterator<Item = Fact>) -> Self {
        self.goal = facts.into_iter().collect();
        self
    }

    pub fn operator(mut self, operator: Operator) -> Self {
        self.operators.push(operator);
        self
    }

    pub fn axiom(mut self, axiom: Operator) -> Self {
        self.axioms.push(axiom);
        self
    }

    pub fn build(self) -> Result<Task, TaskError> {
        for (var, variable) in self.variables.iter().enumerate() {
            if variable.domain_size() == 0 {
                return Err(TaskError::EmptyDomain { var });
            }
        }

        if self.initial_state.len() != self.variables.len() {
            return Err(TaskError::InitialState {
                found: self.initial_state.len(),
                expected: self.variables.len(),
            });
        }
        for (var, &value) in self.initial_state.iter().enumerate() {
            check_fact(Fact::new(var, value), &self.variables)?;
        }

        if self.goal.is_empty() {
            return Err(TaskError::NoGoal);
        }
        check_facts(&self.goal, &self.variables)?;

        for group in &self.mutex_groups {
            check_facts(group, &self.variables)?;
        }
        for op in self.operators.iter().chain(&self.axioms) {
            check_operator(op, &self.variables)?;
        }

        let mutexes = build_mutex_table(&self.mutex_groups);

        Ok(Task {
            variables: self.variables,
            use_metric: self.use_metric,
            mutex_groups: self.mutex_groups,
            mutexes,
            initial_state: self.initial_state,
            goal: self.goal,
            operators: self.operators,
            axioms: self.axioms,
        })
    }
}

/// Pairwise expansion of mutex groups, keeping only cross-variable pairs.
fn build_mutex_table(groups: &[Vec<Fact>]) -> IndexMap<Fact, Vec<Fact>> {
    let mut table: IndexMap<Fact, IndexSet<Fact>> = IndexMap::new();
    for group in groups {
        for a in group {
            for b in group {
                if a.var != b.var {
                    table.entry(*a).or_default().insert(*b);
                }
            }
        }
    }

    table
        .into_iter()
        .map(|(fact, set)| (fact, set.into_iter().collect()))
        .collect()
}

fn check_operator(op: &Operator, variables: &[Variable]) -> Result<(), TaskError> {
    check_facts(&op.preconditions, variables)?;
    for effect in &op.effects {
        check_fact(effect.fact, variables)?;
        check_facts(&effect.conditions, variables)?;
    }
    Ok(())
}

fn check_facts(facts: &[Fact], variables: &[Variable]) -> Result<(), TaskError> {
    facts.iter().try_for_each(|&f| check_fact(f, variables))
}

fn check_fact(fact: Fact, variables: &[Variable]) -> Result<(), TaskError> {
    let Some(variable) = variables.get(fact.var) else {
        return Err(TaskError::VariableOutOfBounds {
            var: fact.var,
            fact,
        });
    };
    if fact.value >= variable.domain_size() {
        return Err(TaskError::ValueOutOfBounds {
            var: fact.var,
            value: fact.value,
            domain_size: variable.domain_size(),
        });
    }
    Ok(())
}
