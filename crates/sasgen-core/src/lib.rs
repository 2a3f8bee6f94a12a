#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Task model for grounded SAS+ planning tasks.
//!
//! Two layers:
//! - **Reading layer**: the translator's textual `.sas` format and a JSON form
//! - **Query layer**: the [`TaskModel`] trait the code generator consumes
//!
//! All indices are dense and 0-based. A [`Task`] is validated once on
//! construction (facts in bounds, non-empty goal), so consumers never re-check.

use std::borrow::Cow;
use std::fmt;

mod error;
mod invariants;
mod json;
pub mod sas;
mod task;

#[cfg(test)]
mod json_tests;
#[cfg(test)]
mod task_tests;

pub use error::TaskError;
pub use task::{Task, TaskBuilder};

// ============================================================================
// Common Types
// ============================================================================

/// A `(variable, value)` assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Fact {
    pub var: usize,
    pub value: usize,
}

impl Fact {
    pub const fn new(var: usize, value: usize) -> Self {
        Self { var, value }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}={}", self.var, self.value)
    }
}

impl From<(usize, usize)> for Fact {
    fn from((var, value): (usize, usize)) -> Self {
        Self::new(var, value)
    }
}

/// Finite-domain state variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    /// `-1` for ordinary variables, otherwise the axiom layer deriving it.
    pub axiom_layer: i32,
    domain_size: usize,
    /// Display names, one per value, or empty for unnamed values.
    values: Vec<String>,
}

impl Variable {
    /// A variable whose values are unnamed; they display as `value<N>`.
    pub fn new(name: impl Into<String>, domain_size: usize) -> Self {
        Self {
            name: name.into(),
            axiom_layer: -1,
            domain_size,
            values: Vec::new(),
        }
    }

    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            axiom_layer: -1,
            domain_size: values.len(),
            values,
        }
    }

    pub fn domain_size(&self) -> usize {
        self.domain_size
    }

    pub fn value_name(&self, value: usize) -> Cow<'_, str> {
        match self.values.get(value) {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(format!("value{value}")),
        }
    }
}

/// Operator effect, optionally conditional on further facts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Effect {
    pub fact: Fact,
    pub conditions: Vec<Fact>,
}

impl Effect {
    pub fn new(fact: Fact) -> Self {
        Self {
            fact,
            conditions: Vec::new(),
        }
    }

    pub fn is_conditional(&self) -> bool {
        !self.conditions.is_empty()
    }
}

/// Grounded operator (or axiom rule).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operator {
    pub name: String,
    pub preconditions: Vec<Fact>,
    pub effects: Vec<Effect>,
    pub cost: u32,
}

impl Operator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            preconditions: Vec::new(),
            effects: Vec::new(),
            cost: 1,
        }
    }

    pub fn with_precondition(mut self, fact: impl Into<Fact>) -> Self {
        self.preconditions.push(fact.into());
        self
    }

    pub fn with_effect(mut self, fact: impl Into<Fact>) -> Self {
        self.effects.push(Effect::new(fact.into()));
        self
    }

    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Effect facts in declaration order, ignoring effect conditions.
    pub fn effect_facts(&self) -> impl Iterator<Item = Fact> + '_ {
        self.effects.iter().map(|e| e.fact)
    }

    pub fn has_conditional_effects(&self) -> bool {
        self.effects.iter().any(Effect::is_conditional)
    }
}

// ============================================================================
// TaskModel Trait
// ============================================================================

/// Read-only query interface over a grounded task.
///
/// Implementations guarantee every fact they return is in bounds and that the
/// initial state assigns every variable.
pub trait TaskModel {
    fn num_variables(&self) -> usize;
    fn domain_size(&self, var: usize) -> usize;

    fn num_operators(&self) -> usize;
    fn operator(&self, index: usize) -> &Operator;

    fn goal(&self) -> &[Fact];
    fn initial_state(&self) -> &[usize];

    /// Facts on other variables that can never hold together with `fact`.
    fn mutex_facts(&self, fact: Fact) -> &[Fact];

    /// Number of axiom rules. Code generation does not evaluate them.
    fn num_axioms(&self) -> usize {
        0
    }

    fn domain_sizes(&self) -> Vec<usize> {
        (0..self.num_variables())
            .map(|var| self.domain_size(var))
            .collect()
    }

    fn are_mutex(&self, a: Fact, b: Fact) -> bool {
        if a.var == b.var {
            return a.value != b.value;
        }
        self.mutex_facts(a).contains(&b)
    }
}

impl<T: TaskModel + ?Sized> TaskModel for &T {
    fn num_variables(&self) -> usize {
        (*self).num_variables()
    }
    fn domain_size(&self, var: usize) -> usize {
        (*self).domain_size(var)
    }
    fn num_operators(&self) -> usize {
        (*self).num_operators()
    }
    fn operator(&self, index: usize) -> &Operator {
        (*self).operator(index)
    }
    fn goal(&self) -> &[Fact] {
        (*self).goal()
    }
    fn initial_state(&self) -> &[usize] {
        (*self).initial_state()
    }
    fn mutex_facts(&self, fact: Fact) -> &[Fact] {
        (*self).mutex_facts(fact)
    }
    fn num_axioms(&self) -> usize {
        (*self).num_axioms()
    }
}
