//! One-hot operator and goal compilation for the relaxed planning graph.

use sasgen_core::{Fact, Operator, TaskModel};

use super::WordBits;
use crate::{Error, Layout, Result, WidthPolicy};

/// Dense numbering of all `(var, value)` pairs: a variable's offset is the
/// sum of the domain sizes before it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactIndex {
    offsets: Vec<usize>,
    total: usize,
}

impl FactIndex {
    pub fn new(domain_sizes: &[usize]) -> Self {
        let mut offsets = Vec::with_capacity(domain_sizes.len());
        let mut total = 0;
        for &size in domain_sizes {
            offsets.push(total);
            total += size;
        }
        Self { offsets, total }
    }

    pub fn for_task<T: TaskModel + ?Sized>(task: &T) -> Self {
        Self::new(&task.domain_sizes())
    }

    pub fn offset(&self, var: usize) -> usize {
        self.offsets[var]
    }

    pub fn index(&self, fact: Fact) -> usize {
        self.offsets[fact.var] + fact.value
    }

    /// Number of facts in the task.
    pub fn total(&self) -> usize {
        self.total
    }
}

/// An operator projected onto the one-hot layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OneHotOperator {
    pub name: String,
    /// Bits that must all be set, per word.
    pub preconditions: WordBits,
    /// Bits the operator adds, per word.
    pub effects: WordBits,
    /// Flattened precondition facts, in declaration order.
    pub precondition_facts: Vec<usize>,
    /// Flattened effect facts, in declaration order.
    pub effect_facts: Vec<usize>,
}

impl OneHotOperator {
    pub fn compile(layout: &Layout, index: &FactIndex, op: &Operator) -> Result<Self> {
        debug_assert_eq!(layout.policy(), WidthPolicy::OneHot);
        Ok(Self {
            name: op.name.clone(),
            preconditions: bits(&op.preconditions, layout)?,
            effects: bits(&op.effect_facts().collect::<Vec<_>>(), layout)?,
            precondition_facts: op.preconditions.iter().map(|&f| index.index(f)).collect(),
            effect_facts: op.effect_facts().map(|f| index.index(f)).collect(),
        })
    }

    pub fn is_applicable(&self, words: &[u64]) -> bool {
        super::bits_hold(&self.preconditions, words)
    }

    /// Relaxed application: add the effect bits, never remove any.
    pub fn apply(&self, words: &mut [u64]) {
        for (&w, &bits) in &self.effects {
            words[w] |= bits;
        }
    }
}

/// Goal conjunction over the one-hot layout.
pub fn compile_one_hot_goal(goal: &[Fact], layout: &Layout) -> Result<WordBits> {
    if goal.is_empty() {
        return Err(Error::EmptyGoal);
    }
    bits(goal, layout)
}

fn bits(facts: &[Fact], layout: &Layout) -> Result<WordBits> {
    let mut words = WordBits::new();
    for &fact in facts {
        let slot = layout.slot_for(fact)?;
        *words.entry(slot.word).or_insert(0) |= slot.one_hot_bit(fact.value);
    }
    Ok(words)
}
