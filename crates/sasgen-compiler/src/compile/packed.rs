//! Binary-encoded operator and goal compilation.

use sasgen_core::{Fact, Operator, TaskModel};

use super::{MutexGuard, WordMask, WordMasks};
use crate::{Error, Layout, Result};

/// An operator projected onto the packed layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedOperator {
    pub name: String,
    /// Read mask and expected value per word.
    pub preconditions: WordMasks,
    /// Clear mask and set value per word.
    pub effects: WordMasks,
    pub guard: Option<MutexGuard>,
}

impl PackedOperator {
    pub fn compile<T: TaskModel + ?Sized>(
        task: &T,
        layout: &Layout,
        op: &Operator,
    ) -> Result<Self> {
        Ok(Self {
            name: op.name.clone(),
            preconditions: conditions(&op.preconditions, layout)?,
            effects: effects(op.effect_facts(), layout)?,
            guard: MutexGuard::compile(task, layout, op)?,
        })
    }

    pub fn is_applicable(&self, words: &[u64]) -> bool {
        super::masks_hold(&self.preconditions, words)
    }

    /// Successor words, before the mutex guard is consulted.
    pub fn apply(&self, words: &[u64]) -> Vec<u64> {
        let mut next = words.to_vec();
        for (&w, effect) in &self.effects {
            next[w] = effect.apply(next[w]);
        }
        next
    }
}

/// Goal conjunction over the packed layout.
pub fn compile_packed_goal(goal: &[Fact], layout: &Layout) -> Result<WordMasks> {
    if goal.is_empty() {
        return Err(Error::EmptyGoal);
    }
    conditions(goal, layout)
}

pub(super) fn conditions(facts: &[Fact], layout: &Layout) -> Result<WordMasks> {
    let mut words = WordMasks::new();
    for &fact in facts {
        let slot = layout.slot_for(fact)?;
        let entry = words.entry(slot.word).or_insert(WordMask::EMPTY);
        entry.mask |= slot.read_mask;
        entry.value |= slot.place(fact.value);
    }
    Ok(words)
}

fn effects(facts: impl IntoIterator<Item = Fact>, layout: &Layout) -> Result<WordMasks> {
    let mut words = WordMasks::new();
    for fact in facts {
        let slot = layout.slot_for(fact)?;
        let entry = words.entry(slot.word).or_insert(WordMask::IDENTITY);
        entry.mask &= slot.clear_mask;
        entry.value |= slot.place(fact.value);
    }
    Ok(words)
}
