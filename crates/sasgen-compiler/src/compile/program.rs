//! Compiled inputs for the two emitters.

use indexmap::IndexSet;
use sasgen_core::TaskModel;

use super::{FactIndex, OneHotOperator, PackedOperator, WordBits, WordMasks};
use crate::{Layout, Result, Slot};

/// Everything the successor-generator emitter needs.
#[derive(Clone, Debug)]
pub struct SearchProgram {
    pub word_count: usize,
    pub operators: Vec<PackedOperator>,
    pub goal: WordMasks,
    /// Packed initial state, without the trailing heuristic slot.
    pub initial_state: Vec<u64>,
}

impl SearchProgram {
    pub fn compile<T: TaskModel + ?Sized>(
        task: &T,
        layout: &Layout,
        goal: WordMasks,
    ) -> Result<Self> {
        let operators = (0..task.num_operators())
            .map(|i| PackedOperator::compile(task, layout, task.operator(i)))
            .collect::<Result<Vec<_>>>()?;
        let initial_state = layout.encode(task.initial_state())?;

        let guarded = operators.iter().filter(|op| op.guard.is_some()).count();
        tracing::debug!(
            operators = operators.len(),
            guarded,
            "compiled packed operators"
        );

        Ok(Self {
            word_count: layout.word_count(),
            operators,
            goal,
            initial_state,
        })
    }
}

/// How one variable moves from its packed field to its one-hot field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub packed: Slot,
    pub one_hot: Slot,
    /// Flattened index of the variable's value 0.
    pub offset: usize,
}

impl Conversion {
    /// Set the one-hot bit for the packed value and return its flattened index.
    ///
    /// Panics when the packed field holds a value outside the domain.
    pub fn apply(&self, packed: &[u64], one_hot: &mut [u64]) -> usize {
        let value = self.packed.extract(packed);
        one_hot[self.one_hot.word] |= self.one_hot.one_hot_bit(value);
        self.offset + value
    }
}

/// Everything the relaxed-graph emitter needs.
#[derive(Clone, Debug)]
pub struct RelaxedProgram {
    /// One-hot words per state.
    pub word_count: usize,
    /// Size of the flattened fact space.
    pub fact_count: usize,
    pub conversions: Vec<Conversion>,
    pub operators: Vec<OneHotOperator>,
    pub goal: WordBits,
    /// Flattened goal facts.
    pub goal_facts: IndexSet<usize>,
}

impl RelaxedProgram {
    pub fn compile<T: TaskModel + ?Sized>(
        task: &T,
        packed: &Layout,
        one_hot: &Layout,
        goal: WordBits,
    ) -> Result<Self> {
        debug_assert_eq!(packed.slots().len(), one_hot.slots().len());

        let index = FactIndex::for_task(task);
        let conversions = packed
            .slots()
            .iter()
            .zip(one_hot.slots())
            .enumerate()
            .map(|(var, (&packed, &one_hot))| Conversion {
                packed,
                one_hot,
                offset: index.offset(var),
            })
            .collect();
        let operators = (0..task.num_operators())
            .map(|i| OneHotOperator::compile(one_hot, &index, task.operator(i)))
            .collect::<Result<Vec<_>>>()?;
        let goal_facts = task.goal().iter().map(|&f| index.index(f)).collect();

        tracing::debug!(
            operators = operators.len(),
            facts = index.total(),
            "compiled one-hot operators"
        );

        Ok(Self {
            word_count: one_hot.word_count(),
            fact_count: index.total(),
            conversions,
            operators,
            goal,
            goal_facts,
        })
    }

    pub fn is_goal_fact(&self, fact: usize) -> bool {
        self.goal_facts.contains(&fact)
    }
}
