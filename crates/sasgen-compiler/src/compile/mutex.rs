//! Post-effect mutex guard.
//!
//! A successor is rejected when it holds a fact that is mutex with one of the
//! facts the operator just established. Facts the operator itself sets are
//! never forbidden.

use indexmap::IndexSet;
use sasgen_core::{Fact, Operator, TaskModel};

use crate::{Layout, Result};

/// One forbidden fact: the successor passes when `(word & mask) != value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GuardTest {
    pub fact: Fact,
    pub word: usize,
    pub mask: u64,
    pub value: u64,
}

impl GuardTest {
    pub fn passes(&self, words: &[u64]) -> bool {
        words[self.word] & self.mask != self.value
    }
}

/// Conjunction of [`GuardTest`]s. Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutexGuard {
    tests: Vec<GuardTest>,
}

impl MutexGuard {
    /// Guard for `op`'s effects, or `None` when nothing is mutex with them.
    pub fn compile<T: TaskModel + ?Sized>(
        task: &T,
        layout: &Layout,
        op: &Operator,
    ) -> Result<Option<Self>> {
        let effects: IndexSet<Fact> = op.effect_facts().collect();

        let mut forbidden = IndexSet::new();
        for &effect in &effects {
            for &fact in task.mutex_facts(effect) {
                if !effects.contains(&fact) {
                    forbidden.insert(fact);
                }
            }
        }
        if forbidden.is_empty() {
            return Ok(None);
        }

        let tests = forbidden
            .into_iter()
            .map(|fact| {
                let slot = layout.slot_for(fact)?;
                Ok(GuardTest {
                    fact,
                    word: slot.word,
                    mask: slot.read_mask,
                    value: slot.place(fact.value),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(Self { tests }))
    }

    pub fn tests(&self) -> &[GuardTest] {
        &self.tests
    }

    /// Whether a successor state passes every test.
    pub fn admits(&self, words: &[u64]) -> bool {
        self.tests.iter().all(|t| t.passes(words))
    }
}
