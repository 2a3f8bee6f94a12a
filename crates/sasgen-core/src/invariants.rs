//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Operator, Task, Variable};

impl Task {
    pub(crate) fn ensure_variable(&self, var: usize) -> &Variable {
        self.variables().get(var).unwrap_or_else(|| {
            panic!(
                "Task: variable {var} not found \
                 (task has {} variables)",
                self.variables().len()
            )
        })
    }

    pub(crate) fn ensure_operator(&self, index: usize) -> &Operator {
        self.operators().get(index).unwrap_or_else(|| {
            panic!(
                "Task: operator {index} not found \
                 (task has {} operators)",
                self.operators().len()
            )
        })
    }
}
