//! Test fixtures, task generators, and a reference evaluator for the relaxed
//! planning graph.

use proptest::prelude::*;
use sasgen_core::{Fact, Operator, Task, TaskModel, Variable};

use crate::compile::{
    RelaxedProgram, SearchProgram, compile_one_hot_goal, compile_packed_goal,
};
use crate::{Layout, LayoutConfig};

/// Domains `[2, 4]`, one operator `var0=0 -> var0=1, var1=2`, goal `var0=1`.
pub fn scenario_task() -> Task {
    Task::builder()
        .variable(Variable::new("var0", 2))
        .variable(Variable::new("var1", 4))
        .initial_state([0, 0])
        .goal([Fact::new(0, 1)])
        .operator(
            Operator::new("switch")
                .with_precondition((0, 0))
                .with_effect((0, 1))
                .with_effect((1, 2)),
        )
        .build()
        .unwrap()
}

pub fn search_program<T: TaskModel>(task: &T) -> SearchProgram {
    let layout = Layout::for_task(task, LayoutConfig::packed()).unwrap();
    let goal = compile_packed_goal(task.goal(), &layout).unwrap();
    SearchProgram::compile(task, &layout, goal).unwrap()
}

pub fn relaxed_program<T: TaskModel>(task: &T) -> RelaxedProgram {
    let packed = Layout::for_task(task, LayoutConfig::packed()).unwrap();
    let one_hot = Layout::for_task(task, LayoutConfig::one_hot()).unwrap();
    let goal = compile_one_hot_goal(task.goal(), &one_hot).unwrap();
    RelaxedProgram::compile(task, &packed, &one_hot, goal).unwrap()
}

/// Task model without validation, for inputs `TaskBuilder` rejects.
#[derive(Clone, Debug, Default)]
pub struct UncheckedTask {
    pub domains: Vec<usize>,
    pub initial_state: Vec<usize>,
    pub goal: Vec<Fact>,
    pub operators: Vec<Operator>,
}

impl TaskModel for UncheckedTask {
    fn num_variables(&self) -> usize {
        self.domains.len()
    }
    fn domain_size(&self, var: usize) -> usize {
        self.domains[var]
    }
    fn num_operators(&self) -> usize {
        self.operators.len()
    }
    fn operator(&self, index: usize) -> &Operator {
        &self.operators[index]
    }
    fn goal(&self) -> &[Fact] {
        &self.goal
    }
    fn initial_state(&self) -> &[usize] {
        &self.initial_state
    }
    fn mutex_facts(&self, _fact: Fact) -> &[Fact] {
        &[]
    }
}

fn arb_fact(domains: Vec<usize>) -> BoxedStrategy<Fact> {
    (0..domains.len())
        .prop_flat_map(move |var| (Just(var), 0..domains[var]))
        .prop_map(|(var, value)| Fact::new(var, value))
        .boxed()
}

/// Small valid tasks: up to 6 variables, up to 8 operators.
pub fn arb_task() -> impl Strategy<Value = Task> {
    prop::collection::vec(1usize..5, 1..6)
        .prop_flat_map(|domains| {
            let fact = arb_fact(domains.clone());
            let op = (
                prop::collection::vec(fact.clone(), 0..3),
                prop::collection::vec(fact.clone(), 1..3),
            );
            let initial: Vec<_> = domains.iter().map(|&d| 0..d).collect();
            (
                Just(domains),
                initial,
                prop::collection::vec(fact, 1..3),
                prop::collection::vec(op, 0..8),
            )
        })
        .prop_map(|(domains, initial, goal, ops)| {
            let mut builder = Task::builder().initial_state(initial).goal(goal);
            for (var, size) in domains.into_iter().enumerate() {
                builder = builder.variable(Variable::new(format!("v{var}"), size));
            }
            for (i, (pre, eff)) in ops.into_iter().enumerate() {
                let mut op = Operator::new(format!("op{i}"));
                op.preconditions = pre;
                for fact in eff {
                    op = op.with_effect(fact);
                }
                builder = builder.operator(op);
            }
            builder.build().unwrap()
        })
}

/// Reference semantics of the emitted `convert_state_to_multi_valued` and
/// `build_next_layer`, run directly on a compiled program.
pub struct RelaxedGraph<'a> {
    program: &'a RelaxedProgram,
    pub state: Vec<u64>,
    pub fact_membership: Vec<i32>,
    pub action_membership: Vec<i32>,
    pub achieving_action: Vec<i32>,
    pub goal_layers: Vec<Vec<usize>>,
}

impl<'a> RelaxedGraph<'a> {
    /// Layer 0 from a packed state.
    pub fn new(program: &'a RelaxedProgram, packed: &[u64]) -> Self {
        let mut state = vec![0; program.word_count];
        let mut fact_membership = vec![-1; program.fact_count];
        for conversion in &program.conversions {
            let fact = conversion.apply(packed, &mut state);
            fact_membership[fact] = 0;
        }
        Self {
            program,
            state,
            fact_membership,
            action_membership: vec![-1; program.operators.len()],
            achieving_action: vec![-1; program.fact_count],
            goal_layers: Vec::new(),
        }
    }

    /// One transition `layer -> layer + 1`. Returns whether any operator was
    /// admitted.
    pub fn next_layer(&mut self, layer: i32) -> bool {
        let mut next = self.state.clone();
        let mut gi = Vec::new();
        let mut admitted = false;

        for (i, op) in self.program.operators.iter().enumerate() {
            if self.action_membership[i] != -1 || !op.is_applicable(&self.state) {
                continue;
            }
            admitted = true;
            op.apply(&mut next);
            self.action_membership[i] = layer;
            for &fact in &op.effect_facts {
                if self.fact_membership[fact] == -1 {
                    self.fact_membership[fact] = layer + 1;
                    self.achieving_action[fact] = i as i32;
                    if self.program.is_goal_fact(fact) {
                        gi.push(fact);
                    }
                }
            }
        }

        self.goal_layers.push(gi);
        self.state = next;
        admitted
    }
}
