//! Relaxed planning graph over the one-hot encoding (`ff_graph.cpp`).
//!
//! Only the forward primitives are emitted: conversion of a packed state into
//! layer 0, the goal test, and one layer transition. The runtime iterates
//! layers and walks `achieving_action` backwards; `backward` is an empty entry
//! point it links against.

use super::writer::CodeWriter;
use super::{bits_conjunction, comment_text, int_list};
use crate::Radix;
use crate::compile::{OneHotOperator, RelaxedProgram};

const CONVERT_PARAMS: &[&str] = &[
    "uint64_t* state",
    "uint64_t* ff_state",
    "std::vector<int>& fact_membership",
];

const BUILD_NEXT_LAYER_PARAMS: &[&str] = &[
    "uint64_t* next_state",
    "const uint64_t* state",
    "std::vector<int>& fact_membership",
    "std::vector<int>& action_membership",
    "std::vector<int>& achieving_action",
    "int layer",
    "std::vector<std::vector<int>>& G",
];

const BACKWARD_PARAMS: &[&str] = &[
    "std::vector<int>& fact_membership",
    "std::vector<int>& action_membership",
    "std::vector<int>& achieving_action",
    "int layer",
    "uint64_t* h",
];

/// Render `ff_graph.cpp`.
pub fn emit_relaxed_graph(program: &RelaxedProgram, radix: Radix) -> String {
    RelaxedEmitter {
        program,
        radix,
        w: CodeWriter::new(),
    }
    .emit()
}

struct RelaxedEmitter<'a> {
    program: &'a RelaxedProgram,
    radix: Radix,
    w: CodeWriter,
}

impl RelaxedEmitter<'_> {
    fn emit(mut self) -> String {
        self.w.line("#include \"ff_graph.h\"");
        self.w.blank();
        self.emit_conversion();
        self.w.blank();
        self.emit_goal();
        self.w.blank();
        self.emit_build_next_layer();
        self.w.blank();
        self.w.function("void", "backward", BACKWARD_PARAMS);
        self.w.close();
        self.w.blank();
        self.emit_fact_lookup("get_preconds_for_action", |op| &op.precondition_facts);
        self.w.blank();
        self.emit_fact_lookup("get_effects_for_action", |op| &op.effect_facts);
        self.w.finish()
    }

    fn emit_conversion(&mut self) {
        let program = self.program;
        self.w
            .function("void", "convert_state_to_multi_valued", CONVERT_PARAMS);
        for conversion in &program.conversions {
            let packed = &conversion.packed;
            let one_hot = &conversion.one_hot;
            self.w.open("");
            self.w.line(format!(
                "uint64_t val = (state[{}] & {}) >> {};",
                packed.word,
                self.radix.literal(packed.read_mask),
                packed.bit_start
            ));
            self.w.line(format!(
                "ff_state[{}] |= UINT64_C(1) << (val + {});",
                one_hot.word, one_hot.bit_start
            ));
            self.w
                .line(format!("fact_membership[{} + val] = 0;", conversion.offset));
            self.w.close();
        }
        self.w.close();
    }

    fn emit_goal(&mut self) {
        let cond = bits_conjunction("ff_state", &self.program.goal, self.radix)
            .unwrap_or_else(|| "true".to_owned());
        self.w.function("bool", "is_ff_goal", &["uint64_t* ff_state"]);
        self.w.line(format!("return {cond};"));
        self.w.close();
    }

    fn emit_build_next_layer(&mut self) {
        let program = self.program;
        self.w
            .function("void", "build_next_layer", BUILD_NEXT_LAYER_PARAMS);
        self.w.line("std::vector<int> gi;");
        for (index, op) in program.operators.iter().enumerate() {
            self.w.line(format!("// {index}: {}", comment_text(&op.name)));
            self.emit_layer_operator(index, op);
        }
        self.w.line("G.push_back(gi);");
        self.w.close();
    }

    fn emit_layer_operator(&mut self, index: usize, op: &OneHotOperator) {
        let unset = format!("action_membership[{index}] == -1");
        let head = match bits_conjunction("state", &op.preconditions, self.radix) {
            Some(cond) => format!("if ({unset} && {cond})"),
            None => format!("if ({unset})"),
        };
        self.w.open(head);
        for (word, &bits) in &op.effects {
            self.w
                .line(format!("next_state[{word}] |= {};", self.radix.literal(bits)));
        }
        self.w.line(format!("action_membership[{index}] = layer;"));
        for &fact in &op.effect_facts {
            self.w.open(format!("if (fact_membership[{fact}] == -1)"));
            self.w.line(format!("fact_membership[{fact}] = layer + 1;"));
            self.w.line(format!("achieving_action[{fact}] = {index};"));
            if self.program.is_goal_fact(fact) {
                self.w.line(format!("gi.push_back({fact});"));
            }
            self.w.close();
        }
        self.w.close();
    }

    fn emit_fact_lookup(&mut self, name: &str, facts: fn(&OneHotOperator) -> &Vec<usize>) {
        let program = self.program;
        self.w.function("std::vector<int>", name, &["int action_idx"]);
        self.w.open("switch (action_idx)");
        for (index, op) in program.operators.iter().enumerate() {
            self.w.line(format!("case {index}:"));
            self.w.indent();
            self.w.line(format!("return {};", int_list(facts(op))));
            self.w.dedent();
        }
        self.w.line("default:");
        self.w.indent();
        self.w.line("return {};");
        self.w.dedent();
        self.w.close();
        self.w.close();
    }
}
