//! Successor generator over the packed encoding (`action.cpp`).
//!
//! Each operator becomes one guarded block: test its preconditions, allocate
//! a successor, write every word (touched words through `(prev & M) | V`, the
//! rest copied), then either enqueue it or, when a mutex guard fails, hand the
//! buffer back.

use super::writer::CodeWriter;
use super::{comment_text, masks_conjunction};
use crate::Radix;
use crate::compile::{MutexGuard, PackedOperator, SearchProgram};

const ACTIONS_PARAMS: &[&str] = &[
    "uint64_t* state_bitrep",
    "PlannerQueue& pq",
    "PathInfoMap& path_info",
];

/// Render `action.cpp`.
pub fn emit_search(program: &SearchProgram, radix: Radix) -> String {
    SearchEmitter {
        program,
        radix,
        w: CodeWriter::new(),
    }
    .emit()
}

struct SearchEmitter<'a> {
    program: &'a SearchProgram,
    radix: Radix,
    w: CodeWriter,
}

impl SearchEmitter<'_> {
    fn emit(mut self) -> String {
        self.w.line("#include \"action.h\"");
        self.w.line("#include <vector>");
        self.w.blank();
        self.emit_actions();
        self.w.blank();
        self.emit_goal();
        self.w.blank();
        self.emit_initial_state();
        self.w.blank();
        self.emit_applicable_operators();
        self.w.blank();
        self.emit_apply_effects();
        self.w.finish()
    }

    fn emit_actions(&mut self) {
        let program = self.program;
        self.w.function("void", "actions", ACTIONS_PARAMS);
        for (index, op) in program.operators.iter().enumerate() {
            self.w.line(format!("// {index}: {}", comment_text(&op.name)));
            let head = self
                .precondition(op, "state_bitrep")
                .map(|cond| format!("if ({cond})"))
                .unwrap_or_default();
            self.w.open(head);
            self.w.line("uint64_t* newstate_bitrep = allocate_state();");
            self.emit_successor_words(op);
            match &op.guard {
                Some(guard) => {
                    let cond = self.guard_condition(guard);
                    self.w.open(format!("if ({cond})"));
                    self.emit_enqueue(index);
                    self.w.reopen("} else {");
                    self.w.line("remove_last();");
                    self.w.close();
                }
                None => self.emit_enqueue(index),
            }
            self.w.close();
        }
        self.w.close();
    }

    fn emit_successor_words(&mut self, op: &PackedOperator) {
        for word in 0..self.program.word_count {
            let line = match op.effects.get(&word) {
                Some(effect) => format!(
                    "newstate_bitrep[{word}] = (state_bitrep[{word}] & {}) | {};",
                    self.radix.literal(effect.mask),
                    self.radix.literal(effect.value)
                ),
                None => format!("newstate_bitrep[{word}] = state_bitrep[{word}];"),
            };
            self.w.line(line);
        }
    }

    fn emit_enqueue(&mut self, index: usize) {
        self.w.line(format!(
            "path_info.insert({{newstate_bitrep, std::make_pair(state_bitrep, {index})}});"
        ));
        self.w.line("add_to_queue(newstate_bitrep, pq);");
    }

    fn emit_goal(&mut self) {
        let cond = masks_conjunction("state_bitrep", &self.program.goal, self.radix)
            .unwrap_or_else(|| "true".to_owned());
        self.w.function("bool", "is_goal", &["uint64_t* state_bitrep"]);
        self.w.line(format!("return {cond};"));
        self.w.close();
    }

    fn emit_initial_state(&mut self) {
        let program = self.program;
        self.w.open("uint64_t INITIAL_STATE[STATE_LENGTH_HEU] =");
        for &word in &program.initial_state {
            self.w.line(format!("{},", self.radix.literal(word)));
        }
        // Heuristic slot.
        self.w.line("0");
        self.w.close_with(";");
    }

    fn emit_applicable_operators(&mut self) {
        let program = self.program;
        self.w.function(
            "std::vector<int>",
            "applicable_operators",
            &["const uint64_t* state_bitrep"],
        );
        self.w.line("std::vector<int> applicable;");
        for (index, op) in program.operators.iter().enumerate() {
            let push = format!("applicable.push_back({index});");
            match self.precondition(op, "state_bitrep") {
                Some(cond) => {
                    self.w.open(format!("if ({cond})"));
                    self.w.line(push);
                    self.w.close();
                }
                None => self.w.line(push),
            }
        }
        self.w.line("return applicable;");
        self.w.close();
    }

    fn emit_apply_effects(&mut self) {
        let program = self.program;
        self.w
            .function("void", "apply_effects", &["uint64_t* state_bitrep", "int op"]);
        self.w.open("switch (op)");
        for (index, op) in program.operators.iter().enumerate() {
            self.w.line(format!("case {index}:"));
            self.w.indent();
            for (word, effect) in &op.effects {
                self.w.line(format!(
                    "state_bitrep[{word}] = (state_bitrep[{word}] & {}) | {};",
                    self.radix.literal(effect.mask),
                    self.radix.literal(effect.value)
                ));
            }
            self.w.line("break;");
            self.w.dedent();
        }
        self.w.line("default:");
        self.w.indent();
        self.w.line("break;");
        self.w.dedent();
        self.w.close();
        self.w.close();
    }

    fn precondition(&self, op: &PackedOperator, array: &str) -> Option<String> {
        masks_conjunction(array, &op.preconditions, self.radix)
    }

    fn guard_condition(&self, guard: &MutexGuard) -> String {
        guard
            .tests()
            .iter()
            .map(|t| {
                format!(
                    "((newstate_bitrep[{}] & {}) != {})",
                    t.word,
                    self.radix.literal(t.mask),
                    self.radix.literal(t.value)
                )
            })
            .collect::<Vec<_>>()
            .join(" && ")
    }
}
