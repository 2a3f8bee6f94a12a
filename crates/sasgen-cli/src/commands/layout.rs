//! `sasgen layout`: the allocation table of one encoding, with the initial
//! state decoded per variable.

use std::path::PathBuf;

use sasgen_compiler::{Config, Layout, Slot, WidthPolicy};
use sasgen_core::{Fact, Task, TaskModel};
use serde::Serialize;

use super::task_loader::load_task;
use super::{CommandError, exit_on_error};

pub struct LayoutArgs {
    pub task_path: PathBuf,
    pub encoding: WidthPolicy,
    pub json: bool,
}

#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub encoding: WidthPolicy,
    pub word_bits: u32,
    pub word_count: usize,
    pub variables: Vec<VariableRow>,
    pub initial_words: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct VariableRow {
    pub name: String,
    #[serde(flatten)]
    pub slot: Slot,
    pub initial_value: usize,
    pub initial_name: String,
}

impl LayoutReport {
    pub fn new(task: &Task, encoding: WidthPolicy) -> sasgen_compiler::Result<Self> {
        let layout = Layout::for_task(task, Config::new().layout(encoding))?;
        let initial_words = layout.encode(task.initial_state())?;

        let variables = layout
            .slots()
            .iter()
            .zip(task.initial_state())
            .enumerate()
            .map(|(var, (slot, &value))| VariableRow {
                name: task.variable(var).name.clone(),
                slot: *slot,
                initial_value: value,
                initial_name: task.fact_name(Fact::new(var, value)).to_string(),
            })
            .collect();

        Ok(Self {
            encoding,
            word_bits: layout.config().word_bits,
            word_count: layout.word_count(),
            variables,
            initial_words,
        })
    }

    pub fn render_text(&self) -> String {
        let header = ["variable", "word", "bits", "mask", "initial"].map(String::from);
        let mut rows = vec![header];
        rows.extend(self.variables.iter().map(|row| {
            let slot = &row.slot;
            [
                row.name.clone(),
                slot.word.to_string(),
                format!("{}..{}", slot.bit_start, slot.bit_start + slot.bit_length),
                format!("{:#x}", slot.read_mask),
                row.initial_name.clone(),
            ]
        }));
        let widths: [usize; 5] = std::array::from_fn(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        });

        let mut out = format!(
            "encoding: {}\nwords: {} x {} bits\n\n",
            encoding_name(self.encoding),
            self.word_count,
            self.word_bits
        );
        for row in &rows {
            let line = row
                .iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str(line.trim_end());
            out.push('\n');
        }

        let words = self
            .initial_words
            .iter()
            .map(|w| format!("{w:#x}"))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("\ninitial words: {words}\n"));
        out
    }
}

fn encoding_name(policy: WidthPolicy) -> &'static str {
    match policy {
        WidthPolicy::Packed => "packed",
        WidthPolicy::OneHot => "one-hot",
    }
}

pub fn run(args: LayoutArgs) {
    print!("{}", exit_on_error(execute(&args)));
}

pub fn execute(args: &LayoutArgs) -> Result<String, CommandError> {
    let task = load_task(&args.task_path)?;
    let report = LayoutReport::new(&task, args.encoding)?;
    if args.json {
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        return Ok(json);
    }
    Ok(report.render_text())
}
