//! Whole-task generation and artifact writing.
//!
//! Layouts and goals are compiled up front, so allocation and empty-goal
//! failures surface before any text exists. The packed and one-hot pipelines
//! then run side by side; both are joined and either failure is returned.

use std::fs;
use std::path::{Path, PathBuf};

use sasgen_core::TaskModel;

use crate::compile::{
    RelaxedProgram, SearchProgram, WordBits, WordMasks, compile_one_hot_goal, compile_packed_goal,
};
use crate::emit::{emit_config_header, emit_ff_config_header, emit_relaxed_graph, emit_search};
use crate::{Config, Error, Layout, Result, WidthPolicy};

pub const CONFIG_HEADER: &str = "config.h";
pub const SEARCH_SOURCE: &str = "action.cpp";
pub const FF_CONFIG_HEADER: &str = "ff_config.h";
pub const RELAXED_SOURCE: &str = "ff_graph.cpp";

/// One generated file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub name: &'static str,
    pub contents: String,
}

/// The generated file set, in a fixed order: `config.h`, `action.cpp`,
/// `ff_config.h`, `ff_graph.cpp`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifacts {
    files: Vec<Artifact>,
}

impl Artifacts {
    pub fn files(&self) -> &[Artifact] {
        &self.files
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.contents.as_str())
    }

    /// Write every file into `dir`, creating it if needed.
    ///
    /// Each file goes to `<name>.tmp` first and is renamed into place, so a
    /// failed write never leaves a truncated artifact under its final name.
    /// The temporary file is removed when either step fails.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut written = Vec::with_capacity(self.files.len());
        for artifact in &self.files {
            let path = dir.join(artifact.name);
            let tmp = dir.join(format!("{}.tmp", artifact.name));
            let renamed = fs::write(&tmp, &artifact.contents)
                .map_err(|source| Error::Io {
                    path: tmp.clone(),
                    source,
                })
                .and_then(|()| {
                    fs::rename(&tmp, &path).map_err(|source| Error::Io {
                        path: path.clone(),
                        source,
                    })
                });
            if let Err(err) = renamed {
                // Best effort; the original failure is the one reported.
                let _ = fs::remove_file(&tmp);
                return Err(err);
            }
            tracing::debug!(
                path = %path.display(),
                bytes = artifact.contents.len(),
                "wrote artifact"
            );
            written.push(path);
        }

        tracing::info!(dir = %dir.display(), files = written.len(), "artifacts written");
        Ok(written)
    }
}

/// Generate all four artifacts for `task`.
pub fn generate<T: TaskModel + Sync + ?Sized>(task: &T, config: &Config) -> Result<Artifacts> {
    warn_unsupported(task);

    let packed = Layout::for_task(task, config.layout(WidthPolicy::Packed))?;
    let one_hot = Layout::for_task(task, config.layout(WidthPolicy::OneHot))?;
    let packed_goal = compile_packed_goal(task.goal(), &packed)?;
    let one_hot_goal = compile_one_hot_goal(task.goal(), &one_hot)?;

    let (search, relaxed) = rayon::join(
        || search_artifacts(task, &packed, packed_goal, config),
        || relaxed_artifacts(task, &packed, &one_hot, one_hot_goal, config),
    );
    let [config_header, search_source] = search?;
    let [ff_config_header, relaxed_source] = relaxed?;

    tracing::info!(
        operators = task.num_operators(),
        packed_words = packed.word_count(),
        one_hot_words = one_hot.word_count(),
        "generation finished"
    );

    Ok(Artifacts {
        files: vec![config_header, search_source, ff_config_header, relaxed_source],
    })
}

fn search_artifacts<T: TaskModel + ?Sized>(
    task: &T,
    layout: &Layout,
    goal: WordMasks,
    config: &Config,
) -> Result<[Artifact; 2]> {
    let program = SearchProgram::compile(task, layout, goal)?;
    Ok([
        Artifact {
            name: CONFIG_HEADER,
            contents: emit_config_header(program.word_count, config.storage_length),
        },
        Artifact {
            name: SEARCH_SOURCE,
            contents: emit_search(&program, config.radix),
        },
    ])
}

fn relaxed_artifacts<T: TaskModel + ?Sized>(
    task: &T,
    packed: &Layout,
    one_hot: &Layout,
    goal: WordBits,
    config: &Config,
) -> Result<[Artifact; 2]> {
    let program = RelaxedProgram::compile(task, packed, one_hot, goal)?;
    Ok([
        Artifact {
            name: FF_CONFIG_HEADER,
            contents: emit_ff_config_header(
                program.word_count,
                program.fact_count,
                program.operators.len(),
            ),
        },
        Artifact {
            name: RELAXED_SOURCE,
            contents: emit_relaxed_graph(&program, config.radix),
        },
    ])
}

fn warn_unsupported<T: TaskModel + ?Sized>(task: &T) {
    let conditional = (0..task.num_operators())
        .filter(|&i| task.operator(i).has_conditional_effects())
        .count();
    if conditional > 0 {
        tracing::warn!(
            operators = conditional,
            "effect conditions are ignored; conditional effects are compiled as unconditional"
        );
    }
    if task.num_axioms() > 0 {
        tracing::warn!(axioms = task.num_axioms(), "axioms are ignored");
    }
}
