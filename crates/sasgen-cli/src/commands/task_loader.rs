use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use sasgen_core::{Task, TaskError, TaskModel};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: TaskError,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskFormat {
    Sas,
    Json,
}

impl TaskFormat {
    /// `.json` files are JSON tasks; everything else, stdin included, is
    /// translator output.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => TaskFormat::Json,
            _ => TaskFormat::Sas,
        }
    }
}

pub fn load_task(path: &Path) -> Result<Task, LoadError> {
    let text = if path.as_os_str() == "-" {
        read_stdin()
    } else {
        fs::read_to_string(path)
    }
    .map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = match TaskFormat::from_path(path) {
        TaskFormat::Sas => Task::from_sas(&text),
        TaskFormat::Json => Task::from_json(&text),
    };
    let task = parsed.map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        variables = task.num_variables(),
        operators = task.num_operators(),
        "task loaded"
    );
    Ok(task)
}

fn read_stdin() -> io::Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
