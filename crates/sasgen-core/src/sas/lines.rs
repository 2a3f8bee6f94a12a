//! Line cursor with typed readers.

use std::str::FromStr;

use crate::{Fact, TaskError};

pub(super) struct Lines<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> Lines<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().map(str::trim).collect(),
            pos: 0,
        }
    }

    /// 1-based number of the line most recently consumed.
    pub(super) fn line(&self) -> usize {
        self.pos
    }

    pub(super) fn next_line(&mut self) -> Result<&'a str, TaskError> {
        let Some(&line) = self.lines.get(self.pos) else {
            return Err(TaskError::UnexpectedEof { line: self.pos });
        };
        self.pos += 1;
        Ok(line)
    }

    pub(super) fn expect(&mut self, magic: &'static str) -> Result<(), TaskError> {
        let found = self.next_line()?;
        if found != magic {
            return Err(TaskError::Magic {
                line: self.pos,
                expected: magic,
                found: found.to_owned(),
            });
        }
        Ok(())
    }

    pub(super) fn int<T: FromStr>(&mut self) -> Result<T, TaskError> {
        let text = self.next_line()?;
        parse_int(text, self.pos)
    }

    /// Whitespace-separated integers on one line.
    pub(super) fn ints(&mut self) -> Result<Vec<i64>, TaskError> {
        let text = self.next_line()?;
        text.split_whitespace()
            .map(|word| parse_int(word, self.pos))
            .collect()
    }

    pub(super) fn fact(&mut self) -> Result<Fact, TaskError> {
        let nums = self.ints()?;
        match nums.as_slice() {
            &[var, value] => Ok(Fact::new(
                self.index(var, "fact")?,
                self.index(value, "fact")?,
            )),
            _ => Err(self.malformed("fact", &nums)),
        }
    }

    /// A count line followed by that many fact lines.
    pub(super) fn facts(&mut self) -> Result<Vec<Fact>, TaskError> {
        let count: usize = self.int()?;
        (0..count).map(|_| self.fact()).collect()
    }

    /// Convert a parsed integer to an index, rejecting negatives.
    pub(super) fn index(&self, n: i64, what: &'static str) -> Result<usize, TaskError> {
        usize::try_from(n).map_err(|_| TaskError::Malformed {
            line: self.pos,
            what,
            found: n.to_string(),
        })
    }

    pub(super) fn malformed(&self, what: &'static str, nums: &[i64]) -> TaskError {
        let found = nums
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        TaskError::Malformed {
            line: self.pos,
            what,
            found,
        }
    }
}

fn parse_int<T: FromStr>(text: &str, line: usize) -> Result<T, TaskError> {
    text.parse().map_err(|_| TaskError::Integer {
        line,
        found: text.to_owned(),
    })
}
