//! Block-by-block `.sas` reader.

use super::lines::Lines;
use crate::{Effect, Fact, Operator, Task, TaskBuilder, TaskError, Variable};

/// The only translator output version this reader understands.
pub const FILE_VERSION: i64 = 3;

pub(super) fn parse(text: &str) -> Result<Task, TaskError> {
    let mut lines = Lines::new(text);

    read_version(&mut lines)?;
    let use_metric = read_metric(&mut lines)?;
    let mut builder = TaskBuilder::new().use_metric(use_metric);

    let variables = read_variables(&mut lines)?;
    let num_variables = variables.len();
    for variable in variables {
        builder = builder.variable(variable);
    }

    for group in read_mutex_groups(&mut lines)? {
        builder = builder.mutex_group(group);
    }

    builder = builder
        .initial_state(read_state(&mut lines, num_variables)?)
        .goal(read_goal(&mut lines)?);

    let num_operators: usize = lines.int()?;
    for _ in 0..num_operators {
        builder = builder.operator(read_operator(&mut lines, use_metric)?);
    }

    let num_axioms: usize = lines.int()?;
    for _ in 0..num_axioms {
        builder = builder.axiom(read_axiom(&mut lines)?);
    }

    builder.build()
}

fn read_version(lines: &mut Lines<'_>) -> Result<(), TaskError> {
    lines.expect("begin_version")?;
    let found: i64 = lines.int()?;
    lines.expect("end_version")?;
    if found != FILE_VERSION {
        return Err(TaskError::Version {
            found,
            expected: FILE_VERSION,
        });
    }
    Ok(())
}

fn read_metric(lines: &mut Lines<'_>) -> Result<bool, TaskError> {
    lines.expect("begin_metric")?;
    let flag: i64 = lines.int()?;
    lines.expect("end_metric")?;
    Ok(flag == 1)
}

fn read_variables(lines: &mut Lines<'_>) -> Result<Vec<Variable>, TaskError> {
    let count: usize = lines.int()?;
    let mut variables = Vec::new();
    for _ in 0..count {
        lines.expect("begin_variable")?;
        let name = lines.next_line()?.to_owned();
        let axiom_layer: i32 = lines.int()?;
        let domain_size: usize = lines.int()?;
        let values = (0..domain_size)
            .map(|_| lines.next_line().map(str::to_owned))
            .collect::<Result<Vec<_>, _>>()?;
        lines.expect("end_variable")?;

        let mut variable = Variable::with_values(name, values);
        variable.axiom_layer = axiom_layer;
        variables.push(variable);
    }
    Ok(variables)
}

fn read_mutex_groups(lines: &mut Lines<'_>) -> Result<Vec<Vec<Fact>>, TaskError> {
    let count: usize = lines.int()?;
    let mut groups = Vec::new();
    for _ in 0..count {
        lines.expect("begin_mutex_group")?;
        groups.push(lines.facts()?);
        lines.expect("end_mutex_group")?;
    }
    Ok(groups)
}

fn read_state(lines: &mut Lines<'_>, num_variables: usize) -> Result<Vec<usize>, TaskError> {
    lines.expect("begin_state")?;
    let values = (0..num_variables)
        .map(|_| lines.int())
        .collect::<Result<Vec<usize>, _>>()?;
    lines.expect("end_state")?;
    Ok(values)
}

fn read_goal(lines: &mut Lines<'_>) -> Result<Vec<Fact>, TaskError> {
    lines.expect("begin_goal")?;
    let goal = lines.facts()?;
    lines.expect("end_goal")?;
    Ok(goal)
}

fn read_operator(lines: &mut Lines<'_>, use_metric: bool) -> Result<Operator, TaskError> {
    lines.expect("begin_operator")?;
    let mut op = Operator::new(lines.next_line()?);
    op.preconditions = lines.facts()?;

    let num_pre_post: usize = lines.int()?;
    for _ in 0..num_pre_post {
        let nums = lines.ints()?;
        let (effect, pre) = split_pre_post(lines, &nums)?;
        if let Some(value) = pre {
            op.preconditions.push(Fact::new(effect.fact.var, value));
        }
        op.effects.push(effect);
    }

    let cost: u32 = lines.int()?;
    op.cost = if use_metric { cost } else { 1 };
    lines.expect("end_operator")?;
    Ok(op)
}

fn read_axiom(lines: &mut Lines<'_>) -> Result<Operator, TaskError> {
    lines.expect("begin_rule")?;
    let conditions = lines.facts()?;
    let nums = lines.ints()?;
    let &[var, pre, post] = nums.as_slice() else {
        return Err(lines.malformed("axiom effect", &nums));
    };
    lines.expect("end_rule")?;

    let var = lines.index(var, "axiom effect")?;
    let mut axiom = Operator::new("<axiom>").with_cost(0);
    if pre != -1 {
        axiom
            .preconditions
            .push(Fact::new(var, lines.index(pre, "axiom effect")?));
    }
    axiom.effects.push(Effect {
        fact: Fact::new(var, lines.index(post, "axiom effect")?),
        conditions,
    });
    Ok(axiom)
}

/// Split `n [cvar cval]{n} var pre post` into the effect and its optional
/// precondition value (`pre == -1` means none).
fn split_pre_post(lines: &Lines<'_>, nums: &[i64]) -> Result<(Effect, Option<usize>), TaskError> {
    let Some((&count, rest)) = nums.split_first() else {
        return Err(lines.malformed("effect", nums));
    };
    let count = lines.index(count, "effect")?;
    if rest.len() != 2 * count + 3 {
        return Err(lines.malformed("effect", nums));
    }

    let (cond_nums, tail) = rest.split_at(2 * count);
    let conditions = cond_nums
        .chunks_exact(2)
        .map(|pair| {
            Ok(Fact::new(
                lines.index(pair[0], "effect condition")?,
                lines.index(pair[1], "effect condition")?,
            ))
        })
        .collect::<Result<Vec<_>, TaskError>>()?;

    let var = lines.index(tail[0], "effect")?;
    let pre = match tail[1] {
        -1 => None,
        n => Some(lines.index(n, "effect")?),
    };
    let post = lines.index(tail[2], "effect")?;

    Ok((
        Effect {
            fact: Fact::new(var, post),
            conditions,
        },
        pre,
    ))
}
