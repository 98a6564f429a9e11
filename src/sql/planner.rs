//! Logical planning for single-statement SELECT queries.
//!
//! [`analyze`] lowers a parsed [`SelectStatement`] into a [`LogicalPlan`]
//! and performs the build-time capability check. Everything that can be
//! rejected without looking at data is rejected here, so `process` never
//! sees a malformed plan.

use crate::sql::ast::{EmitterKind, Expr, ProjectionItem, SelectStatement, WindowSpec};
use crate::sql::error::{SqlError, SqlResult};

/// Compiled form of a SELECT statement, ready to drive an execution plan
#[derive(Debug, Clone)]
pub struct LogicalPlan {
    pub emitter_kind: EmitterKind,
    /// Per-relation emission thresholds. Empty fires on every admission.
    pub cadence: Vec<(String, u64)>,
    pub projection: Vec<ProjectionItem>,
    pub inputs: Vec<PlanInput>,
    pub predicate: Option<Expr>,
}

/// One windowed input of the plan
#[derive(Debug, Clone)]
pub struct PlanInput {
    pub relation_name: String,
    pub alias: Option<String>,
    pub range: WindowRange,
}

impl PlanInput {
    /// The name this input binds to in row bindings
    pub fn binding_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.relation_name)
    }
}

/// Retention rule of an input window, in execution-ready units
#[derive(Debug, Clone)]
pub enum WindowRange {
    Count(usize),
    Time(chrono::Duration),
}

/// Analyze a parsed statement into a logical plan
///
/// Fails with a plan error when the statement is outside the engine's
/// capabilities: no inputs, colliding binding names, zero-sized windows,
/// or a cadence that names unknown relations.
pub fn analyze(stmt: SelectStatement) -> SqlResult<LogicalPlan> {
    if stmt.from.is_empty() {
        return Err(SqlError::plan_error("FROM clause names no input relation"));
    }

    let mut relation_names = Vec::new();
    let mut binding_names = Vec::new();
    for input in &stmt.from {
        if relation_names.contains(&input.name) {
            return Err(SqlError::plan_error(format!(
                "relation '{}' appears twice in FROM",
                input.name
            )));
        }
        relation_names.push(input.name.clone());

        let binding = input.alias.clone().unwrap_or_else(|| input.name.clone());
        if binding_names.contains(&binding) {
            return Err(SqlError::plan_error(format!(
                "binding name '{}' is used by more than one FROM input",
                binding
            )));
        }
        binding_names.push(binding);
    }

    let mut inputs = Vec::with_capacity(stmt.from.len());
    for input in &stmt.from {
        let range = match &input.range {
            WindowSpec::Tuples(n) => {
                if *n == 0 {
                    return Err(SqlError::plan_error(format!(
                        "window of relation '{}' must keep at least one tuple",
                        input.name
                    )));
                }
                WindowRange::Count(*n as usize)
            }
            WindowSpec::Time(d) => {
                if d.is_zero() {
                    return Err(SqlError::plan_error(format!(
                        "time window of relation '{}' must be positive",
                        input.name
                    )));
                }
                let span = chrono::Duration::from_std(*d).map_err(|_| {
                    SqlError::plan_error(format!(
                        "time window of relation '{}' is out of range",
                        input.name
                    ))
                })?;
                WindowRange::Time(span)
            }
        };
        inputs.push(PlanInput {
            relation_name: input.name.clone(),
            alias: input.alias.clone(),
            range,
        });
    }

    let mut cadence = Vec::new();
    for spec in &stmt.emitter.cadence {
        if spec.count == 0 {
            return Err(SqlError::plan_error(
                "EVERY threshold must be at least 1 tuple",
            ));
        }
        match &spec.input {
            Some(relation) => {
                if !relation_names.contains(relation) {
                    return Err(SqlError::plan_error(format!(
                        "EVERY clause names relation '{}' which is not in FROM",
                        relation
                    )));
                }
                if cadence.iter().any(|(name, _)| name == relation) {
                    return Err(SqlError::plan_error(format!(
                        "EVERY clause lists relation '{}' twice",
                        relation
                    )));
                }
                cadence.push((relation.clone(), spec.count));
            }
            // A bare `EVERY k TUPLES` gates every FROM input at k.
            None => {
                for name in &relation_names {
                    cadence.push((name.clone(), spec.count));
                }
            }
        }
    }

    Ok(LogicalPlan {
        emitter_kind: stmt.emitter.kind,
        cadence,
        projection: stmt.projection,
        inputs,
        predicate: stmt.where_clause,
    })
}
