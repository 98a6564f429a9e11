//! Per-tuple driver for compiled SELECT plans.
//!
//! A plan instance exclusively owns its window buffers and emitter state
//! and is driven by one logical caller; `process` runs one tuple to
//! completion and returns synchronously. The window update of a cycle is
//! applied before evaluation and is never rolled back, so a tuple that
//! poisons evaluation ages out of the window like any other.

use crate::sql::ast::{Expr, ProjectionItem};
use crate::sql::error::{SqlError, SqlResult};
use crate::sql::execution::emitter::EmitterState;
use crate::sql::execution::expression::ExpressionEvaluator;
use crate::sql::execution::join::RelationComposer;
use crate::sql::execution::projection::Projector;
use crate::sql::execution::types::{Tuple, Value};
use crate::sql::execution::window::WindowBuffer;
use crate::sql::planner::LogicalPlan;
use crate::sql::udf::FunctionRegistry;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Arc;

struct InputSlot {
    name: String,
    window: WindowBuffer,
}

/// Executable form of a single-statement continuous query
pub struct SelectExecutionPlan {
    inputs: Vec<InputSlot>,
    composer: RelationComposer,
    projection: Vec<ProjectionItem>,
    predicate: Option<Expr>,
    emitter: EmitterState,
    registry: Arc<FunctionRegistry>,
}

impl SelectExecutionPlan {
    /// Build an executable plan from a logical plan and a UDF registry
    ///
    /// Fails with a plan error when an expression calls a function the
    /// registry does not provide, or with the wrong number of arguments.
    pub fn new(plan: LogicalPlan, registry: Arc<FunctionRegistry>) -> SqlResult<Self> {
        for item in &plan.projection {
            if let ProjectionItem::Expression { expr, .. } = item {
                check_expr_functions(expr, &registry)?;
            }
        }
        if let Some(predicate) = &plan.predicate {
            check_expr_functions(predicate, &registry)?;
        }

        let composer = RelationComposer::new(&plan.inputs);
        let inputs = plan
            .inputs
            .iter()
            .map(|input| InputSlot {
                name: input.relation_name.clone(),
                window: WindowBuffer::new(input.range.clone()),
            })
            .collect::<Vec<_>>();

        debug!(
            "built {} select plan over {} input(s)",
            plan.emitter_kind.as_str(),
            inputs.len()
        );

        Ok(Self {
            inputs,
            composer,
            projection: plan.projection,
            predicate: plan.predicate,
            emitter: EmitterState::new(plan.emitter_kind, plan.cadence),
            registry,
        })
    }

    /// Run one tuple through the plan
    ///
    /// The caller keeps ownership of the tuple; the plan clones what it
    /// retains. Returns the rows this admission emits, which is empty on
    /// a skipped cadence cycle. An evaluation error aborts the cycle
    /// without emitting, but the window update has already happened.
    pub fn process(&mut self, tuple: &Tuple) -> SqlResult<Vec<HashMap<String, Value>>> {
        let Some(slot) = self
            .inputs
            .iter_mut()
            .find(|slot| slot.name == tuple.input_name)
        else {
            return Err(SqlError::UnknownInput {
                input: tuple.input_name.clone(),
            });
        };
        slot.window.admit(tuple.clone());
        self.emitter.record_arrival(&tuple.input_name);

        if !self.emitter.gate_open() {
            return Ok(Vec::new());
        }

        let windows: Vec<&WindowBuffer> = self.inputs.iter().map(|slot| &slot.window).collect();
        let bindings = self.composer.compose(&windows);

        let mut produced = Vec::with_capacity(bindings.len());
        for binding in &bindings {
            if let Some(predicate) = &self.predicate {
                match ExpressionEvaluator::evaluate_predicate(predicate, binding, &self.registry) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(err) => {
                        warn!("select cycle aborted by predicate: {}", err);
                        return Err(err);
                    }
                }
            }
            match Projector::project(&self.projection, binding, &self.registry) {
                Ok(row) => produced.push(row),
                Err(err) => {
                    warn!("select cycle aborted by projection: {}", err);
                    return Err(err);
                }
            }
        }

        Ok(self.emitter.emit(produced))
    }

    /// Number of tuples currently held in the named input's window
    pub fn window_len(&self, input: &str) -> Option<usize> {
        self.inputs
            .iter()
            .find(|slot| slot.name == input)
            .map(|slot| slot.window.len())
    }
}

/// Verify every function call in an expression against the registry
fn check_expr_functions(expr: &Expr, registry: &FunctionRegistry) -> SqlResult<()> {
    match expr {
        Expr::Function { name, args } => {
            match registry.lookup(name) {
                None => {
                    return Err(SqlError::plan_error(format!(
                        "unknown function '{}'",
                        name
                    )))
                }
                Some(function) if function.arity() != args.len() => {
                    return Err(SqlError::plan_error(format!(
                        "function '{}' expects {} arguments, got {}",
                        name,
                        function.arity(),
                        args.len()
                    )))
                }
                Some(_) => {}
            }
            for arg in args {
                check_expr_functions(arg, registry)?;
            }
            Ok(())
        }
        Expr::BinaryOp { left, right, .. } => {
            check_expr_functions(left, registry)?;
            check_expr_functions(right, registry)
        }
        Expr::UnaryOp { expr, .. } => check_expr_functions(expr, registry),
        Expr::Literal(_) | Expr::Column { .. } => Ok(()),
    }
}
