//! Streaming SQL frontend and execution engine.

pub mod ast;
pub mod error;
pub mod execution;
pub mod parser;
pub mod planner;
pub mod udf;

pub use error::{SqlError, SqlResult};

use crate::sql::execution::SelectExecutionPlan;
use crate::sql::parser::SelectParser;
use crate::sql::udf::FunctionRegistry;
use std::sync::Arc;

/// Parse, analyze, and build an executable plan in one call
pub fn compile_select(
    query: &str,
    registry: Arc<FunctionRegistry>,
) -> SqlResult<SelectExecutionPlan> {
    let parser = SelectParser::new();
    let statement = parser.parse(query)?;
    let plan = planner::analyze(statement)?;
    SelectExecutionPlan::new(plan, registry)
}
