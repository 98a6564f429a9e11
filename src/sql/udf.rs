//! User-defined function registry.
//!
//! Functions are pure: the evaluator calls them with already-evaluated
//! argument values and expects a value or an error back. Names are
//! case-insensitive and stored lowercase.

use crate::sql::error::{SqlError, SqlResult};
use crate::sql::execution::types::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A pure function callable from query expressions
pub trait UserDefinedFunction: Send + Sync {
    /// Number of arguments the function accepts
    fn arity(&self) -> usize;

    /// Apply the function to evaluated arguments
    ///
    /// `args` has exactly `arity()` elements when called by the engine.
    fn call(&self, args: &[Value]) -> SqlResult<Value>;
}

/// Lookup table from function name to implementation
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn UserDefinedFunction>>,
}

impl FunctionRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// A registry preloaded with the scalar built-ins
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("abs", Arc::new(AbsFunction));
        registry.register("upper", Arc::new(UpperFunction));
        registry.register("lower", Arc::new(LowerFunction));
        registry
    }

    /// Register a function under the given name, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, function: Arc<dyn UserDefinedFunction>) {
        self.functions.insert(name.into().to_lowercase(), function);
    }

    /// Look up a function by name
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn UserDefinedFunction>> {
        self.functions.get(&name.to_lowercase())
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

struct AbsFunction;

impl UserDefinedFunction for AbsFunction {
    fn arity(&self) -> usize {
        1
    }

    fn call(&self, args: &[Value]) -> SqlResult<Value> {
        match args {
            [Value::Integer(i)] => Ok(Value::Integer(i.abs())),
            [Value::Float(f)] => Ok(Value::Float(f.abs())),
            [other] => Err(SqlError::udf_error(
                "abs",
                format!("expects a numeric argument, got {}", other.type_name()),
            )),
            _ => Err(SqlError::udf_error("abs", "expects exactly one argument")),
        }
    }
}

struct UpperFunction;

impl UserDefinedFunction for UpperFunction {
    fn arity(&self) -> usize {
        1
    }

    fn call(&self, args: &[Value]) -> SqlResult<Value> {
        match args {
            [Value::String(s)] => Ok(Value::String(s.to_uppercase())),
            [other] => Err(SqlError::udf_error(
                "upper",
                format!("expects a string argument, got {}", other.type_name()),
            )),
            _ => Err(SqlError::udf_error("upper", "expects exactly one argument")),
        }
    }
}

struct LowerFunction;

impl UserDefinedFunction for LowerFunction {
    fn arity(&self) -> usize {
        1
    }

    fn call(&self, args: &[Value]) -> SqlResult<Value> {
        match args {
            [Value::String(s)] => Ok(Value::String(s.to_lowercase())),
            [other] => Err(SqlError::udf_error(
                "lower",
                format!("expects a string argument, got {}", other.type_name()),
            )),
            _ => Err(SqlError::udf_error("lower", "expects exactly one argument")),
        }
    }
}
