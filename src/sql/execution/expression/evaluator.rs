//! Expression evaluation over row bindings.
//!
//! Evaluation is a pure function of the expression, the row binding, and
//! the function registry; no state is held across calls. Column lookup
//! follows the scoping rules of the query surface: qualified references
//! name a side, unqualified references must match exactly one side.

use super::arithmetic;
use crate::sql::ast::{BinaryOperator, Expr, LiteralValue, UnaryOperator};
use crate::sql::error::{SqlError, SqlResult};
use crate::sql::execution::join::RowBinding;
use crate::sql::execution::types::Value;
use crate::sql::udf::FunctionRegistry;
use std::cmp::Ordering;

/// Stateless evaluator for projection and predicate expressions
pub struct ExpressionEvaluator;

impl ExpressionEvaluator {
    /// Evaluate an expression against one row binding
    pub fn evaluate(
        expr: &Expr,
        row: &RowBinding<'_>,
        registry: &FunctionRegistry,
    ) -> SqlResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::String(s) => Value::String(s.clone()),
                LiteralValue::Integer(i) => Value::Integer(*i),
                LiteralValue::Float(f) => Value::Float(*f),
                LiteralValue::Boolean(b) => Value::Bool(*b),
                LiteralValue::Null => Value::Null,
            }),
            Expr::Column { relation, name } => Self::lookup_column(relation.as_deref(), name, row),
            Expr::BinaryOp { left, op, right } => {
                let left_val = Self::evaluate(left, row, registry)?;
                let right_val = Self::evaluate(right, row, registry)?;
                Self::apply_binary(*op, &left_val, &right_val)
            }
            Expr::UnaryOp { op, expr } => {
                let value = Self::evaluate(expr, row, registry)?;
                match op {
                    UnaryOperator::Not => match value {
                        Value::Bool(b) => Ok(Value::Bool(!b)),
                        other => Err(SqlError::type_error("BOOL", other.type_name())),
                    },
                    UnaryOperator::Minus => match value {
                        Value::Integer(i) => Ok(Value::Integer(-i)),
                        Value::Float(f) => Ok(Value::Float(-f)),
                        other => Err(SqlError::type_error("numeric", other.type_name())),
                    },
                }
            }
            Expr::Function { name, args } => {
                let function = registry.lookup(name).ok_or_else(|| {
                    SqlError::udf_error(name.clone(), "function is not registered")
                })?;
                if function.arity() != args.len() {
                    return Err(SqlError::udf_error(
                        name.clone(),
                        format!(
                            "expects {} arguments, got {}",
                            function.arity(),
                            args.len()
                        ),
                    ));
                }
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(Self::evaluate(arg, row, registry)?);
                }
                function.call(&values)
            }
        }
    }

    /// Evaluate a WHERE predicate; only boolean true keeps the row
    pub fn evaluate_predicate(
        expr: &Expr,
        row: &RowBinding<'_>,
        registry: &FunctionRegistry,
    ) -> SqlResult<bool> {
        match Self::evaluate(expr, row, registry)? {
            Value::Bool(b) => Ok(b),
            other => Err(SqlError::type_error("BOOL", other.type_name())),
        }
    }

    fn lookup_column(
        relation: Option<&str>,
        name: &str,
        row: &RowBinding<'_>,
    ) -> SqlResult<Value> {
        match relation {
            Some(rel) => {
                let side = row.side_by_name(rel).ok_or_else(|| SqlError::UnknownRelation {
                    relation: rel.to_string(),
                })?;
                side.data
                    .get(name)
                    .cloned()
                    .ok_or_else(|| SqlError::MissingColumn {
                        column: name.to_string(),
                        relation: Some(rel.to_string()),
                    })
            }
            None => {
                let mut found: Option<Value> = None;
                for side in row.sides() {
                    if let Some(value) = side.data.get(name) {
                        if found.is_some() {
                            return Err(SqlError::AmbiguousColumn {
                                column: name.to_string(),
                            });
                        }
                        found = Some(value.clone());
                    }
                }
                found.ok_or_else(|| SqlError::MissingColumn {
                    column: name.to_string(),
                    relation: None,
                })
            }
        }
    }

    fn apply_binary(op: BinaryOperator, left: &Value, right: &Value) -> SqlResult<Value> {
        match op {
            BinaryOperator::Add => arithmetic::add_values(left, right),
            BinaryOperator::Subtract => arithmetic::subtract_values(left, right),
            BinaryOperator::Multiply => arithmetic::multiply_values(left, right),
            BinaryOperator::Divide => arithmetic::divide_values(left, right),
            BinaryOperator::Modulo => arithmetic::modulo_values(left, right),

            BinaryOperator::Equal => Ok(Value::Bool(left.equals(right))),
            BinaryOperator::NotEqual => Ok(Value::Bool(!left.equals(right))),
            BinaryOperator::LessThan => {
                Ok(Value::Bool(left.compare(right)? == Ordering::Less))
            }
            BinaryOperator::LessThanOrEqual => {
                Ok(Value::Bool(left.compare(right)? != Ordering::Greater))
            }
            BinaryOperator::GreaterThan => {
                Ok(Value::Bool(left.compare(right)? == Ordering::Greater))
            }
            BinaryOperator::GreaterThanOrEqual => {
                Ok(Value::Bool(left.compare(right)? != Ordering::Less))
            }

            BinaryOperator::And => match (left, right) {
                (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a && *b)),
                _ => Err(Self::boolean_type_error(left, right)),
            },
            BinaryOperator::Or => match (left, right) {
                (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(*a || *b)),
                _ => Err(Self::boolean_type_error(left, right)),
            },
        }
    }

    fn boolean_type_error(left: &Value, right: &Value) -> SqlError {
        SqlError::type_error(
            "BOOL operands",
            format!("{} and {}", left.type_name(), right.type_name()),
        )
    }
}
