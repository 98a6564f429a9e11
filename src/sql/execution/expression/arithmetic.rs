//! Binary arithmetic over value pairs.
//!
//! Integer and float operands promote to float when mixed; every other
//! pairing is a type error. Zero divisors are arithmetic errors.

use crate::sql::error::{SqlError, SqlResult};
use crate::sql::execution::types::Value;

/// Add two numeric values
pub fn add_values(left: &Value, right: &Value) -> SqlResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a + b)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a + b)),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(*a as f64 + b)),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a + *b as f64)),
        _ => Err(numeric_type_error(left, right)),
    }
}

/// Subtract two numeric values
pub fn subtract_values(left: &Value, right: &Value) -> SqlResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a - b)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a - b)),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(*a as f64 - b)),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a - *b as f64)),
        _ => Err(numeric_type_error(left, right)),
    }
}

/// Multiply two numeric values
pub fn multiply_values(left: &Value, right: &Value) -> SqlResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Ok(Value::Integer(a * b)),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(a * b)),
        (Value::Integer(a), Value::Float(b)) => Ok(Value::Float(*a as f64 * b)),
        (Value::Float(a), Value::Integer(b)) => Ok(Value::Float(a * *b as f64)),
        _ => Err(numeric_type_error(left, right)),
    }
}

/// Divide two numeric values
///
/// Integer division truncates toward zero.
pub fn divide_values(left: &Value, right: &Value) -> SqlResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            if *b == 0 {
                Err(SqlError::arithmetic_error("division by zero"))
            } else {
                Ok(Value::Integer(a / b))
            }
        }
        (Value::Float(a), Value::Float(b)) => {
            if *b == 0.0 {
                Err(SqlError::arithmetic_error("division by zero"))
            } else {
                Ok(Value::Float(a / b))
            }
        }
        (Value::Integer(a), Value::Float(b)) => {
            if *b == 0.0 {
                Err(SqlError::arithmetic_error("division by zero"))
            } else {
                Ok(Value::Float(*a as f64 / b))
            }
        }
        (Value::Float(a), Value::Integer(b)) => {
            if *b == 0 {
                Err(SqlError::arithmetic_error("division by zero"))
            } else {
                Ok(Value::Float(a / *b as f64))
            }
        }
        _ => Err(numeric_type_error(left, right)),
    }
}

/// Take the remainder of two numeric values
pub fn modulo_values(left: &Value, right: &Value) -> SqlResult<Value> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => {
            if *b == 0 {
                Err(SqlError::arithmetic_error("modulo by zero"))
            } else {
                Ok(Value::Integer(a % b))
            }
        }
        (Value::Float(a), Value::Float(b)) => {
            if *b == 0.0 {
                Err(SqlError::arithmetic_error("modulo by zero"))
            } else {
                Ok(Value::Float(a % b))
            }
        }
        (Value::Integer(a), Value::Float(b)) => {
            if *b == 0.0 {
                Err(SqlError::arithmetic_error("modulo by zero"))
            } else {
                Ok(Value::Float(*a as f64 % b))
            }
        }
        (Value::Float(a), Value::Integer(b)) => {
            if *b == 0 {
                Err(SqlError::arithmetic_error("modulo by zero"))
            } else {
                Ok(Value::Float(a % *b as f64))
            }
        }
        _ => Err(numeric_type_error(left, right)),
    }
}

fn numeric_type_error(left: &Value, right: &Value) -> SqlError {
    SqlError::type_error(
        "numeric operands",
        format!("{} and {}", left.type_name(), right.type_name()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_division_truncates() {
        assert_eq!(
            divide_values(&Value::Integer(7), &Value::Integer(2)).unwrap(),
            Value::Integer(3)
        );
    }

    #[test]
    fn test_mixed_operands_promote_to_float() {
        assert_eq!(
            add_values(&Value::Integer(1), &Value::Float(0.5)).unwrap(),
            Value::Float(1.5)
        );
        assert_eq!(
            multiply_values(&Value::Float(2.0), &Value::Integer(3)).unwrap(),
            Value::Float(6.0)
        );
    }

    #[test]
    fn test_division_by_zero() {
        let err = divide_values(&Value::Integer(1), &Value::Integer(0));
        assert!(matches!(err, Err(SqlError::ArithmeticError { .. })));
        let err = modulo_values(&Value::Integer(1), &Value::Integer(0));
        assert!(matches!(err, Err(SqlError::ArithmeticError { .. })));
    }

    #[test]
    fn test_non_numeric_operands_rejected() {
        let err = add_values(&Value::String("a".to_string()), &Value::Integer(1));
        assert!(matches!(err, Err(SqlError::TypeError { .. })));
        let err = subtract_values(&Value::Null, &Value::Integer(1));
        assert!(matches!(err, Err(SqlError::TypeError { .. })));
    }
}
