use std::fmt;

/// Errors surfaced by query parsing, planning, and execution
#[derive(Debug, Clone, PartialEq)]
pub enum SqlError {
    /// Query text could not be parsed
    ParseError {
        message: String,
        position: Option<usize>,
    },

    /// Logical plan failed the build-time capability check
    PlanError { message: String },

    /// A tuple arrived on an input that matches no FROM relation
    UnknownInput { input: String },

    /// A qualified column reference names no relation in scope
    UnknownRelation { relation: String },

    /// An expression references a key absent from its side of the row
    MissingColumn {
        column: String,
        relation: Option<String>,
    },

    /// An unqualified column reference matches more than one side
    AmbiguousColumn { column: String },

    /// An operator was applied to incompatible value kinds
    TypeError { expected: String, actual: String },

    /// Division or modulo by zero
    ArithmeticError { message: String },

    /// A user-defined function call reported failure
    UdfError { function: String, message: String },
}

impl fmt::Display for SqlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlError::ParseError { message, position } => {
                if let Some(pos) = position {
                    write!(f, "parse error at position {}: {}", pos, message)
                } else {
                    write!(f, "parse error: {}", message)
                }
            }
            SqlError::PlanError { message } => {
                write!(f, "plan error: {}", message)
            }
            SqlError::UnknownInput { input } => {
                write!(f, "input '{}' matches no FROM relation", input)
            }
            SqlError::UnknownRelation { relation } => {
                write!(f, "unknown relation '{}' in column reference", relation)
            }
            SqlError::MissingColumn { column, relation } => {
                if let Some(rel) = relation {
                    write!(f, "column '{}' not found in relation '{}'", column, rel)
                } else {
                    write!(f, "column '{}' not found", column)
                }
            }
            SqlError::AmbiguousColumn { column } => {
                write!(f, "column '{}' is ambiguous across FROM relations", column)
            }
            SqlError::TypeError { expected, actual } => {
                write!(f, "type error: expected {}, got {}", expected, actual)
            }
            SqlError::ArithmeticError { message } => {
                write!(f, "arithmetic error: {}", message)
            }
            SqlError::UdfError { function, message } => {
                write!(f, "function '{}' failed: {}", function, message)
            }
        }
    }
}

impl std::error::Error for SqlError {}

impl SqlError {
    /// Create a parse error with an optional source position
    pub fn parse_error(message: impl Into<String>, position: Option<usize>) -> Self {
        SqlError::ParseError {
            message: message.into(),
            position,
        }
    }

    /// Create a plan capability error
    pub fn plan_error(message: impl Into<String>) -> Self {
        SqlError::PlanError {
            message: message.into(),
        }
    }

    /// Create a type error from the expected and actual kind names
    pub fn type_error(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        SqlError::TypeError {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an arithmetic error
    pub fn arithmetic_error(message: impl Into<String>) -> Self {
        SqlError::ArithmeticError {
            message: message.into(),
        }
    }

    /// Create a UDF failure error
    pub fn udf_error(function: impl Into<String>, message: impl Into<String>) -> Self {
        SqlError::UdfError {
            function: function.into(),
            message: message.into(),
        }
    }
}

/// Result type for SQL operations
pub type SqlResult<T> = Result<T, SqlError>;
