//! flowsql: a continuous-query execution engine for a streaming SQL
//! dialect.
//!
//! A compiled query is driven one tuple at a time: each arrival is
//! admitted into its input's sliding window, the cross product over the
//! windows is filtered and projected, and the emitter discipline
//! (RSTREAM, ISTREAM, or DSTREAM) turns the cycle's rows into output.
//!
//! ```
//! use flowsql::{compile_select, FunctionRegistry, Tuple, Value};
//! use chrono::{TimeZone, Utc};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(FunctionRegistry::default());
//! let mut plan =
//!     compile_select("SELECT RSTREAM * FROM src [RANGE 1 TUPLES]", registry).unwrap();
//!
//! let mut data = HashMap::new();
//! data.insert("int".to_string(), Value::Integer(1));
//! let tuple = Tuple::new(
//!     "src",
//!     data,
//!     Utc.with_ymd_and_hms(2015, 4, 10, 10, 23, 0).unwrap(),
//! );
//! let out = plan.process(&tuple).unwrap();
//! assert_eq!(out.len(), 1);
//! ```

pub mod sql;

pub use sql::execution::plan::SelectExecutionPlan;
pub use sql::execution::types::{Tuple, Value};
pub use sql::udf::{FunctionRegistry, UserDefinedFunction};
pub use sql::{compile_select, SqlError, SqlResult};
