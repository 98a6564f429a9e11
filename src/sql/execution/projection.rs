//! Projection of row bindings into output rows.
//!
//! Items apply left to right and later items overwrite earlier ones on
//! key collision, which is what makes `*, (int-1)*2 AS int` replace the
//! column while `(int-1)*2 AS int, *` restores it.

use crate::sql::ast::{Expr, ProjectionItem};
use crate::sql::error::SqlResult;
use crate::sql::execution::expression::ExpressionEvaluator;
use crate::sql::execution::join::RowBinding;
use crate::sql::execution::types::Value;
use crate::sql::udf::FunctionRegistry;
use std::collections::HashMap;

/// Applies a projection list to one row binding
pub struct Projector;

impl Projector {
    /// Compute one output row; any failing item fails the whole row
    pub fn project(
        items: &[ProjectionItem],
        row: &RowBinding<'_>,
        registry: &FunctionRegistry,
    ) -> SqlResult<HashMap<String, Value>> {
        let mut output = HashMap::new();
        for (position, item) in items.iter().enumerate() {
            match item {
                ProjectionItem::Expression { expr, alias } => {
                    let value = ExpressionEvaluator::evaluate(expr, row, registry)?;
                    let key = match alias {
                        Some(name) => name.clone(),
                        None => Self::derive_name(expr, position),
                    };
                    output.insert(key, value);
                }
                ProjectionItem::Wildcard => {
                    for (key, value) in Self::merge_sides(row) {
                        output.insert(key, value);
                    }
                }
                ProjectionItem::AliasedWildcard(name) => {
                    output.insert(name.clone(), Value::Map(Self::merge_sides(row)));
                }
            }
        }
        Ok(output)
    }

    /// Output key of an anonymous item: a bare column reference keeps its
    /// column name, anything else gets col_N from its list position
    fn derive_name(expr: &Expr, position: usize) -> String {
        match expr {
            Expr::Column { name, .. } => name.clone(),
            _ => format!("col_{}", position + 1),
        }
    }

    /// Merge every side of the binding, leftmost side winning collisions
    fn merge_sides(row: &RowBinding<'_>) -> HashMap<String, Value> {
        let mut merged = HashMap::new();
        for side in row.sides() {
            for (key, value) in side.data {
                merged.entry(key.clone()).or_insert_with(|| value.clone());
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::ast::LiteralValue;
    use crate::sql::execution::join::RelationComposer;
    use crate::sql::execution::types::Tuple;
    use crate::sql::execution::window::WindowBuffer;
    use crate::sql::planner::{PlanInput, WindowRange};
    use chrono::{TimeZone, Utc};

    fn two_side_fixture() -> (RelationComposer, WindowBuffer, WindowBuffer) {
        let inputs = vec![
            PlanInput {
                relation_name: "src1".to_string(),
                alias: None,
                range: WindowRange::Count(4),
            },
            PlanInput {
                relation_name: "src2".to_string(),
                alias: None,
                range: WindowRange::Count(4),
            },
        ];
        let composer = RelationComposer::new(&inputs);
        let ts = Utc.with_ymd_and_hms(2015, 4, 10, 10, 23, 0).unwrap();
        let mut left = WindowBuffer::new(WindowRange::Count(4));
        left.admit(Tuple::new(
            "src1",
            HashMap::from([
                ("shared".to_string(), Value::String("left".to_string())),
                ("l".to_string(), Value::Integer(1)),
            ]),
            ts,
        ));
        let mut right = WindowBuffer::new(WindowRange::Count(4));
        right.admit(Tuple::new(
            "src2",
            HashMap::from([
                ("shared".to_string(), Value::String("right".to_string())),
                ("r".to_string(), Value::Integer(2)),
            ]),
            ts,
        ));
        (composer, left, right)
    }

    #[test]
    fn test_wildcard_collision_prefers_leftmost_side() {
        let (composer, left, right) = two_side_fixture();
        let registry = FunctionRegistry::new();
        let rows = composer.compose(&[&left, &right]);
        let output =
            Projector::project(&[ProjectionItem::Wildcard], &rows[0], &registry).unwrap();
        assert_eq!(output["shared"], Value::String("left".to_string()));
        assert_eq!(output["l"], Value::Integer(1));
        assert_eq!(output["r"], Value::Integer(2));
    }

    #[test]
    fn test_later_item_overwrites_earlier() {
        let (composer, left, right) = two_side_fixture();
        let registry = FunctionRegistry::new();
        let rows = composer.compose(&[&left, &right]);
        let items = vec![
            ProjectionItem::Wildcard,
            ProjectionItem::Expression {
                expr: Expr::Literal(LiteralValue::Integer(9)),
                alias: Some("l".to_string()),
            },
        ];
        let output = Projector::project(&items, &rows[0], &registry).unwrap();
        assert_eq!(output["l"], Value::Integer(9));
    }

    #[test]
    fn test_anonymous_naming() {
        let (composer, left, right) = two_side_fixture();
        let registry = FunctionRegistry::new();
        let rows = composer.compose(&[&left, &right]);
        let items = vec![
            ProjectionItem::Expression {
                expr: Expr::Literal(LiteralValue::Integer(2)),
                alias: None,
            },
            ProjectionItem::Expression {
                expr: Expr::Column {
                    relation: Some("src1".to_string()),
                    name: "l".to_string(),
                },
                alias: None,
            },
        ];
        let output = Projector::project(&items, &rows[0], &registry).unwrap();
        assert_eq!(output["col_1"], Value::Integer(2));
        assert_eq!(output["l"], Value::Integer(1));
    }
}
