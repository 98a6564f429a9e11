//! Relation composition across input windows.
//!
//! The composer turns the current contents of every window buffer into
//! the ordered sequence of candidate rows: the Cartesian product with the
//! first FROM input as the outermost loop. The ordering is fully
//! determined by window contents, which the emitter diffs rely on.

use crate::sql::execution::types::{Tuple, Value};
use crate::sql::execution::window::WindowBuffer;
use crate::sql::planner::PlanInput;
use std::collections::HashMap;

/// One side of a candidate row: the binding names of an input and the
/// data of the tuple drawn from its window
#[derive(Debug, Clone, Copy)]
pub struct BindingSide<'a> {
    pub names: &'a [String],
    pub data: &'a HashMap<String, Value>,
}

/// One candidate row of the cross product, mapping each input's binding
/// names to the tuple data selected for it
#[derive(Debug, Clone)]
pub struct RowBinding<'a> {
    sides: Vec<BindingSide<'a>>,
}

impl<'a> RowBinding<'a> {
    pub fn sides(&self) -> &[BindingSide<'a>] {
        &self.sides
    }

    /// Find the side a qualified column reference resolves to
    pub fn side_by_name(&self, relation: &str) -> Option<&BindingSide<'a>> {
        self.sides
            .iter()
            .find(|side| side.names.iter().any(|name| name == relation))
    }
}

/// Enumerates row bindings over the windows of a plan's inputs
#[derive(Debug)]
pub struct RelationComposer {
    side_names: Vec<Vec<String>>,
}

impl RelationComposer {
    /// Precompute the binding names of each input.
    ///
    /// Each side answers to its alias, or to its relation name when no
    /// alias was given. A single-input plan answers to both, so that
    /// `src:int` and `x:int` resolve alike under `FROM src AS x`.
    pub fn new(inputs: &[PlanInput]) -> Self {
        let single = inputs.len() == 1;
        let side_names = inputs
            .iter()
            .map(|input| {
                let mut names = vec![input.binding_name().to_string()];
                if single && input.binding_name() != input.relation_name {
                    names.push(input.relation_name.clone());
                }
                names
            })
            .collect();
        Self { side_names }
    }

    /// Materialize the candidate rows for the given window contents
    ///
    /// Windows must be passed in plan input order. The first window is
    /// the outermost loop; any empty window yields no rows.
    pub fn compose<'a>(&'a self, windows: &[&'a WindowBuffer]) -> Vec<RowBinding<'a>> {
        let snapshots: Vec<Vec<&Tuple>> = windows
            .iter()
            .map(|window| window.tuples().iter().collect())
            .collect();
        let total: usize = snapshots.iter().map(|s| s.len()).product();
        let mut rows = Vec::with_capacity(total);
        if total == 0 {
            return rows;
        }

        let arity = snapshots.len();
        let mut indices = vec![0usize; arity];
        'product: loop {
            let sides = (0..arity)
                .map(|i| BindingSide {
                    names: &self.side_names[i],
                    data: &snapshots[i][indices[i]].data,
                })
                .collect();
            rows.push(RowBinding { sides });

            // Advance like an odometer, innermost position fastest.
            let mut position = arity;
            while position > 0 {
                position -= 1;
                indices[position] += 1;
                if indices[position] < snapshots[position].len() {
                    continue 'product;
                }
                indices[position] = 0;
            }
            break;
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::execution::types::Tuple;
    use crate::sql::planner::{PlanInput, WindowRange};
    use chrono::{TimeZone, Utc};

    fn plan_input(name: &str, alias: Option<&str>) -> PlanInput {
        PlanInput {
            relation_name: name.to_string(),
            alias: alias.map(|a| a.to_string()),
            range: WindowRange::Count(8),
        }
    }

    fn window_with(input: &str, values: &[i64]) -> WindowBuffer {
        let mut window = WindowBuffer::new(WindowRange::Count(8));
        for (i, v) in values.iter().enumerate() {
            let mut data = HashMap::new();
            data.insert("v".to_string(), Value::Integer(*v));
            window.admit(Tuple::new(
                input,
                data,
                Utc.with_ymd_and_hms(2015, 4, 10, 10, 23, i as u32).unwrap(),
            ));
        }
        window
    }

    fn values_of(rows: &[RowBinding<'_>]) -> Vec<Vec<i64>> {
        rows.iter()
            .map(|row| {
                row.sides()
                    .iter()
                    .map(|side| match side.data.get("v") {
                        Some(Value::Integer(i)) => *i,
                        other => panic!("unexpected value {:?}", other),
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_single_input_yields_admission_order() {
        let composer = RelationComposer::new(&[plan_input("src", None)]);
        let window = window_with("src", &[1, 2, 3]);
        let rows = composer.compose(&[&window]);
        assert_eq!(values_of(&rows), vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn test_cross_product_order_first_input_outermost() {
        let composer =
            RelationComposer::new(&[plan_input("src1", None), plan_input("src2", None)]);
        let left = window_with("src1", &[1, 2]);
        let right = window_with("src2", &[10, 20]);
        let rows = composer.compose(&[&left, &right]);
        assert_eq!(
            values_of(&rows),
            vec![vec![1, 10], vec![1, 20], vec![2, 10], vec![2, 20]]
        );
    }

    #[test]
    fn test_empty_window_yields_no_rows() {
        let composer =
            RelationComposer::new(&[plan_input("src1", None), plan_input("src2", None)]);
        let left = window_with("src1", &[1, 2]);
        let right = WindowBuffer::new(WindowRange::Count(8));
        assert!(composer.compose(&[&left, &right]).is_empty());
    }

    #[test]
    fn test_single_input_alias_also_answers_to_source_name() {
        let composer = RelationComposer::new(&[plan_input("src", Some("x"))]);
        let window = window_with("src", &[1]);
        let rows = composer.compose(&[&window]);
        assert!(rows[0].side_by_name("x").is_some());
        assert!(rows[0].side_by_name("src").is_some());
    }

    #[test]
    fn test_join_alias_does_not_answer_to_source_name() {
        let composer =
            RelationComposer::new(&[plan_input("src1", Some("x")), plan_input("src2", Some("y"))]);
        let left = window_with("src1", &[1]);
        let right = window_with("src2", &[2]);
        let rows = composer.compose(&[&left, &right]);
        assert!(rows[0].side_by_name("x").is_some());
        assert!(rows[0].side_by_name("src1").is_none());
    }
}
