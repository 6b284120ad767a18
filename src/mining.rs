//! Constraint builders for mine scheduling.
//!
//! Thin helpers that assemble [`Constraint`] records from block and task
//! identifiers. They register nothing; post the result on a
//! [`Problem`](crate::cp::Problem).

use crate::cp::Constraint;

/// One precedence per consecutive pair: each block is mined strictly
/// before the next. Fewer than two blocks yield no constraints.
///
/// # Examples
///
/// ```
/// use u_csp::mining::create_mining_sequence_constraint;
///
/// let chain = create_mining_sequence_constraint(&["B1", "B2", "B3"]);
/// assert_eq!(chain.len(), 2);
/// assert_eq!(chain[1].variables(), &["B2".to_string(), "B3".to_string()]);
/// ```
pub fn create_mining_sequence_constraint<S: AsRef<str>>(block_ids: &[S]) -> Vec<Constraint> {
    block_ids
        .windows(2)
        .map(|pair| Constraint::precedence(pair[0].as_ref(), pair[1].as_ref()))
        .collect()
}

/// At most `capacity` unit tasks may run in any slot of `[0, horizon)`.
pub fn create_resource_capacity_constraint<S: AsRef<str>>(
    task_ids: &[S],
    capacity: i64,
    horizon: i64,
) -> Constraint {
    Constraint::cumulative(owned(task_ids), capacity, horizon)
}

/// Tasks sharing one piece of equipment get pairwise distinct slots.
pub fn create_equipment_exclusion_constraint<S: AsRef<str>>(task_ids: &[S]) -> Constraint {
    Constraint::mutual_exclusion(owned(task_ids))
}

fn owned<S: AsRef<str>>(ids: &[S]) -> Vec<String> {
    ids.iter().map(|s| s.as_ref().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cp::{ConstraintKind, ConstraintType, Direction, Problem, SolverConfig};

    #[test]
    fn test_sequence_chain() {
        let chain = create_mining_sequence_constraint(&["a", "b", "c", "d"]);
        assert_eq!(chain.len(), 3);
        assert!(chain
            .iter()
            .all(|c| c.constraint_type() == ConstraintType::Precedence));
        assert_eq!(chain[0].variables(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_short_sequences() {
        assert!(create_mining_sequence_constraint::<&str>(&[]).is_empty());
        assert!(create_mining_sequence_constraint(&["only"]).is_empty());
    }

    #[test]
    fn test_resource_capacity() {
        let c = create_resource_capacity_constraint(&["t1", "t2"], 1, 8);
        assert_eq!(
            c.kind(),
            &ConstraintKind::Cumulative {
                capacity: 1,
                horizon: 8,
                durations: vec![1, 1],
                demands: vec![1, 1],
            }
        );
    }

    #[test]
    fn test_pit_schedule() {
        // two benches mined top-down, one shovel shared by the first blocks
        let blocks = ["n1", "n2", "n3", "s1", "s2"];
        let mut p = Problem::new();
        for b in blocks {
            p.add_variable(b, 0..=5).unwrap();
        }
        p.add_variable("makespan", 0..=5).unwrap();

        p.post_all(create_mining_sequence_constraint(&["n1", "n2", "n3", "makespan"]));
        p.post_all(create_mining_sequence_constraint(&["s1", "s2", "makespan"]));
        p.post(create_equipment_exclusion_constraint(&["n1", "s1"]));
        p.post(create_resource_capacity_constraint(&blocks, 2, 6));
        p.set_objective("makespan", Direction::Min);

        let solution = p.solve(&SolverConfig::default()).unwrap().unwrap();
        assert_eq!(solution.objective_value, Some(3));
        assert!(solution.is_optimal);
        assert_ne!(solution.value("n1"), solution.value("s1"));
        assert!(p.is_satisfied(&solution.assignments));
    }
}
