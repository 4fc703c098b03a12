//! Fast non-dominated sort under constrained-domination (spec §4.5).
use crate::objective::Fitness;

/// A dominates B iff: A is feasible and B is not; or both are infeasible and
/// A has strictly lower violation; or both are feasible and A is at least as
/// good as B in every objective with at least one strictly better (spec
/// §4.5 "CONSTRAINED-DOMINATION").
pub fn dominates(a: &Fitness, b: &Fitness) -> bool {
    let a_feasible = a.feasible();
    let b_feasible = b.feasible();

    if a_feasible && !b_feasible {
        return true;
    }
    if !a_feasible && b_feasible {
        return false;
    }
    if !a_feasible && !b_feasible {
        return a.violation < b.violation;
    }

    let mut strictly_better = false;
    for (av, bv) in a.objectives.iter().zip(b.objectives.iter()) {
        if av > bv {
            return false;
        }
        if av < bv {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Partitions `fitnesses` into non-domination fronts, front 0 first.
/// O(M·N²) in the number of individuals N and objectives M.
pub fn fast_non_dominated_sort(fitnesses: &[Fitness]) -> Vec<Vec<usize>> {
    let n = fitnesses.len();
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut domination_count = vec![0usize; n];
    let mut fronts: Vec<Vec<usize>> = vec![Vec::new()];

    for p in 0..n {
        for q in 0..n {
            if p == q {
                continue;
            }
            if dominates(&fitnesses[p], &fitnesses[q]) {
                dominated_by[p].push(q);
            } else if dominates(&fitnesses[q], &fitnesses[p]) {
                domination_count[p] += 1;
            }
        }
        if domination_count[p] == 0 {
            fronts[0].push(p);
        }
    }

    let mut i = 0;
    while !fronts[i].is_empty() {
        let mut next_front = Vec::new();
        for &p in &fronts[i] {
            for &q in &dominated_by[p] {
                domination_count[q] -= 1;
                if domination_count[q] == 0 {
                    next_front.push(q);
                }
            }
        }
        i += 1;
        fronts.push(next_front);
    }
    fronts.pop();
    fronts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(objectives: Vec<f64>, violation: f64) -> Fitness {
        Fitness {
            objectives,
            violation,
        }
    }

    #[test]
    fn feasible_always_dominates_infeasible() {
        let feasible = f(vec![100.0], 0.0);
        let infeasible = f(vec![0.0], 1.0);
        assert!(dominates(&feasible, &infeasible));
        assert!(!dominates(&infeasible, &feasible));
    }

    #[test]
    fn among_infeasible_lower_violation_wins() {
        let a = f(vec![0.0], 2.0);
        let b = f(vec![0.0], 5.0);
        assert!(dominates(&a, &b));
        assert!(!dominates(&b, &a));
    }

    #[test]
    fn first_front_contains_all_mutually_non_dominated_points() {
        let fitnesses = vec![
            f(vec![1.0, 4.0], 0.0),
            f(vec![2.0, 2.0], 0.0),
            f(vec![4.0, 1.0], 0.0),
            f(vec![3.0, 3.0], 0.0),
        ];
        let fronts = fast_non_dominated_sort(&fitnesses);
        assert_eq!(fronts[0].len(), 3);
        assert!(fronts[0].contains(&0));
        assert!(fronts[0].contains(&1));
        assert!(fronts[0].contains(&2));
        assert_eq!(fronts[1], vec![3]);
    }
}
