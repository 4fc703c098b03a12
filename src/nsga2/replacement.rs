//! (μ+μ) elitist replacement (spec §4.5): fill the next generation
//! front-by-front, truncating the last included front by descending
//! crowding distance.
use crate::nsga2::crowding::crowding_distance;
use crate::objective::Fitness;

/// Selects `mu` indices out of the fronts of a 2μ combined population.
pub fn select_next_generation(
    fronts: &[Vec<usize>],
    fitnesses: &[Fitness],
    mu: usize,
) -> Vec<usize> {
    let mut selected = Vec::with_capacity(mu);
    for front in fronts {
        if selected.len() >= mu {
            break;
        }
        if selected.len() + front.len() <= mu {
            selected.extend_from_slice(front);
            continue;
        }

        let needed = mu - selected.len();
        let distances = crowding_distance(front, fitnesses);
        let mut order: Vec<usize> = (0..front.len()).collect();
        order.sort_by(|&a, &b| distances[b].partial_cmp(&distances[a]).unwrap());
        for &i in order.iter().take(needed) {
            selected.push(front[i]);
        }
        break;
    }
    selected
}
