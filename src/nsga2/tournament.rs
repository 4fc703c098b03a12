//! Binary tournament selection (spec §4.5): lower rank wins, ties broken by
//! larger crowding distance, remaining ties broken by a coin flip.
use rand::Rng;

/// Returns the index (into `rank`/`crowding`) of the tournament winner,
/// picked from two distinct uniformly-chosen contestants.
pub fn binary_tournament<R: Rng>(rank: &[usize], crowding: &[f64], rng: &mut R) -> usize {
    let n = rank.len();
    if n <= 1 {
        return 0;
    }
    let a = rng.gen_range(0..n);
    let mut b = rng.gen_range(0..n - 1);
    if b >= a {
        b += 1;
    }

    if rank[a] < rank[b] {
        a
    } else if rank[b] < rank[a] {
        b
    } else if crowding[a] > crowding[b] {
        a
    } else if crowding[b] > crowding[a] {
        b
    } else if rng.gen_bool(0.5) {
        a
    } else {
        b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn lower_rank_always_wins() {
        let rank = vec![0, 5];
        let crowding = vec![0.0, 100.0];
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(binary_tournament(&rank, &crowding, &mut rng), 0);
        }
    }

    #[test]
    fn equal_rank_prefers_larger_crowding_distance() {
        let rank = vec![1, 1];
        let crowding = vec![2.0, 9.0];
        let mut rng = SmallRng::seed_from_u64(2);
        for _ in 0..20 {
            assert_eq!(binary_tournament(&rank, &crowding, &mut rng), 1);
        }
    }

    #[test]
    fn single_contestant_population_does_not_panic() {
        let rank = vec![0];
        let crowding = vec![0.0];
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(binary_tournament(&rank, &crowding, &mut rng), 0);
    }
}
