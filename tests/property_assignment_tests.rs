use proptest::prelude::*;
use unchart::core::{CostMatrix, assign};

proptest! {
    #[test]
    fn square_assignment_is_a_bijection(
        costs in prop::collection::vec(0.0f64..1_000.0, 1..=36)
    ) {
        let n = (costs.len() as f64).sqrt() as usize;
        prop_assume!(n >= 1);
        let matrix = CostMatrix::from_fn(n, n, |row, col| costs[(row * n + col) % costs.len()]);

        let pairs = assign(&matrix).expect("assignment");
        prop_assert_eq!(pairs.len(), n);

        let mut rows: Vec<usize> = pairs.iter().map(|&(row, _)| row).collect();
        let mut cols: Vec<usize> = pairs.iter().map(|&(_, col)| col).collect();
        rows.sort_unstable();
        cols.sort_unstable();
        rows.dedup();
        cols.dedup();
        prop_assert_eq!(rows.len(), n);
        prop_assert_eq!(cols.len(), n);
    }

    #[test]
    fn no_single_swap_improves_the_total(
        costs in prop::collection::vec(0.0f64..1_000.0, 16)
    ) {
        let matrix = CostMatrix::from_fn(4, 4, |row, col| costs[row * 4 + col]);
        let pairs = assign(&matrix).expect("assignment");
        let total: f64 = pairs.iter().map(|&(row, col)| matrix.get(row, col)).sum();

        for first in 0..pairs.len() {
            for second in (first + 1)..pairs.len() {
                let mut swapped = pairs.clone();
                let (row_a, col_a) = swapped[first];
                let (row_b, col_b) = swapped[second];
                swapped[first] = (row_a, col_b);
                swapped[second] = (row_b, col_a);
                let swapped_total: f64 = swapped
                    .iter()
                    .map(|&(row, col)| matrix.get(row, col))
                    .sum();
                prop_assert!(total <= swapped_total + 1e-9);
            }
        }
    }

    #[test]
    fn rectangular_assignment_matches_the_short_side(
        rows in 1usize..6,
        cols in 1usize..6,
        seed in 0u64..1_000
    ) {
        let matrix = CostMatrix::from_fn(rows, cols, |row, col| {
            (((row * 31 + col * 17 + seed as usize) % 97) + 1) as f64
        });
        let pairs = assign(&matrix).expect("assignment");
        prop_assert_eq!(pairs.len(), rows.min(cols));
        for &(row, col) in &pairs {
            prop_assert!(row < rows);
            prop_assert!(col < cols);
        }
    }
}
