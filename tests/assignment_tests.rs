use unchart::DigitizeError;
use unchart::core::{CostMatrix, assign};

#[test]
fn identity_costs_assign_the_diagonal() {
    let costs = CostMatrix::from_fn(3, 3, |row, col| if row == col { 0.0 } else { 10.0 });
    let pairs = assign(&costs).expect("assignment");
    assert_eq!(pairs, vec![(0, 0), (1, 1), (2, 2)]);
}

#[test]
fn crossed_costs_swap_the_pairing() {
    // Pairing straight costs 10 + 10; crossing costs 1 + 1.
    let costs = CostMatrix::from_fn(2, 2, |row, col| if row == col { 10.0 } else { 1.0 });
    let pairs = assign(&costs).expect("assignment");
    assert_eq!(pairs, vec![(0, 1), (1, 0)]);
}

#[test]
fn known_three_by_three_optimum() {
    let table = [[4.0, 1.0, 3.0], [2.0, 0.0, 5.0], [3.0, 2.0, 2.0]];
    let costs = CostMatrix::from_fn(3, 3, |row, col| table[row][col]);
    let pairs = assign(&costs).expect("assignment");
    let total: f64 = pairs.iter().map(|&(row, col)| table[row][col]).sum();
    assert_eq!(total, 5.0);
}

#[test]
fn rectangular_matrices_match_every_short_side_entry() {
    let costs = CostMatrix::from_fn(2, 4, |row, col| (row as f64 - col as f64).abs());
    let pairs = assign(&costs).expect("assignment");
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs, vec![(0, 0), (1, 1)]);

    let tall = CostMatrix::from_fn(4, 2, |row, col| (row as f64 - col as f64).abs());
    let tall_pairs = assign(&tall).expect("assignment");
    assert_eq!(tall_pairs.len(), 2);
    // Rows 0 and 1 sit exactly on their columns; rows 2 and 3 stay unmatched.
    assert_eq!(tall_pairs, vec![(0, 0), (1, 1)]);
}

#[test]
fn empty_dimensions_yield_no_pairs() {
    let empty = CostMatrix::new(0, 3);
    assert!(assign(&empty).expect("assignment").is_empty());
    let empty_cols = CostMatrix::new(3, 0);
    assert!(assign(&empty_cols).expect("assignment").is_empty());
}

#[test]
fn non_finite_costs_are_rejected() {
    let mut costs = CostMatrix::new(2, 2);
    costs.set(0, 1, f64::INFINITY);
    let err = assign(&costs).expect_err("infinite cost");
    assert!(matches!(err, DigitizeError::InvalidData(_)));
}

#[test]
fn pairs_come_back_sorted_by_row() {
    let costs = CostMatrix::from_fn(3, 3, |row, col| ((row + 1) * (col + 1)) as f64);
    let pairs = assign(&costs).expect("assignment");
    for window in pairs.windows(2) {
        assert!(window[0].0 < window[1].0);
    }
}
