//! Minimum-cost bipartite matching between geometric sets.

use crate::core::geometry::{PixelPoint, Polygon};
use crate::error::{DigitizeError, DigitizeResult};

/// Dense row-major cost matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    costs: Vec<f64>,
}

impl CostMatrix {
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            costs: vec![0.0; rows * cols],
        }
    }

    pub fn from_fn(rows: usize, cols: usize, mut cost: impl FnMut(usize, usize) -> f64) -> Self {
        let mut matrix = Self::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                matrix.costs[row * cols + col] = cost(row, col);
            }
        }
        matrix
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.costs[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, cost: f64) {
        self.costs[row * self.cols + col] = cost;
    }
}

/// Cost matrix of Euclidean point-to-polygon distances: points are rows,
/// polygons are columns. A point inside a polygon costs zero.
#[must_use]
pub fn distance_costs(points: &[PixelPoint], polygons: &[&Polygon]) -> CostMatrix {
    CostMatrix::from_fn(points.len(), polygons.len(), |row, col| {
        polygons[col].distance_to_point(points[row])
    })
}

/// Complete minimum-cost one-to-one pairing between rows and columns.
///
/// Hungarian algorithm (potentials formulation), O(n³). Rectangular matrices
/// are padded square with dummy entries priced above every real cost, so a
/// dummy is never preferred over a feasible real pairing; dummy pairs are
/// dropped from the result. Pairs come back sorted by row.
pub fn assign(costs: &CostMatrix) -> DigitizeResult<Vec<(usize, usize)>> {
    if costs.rows == 0 || costs.cols == 0 {
        return Ok(Vec::new());
    }
    let mut max_cost = 0.0_f64;
    for &cost in &costs.costs {
        if !cost.is_finite() {
            return Err(DigitizeError::InvalidData(
                "assignment costs must be finite".to_owned(),
            ));
        }
        max_cost = max_cost.max(cost);
    }
    let size = costs.rows.max(costs.cols);
    let dummy = max_cost + 1.0;
    let padded = |row: usize, col: usize| -> f64 {
        if row < costs.rows && col < costs.cols {
            costs.get(row, col)
        } else {
            dummy
        }
    };

    // Indices are 1-based inside the solver; column 0 is the virtual start.
    let mut row_potential = vec![0.0_f64; size + 1];
    let mut col_potential = vec![0.0_f64; size + 1];
    let mut matched_row = vec![0_usize; size + 1];
    let mut way = vec![0_usize; size + 1];

    for row in 1..=size {
        matched_row[0] = row;
        let mut current_col = 0_usize;
        let mut min_slack = vec![f64::INFINITY; size + 1];
        let mut visited = vec![false; size + 1];
        loop {
            visited[current_col] = true;
            let current_row = matched_row[current_col];
            let mut delta = f64::INFINITY;
            let mut next_col = 0_usize;
            for col in 1..=size {
                if visited[col] {
                    continue;
                }
                let reduced =
                    padded(current_row - 1, col - 1) - row_potential[current_row] - col_potential[col];
                if reduced < min_slack[col] {
                    min_slack[col] = reduced;
                    way[col] = current_col;
                }
                if min_slack[col] < delta {
                    delta = min_slack[col];
                    next_col = col;
                }
            }
            for col in 0..=size {
                if visited[col] {
                    row_potential[matched_row[col]] += delta;
                    col_potential[col] -= delta;
                } else {
                    min_slack[col] -= delta;
                }
            }
            current_col = next_col;
            if matched_row[current_col] == 0 {
                break;
            }
        }
        // Augment along the alternating path back to the virtual start.
        loop {
            let previous = way[current_col];
            matched_row[current_col] = matched_row[previous];
            current_col = previous;
            if current_col == 0 {
                break;
            }
        }
    }

    let mut pairs = Vec::new();
    for col in 1..=size {
        let row = matched_row[col];
        if row == 0 {
            continue;
        }
        let (row_index, col_index) = (row - 1, col - 1);
        if row_index < costs.rows && col_index < costs.cols {
            pairs.push((row_index, col_index));
        }
    }
    pairs.sort_unstable();
    Ok(pairs)
}
