use serde::{Deserialize, Serialize};

use crate::core::geometry::Orientation;
use crate::error::{DigitizeError, DigitizeResult};

/// Cursor geometry shared by bar and box layouts.
///
/// `orientation` is the direction marks extend: vertical bars advance
/// left-to-right across the bounding box, horizontal bars top-to-bottom.
/// All distances are pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesLayout {
    /// Offset of the first cluster from the box edge the walk starts at.
    pub offset: f64,
    /// Extent of one slot along the walk direction.
    pub width: f64,
    /// Gap between slots within one cluster.
    pub inner_gap: f64,
    /// Gap between clusters.
    pub outer_gap: f64,
    pub orientation: Orientation,
}

impl Default for SeriesLayout {
    fn default() -> Self {
        Self {
            offset: 0.0,
            width: 0.0,
            inner_gap: 0.0,
            outer_gap: 0.0,
            orientation: Orientation::Vertical,
        }
    }
}

impl SeriesLayout {
    /// Direction the cursor advances: orthogonal to the mark orientation.
    #[must_use]
    pub fn walk_direction(self) -> Orientation {
        self.orientation.orthogonal()
    }

    pub fn validate(self) -> DigitizeResult<()> {
        if !self.offset.is_finite()
            || !self.width.is_finite()
            || !self.inner_gap.is_finite()
            || !self.outer_gap.is_finite()
        {
            return Err(DigitizeError::InvalidData(
                "layout distances must be finite".to_owned(),
            ));
        }
        if self.width < 0.0 || self.inner_gap < 0.0 || self.outer_gap < 0.0 {
            return Err(DigitizeError::InvalidData(
                "layout width and gaps must be >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Start coordinate of every slot the cursor visits, relative to the walk's
/// starting box edge: one inner list per cluster, `cluster_sizes[i]` slots in
/// cluster `i`.
#[must_use]
pub fn slot_starts(layout: SeriesLayout, cluster_sizes: &[usize]) -> Vec<Vec<f64>> {
    let mut starts = Vec::with_capacity(cluster_sizes.len());
    let mut cursor = layout.offset;
    for (cluster_index, &size) in cluster_sizes.iter().enumerate() {
        if cluster_index > 0 {
            cursor += layout.outer_gap;
        }
        let mut cluster = Vec::with_capacity(size);
        for slot_index in 0..size {
            if slot_index > 0 {
                cursor += layout.inner_gap;
            }
            cluster.push(cursor);
            cursor += layout.width;
        }
        starts.push(cluster);
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_advances_width_and_gaps() {
        let layout = SeriesLayout {
            offset: 10.0,
            width: 8.0,
            inner_gap: 2.0,
            outer_gap: 6.0,
            orientation: Orientation::Vertical,
        };
        let starts = slot_starts(layout, &[2, 1]);
        assert_eq!(starts, vec![vec![10.0, 20.0], vec![34.0]]);
    }

    #[test]
    fn empty_clusters_consume_only_outer_gap() {
        let layout = SeriesLayout {
            offset: 0.0,
            width: 5.0,
            inner_gap: 1.0,
            outer_gap: 3.0,
            orientation: Orientation::Vertical,
        };
        let starts = slot_starts(layout, &[0, 1]);
        assert_eq!(starts, vec![vec![], vec![3.0]]);
    }
}
