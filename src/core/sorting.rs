use serde::{Deserialize, Serialize};

use crate::error::{DigitizeError, DigitizeResult};

/// Stacking/grouping order of data series as an ordered partition.
///
/// Outer order is the draw order of clusters; inner order is the stack order
/// within a cluster. Chart families interpret the partition themselves: bar
/// charts stack the series of one group, other families treat every series
/// independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSorting {
    groups: Vec<Vec<usize>>,
}

impl SeriesSorting {
    /// One singleton group per series, in index order (nothing stacks).
    #[must_use]
    pub fn ungrouped(series_count: usize) -> Self {
        Self {
            groups: (0..series_count).map(|index| vec![index]).collect(),
        }
    }

    /// Builds a partition from explicit groups, validating coverage.
    pub fn from_groups(groups: Vec<Vec<usize>>, series_count: usize) -> DigitizeResult<Self> {
        let sorting = Self { groups };
        sorting.validate(series_count)?;
        Ok(sorting)
    }

    /// Checks that the partition places every series index exactly once.
    pub fn validate(&self, series_count: usize) -> DigitizeResult<()> {
        let mut seen = vec![false; series_count];
        for group in &self.groups {
            for &series in group {
                if series >= series_count {
                    return Err(DigitizeError::InvalidData(format!(
                        "series sorting references series {series} but only {series_count} exist"
                    )));
                }
                if seen[series] {
                    return Err(DigitizeError::InvalidData(format!(
                        "series sorting lists series {series} more than once"
                    )));
                }
                seen[series] = true;
            }
        }
        if let Some(missing) = seen.iter().position(|&covered| !covered) {
            return Err(DigitizeError::InvalidData(format!(
                "series sorting does not place series {missing}"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn groups(&self) -> &[Vec<usize>] {
        &self.groups
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Appends the next series index as its own singleton group.
    pub fn push_series(&mut self) {
        let next = self.series_count();
        self.groups.push(vec![next]);
    }

    /// Removes one series index, renumbering higher indices down and dropping
    /// groups left empty.
    pub fn remove_series(&mut self, series: usize) {
        for group in &mut self.groups {
            group.retain(|&member| member != series);
            for member in group.iter_mut() {
                if *member > series {
                    *member -= 1;
                }
            }
        }
        self.groups.retain(|group| !group.is_empty());
    }
}
