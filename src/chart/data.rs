use serde::{Deserialize, Serialize};

use crate::chart::layout::SeriesLayout;
use crate::core::geometry::PixelPoint;
use crate::core::sorting::SeriesSorting;
use crate::error::{DigitizeError, DigitizeResult};

/// Closed set of chart families the engine reconstructs.
///
/// Family data is created empty when a chart's type is fixed and replaced
/// wholesale when the type changes; it is never migrated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartData {
    Bar(BarChartData),
    Box(BoxChartData),
    Line(PointChartData),
    Scatter(PointChartData),
    Dot(PointChartData),
}

impl ChartData {
    #[must_use]
    pub fn family_name(&self) -> &'static str {
        match self {
            Self::Bar(_) => "bar",
            Self::Box(_) => "box",
            Self::Line(_) => "line",
            Self::Scatter(_) => "scatter",
            Self::Dot(_) => "dot",
        }
    }

    pub fn validate(&self) -> DigitizeResult<()> {
        match self {
            Self::Bar(data) => data.validate(),
            Self::Box(data) => data.validate(),
            Self::Line(data) | Self::Scatter(data) | Self::Dot(data) => data.validate(),
        }
    }
}

/// How bar clusters are walked along the independent axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BarGrouping {
    /// Clusters are categories; each sorting group occupies one slot inside.
    #[default]
    ByCategory,
    /// Clusters are sorting groups; each category occupies one slot inside.
    BySeries,
}

/// Annotated bar-chart geometry: a `[series][category]` grid of signed pixel
/// lengths plus the layout that places them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BarChartData {
    pub series_names: Vec<Option<String>>,
    pub categories: Vec<String>,
    /// `lengths[series][category]`, signed along the bar orientation.
    pub lengths: Vec<Vec<f64>>,
    pub sorting: SeriesSorting,
    pub layout: SeriesLayout,
    pub grouping: BarGrouping,
}

impl BarChartData {
    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series_names.len()
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn add_series(&mut self, name: Option<String>) {
        self.series_names.push(name);
        self.lengths.push(vec![0.0; self.categories.len()]);
        self.sorting.push_series();
    }

    pub fn remove_series(&mut self, series: usize) -> DigitizeResult<()> {
        if series >= self.series_names.len() {
            return Err(DigitizeError::InvalidData(format!(
                "cannot remove series {series}: only {} exist",
                self.series_names.len()
            )));
        }
        self.series_names.remove(series);
        self.lengths.remove(series);
        self.sorting.remove_series(series);
        Ok(())
    }

    pub fn add_category(&mut self, name: impl Into<String>) {
        self.categories.push(name.into());
        for row in &mut self.lengths {
            row.push(0.0);
        }
    }

    pub fn remove_category(&mut self, category: usize) -> DigitizeResult<()> {
        if category >= self.categories.len() {
            return Err(DigitizeError::InvalidData(format!(
                "cannot remove category {category}: only {} exist",
                self.categories.len()
            )));
        }
        self.categories.remove(category);
        for row in &mut self.lengths {
            row.remove(category);
        }
        Ok(())
    }

    /// Checks the parallel arrays are in lock-step and all lengths finite.
    pub fn validate(&self) -> DigitizeResult<()> {
        if self.lengths.len() != self.series_names.len() {
            return Err(DigitizeError::InvalidData(format!(
                "bar grid has {} rows for {} series",
                self.lengths.len(),
                self.series_names.len()
            )));
        }
        for (series, row) in self.lengths.iter().enumerate() {
            if row.len() != self.categories.len() {
                return Err(DigitizeError::InvalidData(format!(
                    "bar series {series} has {} lengths for {} categories",
                    row.len(),
                    self.categories.len()
                )));
            }
            if row.iter().any(|length| !length.is_finite()) {
                return Err(DigitizeError::InvalidData(format!(
                    "bar series {series} has a non-finite length"
                )));
            }
        }
        self.sorting.validate(self.series_names.len())?;
        self.layout.validate()
    }
}

/// The five quantities of one box mark, as signed pixel offsets from the
/// dependent-axis baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct BoxValues {
    pub whisker_low: f64,
    pub quartile_first: f64,
    pub median: f64,
    pub quartile_third: f64,
    pub whisker_high: f64,
}

impl BoxValues {
    /// Offsets in fixed whisker-low → whisker-high order.
    #[must_use]
    pub fn offsets(self) -> [f64; 5] {
        [
            self.whisker_low,
            self.quartile_first,
            self.median,
            self.quartile_third,
            self.whisker_high,
        ]
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.offsets().iter().all(|offset| offset.is_finite())
    }
}

/// Annotated box-chart geometry: a `[series][category]` grid of box quantity
/// offsets. Boxes never stack; each series in a category occupies its own
/// slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BoxChartData {
    pub series_names: Vec<Option<String>>,
    pub categories: Vec<String>,
    /// `values[series][category]`.
    pub values: Vec<Vec<BoxValues>>,
    pub layout: SeriesLayout,
}

impl BoxChartData {
    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series_names.len()
    }

    #[must_use]
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn add_series(&mut self, name: Option<String>) {
        self.series_names.push(name);
        self.values
            .push(vec![BoxValues::default(); self.categories.len()]);
    }

    pub fn remove_series(&mut self, series: usize) -> DigitizeResult<()> {
        if series >= self.series_names.len() {
            return Err(DigitizeError::InvalidData(format!(
                "cannot remove series {series}: only {} exist",
                self.series_names.len()
            )));
        }
        self.series_names.remove(series);
        self.values.remove(series);
        Ok(())
    }

    pub fn add_category(&mut self, name: impl Into<String>) {
        self.categories.push(name.into());
        for row in &mut self.values {
            row.push(BoxValues::default());
        }
    }

    pub fn remove_category(&mut self, category: usize) -> DigitizeResult<()> {
        if category >= self.categories.len() {
            return Err(DigitizeError::InvalidData(format!(
                "cannot remove category {category}: only {} exist",
                self.categories.len()
            )));
        }
        self.categories.remove(category);
        for row in &mut self.values {
            row.remove(category);
        }
        Ok(())
    }

    pub fn validate(&self) -> DigitizeResult<()> {
        if self.values.len() != self.series_names.len() {
            return Err(DigitizeError::InvalidData(format!(
                "box grid has {} rows for {} series",
                self.values.len(),
                self.series_names.len()
            )));
        }
        for (series, row) in self.values.iter().enumerate() {
            if row.len() != self.categories.len() {
                return Err(DigitizeError::InvalidData(format!(
                    "box series {series} has {} value sets for {} categories",
                    row.len(),
                    self.categories.len()
                )));
            }
            if row.iter().any(|values| !values.is_finite()) {
                return Err(DigitizeError::InvalidData(format!(
                    "box series {series} has a non-finite offset"
                )));
            }
        }
        self.layout.validate()
    }
}

/// Annotated line/scatter/dot geometry: per-series pixel points relative to
/// the axis bounding box's `(x1, y1)` corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PointChartData {
    pub series_names: Vec<Option<String>>,
    /// `points[series]`, in annotation order.
    pub points: Vec<Vec<PixelPoint>>,
}

impl PointChartData {
    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series_names.len()
    }

    pub fn add_series(&mut self, name: Option<String>) {
        self.series_names.push(name);
        self.points.push(Vec::new());
    }

    pub fn remove_series(&mut self, series: usize) -> DigitizeResult<()> {
        if series >= self.series_names.len() {
            return Err(DigitizeError::InvalidData(format!(
                "cannot remove series {series}: only {} exist",
                self.series_names.len()
            )));
        }
        self.series_names.remove(series);
        self.points.remove(series);
        Ok(())
    }

    pub fn validate(&self) -> DigitizeResult<()> {
        if self.points.len() != self.series_names.len() {
            return Err(DigitizeError::InvalidData(format!(
                "point chart has {} point runs for {} series",
                self.points.len(),
                self.series_names.len()
            )));
        }
        for (series, run) in self.points.iter().enumerate() {
            for point in run {
                if point.validate().is_err() {
                    return Err(DigitizeError::InvalidData(format!(
                        "point series {series} has a non-finite coordinate"
                    )));
                }
            }
        }
        Ok(())
    }
}
