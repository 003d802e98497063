use serde::{Deserialize, Serialize};

use crate::axes::model::AxesInfo;
use crate::chart::data::ChartData;
use crate::error::DigitizeResult;

/// Complete human-annotated description of one chart image: the axes markup
/// plus the family-specific mark geometry.
///
/// `axes_verified` is an operator sign-off flag. It is carried through
/// serialization but never set by the engine, and any legacy-format upgrade
/// clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAnnotation {
    pub axes: AxesInfo,
    pub chart: ChartData,
    #[serde(default)]
    pub axes_verified: bool,
}

impl ChartAnnotation {
    #[must_use]
    pub fn new(axes: AxesInfo, chart: ChartData) -> Self {
        Self {
            axes,
            chart,
            axes_verified: false,
        }
    }

    /// Validates the axes markup and the chart geometry together. Cheap
    /// enough to run on every load; deserialized input is never trusted.
    pub fn validate(&self) -> DigitizeResult<()> {
        self.axes.validate()?;
        self.chart.validate()
    }
}
