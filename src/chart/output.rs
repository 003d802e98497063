use serde::{Deserialize, Serialize};

use crate::axes::projection::DataValue;
use crate::core::geometry::{BoundingBox, PixelPoint};

/// Geometry of one reconstructed visual primitive, in absolute image pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkGeometry {
    /// Axis-aligned bar rectangle.
    Bar(BoundingBox),
    /// The five segments of one box mark in whisker-low → whisker-high order,
    /// each a degenerate rectangle across the slot.
    BoxSegments([BoundingBox; 5]),
    /// Pixel run of one line/scatter/dot series.
    Points(Vec<PixelPoint>),
}

/// One exported data point. `y`/`y2` track which dependent axis slots were
/// populated during reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: DataValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<DataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<DataValue>,
}

/// Named series of exported points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSeries {
    pub name: Option<String>,
    pub points: Vec<SeriesPoint>,
}

/// Everything reconstruction produces for one chart: the visual primitives
/// and the structured series table derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChartReconstruction {
    pub marks: Vec<MarkGeometry>,
    pub series: Vec<DataSeries>,
}
