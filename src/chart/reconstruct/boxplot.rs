use tracing::debug;

use crate::axes::model::AxesInfo;
use crate::axes::projection::DataValue;
use crate::chart::data::BoxChartData;
use crate::chart::layout::slot_starts;
use crate::chart::output::{ChartReconstruction, DataSeries, MarkGeometry, SeriesPoint};
use crate::core::geometry::{BoundingBox, Orientation};
use crate::error::DigitizeResult;

use super::{DependentProjectors, resolve_axes};

/// Name suffixes of the five series derived from one annotated box series,
/// in whisker-low → whisker-high order.
const QUANTITY_SUFFIXES: [&str; 5] = [
    " (whisker low)",
    " (q1)",
    " (median)",
    " (q3)",
    " (whisker high)",
];

/// Reconstructs a box chart: five projected quantities per box, no stacking.
pub fn reconstruct_box(
    axes: &AxesInfo,
    data: &BoxChartData,
    aligned_ratio_min: f64,
) -> DigitizeResult<ChartReconstruction> {
    data.validate()?;
    let resolved = resolve_axes(axes, data.layout.orientation.orthogonal(), aligned_ratio_min)?;
    let projectors = DependentProjectors::build(&resolved)?;
    let bounds = resolved.independent.bounds();

    // Category-major walk: every series of a category occupies its own slot.
    let cluster_sizes = vec![data.series_count(); data.category_count()];
    let starts = slot_starts(data.layout, &cluster_sizes);
    let mut marks = Vec::with_capacity(data.series_count() * data.category_count());
    for (category, cluster) in starts.iter().enumerate() {
        for (series, &start) in cluster.iter().enumerate() {
            let offsets = data.values[series][category].offsets();
            let segments = offsets.map(|offset| {
                segment_bounds(
                    bounds,
                    data.layout.orientation,
                    start,
                    data.layout.width,
                    offset,
                )
            });
            marks.push(MarkGeometry::BoxSegments(segments));
        }
    }
    debug!(boxes = marks.len(), "laid out box marks");

    let mut series = Vec::with_capacity(data.series_count() * QUANTITY_SUFFIXES.len());
    for (series_index, name) in data.series_names.iter().enumerate() {
        for (quantity, suffix) in QUANTITY_SUFFIXES.iter().enumerate() {
            let mut points = Vec::with_capacity(data.category_count());
            for (category_index, category) in data.categories.iter().enumerate() {
                let offset = data.values[series_index][category_index].offsets()[quantity];
                let (y, y2) = projectors.values_at_offset(offset);
                points.push(SeriesPoint {
                    x: DataValue::Category(category.clone()),
                    y,
                    y2,
                });
            }
            series.push(DataSeries {
                name: name.as_ref().map(|name| format!("{name}{suffix}")),
                points,
            });
        }
    }

    Ok(ChartReconstruction { marks, series })
}

/// Degenerate rectangle of one box quantity segment: spans the slot width at
/// the quantity's pixel position along the dependent axis.
fn segment_bounds(
    bounds: BoundingBox,
    orientation: Orientation,
    start: f64,
    width: f64,
    offset: f64,
) -> BoundingBox {
    match orientation {
        Orientation::Vertical => BoundingBox::new(
            bounds.x1 + start,
            bounds.y2 - offset,
            bounds.x1 + start + width,
            bounds.y2 - offset,
        ),
        Orientation::Horizontal => BoundingBox::new(
            bounds.x1 + offset,
            bounds.y1 + start,
            bounds.x1 + offset,
            bounds.y1 + start + width,
        ),
    }
}
