use tracing::debug;

use crate::axes::model::{AxesInfo, ScaleType, ValuesType};
use crate::axes::projection::{AxisProjector, DataValue, find_closest_value};
use crate::chart::data::PointChartData;
use crate::chart::output::{ChartReconstruction, DataSeries, MarkGeometry, SeriesPoint};
use crate::core::geometry::{Orientation, PixelPoint};
use crate::core::interpolate::sample_polyline_clamped;
use crate::error::DigitizeResult;

use super::{DependentProjectors, resolve_axes};

/// Reconstructs a line, scatter, or dot chart from its annotated point runs.
///
/// Two sampling strategies exist, chosen per chart from the independent axis:
/// a numerical axis with a scale projects every annotated point directly,
/// while a categorical (or scale-less) axis samples each run at the axis'
/// calibrated positions instead, so that every emitted point lines up with a
/// tick.
pub fn reconstruct_points(
    axes: &AxesInfo,
    data: &PointChartData,
    extent_tolerance_px: f64,
    aligned_ratio_min: f64,
) -> DigitizeResult<ChartReconstruction> {
    data.validate()?;
    let resolved = resolve_axes(axes, Orientation::Horizontal, aligned_ratio_min)?;
    let projectors = DependentProjectors::build(&resolved)?;
    let independent = resolved.independent;
    let bounds = independent.bounds();

    let scaled_numeric = independent.axis().values_type == ValuesType::Numerical
        && independent.axis().scale_type != ScaleType::None;
    debug!(
        series = data.series_count(),
        direct = scaled_numeric,
        "reconstructing point series"
    );

    let mut marks = Vec::with_capacity(data.series_count());
    let mut series = Vec::with_capacity(data.series_count());
    if scaled_numeric {
        let x_projector = AxisProjector::build(&independent)?;
        for (run, name) in data.points.iter().zip(&data.series_names) {
            let absolute = absolute_run(bounds.x1, bounds.y1, run);
            let points = absolute
                .iter()
                .map(|point| {
                    let (y, y2) = projectors.values_at_pixel(point.y);
                    SeriesPoint {
                        x: DataValue::Number(x_projector.project_pixel(point.x)),
                        y,
                        y2,
                    }
                })
                .collect();
            marks.push(MarkGeometry::Points(absolute));
            series.push(DataSeries {
                name: name.clone(),
                points,
            });
        }
    } else {
        let anchors = independent.tick_positions()?;
        for (run, name) in data.points.iter().zip(&data.series_names) {
            let absolute = absolute_run(bounds.x1, bounds.y1, run);
            let mut points = Vec::with_capacity(anchors.len());
            for anchor in &anchors {
                let Some(sample) = sample_polyline_clamped(
                    &absolute,
                    Orientation::Horizontal,
                    anchor.position,
                    extent_tolerance_px,
                ) else {
                    continue;
                };
                let (y, y2) = projectors.values_at_pixel(sample.y);
                points.push(SeriesPoint {
                    x: find_closest_value(&independent, anchor.position)?,
                    y,
                    y2,
                });
            }
            marks.push(MarkGeometry::Points(absolute));
            series.push(DataSeries {
                name: name.clone(),
                points,
            });
        }
    }

    Ok(ChartReconstruction { marks, series })
}

/// Point runs are annotated relative to the axes bounding box corner.
fn absolute_run(x1: f64, y1: f64, run: &[PixelPoint]) -> Vec<PixelPoint> {
    run.iter()
        .map(|point| PixelPoint::new(x1 + point.x, y1 + point.y))
        .collect()
}
