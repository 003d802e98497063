use tracing::{debug, warn};

use crate::axes::model::{AxesInfo, LabelRole};
use crate::axes::projection::DataValue;
use crate::chart::data::{BarChartData, BarGrouping};
use crate::chart::layout::slot_starts;
use crate::chart::output::{ChartReconstruction, DataSeries, MarkGeometry, SeriesPoint};
use crate::core::assignment::{assign, distance_costs};
use crate::core::geometry::{BoundingBox, Orientation, PixelPoint, Polygon};
use crate::core::numeric::parse_label_value;
use crate::error::DigitizeResult;

use super::{DependentProjectors, resolve_axes};

/// One laid-out bar layer, before value resolution.
struct BarMark {
    series: usize,
    category: usize,
    bounds: BoundingBox,
    /// Stack base in dependent-axis offset space; `None` for a singleton group.
    base_offset: Option<f64>,
    top_offset: f64,
}

/// Reconstructs a bar chart: cursor layout, stacking, projection, and the
/// optional value-label pass.
pub fn reconstruct_bar(
    axes: &AxesInfo,
    data: &BarChartData,
    aligned_ratio_min: f64,
) -> DigitizeResult<ChartReconstruction> {
    data.validate()?;
    let resolved = resolve_axes(axes, data.layout.orientation.orthogonal(), aligned_ratio_min)?;
    let projectors = DependentProjectors::build(&resolved)?;
    let bounds = resolved.independent.bounds();

    let marks = lay_out_bars(data, bounds);
    debug!(
        bars = marks.len(),
        grouping = ?data.grouping,
        "laid out bar marks"
    );

    // Projection is the default value source; a complete value-label matching
    // replaces it when every label parses.
    let mut values: Vec<(Option<DataValue>, Option<DataValue>)> = marks
        .iter()
        .map(|mark| projectors.layer_values(mark.top_offset, mark.base_offset))
        .collect();
    if let Some(labeled) = match_value_labels(axes, &marks) {
        for (mark_index, value) in labeled {
            let (y, y2) = &mut values[mark_index];
            if y.is_some() {
                *y = Some(DataValue::Number(value));
            } else {
                *y2 = Some(DataValue::Number(value));
            }
        }
    }

    // Grid lookup: every (series, category) pair owns exactly one mark.
    let mut by_cell = vec![usize::MAX; data.series_count() * data.category_count()];
    for (index, mark) in marks.iter().enumerate() {
        by_cell[mark.series * data.category_count() + mark.category] = index;
    }

    let mut series = Vec::with_capacity(data.series_count());
    for (series_index, name) in data.series_names.iter().enumerate() {
        let mut points = Vec::with_capacity(data.category_count());
        for (category_index, category) in data.categories.iter().enumerate() {
            let mark_index = by_cell[series_index * data.category_count() + category_index];
            let (y, y2) = values[mark_index].clone();
            points.push(SeriesPoint {
                x: DataValue::Category(category.clone()),
                y,
                y2,
            });
        }
        series.push(DataSeries {
            name: name.clone(),
            points,
        });
    }

    Ok(ChartReconstruction {
        marks: marks
            .into_iter()
            .map(|mark| MarkGeometry::Bar(mark.bounds))
            .collect(),
        series,
    })
}

/// Walks the cursor layout and stacks each sorting group's series.
fn lay_out_bars(data: &BarChartData, bounds: BoundingBox) -> Vec<BarMark> {
    let groups = data.sorting.groups();
    let mut marks = Vec::with_capacity(data.series_count() * data.category_count());

    // (category, group) per slot, in cursor order.
    let slots: Vec<(usize, usize)>;
    let cluster_sizes: Vec<usize>;
    match data.grouping {
        BarGrouping::ByCategory => {
            cluster_sizes = vec![groups.len(); data.category_count()];
            slots = (0..data.category_count())
                .flat_map(|category| (0..groups.len()).map(move |group| (category, group)))
                .collect();
        }
        BarGrouping::BySeries => {
            cluster_sizes = vec![data.category_count(); groups.len()];
            slots = (0..groups.len())
                .flat_map(|group| (0..data.category_count()).map(move |category| (category, group)))
                .collect();
        }
    }

    let starts: Vec<f64> = slot_starts(data.layout, &cluster_sizes)
        .into_iter()
        .flatten()
        .collect();
    for (&(category, group), &start) in slots.iter().zip(&starts) {
        let members = &groups[group];
        let stacked = members.len() > 1;
        let mut base = 0.0;
        for &series in members {
            let top = base + data.lengths[series][category];
            marks.push(BarMark {
                series,
                category,
                bounds: bar_bounds(bounds, data.layout.orientation, start, data.layout.width, base, top),
                base_offset: stacked.then_some(base),
                top_offset: top,
            });
            base = top;
        }
    }
    marks
}

/// Absolute pixel rectangle of one bar layer. Vertical bars rise from the box
/// bottom, horizontal bars extend from the box left edge; `start` is the slot
/// coordinate along the walk direction.
fn bar_bounds(
    bounds: BoundingBox,
    orientation: Orientation,
    start: f64,
    width: f64,
    base: f64,
    top: f64,
) -> BoundingBox {
    match orientation {
        Orientation::Vertical => BoundingBox::new(
            bounds.x1 + start,
            bounds.y2 - top,
            bounds.x1 + start + width,
            bounds.y2 - base,
        )
        .normalized(),
        Orientation::Horizontal => BoundingBox::new(
            bounds.x1 + base,
            bounds.y1 + start,
            bounds.x1 + top,
            bounds.y1 + start + width,
        )
        .normalized(),
    }
}

/// Matches value labels against bar rectangles when they exist in 1:1 count.
/// Any parse failure abandons the pass so projection stays the value source.
fn match_value_labels(axes: &AxesInfo, marks: &[BarMark]) -> Option<Vec<(usize, f64)>> {
    let labels: Vec<_> = axes
        .tick_labels
        .values()
        .filter(|label| label.role == LabelRole::ValueLabel)
        .collect();
    if labels.is_empty() || labels.len() != marks.len() {
        return None;
    }

    let centers: Vec<PixelPoint> = marks.iter().map(|mark| mark.bounds.center()).collect();
    let polygons: Vec<&Polygon> = labels.iter().map(|label| &label.polygon).collect();
    let pairs = match assign(&distance_costs(&centers, &polygons)) {
        Ok(pairs) => pairs,
        Err(err) => {
            warn!(error = %err, "value label matching failed; falling back to axis projection");
            return None;
        }
    };

    let mut labeled = Vec::with_capacity(pairs.len());
    for (mark_index, label_index) in pairs {
        match parse_label_value(&labels[label_index].text) {
            Ok(value) => labeled.push((mark_index, value)),
            Err(err) => {
                warn!(
                    error = %err,
                    label = %labels[label_index].id,
                    "value label did not parse; falling back to axis projection"
                );
                return None;
            }
        }
    }
    Some(labeled)
}
