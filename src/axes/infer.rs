//! Best-effort seeding of axis annotations.
//!
//! Suggestions here are a starting point for human review, not ground truth:
//! nearest-edge heuristics misfire on crowded charts and the caller is
//! expected to confirm before committing.

use crate::axes::model::{AxesInfo, AxisSlot, LabelId, LabelRole, TextLabel, Tick};
use crate::core::assignment::{assign, distance_costs};
use crate::core::geometry::{BoundingBox, PixelPoint, Polygon};
use crate::error::{DigitizeError, DigitizeResult};

/// Suggests the slot whose bounding-box edge line is nearest to the label
/// center: bottom edge → primary horizontal, left → primary vertical, top →
/// secondary horizontal, right → secondary vertical. Primary slots win ties.
#[must_use]
pub fn suggest_slot_for_label(bounds: BoundingBox, label: &TextLabel) -> AxisSlot {
    let bounds = bounds.normalized();
    let center = label.center();
    let candidates = [
        (AxisSlot::PrimaryHorizontal, (center.y - bounds.y2).abs()),
        (AxisSlot::PrimaryVertical, (center.x - bounds.x1).abs()),
        (AxisSlot::SecondaryHorizontal, (center.y - bounds.y1).abs()),
        (AxisSlot::SecondaryVertical, (center.x - bounds.x2).abs()),
    ];
    let mut best = candidates[0];
    for candidate in candidates {
        if candidate.1 < best.1 {
            best = candidate;
        }
    }
    best.0
}

/// One slot suggestion per tick label not yet claimed by any axis.
pub fn suggest_unclaimed_labels(axes: &AxesInfo) -> DigitizeResult<Vec<(LabelId, AxisSlot)>> {
    let bounds = axes
        .bounding_box
        .ok_or_else(|| DigitizeError::InvalidData("axes have no bounding box".to_owned()))?;
    let mut suggestions = Vec::new();
    for (&id, label) in &axes.tick_labels {
        if label.role != LabelRole::TickLabel {
            continue;
        }
        let claimed = axes
            .populated_slots()
            .iter()
            .any(|(_, axis)| axis.owns_label(id));
        if claimed {
            continue;
        }
        suggestions.push((id, suggest_slot_for_label(bounds, label)));
    }
    Ok(suggestions)
}

/// Pairs the slot's marker ticks with its assigned labels by minimum-cost
/// point-to-polygon matching and returns the relabeled tick list.
///
/// Every tick's previous label link is discarded; ticks the matching leaves
/// unpaired come back with no label. The caller decides whether to store the
/// result.
pub fn auto_assign_tick_labels(axes: &AxesInfo, slot: AxisSlot) -> DigitizeResult<Vec<Tick>> {
    let axis = axes
        .slot(slot)
        .ok_or_else(|| DigitizeError::InvalidData(format!("axis slot {slot} is not populated")))?;
    let bounds = axes
        .bounding_box
        .ok_or_else(|| DigitizeError::InvalidData("axes have no bounding box".to_owned()))?
        .normalized();

    let mut ticks: Vec<Tick> = axis
        .ticks
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|tick| Tick::new(tick.position))
        .collect();
    let labels: Vec<LabelId> = axis
        .labels
        .as_ref()
        .map(|labels| labels.iter().copied().collect())
        .unwrap_or_default();

    let mut polygons: Vec<&Polygon> = Vec::with_capacity(labels.len());
    for &label in &labels {
        let text_label = axes.tick_label(label).ok_or_else(|| {
            DigitizeError::InvalidData(format!("axis slot {slot} references unknown label {label}"))
        })?;
        polygons.push(&text_label.polygon);
    }

    let points: Vec<PixelPoint> = ticks
        .iter()
        .map(|tick| tick_point(bounds, slot, tick.position))
        .collect();
    for (tick_index, label_index) in assign(&distance_costs(&points, &polygons))? {
        ticks[tick_index].label = Some(labels[label_index]);
    }
    Ok(ticks)
}

/// Absolute pixel position of a tick on the edge its slot lives on.
fn tick_point(bounds: BoundingBox, slot: AxisSlot, position: f64) -> PixelPoint {
    match slot {
        AxisSlot::PrimaryHorizontal => PixelPoint::new(position, bounds.y2),
        AxisSlot::SecondaryHorizontal => PixelPoint::new(position, bounds.y1),
        AxisSlot::PrimaryVertical => PixelPoint::new(bounds.x1, position),
        AxisSlot::SecondaryVertical => PixelPoint::new(bounds.x2, position),
    }
}
