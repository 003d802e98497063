//! Per-family reconstruction: raw annotated geometry plus calibrated axes in,
//! visual primitives plus the structured series table out.

mod bar;
mod boxplot;
mod points;

pub use bar::reconstruct_bar;
pub use boxplot::reconstruct_box;
pub use points::reconstruct_points;

use crate::axes::calibration::AxisCalibration;
use crate::axes::model::{AxesInfo, AxisSlot};
use crate::axes::projection::{AxisProjector, DataValue};
use crate::core::geometry::Orientation;
use crate::error::{DigitizeError, DigitizeResult};

/// Calibrations every family starts from: exactly one independent axis and
/// the populated dependent slots.
pub(crate) struct ResolvedAxes<'a> {
    pub independent: AxisCalibration<'a>,
    pub dependent_primary: Option<AxisCalibration<'a>>,
    pub dependent_secondary: Option<AxisCalibration<'a>>,
}

/// Resolves the independent axis (exactly one populated slot of
/// `independent_orientation`) and the dependent slots orthogonal to it. At
/// least one dependent slot must be populated.
pub(crate) fn resolve_axes<'a>(
    axes: &'a AxesInfo,
    independent_orientation: Orientation,
    aligned_ratio_min: f64,
) -> DigitizeResult<ResolvedAxes<'a>> {
    let (primary, secondary) = slots_of(independent_orientation);
    let independent_slot = match (axes.slot(primary).is_some(), axes.slot(secondary).is_some()) {
        (true, true) => return Err(DigitizeError::AmbiguousAxis(independent_orientation)),
        (false, false) => return Err(DigitizeError::MissingAxis(independent_orientation)),
        (true, false) => primary,
        (false, true) => secondary,
    };

    let (dependent_primary_slot, dependent_secondary_slot) =
        slots_of(independent_orientation.orthogonal());
    let dependent_primary = calibrate_if_populated(axes, dependent_primary_slot, aligned_ratio_min)?;
    let dependent_secondary =
        calibrate_if_populated(axes, dependent_secondary_slot, aligned_ratio_min)?;
    if dependent_primary.is_none() && dependent_secondary.is_none() {
        return Err(DigitizeError::NoDependentAxis);
    }

    Ok(ResolvedAxes {
        independent: AxisCalibration::new(axes, independent_slot, aligned_ratio_min)?,
        dependent_primary,
        dependent_secondary,
    })
}

fn slots_of(orientation: Orientation) -> (AxisSlot, AxisSlot) {
    match orientation {
        Orientation::Horizontal => (AxisSlot::PrimaryHorizontal, AxisSlot::SecondaryHorizontal),
        Orientation::Vertical => (AxisSlot::PrimaryVertical, AxisSlot::SecondaryVertical),
    }
}

fn calibrate_if_populated<'a>(
    axes: &'a AxesInfo,
    slot: AxisSlot,
    aligned_ratio_min: f64,
) -> DigitizeResult<Option<AxisCalibration<'a>>> {
    if axes.slot(slot).is_none() {
        return Ok(None);
    }
    AxisCalibration::new(axes, slot, aligned_ratio_min).map(Some)
}

/// Projectors for the populated dependent slots of one pass.
pub(crate) struct DependentProjectors {
    pub primary: Option<AxisProjector>,
    pub secondary: Option<AxisProjector>,
}

impl DependentProjectors {
    pub fn build(resolved: &ResolvedAxes<'_>) -> DigitizeResult<Self> {
        Ok(Self {
            primary: resolved
                .dependent_primary
                .as_ref()
                .map(AxisProjector::build)
                .transpose()?,
            secondary: resolved
                .dependent_secondary
                .as_ref()
                .map(AxisProjector::build)
                .transpose()?,
        })
    }

    /// Projects one offset from the dependent baseline through each populated
    /// slot.
    pub fn values_at_offset(&self, offset: f64) -> (Option<DataValue>, Option<DataValue>) {
        (
            self.primary
                .as_ref()
                .map(|projector| projector.project_offset(offset).into()),
            self.secondary
                .as_ref()
                .map(|projector| projector.project_offset(offset).into()),
        )
    }

    /// Projects one absolute pixel coordinate through each populated slot.
    pub fn values_at_pixel(&self, pixel: f64) -> (Option<DataValue>, Option<DataValue>) {
        (
            self.primary
                .as_ref()
                .map(|projector| projector.project_pixel(pixel).into()),
            self.secondary
                .as_ref()
                .map(|projector| projector.project_pixel(pixel).into()),
        )
    }

    /// Value of one bar layer: the difference of projected top and stack base
    /// for stacked layers, the projected top alone otherwise.
    pub fn layer_values(
        &self,
        top_offset: f64,
        base_offset: Option<f64>,
    ) -> (Option<DataValue>, Option<DataValue>) {
        let project = |projector: &AxisProjector| {
            let top = projector.project_offset(top_offset);
            match base_offset {
                Some(base) => top - projector.project_offset(base),
                None => top,
            }
        };
        (
            self.primary.as_ref().map(|p| project(p).into()),
            self.secondary.as_ref().map(|p| project(p).into()),
        )
    }
}
