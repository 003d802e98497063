use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axes::calibration::AxisCalibration;
use crate::axes::model::{LabelId, ScaleType, ValuesType};
use crate::core::geometry::Orientation;
use crate::core::interpolate::LinearInterpolator;
use crate::core::numeric::parse_label_value;
use crate::error::{DigitizeError, DigitizeResult};

/// Semantic value of a reconstructed coordinate: a number, or the original
/// label string when the axis is categorical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DataValue {
    Number(f64),
    Category(String),
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

#[derive(Debug)]
enum ProjectionScale {
    Linear(LinearInterpolator),
    /// Interpolates in `(offset, ln value)` space.
    Logarithmic(LinearInterpolator),
}

/// Pixel-offset → value projector for one numerical, scaled axis.
///
/// Built once per reconstruction pass; the sorted anchors live only inside
/// the projector, never in the axis model.
#[derive(Debug)]
pub struct AxisProjector {
    scale: ProjectionScale,
    origin: f64,
    orientation: Orientation,
}

impl AxisProjector {
    /// Builds the projector from the axis's interpolation anchors.
    ///
    /// Fails with [`DigitizeError::UnsupportedAxis`] for categorical or
    /// unscaled axes. Fewer than two usable anchors degrades to a synthetic
    /// range over the axis's own bounding-box extent instead of failing:
    /// `[0, 1]` for linear scales, `[1, 10]` for logarithmic ones.
    pub fn build(calibration: &AxisCalibration<'_>) -> DigitizeResult<Self> {
        let axis = calibration.axis();
        if axis.values_type == ValuesType::Categorical {
            return Err(DigitizeError::UnsupportedAxis {
                slot: calibration.slot(),
                reason: "categorical axes cannot be projected".to_owned(),
            });
        }

        let anchors = calibration.anchors(calibration.origin())?;
        let scale = match axis.scale_type {
            ScaleType::None => {
                return Err(DigitizeError::UnsupportedAxis {
                    slot: calibration.slot(),
                    reason: "axis has no scale".to_owned(),
                });
            }
            ScaleType::Linear => {
                let knots: Vec<(f64, f64)> = anchors
                    .iter()
                    .map(|anchor| (anchor.offset, anchor.value))
                    .collect();
                ProjectionScale::Linear(interpolator_or_synthetic(calibration, knots, (0.0, 1.0))?)
            }
            ScaleType::Logarithmic => {
                // Values at or below zero are undefined under log and drop out.
                let knots: Vec<(f64, f64)> = anchors
                    .iter()
                    .filter(|anchor| anchor.value > 0.0)
                    .map(|anchor| (anchor.offset, anchor.value.ln()))
                    .collect();
                ProjectionScale::Logarithmic(interpolator_or_synthetic(
                    calibration,
                    knots,
                    (0.0, std::f64::consts::LN_10),
                )?)
            }
        };

        Ok(Self {
            scale,
            origin: calibration.origin(),
            orientation: calibration.orientation(),
        })
    }

    /// Projects a signed offset from the axis origin into a semantic value.
    #[must_use]
    pub fn project_offset(&self, offset: f64) -> f64 {
        match &self.scale {
            ProjectionScale::Linear(interpolator) => interpolator.value_at(offset),
            ProjectionScale::Logarithmic(interpolator) => interpolator.value_at(offset).exp(),
        }
    }

    /// Projects an absolute pixel coordinate along the axis direction.
    #[must_use]
    pub fn project_pixel(&self, pixel: f64) -> f64 {
        let offset = match self.orientation {
            Orientation::Vertical => self.origin - pixel,
            Orientation::Horizontal => pixel - self.origin,
        };
        self.project_offset(offset)
    }
}

fn interpolator_or_synthetic(
    calibration: &AxisCalibration<'_>,
    knots: Vec<(f64, f64)>,
    synthetic_values: (f64, f64),
) -> DigitizeResult<LinearInterpolator> {
    if count_distinct_offsets(&knots) >= 2 {
        return LinearInterpolator::new(knots);
    }
    let extent = calibration.bounds().extent(calibration.orientation());
    if extent <= 0.0 {
        return Err(DigitizeError::InvalidData(
            "bounding box extent must be positive for synthetic calibration".to_owned(),
        ));
    }
    debug!(
        slot = %calibration.slot(),
        extent,
        "axis has fewer than two usable anchors; substituting synthetic range"
    );
    LinearInterpolator::new(vec![
        (0.0, synthetic_values.0),
        (extent, synthetic_values.1),
    ])
}

fn count_distinct_offsets(knots: &[(f64, f64)]) -> usize {
    let mut offsets: Vec<f64> = knots.iter().map(|&(offset, _)| offset).collect();
    offsets.sort_by(f64::total_cmp);
    offsets.dedup();
    offsets.len()
}

/// Value of the calibrated position nearest to `pixel`: the raw label string
/// for categorical axes, the parsed numeric value otherwise. Ties keep the
/// first position in sorted order.
pub fn find_closest_value(
    calibration: &AxisCalibration<'_>,
    pixel: f64,
) -> DigitizeResult<DataValue> {
    let mut best: Option<(OrderedFloat<f64>, LabelId)> = None;
    for point in calibration.tick_positions()? {
        let distance = OrderedFloat((point.position - pixel).abs());
        match best {
            Some((current, _)) if current <= distance => {}
            _ => best = Some((distance, point.label)),
        }
    }
    let Some((_, label)) = best else {
        return Err(DigitizeError::UnsupportedAxis {
            slot: calibration.slot(),
            reason: "axis has no calibrated positions".to_owned(),
        });
    };
    let text = &calibration.label(label)?.text;
    match calibration.axis().values_type {
        ValuesType::Categorical => Ok(DataValue::Category(text.clone())),
        ValuesType::Numerical => Ok(DataValue::Number(parse_label_value(text)?)),
    }
}
