use smallvec::SmallVec;

use crate::axes::model::{AxesInfo, AxisSlot, AxisValues, LabelId, TextLabel, TicksType};
use crate::core::geometry::{BoundingBox, Orientation};
use crate::core::numeric::parse_label_value;
use crate::error::{DigitizeError, DigitizeResult};

/// One calibrated position on an axis: a pixel coordinate along the axis
/// direction paired with the label naming it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationPoint {
    pub position: f64,
    pub label: LabelId,
}

/// Signed pixel offset from the axis origin paired with the parsed value of
/// the label at that offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub offset: f64,
    pub value: f64,
}

/// Borrowed calibration view over one populated axis slot.
///
/// Everything here is recomputed on demand; nothing is cached back into the
/// axis model.
#[derive(Debug, Clone, Copy)]
pub struct AxisCalibration<'a> {
    axes: &'a AxesInfo,
    axis: &'a AxisValues,
    slot: AxisSlot,
    bounds: BoundingBox,
    aligned_ratio_min: f64,
}

impl<'a> AxisCalibration<'a> {
    /// Borrows the slot's axis together with the label tables it references.
    /// The axes must carry a bounding box and the slot must be populated.
    pub fn new(axes: &'a AxesInfo, slot: AxisSlot, aligned_ratio_min: f64) -> DigitizeResult<Self> {
        let axis = axes.slot(slot).ok_or_else(|| {
            DigitizeError::InvalidData(format!("axis slot {slot} is not populated"))
        })?;
        let bounds = axes
            .bounding_box
            .ok_or_else(|| {
                DigitizeError::InvalidData("axes have no bounding box".to_owned())
            })?
            .normalized();
        Ok(Self {
            axes,
            axis,
            slot,
            bounds,
            aligned_ratio_min,
        })
    }

    #[must_use]
    pub fn slot(&self) -> AxisSlot {
        self.slot
    }

    #[must_use]
    pub fn axis(&self) -> &AxisValues {
        self.axis
    }

    #[must_use]
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.slot.orientation()
    }

    /// Pixel coordinate values are measured from: the box bottom for vertical
    /// axes, the box left edge for horizontal ones.
    #[must_use]
    pub fn origin(&self) -> f64 {
        match self.orientation() {
            Orientation::Vertical => self.bounds.y2,
            Orientation::Horizontal => self.bounds.x1,
        }
    }

    /// Signed offset of an absolute pixel coordinate from [`Self::origin`].
    /// Vertical axes grow upward, horizontal axes grow rightward.
    #[must_use]
    pub fn offset_of(&self, pixel: f64) -> f64 {
        match self.orientation() {
            Orientation::Vertical => self.origin() - pixel,
            Orientation::Horizontal => pixel - self.origin(),
        }
    }

    /// Calibrated positions sorted ascending by pixel coordinate.
    ///
    /// Marker axes pair each labeled tick with its label and require every
    /// assigned label to sit on a tick. Separator axes take each assigned
    /// label's center projected onto the axis direction and require the label
    /// text to be axis-aligned.
    pub fn tick_positions(&self) -> DigitizeResult<Vec<CalibrationPoint>> {
        let mut points = match self.axis.ticks_type {
            TicksType::Markers => self.marker_positions()?,
            TicksType::Separators => self.separator_positions()?,
        };
        points.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(points)
    }

    fn marker_positions(&self) -> DigitizeResult<Vec<CalibrationPoint>> {
        let ticks = self.axis.ticks.as_deref().unwrap_or(&[]);
        let mut points = Vec::new();
        for tick in ticks {
            let Some(label) = tick.label else {
                continue;
            };
            if !self.axis.owns_label(label) {
                return Err(DigitizeError::InvalidAssignment {
                    slot: self.slot,
                    reason: format!(
                        "tick at {} references label {label} not assigned to this axis",
                        tick.position
                    ),
                });
            }
            points.push(CalibrationPoint {
                position: tick.position,
                label,
            });
        }
        if let Some(labels) = &self.axis.labels {
            for &label in labels {
                if !points.iter().any(|point| point.label == label) {
                    return Err(DigitizeError::InvalidAssignment {
                        slot: self.slot,
                        reason: format!("assigned label {label} has no tick"),
                    });
                }
            }
        }
        Ok(points)
    }

    fn separator_positions(&self) -> DigitizeResult<Vec<CalibrationPoint>> {
        let Some(labels) = &self.axis.labels else {
            return Ok(Vec::new());
        };
        let orientation = self.orientation();
        let mut points = Vec::with_capacity(labels.len());
        for &label in labels {
            let text_label = self.label(label)?;
            if text_label.aligned_ratio() < self.aligned_ratio_min {
                return Err(DigitizeError::RotatedLabelSeparator {
                    slot: self.slot,
                    label,
                });
            }
            points.push(CalibrationPoint {
                position: text_label.center().coordinate(orientation),
                label,
            });
        }
        Ok(points)
    }

    /// Interpolation anchors: each calibrated position as a signed offset from
    /// `origin`, paired with the parsed numeric value of its label. Zero
    /// anchors is not an error here; the projector decides how to degrade.
    pub fn anchors(&self, origin: f64) -> DigitizeResult<SmallVec<[Anchor; 8]>> {
        let orientation = self.orientation();
        let mut anchors = SmallVec::new();
        for point in self.tick_positions()? {
            let value = parse_label_value(&self.label(point.label)?.text)?;
            let offset = match orientation {
                Orientation::Vertical => origin - point.position,
                Orientation::Horizontal => point.position - origin,
            };
            anchors.push(Anchor { offset, value });
        }
        Ok(anchors)
    }

    pub(crate) fn label(&self, id: LabelId) -> DigitizeResult<&'a TextLabel> {
        self.axes.tick_label(id).ok_or_else(|| {
            DigitizeError::InvalidData(format!(
                "axis slot {} references unknown label {id}",
                self.slot
            ))
        })
    }
}
