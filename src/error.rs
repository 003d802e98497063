use thiserror::Error;

use crate::axes::model::{AxisSlot, LabelId};
use crate::core::geometry::Orientation;

pub type DigitizeResult<T> = Result<T, DigitizeError>;

#[derive(Debug, Error)]
pub enum DigitizeError {
    /// A tick or value label carries no usable numeric content.
    #[error("cannot parse numeric label `{text}`: {reason}")]
    Parse { text: String, reason: String },

    #[error("both {0} axis slots are populated; independent axis is ambiguous")]
    AmbiguousAxis(Orientation),

    #[error("no populated {0} axis slot; independent axis is missing")]
    MissingAxis(Orientation),

    #[error("no populated dependent axis slot")]
    NoDependentAxis,

    #[error("axis slot {slot} cannot be projected: {reason}")]
    UnsupportedAxis { slot: AxisSlot, reason: String },

    #[error("invalid tick/label assignment on axis slot {slot}: {reason}")]
    InvalidAssignment { slot: AxisSlot, reason: String },

    #[error(
        "separator ticks on axis slot {slot} require axis-aligned labels; label {label} is rotated"
    )]
    RotatedLabelSeparator { slot: AxisSlot, label: LabelId },

    #[error("invalid annotation data: {0}")]
    InvalidData(String),
}
