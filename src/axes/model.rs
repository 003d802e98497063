use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::core::geometry::{BoundingBox, Orientation, PixelPoint, Polygon};
use crate::error::{DigitizeError, DigitizeResult};

/// Identifier of a text label within one chart's annotation tables.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct LabelId(pub u32);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the four fixed positions a calibrated axis may occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisSlot {
    PrimaryHorizontal,
    PrimaryVertical,
    SecondaryHorizontal,
    SecondaryVertical,
}

impl AxisSlot {
    pub const ALL: [Self; 4] = [
        Self::PrimaryHorizontal,
        Self::PrimaryVertical,
        Self::SecondaryHorizontal,
        Self::SecondaryVertical,
    ];

    #[must_use]
    pub fn orientation(self) -> Orientation {
        match self {
            Self::PrimaryHorizontal | Self::SecondaryHorizontal => Orientation::Horizontal,
            Self::PrimaryVertical | Self::SecondaryVertical => Orientation::Vertical,
        }
    }

    #[must_use]
    pub fn is_primary(self) -> bool {
        matches!(self, Self::PrimaryHorizontal | Self::PrimaryVertical)
    }
}

impl fmt::Display for AxisSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryHorizontal => f.write_str("primary horizontal"),
            Self::PrimaryVertical => f.write_str("primary vertical"),
            Self::SecondaryHorizontal => f.write_str("secondary horizontal"),
            Self::SecondaryVertical => f.write_str("secondary vertical"),
        }
    }
}

/// Kind of value an axis carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ValuesType {
    #[default]
    Numerical,
    Categorical,
}

/// How tick positions were annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TicksType {
    /// Tick pixel positions are annotated directly, optionally linked to labels.
    #[default]
    Markers,
    /// Category boundaries; calibration positions come from label centers.
    Separators,
}

/// Interpolation law of a numerical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ScaleType {
    None,
    #[default]
    Linear,
    Logarithmic,
}

/// Annotated tick: a pixel position along the axis, optionally linked to a
/// label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position: f64,
    #[serde(default)]
    pub label: Option<LabelId>,
}

impl Tick {
    #[must_use]
    pub const fn new(position: f64) -> Self {
        Self {
            position,
            label: None,
        }
    }

    #[must_use]
    pub const fn labeled(position: f64, label: LabelId) -> Self {
        Self {
            position,
            label: Some(label),
        }
    }
}

/// Function of a text label within the chart image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LabelRole {
    Title,
    #[default]
    TickLabel,
    /// Number printed next to a bar or mark, giving its value directly.
    ValueLabel,
    Legend,
    Other,
}

/// Annotated text region: a polygon outline around the text plus its raw
/// string content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextLabel {
    pub id: LabelId,
    pub polygon: Polygon,
    pub role: LabelRole,
    pub text: String,
}

impl TextLabel {
    #[must_use]
    pub fn center(&self) -> PixelPoint {
        self.polygon.center()
    }

    /// Polygon area over bounding-rectangle area; low values flag rotated text.
    #[must_use]
    pub fn aligned_ratio(&self) -> f64 {
        self.polygon.aligned_area_ratio()
    }
}

/// Calibration state of one axis slot.
///
/// `ticks`/`labels` distinguish "not yet annotated" (`None`) from "annotated
/// as having none" (`Some` and empty). Derived calibration data is always
/// recomputed by a projector built for one reconstruction pass and never
/// stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AxisValues {
    pub values_type: ValuesType,
    pub ticks_type: TicksType,
    pub scale_type: ScaleType,
    pub ticks: Option<Vec<Tick>>,
    pub labels: Option<IndexSet<LabelId>>,
    pub title: Option<LabelId>,
}

impl AxisValues {
    #[must_use]
    pub fn new(values_type: ValuesType, ticks_type: TicksType, scale_type: ScaleType) -> Self {
        Self {
            values_type,
            ticks_type,
            scale_type,
            ticks: None,
            labels: None,
            title: None,
        }
    }

    #[must_use]
    pub fn is_tick_complete(&self) -> bool {
        self.ticks.is_some()
    }

    #[must_use]
    pub fn is_label_complete(&self) -> bool {
        self.labels.is_some()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.is_tick_complete() && self.is_label_complete()
    }

    #[must_use]
    pub fn owns_label(&self, label: LabelId) -> bool {
        self.labels
            .as_ref()
            .is_some_and(|labels| labels.contains(&label))
    }
}

/// Whole-chart axis container: the shared bounding box, the owning label
/// tables, and the four optional axis slots.
///
/// Axes reference labels by id only; the tables own the label objects. A
/// label id belongs to at most one axis, enforced by [`AxesInfo::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AxesInfo {
    pub bounding_box: Option<BoundingBox>,
    pub tick_labels: IndexMap<LabelId, TextLabel>,
    pub titles: IndexMap<LabelId, TextLabel>,
    pub primary_horizontal: Option<AxisValues>,
    pub primary_vertical: Option<AxisValues>,
    pub secondary_horizontal: Option<AxisValues>,
    pub secondary_vertical: Option<AxisValues>,
}

impl AxesInfo {
    #[must_use]
    pub fn slot(&self, slot: AxisSlot) -> Option<&AxisValues> {
        match slot {
            AxisSlot::PrimaryHorizontal => self.primary_horizontal.as_ref(),
            AxisSlot::PrimaryVertical => self.primary_vertical.as_ref(),
            AxisSlot::SecondaryHorizontal => self.secondary_horizontal.as_ref(),
            AxisSlot::SecondaryVertical => self.secondary_vertical.as_ref(),
        }
    }

    pub fn slot_mut(&mut self, slot: AxisSlot) -> &mut Option<AxisValues> {
        match slot {
            AxisSlot::PrimaryHorizontal => &mut self.primary_horizontal,
            AxisSlot::PrimaryVertical => &mut self.primary_vertical,
            AxisSlot::SecondaryHorizontal => &mut self.secondary_horizontal,
            AxisSlot::SecondaryVertical => &mut self.secondary_vertical,
        }
    }

    #[must_use]
    pub fn populated_slots(&self) -> Vec<(AxisSlot, &AxisValues)> {
        AxisSlot::ALL
            .iter()
            .filter_map(|&slot| self.slot(slot).map(|axis| (slot, axis)))
            .collect()
    }

    #[must_use]
    pub fn tick_label(&self, id: LabelId) -> Option<&TextLabel> {
        self.tick_labels.get(&id)
    }

    /// Bounding box set and at least one slot fully annotated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.bounding_box.is_some()
            && self
                .populated_slots()
                .iter()
                .any(|(_, axis)| axis.is_complete())
    }

    /// Checks referential integrity: finite geometry, well-formed polygons,
    /// label-table keys matching label ids, every referenced id present, and
    /// no label claimed by two axes.
    pub fn validate(&self) -> DigitizeResult<()> {
        if let Some(bounds) = self.bounding_box {
            bounds.validate()?;
        }
        for (table, key, label) in self
            .tick_labels
            .iter()
            .map(|(key, label)| ("tick label", key, label))
            .chain(
                self.titles
                    .iter()
                    .map(|(key, label)| ("title", key, label)),
            )
        {
            if *key != label.id {
                return Err(DigitizeError::InvalidData(format!(
                    "{table} table key {key} does not match label id {}",
                    label.id
                )));
            }
            label.polygon.validate()?;
        }

        let mut owners: IndexMap<LabelId, AxisSlot> = IndexMap::new();
        for (slot, axis) in self.populated_slots() {
            if let Some(labels) = &axis.labels {
                for &label in labels {
                    if !self.tick_labels.contains_key(&label) {
                        return Err(DigitizeError::InvalidData(format!(
                            "axis slot {slot} references unknown label {label}"
                        )));
                    }
                    if let Some(previous) = owners.insert(label, slot) {
                        return Err(DigitizeError::InvalidData(format!(
                            "label {label} is claimed by both {previous} and {slot} axes"
                        )));
                    }
                }
            }
            if let Some(ticks) = &axis.ticks {
                for tick in ticks {
                    if !tick.position.is_finite() {
                        return Err(DigitizeError::InvalidData(format!(
                            "tick position on {slot} axis must be finite"
                        )));
                    }
                    if let Some(label) = tick.label {
                        if !self.tick_labels.contains_key(&label) {
                            return Err(DigitizeError::InvalidData(format!(
                                "tick on {slot} axis references unknown label {label}"
                            )));
                        }
                    }
                }
            }
            if let Some(title) = axis.title {
                if !self.titles.contains_key(&title) {
                    return Err(DigitizeError::InvalidData(format!(
                        "axis slot {slot} references unknown title {title}"
                    )));
                }
            }
        }
        Ok(())
    }
}
