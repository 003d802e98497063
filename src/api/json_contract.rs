use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::axes::model::{AxesInfo, AxisValues, LabelId, ScaleType, TextLabel, Tick, TicksType, ValuesType};
use crate::chart::data::ChartData;
use crate::core::geometry::BoundingBox;
use crate::error::{DigitizeError, DigitizeResult};

use super::ChartAnnotation;

pub const CHART_ANNOTATION_JSON_SCHEMA_V2: u32 = 2;
pub const CHART_ANNOTATION_JSON_SCHEMA_V1: u32 = 1;

/// Versioned wire envelope for the current annotation format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAnnotationJsonContractV2 {
    pub schema_version: u32,
    pub annotation: ChartAnnotation,
}

/// Annotation decoded from any supported wire format, flagged when it
/// arrived in the legacy two-axis layout and was upgraded on the way in.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationLoad {
    pub annotation: ChartAnnotation,
    pub upgraded: bool,
}

/// Legacy records carry exactly two axes named by orientation and predate the
/// values/ticks/scale type distinctions.
#[derive(Debug, Clone, Deserialize)]
struct LegacyChartAnnotation {
    axes: LegacyAxes,
    chart: ChartData,
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyAxes {
    #[serde(default)]
    bounding_box: Option<BoundingBox>,
    #[serde(default)]
    tick_labels: IndexMap<LabelId, TextLabel>,
    #[serde(default)]
    titles: IndexMap<LabelId, TextLabel>,
    #[serde(default)]
    horizontal: Option<LegacyAxisValues>,
    #[serde(default)]
    vertical: Option<LegacyAxisValues>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LegacyAxisValues {
    ticks: Option<Vec<Tick>>,
    labels: Option<IndexSet<LabelId>>,
    title: Option<LabelId>,
}

impl LegacyAxisValues {
    fn upgrade(self, values_type: ValuesType, scale_type: ScaleType) -> AxisValues {
        AxisValues {
            values_type,
            ticks_type: TicksType::Markers,
            scale_type,
            ticks: self.ticks,
            labels: self.labels,
            title: self.title,
        }
    }
}

impl LegacyChartAnnotation {
    /// Legacy horizontal axes were always categorical and unscaled, vertical
    /// ones numerical and linear; both map onto the primary slots. Any prior
    /// sign-off is dropped: upgraded axes must be verified again.
    fn upgrade(self) -> ChartAnnotation {
        ChartAnnotation {
            axes: AxesInfo {
                bounding_box: self.axes.bounding_box,
                tick_labels: self.axes.tick_labels,
                titles: self.axes.titles,
                primary_horizontal: self
                    .axes
                    .horizontal
                    .map(|axis| axis.upgrade(ValuesType::Categorical, ScaleType::None)),
                primary_vertical: self
                    .axes
                    .vertical
                    .map(|axis| axis.upgrade(ValuesType::Numerical, ScaleType::Linear)),
                secondary_horizontal: None,
                secondary_vertical: None,
            },
            chart: self.chart,
            axes_verified: false,
        }
    }
}

impl ChartAnnotation {
    pub fn to_json_contract_v2_pretty(&self) -> DigitizeResult<String> {
        let payload = ChartAnnotationJsonContractV2 {
            schema_version: CHART_ANNOTATION_JSON_SCHEMA_V2,
            annotation: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            DigitizeError::InvalidData(format!("failed to serialize annotation contract v2: {e}"))
        })
    }

    /// Decodes an annotation from any format this crate has ever written:
    /// the v2 envelope, a bare current record, a legacy v1 envelope, or a
    /// bare legacy record. Legacy input is upgraded and flagged.
    pub fn from_json_compat_str(input: &str) -> DigitizeResult<AnnotationLoad> {
        let value: Value = serde_json::from_str(input).map_err(|e| {
            DigitizeError::InvalidData(format!("failed to parse annotation json payload: {e}"))
        })?;

        if let Some(version) = value.get("schema_version") {
            let version = version.as_u64().ok_or_else(|| {
                DigitizeError::InvalidData(
                    "annotation schema version must be an unsigned integer".to_owned(),
                )
            })?;
            if version == u64::from(CHART_ANNOTATION_JSON_SCHEMA_V2) {
                let payload: ChartAnnotationJsonContractV2 = serde_json::from_value(value)
                    .map_err(|e| {
                        DigitizeError::InvalidData(format!(
                            "failed to parse annotation contract v2: {e}"
                        ))
                    })?;
                return Ok(AnnotationLoad {
                    annotation: payload.annotation,
                    upgraded: false,
                });
            }
            if version == u64::from(CHART_ANNOTATION_JSON_SCHEMA_V1) {
                let payload: LegacyJsonContractV1 = serde_json::from_value(value).map_err(|e| {
                    DigitizeError::InvalidData(format!(
                        "failed to parse annotation contract v1: {e}"
                    ))
                })?;
                debug!("upgraded legacy v1 annotation envelope");
                return Ok(AnnotationLoad {
                    annotation: payload.annotation.upgrade(),
                    upgraded: true,
                });
            }
            return Err(DigitizeError::InvalidData(format!(
                "unsupported annotation schema version: {version}"
            )));
        }

        if is_legacy_axes_shape(&value) {
            let legacy: LegacyChartAnnotation = serde_json::from_value(value).map_err(|e| {
                DigitizeError::InvalidData(format!("failed to parse legacy annotation: {e}"))
            })?;
            debug!("upgraded bare legacy annotation");
            return Ok(AnnotationLoad {
                annotation: legacy.upgrade(),
                upgraded: true,
            });
        }

        let annotation: ChartAnnotation = serde_json::from_value(value).map_err(|e| {
            DigitizeError::InvalidData(format!("failed to parse annotation: {e}"))
        })?;
        Ok(AnnotationLoad {
            annotation,
            upgraded: false,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyJsonContractV1 {
    annotation: LegacyChartAnnotation,
}

/// Bare records carry no version marker; the legacy layout is recognized by
/// its orientation-named axis keys.
fn is_legacy_axes_shape(value: &Value) -> bool {
    value.get("axes").is_some_and(|axes| {
        axes.get("horizontal").is_some() || axes.get("vertical").is_some()
    })
}
