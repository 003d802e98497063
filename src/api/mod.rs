//! Public entry points: the annotation record, its wire contract, staged
//! axis editing, and the digitizer itself.

pub mod annotation;
pub mod digitizer;
pub mod json_contract;
pub mod staging;

pub use annotation::ChartAnnotation;
pub use digitizer::{ChartDigitizer, DigitizerTuning, digitize_chart, digitize_charts_parallel};
pub use json_contract::{
    AnnotationLoad, CHART_ANNOTATION_JSON_SCHEMA_V1, CHART_ANNOTATION_JSON_SCHEMA_V2,
    ChartAnnotationJsonContractV2,
};
pub use staging::{AxesEditor, SlotStage};
