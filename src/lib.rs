//! unchart: reconstructs structured data from annotated chart images.
//!
//! The engine consumes human-annotated geometric markup (axis bounding box,
//! tick positions, text-label polygons, per-family visual primitives) and
//! produces calibrated numeric data series plus the pixel-space geometry of
//! every reconstructed mark. Editing surfaces, persistence beyond the JSON
//! contract, and image decoding live outside this crate.

pub mod api;
pub mod axes;
pub mod chart;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{AnnotationLoad, ChartAnnotation, ChartDigitizer, DigitizerTuning, digitize_chart};
pub use error::{DigitizeError, DigitizeResult};
