use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel-batch")]
use rayon::prelude::*;

use crate::chart::data::ChartData;
use crate::chart::output::ChartReconstruction;
use crate::chart::reconstruct::{reconstruct_bar, reconstruct_box, reconstruct_points};
use crate::error::{DigitizeError, DigitizeResult};

use super::ChartAnnotation;

/// Tunable thresholds of the reconstruction pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DigitizerTuning {
    /// How far outside a series' annotated extent a calibration anchor may
    /// sit and still be sampled, in pixels.
    pub extent_tolerance_px: f64,
    /// Minimum axis-aligned area ratio for a label to calibrate a
    /// separator-tick axis.
    pub aligned_ratio_min: f64,
}

impl Default for DigitizerTuning {
    fn default() -> Self {
        Self {
            extent_tolerance_px: 5.0,
            aligned_ratio_min: 0.8,
        }
    }
}

impl DigitizerTuning {
    pub fn validate(&self) -> DigitizeResult<()> {
        if !self.extent_tolerance_px.is_finite() || self.extent_tolerance_px < 0.0 {
            return Err(DigitizeError::InvalidData(
                "extent tolerance must be finite and >= 0".to_owned(),
            ));
        }
        if !self.aligned_ratio_min.is_finite() || !(0.0..=1.0).contains(&self.aligned_ratio_min) {
            return Err(DigitizeError::InvalidData(
                "aligned ratio minimum must be finite and within [0, 1]".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Reconstruction entry point: validates an annotation, then dispatches to
/// the reconstructor of its chart family.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartDigitizer {
    tuning: DigitizerTuning,
}

impl ChartDigitizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tuning(tuning: DigitizerTuning) -> DigitizeResult<Self> {
        tuning.validate()?;
        Ok(Self { tuning })
    }

    #[must_use]
    pub fn tuning(&self) -> DigitizerTuning {
        self.tuning
    }

    pub fn digitize(&self, annotation: &ChartAnnotation) -> DigitizeResult<ChartReconstruction> {
        annotation.validate()?;
        debug!(family = annotation.chart.family_name(), "digitizing chart");
        match &annotation.chart {
            ChartData::Bar(data) => {
                reconstruct_bar(&annotation.axes, data, self.tuning.aligned_ratio_min)
            }
            ChartData::Box(data) => {
                reconstruct_box(&annotation.axes, data, self.tuning.aligned_ratio_min)
            }
            ChartData::Line(data) | ChartData::Scatter(data) | ChartData::Dot(data) => {
                reconstruct_points(
                    &annotation.axes,
                    data,
                    self.tuning.extent_tolerance_px,
                    self.tuning.aligned_ratio_min,
                )
            }
        }
    }
}

/// Digitizes one annotation with default tuning.
pub fn digitize_chart(annotation: &ChartAnnotation) -> DigitizeResult<ChartReconstruction> {
    ChartDigitizer::new().digitize(annotation)
}

/// Digitizes a batch of independent annotations, preserving input order.
///
/// With the `parallel-batch` feature the batch fans out across a rayon pool;
/// without it the charts run sequentially. Results are identical either way.
pub fn digitize_charts_parallel(
    annotations: &[ChartAnnotation],
    tuning: DigitizerTuning,
) -> DigitizeResult<Vec<ChartReconstruction>> {
    tuning.validate()?;
    let digitizer = ChartDigitizer { tuning };

    #[cfg(feature = "parallel-batch")]
    {
        let reconstructed: Vec<DigitizeResult<ChartReconstruction>> = annotations
            .par_iter()
            .map(|annotation| digitizer.digitize(annotation))
            .collect();
        reconstructed.into_iter().collect()
    }

    #[cfg(not(feature = "parallel-batch"))]
    {
        let mut out = Vec::with_capacity(annotations.len());
        for annotation in annotations {
            out.push(digitizer.digitize(annotation)?);
        }
        Ok(out)
    }
}
