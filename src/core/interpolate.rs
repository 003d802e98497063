use crate::core::geometry::{Orientation, PixelPoint};
use crate::error::{DigitizeError, DigitizeResult};

/// Piecewise-linear interpolant over `(position, value)` knots.
///
/// Positions beyond the knot range extrapolate along the nearest segment; the
/// interpolant never clamps.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearInterpolator {
    knots: Vec<(f64, f64)>,
}

impl LinearInterpolator {
    /// Builds an interpolant from at least two knots. Knots are sorted by
    /// position and duplicate positions collapse to their first occurrence.
    pub fn new(mut knots: Vec<(f64, f64)>) -> DigitizeResult<Self> {
        for &(position, value) in &knots {
            if !position.is_finite() || !value.is_finite() {
                return Err(DigitizeError::InvalidData(
                    "interpolation knots must be finite".to_owned(),
                ));
            }
        }
        knots.sort_by(|a, b| a.0.total_cmp(&b.0));
        knots.dedup_by(|next, kept| next.0 == kept.0);
        if knots.len() < 2 {
            return Err(DigitizeError::InvalidData(
                "interpolation requires at least two distinct positions".to_owned(),
            ));
        }
        Ok(Self { knots })
    }

    #[must_use]
    pub fn knots(&self) -> &[(f64, f64)] {
        &self.knots
    }

    #[must_use]
    pub fn value_at(&self, position: f64) -> f64 {
        let last = self.knots.len() - 1;
        let upper = self
            .knots
            .iter()
            .position(|&(knot, _)| position <= knot)
            .unwrap_or(last)
            .max(1);
        let (start, start_value) = self.knots[upper - 1];
        let (end, end_value) = self.knots[upper];
        let t = (position - start) / (end - start);
        start_value + t * (end_value - start_value)
    }
}

/// Samples a pixel polyline at the given coordinate along `direction`.
///
/// Walks consecutive vertex pairs and linearly interpolates the first segment
/// whose coordinate span covers `at`. `None` when the polyline never reaches
/// that coordinate.
#[must_use]
pub fn sample_polyline(points: &[PixelPoint], direction: Orientation, at: f64) -> Option<PixelPoint> {
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (start, end) = (a.coordinate(direction), b.coordinate(direction));
        let (low, high) = if start <= end { (start, end) } else { (end, start) };
        if at < low || at > high {
            continue;
        }
        if (end - start).abs() <= f64::EPSILON {
            return Some(a);
        }
        let t = (at - start) / (end - start);
        return Some(PixelPoint::new(a.x + t * (b.x - a.x), a.y + t * (b.y - a.y)));
    }
    None
}

/// [`sample_polyline`] with end clamping: coordinates past either end of the
/// polyline, but within `tolerance`, snap to the extreme vertex.
#[must_use]
pub fn sample_polyline_clamped(
    points: &[PixelPoint],
    direction: Orientation,
    at: f64,
    tolerance: f64,
) -> Option<PixelPoint> {
    let first = *points.first()?;
    if points.len() == 1 {
        return ((at - first.coordinate(direction)).abs() <= tolerance).then_some(first);
    }
    if let Some(sample) = sample_polyline(points, direction, at) {
        return Some(sample);
    }
    let mut low = first;
    let mut high = first;
    for &point in points {
        if point.coordinate(direction) < low.coordinate(direction) {
            low = point;
        }
        if point.coordinate(direction) > high.coordinate(direction) {
            high = point;
        }
    }
    if at < low.coordinate(direction) && low.coordinate(direction) - at <= tolerance {
        return Some(low);
    }
    if at > high.coordinate(direction) && at - high.coordinate(direction) <= tolerance {
        return Some(high);
    }
    None
}
