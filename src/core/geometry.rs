use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DigitizeError, DigitizeResult};

/// Axis direction in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    #[must_use]
    pub fn orthogonal(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// Point in image pixel coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Coordinate along the given direction: `x` for horizontal, `y` for vertical.
    #[must_use]
    pub fn coordinate(self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.x,
            Orientation::Vertical => self.y,
        }
    }

    pub fn validate(self) -> DigitizeResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(DigitizeError::InvalidData(
                "pixel coordinates must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Axis-aligned rectangle in pixel coordinates.
///
/// `x1 < x2` and `y1 < y2` are expected but not enforced on input; consumers
/// that need ordered corners call [`BoundingBox::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    #[must_use]
    pub fn width(self) -> f64 {
        (self.x2 - self.x1).abs()
    }

    #[must_use]
    pub fn height(self) -> f64 {
        (self.y2 - self.y1).abs()
    }

    /// Extent along the given direction: width for horizontal, height for vertical.
    #[must_use]
    pub fn extent(self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Horizontal => self.width(),
            Orientation::Vertical => self.height(),
        }
    }

    #[must_use]
    pub fn center(self) -> PixelPoint {
        PixelPoint::new((self.x1 + self.x2) * 0.5, (self.y1 + self.y2) * 0.5)
    }

    #[must_use]
    pub fn area(self) -> f64 {
        self.width() * self.height()
    }

    #[must_use]
    pub fn contains(self, point: PixelPoint) -> bool {
        let normalized = self.normalized();
        point.x >= normalized.x1
            && point.x <= normalized.x2
            && point.y >= normalized.y1
            && point.y <= normalized.y2
    }

    pub fn validate(self) -> DigitizeResult<()> {
        if !self.x1.is_finite()
            || !self.y1.is_finite()
            || !self.x2.is_finite()
            || !self.y2.is_finite()
        {
            return Err(DigitizeError::InvalidData(
                "bounding box corners must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Closed polygon over ordered vertices, as annotated around a text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<PixelPoint>,
}

impl Polygon {
    /// Builds a polygon from at least three finite vertices.
    pub fn new(vertices: Vec<PixelPoint>) -> DigitizeResult<Self> {
        let polygon = Self { vertices };
        polygon.validate()?;
        Ok(polygon)
    }

    /// Re-checks the construction invariants, needed after deserialization.
    pub fn validate(&self) -> DigitizeResult<()> {
        if self.vertices.len() < 3 {
            return Err(DigitizeError::InvalidData(
                "polygon requires at least three vertices".to_owned(),
            ));
        }
        for vertex in &self.vertices {
            vertex.validate()?;
        }
        Ok(())
    }

    /// Convenience constructor for an axis-aligned rectangular outline.
    #[must_use]
    pub fn rectangle(bounds: BoundingBox) -> Self {
        let normalized = bounds.normalized();
        Self {
            vertices: vec![
                PixelPoint::new(normalized.x1, normalized.y1),
                PixelPoint::new(normalized.x2, normalized.y1),
                PixelPoint::new(normalized.x2, normalized.y2),
                PixelPoint::new(normalized.x1, normalized.y2),
            ],
        }
    }

    #[must_use]
    pub fn vertices(&self) -> &[PixelPoint] {
        &self.vertices
    }

    /// Vertex centroid: the arithmetic mean of the annotated vertices.
    #[must_use]
    pub fn center(&self) -> PixelPoint {
        let count = self.vertices.len() as f64;
        let sum_x: f64 = self.vertices.iter().map(|v| v.x).sum();
        let sum_y: f64 = self.vertices.iter().map(|v| v.y).sum();
        PixelPoint::new(sum_x / count, sum_y / count)
    }

    /// Enclosed area via the shoelace formula.
    #[must_use]
    pub fn area(&self) -> f64 {
        let mut doubled = 0.0;
        for (current, next) in self.edge_pairs() {
            doubled += current.x * next.y - next.x * current.y;
        }
        doubled.abs() * 0.5
    }

    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for vertex in &self.vertices {
            min_x = min_x.min(vertex.x);
            min_y = min_y.min(vertex.y);
            max_x = max_x.max(vertex.x);
            max_y = max_y.max(vertex.y);
        }
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }

    /// Ratio of polygon area to bounding-rectangle area in `[0, 1]`.
    ///
    /// Axis-aligned rectangular text scores 1.0; text rotated by 45 degrees
    /// scores 0.5. Degenerate (zero-area) boxes count as aligned.
    #[must_use]
    pub fn aligned_area_ratio(&self) -> f64 {
        let box_area = self.bounding_box().area();
        if box_area <= f64::EPSILON {
            return 1.0;
        }
        (self.area() / box_area).clamp(0.0, 1.0)
    }

    /// Even-odd ray cast; boundary points count as inside.
    #[must_use]
    pub fn contains(&self, point: PixelPoint) -> bool {
        let mut inside = false;
        for (current, next) in self.edge_pairs() {
            if point_segment_distance(point, current, next) <= f64::EPSILON {
                return true;
            }
            let crosses = (current.y > point.y) != (next.y > point.y);
            if crosses {
                let intersect_x =
                    current.x + (point.y - current.y) / (next.y - current.y) * (next.x - current.x);
                if point.x < intersect_x {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Euclidean distance from a point to the polygon: 0 inside, otherwise the
    /// distance to the nearest edge.
    #[must_use]
    pub fn distance_to_point(&self, point: PixelPoint) -> f64 {
        if self.contains(point) {
            return 0.0;
        }
        let mut nearest = f64::INFINITY;
        for (current, next) in self.edge_pairs() {
            nearest = nearest.min(point_segment_distance(point, current, next));
        }
        nearest
    }

    fn edge_pairs(&self) -> impl Iterator<Item = (PixelPoint, PixelPoint)> + '_ {
        let count = self.vertices.len();
        (0..count).map(move |index| (self.vertices[index], self.vertices[(index + 1) % count]))
    }
}

/// Distance from `point` to the segment `a`-`b`.
#[must_use]
pub fn point_segment_distance(point: PixelPoint, a: PixelPoint, b: PixelPoint) -> f64 {
    let ab_x = b.x - a.x;
    let ab_y = b.y - a.y;
    let squared_length = ab_x * ab_x + ab_y * ab_y;
    if squared_length <= f64::EPSILON {
        return point.distance_to(a);
    }
    let t = (((point.x - a.x) * ab_x + (point.y - a.y) * ab_y) / squared_length).clamp(0.0, 1.0);
    point.distance_to(PixelPoint::new(a.x + t * ab_x, a.y + t * ab_y))
}
