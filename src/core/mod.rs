pub mod assignment;
pub mod geometry;
pub mod interpolate;
pub mod numeric;
pub mod sorting;

pub use assignment::{CostMatrix, assign, distance_costs};
pub use geometry::{BoundingBox, Orientation, PixelPoint, Polygon};
pub use interpolate::LinearInterpolator;
pub use numeric::parse_label_value;
pub use sorting::SeriesSorting;
