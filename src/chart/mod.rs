//! Chart-family data models, mark layout, and reconstruction.

pub mod data;
pub mod layout;
pub mod output;
pub mod reconstruct;

pub use data::{BarChartData, BarGrouping, BoxChartData, BoxValues, ChartData, PointChartData};
pub use layout::SeriesLayout;
pub use output::{ChartReconstruction, DataSeries, MarkGeometry, SeriesPoint};
pub use reconstruct::{reconstruct_bar, reconstruct_box, reconstruct_points};
