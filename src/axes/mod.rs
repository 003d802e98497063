pub mod calibration;
pub mod infer;
pub mod model;
pub mod projection;

pub use calibration::{Anchor, AxisCalibration, CalibrationPoint};
pub use model::{
    AxesInfo, AxisSlot, AxisValues, LabelId, LabelRole, ScaleType, TextLabel, Tick, TicksType,
    ValuesType,
};
pub use projection::{AxisProjector, DataValue, find_closest_value};
