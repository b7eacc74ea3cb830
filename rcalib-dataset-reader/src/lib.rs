pub mod calib_document;
pub mod calib_loader;

pub use calib_loader::{CalibrationLoader, ExtrinsicsCollection, SensorCollection};
