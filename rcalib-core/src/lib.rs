mod camera;
pub use camera::*;
pub mod pose;
pub mod sensor_config;
pub use sensor_config::{SensorFrameConfig, SensorFrameEntry, SensorKind};

use sophus::nalgebra::{Matrix3, Matrix3x4, Matrix4, RowVector5, Vector3, Vector4};

pub type Real = f64;
pub type Translation = Vector3<Real>;
pub type Quaternion = Vector4<Real>;
pub type Transform = Matrix4<Real>;
pub type IntrinsicMatrix = Matrix3<Real>;
pub type RectificationMatrix = Matrix3<Real>;
pub type ProjectionMatrix = Matrix3x4<Real>;
pub type DistortionCoefficients = RowVector5<Real>;
