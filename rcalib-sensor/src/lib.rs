use std::fmt;

pub mod lidar;
pub mod pinhole_camera;

pub use lidar::Lidar;
pub use pinhole_camera::PinholeCamera;

/// Descriptor of a calibrated sensor.
#[derive(Clone, Debug, PartialEq)]
pub enum Sensor {
    Lidar(Lidar),
    PinholeCamera(PinholeCamera),
}

impl Sensor {
    pub fn as_lidar(&self) -> Option<&Lidar> {
        match self {
            Sensor::Lidar(lidar) => Some(lidar),
            _ => None,
        }
    }

    pub fn as_pinhole_camera(&self) -> Option<&PinholeCamera> {
        match self {
            Sensor::PinholeCamera(camera) => Some(camera),
            _ => None,
        }
    }
}

impl From<Lidar> for Sensor {
    fn from(lidar: Lidar) -> Self {
        Sensor::Lidar(lidar)
    }
}

impl From<PinholeCamera> for Sensor {
    fn from(camera: PinholeCamera) -> Self {
        Sensor::PinholeCamera(camera)
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sensor::Lidar(lidar) => write!(f, "{lidar}"),
            Sensor::PinholeCamera(camera) => write!(f, "{camera}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rcalib_core::{
        Camera, DistortionCoefficients, IntrinsicMatrix, ProjectionMatrix, RectificationMatrix,
        Transform,
    };

    use super::*;

    fn camera() -> PinholeCamera {
        PinholeCamera::new(
            1024,
            768,
            "frame_cam00",
            "plumb_bob",
            IntrinsicMatrix::new(606.4, 0.0, 512.1, 0.0, 605.9, 384.7, 0.0, 0.0, 1.0),
            DistortionCoefficients::new(-0.1, 0.08, 0.0, 0.0, 0.0),
            RectificationMatrix::identity(),
            ProjectionMatrix::new(
                606.4, 0.0, 512.1, 0.0, 0.0, 605.9, 384.7, 0.0, 0.0, 0.0, 1.0, 0.0,
            ),
            Transform::identity(),
        )
    }

    #[test]
    fn test_pinhole_camera() {
        let camera = camera();
        assert_eq!(camera.cols(), 1024);
        assert_eq!(camera.rows(), 768);
        assert_eq!(camera.fx(), 606.4);
        assert_eq!(camera.fy(), 605.9);
        assert_eq!(camera.cx(), 512.1);
        assert_eq!(camera.cy(), 384.7);
        assert_eq!(camera.name(), "frame_cam00");
        assert_eq!(camera.distortion_model(), "plumb_bob");
        assert_eq!(camera.distortion()[1], 0.08);
        assert_eq!(camera.projection()[(1, 2)], 384.7);
        assert_eq!(*camera.stereo_transform(), Transform::identity());
    }

    #[test]
    fn test_sensor_variants() {
        let lidar: Sensor = Lidar::new().into();
        assert!(lidar.as_lidar().is_some());
        assert!(lidar.as_pinhole_camera().is_none());
        assert_eq!(lidar.to_string(), "Lidar");

        let camera: Sensor = camera().into();
        assert!(camera.as_lidar().is_none());
        assert_eq!(camera.as_pinhole_camera().map(|c| c.width()), Some(1024));
        assert!(camera.to_string().starts_with("PinholeCamera frame_cam00"));
    }
}
