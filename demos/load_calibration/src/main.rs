use rcalib_core::{Camera, SensorFrameConfig};
use rcalib_dataset_reader::CalibrationLoader;
use rcalib_sensor::Sensor;

const CALIB_PATH: &str =
    "/Titan/dataset/FusionPortable_dataset_develop/calibration_files/20230618_calib/calib";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let sensor_frames = SensorFrameConfig::default();
    let mut loader = CalibrationLoader::new(true);
    loader.load_calibration(CALIB_PATH, &sensor_frames)?;

    for (name, sensor) in &loader.sensor_collection {
        match sensor {
            Sensor::Lidar(_) => log::debug!("{name}: lidar"),
            Sensor::PinholeCamera(camera) => log::debug!(
                "{name}: {}x{} camera, stereo baseline: {:.4}",
                camera.cols(),
                camera.rows(),
                camera.stereo_transform()[(0, 3)]
            ),
        }
    }
    Ok(())
}
