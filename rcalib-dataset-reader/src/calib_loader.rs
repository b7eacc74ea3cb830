use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use rcalib_core::{pose, SensorFrameConfig, SensorKind, Transform};
use rcalib_sensor::{Lidar, PinholeCamera, Sensor};

use crate::calib_document::CalibrationDocument;

/// `extrinsics[a][b]` is `T_a_b`, the pose of frame `b` expressed in frame `a`.
pub type ExtrinsicsCollection = BTreeMap<String, BTreeMap<String, Transform>>;
pub type SensorCollection = BTreeMap<String, Sensor>;

const LIDAR_EXTRINSIC_TARGETS: [&str; 3] = ["frame_cam00", "vehicle_frame_cam00", "event_cam00"];
const BODY_IMU: &str = "body_imu";

#[derive(Debug, Default)]
pub struct CalibrationLoader {
    is_print: bool,
    pub sensor_collection: SensorCollection,
    pub extrinsics_collection: ExtrinsicsCollection,
}

impl CalibrationLoader {
    pub fn new(is_print: bool) -> Self {
        Self {
            is_print,
            ..Default::default()
        }
    }

    /// Rebuilds both collections from `{calib_path}/{frame_id}.yaml` files.
    ///
    /// Sensors of unknown kind are skipped. Any unreadable file or missing
    /// required key aborts loading.
    pub fn load_calibration<P: AsRef<Path>>(
        &mut self,
        calib_path: P,
        sensor_frames: &SensorFrameConfig,
    ) -> Result<()> {
        let calib_path = calib_path.as_ref();

        self.extrinsics_collection = sensor_frames
            .iter()
            .map(|entry| (entry.frame_id.clone(), BTreeMap::new()))
            .collect();
        self.sensor_collection = BTreeMap::new();

        for entry in sensor_frames.iter() {
            let yaml_path = calib_path.join(format!("{}.yaml", entry.frame_id));
            log::info!(
                "Loading Intrinsic Extrinsics from {:<20} ({}) ...",
                yaml_path.display(),
                entry.kind
            );

            let sensor = match entry.kind {
                SensorKind::Lidar => self.load_lidar(&entry.frame_id, &yaml_path)?,
                SensorKind::FrameCamera => self.load_frame_camera(&entry.frame_id, &yaml_path)?,
                SensorKind::EventCamera => self.load_event_camera(&entry.frame_id, &yaml_path)?,
                SensorKind::Unknown => {
                    log::warn!("Unknown sensor: {:<20}", entry.name);
                    continue;
                }
            };
            if self.is_print {
                log::info!("{}: {}", entry.name, sensor);
            }
            self.sensor_collection.insert(entry.name.clone(), sensor);
        }

        if self.is_print {
            self.print_collections();
        }
        Ok(())
    }

    pub fn extrinsic(&self, from: &str, to: &str) -> Option<&Transform> {
        self.extrinsics_collection.get(from)?.get(to)
    }

    fn load_lidar(&mut self, frame_id: &str, yaml_path: &Path) -> Result<Sensor> {
        let doc = CalibrationDocument::open(yaml_path)?;

        for target in LIDAR_EXTRINSIC_TARGETS {
            if doc.contains(&format!("sensor_{target}")) {
                let t_sensor_target = doc.sensor_transform(target)?;
                self.insert_extrinsic(frame_id, target, t_sensor_target)?;
            }
        }

        Ok(Lidar::new().into())
    }

    fn load_frame_camera(&mut self, frame_id: &str, yaml_path: &Path) -> Result<Sensor> {
        let doc = CalibrationDocument::open(yaml_path)?;
        let camera = load_pinhole_camera(&doc)?;

        if doc.contains(&format!("sensor_{BODY_IMU}")) {
            let t_sensor_bodyimu = doc.sensor_transform(BODY_IMU)?;
            self.insert_extrinsic(frame_id, BODY_IMU, t_sensor_bodyimu)?;
        }

        Ok(camera.into())
    }

    // body imu extrinsics are mandatory here, unlike for frame cameras
    fn load_event_camera(&mut self, frame_id: &str, yaml_path: &Path) -> Result<Sensor> {
        let doc = CalibrationDocument::open(yaml_path)?;

        let quaternion = doc.quaternion_wxyz("quaternion_stereo")?;
        log::debug!(
            "{frame_id} stereo quaternion (w, x, y, z): {:?}, reordered: {:?}",
            quaternion.as_slice(),
            pose::quaternion_wxyz_to_xyzw(&quaternion).as_slice()
        );
        let camera = load_pinhole_camera(&doc)?;

        let t_sensor_bodyimu = doc.sensor_transform(BODY_IMU)?;
        self.insert_extrinsic(frame_id, BODY_IMU, t_sensor_bodyimu)?;

        let eventimu_frame_id = format!("{frame_id}_imu");
        if doc.contains(&eventimu_frame_id) {
            let t_sensor_eventimu = doc.sensor_transform(&eventimu_frame_id)?;
            self.insert_extrinsic(frame_id, &eventimu_frame_id, t_sensor_eventimu)?;
        }

        Ok(camera.into())
    }

    /// Stores `t_from_to` and its inverse.
    fn insert_extrinsic(&mut self, from: &str, to: &str, t_from_to: Transform) -> Result<()> {
        let t_to_from = pose::invert_transform(&t_from_to)
            .with_context(|| format!("cannot invert extrinsic {from} -> {to}"))?;
        self.extrinsics_collection
            .entry(from.to_owned())
            .or_default()
            .insert(to.to_owned(), t_from_to);
        self.extrinsics_collection
            .entry(to.to_owned())
            .or_default()
            .insert(from.to_owned(), t_to_from);
        Ok(())
    }

    fn print_collections(&self) {
        log::info!("Sensors:");
        for (name, sensor) in &self.sensor_collection {
            log::info!("{name}: {sensor}");
        }
        log::info!("Extrinsics:");
        for (from, targets) in &self.extrinsics_collection {
            for (to, transform) in targets {
                log::info!("T_{from}_{to}:{transform}");
            }
        }
    }
}

fn load_pinhole_camera(doc: &CalibrationDocument) -> Result<PinholeCamera> {
    let camera_name = doc.string("camera_name")?;
    let distortion_model = doc.string("distortion_model")?;

    let width = doc.unsigned("image_width")?;
    let height = doc.unsigned("image_height")?;
    let k = doc.intrinsic_matrix("camera_matrix")?;
    let d = doc.distortion_coefficients("distortion_coefficients")?;
    let rect = doc.rectification_matrix("rectification_matrix")?;
    let p = doc.projection_matrix("projection_matrix")?;

    let t_stereo = doc.transform("translation_stereo", "quaternion_stereo")?;

    Ok(PinholeCamera::new(
        width,
        height,
        &camera_name,
        &distortion_model,
        k,
        d,
        rect,
        p,
        t_stereo,
    ))
}
