use std::{fmt, path::Path};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

/// Sensor family, decided once from the configured sensor name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    Lidar,
    FrameCamera,
    EventCamera,
    Unknown,
}

impl SensorKind {
    /// `ouster` wins over `frame`, which wins over `event` + `camera`.
    pub fn classify(sensor_name: &str) -> Self {
        if sensor_name.contains("ouster") {
            SensorKind::Lidar
        } else if sensor_name.contains("frame") {
            SensorKind::FrameCamera
        } else if sensor_name.contains("event") && sensor_name.contains("camera") {
            SensorKind::EventCamera
        } else {
            SensorKind::Unknown
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SensorKind::Lidar => "lidar",
            SensorKind::FrameCamera => "frame_camera",
            SensorKind::EventCamera => "event_camera",
            SensorKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorFrameEntry {
    pub name: String,
    pub frame_id: String,
    pub kind: SensorKind,
    /// Trailing tuple elements after the frame id (topic names and such).
    pub extra: Vec<String>,
}

impl SensorFrameEntry {
    pub fn new(name: &str, frame_id: &str) -> Self {
        Self {
            name: name.to_owned(),
            frame_id: frame_id.to_owned(),
            kind: SensorKind::classify(name),
            extra: vec![],
        }
    }

    pub fn with_kind(mut self, kind: SensorKind) -> Self {
        self.kind = kind;
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FrameIdTuple {
    Single(String),
    Tuple(Vec<String>),
    Detailed {
        frame_id: String,
        kind: Option<SensorKind>,
        #[serde(default)]
        extra: Vec<String>,
    },
}

/// Ordered mapping from logical sensor name to its frame id.
///
/// In YAML this is a mapping `sensor_name: [frame_id, ...]`; a bare string
/// is accepted as the frame id. The long form
/// `sensor_name: {frame_id: ..., kind: ..., extra: [...]}` overrides the
/// kind derived from the name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_yaml::Mapping")]
pub struct SensorFrameConfig {
    entries: Vec<SensorFrameEntry>,
}

impl TryFrom<serde_yaml::Mapping> for SensorFrameConfig {
    type Error = anyhow::Error;

    fn try_from(mapping: serde_yaml::Mapping) -> Result<Self> {
        let mut entries = vec![];
        for (key, value) in mapping {
            let name = key
                .as_str()
                .ok_or_else(|| anyhow!("sensor name {:?} is not a string", key))?;
            let tuple: FrameIdTuple = serde_yaml::from_value(value)
                .with_context(|| format!("bad frame id entry for sensor {name}"))?;
            let (frame_id, kind, extra) = match tuple {
                FrameIdTuple::Single(frame_id) => (frame_id, None, vec![]),
                FrameIdTuple::Tuple(mut items) => {
                    if items.is_empty() {
                        return Err(anyhow!("sensor {name} has an empty frame id tuple"));
                    }
                    let frame_id = items.remove(0);
                    (frame_id, None, items)
                }
                FrameIdTuple::Detailed {
                    frame_id,
                    kind,
                    extra,
                } => (frame_id, kind, extra),
            };
            let mut entry = SensorFrameEntry::new(name, &frame_id);
            if let Some(kind) = kind {
                entry = entry.with_kind(kind);
            }
            entry.extra = extra;
            entries.push(entry);
        }
        Ok(Self { entries })
    }
}

impl Default for SensorFrameConfig {
    fn default() -> Self {
        Self::from_entries(vec![
            SensorFrameEntry::new("ouster_points", "ouster00"),
            SensorFrameEntry::new("frame_left_camera", "frame_cam00"),
            SensorFrameEntry::new("frame_right_camera", "frame_cam01"),
            SensorFrameEntry::new("event_left_camera", "event_cam00"),
            SensorFrameEntry::new("event_right_camera", "event_cam01"),
            SensorFrameEntry::new("vehicle_frame_left_camera", "vehicle_frame_cam00"),
        ])
    }
}

impl SensorFrameConfig {
    pub fn from_entries(entries: Vec<SensorFrameEntry>) -> Self {
        Self { entries }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read sensor config {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn entries(&self) -> &[SensorFrameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SensorFrameEntry> {
        self.entries.iter()
    }
}
