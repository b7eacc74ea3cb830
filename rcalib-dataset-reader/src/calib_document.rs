//! Access to one `{frame_id}.yaml` calibration document.
//!
//! Matrices follow the ROS camera-info layout, `{rows, cols, data}` with
//! `data` in row-major order. Quaternions are stored as `(w, x, y, z)`.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use rcalib_core::{
    pose, DistortionCoefficients, IntrinsicMatrix, ProjectionMatrix, Quaternion, Real,
    RectificationMatrix, Transform, Translation,
};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

#[derive(Debug, Deserialize)]
struct YamlMatrix {
    rows: Option<usize>,
    cols: Option<usize>,
    data: Vec<Real>,
}

pub struct CalibrationDocument {
    path: PathBuf,
    root: Mapping,
}

impl CalibrationDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read calibration file {}", path.display()))?;
        Self::from_yaml_str(path, &contents)
    }

    pub fn from_yaml_str<P: AsRef<Path>>(path: P, contents: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let root: Mapping = serde_yaml::from_str(contents)
            .with_context(|| format!("failed to parse calibration file {}", path.display()))?;
        Ok(Self { path, root })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contains(&self, key: &str) -> bool {
        self.root.contains_key(key)
    }

    fn get(&self, key: &str) -> Result<&Value> {
        self.root
            .get(key)
            .ok_or_else(|| anyhow!("missing key `{}` in {}", key, self.path.display()))
    }

    fn parse<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<T> {
        serde_yaml::from_value(self.get(key)?.clone())
            .with_context(|| format!("malformed key `{}` in {}", key, self.path.display()))
    }

    pub fn string(&self, key: &str) -> Result<String> {
        self.parse(key)
    }

    pub fn unsigned(&self, key: &str) -> Result<usize> {
        self.parse(key)
    }

    /// Row-major matrix data, which must hold exactly `rows * cols` values.
    ///
    /// A declared `rows`/`cols` must match the requested shape.
    pub fn matrix_data(&self, key: &str, rows: usize, cols: usize) -> Result<Vec<Real>> {
        let matrix: YamlMatrix = self.parse(key)?;
        if matrix.data.len() != rows * cols {
            bail!(
                "key `{}` in {} has {} values, expected {}x{}",
                key,
                self.path.display(),
                matrix.data.len(),
                rows,
                cols
            );
        }
        let declared_rows = matrix.rows.unwrap_or(rows);
        let declared_cols = matrix.cols.unwrap_or(cols);
        if (declared_rows, declared_cols) != (rows, cols) {
            bail!(
                "key `{}` in {} declares {}x{}, expected {}x{}",
                key,
                self.path.display(),
                declared_rows,
                declared_cols,
                rows,
                cols
            );
        }
        Ok(matrix.data)
    }

    pub fn intrinsic_matrix(&self, key: &str) -> Result<IntrinsicMatrix> {
        Ok(IntrinsicMatrix::from_row_slice(&self.matrix_data(key, 3, 3)?))
    }

    pub fn rectification_matrix(&self, key: &str) -> Result<RectificationMatrix> {
        Ok(RectificationMatrix::from_row_slice(&self.matrix_data(key, 3, 3)?))
    }

    pub fn projection_matrix(&self, key: &str) -> Result<ProjectionMatrix> {
        Ok(ProjectionMatrix::from_row_slice(&self.matrix_data(key, 3, 4)?))
    }

    pub fn distortion_coefficients(&self, key: &str) -> Result<DistortionCoefficients> {
        Ok(DistortionCoefficients::from_row_slice(&self.matrix_data(key, 1, 5)?))
    }

    pub fn translation(&self, key: &str) -> Result<Translation> {
        Ok(Translation::from_row_slice(&self.matrix_data(key, 3, 1)?))
    }

    /// Quaternion as stored, `(w, x, y, z)`.
    pub fn quaternion_wxyz(&self, key: &str) -> Result<Quaternion> {
        Ok(Quaternion::from_row_slice(&self.matrix_data(key, 4, 1)?))
    }

    pub fn transform(&self, translation_key: &str, quaternion_key: &str) -> Result<Transform> {
        let translation = self.translation(translation_key)?;
        let quaternion = pose::quaternion_wxyz_to_xyzw(&self.quaternion_wxyz(quaternion_key)?);
        pose::convert_vec_to_matrix(&translation, &quaternion)
            .with_context(|| format!("bad `{}` in {}", quaternion_key, self.path.display()))
    }

    /// Transform of relation `sensor_<target>`.
    pub fn sensor_transform(&self, target: &str) -> Result<Transform> {
        self.transform(
            &format!("translation_sensor_{target}"),
            &format!("quaternion_sensor_{target}"),
        )
    }
}
