use std::fmt;

use rcalib_core::{
    DistortionCoefficients, IntrinsicMatrix, ProjectionMatrix, RectificationMatrix, Transform,
};

#[derive(Clone, Debug, PartialEq)]
pub struct PinholeCamera {
    width: usize,
    height: usize,
    name: String,
    distortion_model: String,

    intrinsics: IntrinsicMatrix,
    distortion: DistortionCoefficients,
    rectification: RectificationMatrix,
    projection: ProjectionMatrix,

    // transform to the other camera of the stereo pair
    stereo_transform: Transform,
}

impl rcalib_core::Camera for PinholeCamera {
    fn cols(&self) -> usize {
        self.width
    }

    fn rows(&self) -> usize {
        self.height
    }

    fn stereo_transform(&self) -> &Transform {
        &self.stereo_transform
    }
}

impl PinholeCamera {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        width: usize,
        height: usize,
        name: &str,
        distortion_model: &str,
        intrinsics: IntrinsicMatrix,
        distortion: DistortionCoefficients,
        rectification: RectificationMatrix,
        projection: ProjectionMatrix,
        stereo_transform: Transform,
    ) -> Self {
        Self {
            width,
            height,
            name: name.to_owned(),
            distortion_model: distortion_model.to_owned(),
            intrinsics,
            distortion,
            rectification,
            projection,
            stereo_transform,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn distortion_model(&self) -> &str {
        &self.distortion_model
    }

    /// 3x3 camera matrix `K`.
    pub fn intrinsics(&self) -> &IntrinsicMatrix {
        &self.intrinsics
    }

    /// 1x5 distortion coefficients `D`.
    pub fn distortion(&self) -> &DistortionCoefficients {
        &self.distortion
    }

    pub fn rectification(&self) -> &RectificationMatrix {
        &self.rectification
    }

    /// 3x4 projection matrix `P`.
    pub fn projection(&self) -> &ProjectionMatrix {
        &self.projection
    }

    pub fn fx(&self) -> f64 {
        self.intrinsics[(0, 0)]
    }

    pub fn fy(&self) -> f64 {
        self.intrinsics[(1, 1)]
    }

    pub fn cx(&self) -> f64 {
        self.intrinsics[(0, 2)]
    }

    pub fn cy(&self) -> f64 {
        self.intrinsics[(1, 2)]
    }
}

impl fmt::Display for PinholeCamera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PinholeCamera {} ({})", self.name, self.distortion_model)?;
        writeln!(f, "  size: {}x{}", self.width, self.height)?;
        write!(f, "  K:{}", self.intrinsics)?;
        write!(f, "  D:{}", self.distortion)?;
        write!(f, "  Rect:{}", self.rectification)?;
        write!(f, "  P:{}", self.projection)?;
        write!(f, "  T_stereo:{}", self.stereo_transform)
    }
}
