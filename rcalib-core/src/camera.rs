pub trait Camera {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn stereo_transform(&self) -> &crate::Transform;
}
