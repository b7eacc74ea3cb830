use std::fmt;

/// Lidar placeholder, carries no geometric parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lidar;

impl Lidar {
    pub fn new() -> Self {
        Lidar
    }
}

impl fmt::Display for Lidar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lidar")
    }
}
