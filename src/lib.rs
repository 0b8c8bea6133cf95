mod average;
pub mod geometry;
mod interpolate;
pub mod rotation;
mod tf_error;
#[cfg(test)]
mod test_utils;
#[cfg(feature = "r2r")]
pub mod transforms;
#[cfg(feature = "r2r")]
pub mod utils;

pub use average::{average_isometries, average_positions, average_rotations, Position};
pub use geometry::{AlignedBox, Plane, Pose, PoseHeader};
pub use interpolate::{
    interpolate_isometry, interpolate_orientation, interpolate_rotation, interpolate_vector,
    InterpolateRotation,
};
pub use rotation::{AngleAxis, Orientation};
pub use tf_error::TfError;
