//! Conversions between nalgebra types and `geometry_msgs` messages, and helpers
//! for working with transform messages.

use nalgebra::{
    Isometry3, Quaternion as NaQuaternion, Translation3, UnitQuaternion, Vector3 as NaVector3,
};
use r2r::{
    builtin_interfaces::msg::Time,
    geometry_msgs::msg::{
        Point, Point32, Pose as PoseMsg, PoseStamped, Quaternion, Transform, TransformStamped,
        Vector3,
    },
    std_msgs::msg::Header,
};

use crate::{
    average::average_isometries, geometry::Pose, interpolate::interpolate_isometry,
    rotation::Orientation, tf_error::TfError, utils::stamp_fraction,
};

/// Conversion of a ROS message into its nalgebra counterpart.
pub trait ToNalgebra {
    type Output;

    fn to_nalgebra(&self) -> Self::Output;
}

impl ToNalgebra for Point {
    type Output = NaVector3<f64>;

    fn to_nalgebra(&self) -> Self::Output {
        NaVector3::new(self.x, self.y, self.z)
    }
}

impl ToNalgebra for Point32 {
    type Output = NaVector3<f32>;

    fn to_nalgebra(&self) -> Self::Output {
        NaVector3::new(self.x, self.y, self.z)
    }
}

impl ToNalgebra for Vector3 {
    type Output = NaVector3<f64>;

    fn to_nalgebra(&self) -> Self::Output {
        NaVector3::new(self.x, self.y, self.z)
    }
}

/// The message is normalized. A zero quaternion has no orientation and becomes the identity.
impl ToNalgebra for Quaternion {
    type Output = UnitQuaternion<f64>;

    fn to_nalgebra(&self) -> Self::Output {
        let q = NaQuaternion::new(self.w, self.x, self.y, self.z);
        UnitQuaternion::try_new(q, f64::EPSILON).unwrap_or_else(|| {
            log::warn!("zero quaternion in message, using identity rotation");
            UnitQuaternion::identity()
        })
    }
}

impl ToNalgebra for PoseMsg {
    type Output = Isometry3<f64>;

    fn to_nalgebra(&self) -> Self::Output {
        Isometry3::from_parts(
            Translation3::from(self.position.to_nalgebra()),
            self.orientation.to_nalgebra(),
        )
    }
}

impl ToNalgebra for Transform {
    type Output = Isometry3<f64>;

    fn to_nalgebra(&self) -> Self::Output {
        Isometry3::from_parts(
            Translation3::from(self.translation.to_nalgebra()),
            self.rotation.to_nalgebra(),
        )
    }
}

impl ToNalgebra for TransformStamped {
    type Output = Pose;

    fn to_nalgebra(&self) -> Self::Output {
        Pose::new(
            &self.header.frame_id,
            &self.child_frame_id,
            self.transform.to_nalgebra(),
        )
    }
}

pub fn to_ros_point(vector: &NaVector3<f64>) -> Point {
    Point {
        x: vector.x,
        y: vector.y,
        z: vector.z,
    }
}

pub fn to_ros_point32(vector: &NaVector3<f32>) -> Point32 {
    Point32 {
        x: vector.x,
        y: vector.y,
        z: vector.z,
    }
}

pub fn to_ros_vector3(vector: &NaVector3<f64>) -> Vector3 {
    Vector3 {
        x: vector.x,
        y: vector.y,
        z: vector.z,
    }
}

/// Accepts any orientation: quaternions, rotation matrices or angle-axis.
pub fn to_ros_quaternion<R: Orientation<f64>>(rotation: &R) -> Quaternion {
    let quaternion = rotation.to_unit_quaternion();
    Quaternion {
        x: quaternion.i,
        y: quaternion.j,
        z: quaternion.k,
        w: quaternion.w,
    }
}

pub fn to_ros_pose(isometry: &Isometry3<f64>) -> PoseMsg {
    PoseMsg {
        position: to_ros_point(&isometry.translation.vector),
        orientation: to_ros_quaternion(&isometry.rotation),
    }
}

pub fn to_ros_pose_stamped(isometry: &Isometry3<f64>, frame_id: &str, stamp: &Time) -> PoseStamped {
    PoseStamped {
        header: Header {
            frame_id: frame_id.to_owned(),
            stamp: stamp.clone(),
        },
        pose: to_ros_pose(isometry),
    }
}

pub fn to_ros_transform(isometry: &Isometry3<f64>) -> Transform {
    Transform {
        translation: to_ros_vector3(&isometry.translation.vector),
        rotation: to_ros_quaternion(&isometry.rotation),
    }
}

pub fn to_transform_stamped(
    transform: Transform,
    from: String,
    to: String,
    time: &Time,
) -> TransformStamped {
    TransformStamped {
        header: Header {
            frame_id: from,
            stamp: time.clone(),
        },
        child_frame_id: to,
        transform,
    }
}

impl Pose {
    /// `header.frame_id` is the parent frame, `child_frame_id` the child frame.
    pub fn to_transform_stamped(&self, stamp: &Time) -> TransformStamped {
        to_transform_stamped(
            to_ros_transform(&self.isometry),
            self.header.parent_frame.clone(),
            self.header.child_frame.clone(),
            stamp,
        )
    }
}

/// The transform from the child frame back to the parent frame, with the same stamp.
pub fn get_inverse(transform: &TransformStamped) -> TransformStamped {
    to_transform_stamped(
        to_ros_transform(&transform.transform.to_nalgebra().inverse()),
        transform.child_frame_id.clone(),
        transform.header.frame_id.clone(),
        &transform.header.stamp,
    )
}

/// Compose a chain of transforms, first element outermost.
pub fn chain_transforms(transforms: &[Transform]) -> Transform {
    let chained = transforms
        .iter()
        .fold(Isometry3::identity(), |acc, transform| {
            acc * transform.to_nalgebra()
        });
    to_ros_transform(&chained)
}

/// Blend two transforms. `weight` is the share of `tf1`: 1 gives `tf1`, 0 gives `tf2`.
pub fn interpolate(tf1: Transform, tf2: Transform, weight: f64) -> Transform {
    to_ros_transform(&interpolate_isometry(
        &tf1.to_nalgebra(),
        &tf2.to_nalgebra(),
        1.0 - weight,
    ))
}

/// The transform at `stamp`, interpolated between two stamped samples of the same frame pair.
///
/// Stamps outside the range of the two samples extrapolate. The frames of `tf2` are used.
pub fn interpolate_stamped(
    tf1: &TransformStamped,
    tf2: &TransformStamped,
    stamp: &Time,
) -> TransformStamped {
    let factor = stamp_fraction(&tf1.header.stamp, &tf2.header.stamp, stamp);
    to_transform_stamped(
        interpolate(tf1.transform.clone(), tf2.transform.clone(), 1.0 - factor),
        tf2.header.frame_id.clone(),
        tf2.child_frame_id.clone(),
        stamp,
    )
}

/// Average a set of transforms, for example repeated measurements of the same frame pair.
pub fn average_transforms(transforms: &[Transform]) -> Result<Transform, TfError> {
    let isometries = transforms.iter().map(ToNalgebra::to_nalgebra);
    Ok(to_ros_transform(&average_isometries(isometries)?))
}

#[cfg(test)]
mod test {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;

    use super::*;
    use crate::{
        geometry::{rotate_x, rotate_z, translate_xyz},
        test_utils::assert_isometry_near,
        utils::time_from_nanosec,
    };

    fn make_transform(x: f64, y: f64, z: f64, rotation: UnitQuaternion<f64>) -> Transform {
        to_ros_transform(&(translate_xyz(x, y, z) * rotation))
    }

    #[test]
    fn test_vector_conversions() {
        let point = Point {
            x: 1.0,
            y: -2.0,
            z: 3.5,
        };
        assert_eq!(point.to_nalgebra(), NaVector3::new(1.0, -2.0, 3.5));
        assert_eq!(to_ros_point(&point.to_nalgebra()), point);

        let point = Point32 {
            x: 0.5,
            y: 0.25,
            z: -1.0,
        };
        assert_eq!(point.to_nalgebra(), NaVector3::new(0.5f32, 0.25, -1.0));
        assert_eq!(to_ros_point32(&point.to_nalgebra()), point);

        let vector = Vector3 {
            x: -0.1,
            y: 0.2,
            z: 0.0,
        };
        assert_eq!(vector.to_nalgebra(), NaVector3::new(-0.1, 0.2, 0.0));
        assert_eq!(to_ros_vector3(&vector.to_nalgebra()), vector);
    }

    #[test]
    fn test_quaternion_conversion() {
        let quaternion = Quaternion {
            x: 0.5,
            y: 0.5,
            z: 0.5,
            w: -0.5,
        };
        let converted = quaternion.to_nalgebra();
        assert_eq!(converted.w, -0.5);
        assert_eq!(converted.i, 0.5);
        assert_eq!(converted.j, 0.5);
        assert_eq!(converted.k, 0.5);
        assert_eq!(to_ros_quaternion(&converted), quaternion);

        let zero = Quaternion {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 0.0,
        };
        assert_eq!(zero.to_nalgebra(), UnitQuaternion::identity());
    }

    #[test]
    fn test_angle_axis_to_ros_quaternion() {
        let rotation = rotate_x(0.5 * PI);
        let expected = to_ros_quaternion(&rotation.to_quaternion());
        let actual = to_ros_quaternion(&rotation);
        assert_relative_eq!(actual.w, expected.w, epsilon = 1e-12);
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-12);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-12);
        assert_relative_eq!(actual.x, (0.25 * PI).sin(), epsilon = 1e-12);

        let matrix = to_ros_quaternion(&rotation.to_rotation_matrix());
        assert!(matrix.to_nalgebra().angle_to(&rotation.to_quaternion()) < 1e-9);
    }

    #[test]
    fn test_pose_conversions() {
        let isometry = translate_xyz(1.0, 2.0, 3.0) * rotate_x(0.5 * PI).to_quaternion();

        let pose = to_ros_pose(&isometry);
        assert_isometry_near(&isometry, &pose.to_nalgebra(), 1e-12);

        let transform = to_ros_transform(&isometry);
        assert_isometry_near(&isometry, &transform.to_nalgebra(), 1e-12);

        let stamped = to_ros_pose_stamped(&isometry, "base_link", &time_from_nanosec(5));
        assert_eq!(stamped.header.frame_id, "base_link");
        assert_eq!(stamped.header.stamp, time_from_nanosec(5));
        assert_eq!(stamped.pose, pose);
    }

    #[test]
    fn test_pose_to_transform_stamped() {
        let pose = Pose::new("world", "item", translate_xyz(1.0, 0.0, 0.0) * UnitQuaternion::identity());
        let stamped = pose.to_transform_stamped(&time_from_nanosec(0));
        assert_eq!(stamped.header.frame_id, "world");
        assert_eq!(stamped.child_frame_id, "item");
        assert_eq!(stamped.transform.translation.x, 1.0);
        assert_eq!(stamped.to_nalgebra(), pose);
    }

    #[test]
    fn test_get_inverse() {
        let transform = to_transform_stamped(
            make_transform(0.5, -1.0, 2.0, rotate_z(0.3).to_quaternion()),
            "base_link".to_string(),
            "camera".to_string(),
            &time_from_nanosec(1_000),
        );
        let inverse = get_inverse(&transform);

        assert_eq!(inverse.header.frame_id, "camera");
        assert_eq!(inverse.child_frame_id, "base_link");
        assert_eq!(inverse.header.stamp, transform.header.stamp);

        let identity = chain_transforms(&[transform.transform, inverse.transform]);
        assert_isometry_near(&Isometry3::identity(), &identity.to_nalgebra(), 1e-12);
    }

    #[test]
    fn test_chain_transforms() {
        let chained = chain_transforms(&[
            make_transform(1.0, 0.0, 0.0, rotate_z(0.5 * PI).to_quaternion()),
            make_transform(1.0, 0.0, 0.0, UnitQuaternion::identity()),
        ]);
        let expected = translate_xyz(1.0, 1.0, 0.0) * rotate_z(0.5 * PI).to_quaternion();
        assert_isometry_near(&expected, &chained.to_nalgebra(), 1e-12);

        let empty = chain_transforms(&[]);
        assert_isometry_near(&Isometry3::identity(), &empty.to_nalgebra(), 0.0);
    }

    #[test]
    fn test_interpolate_stamped() {
        let tf1 = to_transform_stamped(
            make_transform(0.0, 0.0, 0.0, UnitQuaternion::identity()),
            "world".to_string(),
            "base_link".to_string(),
            &time_from_nanosec(1_000_000_000),
        );
        let tf2 = to_transform_stamped(
            make_transform(0.0, 2.0, 0.0, rotate_z(1.0).to_quaternion()),
            "world".to_string(),
            "base_link".to_string(),
            &time_from_nanosec(2_000_000_000),
        );

        let stamp = time_from_nanosec(1_500_000_000);
        let actual = interpolate_stamped(&tf1, &tf2, &stamp);
        assert_eq!(actual.header.stamp, stamp);
        assert_eq!(actual.header.frame_id, "world");
        assert_eq!(actual.child_frame_id, "base_link");
        assert_isometry_near(
            &(translate_xyz(0.0, 1.0, 0.0) * rotate_z(0.5).to_quaternion()),
            &actual.transform.to_nalgebra(),
            1e-9,
        );

        let at_start = interpolate_stamped(&tf1, &tf2, &tf1.header.stamp);
        assert_isometry_near(
            &tf1.transform.to_nalgebra(),
            &at_start.transform.to_nalgebra(),
            1e-12,
        );
    }

    #[test]
    fn test_average_transforms() {
        let average = average_transforms(&[
            make_transform(0.0, 1.0, 2.5, UnitQuaternion::identity()),
            make_transform(4.0, -2.0, 1.0, rotate_x(0.5 * PI).to_quaternion()),
        ])
        .unwrap();
        let expected = translate_xyz(2.0, -0.5, 1.75) * rotate_x(0.25 * PI).to_quaternion();
        assert_isometry_near(&expected, &average.to_nalgebra(), 1e-9);
        assert_relative_eq!(average.translation.y, -0.5);

        assert_eq!(
            average_transforms(&[]),
            Err(TfError::EmptyInput("isometries"))
        );
    }
}
