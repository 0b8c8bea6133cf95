use std::ops::Mul;

use nalgebra::{Quaternion, RealField, Rotation3, Unit, UnitQuaternion, Vector3};

/// A rotation of `angle` radians about a unit `axis`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleAxis<T: RealField + Copy> {
    pub angle: T,
    pub axis: Unit<Vector3<T>>,
}

impl<T: RealField + Copy> AngleAxis<T> {
    pub fn new(angle: T, axis: Unit<Vector3<T>>) -> Self {
        Self { angle, axis }
    }

    /// Zero rotation about the X axis.
    pub fn identity() -> Self {
        Self::new(T::zero(), Vector3::x_axis())
    }

    /// The angle of the result is in `[0, pi]`. When `w < 0` the axis is flipped
    /// instead, so `q` and `-q` give the same angle-axis.
    pub fn from_quaternion(quaternion: &UnitQuaternion<T>) -> Self {
        let imag = quaternion.imag();
        let norm = imag.norm();
        if norm <= T::default_epsilon() {
            return Self::identity();
        }

        let w = quaternion.scalar();
        let angle = norm.atan2(w.abs()) * (T::one() + T::one());
        let axis = if w < T::zero() {
            -imag / norm
        } else {
            imag / norm
        };
        Self::new(angle, Unit::new_unchecked(axis))
    }

    pub fn from_rotation_matrix(rotation: &Rotation3<T>) -> Self {
        Self::from_quaternion(&UnitQuaternion::from_rotation_matrix(rotation))
    }

    pub fn to_quaternion(&self) -> UnitQuaternion<T> {
        UnitQuaternion::from_axis_angle(&self.axis, self.angle)
    }

    pub fn to_rotation_matrix(&self) -> Rotation3<T> {
        Rotation3::from_axis_angle(&self.axis, self.angle)
    }

    pub fn inverse(&self) -> Self {
        Self::new(-self.angle, self.axis)
    }

    pub fn transform_vector(&self, vector: &Vector3<T>) -> Vector3<T> {
        self.to_quaternion() * vector
    }
}

impl<T: RealField + Copy> Mul for AngleAxis<T> {
    type Output = AngleAxis<T>;

    fn mul(self, rhs: Self) -> Self::Output {
        AngleAxis::from_quaternion(&(self.to_quaternion() * rhs.to_quaternion()))
    }
}

impl<T: RealField + Copy> From<UnitQuaternion<T>> for AngleAxis<T> {
    fn from(quaternion: UnitQuaternion<T>) -> Self {
        Self::from_quaternion(&quaternion)
    }
}

impl<T: RealField + Copy> From<AngleAxis<T>> for UnitQuaternion<T> {
    fn from(angle_axis: AngleAxis<T>) -> Self {
        angle_axis.to_quaternion()
    }
}

/// Anything that describes a 3D orientation and can be expressed as a unit quaternion.
pub trait Orientation<T: RealField + Copy> {
    fn to_unit_quaternion(&self) -> UnitQuaternion<T>;
}

impl<T: RealField + Copy> Orientation<T> for UnitQuaternion<T> {
    fn to_unit_quaternion(&self) -> UnitQuaternion<T> {
        *self
    }
}

impl<T: RealField + Copy> Orientation<T> for Rotation3<T> {
    fn to_unit_quaternion(&self) -> UnitQuaternion<T> {
        UnitQuaternion::from_rotation_matrix(self)
    }
}

impl<T: RealField + Copy> Orientation<T> for AngleAxis<T> {
    fn to_unit_quaternion(&self) -> UnitQuaternion<T> {
        self.to_quaternion()
    }
}

impl<T: RealField + Copy, R: Orientation<T> + ?Sized> Orientation<T> for &R {
    fn to_unit_quaternion(&self) -> UnitQuaternion<T> {
        (**self).to_unit_quaternion()
    }
}

/// Spherical linear interpolation along the shorter of the two arcs between `a` and `b`.
///
/// If the quaternions are (numerically) identical the sine in the slerp formula
/// vanishes, in which case normalized linear interpolation is used.
pub fn slerp_shortest<T: RealField + Copy>(
    a: &UnitQuaternion<T>,
    b: &UnitQuaternion<T>,
    factor: T,
) -> UnitQuaternion<T> {
    let b = if a.coords.dot(&b.coords) < T::zero() {
        UnitQuaternion::new_unchecked(-b.into_inner())
    } else {
        *b
    };

    a.try_slerp(&b, factor, T::default_epsilon())
        .unwrap_or_else(|| a.nlerp(&b, factor))
}

/// Flip the sign of `q` so that `w >= 0`. For `w == 0` the first non-zero
/// imaginary component is made positive.
pub(crate) fn canonical_sign<T: RealField + Copy>(q: Quaternion<T>) -> Quaternion<T> {
    let leading = [q.w, q.i, q.j, q.k]
        .into_iter()
        .find(|component| *component != T::zero())
        .unwrap_or_else(T::zero);
    if leading < T::zero() {
        -q
    } else {
        q
    }
}

/// Roll, pitch and yaw (about X, Y and Z) to a quaternion, composed as `Rz(yaw) * Ry(pitch) * Rx(roll)`.
pub fn rpy_to_quaternion<T: RealField + Copy>(rpy: &Vector3<T>) -> UnitQuaternion<T> {
    UnitQuaternion::from_euler_angles(rpy.x, rpy.y, rpy.z)
}

/// Inverse of [`rpy_to_quaternion`].
pub fn quaternion_to_rpy<T: RealField + Copy>(quaternion: &UnitQuaternion<T>) -> Vector3<T> {
    let (roll, pitch, yaw) = quaternion.euler_angles();
    Vector3::new(roll, pitch, yaw)
}
