use nalgebra::{Isometry3, RealField, Rotation3, SVector, Translation3, UnitQuaternion};

use crate::rotation::{slerp_shortest, AngleAxis, Orientation};

/// Interpolate linearly between two vectors.
///
/// At factor 0 the first vector is returned, at factor 1 the second. Factors outside `[0, 1]`
/// extrapolate along the same line.
pub fn interpolate_vector<T: RealField + Copy, const D: usize>(
    a: &SVector<T, D>,
    b: &SVector<T, D>,
    factor: T,
) -> SVector<T, D> {
    // Same as `a + (b - a) * factor`, but exact at both end points.
    a * (T::one() - factor) + b * factor
}

/// Rotations that can be interpolated along the shortest arc between them.
pub trait InterpolateRotation<T: RealField + Copy>: Sized {
    fn interpolate_rotation(&self, other: &Self, factor: T) -> Self;
}

impl<T: RealField + Copy> InterpolateRotation<T> for AngleAxis<T> {
    fn interpolate_rotation(&self, other: &Self, factor: T) -> Self {
        let mut difference = *other * self.inverse();
        difference.angle *= factor;
        difference * *self
    }
}

impl<T: RealField + Copy> InterpolateRotation<T> for UnitQuaternion<T> {
    fn interpolate_rotation(&self, other: &Self, factor: T) -> Self {
        slerp_shortest(self, other, factor)
    }
}

impl<T: RealField + Copy> InterpolateRotation<T> for Rotation3<T> {
    fn interpolate_rotation(&self, other: &Self, factor: T) -> Self {
        slerp_shortest(
            &self.to_unit_quaternion(),
            &other.to_unit_quaternion(),
            factor,
        )
        .to_rotation_matrix()
    }
}

/// Interpolate spherical linearly between two rotations of the same representation.
///
/// At factor 0 the first rotation is returned, at factor 1 the second.
pub fn interpolate_rotation<T, R>(a: &R, b: &R, factor: T) -> R
where
    T: RealField + Copy,
    R: InterpolateRotation<T>,
{
    a.interpolate_rotation(b, factor)
}

/// Interpolate spherical linearly between two rotations of any representation.
pub fn interpolate_orientation<T, A, B>(a: &A, b: &B, factor: T) -> UnitQuaternion<T>
where
    T: RealField + Copy,
    A: Orientation<T>,
    B: Orientation<T>,
{
    slerp_shortest(&a.to_unit_quaternion(), &b.to_unit_quaternion(), factor)
}

/// Interpolate between two isometries.
///
/// The translation is interpolated linearly and the rotation spherical linearly.
pub fn interpolate_isometry<T: RealField + Copy>(
    a: &Isometry3<T>,
    b: &Isometry3<T>,
    factor: T,
) -> Isometry3<T> {
    Isometry3::from_parts(
        Translation3::from(interpolate_vector(
            &a.translation.vector,
            &b.translation.vector,
            factor,
        )),
        slerp_shortest(&a.rotation, &b.rotation, factor),
    )
}
