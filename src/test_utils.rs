use nalgebra::{Isometry3, Vector3};

use crate::rotation::AngleAxis;

/// Assert two vectors are within `tolerance` of each other in every component.
pub(crate) fn assert_vector_near(expected: &Vector3<f64>, actual: &Vector3<f64>, tolerance: f64) {
    let diff = (expected - actual).abs();
    assert!(
        diff.iter().all(|d| *d <= tolerance),
        "actual ({actual:?}) is not within tolerance ({tolerance}) of expected ({expected:?})"
    );
}

/// Assert two rotations differ by at most `tolerance` radians.
pub(crate) fn assert_angle_axis_near(
    expected: &AngleAxis<f64>,
    actual: &AngleAxis<f64>,
    tolerance: f64,
) {
    let angle = expected.to_quaternion().angle_to(&actual.to_quaternion());
    assert!(
        angle <= tolerance,
        "actual ({actual:?}) is {angle} rad away from expected ({expected:?}), tolerance {tolerance}"
    );
}

pub(crate) fn assert_isometry_near(
    expected: &Isometry3<f64>,
    actual: &Isometry3<f64>,
    tolerance: f64,
) {
    assert_vector_near(
        &expected.translation.vector,
        &actual.translation.vector,
        tolerance,
    );
    assert_angle_axis_near(
        &AngleAxis::from_quaternion(&expected.rotation),
        &AngleAxis::from_quaternion(&actual.rotation),
        tolerance,
    );
}
