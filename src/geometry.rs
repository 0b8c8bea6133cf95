//! Small constructors and helpers for translations, rotations, boxes and planes.

use nalgebra::{Isometry3, RealField, SVector, Translation3, Unit, Vector3};

use crate::rotation::AngleAxis;

/// Elementary axes.
pub mod axes {
    use nalgebra::{RealField, Unit, Vector3};

    pub fn x<T: RealField + Copy>() -> Unit<Vector3<T>> {
        Vector3::x_axis()
    }

    pub fn y<T: RealField + Copy>() -> Unit<Vector3<T>> {
        Vector3::y_axis()
    }

    pub fn z<T: RealField + Copy>() -> Unit<Vector3<T>> {
        Vector3::z_axis()
    }
}

/// A pose convention: the frame a pose is expressed in and the frame it describes.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct PoseHeader {
    pub parent_frame: String,
    pub child_frame: String,
}

/// A pose with source and target frame information.
#[derive(Clone, Debug, PartialEq)]
pub struct Pose {
    pub header: PoseHeader,
    pub isometry: Isometry3<f64>,
}

impl Pose {
    pub fn new(parent_frame: &str, child_frame: &str, isometry: Isometry3<f64>) -> Self {
        Self {
            header: PoseHeader {
                parent_frame: parent_frame.to_owned(),
                child_frame: child_frame.to_owned(),
            },
            isometry,
        }
    }

    /// The same relation seen from the child frame.
    pub fn inverse(&self) -> Self {
        Self::new(
            &self.header.child_frame,
            &self.header.parent_frame,
            self.isometry.inverse(),
        )
    }
}

pub fn translate<T: RealField + Copy>(translation: Vector3<T>) -> Translation3<T> {
    Translation3::from(translation)
}

pub fn translate_xyz<T: RealField + Copy>(x: T, y: T, z: T) -> Translation3<T> {
    Translation3::new(x, y, z)
}

pub fn rotate<T: RealField + Copy>(angle: T, axis: &Unit<Vector3<T>>) -> AngleAxis<T> {
    AngleAxis::new(angle, *axis)
}

pub fn rotate_x<T: RealField + Copy>(angle: T) -> AngleAxis<T> {
    rotate(angle, &axes::x())
}

pub fn rotate_y<T: RealField + Copy>(angle: T) -> AngleAxis<T> {
    rotate(angle, &axes::y())
}

pub fn rotate_z<T: RealField + Copy>(angle: T) -> AngleAxis<T> {
    rotate(angle, &axes::z())
}

/// Rotation about an axis through `pivot` instead of through the origin.
pub fn rotate_about<T: RealField + Copy>(
    angle: T,
    axis: &Unit<Vector3<T>>,
    pivot: &Vector3<T>,
) -> Isometry3<T> {
    Isometry3::from_parts(translate(*pivot), rotate(angle, axis).to_quaternion())
        * translate(-pivot)
}

pub fn rotate_x_about<T: RealField + Copy>(angle: T, pivot: &Vector3<T>) -> Isometry3<T> {
    rotate_about(angle, &axes::x(), pivot)
}

pub fn rotate_y_about<T: RealField + Copy>(angle: T, pivot: &Vector3<T>) -> Isometry3<T> {
    rotate_about(angle, &axes::y(), pivot)
}

pub fn rotate_z_about<T: RealField + Copy>(angle: T, pivot: &Vector3<T>) -> Isometry3<T> {
    rotate_about(angle, &axes::z(), pivot)
}

/// Project vector `a` onto `b`.
pub fn projection<T: RealField + Copy, const D: usize>(
    a: &SVector<T, D>,
    b: &SVector<T, D>,
) -> SVector<T, D> {
    b * (a.dot(b) / b.dot(b))
}

/// The part of `a` orthogonal to `b`.
pub fn rejection<T: RealField + Copy, const D: usize>(
    a: &SVector<T, D>,
    b: &SVector<T, D>,
) -> SVector<T, D> {
    a - projection(a, b)
}

/// Corners of an [`AlignedBox`]. Left/right pick X, bottom/top pick Y and floor/ceil pick Z.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Corner {
    BottomLeftFloor,
    BottomRightFloor,
    TopLeftFloor,
    TopRightFloor,
    BottomLeftCeil,
    BottomRightCeil,
    TopLeftCeil,
    TopRightCeil,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::BottomLeftFloor,
        Corner::BottomRightFloor,
        Corner::TopLeftFloor,
        Corner::TopRightFloor,
        Corner::BottomLeftCeil,
        Corner::BottomRightCeil,
        Corner::TopLeftCeil,
        Corner::TopRightCeil,
    ];

    fn is_right(self) -> bool {
        matches!(
            self,
            Corner::BottomRightFloor
                | Corner::TopRightFloor
                | Corner::BottomRightCeil
                | Corner::TopRightCeil
        )
    }

    fn is_top(self) -> bool {
        matches!(
            self,
            Corner::TopLeftFloor | Corner::TopRightFloor | Corner::TopLeftCeil | Corner::TopRightCeil
        )
    }

    fn is_ceil(self) -> bool {
        matches!(
            self,
            Corner::BottomLeftCeil
                | Corner::BottomRightCeil
                | Corner::TopLeftCeil
                | Corner::TopRightCeil
        )
    }
}

/// An axis aligned box spanning `min` to `max`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignedBox<T: RealField + Copy> {
    pub min: Vector3<T>,
    pub max: Vector3<T>,
}

impl<T: RealField + Copy> AlignedBox<T> {
    pub fn new(min: Vector3<T>, max: Vector3<T>) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Vector3<T> {
        (self.min + self.max) / (T::one() + T::one())
    }

    pub fn sizes(&self) -> Vector3<T> {
        self.max - self.min
    }

    pub fn contains(&self, point: &Vector3<T>) -> bool {
        (0..3).all(|i| self.min[i] <= point[i] && point[i] <= self.max[i])
    }

    pub fn corner(&self, corner: Corner) -> Vector3<T> {
        let pick = |use_max: bool, i: usize| if use_max { self.max[i] } else { self.min[i] };
        Vector3::new(
            pick(corner.is_right(), 0),
            pick(corner.is_top(), 1),
            pick(corner.is_ceil(), 2),
        )
    }
}

/// Create an aligned box with a center and dimensions.
pub fn make_centered_box<T: RealField + Copy>(
    center: &Vector3<T>,
    size: &Vector3<T>,
) -> AlignedBox<T> {
    let half = size / (T::one() + T::one());
    AlignedBox::new(center - half, center + half)
}

/// The plane of points `p` with `normal.dot(p) + offset == 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane<T: RealField + Copy> {
    pub normal: Unit<Vector3<T>>,
    pub offset: T,
}

impl<T: RealField + Copy> Plane<T> {
    pub fn new(normal: Unit<Vector3<T>>, offset: T) -> Self {
        Self { normal, offset }
    }

    pub fn through_point(normal: Unit<Vector3<T>>, point: &Vector3<T>) -> Self {
        Self::new(normal, -normal.dot(point))
    }

    pub fn signed_distance(&self, point: &Vector3<T>) -> T {
        self.normal.dot(point) + self.offset
    }

    /// The point on the plane closest to `point`.
    pub fn projection(&self, point: &Vector3<T>) -> Vector3<T> {
        point - self.normal.into_inner() * self.signed_distance(point)
    }
}

/// Create a plane with a normal through a point.
pub fn make_plane<T: RealField + Copy>(normal: Unit<Vector3<T>>, point: &Vector3<T>) -> Plane<T> {
    Plane::through_point(normal, point)
}

/// The XY plane of a pose: its normal is the Z axis of the pose, through the pose origin.
pub fn make_xy_plane<T: RealField + Copy>(pose: &Isometry3<T>) -> Plane<T> {
    Plane::through_point(pose.rotation * axes::z(), &pose.translation.vector)
}

/// Component of `vector` orthogonal to the plane.
pub fn plane_rejection<T: RealField + Copy>(vector: &Vector3<T>, plane: &Plane<T>) -> Vector3<T> {
    vector - plane.projection(vector)
}

/// Mirror `vector` in the plane.
pub fn plane_reflection<T: RealField + Copy>(vector: &Vector3<T>, plane: &Plane<T>) -> Vector3<T> {
    vector - plane_rejection(vector, plane) * (T::one() + T::one())
}
